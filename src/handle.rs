use std::os::raw::c_long;

use thiserror::Error;

use crate::coerce::{ArgKind, OptionArg};
use crate::resolve::OptionId;

/// Why a transfer client refused one setter call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    #[error("unknown option {0}")]
    UnknownOption(OptionId),
    #[error("option {option} expects a {expected} argument, got {found}")]
    ArgumentMismatch {
        option: OptionId,
        expected: ArgKind,
        found: ArgKind,
    },
    #[error("invalid value for option {option}: {reason}")]
    InvalidValue { option: OptionId, reason: String },
}

/// A configured-but-not-yet-executed transfer.
///
/// The handle is owned by the caller; applying a document only ever
/// calls `set_option` on it, once per pair, in document order.
pub trait TransferHandle {
    /// Generic "set option" entry point of the client.
    fn set_option(
        &mut self,
        option: OptionId,
        arg: OptionArg<'_>,
    ) -> Result<(), HandleError>;
}

/// Owned copy of an [`OptionArg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedArg {
    Bool(bool),
    Str(String),
    Long(c_long),
}

impl From<OptionArg<'_>> for OwnedArg {
    fn from(arg: OptionArg<'_>) -> Self {
        match arg {
            OptionArg::Bool(flag) => OwnedArg::Bool(flag),
            OptionArg::Str(text) => OwnedArg::Str(text.to_owned()),
            OptionArg::Long(number) => OwnedArg::Long(number),
        }
    }
}

/// Handle that accepts every option and remembers the calls made on it.
///
/// Useful for dry runs: apply a document to it to see what would be set.
#[derive(Debug, Default, Clone)]
pub struct RecordingHandle {
    calls: Vec<(OptionId, OwnedArg)>,
}

impl RecordingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in the order it was made.
    pub fn calls(&self) -> &[(OptionId, OwnedArg)] {
        &self.calls
    }

    /// The value the option was last set to.
    pub fn get(&self, option: OptionId) -> Option<&OwnedArg> {
        self.calls
            .iter()
            .rev()
            .find(|(id, _)| *id == option)
            .map(|(_, arg)| arg)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl TransferHandle for RecordingHandle {
    fn set_option(
        &mut self,
        option: OptionId,
        arg: OptionArg<'_>,
    ) -> Result<(), HandleError> {
        log::trace!("Recording option {} = {:?}", option, arg);
        self.calls.push((option, arg.into()));
        Ok(())
    }
}
