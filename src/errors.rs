use thiserror::Error;

use crate::handle::HandleError;
use crate::resolve::OptionId;
use crate::token::DatumKind;

pub type Result<T> = std::result::Result<T, TransferOptsError>;

#[derive(Error, Debug)]
pub enum TransferOptsError {
    #[error("Malformed options document at pair {pair}: {reason}")]
    Structure { pair: usize, reason: String },
    #[error("Unsupported option key type at pair {pair}: {found}")]
    UnsupportedKeyType { pair: usize, found: DatumKind },
    #[error(
        "Unsupported value type for option {option} at pair {pair}: {found}"
    )]
    UnsupportedValueType {
        pair: usize,
        option: OptionId,
        found: DatumKind,
    },
    #[error("Option {option} rejected at pair {pair}: {source}")]
    SetterRejected {
        pair: usize,
        option: OptionId,
        #[source]
        source: HandleError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransferOptsError {
    /// Index of the document pair the error was raised at,
    /// if it was raised while walking a document.
    pub fn pair(&self) -> Option<usize> {
        match self {
            Self::Structure { pair, .. }
            | Self::UnsupportedKeyType { pair, .. }
            | Self::UnsupportedValueType { pair, .. }
            | Self::SetterRejected { pair, .. } => Some(*pair),
            _ => None,
        }
    }

    pub(crate) fn structure<S: Into<String>>(pair: usize, reason: S) -> Self {
        Self::Structure {
            pair,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for TransferOptsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}
