//! Apply a dynamically-typed options document to a transfer handle.
//!
//! A document is an object whose keys are option codes (numbers, or their
//! decimal string form) and whose values are booleans, strings or numbers:
//!
//! ```
//! use serde_json::json;
//! use transfer_opts::{apply_options, OptionId, OwnedArg, RecordingHandle};
//!
//! let document = json!({"1": true, "2": "https://example.test", "3": 30});
//! let mut handle = RecordingHandle::new();
//! apply_options(&document, &mut handle).unwrap();
//!
//! assert_eq!(handle.get(OptionId(3)), Some(&OwnedArg::Long(30)));
//! ```
//!
//! Application is not atomic: when a pair fails, the pairs before it stay
//! applied. [`ApplyMode::ValidateFirst`] checks the whole document first.

pub mod apply;
pub mod coerce;
pub mod config;
mod errors;
pub mod handle;
pub mod http;
pub mod json;
pub mod options;
pub mod resolve;
pub mod token;

pub use apply::{apply_options, apply_stream, Applicator};
pub use coerce::{ArgKind, OptionArg, ValueToken};
pub use config::{ApplyConfig, ApplyMode};
pub use errors::{Result, TransferOptsError};
pub use handle::{HandleError, OwnedArg, RecordingHandle, TransferHandle};
pub use http::HttpTransfer;
pub use resolve::{KeyToken, OptionId};
pub use token::{
    Datum, DatumKind, Numeric, OptionDocument, Token, TokenKind, TokenStream,
};
