use crate::coerce::ValueToken;
use crate::config::{ApplyConfig, ApplyMode};
use crate::handle::TransferHandle;
use crate::resolve::{KeyToken, OptionId};
use crate::token::{OptionDocument, Token, TokenKind, TokenStream};
use crate::{Result, TransferOptsError};

/// Applies option documents to transfer handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applicator {
    mode: ApplyMode,
}

impl Applicator {
    pub fn new(mode: ApplyMode) -> Self {
        Applicator { mode }
    }

    pub fn from_config(config: &ApplyConfig) -> Self {
        Self::new(config.mode)
    }

    pub fn mode(&self) -> ApplyMode {
        self.mode
    }

    /// Set every option of `document` on `handle`, in document order.
    ///
    /// In [`ApplyMode::Greedy`] options set before a failing pair stay set.
    /// In [`ApplyMode::ValidateFirst`] a malformed document leaves the
    /// handle untouched, but a setter rejected by the client still leaves
    /// the earlier options set.
    pub fn apply<D, H>(&self, document: &D, handle: &mut H) -> Result<()>
    where
        D: OptionDocument + ?Sized,
        H: TransferHandle + ?Sized,
    {
        if self.mode == ApplyMode::ValidateFirst {
            let pairs = walk(&mut document.tokens(), |_, _, _| Ok(()))?;
            log::debug!("Validated {} option pairs", pairs);
        }
        apply_stream(&mut document.tokens(), handle)
    }
}

/// Greedy application of `document`, see [`Applicator::apply`].
pub fn apply_options<D, H>(document: &D, handle: &mut H) -> Result<()>
where
    D: OptionDocument + ?Sized,
    H: TransferHandle + ?Sized,
{
    Applicator::default().apply(document, handle)
}

/// Greedy application of a one-shot token stream.
pub fn apply_stream<'doc, S, H>(stream: &mut S, handle: &mut H) -> Result<()>
where
    S: TokenStream<'doc> + ?Sized,
    H: TransferHandle + ?Sized,
{
    let applied = walk(stream, |pair, option, value| {
        handle
            .set_option(option, value.coerce())
            .map_err(|source| TransferOptsError::SetterRejected {
                pair,
                option,
                source,
            })
    })?;
    log::info!("Applied {} transfer options", applied);
    Ok(())
}

/// Walk an object-shaped stream, handing every resolved pair to `visit`.
///
/// Returns the number of pairs visited. The stream must hold exactly one
/// object: `BeginObject (Key Value)* EndObject`.
fn walk<'doc, S, F>(stream: &mut S, mut visit: F) -> Result<usize>
where
    S: TokenStream<'doc> + ?Sized,
    F: FnMut(usize, OptionId, ValueToken<'doc>) -> Result<()>,
{
    match stream.peek_kind() {
        Some(TokenKind::BeginObject) => {
            stream.next_token();
        }
        Some(kind) => {
            return Err(TransferOptsError::structure(
                0,
                format!("document root is not an object but {:?}", kind),
            ))
        }
        None => {
            return Err(TransferOptsError::structure(0, "document is empty"))
        }
    }

    let mut pair = 0;
    loop {
        let key = match stream.next_token() {
            Some(Token::Key(key)) => key,
            Some(Token::EndObject) => break,
            Some(token) => {
                return Err(TransferOptsError::structure(
                    pair,
                    format!("expected a key, found {:?}", token.kind()),
                ))
            }
            None => {
                return Err(TransferOptsError::structure(
                    pair,
                    "document ended inside the object",
                ))
            }
        };
        let option = KeyToken::try_from(key)
            .map_err(|found| TransferOptsError::UnsupportedKeyType {
                pair,
                found,
            })?
            .resolve();
        log::debug!("Option key {:?} resolved to {}", key, option);

        let value = match stream.next_token() {
            Some(Token::Value(value)) => value,
            Some(token) => {
                return Err(TransferOptsError::structure(
                    pair,
                    format!(
                        "expected a value for option {}, found {:?}",
                        option,
                        token.kind()
                    ),
                ))
            }
            None => {
                return Err(TransferOptsError::structure(
                    pair,
                    format!("document ended before the value of {}", option),
                ))
            }
        };
        let value = ValueToken::try_from(value).map_err(|found| {
            TransferOptsError::UnsupportedValueType {
                pair,
                option,
                found,
            }
        })?;

        visit(pair, option, value)?;
        pair += 1;
    }

    if let Some(kind) = stream.peek_kind() {
        return Err(TransferOptsError::structure(
            pair,
            format!("unexpected {:?} after the end of the object", kind),
        ));
    }
    Ok(pair)
}
