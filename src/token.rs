use std::fmt;
use std::iter::Peekable;

/// Kind of the next token in a document walk,
/// without the data it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    BeginObject,
    Key,
    Value,
    EndObject,
    BeginArray,
    Element,
    EndArray,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Numeric {
    /// Narrows the number to 32 bits with two's-complement wraparound.
    ///
    /// Floats are truncated toward zero first, saturating at the bounds
    /// of `i64` (NaN becomes 0).
    pub fn wrapping_i32(self) -> i32 {
        match self {
            Numeric::Int(value) => value as i32,
            Numeric::UInt(value) => value as i32,
            Numeric::Float(value) => (value as i64) as i32,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(value) => write!(f, "{}", value),
            Numeric::UInt(value) => write!(f, "{}", value),
            Numeric::Float(value) => write!(f, "{}", value),
        }
    }
}

/// A dynamically-typed scalar borrowed from the document.
///
/// Nested containers are opaque: the walk does not descend into them,
/// so they show up as a single `Array` or `Object` datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Datum<'doc> {
    Null,
    Bool(bool),
    Numeric(Numeric),
    String(&'doc str),
    Array,
    Object,
}

impl<'doc> Datum<'doc> {
    pub fn kind(&self) -> DatumKind {
        match self {
            Datum::Null => DatumKind::Null,
            Datum::Bool(_) => DatumKind::Boolean,
            Datum::Numeric(_) => DatumKind::Numeric,
            Datum::String(_) => DatumKind::String,
            Datum::Array => DatumKind::Array,
            Datum::Object => DatumKind::Object,
        }
    }
}

/// Dynamic type tag of a [`Datum`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumKind {
    Null,
    Boolean,
    Numeric,
    String,
    Array,
    Object,
}

impl fmt::Display for DatumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatumKind::Null => "null",
            DatumKind::Boolean => "boolean",
            DatumKind::Numeric => "numeric",
            DatumKind::String => "string",
            DatumKind::Array => "array",
            DatumKind::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'doc> {
    BeginObject,
    Key(Datum<'doc>),
    Value(Datum<'doc>),
    EndObject,
    BeginArray,
    Element(Datum<'doc>),
    EndArray,
}

impl<'doc> Token<'doc> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::BeginObject => TokenKind::BeginObject,
            Token::Key(_) => TokenKind::Key,
            Token::Value(_) => TokenKind::Value,
            Token::EndObject => TokenKind::EndObject,
            Token::BeginArray => TokenKind::BeginArray,
            Token::Element(_) => TokenKind::Element,
            Token::EndArray => TokenKind::EndArray,
        }
    }
}

/// Pull-style walk over a structured document.
///
/// Tokens borrow from the document for `'doc`, so walking never copies
/// the document's backing storage.
pub trait TokenStream<'doc> {
    /// Kind of the token `next_token` would return,
    /// or `None` once the stream is exhausted.
    fn peek_kind(&mut self) -> Option<TokenKind>;

    /// Consume the next token.
    fn next_token(&mut self) -> Option<Token<'doc>>;
}

impl<'doc, I> TokenStream<'doc> for Peekable<I>
where
    I: Iterator<Item = Token<'doc>>,
{
    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(Token::kind)
    }

    fn next_token(&mut self) -> Option<Token<'doc>> {
        self.next()
    }
}

/// A document that can be walked any number of times.
pub trait OptionDocument {
    type Tokens<'doc>: TokenStream<'doc>
    where
        Self: 'doc;

    /// Start a fresh walk from the document root.
    fn tokens(&self) -> Self::Tokens<'_>;
}

/// Replays a pre-tokenized document.
pub struct SliceTokens<'doc, 'a> {
    tokens: &'doc [Token<'a>],
    position: usize,
}

impl<'doc, 'a: 'doc> TokenStream<'doc> for SliceTokens<'doc, 'a> {
    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.tokens.get(self.position).map(Token::kind)
    }

    fn next_token(&mut self) -> Option<Token<'doc>> {
        let token = self.tokens.get(self.position).copied()?;
        self.position += 1;
        Some(token)
    }
}

impl<'a> OptionDocument for [Token<'a>] {
    type Tokens<'doc> = SliceTokens<'doc, 'a>
    where
        Self: 'doc;

    fn tokens(&self) -> Self::Tokens<'_> {
        SliceTokens {
            tokens: self,
            position: 0,
        }
    }
}
