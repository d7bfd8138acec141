use std::iter::Peekable;

use serde_json::{map, Number, Value};

use crate::token::{Datum, Numeric, OptionDocument, Token};

pub type JsonTokens<'doc> = Peekable<JsonWalk<'doc>>;

/// Shallow walk over a JSON document.
///
/// Object members come out in document order as `Key`/`Value` pairs;
/// nested containers are reported as one opaque value and never entered.
pub struct JsonWalk<'doc> {
    state: State<'doc>,
}

enum State<'doc> {
    Root(&'doc Value),
    Object {
        entries: map::Iter<'doc>,
        pending: Option<&'doc Value>,
    },
    Array(std::slice::Iter<'doc, Value>),
    Done,
}

impl<'doc> JsonWalk<'doc> {
    pub fn new(root: &'doc Value) -> Self {
        JsonWalk {
            state: State::Root(root),
        }
    }
}

impl<'doc> Iterator for JsonWalk<'doc> {
    type Item = Token<'doc>;

    fn next(&mut self) -> Option<Token<'doc>> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::Root(Value::Object(members)) => {
                self.state = State::Object {
                    entries: members.iter(),
                    pending: None,
                };
                Some(Token::BeginObject)
            }
            State::Root(Value::Array(items)) => {
                self.state = State::Array(items.iter());
                Some(Token::BeginArray)
            }
            State::Root(scalar) => Some(Token::Element(scalar.into())),
            State::Object {
                entries,
                pending: Some(value),
            } => {
                self.state = State::Object {
                    entries,
                    pending: None,
                };
                Some(Token::Value(value.into()))
            }
            State::Object {
                mut entries,
                pending: None,
            } => match entries.next() {
                Some((key, value)) => {
                    self.state = State::Object {
                        entries,
                        pending: Some(value),
                    };
                    Some(Token::Key(Datum::String(key.as_str())))
                }
                None => Some(Token::EndObject),
            },
            State::Array(mut items) => match items.next() {
                Some(item) => {
                    let token = Token::Element(item.into());
                    self.state = State::Array(items);
                    Some(token)
                }
                None => Some(Token::EndArray),
            },
            State::Done => None,
        }
    }
}

impl<'doc> From<&'doc Value> for Datum<'doc> {
    fn from(value: &'doc Value) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Bool(flag) => Datum::Bool(*flag),
            Value::Number(number) => Datum::Numeric(numeric(number)),
            Value::String(text) => Datum::String(text.as_str()),
            Value::Array(_) => Datum::Array,
            Value::Object(_) => Datum::Object,
        }
    }
}

fn numeric(number: &Number) -> Numeric {
    if let Some(value) = number.as_i64() {
        Numeric::Int(value)
    } else if let Some(value) = number.as_u64() {
        Numeric::UInt(value)
    } else {
        number
            .as_f64()
            .map_or(Numeric::Float(f64::NAN), Numeric::Float)
    }
}

impl OptionDocument for Value {
    type Tokens<'doc> = JsonTokens<'doc>;

    fn tokens(&self) -> JsonTokens<'_> {
        JsonWalk::new(self).peekable()
    }
}
