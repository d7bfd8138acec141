use std::fmt;

use crate::token::{Datum, DatumKind, Numeric};

/// Numeric code of one configurable behaviour of the transfer client.
///
/// The valid codes, and the argument type each expects,
/// belong to the client; see [`crate::options`] for the common ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub i32);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for OptionId {
    fn from(code: i32) -> Self {
        OptionId(code)
    }
}

/// The accepted shapes of a document key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyToken<'doc> {
    Numeric(Numeric),
    /// Decimal string form of the option code, not a symbolic name.
    Text(&'doc str),
}

impl<'doc> TryFrom<Datum<'doc>> for KeyToken<'doc> {
    type Error = DatumKind;

    fn try_from(datum: Datum<'doc>) -> Result<Self, DatumKind> {
        match datum {
            Datum::Numeric(number) => Ok(KeyToken::Numeric(number)),
            Datum::String(text) => Ok(KeyToken::Text(text)),
            other => Err(other.kind()),
        }
    }
}

impl<'doc> KeyToken<'doc> {
    /// Text that does not start with a number resolves to option 0;
    /// the client is left to reject it.
    pub fn resolve(self) -> OptionId {
        match self {
            KeyToken::Numeric(number) => OptionId(number.wrapping_i32()),
            KeyToken::Text(text) => OptionId(parse_decimal_prefix(text) as i32),
        }
    }
}

/// Parse the leading base-10 integer of `text` the way C `strtol` does.
///
/// Leading whitespace and one sign are skipped, digits are read until the
/// first non-digit and the rest is ignored. Text without digits yields 0,
/// out-of-range values saturate at the bounds of `i64`.
pub fn parse_decimal_prefix(text: &str) -> i64 {
    let mut rest = text
        .bytes()
        .skip_while(|byte| matches!(*byte, b' ' | b'\t'..=b'\r'))
        .peekable();

    let negative = match rest.peek() {
        Some(b'-') => {
            rest.next();
            true
        }
        Some(b'+') => {
            rest.next();
            false
        }
        _ => false,
    };

    rest.map_while(|byte| (byte as char).to_digit(10))
        .fold(0i64, |value, digit| {
            let value = value.saturating_mul(10);
            if negative {
                value.saturating_sub(i64::from(digit))
            } else {
                value.saturating_add(i64::from(digit))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case("10002", 10002)]
    #[case("  \t\n13", 13)]
    #[case("\u{b}7", 7)]
    #[case("+52", 52)]
    #[case("-3", -3)]
    #[case("64abc", 64)]
    #[case("12 34", 12)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("-", 0)]
    #[case("--1", 0)]
    #[case("0x10", 0)]
    #[case("99999999999999999999", i64::MAX)]
    #[case("-99999999999999999999", i64::MIN)]
    fn decimal_prefix_follows_strtol(
        #[case] text: &str,
        #[case] expected: i64,
    ) {
        assert_eq!(parse_decimal_prefix(text), expected);
    }

    #[rstest]
    #[case(KeyToken::Text("42"), 42)]
    #[case(KeyToken::Text("abc"), 0)]
    #[case(KeyToken::Text("4294967338"), 42)]
    #[case(KeyToken::Numeric(Numeric::Int(10002)), 10002)]
    #[case(KeyToken::Numeric(Numeric::Int(-1)), -1)]
    #[case(KeyToken::Numeric(Numeric::UInt(4_294_967_297)), 1)]
    #[case(KeyToken::Numeric(Numeric::Float(13.7)), 13)]
    fn keys_resolve_to_option_codes(
        #[case] key: KeyToken,
        #[case] expected: i32,
    ) {
        assert_eq!(key.resolve(), OptionId(expected));
    }

    #[rstest]
    #[case(Datum::Null, DatumKind::Null)]
    #[case(Datum::Bool(true), DatumKind::Boolean)]
    #[case(Datum::Array, DatumKind::Array)]
    #[case(Datum::Object, DatumKind::Object)]
    fn only_numbers_and_text_are_keys(
        #[case] datum: Datum,
        #[case] found: DatumKind,
    ) {
        assert_eq!(KeyToken::try_from(datum), Err(found));
    }

    #[test]
    fn option_ids_display_as_codes() {
        assert_eq!(OptionId(10002).to_string(), "10002");
        assert_eq!(OptionId::from(-7).to_string(), "-7");
    }
}
