use std::fmt;
use std::os::raw::c_long;

use crate::token::{Datum, DatumKind, Numeric};

/// The accepted shapes of a document value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueToken<'doc> {
    Bool(bool),
    Text(&'doc str),
    Numeric(Numeric),
}

impl<'doc> TryFrom<Datum<'doc>> for ValueToken<'doc> {
    type Error = DatumKind;

    fn try_from(datum: Datum<'doc>) -> Result<Self, DatumKind> {
        match datum {
            Datum::Bool(flag) => Ok(ValueToken::Bool(flag)),
            Datum::String(text) => Ok(ValueToken::Text(text)),
            Datum::Numeric(number) => Ok(ValueToken::Numeric(number)),
            other => Err(other.kind()),
        }
    }
}

impl<'doc> ValueToken<'doc> {
    /// Convert into the argument handed to the client's setter.
    ///
    /// Text stays borrowed from the document. Numbers are narrowed to
    /// 32 bits (two's-complement wraparound) and then widened to `long`.
    pub fn coerce(self) -> OptionArg<'doc> {
        match self {
            ValueToken::Bool(flag) => OptionArg::Bool(flag),
            ValueToken::Text(text) => OptionArg::Str(text),
            ValueToken::Numeric(number) => {
                OptionArg::Long(c_long::from(number.wrapping_i32()))
            }
        }
    }
}

/// Argument of one setter call on a transfer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionArg<'a> {
    Bool(bool),
    Str(&'a str),
    Long(c_long),
}

impl<'a> OptionArg<'a> {
    pub fn kind(&self) -> ArgKind {
        match self {
            OptionArg::Bool(_) => ArgKind::Bool,
            OptionArg::Str(_) => ArgKind::Str,
            OptionArg::Long(_) => ArgKind::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Bool,
    Str,
    Long,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Bool => "boolean",
            ArgKind::Str => "string",
            ArgKind::Long => "long",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    #[rstest]
    #[case(ValueToken::Bool(true), OptionArg::Bool(true))]
    #[case(ValueToken::Bool(false), OptionArg::Bool(false))]
    #[case(ValueToken::Text("http://a.test"), OptionArg::Str("http://a.test"))]
    #[case(ValueToken::Numeric(Numeric::Int(10)), OptionArg::Long(10))]
    #[case(ValueToken::Numeric(Numeric::Int(-30)), OptionArg::Long(-30))]
    #[case(ValueToken::Numeric(Numeric::Int(1 << 31)), OptionArg::Long(i32::MIN.into()))]
    #[case(ValueToken::Numeric(Numeric::Int((1 << 32) + 10)), OptionArg::Long(10))]
    #[case(ValueToken::Numeric(Numeric::Float(1.9)), OptionArg::Long(1))]
    fn values_coerce_to_setter_arguments(
        #[case] value: ValueToken,
        #[case] expected: OptionArg,
    ) {
        assert_eq!(value.coerce(), expected);
    }

    #[test]
    fn text_is_not_copied() {
        let document = String::from("http://localhost/");
        let arg = ValueToken::Text(&document).coerce();

        match arg {
            OptionArg::Str(text) => {
                assert!(std::ptr::eq(text.as_ptr(), document.as_ptr()))
            }
            other => panic!("expected a string argument, got {:?}", other),
        }
    }

    #[rstest]
    #[case(Datum::Null, DatumKind::Null)]
    #[case(Datum::Array, DatumKind::Array)]
    #[case(Datum::Object, DatumKind::Object)]
    fn containers_and_null_are_not_values(
        #[case] datum: Datum,
        #[case] found: DatumKind,
    ) {
        assert_eq!(ValueToken::try_from(datum), Err(found));
    }

    #[quickcheck]
    fn numbers_wrap_like_twos_complement(number: i64) -> bool {
        let expected = c_long::from((number & 0xffff_ffff) as u32 as i32);
        ValueToken::Numeric(Numeric::Int(number)).coerce()
            == OptionArg::Long(expected)
    }
}
