//! Interpretation of literal lexical forms as native values.
//!
//! Coercion never looks at the literal it came from beyond its lexical form, datatype and
//! language tag, and it never changes the literal. The typed accessors ignore the datatype
//! entirely: `as_long` attempts to parse any lexical form as a 64-bit integer.

mod dynamic;
mod temporal;

pub use dynamic::{CoercionOptions, DynamicValue, ObjectValue, TemporalDecoding};
pub use temporal::Temporal;
pub(crate) use temporal::classify as classify_temporal;

use crate::{CoercionError, CoercionResult, Literal};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

/// A borrowed view of the parts of a literal that coercion operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalValue<'a> {
    lexical_form: &'a str,
    datatype: &'a str,
    language: Option<&'a str>,
}

impl<'a> LexicalValue<'a> {
    pub fn new(lexical_form: &'a str, datatype: &'a str, language: Option<&'a str>) -> Self {
        Self {
            lexical_form,
            datatype,
            language,
        }
    }

    pub fn lexical_form(&self) -> &'a str {
        self.lexical_form
    }

    pub fn datatype(&self) -> &'a str {
        self.datatype
    }

    pub fn language(&self) -> Option<&'a str> {
        self.language
    }

    pub fn as_byte(&self) -> CoercionResult<i8> {
        self.parse("xsd:byte")
    }

    pub fn as_short(&self) -> CoercionResult<i16> {
        self.parse("xsd:short")
    }

    pub fn as_int(&self) -> CoercionResult<i32> {
        self.parse("xsd:int")
    }

    pub fn as_long(&self) -> CoercionResult<i64> {
        self.parse("xsd:long")
    }

    /// Accepts decimal and scientific notation as well as `INF`, `-INF` and `NaN`.
    pub fn as_float(&self) -> CoercionResult<f32> {
        self.parse("xsd:float")
    }

    /// Accepts decimal and scientific notation as well as `INF`, `-INF` and `NaN`.
    pub fn as_double(&self) -> CoercionResult<f64> {
        self.parse("xsd:double")
    }

    pub fn as_big_integer(&self) -> CoercionResult<BigInt> {
        self.parse("xsd:integer")
    }

    pub fn as_big_decimal(&self) -> CoercionResult<BigDecimal> {
        self.parse("xsd:decimal")
    }

    /// Parses the `xsd:boolean` lexical space (`true`, `false`, `1`, `0`).
    ///
    /// `true` and `false` are matched case-insensitively.
    pub fn as_boolean(&self) -> CoercionResult<bool> {
        match self.lexical_form {
            "1" => Ok(true),
            "0" => Ok(false),
            lf if lf.eq_ignore_ascii_case("true") => Ok(true),
            lf if lf.eq_ignore_ascii_case("false") => Ok(false),
            lf => Err(CoercionError::parse(lf, "xsd:boolean")),
        }
    }

    /// Returns the lexical form unchanged.
    pub fn as_raw_string(&self) -> &'a str {
        self.lexical_form
    }

    fn parse<T: FromStr>(&self, target: &'static str) -> CoercionResult<T> {
        self.lexical_form
            .parse()
            .map_err(|_| CoercionError::parse(self.lexical_form, target))
    }
}

impl<'a> From<&'a Literal> for LexicalValue<'a> {
    fn from(literal: &'a Literal) -> Self {
        Self::new(
            literal.lexical_form(),
            literal.datatype().as_str(),
            literal.language(),
        )
    }
}

impl Literal {
    /// Returns a view for interpreting this literal as a native value.
    ///
    /// ```
    /// use rdf_kernel_model::Literal;
    ///
    /// assert_eq!(Literal::from(75_i64).coerce().as_long(), Ok(75));
    /// assert!(Literal::new_simple("seventy-five").coerce().as_long().is_err());
    /// ```
    pub fn coerce(&self) -> LexicalValue<'_> {
        LexicalValue::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;
    use crate::XsdValue;

    #[test]
    fn fixed_width_integers_respect_their_range() {
        let literal = Literal::from(4000_i16);
        assert_eq!(literal.coerce().as_short(), Ok(4000));
        assert_eq!(literal.coerce().as_long(), Ok(4000));
        assert!(matches!(
            literal.coerce().as_byte(),
            Err(CoercionError::Parse { target: "xsd:byte", .. })
        ));
    }

    #[test]
    fn accessors_ignore_the_datatype() {
        let literal = Literal::new_simple("42");
        assert_eq!(literal.coerce().as_int(), Ok(42));
        assert_eq!(literal.coerce().as_big_integer(), Ok(BigInt::from(42)));
        assert_eq!(literal.coerce().as_double(), Ok(42.0));
    }

    #[test]
    fn parse_error_carries_the_lexical_form() {
        let error = Literal::new_simple("abc").coerce().as_int().unwrap_err();
        insta::assert_snapshot!(error, @"Cannot parse 'abc' as xsd:int");
    }

    #[test]
    fn floating_point_round_trips() {
        assert_eq!(Literal::from(1.618_f32).coerce().as_float(), Ok(1.618));
        assert_eq!(Literal::from(4.669201_f64).coerce().as_double(), Ok(4.669201));
        assert_eq!(
            Literal::from(f64::NEG_INFINITY).coerce().as_double(),
            Ok(f64::NEG_INFINITY)
        );
        assert!(Literal::from(f64::NAN).coerce().as_double().unwrap().is_nan());
    }

    #[test]
    fn double_keeps_full_precision() {
        let value = 0.1_f64 + 0.2_f64;
        assert_eq!(value.to_literal().coerce().as_double(), Ok(value));
    }

    #[test]
    fn big_decimal_round_trips() {
        let value = BigDecimal::from_str("12345678901234567890.0987654321").unwrap();
        let literal = Literal::from(value.clone());
        assert_eq!(literal.datatype(), &xsd::DECIMAL);
        assert_eq!(literal.coerce().as_big_decimal(), Ok(value));
    }

    #[test]
    fn booleans_follow_the_xsd_lexical_space() {
        for (lexical_form, expected) in
            [("true", true), ("1", true), ("TRUE", true), ("false", false), ("0", false)]
        {
            assert_eq!(
                Literal::new_typed(lexical_form, xsd::BOOLEAN)
                    .unwrap()
                    .coerce()
                    .as_boolean(),
                Ok(expected)
            );
        }
        assert!(Literal::new_simple("yes").coerce().as_boolean().is_err());
    }
}
