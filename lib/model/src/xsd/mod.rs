//! Mapping of native values to XSD literals.

use crate::vocab::xsd;
use crate::{Iri, Literal};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use oxsdatatypes::Time;

mod temporal;

pub(crate) use temporal::native_date_time;
pub use temporal::{LocalDate, LocalDateTime, OffsetDateTime};

mod sealed {
    pub trait Sealed {}
}

/// A native value with a canonical XSD lexical form.
///
/// The lexical form parses back to the same value through the matching
/// [`LexicalValue`](crate::LexicalValue) accessor. This trait is sealed.
pub trait XsdValue: sealed::Sealed {
    /// The XSD datatype of the literal.
    fn datatype(&self) -> Iri;

    /// The canonical lexical form of the value.
    fn lexical_form(&self) -> String;

    /// Builds the typed literal.
    fn to_literal(&self) -> Literal {
        Literal::new_typed_unchecked(self.lexical_form(), self.datatype())
    }
}

macro_rules! impl_xsd_integer {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl XsdValue for $ty {
                fn datatype(&self) -> Iri {
                    xsd::INTEGER
                }

                fn lexical_form(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_xsd_integer!(i8, i16, i32, i64, u8, u16, u32, u64, BigInt);

impl sealed::Sealed for BigDecimal {}

impl XsdValue for BigDecimal {
    fn datatype(&self) -> Iri {
        xsd::DECIMAL
    }

    /// The plain decimal notation. `xsd:decimal` has no exponent.
    fn lexical_form(&self) -> String {
        self.normalized().to_plain_string()
    }
}

impl sealed::Sealed for f32 {}

impl XsdValue for f32 {
    fn datatype(&self) -> Iri {
        xsd::FLOAT
    }

    fn lexical_form(&self) -> String {
        format_float(f64::from(*self), self.to_string())
    }
}

impl sealed::Sealed for f64 {}

impl XsdValue for f64 {
    fn datatype(&self) -> Iri {
        xsd::DOUBLE
    }

    fn lexical_form(&self) -> String {
        format_float(*self, self.to_string())
    }
}

/// XSD spells the special values differently from Rust.
fn format_float(value: f64, display: String) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "INF".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_owned()
    } else {
        display
    }
}

impl sealed::Sealed for bool {}

impl XsdValue for bool {
    fn datatype(&self) -> Iri {
        xsd::BOOLEAN
    }

    fn lexical_form(&self) -> String {
        self.to_string()
    }
}

impl sealed::Sealed for Time {}

impl XsdValue for Time {
    fn datatype(&self) -> Iri {
        xsd::TIME
    }

    fn lexical_form(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_literal_from_xsd_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    value.to_literal()
                }
            }
        )*
    };
}

impl_literal_from_xsd_value!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    BigInt,
    BigDecimal,
    f32,
    f64,
    bool,
    LocalDateTime,
    OffsetDateTime,
    LocalDate,
    Time
);

/// Checks if the datatype is an integer datatype without a width limit.
pub fn is_unbounded_integer_datatype(datatype: &str) -> bool {
    [
        xsd::INTEGER,
        xsd::UNSIGNED_LONG,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
    ]
    .iter()
    .any(|iri| iri.as_str() == datatype)
}

/// Checks if the datatype is an integer datatype that fits into an `i64`.
pub fn is_fixed_width_integer_datatype(datatype: &str) -> bool {
    [
        xsd::BYTE,
        xsd::SHORT,
        xsd::INT,
        xsd::LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .iter()
    .any(|iri| iri.as_str() == datatype)
}
