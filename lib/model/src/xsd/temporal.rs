use super::{sealed, XsdValue};
use crate::coercion::classify_temporal;
use crate::vocab::xsd;
use crate::{Iri, RdfError, RdfResult, Temporal};
use oxsdatatypes::{Date, DateTime};
use std::fmt::{Display, Formatter};

/// An `xsd:dateTime` without a timezone offset.
///
/// Only values with whole seconds and a four digit year are accepted, as other canonical forms
/// are not decoded by [`LexicalValue::as_temporal`](crate::LexicalValue::as_temporal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalDateTime(DateTime);

/// An `xsd:dateTime` with a timezone offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetDateTime(DateTime);

/// An `xsd:date` without a timezone and with a four digit year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalDate(Date);

macro_rules! impl_temporal_wrapper {
    ($name:ident, $inner:ty, $variant:ident, $datatype:expr) => {
        impl $name {
            /// The wrapped value.
            pub fn value(self) -> $inner {
                self.0
            }
        }

        impl TryFrom<$inner> for $name {
            type Error = RdfError;

            fn try_from(value: $inner) -> RdfResult<Self> {
                let lexical_form = value.to_string();
                match classify_temporal(&lexical_form) {
                    Ok(Temporal::$variant(decoded)) if decoded == value => Ok(Self(value)),
                    _ => Err(RdfError::invalid_argument(format!(
                        "{lexical_form} is not a valid {}",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<$name> for Temporal {
            fn from(value: $name) -> Self {
                Temporal::$variant(value.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl sealed::Sealed for $name {}

        impl XsdValue for $name {
            fn datatype(&self) -> Iri {
                $datatype
            }

            fn lexical_form(&self) -> String {
                self.0.to_string()
            }
        }
    };
}

impl_temporal_wrapper!(LocalDateTime, DateTime, LocalDateTime, xsd::DATE_TIME);
impl_temporal_wrapper!(OffsetDateTime, DateTime, OffsetDateTime, xsd::DATE_TIME);
impl_temporal_wrapper!(LocalDate, Date, Date, xsd::DATE);

/// Wraps a date-time into [`LocalDateTime`] or [`OffsetDateTime`] depending on its offset.
pub(crate) fn native_date_time(value: DateTime) -> RdfResult<Box<dyn XsdValue>> {
    Ok(if value.timezone_offset().is_some() {
        Box::new(OffsetDateTime::try_from(value)?)
    } else {
        Box::new(LocalDateTime::try_from(value)?)
    })
}
