use crate::{CoercionError, CoercionResult, LexicalValue};
use oxsdatatypes::{Date, DateTime, Time};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A date, time or date-time decoded by [`LexicalValue::as_temporal`].
///
/// The variants record whether a timezone offset was present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    OffsetTime(Time),
    LocalTime(Time),
    OffsetDateTime(DateTime),
    LocalDateTime(DateTime),
    Date(Date),
}

impl Display for Temporal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OffsetTime(time) | Self::LocalTime(time) => time.fmt(f),
            Self::OffsetDateTime(date_time) | Self::LocalDateTime(date_time) => date_time.fmt(f),
            Self::Date(date) => date.fmt(f),
        }
    }
}

impl LexicalValue<'_> {
    /// Decodes a time, date-time or date, choosing the parser from the shape of the lexical form.
    ///
    /// The datatype is ignored. The shape is classified as follows:
    /// - a `:` at index 2 is a time, with an offset iff the form contains `+`, `-` or `Z`;
    /// - otherwise, more than 19 characters is a date-time with an offset;
    /// - otherwise, more than 10 characters is a date-time without an offset;
    /// - otherwise it is a date.
    ///
    /// The thresholds fit the canonical forms written for native values, e.g.
    /// `2011-03-24T15:16:17` (19 characters). [`LocalDateTime`](crate::LocalDateTime),
    /// [`OffsetDateTime`](crate::OffsetDateTime) and [`LocalDate`](crate::LocalDate) only accept
    /// values whose canonical form is classified correctly. Other forms may be misclassified: a
    /// date-time with fractional seconds and no offset is longer than 19 characters and fails to
    /// parse, and a date with a timezone is longer than 10 characters. Forms of fewer than 3 characters
    /// fail with [`CoercionError::AmbiguousShape`].
    pub fn as_temporal(&self) -> CoercionResult<Temporal> {
        classify(self.lexical_form())
    }
}

/// The shape heuristic of [`LexicalValue::as_temporal`] on a bare lexical form.
pub(crate) fn classify(lexical_form: &str) -> CoercionResult<Temporal> {
    let mut chars = lexical_form.chars();
    let third = chars.nth(2);
    if third.is_none() {
        return Err(CoercionError::ambiguous_shape(lexical_form));
    }

    if third == Some(':') {
        let time: Time = parse(lexical_form, "xsd:time")?;
        return if lexical_form.contains(['+', '-', 'Z']) {
            match time.timezone_offset() {
                Some(_) => Ok(Temporal::OffsetTime(time)),
                None => Err(CoercionError::parse(lexical_form, "xsd:time")),
            }
        } else {
            Ok(Temporal::LocalTime(time))
        };
    }

    let len = lexical_form.chars().count();
    if len > 19 {
        let date_time: DateTime = parse(lexical_form, "xsd:dateTime")?;
        match date_time.timezone_offset() {
            Some(_) => Ok(Temporal::OffsetDateTime(date_time)),
            None => Err(CoercionError::parse(lexical_form, "xsd:dateTime")),
        }
    } else if len > 10 {
        let date_time: DateTime = parse(lexical_form, "xsd:dateTime")?;
        match date_time.timezone_offset() {
            Some(_) => Err(CoercionError::parse(lexical_form, "xsd:dateTime")),
            None => Ok(Temporal::LocalDateTime(date_time)),
        }
    } else {
        Ok(Temporal::Date(parse(lexical_form, "xsd:date")?))
    }
}

fn parse<T: FromStr>(lexical_form: &str, target: &'static str) -> CoercionResult<T> {
    T::from_str(lexical_form).map_err(|_| CoercionError::parse(lexical_form, target))
}
