use std::fmt::Display;
use thiserror::Error;

/// The result of constructing or validating terms.
pub type RdfResult<T> = Result<T, RdfError>;

/// The result of interpreting the lexical form of a literal.
pub type CoercionResult<T> = Result<T, CoercionError>;

/// An error raised by a [`TermFactory`](crate::TermFactory) or by term validation.
///
/// None of these errors is transient. Retrying the same call with the same arguments yields the
/// same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RdfError {
    /// The factory does not implement the named operation.
    ///
    /// Callers are expected to detect this and fall back to another strategy.
    #[error("{0} is not supported by this context")]
    CapabilityUnsupported(&'static str),
    /// The caller provided structurally invalid input, e.g., a malformed IRI.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RdfError {
    /// Creates an [RdfError::CapabilityUnsupported] for `operation`.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::CapabilityUnsupported(operation)
    }

    /// Creates an [RdfError::InvalidArgument] from a printable message.
    pub fn invalid_argument(msg: impl Display) -> Self {
        Self::InvalidArgument(msg.to_string())
    }
}

/// An error raised when the lexical form of a literal cannot be interpreted as the requested
/// value.
///
/// The literal itself is never affected by a failed coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The lexical form does not follow the grammar of `target`.
    #[error("Cannot parse '{lexical_form}' as {target}")]
    Parse {
        /// The offending lexical form.
        lexical_form: String,
        /// A short name of the requested type.
        target: &'static str,
    },
    /// The lexical form is too short to decide which temporal parser applies.
    #[error("Cannot infer a temporal shape from '{lexical_form}'")]
    AmbiguousShape {
        /// The offending lexical form.
        lexical_form: String,
    },
}

impl CoercionError {
    pub(crate) fn parse(lexical_form: &str, target: &'static str) -> Self {
        Self::Parse {
            lexical_form: lexical_form.to_owned(),
            target,
        }
    }

    pub(crate) fn ambiguous_shape(lexical_form: &str) -> Self {
        Self::AmbiguousShape {
            lexical_form: lexical_form.to_owned(),
        }
    }
}
