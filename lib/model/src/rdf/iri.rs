use crate::{vocab, RdfError, RdfResult, Term};
use oxiri::IriRef;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// Two IRIs are equal iff their IRI strings are equal, character by character. Cloning is cheap
/// as the string is shared.
///
/// The default string formatter returns the canonical N-Triples encoding:
/// ```
/// use rdf_kernel_model::Iri;
///
/// assert_eq!(
///     "<http://example.com/foo>",
///     Iri::new("http://example.com/foo")?.to_string()
/// );
/// # Result::<_, rdf_kernel_model::RdfError>::Ok(())
/// ```
#[derive(Clone)]
pub struct Iri(IriRepr);

#[derive(Clone)]
enum IriRepr {
    Static(&'static str),
    Shared(Arc<str>),
}

impl Iri {
    /// Creates an IRI from a static string without validation.
    ///
    /// Used for vocabulary constants.
    pub const fn from_static(iri: &'static str) -> Self {
        Self(IriRepr::Static(iri))
    }

    /// Validates `iri` and wraps it.
    ///
    /// Relative IRI references are accepted. Only strings that cannot be an IRI reference at all
    /// (e.g., strings containing spaces or angle brackets) are rejected. Well-known IRIs are
    /// returned as shared instances.
    pub fn new(iri: impl Into<String>) -> RdfResult<Self> {
        let iri = iri.into();
        if let Err(error) = IriRef::parse(iri.as_str()) {
            return Err(RdfError::invalid_argument(format!(
                "'{iri}' is not a valid IRI: {error}"
            )));
        }
        Ok(Self::new_unchecked(iri))
    }

    /// Wraps `iri` without validating it.
    ///
    /// It is the caller's responsibility to ensure that `iri` is a valid IRI reference.
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        vocab::lookup(&iri).unwrap_or_else(|| Self(IriRepr::Shared(Arc::from(iri))))
    }

    /// Returns the IRI string, without angle brackets.
    pub fn as_str(&self) -> &str {
        match &self.0 {
            IriRepr::Static(iri) => iri,
            IriRepr::Shared(iri) => iri,
        }
    }

    /// Returns whether this instance is one of the shared vocabulary IRIs.
    pub fn is_well_known(&self) -> bool {
        matches!(self.0, IriRepr::Static(_))
    }

    pub(crate) fn static_str(&self) -> Option<&'static str> {
        match self.0 {
            IriRepr::Static(iri) => Some(iri),
            IriRepr::Shared(_) => None,
        }
    }
}

impl PartialEq for Iri {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Iri {}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl Hash for Iri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Iri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Debug for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Iri").field(&self.as_str()).finish()
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl TryFrom<Term> for Iri {
    type Error = RdfError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::Iri(iri) => Ok(iri),
            other => Err(RdfError::invalid_argument(format!(
                "{other} is not an IRI"
            ))),
        }
    }
}
