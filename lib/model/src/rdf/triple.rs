use crate::{Iri, RdfError, RdfResult, Subject, Term};
use std::fmt::{Display, Formatter};

/// An RDF [triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple).
///
/// The types of the fields make an invalid triple unrepresentable. Use [`Triple::try_from_terms`]
/// to build a triple from terms of unknown kind.
///
/// The default string formatter returns an N-Triples line:
/// ```
/// use rdf_kernel_model::{Iri, Triple};
///
/// let triple = Triple::new(
///     Iri::new("http://example.com/s")?,
///     Iri::new("http://example.com/p")?,
///     Iri::new("http://example.com/o")?,
/// );
/// assert_eq!(
///     "<http://example.com/s> <http://example.com/p> <http://example.com/o> .",
///     triple.to_string()
/// );
/// # Result::<_, rdf_kernel_model::RdfError>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: Subject,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(
        subject: impl Into<Subject>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Builds a triple from arbitrary terms.
    ///
    /// Fails with [`RdfError::InvalidArgument`] if `subject` is a literal or `predicate` is not
    /// an IRI.
    pub fn try_from_terms(subject: Term, predicate: Term, object: Term) -> RdfResult<Self> {
        let subject = Subject::try_from(subject)?;
        let predicate = match predicate {
            Term::Iri(iri) => iri,
            other => {
                return Err(RdfError::invalid_argument(format!(
                    "The predicate {other} is not an IRI"
                )))
            }
        };
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlankNode, Literal, ScopeId};

    #[test]
    fn blank_node_predicate_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let node = BlankNode::labeled(ScopeId::from_random_bits(5), "p");
        let result = Triple::try_from_terms(
            Iri::new("http://example.com/s")?.into(),
            node.into(),
            Literal::new_simple("o").into(),
        );
        assert!(matches!(result, Err(RdfError::InvalidArgument(_))));
        Ok(())
    }

    #[test]
    fn literal_subject_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let result = Triple::try_from_terms(
            Literal::new_simple("s").into(),
            Iri::new("http://example.com/p")?.into(),
            Literal::new_simple("o").into(),
        );
        assert!(matches!(result, Err(RdfError::InvalidArgument(_))));
        Ok(())
    }

    #[test]
    fn displays_as_ntriples_line() -> Result<(), Box<dyn std::error::Error>> {
        let triple = Triple::new(
            Iri::new("http://example.com/s")?,
            Iri::new("http://example.com/p")?,
            Literal::new_language_tagged("Example", "en")?,
        );
        insta::assert_snapshot!(triple, @r#"<http://example.com/s> <http://example.com/p> "Example"@en ."#);
        Ok(())
    }
}
