use crate::{Iri, Subject, Term, Triple};

/// A triple pattern where each position is either bound to a term or a wildcard (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: Option<Subject>,
    pub predicate: Option<Iri>,
    pub object: Option<Term>,
}

impl TriplePattern {
    pub fn new(subject: Option<Subject>, predicate: Option<Iri>, object: Option<Term>) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// The pattern matching every triple.
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns whether no position is bound.
    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    /// A triple matches iff every bound position is equal to the triple's term in that position.
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == triple.subject)
            && self.predicate.as_ref().map_or(true, |p| *p == triple.predicate)
            && self.object.as_ref().map_or(true, |o| *o == triple.object)
    }
}

impl From<Triple> for TriplePattern {
    fn from(triple: Triple) -> Self {
        Self {
            subject: Some(triple.subject),
            predicate: Some(triple.predicate),
            object: Some(triple.object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Literal;

    fn iri(value: &str) -> Iri {
        Iri::new_unchecked(format!("http://example.com/{value}"))
    }

    #[test]
    fn wildcard_matches_everything() {
        let triple = Triple::new(iri("s"), iri("p"), Literal::new_simple("o"));
        assert!(TriplePattern::any().is_wildcard());
        assert!(TriplePattern::any().matches(&triple));
    }

    #[test]
    fn bound_positions_must_be_equal() {
        let triple = Triple::new(iri("s"), iri("p"), Literal::new_simple("o"));
        let pattern = TriplePattern::new(Some(iri("s").into()), Some(iri("p")), None);
        assert!(pattern.matches(&triple));

        let pattern = TriplePattern::new(None, Some(iri("q")), None);
        assert!(!pattern.matches(&triple));

        let pattern = TriplePattern::new(None, None, Some(Literal::new_simple("x").into()));
        assert!(!pattern.matches(&triple));

        assert!(TriplePattern::from(triple.clone()).matches(&triple));
    }
}
