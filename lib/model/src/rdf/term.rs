use crate::{BlankNode, Iri, Literal, RdfError};
use std::fmt::{Display, Formatter};

/// An RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term).
///
/// The default string formatter returns the canonical N-Triples encoding of the wrapped term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Iri(Iri),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Term {
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Returns this term as a subject, if it can be one.
    pub fn as_subject(&self) -> Option<Subject> {
        match self {
            Self::Iri(iri) => Some(Subject::Iri(iri.clone())),
            Self::BlankNode(node) => Some(Subject::BlankNode(*node)),
            Self::Literal(_) => None,
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iri(iri) => iri.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Subject> for Term {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Iri(iri) => Self::Iri(iri),
            Subject::BlankNode(node) => Self::BlankNode(node),
        }
    }
}

/// The subset of [`Term`] that may appear in the subject position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    Iri(Iri),
    BlankNode(BlankNode),
}

impl Subject {
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iri(iri) => iri.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
        }
    }
}

impl From<Iri> for Subject {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl TryFrom<Term> for Subject {
    type Error = RdfError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::Iri(iri) => Ok(Self::Iri(iri)),
            Term::BlankNode(node) => Ok(Self::BlankNode(node)),
            Term::Literal(literal) => Err(RdfError::invalid_argument(format!(
                "The literal {literal} cannot be a subject"
            ))),
        }
    }
}

impl PartialEq<Term> for Subject {
    fn eq(&self, other: &Term) -> bool {
        match (self, other) {
            (Self::Iri(a), Term::Iri(b)) => a == b,
            (Self::BlankNode(a), Term::BlankNode(b)) => a == b,
            _ => false,
        }
    }
}
