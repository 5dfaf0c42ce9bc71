//! Conversions into the [`oxrdf`] data model.
//!
//! Use [`TermFactory::import_term`](crate::TermFactory::import_term) for the opposite direction,
//! as blank nodes need a scope.

use crate::{BlankNode, Iri, Literal, Subject, Term, Triple};

impl From<&Iri> for oxrdf::NamedNode {
    fn from(iri: &Iri) -> Self {
        oxrdf::NamedNode::new_unchecked(iri.as_str())
    }
}

impl From<&BlankNode> for oxrdf::BlankNode {
    fn from(node: &BlankNode) -> Self {
        oxrdf::BlankNode::new_unchecked(node.label())
    }
}

impl From<&Literal> for oxrdf::Literal {
    fn from(literal: &Literal) -> Self {
        match literal.language() {
            Some(language) => oxrdf::Literal::new_language_tagged_literal_unchecked(
                literal.lexical_form(),
                language,
            ),
            None if literal.is_plain() => oxrdf::Literal::new_simple_literal(literal.lexical_form()),
            None => oxrdf::Literal::new_typed_literal(
                literal.lexical_form(),
                oxrdf::NamedNode::from(literal.datatype()),
            ),
        }
    }
}

impl From<&Subject> for oxrdf::Subject {
    fn from(subject: &Subject) -> Self {
        match subject {
            Subject::Iri(iri) => oxrdf::Subject::NamedNode(iri.into()),
            Subject::BlankNode(node) => oxrdf::Subject::BlankNode(node.into()),
        }
    }
}

impl From<&Term> for oxrdf::Term {
    fn from(term: &Term) -> Self {
        match term {
            Term::Iri(iri) => oxrdf::Term::NamedNode(iri.into()),
            Term::BlankNode(node) => oxrdf::Term::BlankNode(node.into()),
            Term::Literal(literal) => oxrdf::Term::Literal(literal.into()),
        }
    }
}

impl From<&Triple> for oxrdf::Triple {
    fn from(triple: &Triple) -> Self {
        oxrdf::Triple::new(
            oxrdf::Subject::from(&triple.subject),
            oxrdf::NamedNode::from(&triple.predicate),
            oxrdf::Term::from(&triple.object),
        )
    }
}
