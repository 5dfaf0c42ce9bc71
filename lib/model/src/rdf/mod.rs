mod blank_node;
mod iri;
mod literal;
mod pattern;
mod term;
mod triple;

pub use blank_node::{BlankNode, ScopeId};
pub use iri::Iri;
pub use literal::Literal;
pub(crate) use literal::write_literal;
pub use pattern::TriplePattern;
pub use term::{Subject, Term};
pub use triple::Triple;
