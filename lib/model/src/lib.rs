#![doc(test(attr(deny(warnings))))]

//! The RDF term model of [RDF Kernel](https://docs.rs/rdf-kernel/): terms, triples, literal
//! coercion and the [`TermFactory`] abstraction.

mod coercion;
mod error;
mod factory;
mod interop;
mod rdf;
pub mod vocab;
mod xsd;

pub use coercion::*;
pub use error::*;
pub use factory::TermFactory;
pub use rdf::*;
pub use xsd::*;
