#![doc(test(attr(deny(warnings))))]

//! Contains the in-memory triple storage and the [`Graph`] store of
//! [RDF Kernel](https://docs.rs/rdf-kernel/).

mod error;
mod graph;
pub mod memory;

pub use error::{CorruptionError, StorageError};
pub use graph::Graph;
