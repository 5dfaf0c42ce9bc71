//! An in-memory triple storage with multi-version concurrency control.

mod store;
mod version;

pub use store::{
    MemoryStorageBulkLoader, MemoryStorageReader, MemoryStorageWriter, MemoryTripleStorage,
    TripleIterator,
};
