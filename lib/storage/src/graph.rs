use crate::memory::{
    MemoryStorageBulkLoader, MemoryStorageReader, MemoryStorageWriter, MemoryTripleStorage,
    TripleIterator,
};
use crate::StorageError;
use rdf_kernel_model::{Iri, RdfResult, Subject, Term, TermFactory, Triple, TriplePattern};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A mutable set of triples bound to the [`TermFactory`] that created it.
///
/// All operations take `&self` and may be called from several threads at once. Writes are
/// serialized, each one being a transaction of its own. Reads and iterators work on snapshots and
/// are not blocked by running writes. The length and the triples of a version are published
/// together: a triple counted by [`Graph::len`] is seen by any later [`Graph::contains`].
///
/// Cloning a graph is cheap and the clones share their triples.
#[derive(Clone)]
pub struct Graph {
    context: Arc<dyn TermFactory>,
    storage: MemoryTripleStorage,
}

impl Graph {
    /// Creates an empty graph bound to `context`.
    pub fn new(context: Arc<dyn TermFactory>) -> Self {
        Self {
            context,
            storage: MemoryTripleStorage::new(),
        }
    }

    /// The factory this graph is bound to.
    pub fn context(&self) -> &Arc<dyn TermFactory> {
        &self.context
    }

    /// Adds a triple. Returns `false` if it was already present.
    pub fn add(
        &self,
        subject: impl Into<Subject>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> bool {
        self.insert(&Triple::new(subject, predicate, object))
    }

    /// Adds a triple. Returns `false` if it was already present.
    pub fn insert(&self, triple: &Triple) -> bool {
        self.storage.write(|writer| writer.insert(triple))
    }

    /// Adds all triples in one transaction and returns how many were not present before.
    pub fn extend(&self, triples: impl IntoIterator<Item = Triple>) -> usize {
        self.storage.write(|writer| {
            let mut inserted = 0;
            for triple in triples {
                if writer.insert(&triple) {
                    inserted += 1;
                }
            }
            inserted
        })
    }

    /// Adds triples that may come from other contexts.
    ///
    /// Blank nodes of other scopes are replaced through [`TermFactory::adopt_blank_node`] of this
    /// graph's context. Merging the same data twice is idempotent and never aliases blank nodes
    /// created by this graph's context. Returns how many triples were not present before.
    ///
    /// Nothing is added if a blank node cannot be created.
    pub fn merge(&self, triples: impl IntoIterator<Item = Triple>) -> RdfResult<usize> {
        let triples = triples
            .into_iter()
            .map(|triple| self.adopt(triple))
            .collect::<RdfResult<Vec<_>>>()?;
        Ok(self.extend(triples))
    }

    fn adopt(&self, triple: Triple) -> RdfResult<Triple> {
        let subject = match triple.subject {
            Subject::BlankNode(node) => {
                Subject::BlankNode(self.context.adopt_blank_node(&node)?)
            }
            iri @ Subject::Iri(_) => iri,
        };
        let object = match triple.object {
            Term::BlankNode(node) => Term::BlankNode(self.context.adopt_blank_node(&node)?),
            other => other,
        };
        Ok(Triple {
            subject,
            predicate: triple.predicate,
            object,
        })
    }


    /// Removes a triple. Returns `false` if it was not present.
    pub fn remove(&self, triple: &Triple) -> bool {
        self.storage.write(|writer| writer.remove(triple))
    }

    /// Removes all triples matching the pattern and returns how many were removed.
    pub fn remove_matching(
        &self,
        subject: Option<&Subject>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> usize {
        let pattern = pattern(subject, predicate, object);
        self.storage.write(|writer| writer.remove_matching(&pattern))
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.storage.snapshot().contains(triple)
    }

    /// Returns whether at least one triple matches the pattern.
    pub fn contains_pattern(
        &self,
        subject: Option<&Subject>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> bool {
        self.triples_for_pattern(subject, predicate, object)
            .next()
            .is_some()
    }

    /// The number of triples.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Removes all triples. The context is unaffected.
    pub fn clear(&self) {
        self.storage.clear()
    }

    /// Returns a lazy iterator over all triples.
    pub fn triples(&self) -> TripleIterator {
        self.storage
            .snapshot()
            .triples_for_pattern(&TriplePattern::any())
    }

    /// Returns a lazy iterator over the triples matching the pattern, `None` being a wildcard.
    ///
    /// The iterator reads the snapshot taken by this call: triples present for the whole
    /// iteration are returned, triples removed before this call are not. Writes by other threads
    /// during the iteration are neither observed nor blocked. The order is unspecified.
    pub fn triples_for_pattern(
        &self,
        subject: Option<&Subject>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> TripleIterator {
        self.storage
            .snapshot()
            .triples_for_pattern(&pattern(subject, predicate, object))
    }

    /// Returns a read-only view of the current triples that is unaffected by later writes.
    pub fn snapshot(&self) -> MemoryStorageReader {
        self.storage.snapshot()
    }

    /// Runs `f` as one atomic write transaction that is rolled back if `f` fails.
    ///
    /// ```
    /// use rdf_kernel_model::{Iri, TermFactory, Triple};
    /// use rdf_kernel_storage::{Graph, StorageError};
    /// use std::sync::Arc;
    ///
    /// struct NoFactory;
    /// impl TermFactory for NoFactory {}
    ///
    /// let graph = Graph::new(Arc::new(NoFactory));
    /// let iri = Iri::new("http://example.com")?;
    /// let result = graph.transaction(|writer| {
    ///     writer.insert(&Triple::new(iri.clone(), iri.clone(), iri.clone()));
    ///     Err::<(), _>(StorageError::Other("abort".into()))
    /// });
    /// assert!(result.is_err());
    /// assert!(graph.is_empty());
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut MemoryStorageWriter<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        self.storage.transaction(f)
    }

    /// Returns a loader that inserts many triples under a single lock and publishes them at once.
    ///
    /// Concurrent writers wait until the load is done. Blank nodes are inserted as they are.
    pub fn bulk_loader(&self) -> MemoryStorageBulkLoader {
        self.storage.bulk_loader()
    }

    /// Checks that the internal index structures are consistent.
    pub fn validate(&self) -> Result<(), StorageError> {
        self.storage.snapshot().validate()
    }
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("scope", &self.context.scope())
            .field("len", &self.len())
            .finish()
    }
}

fn pattern(
    subject: Option<&Subject>,
    predicate: Option<&Iri>,
    object: Option<&Term>,
) -> TriplePattern {
    TriplePattern::new(subject.cloned(), predicate.cloned(), object.cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_kernel_model::{BlankNode, Literal, ScopeId};

    /// Mints labeled blank nodes in a fixed scope.
    struct ScopedFactory(ScopeId);

    impl TermFactory for ScopedFactory {
        fn scope(&self) -> Option<ScopeId> {
            Some(self.0)
        }

        fn create_blank_node_with_label(&self, label: &str) -> RdfResult<BlankNode> {
            Ok(BlankNode::labeled(self.0, label))
        }
    }

    fn iri(value: &str) -> Iri {
        Iri::new_unchecked(format!("http://example.com/{value}"))
    }

    fn graph(scope: u128) -> Graph {
        Graph::new(Arc::new(ScopedFactory(ScopeId::from_random_bits(scope))))
    }

    #[test]
    fn add_is_idempotent() {
        let graph = graph(1);
        assert!(graph.add(iri("s"), iri("p"), Literal::new_simple("o")));
        assert!(!graph.add(iri("s"), iri("p"), Literal::new_simple("o")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remove_matching_returns_count() -> Result<(), StorageError> {
        let graph = graph(1);
        graph.extend((0..5).map(|i| Triple::new(iri("s"), iri(&i.to_string()), iri("o"))));
        graph.add(iri("t"), iri("0"), iri("o"));
        assert_eq!(graph.remove_matching(Some(&iri("s").into()), None, None), 5);
        assert_eq!(graph.remove_matching(Some(&iri("s").into()), None, None), 0);
        assert_eq!(graph.len(), 1);
        graph.validate()
    }

    #[test]
    fn merge_remaps_foreign_blank_nodes() -> RdfResult<()> {
        let source = ScopedFactory(ScopeId::from_random_bits(2));
        let node = source.create_blank_node_with_label("b")?;
        let target = graph(1);
        let own = target.context().create_blank_node_with_label("b")?;
        target.add(own, iri("p"), iri("o"));

        let foreign = Triple::new(node, iri("p"), iri("o"));
        assert_eq!(target.merge([foreign.clone()])?, 1);
        assert_eq!(target.merge([foreign.clone()])?, 0);
        assert_eq!(target.len(), 2);
        assert!(!target.contains(&foreign));
        for triple in target.triples() {
            if let Subject::BlankNode(node) = triple.subject {
                assert_eq!(Some(node.scope()), target.context().scope());
            }
        }
        Ok(())
    }

    #[test]
    fn merged_blank_nodes_differ_from_labeled_ones() -> RdfResult<()> {
        let foreign = BlankNode::labeled(ScopeId::from_random_bits(2), "b");
        let target = graph(1);
        let label = format!("{}:{}", foreign.scope(), foreign.unique_reference());
        let own = target.context().create_blank_node_with_label(&label)?;
        target.add(own, iri("p"), iri("o"));

        assert_eq!(target.merge([Triple::new(foreign, iri("p"), iri("o"))])?, 1);
        assert_eq!(target.len(), 2);
        Ok(())
    }

    #[test]
    fn merge_keeps_own_blank_nodes() -> RdfResult<()> {
        let target = graph(1);
        let own = target.context().create_blank_node_with_label("b")?;
        let triple = Triple::new(own, iri("p"), iri("o"));
        target.merge([triple.clone()])?;
        assert!(target.contains(&triple));
        Ok(())
    }

    #[test]
    fn merge_fails_without_blank_node_support() {
        struct NoFactory;
        impl TermFactory for NoFactory {}

        let node = BlankNode::labeled(ScopeId::from_random_bits(2), "b");
        let graph = Graph::new(Arc::new(NoFactory));
        assert!(graph
            .merge([
                Triple::new(iri("s"), iri("p"), iri("o")),
                Triple::new(node, iri("p"), iri("o")),
            ])
            .is_err());
        assert!(graph.is_empty());
    }
}
