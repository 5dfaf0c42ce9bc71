use crate::error::{CorruptionError, StorageError};
use crate::memory::version::VersionRange;
use dashmap::DashMap;
use rdf_kernel_model::{Iri, Subject, Term, Triple, TriplePattern};
use rustc_hash::FxHasher;
use std::convert::Infallible;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasherDefault, Hash};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

type ChainIndex<K> = DashMap<K, (Weak<TripleListNode>, u64), BuildHasherDefault<FxHasher>>;

/// In-memory triple storage working with MVCC.
///
/// Each triple is annotated by a version range, allowing to read old versions while updates are
/// applied. A single write transaction is allowed at a time. Readers only wait for the short
/// moment in which a committed version is published.
///
/// Removed triples are kept for the snapshots that may still read them. Once they outnumber the
/// present triples, the index is rebuilt from the latest version. Existing snapshots keep the
/// index they were created on.
///
/// Cloning the storage is cheap and the clones share their content.
#[derive(Clone)]
pub struct MemoryTripleStorage {
    published: Arc<RwLock<Published>>,
    transaction_counter: Arc<Mutex<usize>>,
}

/// The latest committed version. The three fields are always updated together.
#[derive(Clone)]
struct Published {
    content: Arc<Content>,
    version: usize,
    len: usize,
}

/// All triples inserted since the index was last rebuilt.
///
/// Every node is chained four times: into the list of all triples and into the lists of the
/// triples sharing its subject, predicate and object.
#[derive(Default)]
struct Content {
    triple_set: DashMap<Triple, Arc<TripleListNode>, BuildHasherDefault<FxHasher>>,
    last_triple: RwLock<Option<Weak<TripleListNode>>>,
    last_triple_by_subject: ChainIndex<Subject>,
    last_triple_by_predicate: ChainIndex<Iri>,
    last_triple_by_object: ChainIndex<Term>,
}

impl MemoryTripleStorage {
    /// The number of removed triples the index may hold before it is rebuilt, if it holds fewer
    /// present triples.
    const COMPACTION_THRESHOLD: usize = 1024;

    pub fn new() -> Self {
        Self {
            published: Arc::new(RwLock::new(Published {
                content: Arc::new(Content::default()),
                version: 0,
                len: 0,
            })),
            transaction_counter: Arc::new(Mutex::new(usize::MAX >> 1)),
        }
    }

    /// The number of triples in the latest committed version.
    pub fn len(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a consistent view of the latest committed version.
    pub fn snapshot(&self) -> MemoryStorageReader {
        let published = self.published.read().unwrap_or_else(PoisonError::into_inner);
        MemoryStorageReader {
            content: Arc::clone(&published.content),
            snapshot_id: published.version,
        }
    }

    /// Runs `f` as one atomic write transaction.
    ///
    /// If `f` fails, every change it made is rolled back. Concurrent readers only observe the
    /// changes after the transaction has committed.
    pub fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut MemoryStorageWriter<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut transaction_mutex = lock(&self.transaction_counter);
        *transaction_mutex += 1;
        let transaction_id = *transaction_mutex;
        let Published {
            content,
            version,
            len,
        } = read(&self.published);
        let mut log = Vec::new();
        let result = f(&mut MemoryStorageWriter {
            content: &content,
            log: &mut log,
            transaction_id,
        });
        if result.is_ok() {
            let new_version_id = version + 1;
            let mut added = 0_usize;
            let mut removed = 0_usize;
            for entry in log {
                lock(&entry.node.range).upgrade_transaction(transaction_id, new_version_id);
                match entry.change {
                    Change::Inserted => added += 1,
                    Change::Removed => removed += 1,
                }
            }
            // Within one transaction a triple is only removed after having been present.
            self.publish(new_version_id, len + added - removed);
        } else {
            tracing::trace!(
                transaction_id,
                changes = log.len(),
                "Rolling back transaction"
            );
            for entry in log.iter().rev() {
                lock(&entry.node.range).rollback_transaction(transaction_id);
            }
        }
        self.compact_if_needed();
        drop(transaction_mutex);
        result
    }

    /// Makes `version` with `len` triples the latest committed version.
    ///
    /// Must be called with the transaction lock held.
    fn publish(&self, version: usize, len: usize) {
        let mut published = self.published.write().unwrap_or_else(PoisonError::into_inner);
        published.version = version;
        published.len = len;
    }

    /// Rebuilds the index from the latest version if removed triples outnumber present ones.
    ///
    /// Must be called with the transaction lock held. The new index holds the same triples as the
    /// latest version, so the version does not change. Snapshots keep the previous index.
    fn compact_if_needed(&self) {
        let Published {
            content,
            version,
            len,
        } = read(&self.published);
        let removed = content.triple_set.len().saturating_sub(len);
        if removed < Self::COMPACTION_THRESHOLD.max(len) {
            return;
        }

        let reader = MemoryStorageReader {
            content,
            snapshot_id: version,
        };
        let mut triples = reader
            .triples_for_pattern(&TriplePattern::any())
            .collect::<Vec<_>>();
        // Chains are walked from the most recent insertion.
        triples.reverse();
        let compacted = Arc::new(Content::default());
        let mut log = Vec::new();
        let mut writer = MemoryStorageWriter {
            content: &compacted,
            log: &mut log,
            transaction_id: 0,
        };
        for triple in &triples {
            writer.insert(triple);
        }
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .content = compacted;
        tracing::debug!(removed, kept = triples.len(), "Compacted triple storage");
    }

    /// Runs `f` as a write transaction that cannot fail.
    pub fn write<T>(&self, f: impl FnOnce(&mut MemoryStorageWriter<'_>) -> T) -> T {
        match self.transaction(|writer| Ok::<_, Infallible>(f(writer))) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Removes every triple and releases the memory of the index structures.
    ///
    /// Existing snapshots keep observing the content they were created on.
    pub fn clear(&self) {
        let transaction_mutex = lock(&self.transaction_counter);
        let mut published = self.published.write().unwrap_or_else(PoisonError::into_inner);
        let cleared = published.len;
        published.content = Arc::new(Content::default());
        published.version += 1;
        published.len = 0;
        drop(published);
        drop(transaction_mutex);
        tracing::debug!(cleared, "Cleared triple storage");
    }

    /// Returns a loader that inserts many triples under a single lock and a single version.
    pub fn bulk_loader(&self) -> MemoryStorageBulkLoader {
        MemoryStorageBulkLoader {
            storage: self.clone(),
            hooks: Vec::new(),
        }
    }
}

impl Default for MemoryTripleStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for MemoryTripleStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTripleStorage")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A read-only view of one version of a [`MemoryTripleStorage`].
///
/// Readers are cheap to clone and can be moved to other threads.
#[derive(Clone)]
pub struct MemoryStorageReader {
    content: Arc<Content>,
    snapshot_id: usize,
}

impl MemoryStorageReader {
    /// Counts the triples of this version. This scans every triple.
    pub fn len(&self) -> usize {
        self.content
            .triple_set
            .iter()
            .filter(|e| self.is_node_in_range(e.value()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        !self
            .content
            .triple_set
            .iter()
            .any(|e| self.is_node_in_range(e.value()))
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.content
            .triple_set
            .get(triple)
            .is_some_and(|e| self.is_node_in_range(e.value()))
    }

    /// Returns a lazy iterator over the triples matching `pattern`.
    ///
    /// The iterator walks the shortest of the chains selected by the bound positions and filters
    /// on the others.
    pub fn triples_for_pattern(&self, pattern: &TriplePattern) -> TripleIterator {
        fn get_start_and_count<K: Eq + Hash>(
            map: &ChainIndex<K>,
            term: Option<&K>,
        ) -> (Option<Weak<TripleListNode>>, u64) {
            let Some(term) = term else {
                return (None, u64::MAX);
            };
            map.view(term, |_, (node, count)| (Some(Weak::clone(node)), *count))
                .unwrap_or_default()
        }

        let (subject_start, subject_count) = get_start_and_count(
            &self.content.last_triple_by_subject,
            pattern.subject.as_ref(),
        );
        let (predicate_start, predicate_count) = get_start_and_count(
            &self.content.last_triple_by_predicate,
            pattern.predicate.as_ref(),
        );
        let (object_start, object_count) = get_start_and_count(
            &self.content.last_triple_by_object,
            pattern.object.as_ref(),
        );

        let mut filter = pattern.clone();
        let (start, kind) = if pattern.subject.is_some()
            && subject_count <= predicate_count
            && subject_count <= object_count
        {
            filter.subject = None;
            (subject_start, TripleIteratorKind::Subject)
        } else if pattern.predicate.is_some() && predicate_count <= object_count {
            filter.predicate = None;
            (predicate_start, TripleIteratorKind::Predicate)
        } else if pattern.object.is_some() {
            filter.object = None;
            (object_start, TripleIteratorKind::Object)
        } else {
            (read(&self.content.last_triple), TripleIteratorKind::All)
        };
        TripleIterator {
            reader: self.clone(),
            current: start,
            kind,
            filter,
        }
    }

    /// Validates that all the storage invariants hold in the data.
    pub fn validate(&self) -> Result<(), StorageError> {
        let expected_triple_len = self.content.triple_set.len() as u64;

        let mut next = read(&self.content.last_triple);
        let mut count_last_triple = 0;
        while let Some(current) = next.take().and_then(|c| c.upgrade()) {
            count_last_triple += 1;
            self.validate_in_triple_set(&current)?;
            next.clone_from(&current.previous);
        }
        if count_last_triple != expected_triple_len {
            return Err(CorruptionError::msg("Too many triples in triple_set").into());
        }

        self.validate_chains(
            &self.content.last_triple_by_subject,
            |node| &node.triple.subject,
            |node| &node.previous_subject,
        )?;
        self.validate_chains(
            &self.content.last_triple_by_predicate,
            |node| &node.triple.predicate,
            |node| &node.previous_predicate,
        )?;
        self.validate_chains(
            &self.content.last_triple_by_object,
            |node| &node.triple.object,
            |node| &node.previous_object,
        )?;
        Ok(())
    }

    fn validate_chains<K: Eq + Hash>(
        &self,
        index: &ChainIndex<K>,
        key: impl Fn(&TripleListNode) -> &K,
        previous: impl Fn(&TripleListNode) -> &Option<Weak<TripleListNode>>,
    ) -> Result<(), StorageError> {
        let mut count_in_chains = 0;
        for entry in index {
            let mut next = Some(Weak::clone(&entry.value().0));
            let mut element_count = 0;
            while let Some(current) = next.take().and_then(|n| n.upgrade()) {
                element_count += 1;
                if key(&*current) != entry.key() {
                    return Err(CorruptionError::msg("Triple in wrong list").into());
                }
                self.validate_in_triple_set(&current)?;
                next.clone_from(previous(&*current));
            }
            if element_count != entry.value().1 {
                return Err(CorruptionError::msg("Too many triples in a chain").into());
            }
            count_in_chains += element_count;
        }
        if count_in_chains != self.content.triple_set.len() as u64 {
            return Err(CorruptionError::msg("Too many triples in triple_set").into());
        }
        Ok(())
    }

    fn validate_in_triple_set(&self, node: &Arc<TripleListNode>) -> Result<(), StorageError> {
        if self
            .content
            .triple_set
            .get(&node.triple)
            .is_some_and(|e| Arc::ptr_eq(e.value(), node))
        {
            Ok(())
        } else {
            Err(CorruptionError::msg("Triple in previous chain but not in triple set").into())
        }
    }

    fn is_node_in_range(&self, node: &TripleListNode) -> bool {
        lock(&node.range).contains(self.snapshot_id)
    }
}

impl Debug for MemoryStorageReader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorageReader")
            .field("snapshot_id", &self.snapshot_id)
            .finish_non_exhaustive()
    }
}

/// The write handle of a running transaction.
pub struct MemoryStorageWriter<'a> {
    content: &'a Arc<Content>,
    log: &'a mut Vec<LogEntry>,
    transaction_id: usize,
}

impl MemoryStorageWriter<'_> {
    /// A reader that observes the changes of this transaction.
    pub fn reader(&self) -> MemoryStorageReader {
        MemoryStorageReader {
            content: Arc::clone(self.content),
            snapshot_id: self.transaction_id,
        }
    }

    /// Inserts `triple`. Returns `false` if it is already present.
    pub fn insert(&mut self, triple: &Triple) -> bool {
        if let Some(node) = self
            .content
            .triple_set
            .get(triple)
            .map(|e| Arc::clone(e.value()))
        {
            let added = lock(&node.range).add(self.transaction_id);
            if added {
                self.log.push(LogEntry::inserted(node));
            }
            return added;
        }

        let content = self.content;
        let node = Arc::new(TripleListNode {
            triple: triple.clone(),
            range: Mutex::new(VersionRange::Since(self.transaction_id)),
            previous: read(&content.last_triple),
            previous_subject: content
                .last_triple_by_subject
                .view(&triple.subject, |_, (node, _)| Weak::clone(node)),
            previous_predicate: content
                .last_triple_by_predicate
                .view(&triple.predicate, |_, (node, _)| Weak::clone(node)),
            previous_object: content
                .last_triple_by_object
                .view(&triple.object, |_, (node, _)| Weak::clone(node)),
        });
        content.triple_set.insert(triple.clone(), Arc::clone(&node));
        *content
            .last_triple
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::downgrade(&node));
        push_to_chain(&content.last_triple_by_subject, triple.subject.clone(), &node);
        push_to_chain(
            &content.last_triple_by_predicate,
            triple.predicate.clone(),
            &node,
        );
        push_to_chain(&content.last_triple_by_object, triple.object.clone(), &node);
        self.log.push(LogEntry::inserted(node));
        true
    }

    /// Removes `triple`. Returns `false` if it is not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        let Some(node) = self
            .content
            .triple_set
            .get(triple)
            .map(|e| Arc::clone(e.value()))
        else {
            return false;
        };
        let removed = lock(&node.range).remove(self.transaction_id);
        if removed {
            self.log.push(LogEntry::removed(node));
        }
        removed
    }

    /// Removes every triple matching `pattern` and returns how many were removed.
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        let matching = self.reader().triples_for_pattern(pattern).collect::<Vec<_>>();
        let mut removed = 0;
        for triple in &matching {
            if self.remove(triple) {
                removed += 1;
            }
        }
        removed
    }

    /// Removes every triple within this transaction.
    pub fn clear(&mut self) {
        self.content.triple_set.iter().for_each(|e| {
            if lock(&e.value().range).remove(self.transaction_id) {
                self.log.push(LogEntry::removed(Arc::clone(e.value())));
            }
        });
    }
}

fn push_to_chain<K: Eq + Hash>(index: &ChainIndex<K>, key: K, node: &Arc<TripleListNode>) {
    index
        .entry(key)
        .and_modify(|(e, count)| {
            *e = Arc::downgrade(node);
            *count += 1;
        })
        .or_insert_with(|| (Arc::downgrade(node), 1));
}

/// A lazy iterator over the triples of a snapshot that match a pattern.
///
/// The iterator owns its snapshot. Concurrent writes are never observed and never blocked.
pub struct TripleIterator {
    reader: MemoryStorageReader,
    current: Option<Weak<TripleListNode>>,
    kind: TripleIteratorKind,
    filter: TriplePattern,
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum TripleIteratorKind {
    All,
    Subject,
    Predicate,
    Object,
}

impl Iterator for TripleIterator {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        loop {
            let current = self.current.take()?.upgrade()?;
            self.current = match self.kind {
                TripleIteratorKind::All => current.previous.clone(),
                TripleIteratorKind::Subject => current.previous_subject.clone(),
                TripleIteratorKind::Predicate => current.previous_predicate.clone(),
                TripleIteratorKind::Object => current.previous_object.clone(),
            };
            if !self.reader.is_node_in_range(&current) {
                continue;
            }
            if !self.filter.matches(&current.triple) {
                continue;
            }
            return Some(current.triple.clone());
        }
    }
}

/// Inserts many triples while holding the write lock for the whole load.
///
/// All triples are published in a single version once the load ends. A load that fails keeps
/// the triples inserted before the failure.
#[must_use]
pub struct MemoryStorageBulkLoader {
    storage: MemoryTripleStorage,
    hooks: Vec<Box<dyn Fn(u64)>>,
}

impl MemoryStorageBulkLoader {
    /// Progress reporting interval, in processed triples.
    const PROGRESS_INTERVAL: u64 = 1_000_000;

    /// Registers a callback that is called with the number of processed triples every million
    /// triples.
    pub fn on_progress(mut self, callback: impl Fn(u64) + 'static) -> Self {
        self.hooks.push(Box::new(callback));
        self
    }

    /// Loads `triples` and returns the number of triples that were not present before.
    pub fn load<EI, EO: From<StorageError> + From<EI>>(
        &self,
        triples: impl IntoIterator<Item = Result<Triple, EI>>,
    ) -> Result<usize, EO> {
        // We lock the transaction counter to make sure there is no transaction committing at the
        // same time.
        let transaction_lock = lock(&self.storage.transaction_counter);
        let Published {
            content,
            version,
            len,
        } = read(&self.storage.published);
        // Inserted directly with the version published at the end: readers of older versions
        // cannot observe it, and nothing else writes until then.
        let version_id = version + 1;
        let mut log = Vec::new();
        let mut done_counter = 0_u64;
        let mut new_triples = 0;
        let mut outcome = Ok(());
        for triple in triples {
            let triple = match triple {
                Ok(triple) => triple,
                Err(error) => {
                    outcome = Err(EO::from(error));
                    break;
                }
            };
            let inserted = MemoryStorageWriter {
                content: &content,
                log: &mut log,
                transaction_id: version_id,
            }
            .insert(&triple);
            if inserted {
                new_triples += 1;
            }
            log.clear();
            done_counter += 1;
            if done_counter % Self::PROGRESS_INTERVAL == 0 {
                tracing::debug!(done_counter, "Bulk load in progress");
                for hook in &self.hooks {
                    hook(done_counter);
                }
            }
        }
        self.storage.publish(version_id, len + new_triples);
        drop(transaction_lock);
        tracing::debug!(done_counter, new_triples, "Bulk load finished");
        outcome.map(|()| new_triples)
    }
}

struct LogEntry {
    node: Arc<TripleListNode>,
    change: Change,
}

impl LogEntry {
    fn inserted(node: Arc<TripleListNode>) -> Self {
        Self {
            node,
            change: Change::Inserted,
        }
    }

    fn removed(node: Arc<TripleListNode>) -> Self {
        Self {
            node,
            change: Change::Removed,
        }
    }
}

enum Change {
    Inserted,
    Removed,
}

struct TripleListNode {
    triple: Triple,
    range: Mutex<VersionRange>,
    previous: Option<Weak<Self>>,
    previous_subject: Option<Weak<Self>>,
    previous_predicate: Option<Weak<Self>>,
    previous_object: Option<Weak<Self>>,
}

/// Every critical section leaves the data consistent, so a poisoned lock is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T: Clone>(rw_lock: &RwLock<T>) -> T {
    rw_lock
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
