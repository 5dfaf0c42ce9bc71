#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use proptest::prelude::*;
use rdf_kernel::model::vocab::{rdf, xsd};
use rdf_kernel::model::{Iri, Literal, RdfError, Subject, Term, TermFactory, Triple, TriplePattern};
use rdf_kernel::storage::{Graph, StorageError};
use rdf_kernel::{RdfContext, SimpleRdfContext};
use std::error::Error;
use std::sync::Arc;
use std::thread;

const NUMBER_OF_TRIPLES: usize = 6;

fn iri(value: &str) -> Iri {
    Iri::new_unchecked(format!("http://example.com/{value}"))
}

fn triples(context: &SimpleRdfContext) -> Result<Vec<Triple>, Box<dyn Error>> {
    let paris = iri("Paris");
    let name = iri("name");
    Ok(vec![
        Triple::new(paris.clone(), rdf::TYPE, iri("City")),
        Triple::new(
            paris.clone(),
            name.clone(),
            context.create_language_tagged_literal("Paris", "fr")?,
        ),
        Triple::new(
            paris.clone(),
            name,
            context.create_language_tagged_literal("la ville lumi\u{E8}re", "fr")?,
        ),
        Triple::new(
            paris.clone(),
            iri("population"),
            context.create_typed_literal("2000000", &xsd::INTEGER)?,
        ),
        Triple::new(
            paris.clone(),
            iri("postalCode"),
            context.create_literal("75001")?,
        ),
        Triple::new(
            context.create_blank_node_with_label("mayor")?,
            iri("mayorOf"),
            paris,
        ),
    ])
}

fn graph_with_data() -> Result<(SimpleRdfContext, Graph), Box<dyn Error>> {
    let context = SimpleRdfContext::new();
    let graph = context.create_graph()?;
    graph.extend(triples(&context)?);
    Ok((context, graph))
}

#[test]
fn test_add_and_contains() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    assert_eq!(graph.len(), NUMBER_OF_TRIPLES);
    for triple in triples(&context)? {
        assert!(graph.contains(&triple));
    }
    graph.validate()?;
    Ok(())
}

#[test]
fn test_add_is_idempotent() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    assert_eq!(graph.extend(triples(&context)?), 0);
    assert_eq!(graph.len(), NUMBER_OF_TRIPLES);
    Ok(())
}

#[test]
fn test_remove() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    let triples = triples(&context)?;
    let removed = &triples[0];
    assert!(graph.remove(removed));
    assert!(!graph.remove(removed));
    assert!(!graph.contains(removed));
    assert_eq!(graph.len(), NUMBER_OF_TRIPLES - 1);
    assert!(graph.insert(removed));
    assert_eq!(graph.len(), NUMBER_OF_TRIPLES);
    graph.validate()?;
    Ok(())
}

#[test]
fn test_remove_matching() -> Result<(), Box<dyn Error>> {
    let (_, graph) = graph_with_data()?;
    let paris = Subject::from(iri("Paris"));
    assert_eq!(graph.remove_matching(Some(&paris), None, None), 5);
    assert_eq!(graph.len(), 1);
    assert!(!graph.contains_pattern(Some(&paris), None, None));
    assert!(graph.contains_pattern(None, Some(&iri("mayorOf")), None));
    Ok(())
}

#[test]
fn test_triples_for_pattern() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    let paris = Subject::from(iri("Paris"));
    let name = iri("name");

    assert_eq!(graph.triples().count(), NUMBER_OF_TRIPLES);
    assert_eq!(
        graph.triples_for_pattern(Some(&paris), None, None).count(),
        5
    );
    assert_eq!(graph.triples_for_pattern(None, Some(&name), None).count(), 2);
    assert_eq!(
        graph
            .triples_for_pattern(None, None, Some(&Term::from(iri("Paris"))))
            .count(),
        1
    );

    let postal_code = Term::from(context.create_literal("75001")?);
    let matching = graph
        .triples_for_pattern(Some(&paris), Some(&iri("postalCode")), Some(&postal_code))
        .collect::<Vec<_>>();
    assert_eq!(matching, vec![triples(&context)?[4].clone()]);

    assert_eq!(
        graph
            .triples_for_pattern(Some(&paris), Some(&iri("unknown")), None)
            .count(),
        0
    );
    Ok(())
}

#[test]
fn test_pattern_by_blank_node() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    let mayor = Subject::from(context.create_blank_node_with_label("mayor")?);
    let found = graph
        .triples_for_pattern(Some(&mayor), None, None)
        .map(|triple| triple.predicate)
        .collect::<Vec<_>>();
    assert_eq!(found, vec![iri("mayorOf")]);
    Ok(())
}

#[test]
fn test_clear() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    let snapshot = graph.snapshot();
    graph.clear();
    assert!(graph.is_empty());
    assert_eq!(graph.triples().count(), 0);
    assert_eq!(snapshot.len(), NUMBER_OF_TRIPLES);

    // The context survives.
    graph.add(
        graph.context().create_blank_node_with_label("mayor")?,
        iri("mayorOf"),
        iri("Paris"),
    );
    assert!(graph.contains(&triples(&context)?[5]));
    graph.validate()?;
    Ok(())
}

#[test]
fn test_transaction_rollback() -> Result<(), Box<dyn Error>> {
    let (context, graph) = graph_with_data()?;
    let result = graph.transaction(|writer| {
        for triple in triples(&context).map_err(|e| StorageError::Other(e.to_string().into()))? {
            writer.remove(&triple);
        }
        writer.insert(&Triple::new(iri("s"), iri("p"), iri("o")));
        Err::<(), _>(StorageError::Other("abort".into()))
    });
    assert!(result.is_err());
    assert_eq!(graph.len(), NUMBER_OF_TRIPLES);
    assert!(!graph.contains(&Triple::new(iri("s"), iri("p"), iri("o"))));
    graph.validate()?;
    Ok(())
}

#[test]
fn test_transaction_commit() -> Result<(), Box<dyn Error>> {
    let (_, graph) = graph_with_data()?;
    let removed = graph.transaction(|writer| {
        let paris = Subject::from(iri("Paris"));
        let removed = writer.remove_matching(&TriplePattern::new(Some(paris), None, None));
        writer.insert(&Triple::new(iri("Lyon"), rdf::TYPE, iri("City")));
        Ok::<_, StorageError>(removed)
    })?;
    assert_eq!(removed, 5);
    assert_eq!(graph.len(), 2);
    Ok(())
}

#[test]
fn test_bulk_load() -> Result<(), Box<dyn Error>> {
    let context = SimpleRdfContext::new();
    let graph = context.create_graph()?;
    let loaded = (0..1_000_i64).map(|i| {
        Ok::<_, StorageError>(Triple::new(iri(&format!("s{i}")), iri("p"), Literal::from(i)))
    });
    graph.bulk_loader().load::<StorageError, StorageError>(loaded)?;
    assert_eq!(graph.len(), 1_000);
    assert_eq!(graph.triples_for_pattern(None, Some(&iri("p")), None).count(), 1_000);
    graph.validate()?;
    Ok(())
}

#[test]
fn test_graph_clones_share_triples() -> Result<(), Box<dyn Error>> {
    let (_, graph) = graph_with_data()?;
    let clone = graph.clone();
    clone.add(iri("Lyon"), rdf::TYPE, iri("City"));
    assert_eq!(graph.len(), NUMBER_OF_TRIPLES + 1);
    Ok(())
}

#[test]
fn test_merge_from_other_context() -> Result<(), Box<dyn Error>> {
    let (_, source) = graph_with_data()?;
    let (target_context, target) = graph_with_data()?;
    assert_eq!(target.merge(source.triples())?, 1);
    assert_eq!(target.len(), NUMBER_OF_TRIPLES + 1);
    assert_eq!(target.merge(source.triples())?, 0);

    let mayors = target
        .triples_for_pattern(None, Some(&iri("mayorOf")), None)
        .map(|triple| triple.subject)
        .collect::<Vec<_>>();
    assert_eq!(mayors.len(), 2);
    for mayor in mayors {
        let Subject::BlankNode(node) = mayor else {
            return Err("Expected a blank node".into());
        };
        assert_eq!(Some(node.scope()), target_context.scope());
    }
    Ok(())
}

#[test]
fn test_iteration_during_concurrent_writes() -> Result<(), Box<dyn Error>> {
    let (_, graph) = graph_with_data()?;
    let mut iter = graph.triples();
    let first = iter.next();
    graph.clear();
    for i in 0..100 {
        graph.add(iri(&format!("s{i}")), iri("p"), iri("o"));
    }
    assert!(first.is_some());
    assert_eq!(iter.count(), NUMBER_OF_TRIPLES - 1);
    Ok(())
}

#[test]
fn test_concurrent_writers() -> Result<(), Box<dyn Error>> {
    const THREADS: usize = 8;
    const TRIPLES_PER_THREAD: usize = 500;

    let context = Arc::new(SimpleRdfContext::new());
    let graph = context.create_graph()?;
    thread::scope(|scope| {
        let handles = (0..THREADS)
            .map(|t| {
                let graph = &graph;
                let context = Arc::clone(&context);
                scope.spawn(move || {
                    for i in 0..TRIPLES_PER_THREAD {
                        let subject = context.create_blank_node_with_label(&format!("t{t}-{i}"))?;
                        graph.add(subject, iri("p"), Literal::new_simple(i.to_string()));
                        // Readers never see more than what was written.
                        let seen = graph.triples_for_pattern(None, Some(&iri("p")), None).count();
                        assert!(seen <= THREADS * TRIPLES_PER_THREAD);
                    }
                    Ok::<_, RdfError>(())
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().map_err(|_| "Thread panicked")??;
        }
        Ok::<_, Box<dyn Error>>(())
    })?;
    assert_eq!(graph.len(), THREADS * TRIPLES_PER_THREAD);
    assert_eq!(graph.triples().count(), THREADS * TRIPLES_PER_THREAD);
    graph.validate()?;
    Ok(())
}

#[test]
fn test_concurrent_removals() -> Result<(), Box<dyn Error>> {
    const THREADS: usize = 4;

    let context = SimpleRdfContext::new();
    let graph = context.create_graph()?;
    graph.extend((0..1_000).map(|i| Triple::new(iri(&format!("s{i}")), iri("p"), iri("o"))));
    let removed = thread::scope(|scope| {
        let handles = (0..THREADS)
            .map(|_| {
                let graph = &graph;
                scope.spawn(move || {
                    let mut removed = 0;
                    for i in 0..1_000 {
                        if graph.remove(&Triple::new(iri(&format!("s{i}")), iri("p"), iri("o"))) {
                            removed += 1;
                        }
                    }
                    removed
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| "Thread panicked"))
            .sum::<Result<usize, _>>()
    })?;
    assert_eq!(removed, 1_000);
    assert!(graph.is_empty());
    graph.validate()?;
    Ok(())
}

#[test]
fn test_len_agrees_with_contains() -> Result<(), Box<dyn Error>> {
    const TRIPLES: usize = 5_000;

    let context = SimpleRdfContext::new();
    let graph = context.create_graph()?;
    let nth = |i: usize| Triple::new(iri(&format!("s{i}")), iri("p"), iri("o"));
    thread::scope(|scope| {
        let writer = &graph;
        scope.spawn(move || {
            for i in 0..TRIPLES {
                writer.insert(&nth(i));
            }
        });
        let reader = scope.spawn(|| {
            let mut violations = 0;
            while graph.len() < TRIPLES {
                let len = graph.len();
                // Triples are added in order, so the last one counted must be visible.
                if len > 0 && !graph.contains(&nth(len - 1)) {
                    violations += 1;
                }
            }
            violations
        });
        let violations = reader.join().map_err(|_| "Thread panicked")?;
        assert_eq!(violations, 0);
        Ok::<_, Box<dyn Error>>(())
    })?;
    assert_eq!(graph.len(), TRIPLES);
    Ok(())
}

#[test]
fn test_churn_with_long_lived_snapshot() -> Result<(), Box<dyn Error>> {
    let context = SimpleRdfContext::new();
    let graph = context.create_graph()?;
    graph.add(iri("kept"), iri("p"), iri("o"));
    let snapshot = graph.snapshot();
    for i in 0..5_000 {
        let triple = Triple::new(iri(&format!("s{i}")), iri("p"), iri("o"));
        assert!(graph.insert(&triple));
        assert!(graph.remove(&triple));
    }
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.triples().count(), 1);
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains(&Triple::new(iri("kept"), iri("p"), iri("o"))));
    graph.validate()?;
    snapshot.validate()?;
    Ok(())
}

proptest! {
    #[test]
    fn labels_are_stable_within_a_context(label in "[a-zA-Z0-9_:-]{1,32}") {
        let context = SimpleRdfContext::new();
        let first = context.create_blank_node_with_label(&label).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = context.create_blank_node_with_label(&label).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn labels_are_isolated_between_contexts(label in "[a-zA-Z0-9_:-]{1,32}") {
        let first = SimpleRdfContext::new().create_blank_node_with_label(&label).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = SimpleRdfContext::new().create_blank_node_with_label(&label).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_ne!(first, second);
    }

    #[test]
    fn graph_len_matches_distinct_triples(values in proptest::collection::vec(0_u8..16, 0..64)) {
        let context = SimpleRdfContext::new();
        let graph = context.create_graph().map_err(|e| TestCaseError::fail(e.to_string()))?;
        for value in &values {
            graph.add(iri("s"), iri("p"), Literal::from(*value));
        }
        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(graph.len(), distinct.len());
        prop_assert_eq!(graph.triples().count(), distinct.len());
    }
}
