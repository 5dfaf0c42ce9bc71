#![allow(clippy::panic, clippy::unwrap_used)]

use codspeed_criterion_compat::{criterion_group, criterion_main, Criterion};
use rdf_kernel::model::{Iri, Literal, Subject, TermFactory, Triple};
use rdf_kernel::storage::StorageError;
use rdf_kernel::{RdfContext, SimpleRdfContext};

fn graph_insert(c: &mut Criterion) {
    c.bench_function("Graph::insert", |b| {
        let context = SimpleRdfContext::new();
        b.iter(|| {
            let graph = context.create_graph().unwrap();
            for triple in generate_triples(10_000) {
                graph.insert(&triple);
            }
        });
    });
}

fn graph_bulk_load(c: &mut Criterion) {
    c.bench_function("Graph::bulk_loader", |b| {
        let context = SimpleRdfContext::new();
        b.iter(|| {
            let graph = context.create_graph().unwrap();
            graph
                .bulk_loader()
                .load::<StorageError, StorageError>(generate_triples(10_000).map(Ok))
                .unwrap();
        });
    });
}

fn graph_pattern(c: &mut Criterion) {
    let context = SimpleRdfContext::new();
    let graph = context.create_graph().unwrap();
    graph.extend(generate_triples(10_000));
    let subject = Subject::from(Iri::new_unchecked("http://example.com/subject42"));

    c.bench_function("Graph::triples_for_pattern", |b| {
        b.iter(|| {
            assert_eq!(
                graph.triples_for_pattern(Some(&subject), None, None).count(),
                1
            );
        });
    });
}

fn create_blank_node_with_label(c: &mut Criterion) {
    let context = SimpleRdfContext::new();
    c.bench_function("SimpleRdfContext::create_blank_node_with_label", |b| {
        b.iter(|| context.create_blank_node_with_label("b1").unwrap());
    });
}

criterion_group!(
    graph,
    graph_insert,
    graph_bulk_load,
    graph_pattern,
    create_blank_node_with_label
);
criterion_main!(graph);

fn generate_triples(count: u64) -> impl Iterator<Item = Triple> {
    (0..count).map(|i| {
        let subject = format!("http://example.com/subject{i}");
        let predicate = format!("http://example.com/predicate{}", i % 10);
        Triple::new(
            Iri::new_unchecked(subject),
            Iri::new_unchecked(predicate),
            Literal::from(i),
        )
    })
}
