//! # Layout Benchmarks
//!
//! Performance benchmarks for kinship-core store and layout operations.
//!
//! Run with: `cargo bench -p kinship-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kinship_core::{FamilyGraph, FamilyStore, PersonFields, PersonId, compute_generations};
use std::hint::black_box;

/// A single line of descent: each person is the only child of the previous.
fn create_line(size: usize) -> FamilyGraph {
    let mut store = FamilyStore::new(PersonFields::named("root"));
    let mut last = PersonId::from("1");
    for i in 1..size {
        last = store
            .add_child(&[last], PersonFields::named(format!("p{i}")))
            .expect("add child");
    }
    store.snapshot().as_ref().clone()
}

/// Married couples, each pair of children marrying and having the next
/// generation. Produces many shared ancestors.
fn create_lattice(generations: usize, width: usize) -> FamilyGraph {
    let mut store = FamilyStore::new(PersonFields::named("root"));
    let root = PersonId::from("1");
    let spouse = store
        .add_spouse(&root, PersonFields::named("root spouse"))
        .expect("add spouse");
    let mut couples = vec![[root, spouse]; 1];

    for g in 0..generations {
        let mut next = Vec::with_capacity(width);
        for w in 0..width {
            let parents = &couples[w % couples.len()];
            let child = store
                .add_child(parents, PersonFields::named(format!("g{g}w{w}")))
                .expect("add child");
            let partner = store
                .add_spouse(&child, PersonFields::named(format!("s{g}w{w}")))
                .expect("add spouse");
            next.push([child, partner]);
        }
        couples = next;
    }

    store.snapshot().as_ref().clone()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_add_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_child");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_line(size)));
        });
    }

    group.finish();
}

fn bench_generations_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("generations_line");

    for size in [100, 500].iter() {
        let graph = create_line(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(compute_generations(graph)));
        });
    }

    group.finish();
}

fn bench_generations_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("generations_lattice");

    for depth in [5, 10, 20].iter() {
        let graph = create_lattice(*depth, 8);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &graph, |b, graph| {
            b.iter(|| black_box(compute_generations(graph)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_child,
    bench_generations_line,
    bench_generations_lattice
);
criterion_main!(benches);
