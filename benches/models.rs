//! Benchmarks for model construction and solving.
//!
//! Run with: cargo bench

use clique_entropy::cover::CliqueCoverModel;
use clique_entropy::entropy::EntropyModel;
use clique_entropy::{Graph, LpSolver, Simplex, SubsetSpace};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark the enumeration of subsets.
fn bench_subsets(c: &mut Criterion) {
    let g = Graph::empty(12);
    c.bench_function("subsets_12", |b| b.iter(|| SubsetSpace::new(black_box(&g))));
}

/// Benchmark the construction of both models on cycles.
fn bench_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("models");
    for n in [4, 6, 8] {
        let g = Graph::cycle(n);
        group.bench_with_input(BenchmarkId::new("cover", n), &g, |b, g| {
            b.iter(|| CliqueCoverModel::new(black_box(g)))
        });
        group.bench_with_input(BenchmarkId::new("entropy", n), &g, |b, g| {
            b.iter(|| EntropyModel::new(black_box(g)))
        });
    }
    group.finish();
}

/// Benchmark the simplex on the entropy model of the 5-cycle.
fn bench_simplex(c: &mut Criterion) {
    let m = EntropyModel::new(&Graph::cycle(5));
    let solver = Simplex::default();
    c.bench_function("simplex_entropy_c5", |b| {
        b.iter(|| solver.solve(black_box(&m.model)).unwrap())
    });
}

criterion_group!(benches, bench_subsets, bench_models, bench_simplex);
criterion_main!(benches);
