//! Benchmarks for the pentomino solvers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pentominoes::catalog::SPATIAL_FIT_OFFSETS;
use pentominoes::geometry::{spatial_orientations, Symmetry};
use pentominoes::pieces::BOX_PIECES;
use pentominoes::{Dims, Field, PieceCatalog, Solution, BOX_PUZZLE, PLANAR_PUZZLE};

/// Benchmark enumerating every 6x10 tiling.
fn bench_solve_planar(c: &mut Criterion) {
    let mut group = c.benchmark_group("planar");
    group.sample_size(10);
    group.bench_function("enumerate_all", |b| {
        b.iter(|| black_box(&PLANAR_PUZZLE).solve(|_: &Solution<'_>| {}))
    });
    group.finish();
}

/// Benchmark packing the box up to the first solution.
fn bench_solve_box(c: &mut Criterion) {
    let mut group = c.benchmark_group("box");
    group.sample_size(10);
    group.bench_function("first_solution", |b| {
        b.iter(|| black_box(&BOX_PUZZLE).solve(|_: &Solution<'_>| {}))
    });
    group.finish();
}

/// Benchmark generating the 24 rotations of a single piece.
fn bench_orientations(c: &mut Criterion) {
    let piece = BOX_PIECES[17];

    c.bench_function("spatial_orientations", |b| {
        b.iter(|| spatial_orientations(black_box(piece)))
    });
}

/// Benchmark building the box catalog.
fn bench_catalog(c: &mut Criterion) {
    c.bench_function("build_box_catalog", |b| {
        b.iter(|| PieceCatalog::build(black_box(BOX_PIECES), Symmetry::Spatial, SPATIAL_FIT_OFFSETS))
    });
}

/// Benchmark the neighbourhood pre-check on an empty box.
fn bench_fit_word(c: &mut Criterion) {
    let field = Field::fresh(Dims::new(6, 5, 5));

    c.bench_function("fit_word", |b| {
        b.iter(|| field.fit_word(black_box((2, 2, 2)), SPATIAL_FIT_OFFSETS))
    });
}

criterion_group!(
    benches,
    bench_solve_planar,
    bench_solve_box,
    bench_orientations,
    bench_catalog,
    bench_fit_word
);
criterion_main!(benches);
