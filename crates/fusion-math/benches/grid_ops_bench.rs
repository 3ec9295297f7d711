// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Grid Operations Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use fusion_math::grid_ops::{create_weights, evaluate, weighted_dot};
use fusion_types::state::Grid2D;
use std::hint::black_box;

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_evaluate");

    for &(n, cells) in &[(1, 128), (3, 64), (5, 32)] {
        let grid = Grid2D::new(2.0, 4.0, -1.0, 1.0, n, cells, cells).expect("valid grid");
        let label = format!("n{}_{}x{}", n, cells, cells);
        group.bench_function(&label, |b| {
            b.iter(|| {
                let f = evaluate(&grid, |r, z| ((r - 3.0).powi(2) + z * z).sqrt());
                black_box(f[[0, 0]]);
            })
        });
    }

    group.finish();
}

fn bench_weighted_dot(c: &mut Criterion) {
    let grid = Grid2D::new(2.0, 4.0, -1.0, 1.0, 3, 100, 100).expect("valid grid");
    let w = create_weights(&grid);
    let a = evaluate(&grid, |r, z| r * z);
    let b = evaluate(&grid, |r, z| (-(r - 3.0).powi(2) - z * z).exp());

    c.bench_function("weighted_dot_300x300", |bench| {
        bench.iter(|| black_box(weighted_dot(&a, &w, &b)))
    });
}

criterion_group!(benches, bench_evaluate, bench_weighted_dot);
criterion_main!(benches);
