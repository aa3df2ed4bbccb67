//! Benchmarks for the feasibility margin.
//!
//! Run with: cargo bench -p cable-wrench

use cable_wrench::{FeasibilityParams, analyze_wrench, hyperplane_shifting_margin};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nalgebra::{Matrix3xX, Vector3};

/// `n` directions spread evenly around a cone opening upward.
fn cone_directions(n: usize) -> Matrix3xX<f64> {
    let columns: Vec<Vector3<f64>> = (0..n)
        .map(|k| {
            let angle = std::f64::consts::TAU * k as f64 / n as f64;
            Vector3::new(angle.cos(), angle.sin(), 1.0).normalize()
        })
        .collect();
    Matrix3xX::from_columns(&columns)
}

fn bench_margin(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperplane_shifting_margin");
    let params = FeasibilityParams::default();

    for n in [3, 4, 6, 8, 12] {
        let directions = cone_directions(n);
        group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::new("cables", n), &directions, |b, directions| {
            b.iter(|| hyperplane_shifting_margin(black_box(directions), &params));
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let params = FeasibilityParams::default();
    let directions = cone_directions(8);

    c.bench_function("analyze_wrench_8", |b| {
        b.iter(|| analyze_wrench(black_box(&directions), &params));
    });
}

criterion_group!(benches, bench_margin, bench_analysis);
criterion_main!(benches);
