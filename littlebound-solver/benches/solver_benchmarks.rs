//! Criterion benchmarks for `LittleSolver`.
//!
//! Measures solve time on deterministic random Manhattan instances of
//! increasing size to track performance and detect regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package littlebound-solver
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use littlebound_core::{CostProvider, ManhattanCosts, Problem, TourSolver};
use littlebound_solver::LittleSolver;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Instance sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[6, 9, 12, 15];

/// Fixed seed so every run solves the same instances.
const BENCHMARK_SEED: u64 = 0x5EED;

/// Scatter `size` points over a 100 by 100 grid and price them.
fn generate_problem(size: usize, seed: u64) -> Option<Problem> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Coord<i64>> = (0..size)
        .map(|_| Coord {
            x: rng.gen_range(0..100),
            y: rng.gen_range(0..100),
        })
        .collect();
    let costs = ManhattanCosts.cost_table(&points).ok()?;
    Problem::new(costs).ok()
}

fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let solver = LittleSolver::new();
    for &size in PROBLEM_SIZES {
        let Some(problem) = generate_problem(size, BENCHMARK_SEED) else {
            continue;
        };
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &problem, |b, input| {
            b.iter(|| solver.solve(input));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
