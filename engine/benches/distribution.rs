//! Benchmark harness for distribution algebra
//!
//! Measures multi-hit stacking of a full 39-roll distribution under both
//! combine rules.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use koplan_engine::{multi_hit, CombineRule, DamageRollDistribution};

/// 39 roll numerators (217..=255) scaling a base damage, integer-truncated.
fn roll_distribution(base: u32) -> DamageRollDistribution {
    let rolls: Vec<u32> = (217..=255).map(|r| (base * r / 255).max(1)).collect();
    DamageRollDistribution::from_rolls(&rolls).expect("non-empty rolls")
}

fn benchmark_combine(c: &mut Criterion) {
    let normal = roll_distribution(60);
    let crit = roll_distribution(115);

    c.bench_function("combine_legacy_5_hits", |b| {
        b.iter(|| multi_hit(black_box(&normal), black_box(&crit), 5, CombineRule::Legacy))
    });
    c.bench_function("combine_independent_5_hits", |b| {
        b.iter(|| {
            multi_hit(black_box(&normal), black_box(&crit), 5, CombineRule::Independent)
        })
    });
}

fn benchmark_split(c: &mut Criterion) {
    let normal = roll_distribution(200);

    c.bench_function("chance_at_least", |b| {
        b.iter(|| black_box(&normal).chance_at_least(black_box(190)))
    });
}

criterion_group!(benches, benchmark_combine, benchmark_split);
criterion_main!(benches);
