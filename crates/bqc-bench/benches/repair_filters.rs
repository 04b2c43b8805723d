// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use bqc_bench::synthetic_bead;
use bqc_repair::{AberrantValueFilter, ConstantRunFilter, RepairPipeline};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const N: usize = 100_000;

fn benchmark_repair_filters(c: &mut Criterion) {
    let bead = synthetic_bead(N, 0xfeed_f00d_dead_beef);

    let mut group = c.benchmark_group("repair_filters");

    group.bench_function("clipper_clamp_n1e5", |b| {
        let filter = AberrantValueFilter::default();
        b.iter(|| {
            let mut signal = bead.clone();
            filter.apply(black_box(&mut signal), false);
        })
    });

    group.bench_function("constant_run_n1e5", |b| {
        let filter = ConstantRunFilter::default();
        b.iter(|| {
            let mut signal = bead.clone();
            filter.apply(black_box(&mut signal));
        })
    });

    group.bench_function("full_pipeline_clip_n1e5", |b| {
        let pipeline = RepairPipeline::default();
        b.iter(|| {
            let mut signal = bead.clone();
            pipeline.repair(black_box(&mut signal), true);
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_repair_filters);
criterion_main!(benches);
