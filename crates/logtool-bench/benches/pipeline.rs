// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use logtool_bench::synthetic_log;
use logtool_doctor::{AnalysisConfig, analyze, detect_segments, make_reports};
use logtool_segments::{detect_steady_cruise, detect_wot_pulls};

const CYCLES: usize = 100;

fn benchmark_pipeline(c: &mut Criterion) {
    let table = synthetic_log(CYCLES, 0xfeed_f00d_dead_beef).expect("synthetic log should be valid");
    let config = AnalysisConfig {
        include_cruise: true,
        ..AnalysisConfig::default()
    };
    let segments = detect_segments(&table, &config).expect("detection should succeed");

    let mut group = c.benchmark_group("pipeline");

    group.bench_function("detect_wot_cycles100", |b| {
        b.iter(|| detect_wot_pulls(black_box(&table), 95.0, 50.0, 1.5))
    });

    group.bench_function("detect_cruise_cycles100", |b| {
        b.iter(|| detect_steady_cruise(black_box(&table), 20.0, 40.0, 10.0, 5.0, 40.0))
    });

    group.bench_function("make_reports_cycles100", |b| {
        b.iter(|| {
            let _reports = make_reports(black_box(&table), black_box(&segments))
                .expect("reports should build");
        })
    });

    group.bench_function("analyze_cycles100", |b| {
        b.iter(|| {
            let _reports =
                analyze(black_box(&table), black_box(&config)).expect("analysis should succeed");
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
