use std::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use retrace_bench::{
    Classification, ParsedReport, SuiteReport, parse_report,
    overhead::compare_reports,
    render_report,
    runner::{RateUnit, TrialSeries, TrialSpec},
};

const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_sizes() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[10, 100]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[10, 100, 1_000]
    }
}

fn fixture_report(tests: usize, skew_us: u64) -> String {
    let trials = (0..tests)
        .map(|idx| TrialSeries {
            spec: TrialSpec::new(&format!("trial_{idx}"), "fixture", 10_000, RateUnit::Calls),
            iterations: 10_000,
            runs: (0..5)
                .map(|rep| Duration::from_micros(1_000 + idx as u64 + rep + skew_us))
                .collect(),
        })
        .collect();
    let report = SuiteReport {
        title: "FIXTURE".into(),
        banner: Vec::new(),
        trials,
        interpretation: Vec::new(),
    };
    render_report(&report).expect("render fixture")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_report");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &tests in bench_sizes() {
        let text = fixture_report(tests, 0);
        group.bench_function(BenchmarkId::from_parameter(tests), |b| {
            b.iter(|| parse_report(black_box(&text)).expect("parse"));
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_reports");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &tests in bench_sizes() {
        let baseline: ParsedReport = parse_report(&fixture_report(tests, 0)).expect("parse");
        let treatment: ParsedReport = parse_report(&fixture_report(tests, 15)).expect("parse");
        group.bench_function(BenchmarkId::from_parameter(tests), |b| {
            b.iter(|| {
                compare_reports(
                    black_box(&baseline),
                    black_box(&treatment),
                    Classification::External,
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_compare);
criterion_main!(benches);
