//! Classification and validation throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use report_guard::core::{ReportGuard, ReportRequest};
use std::hint::black_box;

fn requests() -> Vec<(&'static str, ReportRequest)> {
    vec![
        (
            "basic",
            ReportRequest::new().with_metrics(["views"]),
        ),
        (
            "time_based",
            ReportRequest::new()
                .with_dimensions(["day"])
                .with_filter("country", "US")
                .with_metrics(["views", "likes", "shares"])
                .with_sort_options(["-views"]),
        ),
        (
            "top_videos",
            ReportRequest::new()
                .with_dimensions(["video"])
                .with_filter("subscribedStatus", "SUBSCRIBED")
                .with_filter("youtubeProduct", "CORE")
                .with_metrics(["views", "averageViewPercentage"])
                .with_sort_options(["-views"])
                .with_max_results(50),
        ),
        (
            "rejected",
            ReportRequest::new()
                .with_dimensions(["day", "month"])
                .with_metrics(["views"]),
        ),
    ]
}

fn bench_classify(c: &mut Criterion) {
    let guard = ReportGuard::new();
    let mut group = c.benchmark_group("classify");
    for (name, request) in requests() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, request| {
            b.iter(|| guard.classify(black_box(request)))
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let guard = ReportGuard::new();
    let mut group = c.benchmark_group("validate");
    for (name, request) in requests() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, request| {
            b.iter(|| guard.validate(black_box(request)).is_ok())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_validate);
criterion_main!(benches);
