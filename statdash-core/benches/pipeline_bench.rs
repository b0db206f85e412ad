//! Criterion benchmarks for the render cycle.
//!
//! 1. Normalize a 75-year table of comma-grouped text counts
//! 2. Full render (filter, chart, table, summary) in both chart modes
//! 3. CSV export of the full table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use statdash_core::chart::{ChartMode, Theme};
use statdash_core::data::normalize;
use statdash_core::domain::YearlyRecord;
use statdash_core::export::export_csv;
use statdash_core::{Dashboard, RenderRequest};

fn grouped(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn make_raw(n: i32) -> Vec<YearlyRecord> {
    (0..n)
        .map(|i| {
            let k = i as i64;
            YearlyRecord::new(
                1950 + i,
                grouped(1_000_000 + k * 250_000),
                grouped(300_000 + k * 110_000),
                grouped(200_000 + k * 90_000),
            )
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let raw = make_raw(75);
    c.bench_function("normalize_75_years", |b| {
        b.iter(|| normalize(black_box(&raw)))
    });
}

fn bench_render(c: &mut Criterion) {
    let dash = Dashboard::from_records(normalize(&make_raw(75)));
    let mut group = c.benchmark_group("render");
    for mode in [ChartMode::Composition, ChartMode::Trend] {
        let request = RenderRequest {
            mode,
            theme: Theme::Dark,
            ..RenderRequest::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(mode), &request, |b, req| {
            b.iter(|| dash.render(black_box(req)))
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let records = normalize(&make_raw(75));
    c.bench_function("export_csv_75_years", |b| {
        b.iter(|| export_csv(black_box(&records)))
    });
}

criterion_group!(benches, bench_normalize, bench_render, bench_export);
criterion_main!(benches);
