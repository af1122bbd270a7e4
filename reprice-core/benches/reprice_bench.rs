//! Criterion benchmarks for Reprice hot paths.
//!
//! Benchmarks:
//! 1. Forward and target repricing arithmetic
//! 2. Input parsing (clean, padded, junk)
//! 3. Amount formatting
//! 4. Full report evaluation from raw text

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use reprice_core::format::format_number;
use reprice_core::{
    evaluate_raw, forward_average, parse_amount, solve_required_shares, CalculationMode,
    CalculatorConfig, RawInputs,
};

// ── 1. Arithmetic ────────────────────────────────────────────────────

fn bench_repricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("repricing");

    group.bench_function("forward_average", |b| {
        b.iter(|| {
            forward_average(
                black_box(100.0),
                black_box(60.0),
                black_box(100.0),
                black_box(40.0),
            )
        })
    });

    group.bench_function("solve_required_shares", |b| {
        b.iter(|| {
            solve_required_shares(
                black_box(100.0),
                black_box(60.0),
                black_box(40.0),
                black_box(55.0),
            )
        })
    });

    group.finish();
}

// ── 2. Parsing ───────────────────────────────────────────────────────

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_amount");

    for raw in ["182.37", "   1.5e3  ", "12.5 shares", "not a number"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, raw| {
            b.iter(|| parse_amount(black_box(raw)))
        });
    }

    group.finish();
}

// ── 3. Formatting ────────────────────────────────────────────────────

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_number");

    for &value in &[0.5, 1234.567, 2_279_624.999_999_999_5] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, &v| {
            b.iter(|| format_number(black_box(v)))
        });
    }

    group.finish();
}

// ── 4. Full report ───────────────────────────────────────────────────

fn bench_report(c: &mut Criterion) {
    let raw = RawInputs {
        stock: Some("BENCH".into()),
        shares: "12500".into(),
        avg_buy_price: "182.37".into(),
        current_price: "151.02".into(),
        new_shares: "2500".into(),
        target_average: "170".into(),
    };
    let config = CalculatorConfig::default();

    let mut group = c.benchmark_group("evaluate_raw");
    for mode in [CalculationMode::Shares, CalculationMode::Price] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| evaluate_raw(black_box(&raw), mode, &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_repricing, bench_parse, bench_format, bench_report);
criterion_main!(benches);
