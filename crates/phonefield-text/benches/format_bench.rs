//! Benchmarks for digit extraction and formatting.
//!
//! Run with: `cargo bench --package phonefield-text --bench format_bench`
//!
//! Formatting runs on every keystroke, so these track the per-edit cost for
//! realistic number lengths rather than bulk throughput.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use phonefield_text::{FormatConfig, InsertionTable, extract_digits, format};
use std::hint::black_box;

// ============================================================================
// Extraction
// ============================================================================

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_digits");

    for (name, input) in [
        ("clean", "9161234567"),
        ("formatted", "+7 (916) 123-45-67"),
        ("noisy", "tel: +7 (916) 123 - 45 - 67 ext."),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| extract_digits(black_box(input)));
        });
    }

    group.finish();
}

// ============================================================================
// Formatting
// ============================================================================

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let tables = [
        ("empty", InsertionTable::empty()),
        ("spaced", InsertionTable::spaced()),
        ("braces_and_dashes", InsertionTable::braces_and_dashes()),
    ];

    for (name, table) in tables {
        let config = FormatConfig::ru().with_insertions(table);
        for digits in ["9", "91612", "9161234567"] {
            group.bench_with_input(
                BenchmarkId::new(name, digits.len()),
                &digits,
                |b, digits| {
                    b.iter(|| format(black_box(digits), black_box(&config)));
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(benches, bench_extract, bench_format);

criterion_main!(benches);
