//! Benchmarks for page profiling performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic token pages of the shapes the detectors
//! care about: flowing text, cell grids, and label/value forms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pageprofile::{build_page_profile, Token};

const PAGE_WIDTH: f32 = 612.0;

/// Flowing body text: `lines` rows of `words_per_line` tokens each.
fn text_tokens(lines: usize, words_per_line: usize) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(lines * words_per_line);
    for l in 0..lines {
        for w in 0..words_per_line {
            let x0 = 40.0 + w as f32 * 55.0;
            let top = 20.0 + l as f32 * 14.0;
            tokens.push(Token::with_size(
                format!("word{}x{}", l, w),
                x0,
                top,
                x0 + 45.0,
                top + 10.0,
                11.0,
            ));
        }
    }
    tokens
}

/// A full cell grid with repeated column left edges.
fn grid_tokens(rows: usize, cols: usize) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let x0 = 40.0 + c as f32 * 90.0;
            let top = 20.0 + r as f32 * 22.0;
            tokens.push(Token::with_size(
                format!("r{}c{}", r, c),
                x0,
                top,
                x0 + 60.0,
                top + 10.0,
                11.0,
            ));
        }
    }
    tokens
}

/// Label/value rows sharing left and right edges.
fn form_tokens(rows: usize) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(rows * 2);
    for i in 0..rows {
        let top = 20.0 + i as f32 * 26.0;
        tokens.push(Token::with_size(
            format!("Label{}", i),
            40.0,
            top,
            110.0,
            top + 10.0,
            11.0,
        ));
        tokens.push(Token::with_size(
            format!("value{}", i),
            300.0,
            top,
            380.0,
            top + 10.0,
            11.0,
        ));
    }
    tokens
}

/// Benchmark full profile construction at various text densities.
fn bench_text_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_pages");

    for lines in [10, 50, 200].iter() {
        let tokens = text_tokens(*lines, 8);

        group.bench_function(format!("{}_lines", lines), |b| {
            b.iter(|| build_page_profile(1, black_box(&tokens), PAGE_WIDTH));
        });
    }

    group.finish();
}

/// Benchmark grid reconstruction, the heaviest detector.
fn bench_table_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_pages");

    for (rows, cols) in [(10, 4), (50, 6)].iter() {
        let tokens = grid_tokens(*rows, *cols);

        group.bench_function(format!("{}x{}", rows, cols), |b| {
            b.iter(|| build_page_profile(1, black_box(&tokens), PAGE_WIDTH));
        });
    }

    group.finish();
}

/// Benchmark form detection and pairing.
fn bench_form_pages(c: &mut Criterion) {
    let tokens = form_tokens(30);

    c.bench_function("form_30_rows", |b| {
        b.iter(|| build_page_profile(1, black_box(&tokens), PAGE_WIDTH));
    });
}

criterion_group!(benches, bench_text_pages, bench_table_pages, bench_form_pages);
criterion_main!(benches);
