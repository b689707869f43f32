// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for catalog handling.
//!
//! Measures the performance of:
//! - Parsing the bundled catalog and generated catalogs of growing size
//! - Building the lookup table
//! - Lookups that hit and lookups that fall back

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use monav_l10n::catalog::{self, Catalog};
use monav_l10n::{Translator, Unfinished};
use std::hint::black_box;
use std::path::PathBuf;

fn bundled_source() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/translations/de_DE.ts");
    std::fs::read_to_string(path).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let source = bundled_source();

    group.bench_function("parse_bundled", |b| {
        b.iter(|| black_box(catalog::parse_str(black_box(&source)).unwrap()));
    });

    let parsed: Catalog = catalog::parse_str(&source).unwrap();
    group.bench_function("serialize_bundled", |b| {
        b.iter(|| black_box(catalog::to_string(black_box(&parsed))));
    });

    group.bench_function("build_translator", |b| {
        b.iter(|| black_box(Translator::from_catalog(&parsed, Unfinished::Include)));
    });

    group.finish();
}

/// A catalog with `messages` entries in lupdate layout.
fn generated_catalog(messages: usize) -> String {
    let mut ts = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.0\" language=\"de_DE\">\n<context>\n    <name>MainWindow</name>\n",
    );
    for i in 0..messages {
        ts.push_str(&format!(
            "    <message>\n        <location filename=\"../client/mainwindow.ui\" line=\"{i}\"/>\n        <source>Label {i}</source>\n        <translation>Beschriftung {i}</translation>\n    </message>\n"
        ));
    }
    ts.push_str("</context>\n</TS>\n");
    ts
}

/// Parse time should grow linearly with the number of messages.
fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");
    group.sample_size(10);

    for messages in [2_000, 8_000, 32_000] {
        let source = generated_catalog(messages);
        group.bench_with_input(
            BenchmarkId::from_parameter(messages),
            &source,
            |b, source| b.iter(|| black_box(catalog::parse_str(source).unwrap())),
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let parsed = catalog::parse_str(&bundled_source()).unwrap();
    let translator = Translator::from_catalog(&parsed, Unfinished::Include);

    group.bench_function("hit", |b| {
        b.iter(|| black_box(translator.lookup(black_box("BookmarksDialog"), black_box("Delete"))));
    });

    group.bench_function("empty_translation", |b| {
        b.iter(|| {
            black_box(translator.lookup(black_box("GPSDialog"), black_box("GPS Information")))
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| black_box(translator.lookup(black_box("MainWindow"), black_box("Unknown Label"))));
    });

    group.bench_function("all_entries", |b| {
        b.iter(|| {
            for (context, message) in parsed.messages() {
                black_box(translator.lookup(context, &message.source));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_parse_scaling, bench_lookup);
criterion_main!(benches);
