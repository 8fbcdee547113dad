//! Benchmarks for the compilation pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rulec::{compile, Configuration, FilterSource, MemoryFetcher, Transformation};

/// Generate a synthetic source with the given rule count.
///
/// Every tenth line is a comment and every fifth line a duplicate, so the
/// transformations have real work to do.
fn generate_source(rule_count: usize) -> String {
    let mut content = String::with_capacity(rule_count * 24);
    for i in 0..rule_count {
        if i % 10 == 0 {
            content.push_str(&format!("! section {}\n", i / 10));
        }
        if i % 5 == 0 {
            content.push_str("||duplicate.example^\n");
        } else {
            content.push_str(&format!("||domain{}.example^\n", i));
        }
    }
    content
}

fn bench_config(rule_count: usize, transformations: &[&str]) -> (Configuration, MemoryFetcher) {
    let fetcher = MemoryFetcher::new().with("list.txt", generate_source(rule_count));
    let config = Configuration {
        sources: vec![FilterSource::new("list.txt")],
        transformations: transformations.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    (config, fetcher)
}

/// Benchmark the full pipeline with a typical transformation list.
fn bench_full_compile(c: &mut Criterion) {
    let (config, fetcher) = bench_config(
        10_000,
        &[
            "RemoveComments",
            "Deduplicate",
            "Validate",
            "TrimLines",
            "InsertFinalNewLine",
        ],
    );

    let mut group = c.benchmark_group("full_compile");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("typical_10k", |b| {
        b.iter(|| black_box(compile(&config, &fetcher).unwrap()))
    });

    group.finish();
}

/// Benchmark scalability with different source sizes.
fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");

    for size in [1_000, 10_000, 50_000].iter() {
        let (config, fetcher) = bench_config(*size, &["RemoveComments", "Deduplicate"]);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("rules", size), size, |b, _| {
            b.iter(|| black_box(compile(&config, &fetcher).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark individual transformations over a fixed line set.
fn bench_transformations(c: &mut Criterion) {
    let lines: Vec<String> = generate_source(10_000).lines().map(str::to_string).collect();

    let mut group = c.benchmark_group("transformations");
    group.throughput(Throughput::Elements(lines.len() as u64));

    for t in [
        Transformation::RemoveComments,
        Transformation::Deduplicate,
        Transformation::Validate,
        Transformation::Compress,
        Transformation::TrimLines,
    ] {
        group.bench_function(t.as_str(), |b| {
            b.iter_batched(
                || lines.clone(),
                |lines| black_box(t.apply(lines)),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_full_compile,
    bench_scalability,
    bench_transformations,
);

criterion_main!(benches);
