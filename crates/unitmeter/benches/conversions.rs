//! Unitmeter Performance Benchmarks
//!
//! Hot paths of a rating run:
//! - Scaled adds (fractional quantity -> base units)
//! - Unit dispatch (label + raw text -> counter)
//! - Conversion factor lookup
//! - Counter rendering and parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use unitmeter::{classify, ConversionRegistry, CounterDomain, UnitCounter};

// ============ COUNTER BENCHMARKS ============

/// Benchmark repeated fractional accumulation
fn bench_scaled_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaled_add");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("add_minutes", |b| {
        b.iter(|| {
            let mut counter = UnitCounter::new(CounterDomain::Time);
            for i in 0..1000 {
                counter.add_minutes(black_box(i as f64 * 0.01)).ok();
            }
            black_box(counter.seconds())
        });
    });

    group.bench_function("add_kbytes", |b| {
        b.iter(|| {
            let mut counter = UnitCounter::new(CounterDomain::Data);
            for i in 0..1000 {
                counter.add_kbytes(black_box(i as f64 * 0.125)).ok();
            }
            black_box(counter.bytes())
        });
    });

    group.finish();
}

// ============ DISPATCH BENCHMARKS ============

/// Benchmark label classification, known labels and the fallback row
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for label in ["MINUTES", "KBYTES", "EVENTO", "BOGUS"].iter() {
        group.bench_with_input(BenchmarkId::new("classify", label), label, |b, &label| {
            b.iter(|| classify(black_box(Some(label)), black_box(Some("1,234.5"))));
        });
    }

    group.finish();
}

// ============ REGISTRY BENCHMARKS ============

/// Benchmark factor lookup against registries of different sizes
fn bench_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    for size in [10usize, 100, 1000].iter() {
        let mut registry = ConversionRegistry::new();
        for i in 0..*size {
            registry.register(&format!("unit{}", i), "MINUTES", i as f64);
        }

        group.bench_with_input(BenchmarkId::new("hit", size), size, |b, &size| {
            let from = format!("UNIT{}", size / 2);
            b.iter(|| registry.lookup(black_box(&from), black_box("minutes")));
        });

        group.bench_with_input(BenchmarkId::new("miss", size), size, |b, _| {
            b.iter(|| registry.lookup(black_box("KB"), black_box("MB")));
        });
    }

    group.finish();
}

// ============ TEXT BENCHMARKS ============

/// Benchmark rendering and parsing of persisted counters
fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let time = UnitCounter::with_magnitude(CounterDomain::Time, 90_061);
    let rendered = time.to_string();

    group.bench_function("render_time", |b| b.iter(|| black_box(&time).to_string()));
    group.bench_function("parse_time", |b| {
        b.iter(|| black_box(rendered.as_str()).parse::<UnitCounter>())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scaled_add,
    bench_dispatch,
    bench_registry_lookup,
    bench_text
);
criterion_main!(benches);
