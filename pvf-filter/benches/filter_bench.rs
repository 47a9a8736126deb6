//! Filter Throughput Benchmark
//!
//! Measures decode + validate + aggregate + sort over a synthetic pageview
//! log, and the sorter alone over a large title map.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pvf_common::sort::sort_records;
use pvf_common::{check_all_rules, decode, RuleSet};
use pvf_filter::run;
use std::collections::HashMap;
use std::io::Cursor;

fn synthetic_log(lines: usize) -> String {
    let templates = [
        "en Article_{} 12 3400",
        "en.m Article_{} 3 900",
        "en User%3AName_{} 1 200",
        "fr Article_{} 7 1000",
        "en File_{}.png 2 100",
        "en lower_{} 1 10",
    ];
    (0..lines)
        .map(|i| templates[i % templates.len()].replace("{}", &(i % 5000).to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_filter_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_run");

    for lines in [10_000usize, 100_000] {
        let log = synthetic_log(lines);
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &log, |b, log| {
            b.iter(|| {
                let report = run(RuleSet::default(), Cursor::new(log.as_bytes())).unwrap();
                black_box(report.records.len());
            });
        });
    }

    group.finish();
}

fn bench_decode_and_rules(c: &mut Criterion) {
    let lines: Vec<String> = synthetic_log(1_000).lines().map(str::to_string).collect();

    c.bench_function("decode_check_all_rules", |b| {
        b.iter(|| {
            let accepted = lines
                .iter()
                .filter(|line| check_all_rules(&decode(line)))
                .count();
            black_box(accepted);
        });
    });
}

fn bench_sort(c: &mut Criterion) {
    let records: HashMap<String, u64> = (0..50_000u64)
        .map(|i| (format!("Title_{}", i), i % 97))
        .collect();

    c.bench_function("sort_records_50k", |b| {
        b.iter(|| black_box(sort_records(&records)));
    });
}

criterion_group!(benches, bench_filter_run, bench_decode_and_rules, bench_sort);
criterion_main!(benches);
