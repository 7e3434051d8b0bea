// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mediatime_core::num::{RationalRate, Rounding};
use mediatime_core::range::Range;
use mediatime_core::time::{Duration, Instant};
use std::hint::black_box;

fn rates() -> Vec<(&'static str, RationalRate)> {
    vec![
        ("25", RationalRate::new(25, 1).unwrap()),
        ("30000/1001", RationalRate::new(30000, 1001).unwrap()),
        ("48000", RationalRate::new(48000, 1).unwrap()),
        ("wide", RationalRate::new(u64::MAX - 1, u64::MAX - 2).unwrap()),
    ]
}

fn bench_to_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_count");
    // One hour past the epoch keeps the products inside 128 bits. The `wide`
    // case is measured far from the epoch to force the arbitrary-precision
    // fallback while the count still fits in an `i64`.
    let near = Instant::new(3600, 123_456_789).unwrap();
    let far = Instant::new(1_000_000_000_000_000_000, 123_456_789).unwrap();
    for (label, rate) in rates() {
        let t = if label == "wide" { far } else { near };
        group.bench_with_input(BenchmarkId::from_parameter(label), &rate, |b, rate| {
            b.iter(|| black_box(t).to_count(black_box(*rate), Rounding::Nearest))
        });
    }
    group.finish();
}

fn bench_from_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_count");
    for (label, rate) in rates() {
        group.bench_with_input(BenchmarkId::from_parameter(label), &rate, |b, rate| {
            b.iter(|| Duration::from_count(black_box(90_000), black_box(*rate)))
        });
    }
    group.finish();
}

fn bench_at_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("at_rate");
    let range = Range::closed_open(Instant::EPOCH, Instant::new(60, 0).unwrap());
    for (label, rate) in rates().into_iter().take(3) {
        let len = range.at_rate(rate).map(|it| it.len()).unwrap_or(0);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &rate, |b, rate| {
            b.iter(|| {
                let iter = range
                    .at_rate(black_box(*rate))
                    .unwrap_or_else(|e| panic!("Benchmark configuration error: {e}"));
                iter.fold(0_u64, |acc, t| acc ^ t.nanoseconds() as u64)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_to_count, bench_from_count, bench_at_rate);
criterion_main!(benches);
