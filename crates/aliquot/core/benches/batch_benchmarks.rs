// Aliquot
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Batch engine benchmarks
//!
//! Sieve construction, single-value factorization and full batches at several
//! worker counts.

use aliquot_core::{BatchConfig, BatchCoordinator, PrimeTable, ResultRow};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");
    for limit in [1_000i64, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| b.iter(|| PrimeTable::sieve(black_box(limit)).unwrap()));
    }
    group.finish();
}

fn bench_rows(c: &mut Criterion) {
    let table = PrimeTable::for_upper_bound(1_000_000_000_000).unwrap();
    let mut group = c.benchmark_group("row");

    // highly composite, large prime and semiprime with two ~10^6 factors
    for n in [963_761_198_400u64, 999_999_999_989, 999_985_999_949] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| b.iter(|| ResultRow::compute(black_box(n), &table).unwrap()));
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let upper_bound = 200_000u64;
    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(upper_bound));
    group.sample_size(10);

    for workers in [1usize, 2, 4, 8] {
        let coordinator = BatchCoordinator::new(BatchConfig::new(upper_bound).with_workers(workers)).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| b.iter(|| coordinator.run().unwrap()));
    }
    group.finish();
}

criterion_group!(batch_benches, bench_sieve, bench_rows, bench_batch);
criterion_main!(batch_benches);
