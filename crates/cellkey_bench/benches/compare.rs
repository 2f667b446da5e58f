//! Cell comparator benchmarks.

use cellkey_bench::{generate_cells, random_catalog_row, random_data};
use cellkey_core::{
    compare_catalog_rows, compare_segments, sort_cells, AnyCell, Cell, CellBuilder, CellComparator,
    Segment, CATALOG, STANDARD,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// One row held in both backings.
fn row_pair(size: usize) -> (AnyCell, AnyCell) {
    let row = random_data(size);
    let builder = CellBuilder::new(&row).family("cf").qualifier("q");
    (
        builder.clone().build_array().unwrap().into(),
        builder.build_buffer().unwrap().into(),
    )
}

/// Benchmark raw segment comparison across backings.
fn bench_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");

    for size in [8usize, 64, 512].iter() {
        let (array, buffer) = row_pair(*size);
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("array_array", size), size, |b, _| {
            let other = array.clone();
            b.iter(|| compare_segments(black_box(array.row()), black_box(other.row())));
        });

        group.bench_with_input(BenchmarkId::new("array_buffer", size), size, |b, _| {
            b.iter(|| compare_segments(black_box(array.row()), black_box(buffer.row())));
        });

        group.bench_with_input(BenchmarkId::new("buffer_buffer", size), size, |b, _| {
            let other = buffer.clone();
            b.iter(|| compare_segments(black_box(buffer.row()), black_box(other.row())));
        });
    }

    group.finish();
}

/// Benchmark full cell comparison.
fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    // Same row and column: every step up to the sequence id runs.
    let newer: AnyCell = CellBuilder::new("row-0001")
        .family("cf")
        .qualifier("q")
        .timestamp(200)
        .build_array()
        .unwrap()
        .into();
    let older: AnyCell = CellBuilder::new("row-0001")
        .family("cf")
        .qualifier("q")
        .timestamp(100)
        .build_buffer()
        .unwrap()
        .into();

    group.bench_function("same_column", |b| {
        b.iter(|| STANDARD.compare(black_box(&newer), black_box(&older), false));
    });

    group.bench_function("identity", |b| {
        b.iter(|| STANDARD.compare(black_box(&newer), black_box(&newer), false));
    });

    let cells = generate_cells(1_000, 16);
    group.bench_function("random_pairs", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let left = &cells[idx % cells.len()];
            let right = &cells[(idx * 7 + 3) % cells.len()];
            idx += 1;
            black_box(STANDARD.compare(left, right, false))
        });
    });

    group.finish();
}

/// Benchmark catalog rows against plain byte order.
fn bench_catalog_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_rows");

    let left = random_catalog_row("usertable");
    let right = random_catalog_row("usertable");

    group.bench_function("catalog", |b| {
        b.iter(|| {
            compare_catalog_rows(
                black_box(Segment::from_slice(&left)),
                black_box(Segment::from_slice(&right)),
            )
        });
    });

    group.bench_function("standard", |b| {
        b.iter(|| {
            compare_segments(
                black_box(Segment::from_slice(&left)),
                black_box(Segment::from_slice(&right)),
            )
        });
    });

    group.finish();
}

/// Benchmark sorting a batch of cells.
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for count in [1_000usize, 10_000].iter() {
        let cells = generate_cells(*count, 16);
        group.throughput(Throughput::Elements(*count as u64));

        for comparator in [&STANDARD as &dyn CellComparator, &CATALOG] {
            group.bench_with_input(
                BenchmarkId::new(comparator.kind().to_string(), count),
                count,
                |b, _| {
                    b.iter_batched(
                        || cells.clone(),
                        |mut batch| {
                            sort_cells(comparator, &mut batch);
                            black_box(batch)
                        },
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_segments,
    bench_compare,
    bench_catalog_rows,
    bench_sort,
);

criterion_main!(benches);
