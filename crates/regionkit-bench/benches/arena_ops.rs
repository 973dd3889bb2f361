//! Criterion micro-benchmarks for region allocation, rollback, and reset.

use std::alloc::Layout;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use regionkit_arena::{Region, RegionConfig};
use regionkit_bench::{frame_capacity, frame_sizes};
use regionkit_core::{Allocator, SystemAllocator};

const FRAME_ALLOCS: usize = 1_000;
const MAX_SIZE: usize = 256;

/// Benchmark: 1K handle-path allocations, then roll the frame back.
fn bench_region_frame_1k(c: &mut Criterion) {
    let sizes = frame_sizes(FRAME_ALLOCS, MAX_SIZE, 42);
    let mut region = Region::new(frame_capacity(&sizes), false).unwrap();

    c.bench_function("region_frame_1k", |b| {
        b.iter(|| {
            let frame = region.checkpoint();
            for &size in &sizes {
                black_box(region.allocate(size));
            }
            region.rollback(frame).unwrap();
        });
    });
}

/// Benchmark: the same 1K blocks from the system allocator, freed one by one.
fn bench_system_frame_1k(c: &mut Criterion) {
    let sizes = frame_sizes(FRAME_ALLOCS, MAX_SIZE, 42);
    let mut blocks = Vec::with_capacity(sizes.len());

    c.bench_function("system_frame_1k", |b| {
        b.iter(|| {
            for &size in &sizes {
                let layout = Layout::from_size_align(size, 1).unwrap();
                blocks.push((SystemAllocator.alloc(layout).unwrap(), layout));
            }
            for (ptr, layout) in blocks.drain(..) {
                // SAFETY: every block came from SystemAllocator with this layout.
                black_box(unsafe { SystemAllocator.release(ptr, layout) });
            }
        });
    });
}

/// Benchmark: shared-path (typed) allocations through `&Region`.
fn bench_region_shared_1k(c: &mut Criterion) {
    let sizes = frame_sizes(FRAME_ALLOCS, MAX_SIZE, 7);
    let capacity = sizes.iter().map(|s| s + 8).sum();
    let mut region = Region::with_config(RegionConfig::new(capacity)).unwrap();

    c.bench_function("region_shared_1k", |b| {
        b.iter(|| {
            let frame = region.checkpoint();
            {
                let shared = &region;
                for &size in &sizes {
                    let layout = Layout::from_size_align(size, 8).unwrap();
                    black_box(shared.alloc(layout).unwrap());
                }
            }
            region.rollback(frame).unwrap();
        });
    });
}

/// Benchmark: a resettable region cycling through frames by exhaustion.
fn bench_region_auto_reset(c: &mut Criterion) {
    let sizes = frame_sizes(FRAME_ALLOCS, MAX_SIZE, 42);
    let mut region = Region::new(frame_capacity(&sizes) / 4, true).unwrap();

    c.bench_function("region_auto_reset", |b| {
        b.iter(|| {
            for &size in &sizes {
                black_box(region.allocate(size));
            }
        });
    });
}

/// Benchmark: nested checkpoints, as in a recursive pass.
fn bench_region_nested_rollback(c: &mut Criterion) {
    let mut region = Region::new(64 * 1024, false).unwrap();

    c.bench_function("region_nested_rollback", |b| {
        b.iter(|| {
            let mut markers = Vec::with_capacity(16);
            for depth in 0..16 {
                markers.push(region.checkpoint());
                black_box(region.allocate(64 + depth));
            }
            while let Some(marker) = markers.pop() {
                region.rollback(marker).unwrap();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_region_frame_1k,
    bench_system_frame_1k,
    bench_region_shared_1k,
    bench_region_auto_reset,
    bench_region_nested_rollback
);
criterion_main!(benches);
