//! Benchmark: window computation on the scroll hot path.
//!
//! Run with: `cargo bench -p lexiscope-core --bench window_bench`
//!
//! The computation runs once per frame during a scroll; the interesting
//! number is the single-call latency, plus a sweep that mimics a fast
//! flick through a large list.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lexiscope_core::{WindowParams, WindowState};

fn bench_single_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_compute");
    let params = WindowParams::default();

    group.bench_function("origin", |b| {
        b.iter(|| black_box(params.compute(black_box(0.0), 640.0, 1000)));
    });

    group.bench_function("deep_scroll", |b| {
        b.iter(|| black_box(params.compute(black_box(3_200_000.0), 640.0, 1_000_000)));
    });

    group.bench_function("stale_after_shrink", |b| {
        b.iter(|| black_box(params.compute(black_box(3200.0), 640.0, 3)));
    });

    group.bench_function("full_snapshot", |b| {
        b.iter(|| {
            black_box(WindowState::from_inputs(
                &params,
                black_box(3200.0),
                640.0,
                1000,
            ))
        });
    });

    group.finish();
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_sweep");
    let params = WindowParams::default();

    // 1000 frames of a flick through a 100k-item list.
    group.bench_function("1000_frames_100k_items", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for frame in 0..1000u32 {
                let offset = f64::from(frame) * 3_197.0;
                acc = acc.wrapping_add(params.compute(offset, 640.0, 100_000).start_index);
            }
            black_box(acc)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_compute, bench_scroll_sweep);
criterion_main!(benches);
