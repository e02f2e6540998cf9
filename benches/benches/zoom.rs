// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_zoom::{DeviceClass, ZoomOptions, Zoomer};

const VIEWPORT: Size = Size::new(1280.0, 800.0);
const IMAGE: Rect = Rect::new(40.0, 60.0, 440.0, 360.0);

fn zoomer_with(len: u32) -> Zoomer<u32> {
    let mut zoomer = Zoomer::new(ZoomOptions::default(), DeviceClass::Regular);
    for key in 0..len {
        zoomer.attach(key, None);
    }
    zoomer
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/cycle");

    // One zoom in and out at 60 Hz; the cost should not depend on how many
    // idle elements are managed beyond the per-tick session scan.
    for len in [1_u32, 64, 1_024] {
        group.bench_with_input(BenchmarkId::new("click_tick_cancel", len), &len, |b, &len| {
            b.iter_batched(
                || zoomer_with(len),
                |mut zoomer| {
                    let mut now = 0;
                    black_box(zoomer.on_element_click(&0, IMAGE, VIEWPORT, now));
                    while zoomer.is_animating() {
                        now += 16;
                        black_box(zoomer.tick(now));
                    }
                    black_box(zoomer.on_document_click(now));
                    while zoomer.is_animating() {
                        now += 16;
                        black_box(zoomer.tick(now));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_idle_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom/idle_tick");
    for len in [64_u32, 1_024] {
        let mut zoomer = zoomer_with(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| black_box(zoomer.tick(black_box(1_000))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_cycle, bench_idle_tick);
criterion_main!(benches);
