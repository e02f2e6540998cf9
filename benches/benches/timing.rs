// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_timing::{Deadline, Tick, Ticker};

fn bench_ticker_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/ticker_run");
    // Sample a full run at 60 Hz until it reports completion.
    for duration in [279_u64, 2_000] {
        group.bench_with_input(BenchmarkId::from_parameter(duration), &duration, |b, &duration| {
            b.iter(|| {
                let mut ticker = Ticker::new();
                ticker.start(0, duration);
                let mut now = 0;
                loop {
                    now += 16;
                    if let Some(Tick::Complete { elapsed }) = ticker.sample(black_box(now)) {
                        break black_box(elapsed);
                    }
                }
            });
        });
    }
    group.finish();
}

fn bench_deadline_debounce(c: &mut Criterion) {
    // A burst of scroll events re-arming a 195 ms debounce every 4 ms.
    c.bench_function("timing/deadline_burst", |b| {
        b.iter(|| {
            let mut deadline = Deadline::new();
            let mut fired = 0_u32;
            for now in (0..400_u64).step_by(4) {
                black_box(deadline.arm(now, 195));
                if deadline.poll(black_box(now)) {
                    fired += 1;
                }
            }
            black_box(fired)
        });
    });
}

criterion_group!(benches, bench_ticker_run, bench_deadline_debounce);
criterion_main!(benches);
