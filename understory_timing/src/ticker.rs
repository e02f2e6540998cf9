// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-duration sampling runs.

/// What a [`Ticker`] observed when sampled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The run is still in progress; `elapsed` is strictly less than the duration.
    Running {
        /// Milliseconds since the run started.
        elapsed: u64,
    },
    /// The run reached its duration. Reported once; `elapsed` is clamped to the duration.
    Complete {
        /// The run's duration in milliseconds.
        elapsed: u64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Run {
    start: u64,
    duration: u64,
}

/// Samples elapsed time over a single run of fixed duration.
///
/// At most one run is active at a time. Starting a new run replaces the
/// previous one without reporting its completion.
#[derive(Clone, Debug, Default)]
pub struct Ticker {
    run: Option<Run>,
}

impl Ticker {
    /// Create an idle ticker.
    pub const fn new() -> Self {
        Self { run: None }
    }

    /// Begin a run at `now` lasting `duration` milliseconds.
    ///
    /// A zero duration completes on the first sample.
    pub fn start(&mut self, now: u64, duration: u64) {
        self.run = Some(Run {
            start: now,
            duration,
        });
    }

    /// Cancel the active run, if any. Idempotent.
    pub fn stop(&mut self) {
        self.run = None;
    }

    /// Returns `true` while a run is active.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Duration of the active run.
    pub fn duration(&self) -> Option<u64> {
        self.run.map(|run| run.duration)
    }

    /// Elapsed time of the active run at `now`, clamped to its duration.
    ///
    /// Does not advance the run or report completion.
    pub fn elapsed(&self, now: u64) -> Option<u64> {
        self.run
            .map(|run| now.saturating_sub(run.start).min(run.duration))
    }

    /// Sample the active run at `now`.
    ///
    /// Returns `None` when idle. Once the elapsed time reaches the duration the
    /// run ends and [`Tick::Complete`] is returned exactly once.
    pub fn sample(&mut self, now: u64) -> Option<Tick> {
        let run = self.run?;
        let elapsed = now.saturating_sub(run.start);
        if elapsed >= run.duration {
            self.run = None;
            Some(Tick::Complete {
                elapsed: run.duration,
            })
        } else {
            Some(Tick::Running { elapsed })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_ticker_samples_nothing() {
        let mut ticker = Ticker::new();
        assert!(!ticker.is_running());
        assert_eq!(ticker.sample(10), None);
        assert_eq!(ticker.elapsed(10), None);
    }

    #[test]
    fn reports_progress_then_completes_once() {
        let mut ticker = Ticker::new();
        ticker.start(100, 50);

        assert_eq!(ticker.sample(100), Some(Tick::Running { elapsed: 0 }));
        assert_eq!(ticker.sample(149), Some(Tick::Running { elapsed: 49 }));
        assert_eq!(ticker.sample(180), Some(Tick::Complete { elapsed: 50 }));
        assert_eq!(ticker.sample(181), None);
        assert!(!ticker.is_running());
    }

    #[test]
    fn zero_duration_completes_on_first_sample() {
        let mut ticker = Ticker::new();
        ticker.start(5, 0);
        assert_eq!(ticker.sample(5), Some(Tick::Complete { elapsed: 0 }));
        assert_eq!(ticker.sample(6), None);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut ticker = Ticker::new();
        ticker.start(0, 10);
        ticker.stop();
        ticker.stop();
        assert_eq!(ticker.sample(5), None);
    }

    #[test]
    fn restart_replaces_previous_run() {
        let mut ticker = Ticker::new();
        ticker.start(0, 100);
        ticker.start(40, 10);

        assert_eq!(ticker.duration(), Some(10));
        assert_eq!(ticker.sample(45), Some(Tick::Running { elapsed: 5 }));
        assert_eq!(ticker.sample(50), Some(Tick::Complete { elapsed: 10 }));
    }

    #[test]
    fn timestamps_before_start_count_as_zero() {
        let mut ticker = Ticker::new();
        ticker.start(100, 20);
        assert_eq!(ticker.elapsed(90), Some(0));
        assert_eq!(ticker.sample(90), Some(Tick::Running { elapsed: 0 }));
    }

    #[test]
    fn elapsed_is_clamped_and_side_effect_free() {
        let mut ticker = Ticker::new();
        ticker.start(0, 20);
        assert_eq!(ticker.elapsed(500), Some(20));
        assert!(ticker.is_running());
        assert_eq!(ticker.sample(500), Some(Tick::Complete { elapsed: 20 }));
    }
}
