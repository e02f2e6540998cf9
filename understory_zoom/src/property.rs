// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated property controllers.
//!
//! A [`PropertyController`] owns one animated value and one [`Ticker`]. It
//! animates forward from an origin to a target, and back from wherever it
//! currently is to the origin, over exactly the time the forward run consumed.
//! Cancelling a half-finished zoom therefore reverses in the same time it took
//! to get there.
//!
//! The controller remembers the last value it produced, so a reverse run
//! starts from what is actually on screen rather than from an assumed target.

use understory_timing::{Tick, Ticker};

use crate::interpolate::{Interpolate, progress};

/// What the host should do with the property after a sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PropertySample<T> {
    /// Write this value.
    Set(T),
    /// The reverse run finished; remove the property so no residual style remains.
    Clear,
}

/// Where a controller is in its forward/reverse cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No run; the property sits at its rest value.
    #[default]
    Rest,
    /// Forward run in flight.
    Entering,
    /// Forward run finished; holding the target value.
    Entered,
    /// Reverse run in flight.
    Exiting,
}

/// Drives one property through forward and time-symmetric reverse runs.
#[derive(Clone, Debug)]
pub struct PropertyController<T> {
    ticker: Ticker,
    phase: Phase,
    origin: T,
    from: T,
    to: T,
    value: T,
    run_duration: u64,
    consumed: u64,
}

impl<T: Interpolate> PropertyController<T> {
    /// Create a controller resting at `rest`.
    pub fn new(rest: T) -> Self {
        Self {
            ticker: Ticker::new(),
            phase: Phase::Rest,
            origin: rest,
            from: rest,
            to: rest,
            value: rest,
            run_duration: 0,
            consumed: 0,
        }
    }

    /// Start a forward run at `now` from `origin` to `target` over `duration` milliseconds.
    ///
    /// Any run in progress is cancelled first. If a reverse run was in flight,
    /// the forward run resumes from the current value instead of jumping back
    /// to `origin`.
    pub fn animate_in(&mut self, now: u64, origin: T, target: T, duration: u64) {
        if self.phase == Phase::Exiting {
            self.catch_up(now);
        } else {
            self.value = origin;
        }
        self.origin = origin;
        self.from = self.value;
        self.to = target;
        self.run_duration = duration;
        self.consumed = 0;
        self.phase = Phase::Entering;
        self.ticker.start(now, duration);
    }

    /// Start a reverse run at `now` back to the origin.
    ///
    /// The run lasts as long as the forward run actually took, up to `now`.
    /// Returns `false` without doing anything if there is no forward run to
    /// reverse.
    pub fn animate_out(&mut self, now: u64) -> bool {
        match self.phase {
            Phase::Entering => self.catch_up(now),
            Phase::Entered => {}
            Phase::Rest | Phase::Exiting => return false,
        }
        self.from = self.value;
        self.to = self.origin;
        self.run_duration = self.consumed;
        self.phase = Phase::Exiting;
        self.ticker.start(now, self.consumed);
        true
    }

    /// Advance to `now`, returning what to write, or `None` when idle.
    pub fn sample(&mut self, now: u64) -> Option<PropertySample<T>> {
        match self.ticker.sample(now)? {
            Tick::Running { elapsed } => {
                self.value = self
                    .from
                    .interpolate(self.to, progress(elapsed, self.run_duration));
                if self.phase == Phase::Entering {
                    self.consumed = elapsed;
                }
                Some(PropertySample::Set(self.value))
            }
            Tick::Complete { elapsed } => {
                if self.phase == Phase::Exiting {
                    self.settle();
                    Some(PropertySample::Clear)
                } else {
                    self.value = self.to;
                    self.consumed = elapsed;
                    self.phase = Phase::Entered;
                    Some(PropertySample::Set(self.value))
                }
            }
        }
    }

    /// Cancel any run and snap to the rest value without emitting anything.
    pub fn reset(&mut self) {
        self.ticker.stop();
        self.settle();
        self.consumed = 0;
    }

    /// Last value written.
    pub fn value(&self) -> T {
        self.value
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Milliseconds the latest forward run has consumed.
    ///
    /// While exiting this is the length of the reverse run. The figure is kept
    /// after the reverse run ends, until the next forward run or [`reset`].
    ///
    /// [`reset`]: Self::reset
    pub fn consumed_ms(&self) -> u64 {
        self.consumed
    }

    /// Returns `true` while a run is in flight.
    pub fn is_animating(&self) -> bool {
        self.ticker.is_running()
    }

    /// Bring `value` and `consumed` up to date with the active run at `now`.
    fn catch_up(&mut self, now: u64) {
        let Some(elapsed) = self.ticker.elapsed(now) else {
            return;
        };
        self.value = self
            .from
            .interpolate(self.to, progress(elapsed, self.run_duration));
        if self.phase == Phase::Entering {
            self.consumed = elapsed;
        }
    }

    fn settle(&mut self) {
        self.value = self.origin;
        self.from = self.origin;
        self.to = self.origin;
        self.run_duration = 0;
        self.phase = Phase::Rest;
    }
}
