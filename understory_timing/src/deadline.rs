// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot timers.

/// A one-shot timer.
///
/// Arming a pending deadline is a no-op, so a burst of triggers produces a
/// single firing measured from the first one. This is the shape of a
/// leading-edge debounce.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<u64>,
}

impl Deadline {
    /// Create a disarmed deadline.
    pub const fn new() -> Self {
        Self { due: None }
    }

    /// Arm the deadline to fire `delay` milliseconds after `now`.
    ///
    /// Returns `false` and keeps the existing due time if already armed.
    pub fn arm(&mut self, now: u64, delay: u64) -> bool {
        if self.due.is_some() {
            return false;
        }
        self.due = Some(now.saturating_add(delay));
        true
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Returns `true` while armed.
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Time at which the deadline fires, if armed.
    pub fn due(&self) -> Option<u64> {
        self.due
    }

    /// Returns `true` exactly once, on the first poll at or after the due time.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
