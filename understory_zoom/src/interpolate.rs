// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear interpolation shared by every animated property.

use kurbo::Vec2;

/// A value that can be linearly interpolated.
pub trait Interpolate: Copy {
    /// Value at fraction `t` of the way from `self` to `to`.
    ///
    /// `t = 0.0` yields `self` and `t = 1.0` yields `to`.
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// Fraction of `duration` covered by `elapsed`, in `0.0..=1.0`.
///
/// A zero duration counts as finished.
pub fn progress(elapsed: u64, duration: u64) -> f64 {
    if duration == 0 || elapsed >= duration {
        1.0
    } else {
        elapsed as f64 / duration as f64
    }
}
