// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom configuration and the parsers for its string forms.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Nominal forward duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 279;

/// Viewport fraction filled on regular devices, in percent.
pub const DEFAULT_ZOOM_PERCENTAGE: f64 = 50.0;

/// Backdrop fill used when none is configured.
pub const DEFAULT_BACKDROP_COLOR: &str = "rgb(0, 0, 0)";

/// Delay between the first qualifying scroll and the cancel it triggers.
pub const SCROLL_CANCEL_DELAY_MS: u64 = 195;

/// Which transition a zoom plays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoomEffect {
    /// Bring the element to the viewport center while scaling it from its natural size.
    #[default]
    Translate,
    /// Grow the element in place from nothing to the target scale.
    Scale,
}

impl ZoomEffect {
    /// Scale the content starts from when zooming in and returns to when zooming out.
    pub fn scale_origin(self) -> f64 {
        match self {
            Self::Translate => 1.0,
            Self::Scale => 0.0,
        }
    }

    /// Returns `true` if the transition moves the element to the viewport center.
    pub fn recenters(self) -> bool {
        matches!(self, Self::Translate)
    }
}

/// Error returned when a string is not a known [`ZoomEffect`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseZoomEffectError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseZoomEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown zoom effect {:?}, expected \"translate\" or \"scale\"",
            self.input
        )
    }
}

impl core::error::Error for ParseZoomEffectError {}

impl FromStr for ZoomEffect {
    type Err = ParseZoomEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("translate") {
            Ok(Self::Translate)
        } else if trimmed.eq_ignore_ascii_case("scale") {
            Ok(Self::Scale)
        } else {
            Err(ParseZoomEffectError { input: s.into() })
        }
    }
}

/// Error returned by [`parse_scale_attribute`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParseScaleError {
    /// The attribute is not a number.
    NotANumber,
    /// The number is NaN, infinite, zero, or negative.
    OutOfRange(f64),
}

impl fmt::Display for ParseScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => f.write_str("scale attribute is not a number"),
            Self::OutOfRange(v) => write!(f, "scale {v} must be finite and positive"),
        }
    }
}

impl core::error::Error for ParseScaleError {}

/// Parse a per-element explicit scale, such as the value of `data-vzoom-scale`.
///
/// ```rust
/// use understory_zoom::{ParseScaleError, parse_scale_attribute};
///
/// assert_eq!(parse_scale_attribute(" 2.5 "), Ok(2.5));
/// assert_eq!(parse_scale_attribute("big"), Err(ParseScaleError::NotANumber));
/// ```
pub fn parse_scale_attribute(value: &str) -> Result<f64, ParseScaleError> {
    let scale: f64 = value
        .trim()
        .parse()
        .map_err(|_| ParseScaleError::NotANumber)?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(ParseScaleError::OutOfRange(scale))
    }
}

/// Options shared by every element a [`Zoomer`](crate::Zoomer) manages.
///
/// Each session takes its own copy at attach time and never observes later changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomOptions {
    /// Transition variant.
    pub effect: ZoomEffect,
    /// Nominal forward duration in milliseconds.
    pub duration_ms: u64,
    /// CSS color of the backdrop.
    pub backdrop_color: String,
    /// Whether a scroll while zoomed cancels the zoom.
    pub cancel_on_scroll: bool,
    /// Percentage of the viewport width the zoomed element fills on regular devices.
    pub viewport_fill_percent: f64,
    /// Scale that overrides the computed geometry.
    pub explicit_scale: Option<f64>,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            effect: ZoomEffect::default(),
            duration_ms: DEFAULT_DURATION_MS,
            backdrop_color: DEFAULT_BACKDROP_COLOR.into(),
            cancel_on_scroll: true,
            viewport_fill_percent: DEFAULT_ZOOM_PERCENTAGE,
            explicit_scale: None,
        }
    }
}

impl ZoomOptions {
    /// Set the transition variant.
    #[must_use]
    pub fn with_effect(mut self, effect: ZoomEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the forward duration in milliseconds.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the backdrop CSS color.
    #[must_use]
    pub fn with_backdrop_color(mut self, color: impl Into<String>) -> Self {
        self.backdrop_color = color.into();
        self
    }

    /// Enable or disable the scroll cancel trigger.
    #[must_use]
    pub fn with_cancel_on_scroll(mut self, enabled: bool) -> Self {
        self.cancel_on_scroll = enabled;
        self
    }

    /// Set the viewport fill percentage, clamped to `0..=100`.
    ///
    /// NaN is ignored.
    #[must_use]
    pub fn with_viewport_fill_percent(mut self, percent: f64) -> Self {
        if !percent.is_nan() {
            self.viewport_fill_percent = percent.clamp(0.0, 100.0);
        }
        self
    }

    /// Set a scale that overrides the computed geometry.
    #[must_use]
    pub fn with_explicit_scale(mut self, scale: Option<f64>) -> Self {
        self.explicit_scale = scale;
        self
    }
}
