// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom geometry: where the element goes and how large it gets.
//!
//! All inputs are in viewport (CSS pixel) coordinates. The functions are pure
//! and know nothing about the host; device classification is passed in as a
//! [`DeviceClass`] so callers can plug in whatever heuristic suits them.

use kurbo::{Point, Rect, Size, Vec2};

/// Coarse device classification used by [`fill_scale`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Small screen or touch device; zoomed content fills the full viewport width.
    Compact,
    /// Anything else; zoomed content fills the configured viewport fraction.
    #[default]
    Regular,
}

impl DeviceClass {
    /// Returns `true` for [`DeviceClass::Compact`].
    pub fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }

    /// Classify by viewport width: anything narrower than `breakpoint` is compact.
    pub fn from_viewport_width(viewport_width: f64, breakpoint: f64) -> Self {
        if viewport_width < breakpoint {
            Self::Compact
        } else {
            Self::Regular
        }
    }
}

/// Vector that moves the center of `element` to the center of a viewport of `viewport` size.
///
/// ```rust
/// use kurbo::{Rect, Size, Vec2};
/// use understory_zoom::center_translation;
///
/// let element = Rect::new(0.0, 0.0, 100.0, 50.0);
/// let offset = center_translation(element, Size::new(800.0, 600.0));
/// assert_eq!(offset, Vec2::new(350.0, 275.0));
/// ```
pub fn center_translation(element: Rect, viewport: Size) -> Vec2 {
    let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    viewport_center - element.center()
}

/// Scale that makes an element of `element_width` fill the viewport horizontally.
///
/// Compact devices fill the whole width; regular devices fill `fill_percent`
/// of it. A degenerate element width yields `1.0`, leaving the element as is.
///
/// ```rust
/// use understory_zoom::{DeviceClass, fill_scale};
///
/// assert_eq!(fill_scale(300.0, 375.0, 50.0, DeviceClass::Compact), 1.25);
/// assert_eq!(fill_scale(250.0, 1000.0, 50.0, DeviceClass::Regular), 2.0);
/// ```
pub fn fill_scale(
    element_width: f64,
    viewport_width: f64,
    fill_percent: f64,
    device: DeviceClass,
) -> f64 {
    if !element_width.is_finite() || element_width <= 0.0 {
        return 1.0;
    }
    let target_width = if device.is_compact() {
        viewport_width
    } else {
        viewport_width * fill_percent / 100.0
    };
    target_width / element_width
}
