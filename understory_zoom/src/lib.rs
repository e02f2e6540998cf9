// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: a headless click-to-zoom transition engine for images.
//!
//! Clicking a managed image animates it into an enlarged presentation: a
//! dimming backdrop fades in, the image is moved to the viewport center, and
//! it is scaled up to fill part of the viewport. A second click, a click
//! anywhere else, or a scroll reverses the transition.
//!
//! The crate owns the state and the timing, not the DOM. Hosts feed it
//! events and monotonic timestamps and apply the [`ZoomOp`]s it returns:
//!
//! - [`Zoomer`]: the set of managed elements. One entry point per host event
//!   ([`Zoomer::on_element_click`], [`Zoomer::on_document_click`],
//!   [`Zoomer::on_scroll`]), plus [`Zoomer::tick`] once per animation frame
//!   and [`Zoomer::destroy`] for teardown.
//! - [`ZoomSession`]: the idle/zooming state machine for one element.
//! - [`PropertyController`]: one animated value with forward and
//!   time-symmetric reverse runs, built on [`understory_timing::Ticker`].
//! - [`ZoomRegistry`]: which element, if any, is currently zoomed.
//! - [`center_translation`] and [`fill_scale`]: the zoom geometry.
//!
//! ## Time symmetry
//!
//! Reverse runs last exactly as long as the forward run actually took. A zoom
//! cancelled 90 ms into a 279 ms transition takes 90 ms to undo, starting from
//! the values that were on screen at the moment of cancellation.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_zoom::{DeviceClass, ZoomOp, ZoomOptions, Zoomer};
//!
//! let mut zoomer = Zoomer::new(ZoomOptions::default(), DeviceClass::Regular);
//! zoomer.attach("hero", None);
//!
//! let viewport = Size::new(1000.0, 800.0);
//! let image = Rect::new(100.0, 100.0, 400.0, 300.0);
//!
//! // Zoom in at t = 0 and let the transition finish.
//! let ops = zoomer.on_element_click(&"hero", image, viewport, 0);
//! assert!(ops.contains(&ZoomOp::WrapElement { element: "hero" }));
//! zoomer.tick(279);
//! assert_eq!(zoomer.zoomed(), Some(&"hero"));
//!
//! // Click outside: the reverse run takes the same 279 ms.
//! zoomer.on_document_click(1_000);
//! let ops = zoomer.tick(1_279);
//! assert!(ops.contains(&ZoomOp::UnwrapElement { element: "hero" }));
//! assert!(!zoomer.is_animating());
//! ```
//!
//! ## Logging
//!
//! Transitions are reported through the [`log`] facade at `debug` level and
//! ignored requests at `trace` level. No logger is installed by this crate.
//!
//! This crate is `no_std` (with `alloc`). The default `std` feature adds
//! `classify_user_agent`, which matches user agents with `regex`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
mod device;
mod geometry;
mod interpolate;
mod op;
mod options;
mod property;
mod registry;
mod session;
mod zoomer;

#[cfg(feature = "std")]
pub use device::classify_user_agent;
pub use geometry::{DeviceClass, center_translation, fill_scale};
pub use interpolate::{Interpolate, progress};
pub use op::{
    BACKDROP_ID, BACKDROP_Z_INDEX, CancelTriggers, Cursor, WRAPPER_ID, WRAPPER_Z_INDEX,
    ZOOMED_CLASS, ZoomOp,
};
pub use options::{
    DEFAULT_BACKDROP_COLOR, DEFAULT_DURATION_MS, DEFAULT_ZOOM_PERCENTAGE, ParseScaleError,
    ParseZoomEffectError, SCROLL_CANCEL_DELAY_MS, ZoomEffect, ZoomOptions, parse_scale_attribute,
};
pub use property::{Phase, PropertyController, PropertySample};
pub use registry::ZoomRegistry;
pub use session::{SessionState, ZoomSession};
pub use zoomer::Zoomer;
