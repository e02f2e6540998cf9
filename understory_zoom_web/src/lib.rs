// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_web --heading-base-level=0

//! Browser DOM backend for `understory_zoom`.
//!
//! On `wasm32` this crate binds a [`understory_zoom::Zoomer`] to the page:
//! it queries the managed images with a CSS selector, reads per-image
//! `data-vzoom-scale` overrides, classifies the device from
//! `navigator.userAgent`, wires click and scroll listeners, drives the
//! transition from `requestAnimationFrame`, and applies the resulting ops to
//! the DOM. On other targets the crate is empty.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn zoom_gallery() -> Result<understory_zoom_web::ZoomHandle, wasm_bindgen::JsValue> {
//!     use understory_zoom::{ZoomEffect, ZoomOptions};
//!     let options = ZoomOptions::default()
//!         .with_effect(ZoomEffect::Translate)
//!         .with_backdrop_color("rgba(0, 0, 0, 0.8)");
//!     understory_zoom_web::init(".gallery img", options)
//! }
//! ```
//!
//! From JavaScript the same entry point takes a plain options object with
//! the fields `zoomEffect`, `duration`, `backgroundColor`, `scrollToCancel`
//! and `zoomPercentage`; unknown or malformed fields keep their defaults.
//!
//! Notes:
//! - Cleanup is best-effort: an op whose node has disappeared (for example a
//!   wrapper removed by other page code) is skipped.
//! - Timestamps come from `performance.now()`, truncated to milliseconds.

#[cfg(target_arch = "wasm32")]
mod dom;
mod frame;

#[cfg(target_arch = "wasm32")]
pub use dom::{ZoomHandle, init, init_js, options_from_js};

/// Attribute carrying a per-element scale override.
pub const SCALE_ATTRIBUTE: &str = "data-vzoom-scale";
