// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effects the engine asks its host to apply.

use alloc::string::String;
use kurbo::Vec2;

/// Stable identifier of the backdrop element.
pub const BACKDROP_ID: &str = "vz-bg";

/// Stable identifier of the positioning wrapper element.
pub const WRAPPER_ID: &str = "vz-wrapped-img";

/// Class carried by an element while it is zoomed.
pub const ZOOMED_CLASS: &str = "vz-zoomed";

/// Stacking order of the backdrop.
pub const BACKDROP_Z_INDEX: i32 = 9999;

/// Stacking order of the wrapper, above the backdrop.
pub const WRAPPER_Z_INDEX: i32 = 99999;

/// Cursor affordance on a managed element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Clicking will zoom in.
    ZoomIn,
    /// Clicking will zoom out.
    ZoomOut,
}

impl Cursor {
    /// CSS `cursor` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
        }
    }
}

/// Document-level events that cancel an active zoom.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CancelTriggers {
    /// Clicks anywhere in the document.
    pub click: bool,
    /// Scrolling the document.
    pub scroll: bool,
}

/// A single host-side effect.
///
/// Ops are returned in the order they must be applied. `K` is the host's
/// element key. Hosts should treat ops whose target node is missing as
/// no-ops rather than failures.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoomOp<K> {
    /// Start listening for clicks on the element.
    AttachClickHandler {
        /// Managed element.
        element: K,
    },
    /// Stop listening for clicks on the element.
    DetachClickHandler {
        /// Managed element.
        element: K,
    },
    /// Set the element's inline `cursor`.
    SetCursor {
        /// Managed element.
        element: K,
        /// New affordance.
        cursor: Cursor,
    },
    /// Remove the element's inline `cursor`.
    ClearCursor {
        /// Managed element.
        element: K,
    },
    /// Add or remove [`ZOOMED_CLASS`].
    SetZoomedMarker {
        /// Managed element.
        element: K,
        /// Whether the marker is present.
        zoomed: bool,
    },
    /// Insert a full-viewport fixed backdrop ([`BACKDROP_ID`]) at opacity 0.
    InsertBackdrop {
        /// Element the backdrop belongs to.
        owner: K,
        /// CSS background color.
        color: String,
    },
    /// Set the backdrop opacity.
    SetBackdropOpacity {
        /// Element the backdrop belongs to.
        owner: K,
        /// Opacity in `0.0..=1.0`.
        opacity: f64,
    },
    /// Remove the backdrop.
    RemoveBackdrop {
        /// Element the backdrop belongs to.
        owner: K,
    },
    /// Move the element into a relatively positioned wrapper ([`WRAPPER_ID`]).
    WrapElement {
        /// Managed element.
        element: K,
    },
    /// Set the wrapper's `translate` transform. Only emitted for [`ZoomEffect::Translate`].
    ///
    /// [`ZoomEffect::Translate`]: crate::ZoomEffect::Translate
    SetWrapperTranslation {
        /// Managed element.
        element: K,
        /// Offset in CSS pixels.
        offset: Vec2,
    },
    /// Put the element back where the wrapper was and remove the wrapper.
    UnwrapElement {
        /// Managed element.
        element: K,
    },
    /// Set the element's `scale` transform.
    SetContentScale {
        /// Managed element.
        element: K,
        /// Uniform scale factor.
        scale: f64,
    },
    /// Remove the element's inline transform.
    ClearContentScale {
        /// Managed element.
        element: K,
    },
    /// Block or restore pointer events on the page.
    SetPointerEventsBlocked {
        /// Whether pointer events are blocked.
        blocked: bool,
    },
    /// Start listening for document-level cancel triggers.
    Subscribe {
        /// Triggers to listen for.
        triggers: CancelTriggers,
    },
    /// Stop listening for document-level cancel triggers.
    Unsubscribe {
        /// Triggers to stop listening for.
        triggers: CancelTriggers,
    },
}
