// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for the single outstanding animation frame request.

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "Driven by the wasm32 frame loop; unit tested on every target.")
)]

/// Tracks the id of the pending `requestAnimationFrame` call, if any.
///
/// At most one request is outstanding. The id is kept so teardown can cancel
/// it before the callback it names is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FrameRequest {
    pending: Option<i32>,
}

impl FrameRequest {
    /// Whether a new request should be made.
    pub(crate) fn wants_request(&self, animating: bool) -> bool {
        animating && self.pending.is_none()
    }

    /// Record the id returned by `requestAnimationFrame`.
    pub(crate) fn requested(&mut self, id: i32) {
        self.pending = Some(id);
    }

    /// The requested frame ran; its id is no longer valid.
    pub(crate) fn fired(&mut self) {
        self.pending = None;
    }

    /// Take the pending id for `cancelAnimationFrame`.
    pub(crate) fn take(&mut self) -> Option<i32> {
        self.pending.take()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_only_while_animating_and_idle() {
        let mut frame = FrameRequest::default();
        assert!(!frame.wants_request(false));
        assert!(frame.wants_request(true));
        frame.requested(7);
        assert!(!frame.wants_request(true));
        frame.fired();
        assert!(frame.wants_request(true));
    }

    #[test]
    fn teardown_takes_the_pending_id_once() {
        let mut frame = FrameRequest::default();
        frame.requested(42);
        assert!(frame.is_pending());
        assert_eq!(frame.take(), Some(42));
        assert_eq!(frame.take(), None);
        assert!(!frame.is_pending());
    }

    #[test]
    fn fired_frame_leaves_nothing_to_cancel() {
        let mut frame = FrameRequest::default();
        frame.requested(3);
        frame.fired();
        assert_eq!(frame.take(), None);
    }
}
