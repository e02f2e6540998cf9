// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element zoom state machine.
//!
//! A [`ZoomSession`] is either idle or zooming. Zooming in starts three
//! property runs at once (backdrop opacity, wrapper translation, content
//! scale); zooming out reverses all three. The runs are independent and only
//! meet again in [`ZoomSession::tick`], which turns their samples into
//! [`ZoomOp`]s.

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};
use understory_timing::Deadline;

use crate::geometry::{DeviceClass, center_translation, fill_scale};
use crate::op::{CancelTriggers, Cursor, ZoomOp};
use crate::options::{SCROLL_CANCEL_DELAY_MS, ZoomOptions};
use crate::property::{Phase, PropertyController, PropertySample};

/// Whether a session's element is zoomed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// At rest, or animating back to rest.
    #[default]
    Idle,
    /// Zoomed in, or animating towards it.
    Zooming,
}

/// Zoom state bound to one element.
#[derive(Clone, Debug)]
pub struct ZoomSession<K> {
    element: K,
    options: ZoomOptions,
    state: SessionState,
    backdrop: PropertyController<f64>,
    translation: PropertyController<Vec2>,
    scale: PropertyController<f64>,
    backdrop_inserted: bool,
    wrapped: bool,
    scroll_cancel: Deadline,
}

impl<K: Clone> ZoomSession<K> {
    /// Create an idle session for `element`.
    pub fn new(element: K, options: ZoomOptions) -> Self {
        let scale_origin = options.effect.scale_origin();
        Self {
            element,
            options,
            state: SessionState::Idle,
            backdrop: PropertyController::new(0.0),
            translation: PropertyController::new(Vec2::ZERO),
            scale: PropertyController::new(scale_origin),
            backdrop_inserted: false,
            wrapped: false,
            scroll_cancel: Deadline::new(),
        }
    }

    /// The managed element.
    pub fn element(&self) -> &K {
        &self.element
    }

    /// Options this session was created with.
    pub fn options(&self) -> &ZoomOptions {
        &self.options
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` while zoomed.
    pub fn is_zoomed(&self) -> bool {
        self.state == SessionState::Zooming
    }

    /// Returns `true` while any property run or the scroll debounce is pending.
    pub fn is_animating(&self) -> bool {
        self.backdrop.is_animating()
            || self.translation.is_animating()
            || self.scale.is_animating()
            || self.scroll_cancel.is_armed()
    }

    /// Milliseconds the most recent forward run has consumed.
    ///
    /// Still reported once the reverse run has finished, until the next zoom in.
    pub fn elapsed_forward(&self) -> u64 {
        self.backdrop.consumed_ms()
    }

    /// Last backdrop opacity written.
    pub fn backdrop_opacity(&self) -> f64 {
        self.backdrop.value()
    }

    /// Last wrapper translation written.
    pub fn translation(&self) -> Vec2 {
        self.translation.value()
    }

    /// Last content scale written.
    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    /// Ops that put an element under management.
    pub(crate) fn attach(&self, ops: &mut Vec<ZoomOp<K>>) {
        ops.push(ZoomOp::AttachClickHandler {
            element: self.element.clone(),
        });
        ops.push(ZoomOp::SetCursor {
            element: self.element.clone(),
            cursor: Cursor::ZoomIn,
        });
    }

    fn triggers(&self) -> CancelTriggers {
        CancelTriggers {
            click: true,
            scroll: self.options.cancel_on_scroll,
        }
    }

    /// Zoom in at `now`.
    ///
    /// `element_rect` is the element's box in viewport coordinates as
    /// currently laid out. Any translation this session applied is removed
    /// before the recentering vector is computed, so zooming back in during
    /// a reverse run still lands at the viewport center.
    ///
    /// Returns `false` if already zooming.
    pub fn zoom_in(
        &mut self,
        now: u64,
        element_rect: Rect,
        viewport: Size,
        device: DeviceClass,
        ops: &mut Vec<ZoomOp<K>>,
    ) -> bool {
        if self.is_zoomed() {
            return false;
        }
        self.state = SessionState::Zooming;
        let element = self.element.clone();

        ops.push(ZoomOp::SetZoomedMarker {
            element: element.clone(),
            zoomed: true,
        });
        ops.push(ZoomOp::SetCursor {
            element: element.clone(),
            cursor: Cursor::ZoomOut,
        });
        if !self.backdrop_inserted {
            self.backdrop_inserted = true;
            ops.push(ZoomOp::InsertBackdrop {
                owner: element.clone(),
                color: self.options.backdrop_color.clone(),
            });
        }
        if !self.wrapped {
            self.wrapped = true;
            ops.push(ZoomOp::WrapElement {
                element: element.clone(),
            });
        }

        let effect = self.options.effect;
        let resting_rect = element_rect - self.translation.value();
        let scale_target = self.options.explicit_scale.unwrap_or_else(|| {
            fill_scale(
                resting_rect.width(),
                viewport.width,
                self.options.viewport_fill_percent,
                device,
            )
        });
        let translation_target = if effect.recenters() {
            center_translation(resting_rect, viewport)
        } else {
            Vec2::ZERO
        };

        if self.backdrop.phase() == Phase::Exiting {
            ops.push(ZoomOp::SetPointerEventsBlocked { blocked: false });
        }
        let duration = self.options.duration_ms;
        self.backdrop.animate_in(now, 0.0, 1.0, duration);
        self.translation
            .animate_in(now, Vec2::ZERO, translation_target, duration);
        self.scale
            .animate_in(now, effect.scale_origin(), scale_target, duration);

        ops.push(ZoomOp::Subscribe {
            triggers: self.triggers(),
        });
        log::debug!(
            "zoom in: {effect:?} to scale {scale_target:.3}, offset ({:.1}, {:.1}) over {duration}ms",
            translation_target.x,
            translation_target.y
        );
        true
    }

    /// Zoom out at `now`, reversing whatever the forward runs achieved.
    ///
    /// Returns `false` if not zooming.
    pub fn zoom_out(&mut self, now: u64, ops: &mut Vec<ZoomOp<K>>) -> bool {
        if !self.is_zoomed() {
            return false;
        }
        self.state = SessionState::Idle;
        self.scroll_cancel.cancel();
        let element = self.element.clone();

        ops.push(ZoomOp::SetZoomedMarker {
            element: element.clone(),
            zoomed: false,
        });
        ops.push(ZoomOp::SetCursor {
            element,
            cursor: Cursor::ZoomIn,
        });
        ops.push(ZoomOp::Unsubscribe {
            triggers: self.triggers(),
        });

        if self.backdrop.animate_out(now) {
            ops.push(ZoomOp::SetPointerEventsBlocked { blocked: true });
        }
        self.translation.animate_out(now);
        self.scale.animate_out(now);
        log::debug!(
            "zoom out: reversing over {}ms",
            self.backdrop.consumed_ms()
        );
        true
    }

    /// Arm the scroll cancel debounce at `now`.
    ///
    /// Returns `true` only for the scroll that armed it; later scrolls before
    /// it fires neither reset nor duplicate it.
    pub fn request_scroll_cancel(&mut self, now: u64) -> bool {
        if !self.is_zoomed() || !self.options.cancel_on_scroll {
            return false;
        }
        self.scroll_cancel.arm(now, SCROLL_CANCEL_DELAY_MS)
    }

    /// Returns `true` once when a pending scroll cancel is due.
    pub(crate) fn poll_scroll_cancel(&mut self, now: u64) -> bool {
        self.scroll_cancel.poll(now)
    }

    /// Advance all property runs to `now`.
    pub fn tick(&mut self, now: u64, ops: &mut Vec<ZoomOp<K>>) {
        match self.backdrop.sample(now) {
            Some(PropertySample::Set(opacity)) => ops.push(ZoomOp::SetBackdropOpacity {
                owner: self.element.clone(),
                opacity,
            }),
            Some(PropertySample::Clear) => {
                self.backdrop_inserted = false;
                ops.push(ZoomOp::RemoveBackdrop {
                    owner: self.element.clone(),
                });
                ops.push(ZoomOp::SetPointerEventsBlocked { blocked: false });
            }
            None => {}
        }
        match self.translation.sample(now) {
            // The scale effect never moves the wrapper.
            Some(PropertySample::Set(offset)) if self.options.effect.recenters() => {
                ops.push(ZoomOp::SetWrapperTranslation {
                    element: self.element.clone(),
                    offset,
                });
            }
            Some(PropertySample::Set(_)) => {}
            Some(PropertySample::Clear) => {
                self.wrapped = false;
                ops.push(ZoomOp::UnwrapElement {
                    element: self.element.clone(),
                });
            }
            None => {}
        }
        match self.scale.sample(now) {
            Some(PropertySample::Set(scale)) => ops.push(ZoomOp::SetContentScale {
                element: self.element.clone(),
                scale,
            }),
            Some(PropertySample::Clear) => ops.push(ZoomOp::ClearContentScale {
                element: self.element.clone(),
            }),
            None => {}
        }
    }

    /// Tear everything down immediately and release the element.
    pub(crate) fn teardown(&mut self, ops: &mut Vec<ZoomOp<K>>) {
        let element = self.element.clone();
        if self.is_zoomed() {
            ops.push(ZoomOp::SetZoomedMarker {
                element: element.clone(),
                zoomed: false,
            });
            ops.push(ZoomOp::Unsubscribe {
                triggers: self.triggers(),
            });
        }
        if self.backdrop_inserted {
            ops.push(ZoomOp::RemoveBackdrop {
                owner: element.clone(),
            });
            if self.backdrop.phase() == Phase::Exiting {
                ops.push(ZoomOp::SetPointerEventsBlocked { blocked: false });
            }
        }
        if self.wrapped {
            ops.push(ZoomOp::UnwrapElement {
                element: element.clone(),
            });
        }
        if self.scale.phase() != Phase::Rest {
            ops.push(ZoomOp::ClearContentScale {
                element: element.clone(),
            });
        }
        ops.push(ZoomOp::DetachClickHandler {
            element: element.clone(),
        });
        ops.push(ZoomOp::ClearCursor { element });

        self.backdrop.reset();
        self.translation.reset();
        self.scale.reset();
        self.scroll_cancel.cancel();
        self.backdrop_inserted = false;
        self.wrapped = false;
        self.state = SessionState::Idle;
    }
}
