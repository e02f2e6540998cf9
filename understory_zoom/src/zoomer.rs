// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of managed elements and the routing of host events to them.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Rect, Size};

use crate::geometry::DeviceClass;
use crate::op::ZoomOp;
use crate::options::ZoomOptions;
use crate::registry::ZoomRegistry;
use crate::session::ZoomSession;

/// Owns one [`ZoomSession`] per managed element and the [`ZoomRegistry`].
///
/// Every entry point takes the current time and returns the ops the host
/// must apply, in order. At most one element is zoomed at a time: clicking a
/// second element while another is zoomed first starts the other's reverse
/// run.
#[derive(Debug)]
pub struct Zoomer<K> {
    options: ZoomOptions,
    device: DeviceClass,
    sessions: Vec<ZoomSession<K>>,
    index: HashMap<K, usize>,
    registry: ZoomRegistry<K>,
    pointer_blocks: usize,
}

impl<K: Clone + Eq + Hash> Zoomer<K> {
    /// Create an empty zoomer.
    pub fn new(options: ZoomOptions, device: DeviceClass) -> Self {
        Self {
            options,
            device,
            sessions: Vec::new(),
            index: HashMap::new(),
            registry: ZoomRegistry::new(),
            pointer_blocks: 0,
        }
    }

    /// Shared options.
    pub fn options(&self) -> &ZoomOptions {
        &self.options
    }

    /// Device class used for fill-scale computation.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Number of managed elements.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no element is managed.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// The zoomed element.
    pub fn zoomed(&self) -> Option<&K> {
        self.registry.active()
    }

    /// Session of a managed element.
    pub fn session(&self, key: &K) -> Option<&ZoomSession<K>> {
        self.index.get(key).map(|&idx| &self.sessions[idx])
    }

    /// Returns `true` while any session needs further ticks.
    pub fn is_animating(&self) -> bool {
        self.sessions.iter().any(ZoomSession::is_animating)
    }

    /// Start managing `key`, with an optional per-element scale override.
    ///
    /// Attaching a key twice is a no-op.
    pub fn attach(&mut self, key: K, explicit_scale: Option<f64>) -> Vec<ZoomOp<K>> {
        let mut ops = Vec::new();
        if self.index.contains_key(&key) {
            log::trace!("attach ignored: element already managed");
            return ops;
        }
        let options = self
            .options
            .clone()
            .with_explicit_scale(explicit_scale.or(self.options.explicit_scale));
        let session = ZoomSession::new(key.clone(), options);
        session.attach(&mut ops);
        self.index.insert(key, self.sessions.len());
        self.sessions.push(session);
        ops
    }

    /// Handle a click on a managed element's image.
    ///
    /// Toggles the element. The host must not also report this click through
    /// [`Zoomer::on_document_click`]; doing so would cancel the zoom it just
    /// started.
    pub fn on_element_click(
        &mut self,
        key: &K,
        element_rect: Rect,
        viewport: Size,
        now: u64,
    ) -> Vec<ZoomOp<K>> {
        let mut ops = Vec::new();
        let Some(&idx) = self.index.get(key) else {
            log::trace!("click ignored: element not managed");
            return ops;
        };

        if self.sessions[idx].is_zoomed() {
            self.sessions[idx].zoom_out(now, &mut ops);
            self.registry.clear_if(key);
        } else {
            if let Some(previous) = self.registry.active().cloned() {
                log::debug!("zoom target changed: cancelling previous element");
                self.cancel(&previous, now, &mut ops);
            }
            if self.sessions[idx].zoom_in(now, element_rect, viewport, self.device, &mut ops) {
                self.registry.set(key.clone());
            }
        }
        self.route_pointer_blocks(ops)
    }

    /// Handle a click anywhere in the document outside a managed image.
    pub fn on_document_click(&mut self, now: u64) -> Vec<ZoomOp<K>> {
        let mut ops = Vec::new();
        match self.registry.active().cloned() {
            Some(active) => self.cancel(&active, now, &mut ops),
            None => log::trace!("document click ignored: nothing zoomed"),
        }
        self.route_pointer_blocks(ops)
    }

    /// Handle a document scroll.
    ///
    /// The first scroll while zoomed schedules a cancel
    /// [`SCROLL_CANCEL_DELAY_MS`](crate::SCROLL_CANCEL_DELAY_MS) later; it is
    /// carried out by [`Zoomer::tick`]. This never emits ops directly.
    pub fn on_scroll(&mut self, now: u64) -> Vec<ZoomOp<K>> {
        if let Some(&idx) = self.registry.active().and_then(|key| self.index.get(key)) {
            if self.sessions[idx].request_scroll_cancel(now) {
                log::debug!("scroll cancel scheduled");
            }
        }
        Vec::new()
    }

    /// Advance every session to `now`.
    pub fn tick(&mut self, now: u64) -> Vec<ZoomOp<K>> {
        let mut ops = Vec::new();
        let mut due = Vec::new();
        for session in &mut self.sessions {
            if session.poll_scroll_cancel(now) {
                due.push(session.element().clone());
            }
        }
        for key in &due {
            log::debug!("scroll cancel fired");
            self.cancel(key, now, &mut ops);
        }
        for session in &mut self.sessions {
            session.tick(now, &mut ops);
        }
        self.route_pointer_blocks(ops)
    }

    /// Stop managing every element, tearing down any zoom immediately.
    ///
    /// Leaves no backdrop, wrapper, inline transform, or cursor behind.
    /// Calling it again yields no ops.
    pub fn destroy(&mut self) -> Vec<ZoomOp<K>> {
        let mut ops = Vec::new();
        if !self.sessions.is_empty() {
            log::debug!("destroying {} zoom sessions", self.sessions.len());
        }
        for session in &mut self.sessions {
            session.teardown(&mut ops);
        }
        self.sessions.clear();
        self.index.clear();
        self.registry.clear();
        self.route_pointer_blocks(ops)
    }

    fn cancel(&mut self, key: &K, now: u64, ops: &mut Vec<ZoomOp<K>>) {
        if let Some(&idx) = self.index.get(key) {
            self.sessions[idx].zoom_out(now, ops);
        }
        self.registry.clear_if(key);
    }

    /// Collapse per-session pointer blocking into one page-wide block.
    ///
    /// Overlapping backdrop fades each ask for a block; the page is unblocked
    /// only when the last of them finishes.
    fn route_pointer_blocks(&mut self, ops: Vec<ZoomOp<K>>) -> Vec<ZoomOp<K>> {
        let mut routed = Vec::with_capacity(ops.len());
        for op in ops {
            match op {
                ZoomOp::SetPointerEventsBlocked { blocked: true } => {
                    self.pointer_blocks += 1;
                    if self.pointer_blocks == 1 {
                        routed.push(op);
                    }
                }
                ZoomOp::SetPointerEventsBlocked { blocked: false } => {
                    if self.pointer_blocks == 0 {
                        continue;
                    }
                    self.pointer_blocks -= 1;
                    if self.pointer_blocks == 0 {
                        routed.push(op);
                    }
                }
                _ => routed.push(op),
            }
        }
        routed
    }
}
