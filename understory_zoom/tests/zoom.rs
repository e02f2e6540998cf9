// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for the `understory_zoom` crate.
//!
//! A small in-memory host applies the emitted ops so the tests can check what
//! a page would look like after each step.

use std::collections::HashMap;

use kurbo::{Rect, Size, Vec2};
use understory_zoom::{
    CancelTriggers, Cursor, DeviceClass, SCROLL_CANCEL_DELAY_MS, ZoomEffect, ZoomOp, ZoomOptions,
    Zoomer,
};

const VIEWPORT: Size = Size::new(1000.0, 800.0);
const IMAGE: Rect = Rect::new(100.0, 100.0, 400.0, 300.0);

#[derive(Clone, Debug, Default, PartialEq)]
struct ElementStyle {
    listening: bool,
    cursor: Option<Cursor>,
    zoomed: bool,
    wrapped: bool,
    wrapper_offset: Option<Vec2>,
    scale: Option<f64>,
}

#[derive(Debug, Default)]
struct Page {
    elements: HashMap<u32, ElementStyle>,
    backdrops: HashMap<u32, f64>,
    pointer_blocked: bool,
    listeners: CancelTriggers,
}

impl Page {
    fn apply(&mut self, ops: Vec<ZoomOp<u32>>) {
        for op in ops {
            match op {
                ZoomOp::AttachClickHandler { element } => {
                    self.elements.entry(element).or_default().listening = true;
                }
                ZoomOp::DetachClickHandler { element } => {
                    self.el(element).listening = false;
                }
                ZoomOp::SetCursor { element, cursor } => self.el(element).cursor = Some(cursor),
                ZoomOp::ClearCursor { element } => self.el(element).cursor = None,
                ZoomOp::SetZoomedMarker { element, zoomed } => self.el(element).zoomed = zoomed,
                ZoomOp::InsertBackdrop { owner, .. } => {
                    assert!(
                        self.backdrops.insert(owner, 0.0).is_none(),
                        "backdrop inserted twice"
                    );
                }
                ZoomOp::SetBackdropOpacity { owner, opacity } => {
                    *self.backdrops.get_mut(&owner).expect("backdrop present") = opacity;
                }
                ZoomOp::RemoveBackdrop { owner } => {
                    self.backdrops.remove(&owner);
                }
                ZoomOp::WrapElement { element } => {
                    let el = self.el(element);
                    assert!(!el.wrapped, "element wrapped twice");
                    el.wrapped = true;
                }
                ZoomOp::SetWrapperTranslation { element, offset } => {
                    let el = self.el(element);
                    assert!(el.wrapped, "translating a missing wrapper");
                    el.wrapper_offset = Some(offset);
                }
                ZoomOp::UnwrapElement { element } => {
                    let el = self.el(element);
                    el.wrapped = false;
                    el.wrapper_offset = None;
                }
                ZoomOp::SetContentScale { element, scale } => self.el(element).scale = Some(scale),
                ZoomOp::ClearContentScale { element } => self.el(element).scale = None,
                ZoomOp::SetPointerEventsBlocked { blocked } => self.pointer_blocked = blocked,
                ZoomOp::Subscribe { triggers } => self.listeners = triggers,
                ZoomOp::Unsubscribe { .. } => self.listeners = CancelTriggers::default(),
            }
        }
    }

    fn el(&mut self, key: u32) -> &mut ElementStyle {
        self.elements.get_mut(&key).expect("element attached")
    }

    fn run_until(&mut self, zoomer: &mut Zoomer<u32>, from: u64, to: u64) {
        for now in (from..=to).step_by(16).chain([to]) {
            self.apply(zoomer.tick(now));
        }
    }
}

fn setup(options: ZoomOptions) -> (Zoomer<u32>, Page) {
    let mut zoomer = Zoomer::new(options, DeviceClass::Regular);
    let mut page = Page::default();
    page.apply(zoomer.attach(1, None));
    page.apply(zoomer.attach(2, None));
    (zoomer, page)
}

#[test]
fn toggling_round_trips_to_the_initial_page() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default());
    let before = page.elements[&1].clone();

    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    page.run_until(&mut zoomer, 0, 300);

    let zoomed = &page.elements[&1];
    assert!(zoomed.zoomed);
    assert_eq!(zoomed.cursor, Some(Cursor::ZoomOut));
    assert_eq!(zoomed.wrapper_offset, Some(Vec2::new(250.0, 200.0)));
    assert_eq!(page.backdrops.get(&1), Some(&1.0));
    assert_eq!(
        page.listeners,
        CancelTriggers {
            click: true,
            scroll: true
        }
    );

    page.apply(zoomer.on_element_click(&1, IMAGE + Vec2::new(250.0, 200.0), VIEWPORT, 1_000));
    assert!(page.pointer_blocked);
    page.run_until(&mut zoomer, 1_000, 1_300);

    assert_eq!(page.elements[&1], before);
    assert!(page.backdrops.is_empty());
    assert!(!page.pointer_blocked);
    assert_eq!(page.listeners, CancelTriggers::default());
    assert!(!zoomer.is_animating());
}

#[test]
fn reverse_takes_exactly_the_time_spent_entering() {
    for cancel_at in [0_u64, 1, 93, 200, 279] {
        let (mut zoomer, mut page) = setup(ZoomOptions::default());
        page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 10_000));
        page.run_until(&mut zoomer, 10_000, 10_000 + cancel_at);
        page.apply(zoomer.on_document_click(10_000 + cancel_at));

        let start = 10_000 + cancel_at;
        if cancel_at > 0 {
            page.apply(zoomer.tick(start + cancel_at - 1));
            assert!(
                page.backdrops.contains_key(&1),
                "reverse finished early for cancel at {cancel_at}"
            );
        }
        page.apply(zoomer.tick(start + cancel_at));
        assert!(
            page.backdrops.is_empty(),
            "reverse still running for cancel at {cancel_at}"
        );
        assert_eq!(page.elements[&1].scale, None);
        assert!(!page.elements[&1].wrapped);
    }
}

#[test]
fn zooming_a_second_element_cancels_the_first() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default());
    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    page.run_until(&mut zoomer, 0, 300);

    page.apply(zoomer.on_element_click(&2, IMAGE, VIEWPORT, 400));
    assert_eq!(zoomer.zoomed(), Some(&2));
    assert!(!page.elements[&1].zoomed);
    assert!(page.elements[&2].zoomed);

    let zoomed_count = page.elements.values().filter(|el| el.zoomed).count();
    assert_eq!(zoomed_count, 1);

    page.run_until(&mut zoomer, 400, 800);
    assert!(!page.backdrops.contains_key(&1));
    assert!(!page.elements[&1].wrapped);
    assert!(page.elements[&2].wrapped);
}

#[test]
fn destroy_mid_zoom_leaves_nothing_behind() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default());
    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    page.run_until(&mut zoomer, 0, 120);

    page.apply(zoomer.destroy());
    assert!(page.backdrops.is_empty());
    for el in page.elements.values() {
        assert_eq!(el, &ElementStyle::default());
    }
    assert!(zoomer.is_empty());
    assert_eq!(zoomer.zoomed(), None);
    assert!(zoomer.destroy().is_empty());
}

#[test]
fn destroy_during_reverse_unblocks_the_page() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default());
    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    page.run_until(&mut zoomer, 0, 300);
    page.apply(zoomer.on_document_click(400));
    assert!(page.pointer_blocked);

    page.apply(zoomer.destroy());
    assert!(!page.pointer_blocked);
    assert!(page.backdrops.is_empty());
}

#[test]
fn scroll_cancel_waits_and_fires_once() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default());
    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    page.run_until(&mut zoomer, 0, 300);

    page.apply(zoomer.on_scroll(1_000));
    page.apply(zoomer.on_scroll(1_050));
    page.apply(zoomer.tick(1_000 + SCROLL_CANCEL_DELAY_MS - 1));
    assert_eq!(zoomer.zoomed(), Some(&1));

    let ops = zoomer.tick(1_000 + SCROLL_CANCEL_DELAY_MS);
    let unmarks = ops
        .iter()
        .filter(|op| matches!(op, ZoomOp::SetZoomedMarker { zoomed: false, .. }))
        .count();
    assert_eq!(unmarks, 1);
    page.apply(ops);
    assert_eq!(zoomer.zoomed(), None);

    page.run_until(&mut zoomer, 1_195, 1_600);
    assert!(page.backdrops.is_empty());
}

#[test]
fn scroll_is_ignored_when_disabled_or_idle() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default().with_cancel_on_scroll(false));
    page.apply(zoomer.on_scroll(0));
    assert!(!zoomer.is_animating());

    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    assert!(!page.listeners.scroll);
    page.run_until(&mut zoomer, 0, 300);
    page.apply(zoomer.on_scroll(400));
    page.run_until(&mut zoomer, 400, 1_000);
    assert_eq!(zoomer.zoomed(), Some(&1));
}

#[test]
fn click_during_reverse_zooms_back_in_without_duplicate_scaffolding() {
    let (mut zoomer, mut page) = setup(ZoomOptions::default());
    page.apply(zoomer.on_element_click(&1, IMAGE, VIEWPORT, 0));
    page.run_until(&mut zoomer, 0, 300);
    page.apply(zoomer.on_document_click(1_000));
    page.run_until(&mut zoomer, 1_000, 1_100);

    // The image is still partly translated; the engine removes its own offset.
    let offset = page.elements[&1].wrapper_offset.expect("wrapper still translated");
    page.apply(zoomer.on_element_click(&1, IMAGE + offset, VIEWPORT, 1_100));
    page.run_until(&mut zoomer, 1_100, 1_400);

    let el = &page.elements[&1];
    assert!(el.zoomed);
    let landed = el.wrapper_offset.expect("wrapper translated");
    assert!((landed - Vec2::new(250.0, 200.0)).hypot() < 1e-9);
    assert_eq!(page.backdrops.get(&1), Some(&1.0));
    assert!(!page.pointer_blocked);
}

#[test]
fn scale_effect_scales_in_place_on_compact_devices() {
    let options = ZoomOptions::default().with_effect(ZoomEffect::Scale);
    let mut zoomer = Zoomer::new(options, DeviceClass::Compact);
    let mut page = Page::default();
    page.apply(zoomer.attach(1, None));

    let narrow = Size::new(375.0, 700.0);
    let image = Rect::new(0.0, 0.0, 300.0, 200.0);
    page.apply(zoomer.on_element_click(&1, image, narrow, 0));
    page.run_until(&mut zoomer, 0, 300);

    let el = &page.elements[&1];
    assert!(el.wrapped);
    assert_eq!(el.wrapper_offset, None, "scale effect never moves the wrapper");
    assert_eq!(el.scale, Some(1.25));
}
