// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `web-sys` glue: listeners, the frame loop, and op application.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use kurbo::{Point, Rect, Size};
use understory_zoom::{
    BACKDROP_ID, BACKDROP_Z_INDEX, CancelTriggers, WRAPPER_ID, WRAPPER_Z_INDEX, ZOOMED_CLASS,
    ZoomOp, ZoomOptions, Zoomer, classify_user_agent, parse_scale_attribute,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, MouseEvent, Node, Window};

use crate::SCALE_ATTRIBUTE;
use crate::frame::FrameRequest;

type Listener = Closure<dyn FnMut(Event)>;

struct Page {
    zoomer: Zoomer<u32>,
    window: Window,
    document: Document,
    elements: Vec<HtmlElement>,
    element_clicks: Vec<Closure<dyn FnMut(MouseEvent)>>,
    document_click: Option<Listener>,
    document_scroll: Option<Listener>,
    frame: Option<Closure<dyn FnMut(f64)>>,
    frame_request: FrameRequest,
    backdrops: HashMap<u32, HtmlElement>,
    wrappers: HashMap<u32, HtmlElement>,
}

impl Page {
    fn now(&self) -> u64 {
        self.window
            .performance()
            .map_or(0, |performance| millis(performance.now()))
    }

    fn viewport(&self) -> Size {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Size::new(width, height)
    }

    /// Layout box of the element, centered where it is currently drawn.
    fn element_rect(&self, key: u32) -> Option<Rect> {
        let element = self.elements.get(key as usize)?;
        let bounds = element.get_bounding_client_rect();
        let center = Point::new(
            bounds.left() + bounds.width() / 2.0,
            bounds.top() + bounds.height() / 2.0,
        );
        let size = Size::new(
            f64::from(element.offset_width()),
            f64::from(element.offset_height()),
        );
        Some(Rect::from_center_size(center, size))
    }

    fn apply(&mut self, ops: Vec<ZoomOp<u32>>) {
        for op in ops {
            self.apply_one(op);
        }
    }

    fn apply_one(&mut self, op: ZoomOp<u32>) {
        match op {
            ZoomOp::AttachClickHandler { element } => {
                if let (Some(el), Some(cb)) = (
                    self.elements.get(element as usize),
                    self.element_clicks.get(element as usize),
                ) {
                    let _ = el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
                }
            }
            ZoomOp::DetachClickHandler { element } => {
                if let (Some(el), Some(cb)) = (
                    self.elements.get(element as usize),
                    self.element_clicks.get(element as usize),
                ) {
                    let _ =
                        el.remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
                }
            }
            ZoomOp::SetCursor { element, cursor } => {
                if let Some(el) = self.elements.get(element as usize) {
                    let _ = el.style().set_property("cursor", cursor.as_css());
                }
            }
            ZoomOp::ClearCursor { element } => {
                if let Some(el) = self.elements.get(element as usize) {
                    let _ = el.style().remove_property("cursor");
                }
            }
            ZoomOp::SetZoomedMarker { element, zoomed } => {
                if let Some(el) = self.elements.get(element as usize) {
                    let classes = el.class_list();
                    let _ = if zoomed {
                        classes.add_1(ZOOMED_CLASS)
                    } else {
                        classes.remove_1(ZOOMED_CLASS)
                    };
                }
            }
            ZoomOp::InsertBackdrop { owner, color } => {
                let Some(backdrop) = self.create_div(BACKDROP_ID) else {
                    return;
                };
                let _ = backdrop.set_attribute(
                    "style",
                    &format!(
                        "position: fixed; top: 0; left: 0; right: 0; bottom: 0; \
                         background-color: {color}; z-index: {BACKDROP_Z_INDEX}; opacity: 0;"
                    ),
                );
                if let Some(body) = self.document.body() {
                    let _ = body.append_child(&backdrop);
                    self.backdrops.insert(owner, backdrop);
                }
            }
            ZoomOp::SetBackdropOpacity { owner, opacity } => {
                if let Some(backdrop) = self.backdrops.get(&owner) {
                    let _ = backdrop
                        .style()
                        .set_property("opacity", &opacity.to_string());
                }
            }
            ZoomOp::RemoveBackdrop { owner } => {
                if let Some(backdrop) = self.backdrops.remove(&owner) {
                    backdrop.remove();
                }
            }
            ZoomOp::WrapElement { element } => {
                let Some(el) = self.elements.get(element as usize) else {
                    return;
                };
                let Some(parent) = el.parent_node() else {
                    log::warn!("cannot wrap a detached element");
                    return;
                };
                let Some(wrapper) = self.create_div(WRAPPER_ID) else {
                    return;
                };
                wrapper.style().set_css_text(&format!(
                    "position: relative; z-index: {WRAPPER_Z_INDEX};"
                ));
                let anchor: &Node = el;
                if parent.insert_before(&wrapper, Some(anchor)).is_ok() {
                    let _ = wrapper.append_child(el);
                    self.wrappers.insert(element, wrapper);
                }
            }
            ZoomOp::SetWrapperTranslation { element, offset } => {
                if let Some(wrapper) = self.wrappers.get(&element) {
                    let _ = wrapper.style().set_property(
                        "transform",
                        &format!("translate({}px, {}px)", offset.x, offset.y),
                    );
                }
            }
            ZoomOp::UnwrapElement { element } => {
                let (Some(wrapper), Some(el)) = (
                    self.wrappers.remove(&element),
                    self.elements.get(element as usize),
                ) else {
                    return;
                };
                if let Some(parent) = wrapper.parent_node() {
                    let anchor: &Node = &wrapper;
                    let _ = parent.insert_before(el, Some(anchor));
                }
                wrapper.remove();
            }
            ZoomOp::SetContentScale { element, scale } => {
                if let Some(el) = self.elements.get(element as usize) {
                    let _ = el
                        .style()
                        .set_property("transform", &format!("scale({scale})"));
                }
            }
            ZoomOp::ClearContentScale { element } => {
                if let Some(el) = self.elements.get(element as usize) {
                    let _ = el.style().remove_property("transform");
                }
            }
            ZoomOp::SetPointerEventsBlocked { blocked } => {
                if let Some(body) = self.document.body() {
                    let style = body.style();
                    let _ = if blocked {
                        style.set_property("pointer-events", "none")
                    } else {
                        style.remove_property("pointer-events").map(drop)
                    };
                }
            }
            ZoomOp::Subscribe { triggers } => self.set_document_listeners(triggers, true),
            ZoomOp::Unsubscribe { triggers } => self.set_document_listeners(triggers, false),
        }
    }

    fn create_div(&self, id: &str) -> Option<HtmlElement> {
        let div = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        div.set_id(id);
        Some(div)
    }

    fn set_document_listeners(&self, triggers: CancelTriggers, enabled: bool) {
        let listeners = [
            ("click", triggers.click, &self.document_click),
            ("scroll", triggers.scroll, &self.document_scroll),
        ];
        for (event, wanted, listener) in listeners {
            let (true, Some(listener)) = (wanted, listener) else {
                continue;
            };
            let callback = listener.as_ref().unchecked_ref();
            let _ = if enabled {
                self.document
                    .add_event_listener_with_callback(event, callback)
            } else {
                self.document
                    .remove_event_listener_with_callback(event, callback)
            };
        }
    }

    fn request_frame(&mut self) {
        if !self.frame_request.wants_request(self.zoomer.is_animating()) {
            return;
        }
        if let Some(frame) = &self.frame {
            if let Ok(id) = self
                .window
                .request_animation_frame(frame.as_ref().unchecked_ref())
            {
                self.frame_request.requested(id);
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame_request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "performance.now() is a non-negative millisecond count well inside u64."
)]
fn millis(now: f64) -> u64 {
    now.max(0.0) as u64
}

/// Handle returned by [`init`]; keeps listeners alive until destroyed.
#[wasm_bindgen]
#[derive(Debug)]
pub struct ZoomHandle {
    page: Rc<RefCell<Page>>,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("zoomer", &self.zoomer)
            .field("elements", &self.elements.len())
            .field("frame_pending", &self.frame_request.is_pending())
            .finish_non_exhaustive()
    }
}

#[wasm_bindgen]
impl ZoomHandle {
    /// Remove all listeners and restore every managed element. Idempotent.
    pub fn destroy(&self) {
        let mut page = self.page.borrow_mut();
        page.cancel_frame();
        let ops = page.zoomer.destroy();
        page.apply(ops);
        page.set_document_listeners(
            CancelTriggers {
                click: true,
                scroll: true,
            },
            false,
        );
    }
}

impl Drop for ZoomHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Manage every element matching `selector`.
pub fn init(selector: &str, options: ZoomOptions) -> Result<ZoomHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let device = window
        .navigator()
        .user_agent()
        .map(|ua| classify_user_agent(&ua))
        .unwrap_or_default();

    let mut elements = Vec::new();
    let nodes = document.query_selector_all(selector)?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            elements.push(el);
        }
    }

    let page = Rc::new(RefCell::new(Page {
        zoomer: Zoomer::new(options, device),
        window,
        document,
        elements,
        element_clicks: Vec::new(),
        document_click: None,
        document_scroll: None,
        frame: None,
        frame_request: FrameRequest::default(),
        backdrops: HashMap::new(),
        wrappers: HashMap::new(),
    }));
    let weak = Rc::downgrade(&page);

    {
        let mut state = page.borrow_mut();
        let count = u32::try_from(state.elements.len())
            .map_err(|_| JsValue::from_str("too many elements"))?;
        state.element_clicks = (0..count).map(|key| element_click(&weak, key)).collect();
        state.document_click = Some(document_listener(&weak, |zoomer, now| {
            zoomer.on_document_click(now)
        }));
        state.document_scroll = Some(document_listener(&weak, |zoomer, now| zoomer.on_scroll(now)));
        state.frame = Some(frame_callback(&weak));

        for key in 0..count {
            let scale = state.elements[key as usize]
                .get_attribute(SCALE_ATTRIBUTE)
                .and_then(|value| match parse_scale_attribute(&value) {
                    Ok(scale) => Some(scale),
                    Err(err) => {
                        log::warn!("ignoring {SCALE_ATTRIBUTE}: {err}");
                        None
                    }
                });
            let ops = state.zoomer.attach(key, scale);
            state.apply(ops);
        }
    }

    Ok(ZoomHandle { page })
}

/// JavaScript entry point: `init(selector, { zoomEffect, duration, ... })`.
#[wasm_bindgen(js_name = init)]
pub fn init_js(selector: &str, options: JsValue) -> Result<ZoomHandle, JsValue> {
    init(selector, options_from_js(&options))
}

/// Read [`ZoomOptions`] from a plain JavaScript object.
pub fn options_from_js(value: &JsValue) -> ZoomOptions {
    let mut options = ZoomOptions::default();
    if !value.is_object() {
        return options;
    }
    let field = |name: &str| Reflect::get(value, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED);

    if let Some(effect) = field("zoomEffect").as_string() {
        match effect.parse() {
            Ok(effect) => options = options.with_effect(effect),
            Err(err) => log::warn!("{err}"),
        }
    }
    if let Some(duration) = field("duration").as_f64() {
        if duration.is_finite() && duration >= 0.0 {
            options = options.with_duration_ms(millis(duration));
        }
    }
    if let Some(color) = field("backgroundColor").as_string() {
        options = options.with_backdrop_color(color);
    }
    if let Some(enabled) = field("scrollToCancel").as_bool() {
        options = options.with_cancel_on_scroll(enabled);
    }
    if let Some(percent) = field("zoomPercentage").as_f64() {
        options = options.with_viewport_fill_percent(percent);
    }
    options
}

fn element_click(page: &Weak<RefCell<Page>>, key: u32) -> Closure<dyn FnMut(MouseEvent)> {
    let page = page.clone();
    Closure::new(move |event: MouseEvent| {
        // Keep the document listener from treating this as an outside click.
        event.stop_propagation();
        let Some(page) = page.upgrade() else {
            return;
        };
        let mut page = page.borrow_mut();
        let Some(rect) = page.element_rect(key) else {
            return;
        };
        let (viewport, now) = (page.viewport(), page.now());
        let ops = page.zoomer.on_element_click(&key, rect, viewport, now);
        page.apply(ops);
        page.request_frame();
    })
}

fn document_listener(
    page: &Weak<RefCell<Page>>,
    handler: fn(&mut Zoomer<u32>, u64) -> Vec<ZoomOp<u32>>,
) -> Listener {
    let page = page.clone();
    Closure::new(move |_: Event| {
        let Some(page) = page.upgrade() else {
            return;
        };
        let mut page = page.borrow_mut();
        let now = page.now();
        let ops = handler(&mut page.zoomer, now);
        page.apply(ops);
        page.request_frame();
    })
}

fn frame_callback(page: &Weak<RefCell<Page>>) -> Closure<dyn FnMut(f64)> {
    let page = page.clone();
    Closure::new(move |timestamp: f64| {
        let Some(page) = page.upgrade() else {
            return;
        };
        let mut page = page.borrow_mut();
        page.frame_request.fired();
        let ops = page.zoomer.tick(millis(timestamp));
        page.apply(ops);
        page.request_frame();
    })
}
