// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A styled DOM element.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;

use kurbo::{Rect, Vec2};
use strata_core::dimensions::Dimensions;
use strata_core::transform::Transform3d;
use strata_core::visual::{LiveSetting, ObjectId, OffsetTransform, Projection, StyleTarget};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlElement};

/// Called with the element key and `true` on pointer enter, `false` on
/// pointer leave.
pub type PointerHook = Rc<dyn Fn(u32, bool)>;

type PointerClosure = Closure<dyn FnMut(Event)>;

struct PointerListeners {
    enter: PointerClosure,
    leave: PointerClosure,
}

/// An `HtmlElement` driven by a [`Styler`](strata_core::styler::Styler).
///
/// The DOM has no notion of slot objects, so the identities Strata installs
/// are mirrored here alongside the inline styles they produce.
pub struct DomVisual {
    el: HtmlElement,
    key: u32,
    dimensions: Dimensions,
    render_transform: Option<ObjectId>,
    projection: Option<ObjectId>,
    pointer_hook: Option<PointerHook>,
    listeners: Option<PointerListeners>,
}

impl core::fmt::Debug for DomVisual {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomVisual")
            .field("el", &"HtmlElement")
            .field("key", &self.key)
            .field("dimensions", &self.dimensions)
            .field("render_transform", &self.render_transform)
            .field("projection", &self.projection)
            .field("listening", &self.listeners.is_some())
            .finish_non_exhaustive()
    }
}

impl DomVisual {
    /// Wraps `el`, identified by `key` in the side-table.
    ///
    /// Sets `transform-origin: 0 0`, since projections are already pivoted
    /// on the element's center.
    #[must_use]
    pub fn new(el: HtmlElement, key: u32) -> Self {
        let _ = el.style().set_property("transform-origin", "0 0");
        Self {
            el,
            key,
            dimensions: Dimensions::UNKNOWN,
            render_transform: None,
            projection: None,
            pointer_hook: None,
            listeners: None,
        }
    }

    /// Sets the callback invoked on pointer enter/leave once handlers are
    /// registered.
    #[must_use]
    pub fn with_pointer_hook(mut self, hook: PointerHook) -> Self {
        self.pointer_hook = Some(hook);
        self
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.el
    }

    /// Reads the element's current layout size from the DOM.
    ///
    /// Pass the result to
    /// [`Styler::on_dimensions_changed`](strata_core::styler::Styler::on_dimensions_changed),
    /// which records it and updates size-dependent styles.
    #[must_use]
    pub fn measure(&self) -> Dimensions {
        Dimensions::new(
            f64::from(self.el.offset_width()),
            f64::from(self.el.offset_height()),
        )
    }

    fn set_style(&self, name: &str, value: &str) {
        let _ = self.el.style().set_property(name, value);
    }

    fn remove_style(&self, name: &str) {
        let _ = self.el.style().remove_property(name);
    }

    fn listener(&self, entering: bool) -> PointerClosure {
        let hook = self.pointer_hook.clone();
        let key = self.key;
        Closure::wrap(Box::new(move |_: Event| {
            if let Some(hook) = &hook {
                hook(key, entering);
            }
        }))
    }
}

impl StyleTarget for DomVisual {
    type Key = u32;

    fn key(&self) -> u32 {
        self.key
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    fn render_transform(&self) -> Option<ObjectId> {
        self.render_transform
    }

    fn set_render_transform(&mut self, transform: Option<OffsetTransform>) {
        match transform {
            Some(t) => {
                self.set_style("translate", &translate_css(t.offset));
                self.render_transform = Some(t.id);
            }
            None => {
                self.remove_style("translate");
                self.render_transform = None;
            }
        }
    }

    fn projection(&self) -> Option<ObjectId> {
        self.projection
    }

    fn set_projection(&mut self, projection: Option<Projection>) {
        match projection {
            Some(p) => {
                self.set_style("transform", &matrix3d_css(&p.matrix));
                self.projection = Some(p.id);
            }
            None => {
                self.remove_style("transform");
                self.projection = None;
            }
        }
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        match clip {
            Some(rect) => self.set_style("clip-path", &clip_css(rect)),
            None => self.remove_style("clip-path"),
        }
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.set_style("opacity", &format!("{opacity}"));
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.set_style("z-index", &format!("{z_index}"));
    }

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.remove_style("display");
        } else {
            self.set_style("display", "none");
        }
    }

    fn set_accessible_name(&mut self, name: &str) {
        set_or_remove_attribute(&self.el, "aria-label", name);
    }

    fn set_accessible_hint(&mut self, hint: &str) {
        set_or_remove_attribute(&self.el, "aria-description", hint);
    }

    fn set_live_setting(&mut self, setting: LiveSetting) {
        let _ = self.el.set_attribute("aria-live", setting.as_str());
    }

    fn set_automation_id(&mut self, id: &str) {
        set_or_remove_attribute(&self.el, "data-testid", id);
    }

    fn register_pointer_handlers(&mut self) {
        if self.listeners.is_some() {
            return;
        }
        let listeners = PointerListeners {
            enter: self.listener(true),
            leave: self.listener(false),
        };
        let _ = self.el.add_event_listener_with_callback(
            "pointerenter",
            listeners.enter.as_ref().unchecked_ref(),
        );
        let _ = self.el.add_event_listener_with_callback(
            "pointerleave",
            listeners.leave.as_ref().unchecked_ref(),
        );
        self.listeners = Some(listeners);
    }

    fn unregister_pointer_handlers(&mut self) {
        let Some(listeners) = self.listeners.take() else {
            return;
        };
        let _ = self.el.remove_event_listener_with_callback(
            "pointerenter",
            listeners.enter.as_ref().unchecked_ref(),
        );
        let _ = self.el.remove_event_listener_with_callback(
            "pointerleave",
            listeners.leave.as_ref().unchecked_ref(),
        );
    }
}

/// An empty value removes the attribute so defaults apply.
fn set_or_remove_attribute(el: &HtmlElement, name: &str, value: &str) {
    if value.is_empty() {
        let _ = el.remove_attribute(name);
    } else {
        let _ = el.set_attribute(name, value);
    }
}

fn translate_css(offset: Vec2) -> String {
    format!("{}px {}px", offset.x, offset.y)
}

/// Formats a matrix as a CSS `matrix3d()` value (column-major, like ours).
fn matrix3d_css(xf: &Transform3d) -> String {
    let c0 = xf.col(0);
    let c1 = xf.col(1);
    let c2 = xf.col(2);
    let c3 = xf.col(3);

    format!(
        "matrix3d({},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{})",
        c0[0],
        c0[1],
        c0[2],
        c0[3],
        c1[0],
        c1[1],
        c1[2],
        c1[3],
        c2[0],
        c2[1],
        c2[2],
        c2[3],
        c3[0],
        c3[1],
        c3[2],
        c3[3],
    )
}

fn clip_css(r: Rect) -> String {
    format!(
        "polygon({x0}px {y0}px, {x1}px {y0}px, {x1}px {y1}px, {x0}px {y1}px)",
        x0 = r.x0,
        y0 = r.y0,
        x1 = r.x1,
        y1 = r.y1,
    )
}
