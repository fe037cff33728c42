// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory visual tree for tests and headless hosts.
//!
//! [`HeadlessTree`] is an arena of [`HeadlessVisual`]s addressed by
//! generational [`ElementId`] handles. Each visual records every property
//! written through [`StyleTarget`] so it can be inspected afterwards.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::dimensions::Dimensions;
use crate::visual::{
    ElementKey, LiveSetting, ObjectId, OffsetTransform, Projection, StyleTarget,
};

/// A handle to a visual in a [`HeadlessTree`].
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a visual is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    idx: u32,
    generation: u32,
}

impl ElementId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}

impl ElementKey for ElementId {
    #[inline]
    fn trace_id(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.idx)
    }
}

/// A visual that stores whatever is written to it.
#[derive(Clone, Debug)]
pub struct HeadlessVisual {
    id: ElementId,
    dimensions: Dimensions,
    render_transform: Option<OffsetTransform>,
    projection: Option<Projection>,
    clip: Option<Rect>,
    opacity: f64,
    z_index: i32,
    visible: bool,
    accessible_name: String,
    accessible_hint: String,
    live_setting: LiveSetting,
    automation_id: String,
    pointer_handlers: bool,
}

impl HeadlessVisual {
    fn new(id: ElementId, dimensions: Dimensions) -> Self {
        Self {
            id,
            dimensions,
            render_transform: None,
            projection: None,
            clip: None,
            opacity: 1.0,
            z_index: 0,
            visible: true,
            accessible_name: String::new(),
            accessible_hint: String::new(),
            live_setting: LiveSetting::Off,
            automation_id: String::new(),
            pointer_handlers: false,
        }
    }

    /// The object in the render-transform slot.
    #[must_use]
    pub fn render_transform_object(&self) -> Option<&OffsetTransform> {
        self.render_transform.as_ref()
    }

    /// The object in the projection slot.
    #[must_use]
    pub fn projection_object(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// The clip, in local coordinates.
    #[must_use]
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    /// The element's own opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// The stacking order among siblings.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Whether the element takes part in rendering.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The accessible name.
    #[must_use]
    pub fn accessible_name(&self) -> &str {
        &self.accessible_name
    }

    /// The accessible help text.
    #[must_use]
    pub fn accessible_hint(&self) -> &str {
        &self.accessible_hint
    }

    /// How changes are announced.
    #[must_use]
    pub fn live_setting(&self) -> LiveSetting {
        self.live_setting
    }

    /// The automation identifier.
    #[must_use]
    pub fn automation_id(&self) -> &str {
        &self.automation_id
    }

    /// Whether pointer enter/exit handlers are registered.
    #[must_use]
    pub fn has_pointer_handlers(&self) -> bool {
        self.pointer_handlers
    }
}

impl StyleTarget for HeadlessVisual {
    type Key = ElementId;

    fn key(&self) -> ElementId {
        self.id
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    fn render_transform(&self) -> Option<ObjectId> {
        self.render_transform.map(|t| t.id)
    }

    fn set_render_transform(&mut self, transform: Option<OffsetTransform>) {
        self.render_transform = transform;
    }

    fn projection(&self) -> Option<ObjectId> {
        self.projection.map(|p| p.id)
    }

    fn set_projection(&mut self, projection: Option<Projection>) {
        self.projection = projection;
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_accessible_name(&mut self, name: &str) {
        name.clone_into(&mut self.accessible_name);
    }

    fn set_accessible_hint(&mut self, hint: &str) {
        hint.clone_into(&mut self.accessible_hint);
    }

    fn set_live_setting(&mut self, setting: LiveSetting) {
        self.live_setting = setting;
    }

    fn set_automation_id(&mut self, id: &str) {
        id.clone_into(&mut self.automation_id);
    }

    fn register_pointer_handlers(&mut self) {
        self.pointer_handlers = true;
    }

    fn unregister_pointer_handlers(&mut self) {
        self.pointer_handlers = false;
    }
}

/// Arena of [`HeadlessVisual`]s.
///
/// Destroyed visuals are recycled via a free list, and generation counters
/// prevent stale handle access.
#[derive(Debug, Default)]
pub struct HeadlessTree {
    visuals: Vec<Option<HeadlessVisual>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl HeadlessTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a visual whose size layout has not produced yet.
    pub fn create(&mut self) -> ElementId {
        self.create_with_dimensions(Dimensions::UNKNOWN)
    }

    /// Creates a visual with the given size.
    pub fn create_with_dimensions(&mut self, dimensions: Dimensions) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.visuals.push(None);
            self.generation.push(0);
            idx
        };
        let id = ElementId {
            idx,
            generation: self.generation[idx as usize],
        };
        self.visuals[idx as usize] = Some(HeadlessVisual::new(id, dimensions));
        id
    }

    /// Destroys a visual, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy(&mut self, id: ElementId) {
        assert!(self.is_alive(id), "stale ElementId: {id:?}");
        self.visuals[id.idx as usize] = None;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live visual.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.visuals[id.idx as usize].is_some()
    }

    /// Returns the visual for a live handle.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&HeadlessVisual> {
        if !self.is_alive(id) {
            return None;
        }
        self.visuals[id.idx as usize].as_ref()
    }

    /// Returns the visual for a live handle, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut HeadlessVisual> {
        if !self.is_alive(id) {
            return None;
        }
        self.visuals[id.idx as usize].as_mut()
    }

    /// Number of live visuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns `true` if the tree has no live visuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_visual_has_platform_defaults() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let v = tree.get(id).unwrap();
        assert!(!v.dimensions().is_known());
        assert_eq!(v.opacity(), 1.0);
        assert!(v.is_visible());
        assert_eq!(v.live_setting(), LiveSetting::Off);
        assert_eq!(v.render_transform(), None);
        assert_eq!(v.projection(), None);
        assert!(!v.has_pointer_handlers());
    }

    #[test]
    fn destroyed_slot_is_reused_with_new_generation() {
        let mut tree = HeadlessTree::new();
        let a = tree.create();
        tree.destroy(a);
        assert!(!tree.is_alive(a));
        assert!(tree.get(a).is_none());

        let b = tree.create();
        assert_eq!(b.index(), a.index());
        assert_ne!(b.generation(), a.generation());
        assert_ne!(b.trace_id(), a.trace_id());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn destroying_twice_panics() {
        let mut tree = HeadlessTree::new();
        let a = tree.create();
        tree.destroy(a);
        tree.destroy(a);
    }

    #[test]
    fn records_slot_objects() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let v = tree.get_mut(id).unwrap();
        v.set_render_transform(Some(OffsetTransform {
            id: ObjectId(7),
            offset: kurbo::Vec2::new(1.0, 2.0),
        }));
        assert_eq!(v.render_transform(), Some(ObjectId(7)));
        v.set_render_transform(None);
        assert_eq!(v.render_transform_object(), None);
    }
}
