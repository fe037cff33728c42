// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform slot management.
//!
//! A visual's render-transform and projection slots are mutually exclusive:
//! after any write through [`SlotWriter`], at most one of them holds an
//! object installed by Strata. Pure translations go to the render-transform
//! slot; everything else goes to the projection slot.
//!
//! Slot occupancy is external, shared state. Before writing, the writer
//! checks that every occupied slot holds an object it installed itself. A
//! foreign occupant means some other code path is mutating the same native
//! object, and by default that is fatal.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::compose::Classification;
use crate::config::ForeignSlotPolicy;
use crate::dimensions::Dimensions;
use crate::trace::{ForeignSlotEvent, TransformChange, TransformEvent, Tracer};
use crate::visual::{ElementKey as _, ObjectId, OffsetTransform, Projection, SlotKind, StyleTarget};

/// Identities of the slot objects Strata installed on one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OwnedSlots {
    render_transform: Option<ObjectId>,
    projection: Option<ObjectId>,
}

impl OwnedSlots {
    /// The render-transform object Strata installed, if any.
    #[must_use]
    pub const fn render_transform(&self) -> Option<ObjectId> {
        self.render_transform
    }

    /// The projection object Strata installed, if any.
    #[must_use]
    pub const fn projection(&self) -> Option<ObjectId> {
        self.projection
    }

    /// Returns `true` if neither slot holds a Strata object.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.render_transform.is_none() && self.projection.is_none()
    }
}

/// Writes classified transforms into a visual's slots.
///
/// Object ids are drawn from one process-wide counter, so objects installed
/// by different writers over the same tree never share an id and each
/// writer treats the others' objects as foreign.
#[derive(Debug)]
pub struct SlotWriter {
    policy: ForeignSlotPolicy,
}

impl SlotWriter {
    /// Creates a writer with the given foreign-occupant policy.
    #[must_use]
    pub const fn new(policy: ForeignSlotPolicy) -> Self {
        Self { policy }
    }

    /// Returns the foreign-occupant policy.
    #[must_use]
    pub const fn policy(&self) -> ForeignSlotPolicy {
        self.policy
    }

    /// Applies `classification` to `target`.
    ///
    /// A [`Translation2d`](Classification::Translation2d) vacates the
    /// projection slot and sets the offset of Strata's render transform
    /// (reusing the existing object when there is one). A
    /// [`General`](Classification::General) matrix does the opposite.
    ///
    /// # Panics
    ///
    /// Panics if either slot holds an object Strata did not install and the
    /// policy is [`ForeignSlotPolicy::Fatal`].
    pub fn apply<V: StyleTarget>(
        &mut self,
        target: &mut V,
        owned: &mut OwnedSlots,
        classification: Classification,
        dims: Dimensions,
        tracer: &mut Tracer<'_>,
    ) {
        // Both slots are checked before either is written.
        let render = self.reusable(
            target,
            SlotKind::RenderTransform,
            owned.render_transform,
            tracer,
        );
        let projection = self.reusable(target, SlotKind::Projection, owned.projection, tracer);

        let change = match classification {
            Classification::Translation2d(offset) => {
                if target.projection().is_some() {
                    target.set_projection(None);
                }
                owned.projection = None;
                let id = render.unwrap_or_else(Self::allocate);
                target.set_render_transform(Some(OffsetTransform { id, offset }));
                owned.render_transform = Some(id);
                TransformChange::Offset(offset)
            }
            Classification::General(matrix) => {
                if target.render_transform().is_some() {
                    target.set_render_transform(None);
                }
                owned.render_transform = None;
                let id = projection.unwrap_or_else(Self::allocate);
                target.set_projection(Some(Projection { id, matrix }));
                owned.projection = Some(id);
                TransformChange::Projection(matrix)
            }
        };

        tracer.transform(&TransformEvent {
            element: target.key().trace_id(),
            change,
            dimensions: dims,
        });
    }

    /// Restores both slots of `target` to their defaults.
    ///
    /// # Panics
    ///
    /// Panics if either slot holds an object Strata did not install and the
    /// policy is [`ForeignSlotPolicy::Fatal`].
    pub fn clear<V: StyleTarget>(
        &mut self,
        target: &mut V,
        owned: &mut OwnedSlots,
        tracer: &mut Tracer<'_>,
    ) {
        self.reusable(
            target,
            SlotKind::RenderTransform,
            owned.render_transform,
            tracer,
        );
        self.reusable(target, SlotKind::Projection, owned.projection, tracer);

        if target.render_transform().is_some() {
            target.set_render_transform(None);
        }
        if target.projection().is_some() {
            target.set_projection(None);
        }
        *owned = OwnedSlots::default();

        tracer.transform(&TransformEvent {
            element: target.key().trace_id(),
            change: TransformChange::Cleared,
            dimensions: target.dimensions(),
        });
    }

    /// Checks a slot's occupant against the object Strata installed there.
    ///
    /// Returns the occupant's id if Strata owns it and it can be reused.
    fn reusable<V: StyleTarget>(
        &self,
        target: &V,
        slot: SlotKind,
        ours: Option<ObjectId>,
        tracer: &mut Tracer<'_>,
    ) -> Option<ObjectId> {
        let occupant = match slot {
            SlotKind::RenderTransform => target.render_transform(),
            SlotKind::Projection => target.projection(),
        }?;
        if Some(occupant) == ours {
            return Some(occupant);
        }
        match self.policy {
            ForeignSlotPolicy::Fatal => panic!(
                "foreign {occupant:?} occupies the {slot} slot of element {:?}",
                target.key()
            ),
            ForeignSlotPolicy::Overwrite => {
                tracer.foreign_slot(&ForeignSlotEvent {
                    element: target.key().trace_id(),
                    slot,
                    occupant,
                });
                None
            }
        }
    }

    fn allocate() -> ObjectId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        ObjectId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;
    use crate::headless::HeadlessTree;
    use crate::transform::Transform3d;

    fn general() -> Classification {
        Classification::General(Transform3d::from_scale(2.0, 2.0, 1.0))
    }

    fn offset(x: f64, y: f64) -> Classification {
        Classification::Translation2d(Vec2::new(x, y))
    }

    const DIMS: Dimensions = Dimensions::new(10.0, 10.0);

    #[test]
    fn translation_uses_render_slot_only() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Fatal);
        let mut owned = OwnedSlots::default();

        writer.apply(visual, &mut owned, offset(3.0, 4.0), DIMS, &mut Tracer::none());

        let rt = visual.render_transform_object().unwrap();
        assert_eq!(rt.offset, Vec2::new(3.0, 4.0));
        assert_eq!(owned.render_transform(), Some(rt.id));
        assert!(visual.projection_object().is_none());
    }

    #[test]
    fn switching_kinds_vacates_the_other_slot() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Fatal);
        let mut owned = OwnedSlots::default();

        writer.apply(visual, &mut owned, offset(1.0, 1.0), DIMS, &mut Tracer::none());
        writer.apply(visual, &mut owned, general(), DIMS, &mut Tracer::none());
        assert!(visual.render_transform_object().is_none());
        assert!(visual.projection_object().is_some());
        assert_eq!(owned.render_transform(), None);

        writer.apply(visual, &mut owned, offset(1.0, 1.0), DIMS, &mut Tracer::none());
        assert!(visual.render_transform_object().is_some());
        assert!(visual.projection_object().is_none());
    }

    #[test]
    fn owned_object_is_reused() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Fatal);
        let mut owned = OwnedSlots::default();

        writer.apply(visual, &mut owned, general(), DIMS, &mut Tracer::none());
        let first = visual.projection_object().unwrap().id;
        writer.apply(visual, &mut owned, general(), DIMS, &mut Tracer::none());
        assert_eq!(visual.projection_object().unwrap().id, first);
    }

    #[test]
    fn clear_empties_both_slots() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Fatal);
        let mut owned = OwnedSlots::default();

        writer.apply(visual, &mut owned, general(), DIMS, &mut Tracer::none());
        writer.clear(visual, &mut owned, &mut Tracer::none());
        assert!(visual.render_transform_object().is_none());
        assert!(visual.projection_object().is_none());
        assert!(owned.is_empty());
    }

    #[test]
    #[should_panic(expected = "occupies the projection slot")]
    fn foreign_projection_is_fatal() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        visual.set_projection(Some(Projection {
            id: ObjectId(u64::MAX),
            matrix: Transform3d::IDENTITY,
        }));
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Fatal);
        writer.apply(
            visual,
            &mut OwnedSlots::default(),
            offset(1.0, 0.0),
            DIMS,
            &mut Tracer::none(),
        );
    }

    #[test]
    #[should_panic(expected = "occupies the render-transform slot")]
    fn foreign_render_transform_is_fatal_on_clear() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        visual.set_render_transform(Some(OffsetTransform {
            id: ObjectId(u64::MAX),
            offset: Vec2::ZERO,
        }));
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Fatal);
        writer.clear(visual, &mut OwnedSlots::default(), &mut Tracer::none());
    }

    #[test]
    #[should_panic(expected = "occupies the projection slot")]
    fn other_writers_objects_are_foreign() {
        let mut tree = HeadlessTree::new();
        let a = tree.create();
        let b = tree.create();
        let mut first = SlotWriter::new(ForeignSlotPolicy::Fatal);
        let mut second = SlotWriter::new(ForeignSlotPolicy::Fatal);
        let mut owned_a = OwnedSlots::default();
        let mut owned_b = OwnedSlots::default();

        // Each writer installs its first object on its own element.
        first.apply(tree.get_mut(a).unwrap(), &mut owned_a, general(), DIMS, &mut Tracer::none());
        second.apply(tree.get_mut(b).unwrap(), &mut owned_b, general(), DIMS, &mut Tracer::none());
        assert_ne!(owned_a.projection(), owned_b.projection(), "ids are not shared");

        // The second writer must not adopt the first writer's object.
        second.apply(tree.get_mut(a).unwrap(), &mut owned_b, general(), DIMS, &mut Tracer::none());
    }

    #[test]
    fn foreign_occupant_is_replaced_when_lenient() {
        let mut tree = HeadlessTree::new();
        let id = tree.create();
        let visual = tree.get_mut(id).unwrap();
        visual.set_projection(Some(Projection {
            id: ObjectId(u64::MAX),
            matrix: Transform3d::IDENTITY,
        }));
        let mut writer = SlotWriter::new(ForeignSlotPolicy::Overwrite);
        let mut owned = OwnedSlots::default();
        writer.apply(visual, &mut owned, general(), DIMS, &mut Tracer::none());

        let projection = visual.projection_object().unwrap();
        assert_ne!(projection.id, ObjectId(u64::MAX));
        assert_eq!(owned.projection(), Some(projection.id));
    }
}
