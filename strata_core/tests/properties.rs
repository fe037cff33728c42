// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the styler against the headless tree.

use kurbo::{Point, Rect, Vec2};
use serde_json::json;
use strata_core::compose::compose;
use strata_core::config::StylerConfig;
use strata_core::dimensions::Dimensions;
use strata_core::headless::{ElementId, HeadlessTree, HeadlessVisual};
use strata_core::ops::TransformOp;
use strata_core::styler::Styler;
use strata_core::transform::Transform3d;
use strata_core::visual::{ObjectId, OffsetTransform, Projection, StyleTarget};

struct Harness {
    tree: HeadlessTree,
    styler: Styler<HeadlessVisual>,
}

impl Harness {
    fn new(config: StylerConfig) -> Self {
        Self {
            tree: HeadlessTree::new(),
            styler: Styler::new(config),
        }
    }

    fn element(&mut self, dims: Dimensions) -> ElementId {
        let id = self.tree.create_with_dimensions(dims);
        self.styler.on_attach(self.tree.get_mut(id).unwrap());
        id
    }

    fn visual(&self, id: ElementId) -> &HeadlessVisual {
        self.tree.get(id).unwrap()
    }

    fn set_transform(&mut self, id: ElementId, ops: Option<&[TransformOp]>) {
        let visual = self.tree.get_mut(id).unwrap();
        self.styler.set_transform(visual, ops);
    }

    fn set_overflow(&mut self, id: ElementId, value: Option<&str>) {
        let visual = self.tree.get_mut(id).unwrap();
        self.styler.set_overflow(visual, value);
    }

    fn resize(&mut self, id: ElementId, dims: Dimensions) {
        let visual = self.tree.get_mut(id).unwrap();
        self.styler.on_dimensions_changed(visual, dims);
    }

    fn detach(&mut self, id: ElementId) {
        let visual = self.tree.get_mut(id).unwrap();
        self.styler.on_detach(visual);
    }
}

fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

fn assert_single_slot(visual: &HeadlessVisual) {
    assert!(
        !(visual.render_transform().is_some() && visual.projection().is_some()),
        "both transform slots occupied"
    );
}

#[test]
fn clip_tracks_dimensions_and_clears_on_nan() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::UNKNOWN);

    h.set_overflow(e, Some("hidden"));
    h.resize(e, Dimensions::new(100.0, 50.0));
    assert_eq!(
        h.visual(e).clip(),
        Some(Rect::new(0.0, 0.0, 100.0, 50.0)),
        "clip follows own bounds"
    );

    h.resize(e, Dimensions::new(f64::NAN, 50.0));
    assert_eq!(h.visual(e).clip(), None, "unknown width clears the clip");
}

#[test]
fn size_reported_before_styling_is_used() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::UNKNOWN);

    h.resize(e, Dimensions::new(60.0, 40.0));
    assert!(h.styler.store().is_empty(), "resize alone creates no entry");

    let ops = [TransformOp::scale(2.0, 2.0)];
    h.set_transform(e, Some(&ops));
    h.set_overflow(e, Some("hidden"));
    let v = h.visual(e);
    assert_eq!(
        v.projection_object().map(|p| p.matrix),
        Some(compose(&ops, Dimensions::new(60.0, 40.0))),
        "composed against the reported size"
    );
    assert_eq!(
        v.clip(),
        Some(Rect::new(0.0, 0.0, 60.0, 40.0)),
        "clipped to the reported size"
    );
}

#[test]
fn translation_only_sets_an_offset() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(80.0, 30.0));

    h.set_transform(e, Some(&[TransformOp::translate(7.0, -2.0)]));
    let v = h.visual(e);
    assert_eq!(
        v.render_transform_object().map(|t| t.offset),
        Some(Vec2::new(7.0, -2.0)),
        "offset installed"
    );
    assert_eq!(v.projection(), None, "projection vacant");
    assert_single_slot(v);
}

#[test]
fn general_transform_sets_exact_projection() {
    let mut h = Harness::new(StylerConfig::default());
    let dims = Dimensions::new(80.0, 30.0);
    let e = h.element(dims);
    let ops = [TransformOp::rotate(0.3), TransformOp::scale(1.5, 0.5)];

    h.set_transform(e, Some(&ops));
    let v = h.visual(e);
    assert_eq!(v.render_transform(), None, "render transform vacant");
    assert_eq!(
        v.projection_object().map(|p| p.matrix),
        Some(compose(&ops, dims)),
        "projection holds the composed matrix"
    );
    assert_single_slot(v);
}

#[test]
fn repeated_set_transform_is_idempotent() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(50.0, 50.0));
    let ops = [TransformOp::RotateX(0.4), TransformOp::Perspective(300.0)];

    h.set_transform(e, Some(&ops));
    let first = *h.visual(e).projection_object().unwrap();
    let state = h.styler.store().get(e).cloned();

    h.set_transform(e, Some(&ops));
    assert_eq!(*h.visual(e).projection_object().unwrap(), first, "same slot object and matrix");
    assert_eq!(h.styler.store().get(e).cloned(), state, "same side-table state");
}

#[test]
fn clearing_transform_vacates_slots() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(20.0, 20.0));

    h.set_transform(e, Some(&[TransformOp::SkewX(0.2)]));
    h.set_transform(e, None);
    let v = h.visual(e);
    assert_eq!(v.render_transform(), None, "render transform vacant");
    assert_eq!(v.projection(), None, "projection vacant");
}

#[test]
fn clearing_without_prior_transform_creates_nothing() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(20.0, 20.0));

    h.set_transform(e, None);
    assert!(h.styler.store().is_empty(), "no entry created");
    assert_eq!(h.visual(e).render_transform(), None, "render transform untouched");
}

#[test]
fn empty_list_installs_zero_offset() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(20.0, 20.0));

    h.set_transform(e, Some(&[]));
    assert_eq!(
        h.visual(e).render_transform_object().map(|t| t.offset),
        Some(Vec2::ZERO),
        "identity is a zero offset, not a cleared slot"
    );
}

#[test]
fn translation_is_stable_across_resize() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(100.0, 40.0));

    h.set_transform(e, Some(&[TransformOp::translate(10.0, 0.0)]));
    h.resize(e, Dimensions::new(300.0, 40.0));
    assert_eq!(
        h.visual(e).render_transform_object().map(|t| t.offset),
        Some(Vec2::new(10.0, 0.0)),
        "translation ignores size"
    );
}

#[test]
fn rotation_pivot_follows_new_center() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(100.0, 40.0));

    h.set_transform(e, Some(&[TransformOp::rotate(core::f64::consts::FRAC_PI_2)]));
    let m = h.visual(e).projection_object().unwrap().matrix;
    assert_near(m.map_point(Point::new(50.0, 20.0)), Point::new(50.0, 20.0));

    h.resize(e, Dimensions::new(200.0, 80.0));
    let m = h.visual(e).projection_object().unwrap().matrix;
    assert_near(m.map_point(Point::new(100.0, 40.0)), Point::new(100.0, 40.0));
    assert_near(m.map_point(Point::new(200.0, 40.0)), Point::new(100.0, 140.0));
}

#[test]
fn resize_after_detach_is_ignored() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(10.0, 10.0));

    h.set_overflow(e, Some("hidden"));
    h.detach(e);
    assert!(!h.visual(e).has_pointer_handlers(), "pointer handlers removed");
    assert!(h.styler.store().is_empty(), "entry dropped");

    h.resize(e, Dimensions::new(40.0, 40.0));
    assert!(h.styler.store().is_empty(), "no entry recreated");
    assert_eq!(
        h.visual(e).clip(),
        Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
        "clip not recomputed"
    );
}

#[test]
fn scale_about_center() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(40.0, 20.0));

    h.set_transform(e, Some(&[TransformOp::scale(2.0, 2.0)]));
    let v = h.visual(e);
    assert_eq!(v.render_transform(), None, "scale is not a pure translation");
    let m = v.projection_object().unwrap().matrix;
    assert_eq!(m.translation(), [-20.0, -10.0, 0.0], "pivot offset");
    assert_eq!(m.col(0)[0], 2.0, "x scale");
    assert_eq!(m.col(1)[1], 2.0, "y scale");
}

#[test]
#[should_panic(expected = "occupies the render-transform slot")]
fn foreign_render_transform_is_fatal() {
    let mut h = Harness::new(StylerConfig::strict());
    let e = h.element(Dimensions::new(10.0, 10.0));
    h.tree
        .get_mut(e)
        .unwrap()
        .set_render_transform(Some(OffsetTransform {
            id: ObjectId(9_000),
            offset: Vec2::ZERO,
        }));

    h.set_transform(e, Some(&[TransformOp::rotate(1.0)]));
}

#[test]
#[should_panic(expected = "occupies the projection slot")]
fn foreign_projection_is_fatal_on_clear() {
    let mut h = Harness::new(StylerConfig::strict());
    let e = h.element(Dimensions::new(10.0, 10.0));
    h.set_transform(e, Some(&[TransformOp::translate(1.0, 1.0)]));
    h.tree
        .get_mut(e)
        .unwrap()
        .set_projection(Some(Projection {
            id: ObjectId(9_000),
            matrix: Transform3d::IDENTITY,
        }));

    h.set_transform(e, None);
}

#[test]
fn foreign_occupant_is_replaced_when_lenient() {
    let mut h = Harness::new(StylerConfig::lenient());
    let e = h.element(Dimensions::new(10.0, 10.0));
    h.tree
        .get_mut(e)
        .unwrap()
        .set_render_transform(Some(OffsetTransform {
            id: ObjectId(9_000),
            offset: Vec2::new(5.0, 5.0),
        }));

    h.set_transform(e, Some(&[TransformOp::translate(1.0, 2.0)]));
    let rt = *h.visual(e).render_transform_object().unwrap();
    assert_ne!(rt.id, ObjectId(9_000), "foreign object replaced");
    assert_eq!(rt.offset, Vec2::new(1.0, 2.0), "new offset applied");
}

#[test]
fn malformed_value_leaves_everything_intact() {
    let mut h = Harness::new(StylerConfig::default());
    let e = h.element(Dimensions::new(10.0, 10.0));
    h.set_transform(e, Some(&[TransformOp::translate(3.0, 0.0)]));
    let before = *h.visual(e).render_transform_object().unwrap();
    let state = h.styler.store().get(e).cloned();

    for bad in [
        json!({ "translateX": 3 }),
        json!([{ "rotate": 1.0 }]),
        json!([{ "matrix": [1, 2, 3] }]),
        json!([{ "unknown": 1 }]),
    ] {
        let visual = h.tree.get_mut(e).unwrap();
        assert!(h.styler.set_transform_value(visual, &bad).is_err(), "{bad} rejected");
    }

    assert_eq!(*h.visual(e).render_transform_object().unwrap(), before, "slot intact");
    assert_eq!(h.styler.store().get(e).cloned(), state, "entry intact");
    assert_eq!(h.visual(e).projection(), None, "projection still vacant");
}
