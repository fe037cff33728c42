// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style property facade.
//!
//! [`Styler`] is the single entry point an element system calls when a style
//! property changes or an element's lifecycle advances. Size-independent
//! properties (opacity, z-index, accessibility, test id, display) are written
//! straight through to the visual. Transform and overflow are routed through
//! the [`StyleStore`] so they can be recomputed on resize.
//!
//! ```
//! use strata_core::dimensions::Dimensions;
//! use strata_core::headless::{HeadlessTree, HeadlessVisual};
//! use strata_core::ops::TransformOp;
//! use strata_core::styler::Styler;
//!
//! let mut tree = HeadlessTree::new();
//! let id = tree.create_with_dimensions(Dimensions::new(100.0, 40.0));
//! let mut styler: Styler<HeadlessVisual> = Styler::default();
//!
//! let visual = tree.get_mut(id).unwrap();
//! styler.on_attach(visual);
//! styler.set_transform(visual, Some(&[TransformOp::rotate(0.25)]));
//! assert!(visual.projection_object().is_some());
//!
//! styler.on_detach(visual);
//! assert!(styler.store().is_empty());
//! ```

use core::fmt;

use serde_json::Value;

use crate::clip::Overflow;
use crate::compose::compose;
use crate::config::StylerConfig;
use crate::dimensions::Dimensions;
use crate::error::StyleError;
use crate::ops::{TransformOp, parse_transform};
use crate::store::StyleStore;
use crate::trace::{NoopSink, RejectedEvent, StyleSink, Tracer};
use crate::visual::{ElementKey as _, LiveSetting, StyleTarget};

/// Applies style properties to visuals of type `V`.
///
/// `S` receives trace events when the `trace` feature is enabled.
pub struct Styler<V: StyleTarget, S: StyleSink = NoopSink> {
    store: StyleStore<V::Key>,
    config: StylerConfig,
    sink: S,
}

impl<V: StyleTarget, S: StyleSink> fmt::Debug for Styler<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Styler")
            .field("entries", &self.store.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<V: StyleTarget> Default for Styler<V> {
    fn default() -> Self {
        Self::new(StylerConfig::default())
    }
}

impl<V: StyleTarget> Styler<V> {
    /// Creates a styler that discards trace events.
    #[must_use]
    pub fn new(config: StylerConfig) -> Self {
        Self::with_sink(config, NoopSink)
    }
}

impl<V: StyleTarget, S: StyleSink> Styler<V, S> {
    /// Creates a styler reporting to `sink`.
    #[must_use]
    pub fn with_sink(config: StylerConfig, sink: S) -> Self {
        Self {
            store: StyleStore::new(config),
            config,
            sink,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> StylerConfig {
        self.config
    }

    /// Returns the side-table.
    #[must_use]
    pub const fn store(&self) -> &StyleStore<V::Key> {
        &self.store
    }

    /// Returns the trace sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the trace sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the styler and returns its trace sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    // -- Size-independent properties --

    /// Sets opacity; `None` restores full opacity.
    pub fn set_opacity(&mut self, target: &mut V, opacity: Option<f64>) {
        target.set_opacity(opacity.unwrap_or(1.0));
    }

    /// Sets the stacking order among siblings.
    pub fn set_z_index(&mut self, target: &mut V, z_index: i32) {
        target.set_z_index(z_index);
    }

    /// Sets the accessible name; `None` clears it.
    pub fn set_accessibility_label(&mut self, target: &mut V, label: Option<&str>) {
        target.set_accessible_name(label.unwrap_or(""));
    }

    /// Sets the accessible help text; `None` clears it.
    pub fn set_accessibility_hint(&mut self, target: &mut V, hint: Option<&str>) {
        target.set_accessible_hint(hint.unwrap_or(""));
    }

    /// Sets the live region mode from `"polite"`, `"assertive"`, or anything
    /// else (off).
    pub fn set_accessibility_live_region(&mut self, target: &mut V, value: Option<&str>) {
        target.set_live_setting(LiveSetting::from_style(value));
    }

    /// Sets the automation identifier; `None` clears it.
    pub fn set_test_id(&mut self, target: &mut V, id: Option<&str>) {
        target.set_automation_id(id.unwrap_or(""));
    }

    /// Hides the element for `"none"` and shows it for anything else.
    pub fn set_display(&mut self, target: &mut V, value: Option<&str>) {
        target.set_visible(value != Some("none"));
    }

    // -- Size-dependent properties --

    /// Sets (`Some`) or clears (`None`) the transform list.
    ///
    /// # Panics
    ///
    /// Panics if a transform slot holds an object Strata did not install and
    /// the configured policy is
    /// [`Fatal`](crate::config::ForeignSlotPolicy::Fatal).
    pub fn set_transform(&mut self, target: &mut V, ops: Option<&[TransformOp]>) {
        let mut tracer = Tracer::new(&mut self.sink);
        self.store.set_transform(target, ops, &mut tracer);
    }

    /// Parses a JSON transform value and applies it.
    ///
    /// `null` clears the transform. A malformed value, or one that composes
    /// to a non-finite matrix at the element's current size, is rejected
    /// before anything is written, so the element keeps its previous
    /// transform.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed value, or
    /// [`StyleError::NonFiniteTransform`].
    ///
    /// # Panics
    ///
    /// See [`set_transform`](Self::set_transform).
    pub fn set_transform_value(&mut self, target: &mut V, value: &Value) -> Result<(), StyleError> {
        let mut tracer = Tracer::new(&mut self.sink);
        let parsed = parse_transform(value).and_then(|ops| match &ops {
            Some(list) if !compose(list, target.dimensions()).is_finite() => {
                Err(StyleError::NonFiniteTransform)
            }
            _ => Ok(ops),
        });
        match parsed {
            Ok(ops) => {
                self.store
                    .set_transform(target, ops.as_deref(), &mut tracer);
                Ok(())
            }
            Err(error) => {
                tracer.rejected(&RejectedEvent {
                    element: target.key().trace_id(),
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Sets overflow from `"hidden"`, `"scroll"`, `"visible"`, or `None`.
    pub fn set_overflow(&mut self, target: &mut V, value: Option<&str>) {
        let mut tracer = Tracer::new(&mut self.sink);
        self.store
            .set_overflow(target, Overflow::from_style(value), &mut tracer);
    }

    // -- Lifecycle --

    /// Called when layout assigns new dimensions to the element.
    ///
    /// The size is recorded on `target` and used by every later transform
    /// and overflow write until the next call.
    ///
    /// # Panics
    ///
    /// See [`set_transform`](Self::set_transform).
    pub fn on_dimensions_changed(&mut self, target: &mut V, dims: Dimensions) {
        let mut tracer = Tracer::new(&mut self.sink);
        self.store.on_dimensions_changed(target, dims, &mut tracer);
    }

    /// Called when the element joins the live tree.
    pub fn on_attach(&mut self, target: &mut V) {
        target.register_pointer_handlers();
    }

    /// Called when the element leaves the live tree.
    ///
    /// Pointer handlers are unregistered before the side-table entry is
    /// dropped.
    pub fn on_detach(&mut self, target: &mut V) {
        target.unregister_pointer_handlers();
        let mut tracer = Tracer::new(&mut self.sink);
        self.store.on_detach(target.key(), &mut tracer);
    }
}
