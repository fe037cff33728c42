// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for style application.
//!
//! This module provides a [`StyleSink`] trait with per-event methods that the
//! store and styler call whenever they mutate a native visual or the
//! side-table. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn StyleSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Sinks for development live in the `strata_debug` crate.

use kurbo::{Rect, Vec2};

use crate::dimensions::Dimensions;
use crate::error::StyleError;
use crate::transform::Transform3d;
use crate::visual::{ObjectId, SlotKind};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Whether a side-table entry appeared or went away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryChange {
    /// The element received its first size-dependent style.
    Created,
    /// The element was detached.
    Removed,
}

/// Emitted when a side-table entry is created or removed.
#[derive(Clone, Copy, Debug)]
pub struct EntryEvent {
    /// Trace id of the element.
    pub element: u64,
    /// What happened.
    pub change: EntryChange,
}

/// The effective transform written to a visual.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformChange {
    /// The render-transform slot now holds this offset.
    Offset(Vec2),
    /// The projection slot now holds this matrix.
    Projection(Transform3d),
    /// Both slots were restored to their defaults.
    Cleared,
}

/// Emitted after a transform is (re)applied or cleared.
#[derive(Clone, Copy, Debug)]
pub struct TransformEvent {
    /// Trace id of the element.
    pub element: u64,
    /// What was written.
    pub change: TransformChange,
    /// The dimensions the transform was composed against.
    pub dimensions: Dimensions,
}

/// Emitted after the overflow clip is set or cleared.
#[derive(Clone, Copy, Debug)]
pub struct ClipEvent {
    /// Trace id of the element.
    pub element: u64,
    /// The clip now in effect, if any.
    pub clip: Option<Rect>,
}

/// Emitted when layout reports new dimensions for an element.
#[derive(Clone, Copy, Debug)]
pub struct ResizeEvent {
    /// Trace id of the element.
    pub element: u64,
    /// The new dimensions.
    pub dimensions: Dimensions,
    /// Whether the element had size-dependent state to recompute.
    pub tracked: bool,
}

/// Emitted when a slot held an object Strata did not install and the
/// configured policy allowed overwriting it.
#[derive(Clone, Copy, Debug)]
pub struct ForeignSlotEvent {
    /// Trace id of the element.
    pub element: u64,
    /// Which slot.
    pub slot: SlotKind,
    /// The foreign occupant that was replaced.
    pub occupant: ObjectId,
}

/// Emitted when a style value is rejected.
#[derive(Clone, Copy, Debug)]
pub struct RejectedEvent<'a> {
    /// Trace id of the element.
    pub element: u64,
    /// Why.
    pub error: &'a StyleError,
}

// ---------------------------------------------------------------------------
// StyleSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from style application.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait StyleSink {
    /// Called when a side-table entry is created or removed.
    fn on_entry(&mut self, e: &EntryEvent) {
        _ = e;
    }

    /// Called after a transform is applied or cleared.
    fn on_transform(&mut self, e: &TransformEvent) {
        _ = e;
    }

    /// Called after a clip is set or cleared.
    fn on_clip(&mut self, e: &ClipEvent) {
        _ = e;
    }

    /// Called when new dimensions arrive.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called when a foreign slot occupant is overwritten.
    fn on_foreign_slot(&mut self, e: &ForeignSlotEvent) {
        _ = e;
    }

    /// Called when a style value is rejected.
    fn on_rejected(&mut self, e: &RejectedEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`StyleSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl StyleSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`StyleSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn StyleSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn StyleSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn StyleSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`EntryEvent`].
    #[inline]
    pub fn entry(&mut self, e: &EntryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_entry(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransformEvent`].
    #[inline]
    pub fn transform(&mut self, e: &TransformEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transform(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ClipEvent`].
    #[inline]
    pub fn clip(&mut self, e: &ClipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_clip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ForeignSlotEvent`].
    #[inline]
    pub fn foreign_slot(&mut self, e: &ForeignSlotEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_foreign_slot(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RejectedEvent`].
    #[inline]
    pub fn rejected(&mut self, e: &RejectedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
