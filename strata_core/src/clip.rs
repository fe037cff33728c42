// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow clipping to an element's own bounds.

use kurbo::Rect;

use crate::dimensions::Dimensions;
use crate::trace::{ClipEvent, Tracer};
use crate::visual::{ElementKey as _, StyleTarget};

/// The `overflow` style value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content may draw outside the element's bounds.
    #[default]
    Visible,
    /// Content is clipped to the element's bounds.
    Hidden,
    /// Content scrolls; this layer does not clip for it.
    Scroll,
}

impl Overflow {
    /// Resolves a style value. Only `"hidden"` clips.
    #[must_use]
    pub fn from_style(value: Option<&str>) -> Self {
        match value {
            Some("hidden") => Self::Hidden,
            Some("scroll") => Self::Scroll,
            _ => Self::Visible,
        }
    }

    /// Returns `true` for [`Hidden`](Self::Hidden).
    #[inline]
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Clips `target` to `(0, 0, width, height)`.
///
/// If either dimension is unknown the clip is cleared instead, so content is
/// never hidden by a partial or zero-size clip before layout settles.
/// Returns the clip now in effect.
pub fn set_clip<V: StyleTarget>(
    target: &mut V,
    dims: Dimensions,
    tracer: &mut Tracer<'_>,
) -> Option<Rect> {
    let clip = dims.bounds();
    target.set_clip(clip);
    tracer.clip(&ClipEvent {
        element: target.key().trace_id(),
        clip,
    });
    clip
}

/// Removes any clip from `target`.
pub fn clear_clip<V: StyleTarget>(target: &mut V, tracer: &mut Tracer<'_>) {
    target.set_clip(None);
    tracer.clip(&ClipEvent {
        element: target.key().trace_id(),
        clip: None,
    });
}
