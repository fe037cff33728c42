// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element content-box dimensions as reported by layout.

use kurbo::{Rect, Size, Vec2};

/// The size of an element's own content box, in layout units.
///
/// Either component may be NaN, meaning layout has not produced a size for
/// that axis yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Width, or NaN if unknown.
    pub width: f64,
    /// Height, or NaN if unknown.
    pub height: f64,
}

impl Dimensions {
    /// Both axes unknown.
    pub const UNKNOWN: Self = Self {
        width: f64::NAN,
        height: f64::NAN,
    };

    /// Creates dimensions from a width and height.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` if neither component is NaN.
    #[inline]
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !self.width.is_nan() && !self.height.is_nan()
    }

    /// Returns the element's own center relative to its top-left corner.
    ///
    /// An unknown axis contributes a zero offset.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        let half = |v: f64| if v.is_nan() { 0.0 } else { v / 2.0 };
        Vec2::new(half(self.width), half(self.height))
    }

    /// Returns the local bounds `(0, 0, width, height)`, or `None` if either
    /// axis is unknown.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.is_known()
            .then(|| Rect::new(0.0, 0.0, self.width, self.height))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<Size> for Dimensions {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}
