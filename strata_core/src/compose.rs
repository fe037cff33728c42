// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform composition and classification.
//!
//! Logical transforms are authored with the element's own center as the
//! origin, while native visuals place their origin at the top-left corner.
//! [`compose`] bridges the two by conjugating the operation product with a
//! translation to the center:
//!
//! ```text
//!   T(+c) · op₀ · op₁ · … · opₙ · T(-c)        c = (width / 2, height / 2)
//! ```
//!
//! Because `c` depends on the element's size, the same operation list yields a
//! different matrix after every resize, and must be recomposed.
//!
//! [`classify`] then decides whether the result can use a cheap 2-D offset or
//! needs a full projection.

use kurbo::Vec2;

use crate::dimensions::Dimensions;
use crate::ops::TransformOp;
use crate::transform::Transform3d;

/// Composes `ops` into a single matrix pivoting on the center of `dims`.
///
/// The last op is applied to points first, as in CSS. Unknown (NaN) axes
/// contribute no centering offset. An empty list composes to the identity.
#[must_use]
pub fn compose(ops: &[TransformOp], dims: Dimensions) -> Transform3d {
    let c = dims.center();
    let product = ops
        .iter()
        .fold(Transform3d::IDENTITY, |acc, op| acc * op.to_matrix());
    Transform3d::from_translation(c.x, c.y, 0.0)
        * product
        * Transform3d::from_translation(-c.x, -c.y, 0.0)
}

/// The slot a composed matrix needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Classification {
    /// Nothing but an X/Y offset; fits a 2-D render transform.
    Translation2d(Vec2),
    /// Anything else; needs a 3-D projection.
    General(Transform3d),
}

impl Classification {
    /// Returns the matrix this classification applies.
    #[must_use]
    pub fn to_matrix(&self) -> Transform3d {
        match *self {
            Self::Translation2d(offset) => Transform3d::from_translation(offset.x, offset.y, 0.0),
            Self::General(m) => m,
        }
    }
}

/// Classifies a matrix as a pure 2-D translation or a general transform.
///
/// The X/Y translation components are zeroed; if what remains is exactly the
/// identity, the matrix is a [`Translation2d`](Classification::Translation2d).
#[must_use]
pub fn classify(m: Transform3d) -> Classification {
    if m.without_translation_2d() == Transform3d::IDENTITY {
        Classification::Translation2d(m.translation_2d())
    } else {
        Classification::General(m)
    }
}
