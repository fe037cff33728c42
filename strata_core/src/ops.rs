// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical transform operations and their declarative style encoding.
//!
//! A transform style is an ordered list of single-key objects, as produced by
//! declarative UI frameworks:
//!
//! ```json
//! [{ "translateX": 10 }, { "rotate": "45deg" }, { "scale": 2 }]
//! ```
//!
//! Operations are authored as if the element's own center were the origin;
//! [`compose`](crate::compose::compose) takes care of re-centering.

use alloc::borrow::ToOwned;
use alloc::string::ToString;
use alloc::vec::Vec;

use serde_json::Value;

use crate::error::StyleError;
use crate::transform::Transform3d;

/// One declarative transform primitive, prior to composition.
///
/// Angles are in radians; lengths are in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Translation along each axis.
    Translate {
        /// X offset.
        x: f64,
        /// Y offset.
        y: f64,
        /// Z offset.
        z: f64,
    },
    /// Scale along each axis.
    Scale {
        /// X factor.
        x: f64,
        /// Y factor.
        y: f64,
        /// Z factor.
        z: f64,
    },
    /// Rotation around the X axis.
    RotateX(f64),
    /// Rotation around the Y axis.
    RotateY(f64),
    /// Rotation around the Z axis (the in-plane rotation).
    RotateZ(f64),
    /// Horizontal skew.
    SkewX(f64),
    /// Vertical skew.
    SkewY(f64),
    /// Perspective with the given viewer distance.
    Perspective(f64),
    /// An explicit matrix.
    Matrix(Transform3d),
}

impl TransformOp {
    /// A 2-D translation.
    #[inline]
    #[must_use]
    pub const fn translate(x: f64, y: f64) -> Self {
        Self::Translate { x, y, z: 0.0 }
    }

    /// A 2-D scale.
    #[inline]
    #[must_use]
    pub const fn scale(x: f64, y: f64) -> Self {
        Self::Scale { x, y, z: 1.0 }
    }

    /// An in-plane rotation (radians).
    #[inline]
    #[must_use]
    pub const fn rotate(radians: f64) -> Self {
        Self::RotateZ(radians)
    }

    /// Returns this operation's own matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Transform3d {
        match *self {
            Self::Translate { x, y, z } => Transform3d::from_translation(x, y, z),
            Self::Scale { x, y, z } => Transform3d::from_scale(x, y, z),
            Self::RotateX(a) => Transform3d::from_rotation_x(a),
            Self::RotateY(a) => Transform3d::from_rotation_y(a),
            Self::RotateZ(a) => Transform3d::from_rotation_z(a),
            Self::SkewX(a) => Transform3d::from_skew(a, 0.0),
            Self::SkewY(a) => Transform3d::from_skew(0.0, a),
            Self::Perspective(d) => Transform3d::from_perspective(d),
            Self::Matrix(m) => m,
        }
    }
}

/// Parses a transform style value.
///
/// `null` means "no custom transform" and yields `Ok(None)`. An array yields
/// the operations in order; an empty array is a valid identity transform.
///
/// # Errors
///
/// Returns a [`StyleError`] describing the first malformed entry.
pub fn parse_transform(value: &Value) -> Result<Option<Vec<TransformOp>>, StyleError> {
    let list = match value {
        Value::Null => return Ok(None),
        Value::Array(list) => list,
        _ => return Err(StyleError::NotAList),
    };
    list.iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_entry(index: usize, entry: &Value) -> Result<TransformOp, StyleError> {
    let (name, arg) = single_entry(entry).ok_or(StyleError::InvalidOperation { index })?;
    let op = match name {
        "translateX" => TransformOp::Translate {
            x: number(name, arg)?,
            y: 0.0,
            z: 0.0,
        },
        "translateY" => TransformOp::Translate {
            x: 0.0,
            y: number(name, arg)?,
            z: 0.0,
        },
        "translateZ" => TransformOp::Translate {
            x: 0.0,
            y: 0.0,
            z: number(name, arg)?,
        },
        "translate" => parse_translate(arg)?,
        "scale" => {
            let s = number(name, arg)?;
            TransformOp::Scale { x: s, y: s, z: 1.0 }
        }
        "scaleX" => TransformOp::Scale {
            x: number(name, arg)?,
            y: 1.0,
            z: 1.0,
        },
        "scaleY" => TransformOp::Scale {
            x: 1.0,
            y: number(name, arg)?,
            z: 1.0,
        },
        "scaleZ" => TransformOp::Scale {
            x: 1.0,
            y: 1.0,
            z: number(name, arg)?,
        },
        "rotate" | "rotateZ" => TransformOp::RotateZ(angle(name, arg)?),
        "rotateX" => TransformOp::RotateX(angle(name, arg)?),
        "rotateY" => TransformOp::RotateY(angle(name, arg)?),
        "skewX" => TransformOp::SkewX(angle(name, arg)?),
        "skewY" => TransformOp::SkewY(angle(name, arg)?),
        "perspective" => TransformOp::Perspective(number(name, arg)?),
        "matrix" => TransformOp::Matrix(parse_matrix(arg)?),
        other => return Err(StyleError::UnknownOperation(other.to_owned())),
    };
    Ok(op)
}

fn single_entry(entry: &Value) -> Option<(&str, &Value)> {
    let map = entry.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next().map(|(k, v)| (k.as_str(), v))
}

fn number(op: &str, value: &Value) -> Result<f64, StyleError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StyleError::InvalidNumber { op: op.to_owned() })
}

fn numbers(op: &str, value: &Value) -> Result<Vec<f64>, StyleError> {
    let items = value
        .as_array()
        .ok_or_else(|| StyleError::InvalidNumber { op: op.to_owned() })?;
    items.iter().map(|v| number(op, v)).collect()
}

fn angle(op: &str, value: &Value) -> Result<f64, StyleError> {
    let invalid = || StyleError::InvalidAngle {
        op: op.to_owned(),
        value: value.to_string(),
    };
    let text = value.as_str().ok_or_else(invalid)?.trim();
    let radians = if let Some(deg) = text.strip_suffix("deg") {
        deg.trim().parse::<f64>().map(f64::to_radians)
    } else if let Some(rad) = text.strip_suffix("rad") {
        rad.trim().parse::<f64>()
    } else {
        return Err(invalid());
    };
    radians
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(invalid)
}

fn parse_translate(arg: &Value) -> Result<TransformOp, StyleError> {
    match numbers("translate", arg)?.as_slice() {
        [x, y] => Ok(TransformOp::translate(*x, *y)),
        [x, y, z] => Ok(TransformOp::Translate {
            x: *x,
            y: *y,
            z: *z,
        }),
        other => Err(StyleError::InvalidVector { len: other.len() }),
    }
}

/// Accepts 16 values in column-major order, or a column-major 3×3 2-D
/// matrix which is widened to 4×4.
fn parse_matrix(arg: &Value) -> Result<Transform3d, StyleError> {
    let m = numbers("matrix", arg)?;
    match m.len() {
        16 => {
            let mut flat = [0.0; 16];
            flat.copy_from_slice(&m);
            Ok(Transform3d::from_cols_array(flat))
        }
        9 => Ok(Transform3d::from_cols(
            [m[0], m[1], 0.0, m[2]],
            [m[3], m[4], 0.0, m[5]],
            [0.0, 0.0, 1.0, 0.0],
            [m[6], m[7], 0.0, m[8]],
        )),
        len => Err(StyleError::InvalidMatrix { len }),
    }
}
