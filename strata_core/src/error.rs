// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced to the style dispatcher.

use alloc::string::String;

/// A style value was rejected.
///
/// Rejection is local to the single update: the element's previously applied
/// state is left exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// The transform value was neither `null` nor an array.
    #[error("transform must be an array of operations or null")]
    NotAList,
    /// An array entry was not an object with exactly one key.
    #[error("transform operation {index} must be an object with exactly one key")]
    InvalidOperation {
        /// Position of the entry in the list.
        index: usize,
    },
    /// The operation name is not recognized.
    #[error("unknown transform operation `{0}`")]
    UnknownOperation(String),
    /// The operation expected a finite number.
    #[error("`{op}` expects a finite number")]
    InvalidNumber {
        /// Operation name.
        op: String,
    },
    /// The operation expected an angle string.
    #[error("`{op}` expects an angle such as \"45deg\" or \"0.5rad\", got {value}")]
    InvalidAngle {
        /// Operation name.
        op: String,
        /// The offending value, rendered as JSON.
        value: String,
    },
    /// `translate` expected two or three numbers.
    #[error("`translate` expects 2 or 3 numbers, got {len}")]
    InvalidVector {
        /// Number of entries supplied.
        len: usize,
    },
    /// `matrix` expected nine or sixteen numbers.
    #[error("`matrix` expects 9 or 16 numbers, got {len}")]
    InvalidMatrix {
        /// Number of entries supplied.
        len: usize,
    },
    /// The operations compose to a matrix with infinite or NaN entries.
    #[error("transform composes to a non-finite matrix")]
    NonFiniteTransform,
}
