// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM backend for strata.
//!
//! [`DomVisual`] wraps an `HtmlElement` and implements
//! [`StyleTarget`](strata_core::visual::StyleTarget), so a
//! [`Styler`](strata_core::styler::Styler) can drive inline styles and ARIA
//! attributes directly.
//!
//! The two transform slots map to independent CSS properties: the
//! render-transform slot to `translate`, the projection slot to
//! `transform: matrix3d(...)`.

#![no_std]

extern crate alloc;

mod visual;

pub use strata_core::visual::StyleTarget;
pub use visual::{DomVisual, PointerHook};
