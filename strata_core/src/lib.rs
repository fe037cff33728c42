// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size-aware style application for retained visual trees.
//!
//! `strata_core` sits between an element system that sets style properties
//! and a platform visual tree that renders them. Most properties pass
//! straight through. Transform and overflow clipping depend on the element's
//! own size, which is only known after layout, so they are remembered in a
//! side-table and recomputed whenever the size changes. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   style write ──► Styler ──► size-independent ──► StyleTarget setters
//!                     │
//!                     ▼
//!               StyleStore (side-table)
//!                     │   ▲
//!   compose() ◄───────┘   └─── on_dimensions_changed
//!       │
//!       ▼
//!   classify() ──► SlotWriter ──► render-transform XOR projection slot
//!                                  + overflow clip
//! ```
//!
//! **[`styler`]** — The [`Styler`](styler::Styler) facade: one method per
//! style property plus attach/detach/resize lifecycle hooks.
//!
//! **[`store`]** — Side-table of per-element size-dependent state, created
//! lazily and dropped on detach.
//!
//! **[`compose`]** — Folds a transform list into one matrix pivoted on the
//! element's center, and classifies the result as a pure 2-D translation or
//! a general matrix.
//!
//! **[`slots`]** — Writes classified transforms into the mutually exclusive
//! render-transform and projection slots, guarding against foreign
//! occupants.
//!
//! **[`clip`]** — Overflow clipping to the element's own bounds.
//!
//! **[`ops`]** — Transform operations and their JSON style representation.
//!
//! **[`visual`]** — The [`StyleTarget`](visual::StyleTarget) trait that
//! platform backends implement.
//!
//! **[`headless`]** — An in-memory [`StyleTarget`](visual::StyleTarget) tree
//! for tests and headless hosts.
//!
//! **[`trace`]** — [`StyleSink`](trace::StyleSink) trait and event types,
//! with zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod clip;
pub mod compose;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod headless;
pub mod ops;
pub mod slots;
pub mod store;
pub mod styler;
pub mod trace;
pub mod transform;
pub mod visual;
