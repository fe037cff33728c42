// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for strata diagnostics.
//!
//! This crate provides [`StyleSink`](strata_core::trace::StyleSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes a JSON array of events from recorded bytes.

pub mod json;
pub mod pretty;
pub mod recorder;
