// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`StyleSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::dimensions::Dimensions;
use strata_core::trace::{
    ClipEvent, EntryChange, EntryEvent, ForeignSlotEvent, RejectedEvent, ResizeEvent, StyleSink,
    TransformChange, TransformEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

struct Dims(Dimensions);

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let axis = |v: f64| if v.is_nan() { "?".to_owned() } else { format!("{v}") };
        write!(f, "{}x{}", axis(self.0.width), axis(self.0.height))
    }
}

impl<W: Write> StyleSink for PrettyPrintSink<W> {
    fn on_entry(&mut self, e: &EntryEvent) {
        let what = match e.change {
            EntryChange::Created => "created",
            EntryChange::Removed => "removed",
        };
        let _ = writeln!(self.writer, "[entry] element={} {what}", e.element);
    }

    fn on_transform(&mut self, e: &TransformEvent) {
        let dims = Dims(e.dimensions);
        let _ = match e.change {
            TransformChange::Offset(v) => writeln!(
                self.writer,
                "[transform] element={} dims={dims} offset=({}, {})",
                e.element, v.x, v.y,
            ),
            TransformChange::Projection(m) => writeln!(
                self.writer,
                "[transform] element={} dims={dims} projection={:?}",
                e.element, m.cols,
            ),
            TransformChange::Cleared => writeln!(
                self.writer,
                "[transform] element={} dims={dims} cleared",
                e.element,
            ),
        };
    }

    fn on_clip(&mut self, e: &ClipEvent) {
        let _ = match e.clip {
            Some(r) => writeln!(
                self.writer,
                "[clip] element={} rect=({}, {}, {}, {})",
                e.element, r.x0, r.y0, r.x1, r.y1,
            ),
            None => writeln!(self.writer, "[clip] element={} none", e.element),
        };
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        let tracked = if e.tracked { "" } else { " (untracked)" };
        let _ = writeln!(
            self.writer,
            "[resize] element={} dims={}{tracked}",
            e.element,
            Dims(e.dimensions),
        );
    }

    fn on_foreign_slot(&mut self, e: &ForeignSlotEvent) {
        let _ = writeln!(
            self.writer,
            "[foreign] element={} slot={} occupant={:?} OVERWRITTEN",
            e.element, e.slot, e.occupant,
        );
    }

    fn on_rejected(&mut self, e: &RejectedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[rejected] element={} {}",
            e.element, e.error,
        );
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Vec2};
    use strata_core::error::StyleError;

    use super::*;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn formats_transform_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_transform(&TransformEvent {
            element: 4,
            change: TransformChange::Offset(Vec2::new(1.5, -2.0)),
            dimensions: Dimensions::new(10.0, f64::NAN),
        });
        sink.on_transform(&TransformEvent {
            element: 4,
            change: TransformChange::Cleared,
            dimensions: Dimensions::new(10.0, 20.0),
        });
        assert_eq!(
            output(sink),
            "[transform] element=4 dims=10x? offset=(1.5, -2)\n\
             [transform] element=4 dims=10x20 cleared\n"
        );
    }

    #[test]
    fn formats_clip_and_rejection() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_clip(&ClipEvent {
            element: 1,
            clip: Some(Rect::new(0.0, 0.0, 3.0, 4.0)),
        });
        sink.on_clip(&ClipEvent {
            element: 1,
            clip: None,
        });
        sink.on_rejected(&RejectedEvent {
            element: 1,
            error: &StyleError::NotAList,
        });
        let text = output(sink);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "[clip] element=1 rect=(0, 0, 3, 4)");
        assert_eq!(lines[1], "[clip] element=1 none");
        assert!(lines[2].starts_with("[rejected] element=1 transform must be"), "got {}", lines[2]);
    }

    #[test]
    fn marks_untracked_resizes() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_resize(&ResizeEvent {
            element: 9,
            dimensions: Dimensions::new(2.0, 2.0),
            tracked: false,
        });
        assert_eq!(output(sink), "[resize] element=9 dims=2x2 (untracked)\n");
    }
}
