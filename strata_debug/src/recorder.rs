// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`StyleSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! Rejected values store the error's display text rather than the error
//! itself.

use kurbo::{Rect, Vec2};
use strata_core::dimensions::Dimensions;
use strata_core::trace::{
    ClipEvent, EntryChange, EntryEvent, ForeignSlotEvent, RejectedEvent, ResizeEvent, StyleSink,
    TransformChange, TransformEvent,
};
use strata_core::transform::Transform3d;
use strata_core::visual::{ObjectId, SlotKind};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_ENTRY: u8 = 1;
const TAG_TRANSFORM: u8 = 2;
const TAG_CLIP: u8 = 3;
const TAG_RESIZE: u8 = 4;
const TAG_FOREIGN_SLOT: u8 = 5;
const TAG_REJECTED: u8 = 6;

const CHANGE_OFFSET: u8 = 0;
const CHANGE_PROJECTION: u8 = 1;
const CHANGE_CLEARED: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`StyleSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_dimensions(&mut self, d: Dimensions) {
        self.write_f64(d.width);
        self.write_f64(d.height);
    }

    fn write_str(&mut self, s: &str) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "error text capped at u32::MAX bytes for recording"
        )]
        let len = s.len().min(u32::MAX as usize) as u32;
        self.write_u32(len);
        self.buf.extend_from_slice(&s.as_bytes()[..len as usize]);
    }
}

impl StyleSink for RecorderSink {
    fn on_entry(&mut self, e: &EntryEvent) {
        self.write_u8(TAG_ENTRY);
        self.write_u64(e.element);
        self.write_u8(match e.change {
            EntryChange::Created => 0,
            EntryChange::Removed => 1,
        });
    }

    fn on_transform(&mut self, e: &TransformEvent) {
        self.write_u8(TAG_TRANSFORM);
        self.write_u64(e.element);
        self.write_dimensions(e.dimensions);
        match e.change {
            TransformChange::Offset(v) => {
                self.write_u8(CHANGE_OFFSET);
                self.write_f64(v.x);
                self.write_f64(v.y);
            }
            TransformChange::Projection(m) => {
                self.write_u8(CHANGE_PROJECTION);
                for col in m.cols {
                    for v in col {
                        self.write_f64(v);
                    }
                }
            }
            TransformChange::Cleared => self.write_u8(CHANGE_CLEARED),
        }
    }

    fn on_clip(&mut self, e: &ClipEvent) {
        self.write_u8(TAG_CLIP);
        self.write_u64(e.element);
        match e.clip {
            Some(r) => {
                self.write_u8(1);
                self.write_f64(r.x0);
                self.write_f64(r.y0);
                self.write_f64(r.x1);
                self.write_f64(r.y1);
            }
            None => self.write_u8(0),
        }
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.write_u8(TAG_RESIZE);
        self.write_u64(e.element);
        self.write_dimensions(e.dimensions);
        self.write_u8(u8::from(e.tracked));
    }

    fn on_foreign_slot(&mut self, e: &ForeignSlotEvent) {
        self.write_u8(TAG_FOREIGN_SLOT);
        self.write_u64(e.element);
        self.write_u8(match e.slot {
            SlotKind::RenderTransform => 0,
            SlotKind::Projection => 1,
        });
        self.write_u64(e.occupant.0);
    }

    fn on_rejected(&mut self, e: &RejectedEvent<'_>) {
        self.write_u8(TAG_REJECTED);
        self.write_u64(e.element);
        self.write_str(&e.error.to_string());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// An [`EntryEvent`].
    Entry(EntryEvent),
    /// A [`TransformEvent`].
    Transform(TransformEvent),
    /// A [`ClipEvent`].
    Clip(ClipEvent),
    /// A [`ResizeEvent`].
    Resize(ResizeEvent),
    /// A [`ForeignSlotEvent`].
    ForeignSlot(ForeignSlotEvent),
    /// A rejected style value.
    Rejected {
        /// Trace id of the element.
        element: u64,
        /// Display text of the error.
        message: String,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let bytes = self.data.get(self.pos..self.pos.checked_add(n)?)?;
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_dimensions(&mut self) -> Option<Dimensions> {
        Some(Dimensions::new(self.read_f64()?, self.read_f64()?))
    }

    fn read_string(&mut self) -> Option<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn decode_entry(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Entry(EntryEvent {
            element: self.read_u64()?,
            change: match self.read_u8()? {
                0 => EntryChange::Created,
                _ => EntryChange::Removed,
            },
        }))
    }

    fn decode_transform(&mut self) -> Option<RecordedEvent> {
        let element = self.read_u64()?;
        let dimensions = self.read_dimensions()?;
        let change = match self.read_u8()? {
            CHANGE_OFFSET => TransformChange::Offset(Vec2::new(self.read_f64()?, self.read_f64()?)),
            CHANGE_PROJECTION => {
                let mut flat = [0.0; 16];
                for v in &mut flat {
                    *v = self.read_f64()?;
                }
                TransformChange::Projection(Transform3d::from_cols_array(flat))
            }
            CHANGE_CLEARED => TransformChange::Cleared,
            _ => return None,
        };
        Some(RecordedEvent::Transform(TransformEvent {
            element,
            change,
            dimensions,
        }))
    }

    fn decode_clip(&mut self) -> Option<RecordedEvent> {
        let element = self.read_u64()?;
        let clip = if self.read_u8()? != 0 {
            Some(Rect::new(
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
            ))
        } else {
            None
        };
        Some(RecordedEvent::Clip(ClipEvent { element, clip }))
    }

    fn decode_resize(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resize(ResizeEvent {
            element: self.read_u64()?,
            dimensions: self.read_dimensions()?,
            tracked: self.read_u8()? != 0,
        }))
    }

    fn decode_foreign_slot(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ForeignSlot(ForeignSlotEvent {
            element: self.read_u64()?,
            slot: match self.read_u8()? {
                0 => SlotKind::RenderTransform,
                _ => SlotKind::Projection,
            },
            occupant: ObjectId(self.read_u64()?),
        }))
    }

    fn decode_rejected(&mut self) -> Option<RecordedEvent> {
        let element = self.read_u64()?;
        let message = self.read_string()?;
        Some(RecordedEvent::Rejected { element, message })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_ENTRY => self.decode_entry(),
            TAG_TRANSFORM => self.decode_transform(),
            TAG_CLIP => self.decode_clip(),
            TAG_RESIZE => self.decode_resize(),
            TAG_FOREIGN_SLOT => self.decode_foreign_slot(),
            TAG_REJECTED => self.decode_rejected(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
