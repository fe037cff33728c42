// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes a JSON array with one object per event.

use std::io::{self, Write};

use serde_json::{Value, json};
use strata_core::dimensions::Dimensions;
use strata_core::trace::{EntryChange, TransformChange};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
///
/// Every object has `"event"` and `"element"` keys. Unknown dimensions are
/// written as `null`.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|e| to_json(&e)).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_json(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::Entry(e) => {
            let change = match e.change {
                EntryChange::Created => "created",
                EntryChange::Removed => "removed",
            };
            json!({
                "event": "entry",
                "element": e.element,
                "change": change,
            })
        }
        RecordedEvent::Transform(e) => {
            let mut value = json!({
                "event": "transform",
                "element": e.element,
                "dimensions": dims(e.dimensions),
            });
            let (kind, detail) = match e.change {
                TransformChange::Offset(v) => ("offset", json!([v.x, v.y])),
                TransformChange::Projection(m) => ("projection", json!(m.cols)),
                TransformChange::Cleared => ("cleared", Value::Null),
            };
            value["change"] = json!(kind);
            if !detail.is_null() {
                value[kind] = detail;
            }
            value
        }
        RecordedEvent::Clip(e) => json!({
            "event": "clip",
            "element": e.element,
            "rect": e.clip.map(|r| [r.x0, r.y0, r.x1, r.y1]),
        }),
        RecordedEvent::Resize(e) => json!({
            "event": "resize",
            "element": e.element,
            "dimensions": dims(e.dimensions),
            "tracked": e.tracked,
        }),
        RecordedEvent::ForeignSlot(e) => json!({
            "event": "foreign_slot",
            "element": e.element,
            "slot": e.slot.to_string(),
            "occupant": e.occupant.0,
        }),
        RecordedEvent::Rejected { element, message } => json!({
            "event": "rejected",
            "element": element,
            "message": message,
        }),
    }
}

fn dims(d: Dimensions) -> Value {
    let axis = |v: f64| if v.is_nan() { Value::Null } else { json!(v) };
    json!([axis(d.width), axis(d.height)])
}

#[cfg(test)]
mod tests {
    use strata_core::config::StylerConfig;
    use strata_core::headless::{HeadlessTree, HeadlessVisual};
    use strata_core::ops::TransformOp;
    use strata_core::styler::Styler;

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut tree = HeadlessTree::new();
        let id = tree.create_with_dimensions(Dimensions::new(10.0, f64::NAN));
        let visual = tree.get_mut(id).unwrap();
        let mut styler: Styler<HeadlessVisual, RecorderSink> =
            Styler::with_sink(StylerConfig::default(), RecorderSink::new());

        styler.set_transform(visual, Some(&[TransformOp::translate(3.0, 4.0)]));
        styler.set_overflow(visual, Some("hidden"));

        let mut out = Vec::new();
        export(styler.sink().as_bytes(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();

        // entry, transform, clip
        assert_eq!(parsed.len(), 3, "{parsed:?}");
        assert_eq!(parsed[0]["event"], "entry");
        assert_eq!(parsed[0]["change"], "created");

        assert_eq!(parsed[1]["event"], "transform");
        assert_eq!(parsed[1]["change"], "offset");
        assert_eq!(parsed[1]["offset"], json!([3.0, 4.0]));
        assert_eq!(parsed[1]["dimensions"], json!([10.0, null]));

        assert_eq!(parsed[2]["event"], "clip");
        assert!(parsed[2]["rect"].is_null(), "unknown height clears the clip");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty(), "no events");
    }
}
