// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event log exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a JSON array with one object per event. Every object
//! carries an `"event"` name and the `"layer"` it concerns.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Converts one recorded event into its JSON object.
#[must_use]
pub fn to_value(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::LayerBegin(e) => json!({
            "event": "layer_begin",
            "layer": e.layer.0,
            "mode": e.mode.as_str(),
            "interval": e.interval,
            "balance": e.balance,
        }),
        RecordedEvent::InstancesRemoved(e) => json!({
            "event": "instances_removed",
            "layer": e.layer.0,
            "removed": e.removed,
        }),
        RecordedEvent::BackgroundPreserved(e) => json!({
            "event": "background_preserved",
            "layer": e.layer.0,
            "paths": e.paths,
        }),
        RecordedEvent::PathStamped(e) => json!({
            "event": "path_stamped",
            "layer": e.layer.0,
            "path": e.path.0,
            "fine_samples": e.fine_samples,
            "instances": e.instances,
        }),
        RecordedEvent::PathSkipped {
            layer,
            path,
            reason,
        } => json!({
            "event": "path_skipped",
            "layer": layer.0,
            "path": path.0,
            "reason": reason,
        }),
        RecordedEvent::LayerEnd(e) => json!({
            "event": "layer_end",
            "layer": e.layer.0,
            "paths_stamped": e.paths_stamped,
            "paths_skipped": e.paths_skipped,
            "instances": e.instances,
        }),
        RecordedEvent::LayerFailed(e) => json!({
            "event": "layer_failed",
            "layer": e.layer.0,
            "kind": e.kind.as_str(),
        }),
    }
}

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|e| to_value(&e)).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use stitcher_core::font::{LayerId, PathId};
    use stitcher_core::rebuild::RebuildMode;
    use stitcher_core::trace::{LayerBeginEvent, PathSkippedEvent, PathStampedEvent, TraceSink};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_layer_begin(&LayerBeginEvent {
            layer: LayerId(0),
            mode: RebuildMode::SingleShotOverlay,
            interval: 50.0,
            balance: true,
        });
        rec.on_path_stamped(&PathStampedEvent {
            layer: LayerId(0),
            path: PathId(5),
            fine_samples: 66,
            instances: 6,
        });
        rec.on_path_skipped(&PathSkippedEvent {
            layer: LayerId(0),
            path: PathId(6),
            reason: "path has fewer than two nodes",
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "layer_begin");
        assert_eq!(parsed[0]["mode"], "overlay");
        assert_eq!(parsed[0]["interval"], 50.0);

        assert_eq!(parsed[1]["event"], "path_stamped");
        assert_eq!(parsed[1]["path"], 5);
        assert_eq!(parsed[1]["instances"], 6);

        assert_eq!(parsed[2]["event"], "path_skipped");
        assert_eq!(parsed[2]["reason"], "path has fewer than two nodes");
    }

    #[test]
    fn empty_recording_is_empty_array() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty(), "expected no events");
    }
}
