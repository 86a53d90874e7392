// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! Every record is fixed-size except path skips, whose reason is stored as a
//! length-prefixed UTF-8 string.

use stitcher_core::error::ErrorKind;
use stitcher_core::font::{LayerId, PathId};
use stitcher_core::rebuild::RebuildMode;
use stitcher_core::trace::{
    BackgroundPreservedEvent, InstancesRemovedEvent, LayerBeginEvent, LayerEndEvent,
    LayerFailedEvent, PathSkippedEvent, PathStampedEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYER_BEGIN: u8 = 1;
const TAG_INSTANCES_REMOVED: u8 = 2;
const TAG_BACKGROUND_PRESERVED: u8 = 3;
const TAG_PATH_STAMPED: u8 = 4;
const TAG_PATH_SKIPPED: u8 = 5;
const TAG_LAYER_END: u8 = 6;
const TAG_LAYER_FAILED: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
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

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        let len = u16::try_from(s.len()).unwrap_or(u16::MAX);
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(&s.as_bytes()[..usize::from(len)]);
    }

    fn write_mode(&mut self, m: RebuildMode) {
        self.write_u8(match m {
            RebuildMode::FullRebuild => 0,
            RebuildMode::SelectiveRebuild => 1,
            RebuildMode::SingleShotOverlay => 2,
        });
    }

    fn write_kind(&mut self, k: ErrorKind) {
        self.write_u8(match k {
            ErrorKind::InvalidConfiguration => 0,
            ErrorKind::MissingMotif => 1,
            ErrorKind::DegenerateGeometry => 2,
            ErrorKind::HostCollaboratorFailure => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        self.write_u8(TAG_LAYER_BEGIN);
        self.write_u32(e.layer.0);
        self.write_mode(e.mode);
        self.write_f64(e.interval);
        self.write_u8(u8::from(e.balance));
    }

    fn on_instances_removed(&mut self, e: &InstancesRemovedEvent) {
        self.write_u8(TAG_INSTANCES_REMOVED);
        self.write_u32(e.layer.0);
        self.write_u32(e.removed);
    }

    fn on_background_preserved(&mut self, e: &BackgroundPreservedEvent) {
        self.write_u8(TAG_BACKGROUND_PRESERVED);
        self.write_u32(e.layer.0);
        self.write_u32(e.paths);
    }

    fn on_path_stamped(&mut self, e: &PathStampedEvent) {
        self.write_u8(TAG_PATH_STAMPED);
        self.write_u32(e.layer.0);
        self.write_u32(e.path.0);
        self.write_u32(e.fine_samples);
        self.write_u32(e.instances);
    }

    fn on_path_skipped(&mut self, e: &PathSkippedEvent) {
        self.write_u8(TAG_PATH_SKIPPED);
        self.write_u32(e.layer.0);
        self.write_u32(e.path.0);
        self.write_str(e.reason);
    }

    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        self.write_u8(TAG_LAYER_END);
        self.write_u32(e.layer.0);
        self.write_u32(e.paths_stamped);
        self.write_u32(e.paths_skipped);
        self.write_u32(e.instances);
    }

    fn on_layer_failed(&mut self, e: &LayerFailedEvent) {
        self.write_u8(TAG_LAYER_FAILED);
        self.write_u32(e.layer.0);
        self.write_kind(e.kind);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`LayerBeginEvent`].
    LayerBegin(LayerBeginEvent),
    /// An [`InstancesRemovedEvent`].
    InstancesRemoved(InstancesRemovedEvent),
    /// A [`BackgroundPreservedEvent`].
    BackgroundPreserved(BackgroundPreservedEvent),
    /// A [`PathStampedEvent`].
    PathStamped(PathStampedEvent),
    /// A [`PathSkippedEvent`] with an owned reason.
    PathSkipped {
        /// Layer being processed.
        layer: LayerId,
        /// Skipped path.
        path: PathId,
        /// Why it was skipped.
        reason: String,
    },
    /// A [`LayerEndEvent`].
    LayerEnd(LayerEndEvent),
    /// A [`LayerFailedEvent`].
    LayerFailed(LayerFailedEvent),
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
    fn read_bytes(&mut self, n: usize) -> Option<&[u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_str(&mut self) -> Option<String> {
        let len = u16::from_le_bytes(self.read_bytes(2)?.try_into().ok()?);
        let bytes = self.read_bytes(usize::from(len))?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_layer(&mut self) -> Option<LayerId> {
        self.read_u32().map(LayerId)
    }

    fn read_path(&mut self) -> Option<PathId> {
        self.read_u32().map(PathId)
    }

    fn read_mode(&mut self) -> Option<RebuildMode> {
        Some(match self.read_u8()? {
            0 => RebuildMode::FullRebuild,
            1 => RebuildMode::SelectiveRebuild,
            _ => RebuildMode::SingleShotOverlay,
        })
    }

    fn read_kind(&mut self) -> Option<ErrorKind> {
        Some(match self.read_u8()? {
            0 => ErrorKind::InvalidConfiguration,
            1 => ErrorKind::MissingMotif,
            2 => ErrorKind::DegenerateGeometry,
            _ => ErrorKind::HostCollaboratorFailure,
        })
    }

    fn decode_layer_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerBegin(LayerBeginEvent {
            layer: self.read_layer()?,
            mode: self.read_mode()?,
            interval: self.read_f64()?,
            balance: self.read_u8()? != 0,
        }))
    }

    fn decode_instances_removed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::InstancesRemoved(InstancesRemovedEvent {
            layer: self.read_layer()?,
            removed: self.read_u32()?,
        }))
    }

    fn decode_background_preserved(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BackgroundPreserved(BackgroundPreservedEvent {
            layer: self.read_layer()?,
            paths: self.read_u32()?,
        }))
    }

    fn decode_path_stamped(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PathStamped(PathStampedEvent {
            layer: self.read_layer()?,
            path: self.read_path()?,
            fine_samples: self.read_u32()?,
            instances: self.read_u32()?,
        }))
    }

    fn decode_path_skipped(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PathSkipped {
            layer: self.read_layer()?,
            path: self.read_path()?,
            reason: self.read_str()?,
        })
    }

    fn decode_layer_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerEnd(LayerEndEvent {
            layer: self.read_layer()?,
            paths_stamped: self.read_u32()?,
            paths_skipped: self.read_u32()?,
            instances: self.read_u32()?,
        }))
    }

    fn decode_layer_failed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerFailed(LayerFailedEvent {
            layer: self.read_layer()?,
            kind: self.read_kind()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LAYER_BEGIN => self.decode_layer_begin(),
            TAG_INSTANCES_REMOVED => self.decode_instances_removed(),
            TAG_BACKGROUND_PRESERVED => self.decode_background_preserved(),
            TAG_PATH_STAMPED => self.decode_path_stamped(),
            TAG_PATH_SKIPPED => self.decode_path_skipped(),
            TAG_LAYER_END => self.decode_layer_end(),
            TAG_LAYER_FAILED => self.decode_layer_failed(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
