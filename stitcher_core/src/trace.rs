// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for stitching passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [rebuild controller](crate::rebuild) calls as it works through a layer.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Ready-made sinks (pretty printer, binary recorder, JSON export) live in the
//! `stitcher_debug` crate.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::ErrorKind;
use crate::font::{LayerId, PathId};
use crate::rebuild::RebuildMode;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a layer pass starts.
#[derive(Clone, Copy, Debug)]
pub struct LayerBeginEvent {
    /// Layer being processed.
    pub layer: LayerId,
    /// Chosen rebuild mode.
    pub mode: RebuildMode,
    /// Effective (clamped) interval.
    pub interval: f64,
    /// Whether end balancing is on.
    pub balance: bool,
}

/// Emitted after previously stamped instances were removed.
#[derive(Clone, Copy, Debug)]
pub struct InstancesRemovedEvent {
    /// Layer being processed.
    pub layer: LayerId,
    /// Number of components removed.
    pub removed: u32,
}

/// Emitted after foreground outlines moved into the background.
#[derive(Clone, Copy, Debug)]
pub struct BackgroundPreservedEvent {
    /// Layer being processed.
    pub layer: LayerId,
    /// Number of outlines moved.
    pub paths: u32,
}

/// Emitted after a path received its instances.
#[derive(Clone, Copy, Debug)]
pub struct PathStampedEvent {
    /// Layer being processed.
    pub layer: LayerId,
    /// Source path.
    pub path: PathId,
    /// Fine-grained samples taken along the path.
    pub fine_samples: u32,
    /// Instances appended.
    pub instances: u32,
}

/// Emitted when a path contributes nothing because of its geometry.
#[derive(Clone, Copy, Debug)]
pub struct PathSkippedEvent {
    /// Layer being processed.
    pub layer: LayerId,
    /// Skipped path.
    pub path: PathId,
    /// Why it was skipped.
    pub reason: &'static str,
}

/// Emitted when a layer pass completes.
#[derive(Clone, Copy, Debug)]
pub struct LayerEndEvent {
    /// Layer that was processed.
    pub layer: LayerId,
    /// Paths that received instances.
    pub paths_stamped: u32,
    /// Paths skipped for degenerate geometry.
    pub paths_skipped: u32,
    /// Instances appended in total.
    pub instances: u32,
}

/// Emitted when a layer pass is abandoned.
#[derive(Clone, Copy, Debug)]
pub struct LayerFailedEvent {
    /// Layer that failed.
    pub layer: LayerId,
    /// What kind of failure ended the pass.
    pub kind: ErrorKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from stitching passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a layer pass starts.
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        _ = e;
    }

    /// Called after old instances were removed.
    fn on_instances_removed(&mut self, e: &InstancesRemovedEvent) {
        _ = e;
    }

    /// Called after outlines were moved into the background.
    fn on_background_preserved(&mut self, e: &BackgroundPreservedEvent) {
        _ = e;
    }

    /// Called after a path was stamped.
    fn on_path_stamped(&mut self, e: &PathStampedEvent) {
        _ = e;
    }

    /// Called when a path is skipped.
    fn on_path_skipped(&mut self, e: &PathSkippedEvent) {
        _ = e;
    }

    /// Called when a layer pass completes.
    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        _ = e;
    }

    /// Called when a layer pass is abandoned.
    fn on_layer_failed(&mut self, e: &LayerFailedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LayerBeginEvent`].
    #[inline]
    pub fn layer_begin(&mut self, e: &LayerBeginEvent) {
        dispatch!(self, on_layer_begin, e);
    }

    /// Emits an [`InstancesRemovedEvent`].
    #[inline]
    pub fn instances_removed(&mut self, e: &InstancesRemovedEvent) {
        dispatch!(self, on_instances_removed, e);
    }

    /// Emits a [`BackgroundPreservedEvent`].
    #[inline]
    pub fn background_preserved(&mut self, e: &BackgroundPreservedEvent) {
        dispatch!(self, on_background_preserved, e);
    }

    /// Emits a [`PathStampedEvent`].
    #[inline]
    pub fn path_stamped(&mut self, e: &PathStampedEvent) {
        dispatch!(self, on_path_stamped, e);
    }

    /// Emits a [`PathSkippedEvent`].
    #[inline]
    pub fn path_skipped(&mut self, e: &PathSkippedEvent) {
        dispatch!(self, on_path_skipped, e);
    }

    /// Emits a [`LayerEndEvent`].
    #[inline]
    pub fn layer_end(&mut self, e: &LayerEndEvent) {
        dispatch!(self, on_layer_end, e);
    }

    /// Emits a [`LayerFailedEvent`].
    #[inline]
    pub fn layer_failed(&mut self, e: &LayerFailedEvent) {
        dispatch!(self, on_layer_failed, e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
