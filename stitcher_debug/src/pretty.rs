// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use stitcher_core::trace::{
    BackgroundPreservedEvent, InstancesRemovedEvent, LayerBeginEvent, LayerEndEvent,
    LayerFailedEvent, PathSkippedEvent, PathStampedEvent, TraceSink,
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

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:begin] layer={} mode={} interval={:.1} balance={}",
            e.layer.0,
            e.mode.as_str(),
            e.interval,
            e.balance,
        );
    }

    fn on_instances_removed(&mut self, e: &InstancesRemovedEvent) {
        let _ = writeln!(
            self.writer,
            "[removed] layer={} instances={}",
            e.layer.0, e.removed,
        );
    }

    fn on_background_preserved(&mut self, e: &BackgroundPreservedEvent) {
        let _ = writeln!(
            self.writer,
            "[background] layer={} paths={}",
            e.layer.0, e.paths,
        );
    }

    fn on_path_stamped(&mut self, e: &PathStampedEvent) {
        let _ = writeln!(
            self.writer,
            "[stamp] layer={} path={} samples={} instances={}",
            e.layer.0, e.path.0, e.fine_samples, e.instances,
        );
    }

    fn on_path_skipped(&mut self, e: &PathSkippedEvent) {
        let _ = writeln!(
            self.writer,
            "[skip] layer={} path={} reason={:?}",
            e.layer.0, e.path.0, e.reason,
        );
    }

    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:end] layer={} stamped={} skipped={} instances={}",
            e.layer.0, e.paths_stamped, e.paths_skipped, e.instances,
        );
    }

    fn on_layer_failed(&mut self, e: &LayerFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:FAILED] layer={} kind={}",
            e.layer.0,
            e.kind.as_str(),
        );
    }
}
