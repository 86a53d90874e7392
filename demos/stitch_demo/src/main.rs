// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stitches a small in-memory font and exports the trace.
//!
//! Builds a font with two motifs and a handful of outlines, runs a full pass,
//! a selective pass and an overlay pass, printing events with a
//! [`PrettyPrintSink`](stitcher_debug::pretty::PrettyPrintSink) while a
//! [`RecorderSink`](stitcher_debug::recorder::RecorderSink) captures them for
//! a JSON event log.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Point;
use stitcher_core::config::{Configuration, MemoryPreferences, Overrides};
use stitcher_core::font::{Font, MasterId};
use stitcher_core::host::NodeRef;
use stitcher_core::orient::{ORIENTATION_ANCHOR, ORIGIN_ANCHOR};
use stitcher_core::path::{Node, Path};
use stitcher_core::rebuild::{BatchReport, Request, Stitcher};
use stitcher_core::trace::{
    BackgroundPreservedEvent, InstancesRemovedEvent, LayerBeginEvent, LayerEndEvent,
    LayerFailedEvent, PathSkippedEvent, PathStampedEvent, TraceSink, Tracer,
};

use stitcher_debug::pretty::PrettyPrintSink;
use stitcher_debug::recorder::RecorderSink;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        self.a.on_layer_begin(e);
        self.b.on_layer_begin(e);
    }

    fn on_instances_removed(&mut self, e: &InstancesRemovedEvent) {
        self.a.on_instances_removed(e);
        self.b.on_instances_removed(e);
    }

    fn on_background_preserved(&mut self, e: &BackgroundPreservedEvent) {
        self.a.on_background_preserved(e);
        self.b.on_background_preserved(e);
    }

    fn on_path_stamped(&mut self, e: &PathStampedEvent) {
        self.a.on_path_stamped(e);
        self.b.on_path_stamped(e);
    }

    fn on_path_skipped(&mut self, e: &PathSkippedEvent) {
        self.a.on_path_skipped(e);
        self.b.on_path_skipped(e);
    }

    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        self.a.on_layer_end(e);
        self.b.on_layer_end(e);
    }

    fn on_layer_failed(&mut self, e: &LayerFailedEvent) {
        self.a.on_layer_failed(e);
        self.b.on_layer_failed(e);
    }
}

fn summarize(label: &str, report: &BatchReport) {
    for result in &report.layers {
        match &result.outcome {
            Ok(outcome) => println!("{label}: {:?} -> {outcome:?}", result.layer),
            Err(e) => println!("{label}: {:?} failed: {e}", result.layer),
        }
    }
}

fn main() -> std::io::Result<()> {
    // -- font --------------------------------------------------------------
    let master = MasterId(0);
    let mut font = Font::new();
    font.add_layer("_circle", master);
    let dash = font.add_layer("_dash", master);
    font.set_anchor(dash, ORIGIN_ANCHOR, Point::new(0.0, 0.0))
        .map_err(std::io::Error::other)?;
    font.set_anchor(dash, ORIENTATION_ANCHOR, Point::new(20.0, 0.0))
        .map_err(std::io::Error::other)?;

    let o = font.add_layer("o", master);
    let ring = font
        .add_path(
            o,
            Path::closed(vec![
                Node::on(250.0, 0.0),
                Node::off(388.0, 0.0),
                Node::off(500.0, 112.0),
                Node::on(500.0, 250.0),
                Node::off(500.0, 388.0),
                Node::off(388.0, 500.0),
                Node::on(250.0, 500.0),
                Node::off(112.0, 500.0),
                Node::off(0.0, 388.0),
                Node::on(0.0, 250.0),
                Node::off(0.0, 112.0),
                Node::off(112.0, 0.0),
            ]),
        )
        .map_err(std::io::Error::other)?;
    font.add_path(
        o,
        Path::open(vec![Node::on(240.0, 240.0), Node::on(241.0, 241.0)]),
    )
    .map_err(std::io::Error::other)?;

    let l = font.add_layer("l", master);
    font.add_path(
        l,
        Path::open(vec![Node::on(100.0, 0.0), Node::on(100.0, 700.0)]),
    )
    .map_err(std::io::Error::other)?;


    // -- configuration -----------------------------------------------------
    let mut prefs = MemoryPreferences::with_defaults();
    let mut config = Configuration::load(&prefs).map_err(std::io::Error::other)?;
    config.set_interval(60.0);
    config
        .set_component("_dash,_circle*")
        .map_err(std::io::Error::other)?;
    config.balance = true;
    config.save(&mut prefs);
    println!("custom parameter: {}", config.custom_parameter());
    let stitcher = Stitcher::new(config);

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- passes ------------------------------------------------------------
    {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);

        let full = stitcher.run(&mut font, &Request::Layers(vec![o, l]), &mut tracer);
        summarize("full", &full);

        font.select_node(o, NodeRef::new(ring, 3))
            .map_err(std::io::Error::other)?;
        let selective = stitcher.run(&mut font, &Request::Layers(vec![o]), &mut tracer);
        summarize("selective", &selective);

        let overlay = stitcher.run(
            &mut font,
            &Request::Overlay {
                layer: l,
                overrides: Overrides::parse("Stitcher; component:_circle; interval:150"),
            },
            &mut tracer,
        );
        summarize("overlay", &overlay);
    }

    // -- export event log --------------------------------------------------
    let path = "stitch_trace.json";
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    stitcher_debug::json::export(recorder.as_bytes(), &mut writer)?;

    println!("Wrote {path}");
    Ok(())
}
