// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording real stitching passes.

use stitcher_core::config::Configuration;
use stitcher_core::error::ErrorKind;
use stitcher_core::font::{Font, LayerId, MasterId};
use stitcher_core::path::{Node, Path};
use stitcher_core::rebuild::{RebuildMode, Request, Stitcher};
use stitcher_core::trace::Tracer;
use stitcher_debug::recorder::{RecordedEvent, RecorderSink, decode};

#[test]
fn full_pass_is_recorded_in_order() {
    let mut font = Font::new();
    font.add_layer("_circle", MasterId(0));
    let layer = font.add_layer("i", MasterId(0));
    let stroke = Path::open(vec![Node::on(0.0, 0.0), Node::on(0.0, 300.0)]);
    font.add_path(layer, stroke).unwrap();

    font.add_path(layer, Path::open(vec![Node::on(0.0, 0.0)]))
        .unwrap();

    let mut recorder = RecorderSink::new();
    {
        let mut tracer = Tracer::new(&mut recorder);
        let stitcher = Stitcher::new(Configuration::default());
        stitcher.run(
            &mut font,
            &Request::Layers(vec![layer, LayerId(77)]),
            &mut tracer,
        );
    }

    let events: Vec<_> = decode(recorder.as_bytes()).collect();
    let names: Vec<&str> = events
        .iter()
        .map(|e| match e {
            RecordedEvent::LayerBegin(_) => "begin",
            RecordedEvent::InstancesRemoved(_) => "removed",
            RecordedEvent::BackgroundPreserved(_) => "background",
            RecordedEvent::PathStamped(_) => "stamped",
            RecordedEvent::PathSkipped { .. } => "skipped",
            RecordedEvent::LayerEnd(_) => "end",
            RecordedEvent::LayerFailed(_) => "failed",
        })
        .collect();
    assert_eq!(
        names,
        [
            "begin",
            "removed",
            "background",
            "stamped",
            "skipped",
            "end",
            "begin",
            "failed"
        ]
    );

    match &events[0] {
        RecordedEvent::LayerBegin(e) => {
            assert_eq!(e.mode, RebuildMode::FullRebuild);
            assert_eq!(e.interval, 100.0);
        }
        other => panic!("expected LayerBegin, got {other:?}"),
    }
    match &events[3] {
        RecordedEvent::PathStamped(e) => {
            assert_eq!(e.fine_samples, 33);
            assert_eq!(e.instances, 3);
        }
        other => panic!("expected PathStamped, got {other:?}"),
    }
    match &events[7] {
        RecordedEvent::LayerFailed(e) => {
            assert_eq!(e.layer, LayerId(77));
            assert_eq!(e.kind, ErrorKind::HostCollaboratorFailure);
        }
        other => panic!("expected LayerFailed, got {other:?}"),
    }
}
