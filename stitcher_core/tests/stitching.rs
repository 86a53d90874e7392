// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end stitching through the in-memory font.

use kurbo::{Affine, Point};
use stitcher_core::config::{
    Configuration, MemoryPreferences, Overrides, PrefValue, PreferenceStore,
};
use stitcher_core::emit::ProvenanceTag;
use stitcher_core::font::{Font, LayerId, MasterId, PathId};
use stitcher_core::host::{Host, NodeRef};
use stitcher_core::orient::{ORIENTATION_ANCHOR, ORIGIN_ANCHOR};
use stitcher_core::path::{Node, Path};
use stitcher_core::rebuild::{RebuildMode, Request, Stitcher};
use stitcher_core::trace::Tracer;

fn hline(x1: f64, y: f64) -> Path {
    Path::open(vec![Node::on(0.0, y), Node::on(x1, y)])
}

fn run(font: &mut Font, config: Configuration, layers: Vec<LayerId>) {
    let request = Request::Layers(layers);
    let report = Stitcher::new(config).run(font, &request, &mut Tracer::none());
    assert_eq!(report.failures().count(), 0, "failures: {report:?}");
}

fn tags_for(font: &Font, layer: LayerId, path: PathId) -> usize {
    font.component_tags(layer)
        .unwrap()
        .iter()
        .filter(|t| **t == Some(ProvenanceTag::for_path(path)))
        .count()
}

#[test]
fn straight_line_gets_three_unrotated_dots() {
    let mut font = Font::new();
    font.add_layer("_circle", MasterId(0));
    let layer = font.add_layer("a", MasterId(0));
    font.add_path(layer, hline(300.0, 0.0)).unwrap();

    run(
        &mut font,
        Configuration::new(100.0, "_circle", false, false).unwrap(),
        vec![layer],
    );

    let components: Vec<_> = font.layer(layer).unwrap().components().cloned().collect();
    assert_eq!(components.len(), 3);
    for (component, x) in components.iter().zip([0.0, 100.0, 200.0]) {
        assert_eq!(component.name, "_circle");
        assert_eq!(component.transform, Affine::translate((x, 0.0)));
        assert!(!component.mask, "single motif is not a mask");
        assert!(!component.automatic_alignment, "stamps are never realigned");
    }
}

#[test]
fn motif_list_cycles_with_masks() {
    let mut font = Font::new();
    font.add_layer("_a", MasterId(0));
    font.add_layer("_b", MasterId(0));
    let layer = font.add_layer("x", MasterId(0));
    font.add_path(layer, hline(400.0, 0.0)).unwrap();

    run(
        &mut font,
        Configuration::new(100.0, "_a,_b*", false, true).unwrap(),
        vec![layer],
    );

    let order: Vec<(String, bool)> = font
        .layer(layer)
        .unwrap()
        .components()
        .map(|c| (c.name.clone(), c.mask))
        .collect();
    assert_eq!(
        order,
        [
            ("_a".to_string(), false),
            ("_b".to_string(), true),
            ("_a".to_string(), false),
            ("_b".to_string(), true),
        ]
    );
}

#[test]
fn orientable_motif_follows_vertical_outline() {
    let mut font = Font::new();
    let dash = font.add_layer("_dash", MasterId(0));
    font.set_anchor(dash, ORIGIN_ANCHOR, Point::new(0.0, 0.0))
        .unwrap();
    font.set_anchor(dash, ORIENTATION_ANCHOR, Point::new(10.0, 0.0))
        .unwrap();
    let layer = font.add_layer("l", MasterId(0));
    let stroke = Path::open(vec![Node::on(50.0, 0.0), Node::on(50.0, 250.0)]);
    font.add_path(layer, stroke).unwrap();

    run(
        &mut font,
        Configuration::new(100.0, "_dash", false, false).unwrap(),
        vec![layer],
    );

    for component in font.layer(layer).unwrap().components() {
        let origin = component.transform * Point::ORIGIN;
        let tip = component.transform * Point::new(10.0, 0.0);
        let d = tip - origin;
        assert!(d.x.abs() < 1e-9, "dash should point up: {tip:?}");
        assert!((d.y - 10.0).abs() < 1e-9, "dash should point up: {tip:?}");
    }
}

#[test]
fn selective_rebuild_keeps_clean_paths_intact() {
    let mut font = Font::new();
    font.add_layer("_circle", MasterId(0));
    let layer = font.add_layer("e", MasterId(0));
    let top = font.add_path(layer, hline(300.0, 200.0)).unwrap();
    let mid = font.add_path(layer, hline(300.0, 100.0)).unwrap();
    let low = font.add_path(layer, hline(300.0, 0.0)).unwrap();
    let config = Configuration::default();

    run(&mut font, config.clone(), vec![layer]);
    assert!(font.paths(layer).unwrap().is_empty(), "outlines moved");
    let clean: Vec<_> = font
        .layer(layer)
        .unwrap()
        .components()
        .filter(|c| c.tag != Some(ProvenanceTag::for_path(mid)))
        .cloned()
        .collect();

    // Edit the middle path in the background and select it.
    let l = font.layer_mut(layer).unwrap();
    let shape = l.background.iter_mut().find(|p| p.id == mid).unwrap();
    shape.path = hline(420.0, 100.0);
    font.select_node(layer, NodeRef::new(mid, 0)).unwrap();

    let request = Request::Layers(vec![layer]);
    let report = Stitcher::new(config).run(&mut font, &request, &mut Tracer::none());
    let r = report.report(layer).unwrap();
    assert_eq!(r.mode, RebuildMode::SelectiveRebuild);
    assert_eq!(r.removed, 3);

    assert_eq!(tags_for(&font, layer, mid), 5);
    assert_eq!(tags_for(&font, layer, top), 3);
    assert_eq!(tags_for(&font, layer, low), 3);
    let clean_after: Vec<_> = font
        .layer(layer)
        .unwrap()
        .components()
        .filter(|c| c.tag != Some(ProvenanceTag::for_path(mid)))
        .cloned()
        .collect();
    assert_eq!(clean_after, clean);
}

#[test]
fn interval_is_clamped_everywhere() {
    let interval = |i| Configuration::new(i, "_c", false, true).unwrap().interval();
    assert_eq!(interval(0.0), 1.0);
    assert_eq!(interval(-7.0), 1.0);
    assert_eq!(Overrides::parse("interval:abc").interval, Some(1.0));

    let mut store = MemoryPreferences::with_defaults();
    store.set("stitcher.interval", PrefValue::Text("-".to_string()));
    assert_eq!(Configuration::load(&store).unwrap().interval(), 1.0);
}

#[test]
fn overlay_uses_overridden_motif() {
    let mut font = Font::new();
    font.add_layer("_circle", MasterId(0));
    font.add_layer("_star", MasterId(0));
    let layer = font.add_layer("o", MasterId(0));
    font.add_path(layer, hline(300.0, 0.0)).unwrap();

    let stitcher = Stitcher::new(Configuration::default());
    let request = Request::Overlay {
        layer,
        overrides: Overrides::parse("Stitcher; component:_star; interval:100; balance:0"),
    };
    let report = stitcher.run(&mut font, &request, &mut Tracer::none());
    assert_eq!(report.failures().count(), 0);
    let names: Vec<_> = font
        .layer(layer)
        .unwrap()
        .components()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["_star", "_star", "_star"]);
    assert_eq!(font.paths(layer).unwrap().len(), 1, "outline kept");

    assert!(font.background(layer).unwrap().is_empty());
}
