// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for dot placement on random outlines.

use kurbo::Point;
use proptest::prelude::*;
use stitcher_core::path::{Node, Path};
use stitcher_core::place::{SEAM_TOLERANCE, place, quantize};
use stitcher_core::sample::{DotSample, sample_path};

/// One piece of a generated outline: a line or a cubic, by its trailing
/// nodes.
#[derive(Clone, Debug)]
enum Piece {
    Line(Point),
    Cubic(Point, Point, Point),
}

fn point() -> impl Strategy<Value = Point> {
    (-400.0..400.0_f64, -400.0..400.0_f64)
        .prop_map(|(x, y)| Point::new(x, y))
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        point().prop_map(Piece::Line),
        (point(), point(), point())
            .prop_map(|(a, b, c)| Piece::Cubic(a, b, c)),
    ]
}

fn build(start: Point, pieces: &[Piece], closed: bool) -> Path {
    let mut nodes = vec![Node::on(start.x, start.y)];
    for piece in pieces {
        match *piece {
            Piece::Line(p) => nodes.push(Node::on(p.x, p.y)),
            Piece::Cubic(a, b, p) => {
                nodes.push(Node::off(a.x, a.y));
                nodes.push(Node::off(b.x, b.y));
                nodes.push(Node::on(p.x, p.y));
            }
        }
    }
    Path { nodes, closed }
}

/// Largest distance between consecutive fine-grained samples, counting the
/// start dot as the first sample.
fn max_step(start: Point, samples: &[DotSample]) -> f64 {
    let mut prev = start;
    let mut step = 0.0_f64;
    for s in samples {
        step = step.max(prev.distance(s.position));
        prev = s.position;
    }
    step
}

proptest! {
    #[test]
    fn gaps_stay_within_one_step_of_interval(
        start in point(),
        pieces in prop::collection::vec(piece(), 1..6),
        interval in 5.0..200.0_f64,
    ) {
        let path = build(start, &pieces, false);
        let Ok(placement) = place(&path, interval) else {
            return Ok(());
        };
        let samples = sample_path(&path, interval).unwrap();
        let step = max_step(start, &samples);
        for pair in placement.dots.windows(2) {
            let gap = pair[0].position.distance(pair[1].position);
            prop_assert!(gap >= interval - 1e-9, "gap {gap} below {interval}");
            prop_assert!(
                gap < interval + step + 1e-9,
                "gap {gap} exceeds interval {interval} plus step {step}"
            );

        }
    }

    #[test]
    fn closed_seam_removes_at_most_the_duplicate(
        start in point(),
        pieces in prop::collection::vec(piece(), 2..6),
        interval in 5.0..200.0_f64,
    ) {
        let path = build(start, &pieces, true);
        let Ok(closed) = place(&path, interval) else {
            return Ok(());
        };
        let samples = sample_path(&path, interval).unwrap();
        let first = closed.dots[0];
        let open = quantize(first, &samples, interval, false);
        let raw_last = open.last().unwrap().position;
        let expected = if open.len() > 1 && raw_last.distance(first.position) < SEAM_TOLERANCE {
            open.len() - 1
        } else {
            open.len()
        };
        prop_assert_eq!(closed.dots.len(), expected);
    }
}
