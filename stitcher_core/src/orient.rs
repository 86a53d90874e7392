// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motif orientation.
//!
//! A motif that declares an `orientation` anchor is rotated so that the
//! direction from its `origin` anchor to its `orientation` anchor follows the
//! outline's tangent at each dot. The rotation pivots on the dot itself, not
//! on the motif's local origin. A motif without an `orientation` anchor is
//! never rotated.

use kurbo::{Affine, Point, Vec2};

use crate::sample::DotSample;

/// Anchor name marking a motif's placement reference point.
pub const ORIGIN_ANCHOR: &str = "origin";

/// Anchor name marking a motif's direction reference point.
pub const ORIENTATION_ANCHOR: &str = "orientation";

/// The named anchors of a motif's layer that stitching cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotifAnchors {
    /// Position of the `origin` anchor, if declared.
    pub origin: Option<Point>,
    /// Position of the `orientation` anchor, if declared.
    pub orientation: Option<Point>,
}

impl MotifAnchors {
    /// Origin used for placement; `(0, 0)` when no `origin` anchor exists.
    #[must_use]
    pub fn origin_or_zero(&self) -> Point {
        self.origin.unwrap_or(Point::ORIGIN)
    }

    /// Direction (radians) from origin to orientation anchor, if the motif
    /// declares an `orientation` anchor.
    #[must_use]
    pub fn reference_angle(&self) -> Option<f64> {
        self.orientation
            .map(|orientation| (orientation - self.origin_or_zero()).atan2())
    }

    /// Rotation to apply at `dot`, if this motif is orientable.
    #[must_use]
    pub fn rotation_for(&self, dot: &DotSample) -> Option<f64> {
        self.reference_angle()
            .map(|reference| normalize_angle(dot.tangent - reference))
    }
}

/// Wraps an angle into `(-π, π]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    Vec2::from_angle(angle).atan2()
}

/// Rotation by `angle` radians about `pivot`.
///
/// Equivalent to translating `pivot` to the origin, rotating, and translating
/// back.
#[must_use]
pub fn rotation_about(angle: f64, pivot: Point) -> Affine {
    Affine::translate(pivot.to_vec2())
        * Affine::rotate(angle)
        * Affine::translate(-pivot.to_vec2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_orientation_anchor_means_no_rotation() {
        let anchors = MotifAnchors {
            origin: Some(Point::new(5.0, 5.0)),
            orientation: None,
        };
        let dot = DotSample::new(Point::new(10.0, 0.0), 1.0);
        assert_eq!(anchors.rotation_for(&dot), None);
    }

    #[test]
    fn rotation_is_tangent_minus_reference() {
        let anchors = MotifAnchors {
            origin: Some(Point::new(0.0, 0.0)),
            orientation: Some(Point::new(0.0, 10.0)),
        };
        let dot = DotSample::new(Point::new(0.0, 0.0), PI);
        let rotation = anchors.rotation_for(&dot).unwrap();
        assert!(close(rotation, FRAC_PI_2), "got {rotation}");
    }

    #[test]
    fn aligned_motif_gets_identity_rotation() {
        let anchors = MotifAnchors {
            origin: Some(Point::new(10.0, 10.0)),
            orientation: Some(Point::new(20.0, 10.0)),
        };
        let dot = DotSample::new(Point::new(50.0, 50.0), 0.0);
        let rotation = anchors.rotation_for(&dot).unwrap();
        assert_eq!(rotation, 0.0);
        assert_eq!(rotation_about(rotation, dot.position), Affine::IDENTITY);
    }

    #[test]
    fn orientation_without_origin_measures_from_zero() {
        let anchors = MotifAnchors {
            origin: None,
            orientation: Some(Point::new(0.0, -3.0)),
        };
        assert!(close(anchors.reference_angle().unwrap(), -FRAC_PI_2));
    }

    #[test]
    fn rotation_pivots_on_dot() {
        let pivot = Point::new(100.0, 0.0);
        let r = rotation_about(FRAC_PI_2, pivot);
        let moved = r * pivot;
        assert!(close(moved.distance(pivot), 0.0), "moved to {moved:?}");
        let other = r * Point::new(110.0, 0.0);
        let expected = Point::new(100.0, 10.0);
        assert!(close(other.distance(expected), 0.0), "got {other:?}");

    }

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert!(close(normalize_angle(3.0 * PI), PI));
        assert!(close(normalize_angle(-FRAC_PI_2), -FRAC_PI_2));
        assert!(close(normalize_angle(2.0 * PI), 0.0));
    }
}
