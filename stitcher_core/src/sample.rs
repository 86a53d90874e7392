// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fine-grained sampling of outline segments.
//!
//! Greedy quantization ([`place`](crate::place)) can only pick dots from the
//! samples it is given, so segments are oversampled relative to the target
//! interval: lines get `floor(len / interval * 11)` samples, cubics
//! `floor(len / interval * 10)`. Each sample carries the tangent angle of the
//! outline at that point.
//!
//! Line samples start at the segment's first point and stop short of its end
//! (the next segment starts there). Cubic samples skip `t = 0` and always end
//! with the exact endpoint.

use alloc::vec::Vec;

use kurbo::Point;

use crate::error::StitchError;
use crate::path::{Path, PathSegment};

/// Oversampling factor for straight segments.
pub const LINE_OVERSAMPLING: f64 = 11.0;

/// Oversampling factor for cubic segments.
pub const CUBIC_OVERSAMPLING: f64 = 10.0;

/// A point on an outline together with the outline's direction there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSample {
    /// Position in glyph units.
    pub position: Point,
    /// Tangent direction in radians.
    pub tangent: f64,
}

impl DotSample {
    /// Creates a sample.
    #[inline]
    #[must_use]
    pub const fn new(position: Point, tangent: f64) -> Self {
        Self { position, tangent }
    }
}

/// Number of fine-grained samples a segment of `length` receives.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the intended floor for a positive count"
)]
pub fn sample_count(length: f64, interval: f64, oversampling: f64) -> usize {
    let n = length / interval * oversampling;
    if n.is_finite() && n >= 1.0 { n as usize } else { 0 }
}

/// Fine-grained samples for a single segment.
///
/// `interval` must already be clamped to at least 1.0.
#[must_use]
pub fn sample_segment(segment: &PathSegment, interval: f64) -> Vec<DotSample> {
    match segment {
        PathSegment::Line(line) => {
            let n = sample_count(segment.length(), interval, LINE_OVERSAMPLING);
            let tangent = segment.tangent_angle(0.0);
            let (p0, p1) = (line.p0, line.p1);
            let nf = n as f64;
            (0..n)
                .map(|i| {
                    let a = i as f64;
                    let b = (n - i) as f64;
                    // Weighted sum rather than lerp: lands exactly on interval
                    // multiples for axis-aligned lines.
                    let x = p1.x * a / nf + p0.x * b / nf;
                    let y = p1.y * a / nf + p0.y * b / nf;
                    DotSample::new(Point::new(x, y), tangent)
                })
                .collect()
        }
        PathSegment::Cubic(cubic) => {
            let n = sample_count(segment.length(), interval, CUBIC_OVERSAMPLING);
            let nf = n as f64;
            let mut out: Vec<DotSample> = (1..n)
                .map(|i| {
                    let t = i as f64 / nf;
                    DotSample::new(segment.eval(t), segment.tangent_angle(t))
                })
                .collect();
            out.push(DotSample::new(cubic.p3, segment.tangent_angle(1.0)));
            out
        }
    }
}

/// Fine-grained samples for a whole path, in outline order.
///
/// Fails with [`StitchError::DegenerateGeometry`] if the path cannot be
/// segmented or yields no samples at all.
pub fn sample_path(path: &Path, interval: f64) -> Result<Vec<DotSample>, StitchError> {
    sample_segments(&path.segments()?, interval)
}

/// Fine-grained samples for already segmented geometry.
pub fn sample_segments(
    segments: &[PathSegment],
    interval: f64,
) -> Result<Vec<DotSample>, StitchError> {
    let samples: Vec<DotSample> = segments
        .iter()
        .flat_map(|segment| sample_segment(segment, interval))
        .collect();
    if samples.is_empty() {
        return Err(StitchError::degenerate(
            "path yields no fine-grained samples",
        ));
    }
    Ok(samples)
}
