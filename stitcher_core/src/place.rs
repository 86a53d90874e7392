// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy dot placement.
//!
//! Placement walks the fine-grained samples of a path and accepts a sample as
//! soon as its straight-line distance from the last accepted dot reaches the
//! interval. Every accepted gap `g` therefore satisfies
//! `interval <= g < interval + step`, where `step` is the largest distance
//! between consecutive samples.
//!
//! Leftover slack accumulates at the end of the path; see
//! [`balance`](crate::balance) for spreading it across both ends.

use alloc::vec::Vec;

use crate::error::StitchError;
use crate::path::Path;
use crate::sample::{DotSample, sample_segments};

/// Closed paths drop their last dot if it lands this close to the first.
pub const SEAM_TOLERANCE: f64 = 0.8;

/// Result of placing dots on one path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placement {
    /// Accepted dots, in outline order.
    pub dots: Vec<DotSample>,
    /// Number of fine-grained samples that were scanned.
    pub fine_samples: usize,
}

/// Places dots along `path` at least `interval` apart.
///
/// `interval` must already be clamped to at least 1.0.
pub fn place(path: &Path, interval: f64) -> Result<Placement, StitchError> {
    let segments = path.segments()?;
    let samples = sample_segments(&segments, interval)?;
    let first = &segments[0];
    // An open path starting mid-curve starts at its first on-curve node,
    // which ends the repaired leading segment.
    let start = if !path.closed && path.nodes.first().is_some_and(|n| !n.is_on_curve()) {
        DotSample::new(first.end(), first.tangent_angle(1.0))
    } else {
        DotSample::new(first.start(), first.tangent_angle(0.0))
    };

    Ok(Placement {
        dots: quantize(start, &samples, interval, path.closed),
        fine_samples: samples.len(),
    })
}

/// Greedy quantization of `samples`, starting from `start`.
#[must_use]
pub fn quantize(
    start: DotSample,
    samples: &[DotSample],
    interval: f64,
    closed: bool,
) -> Vec<DotSample> {
    let mut dots = Vec::with_capacity(samples.len() / 10 + 1);
    dots.push(start);
    let mut last = start.position;

    for sample in samples {
        if last.distance(sample.position) >= interval {
            dots.push(*sample);
            last = sample.position;
        }
    }

    if closed && dots.len() > 1 {
        let first = dots[0].position;
        if let Some(tail) = dots.last()
            && tail.position.distance(first) < SEAM_TOLERANCE
        {
            dots.pop();
        }
    }
    dots
}
