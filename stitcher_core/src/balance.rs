// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End balancing.
//!
//! Greedy placement leaves all of its rounding slack between the last dot and
//! the end of the path. Balancing places dots a second time on the reversed
//! outline and blends the tail of the forward sequence toward the head of the
//! reverse one, so the slack is spread over the path instead of piling up at
//! one end.
//!
//! With `k = min(reverse.len(), forward.len() - 1)`, dot `forward[len-1-i]` for
//! `i < k` moves toward `reverse[i]` by `factor = i / k`. Tangents are blended
//! as a weighted vector sum: `(1 + factor)` on the forward direction and
//! `-factor` on the reverse direction (which points the other way along the
//! outline). The first `len - k` dots are untouched.

use kurbo::Vec2;

use crate::error::StitchError;
use crate::path::Path;
use crate::place::{Placement, place};
use crate::sample::DotSample;

/// Places dots on `path` and balances the leftover slack across both ends.
pub fn balance(path: &Path, interval: f64) -> Result<Placement, StitchError> {
    let mut forward = place(path, interval)?;
    let reverse = place(&path.reversed(), interval)?;
    blend_tail(&mut forward.dots, &reverse.dots);
    Ok(forward)
}

/// Blends the tail of `forward` toward the head of `reverse` in place.
pub fn blend_tail(forward: &mut [DotSample], reverse: &[DotSample]) {
    let len = forward.len();
    let k = reverse.len().min(len.saturating_sub(1));
    if k == 0 {
        return;
    }
    for (i, rev) in reverse.iter().take(k).enumerate() {
        let factor = i as f64 / k as f64;
        let dot = &mut forward[len - 1 - i];
        dot.position = dot.position.lerp(rev.position, factor);
        dot.tangent = blend_angles(dot.tangent, 1.0 + factor, rev.tangent, -factor);
    }
}

/// Weighted circular mean of two angles (radians).
///
/// Sums the weighted unit vectors and returns the angle of the resultant, so
/// wrap-around at `2π` is handled: 350° and 10° average to 0°, not 180°.
#[must_use]
pub fn blend_angles(a: f64, weight_a: f64, b: f64, weight_b: f64) -> f64 {
    let sum = Vec2::from_angle(a) * weight_a + Vec2::from_angle(b) * weight_b;
    sum.atan2()
}
