// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline data model and segmentation.
//!
//! A [`Path`] is an ordered list of [`Node`]s, each either on-curve (lies on
//! the outline) or off-curve (a Bezier control point), plus a closed flag.
//! [`Path::segments`] turns it into a gapless sequence of [`PathSegment`]s:
//! every on-curve node closes the segment accumulated since the previous
//! on-curve node.
//!
//! # Closed paths
//!
//! A closed path starts at its *start node*: node 0 if it is on-curve,
//! otherwise the last node (a closed outline never starts on a control
//! point). Segmentation wraps modulo the node count and emits the closing
//! segment, so the boundary is covered exactly once.
//!
//! # Lengths
//!
//! [`PathSegment::length`] measures cubics by their control polygon. This
//! always over-estimates the true arc length (by up to roughly 11% on typical
//! font curves) and is only used to size the fine-grained sampling.

use alloc::vec::Vec;

use kurbo::{CubicBez, Line, ParamCurve, ParamCurveDeriv, Point};

use crate::error::StitchError;

/// Whether a node lies on the outline or only shapes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// On-curve point; ends a segment.
    OnCurve,
    /// Off-curve Bezier control point.
    OffCurve,
}

/// A single outline node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Position in glyph units.
    pub position: Point,
    /// On- or off-curve.
    pub kind: NodeKind,
}

impl Node {
    /// Creates an on-curve node.
    #[must_use]
    pub const fn on(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            kind: NodeKind::OnCurve,
        }
    }

    /// Creates an off-curve node.
    #[must_use]
    pub const fn off(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            kind: NodeKind::OffCurve,
        }
    }

    /// Returns `true` for on-curve nodes.
    #[inline]
    #[must_use]
    pub const fn is_on_curve(&self) -> bool {
        matches!(self.kind, NodeKind::OnCurve)
    }
}

/// One piece of an outline: a straight line or a cubic Bezier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    /// Straight segment between two on-curve points.
    Line(Line),
    /// Cubic segment with two control points.
    Cubic(CubicBez),
}

impl PathSegment {
    /// Builds a segment from its ordered points.
    ///
    /// Two points make a line and four make a cubic; any other count is
    /// degenerate.
    pub fn from_points(points: &[Point]) -> Result<Self, StitchError> {
        match *points {
            [p0, p1] => Ok(Self::Line(Line::new(p0, p1))),
            [p0, p1, p2, p3] => Ok(Self::Cubic(CubicBez::new(p0, p1, p2, p3))),
            _ => Err(StitchError::degenerate(
                "segment is neither a line nor a cubic",
            )),
        }
    }

    /// First point of the segment.
    #[must_use]
    pub fn start(&self) -> Point {
        match self {
            Self::Line(l) => l.p0,
            Self::Cubic(c) => c.p0,
        }
    }

    /// Last point of the segment.
    #[must_use]
    pub fn end(&self) -> Point {
        match self {
            Self::Line(l) => l.p1,
            Self::Cubic(c) => c.p3,
        }
    }

    /// Approximate length: exact for lines, control-polygon length for cubics.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.p0.distance(l.p1),
            Self::Cubic(c) => c.p0.distance(c.p1) + c.p1.distance(c.p2) + c.p2.distance(c.p3),
        }
    }

    /// Tangent direction (radians) at parameter `t`, clamped to `[0, 1]`.
    ///
    /// Where a cubic's derivative vanishes (coincident control points) the
    /// chord direction is used instead.
    #[must_use]
    pub fn tangent_angle(&self, t: f64) -> f64 {
        match self {
            Self::Line(l) => (l.p1 - l.p0).atan2(),
            Self::Cubic(c) => {
                let t = t.clamp(0.0, 1.0);
                let d = c.deriv().eval(t).to_vec2();
                if d.hypot2() > f64::EPSILON {
                    d.atan2()
                } else {
                    (c.p3 - c.p0).atan2()
                }
            }
        }
    }

    /// Position at parameter `t`.
    #[must_use]
    pub fn eval(&self, t: f64) -> Point {
        match self {
            Self::Line(l) => l.eval(t),
            Self::Cubic(c) => c.eval(t),
        }
    }
}

/// An outline: ordered nodes plus a closed flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Nodes in outline order.
    pub nodes: Vec<Node>,
    /// Whether the last node connects back to the first.
    pub closed: bool,
}

impl Path {
    /// Creates an open path.
    #[must_use]
    pub fn open(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            closed: false,
        }
    }

    /// Creates a closed path.
    #[must_use]
    pub fn closed(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            closed: true,
        }
    }

    /// Index of the node the outline starts at.
    ///
    /// For closed paths whose node 0 is a control point, this is the last
    /// node if that one is on-curve, else the first on-curve node found.
    #[must_use]
    pub fn start_index(&self) -> Option<usize> {
        let first = self.nodes.first()?;
        if !self.closed || first.is_on_curve() {
            return Some(0);
        }
        let last = self.nodes.len() - 1;
        if self.nodes[last].is_on_curve() {
            return Some(last);
        }
        self.nodes.iter().position(Node::is_on_curve)
    }

    /// Position of the start node.
    #[must_use]
    pub fn start_point(&self) -> Option<Point> {
        self.start_index().map(|i| self.nodes[i].position)
    }

    /// Splits the outline into line and cubic segments, in outline order.
    pub fn segments(&self) -> Result<Vec<PathSegment>, StitchError> {
        let n = self.nodes.len();
        if n < 2 {
            return Err(StitchError::degenerate("path has fewer than two nodes"));
        }
        let first = self
            .start_index()
            .ok_or(StitchError::degenerate("closed path has no on-curve node"))?;
        let steps = if self.closed { n } else { n - 1 };

        let mut segments = Vec::new();
        let mut current: Vec<Point> = Vec::with_capacity(4);
        current.push(self.nodes[first].position);
        let mut anchored = self.nodes[first].is_on_curve();

        for step in 1..=steps {
            let i = first + step;
            let node = self.nodes[i % n];
            current.push(node.position);
            if !node.is_on_curve() {
                continue;
            }
            if !anchored && !matches!(current.len(), 2 | 4) {
                // Open path starting mid-curve: recover the leading anchor.
                let lead = (i + n - current.len() % n) % n;
                current.insert(0, self.nodes[lead].position);
            }
            segments.push(PathSegment::from_points(&current)?);
            current.clear();
            current.push(node.position);
            anchored = true;
        }

        if segments.is_empty() {
            return Err(StitchError::degenerate("path has no segments"));
        }
        Ok(segments)
    }

    /// Returns the same outline traversed in the opposite direction.
    ///
    /// Open paths simply reverse their node order. Closed paths keep their
    /// start node, so forward and reverse traversals begin at the same point.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let n = self.nodes.len();
        let nodes = if self.closed {
            let start = self.start_index().unwrap_or(0);
            (0..n).map(|k| self.nodes[(start + n - k) % n]).collect()
        } else {
            self.nodes.iter().rev().copied().collect()
        };
        Self {
            nodes,
            closed: self.closed,
        }
    }
}
