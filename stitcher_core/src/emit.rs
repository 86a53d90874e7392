// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning placed dots into motif instances.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point};

use crate::config::{MotifSpec, format_motif_specs};
use crate::error::StitchError;
use crate::font::{MasterId, PathId};
use crate::host::Host;
use crate::orient::{MotifAnchors, rotation_about};
use crate::sample::DotSample;

const TAG_PREFIX: &str = "stitch:";

/// Identity linking an emitted instance back to the path it was stamped on.
///
/// Tags are derived from [`PathId`] and therefore stay valid for as long as
/// the source path exists, including after it moves to the background. The
/// textual form (`"stitch:<path>"`) is what hosts that store string tags
/// persist.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProvenanceTag(PathId);

impl ProvenanceTag {
    /// Tag for instances stamped on `path`.
    #[inline]
    #[must_use]
    pub const fn for_path(path: PathId) -> Self {
        Self(path)
    }

    /// Source path of tagged instances.
    #[inline]
    #[must_use]
    pub const fn path(self) -> PathId {
        self.0
    }

    /// Parses the textual form. Returns `None` for foreign tags.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let id = text.strip_prefix(TAG_PREFIX)?.parse::<u32>().ok()?;
        Some(Self(PathId(id)))
    }
}

impl fmt::Debug for ProvenanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProvenanceTag({})", self.0.0)
    }
}

impl fmt::Display for ProvenanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAG_PREFIX}{}", self.0.0)
    }
}

/// A motif from the configuration, resolved against the font.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMotif {
    /// Configured name and mask flag.
    pub spec: MotifSpec,
    /// Anchors read from the motif's layer in the target master.
    pub anchors: MotifAnchors,
}

/// One stamped motif.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedInstance {
    /// Referenced motif glyph.
    pub motif_name: String,
    /// Offset of the motif: the dot minus the motif's origin anchor.
    pub position: Point,
    /// The dot itself; rotations pivot here.
    pub pivot: Point,
    /// Rotation in radians, for orientable motifs.
    pub rotation: Option<f64>,
    /// Whether the instance acts as a mask.
    pub mask: bool,
    /// Source path identity.
    pub tag: ProvenanceTag,
}

impl PlacedInstance {
    /// Full placement transform: offset, then rotation about the dot.
    #[must_use]
    pub fn transform(&self) -> Affine {
        let offset = Affine::translate(self.position.to_vec2());
        match self.rotation {
            Some(angle) => rotation_about(angle, self.pivot) * offset,
            None => offset,
        }
    }
}

/// Stamps `motifs` onto `dots`, cycling through the motif list.
///
/// Dot `i` receives motif `i mod motifs.len()`. An empty motif list emits
/// nothing.
#[must_use]
pub fn emit(
    dots: &[DotSample],
    motifs: &[ResolvedMotif],
    tag: ProvenanceTag,
) -> Vec<PlacedInstance> {
    dots.iter()
        .zip(motifs.iter().cycle())
        .map(|(dot, motif)| PlacedInstance {
            motif_name: motif.spec.name.clone(),
            position: dot.position - motif.anchors.origin_or_zero().to_vec2(),
            pivot: dot.position,
            rotation: motif.anchors.rotation_for(dot),
            mask: motif.spec.mask,
            tag,
        })
        .collect()
}

/// Looks up every configured motif in `master`, dropping the ones the font
/// lacks.
///
/// Fails with [`StitchError::MissingMotif`] if none remain.
pub fn resolve_motifs<H: Host + ?Sized>(
    host: &H,
    specs: &[MotifSpec],
    master: MasterId,
) -> Result<Vec<ResolvedMotif>, StitchError> {
    let mut resolved = Vec::with_capacity(specs.len());
    for spec in specs {
        if let Some(anchors) = host.motif_anchors(&spec.name, master)? {
            resolved.push(ResolvedMotif {
                spec: spec.clone(),
                anchors,
            });
        }
    }
    if resolved.is_empty() {
        return Err(StitchError::MissingMotif {
            requested: format_motif_specs(specs),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;
    use crate::orient::{ORIENTATION_ANCHOR, ORIGIN_ANCHOR};
    use alloc::string::ToString;
    use core::f64::consts::FRAC_PI_2;

    fn motif(name: &str, mask: bool) -> ResolvedMotif {
        ResolvedMotif {
            spec: MotifSpec {
                name: name.to_string(),
                mask,
            },
            anchors: MotifAnchors::default(),
        }
    }

    fn dots(n: u32) -> Vec<DotSample> {
        (0..n)
            .map(|i| Point::new(f64::from(i) * 10.0, 0.0))
            .map(|p| DotSample::new(p, 0.0))
            .collect()
    }

    #[test]
    fn motifs_cycle_by_index() {
        let out = emit(
            &dots(5),
            &[motif("_a", false), motif("_b", true)],
            ProvenanceTag::for_path(PathId(1)),
        );
        let names: Vec<(&str, bool)> = out
            .iter()
            .map(|i| (i.motif_name.as_str(), i.mask))
            .collect();
        assert_eq!(
            names,
            [
                ("_a", false),
                ("_b", true),
                ("_a", false),
                ("_b", true),
                ("_a", false),
            ]
        );
    }

    #[test]
    fn empty_motif_list_emits_nothing() {
        let tag = ProvenanceTag::for_path(PathId(0));
        assert!(emit(&dots(3), &[], tag).is_empty());
    }

    #[test]
    fn origin_anchor_is_subtracted() {
        let mut m = motif("_o", false);
        m.anchors.origin = Some(Point::new(5.0, 7.0));
        let out = emit(
            &[DotSample::new(Point::new(100.0, 50.0), 0.0)],
            &[m],
            ProvenanceTag::for_path(PathId(0)),
        );
        assert_eq!(out[0].position, Point::new(95.0, 43.0));
        assert_eq!(out[0].pivot, Point::new(100.0, 50.0));
        assert_eq!(out[0].rotation, None);
        let origin = out[0].transform() * Point::new(5.0, 7.0);
        assert_eq!(origin, Point::new(100.0, 50.0));

    }

    #[test]
    fn rotated_instance_keeps_origin_on_dot() {
        let mut m = motif("_arrow", false);
        m.anchors = MotifAnchors {
            origin: Some(Point::new(5.0, 0.0)),
            orientation: Some(Point::new(15.0, 0.0)),
        };
        let out = emit(
            &[DotSample::new(Point::new(100.0, 0.0), FRAC_PI_2)],
            &[m],
            ProvenanceTag::for_path(PathId(0)),
        );
        let t = out[0].transform();
        let origin = t * Point::new(5.0, 0.0);
        assert!(
            (origin.x - 100.0).abs() < 1e-9 && origin.y.abs() < 1e-9,
            "origin anchor should land on the dot, got {origin:?}"
        );
        let tip = t * Point::new(15.0, 0.0);
        assert!(
            (tip.x - 100.0).abs() < 1e-9 && (tip.y - 10.0).abs() < 1e-9,
            "orientation anchor should follow the tangent, got {tip:?}"
        );
    }

    #[test]
    fn tag_text_form() {
        let tag = ProvenanceTag::for_path(PathId(42));
        assert_eq!(tag.to_string(), "stitch:42");
        assert_eq!(ProvenanceTag::parse("stitch:42"), Some(tag));
        assert_eq!(ProvenanceTag::parse("other:42"), None);
        assert_eq!(ProvenanceTag::parse("stitch:x"), None);
    }

    #[test]
    fn resolve_drops_missing_motifs() {
        let mut font = Font::new();
        let dash = font.add_layer("_dash", MasterId(0));
        font.set_anchor(dash, ORIGIN_ANCHOR, Point::new(1.0, 0.0))
            .unwrap();
        font.set_anchor(dash, ORIENTATION_ANCHOR, Point::new(2.0, 0.0))
            .unwrap();
        let specs = crate::config::parse_motif_specs("_nope,_dash*").unwrap();
        let resolved = resolve_motifs(&font, &specs, MasterId(0)).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].spec.name, "_dash");
        assert!(resolved[0].spec.mask, "mask flag survives resolution");
        assert_eq!(resolved[0].anchors.origin, Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn resolve_fails_when_nothing_remains() {
        let font = Font::new();
        let specs = crate::config::parse_motif_specs("_a,_b").unwrap();
        assert_eq!(
            resolve_motifs(&font, &specs, MasterId(0)),
            Err(StitchError::MissingMotif {
                requested: "_a,_b".to_string()
            })
        );
    }
}
