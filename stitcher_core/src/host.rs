// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host document contract.
//!
//! The [`Host`] trait is the boundary between the stitching core and the
//! document model that owns glyph layers. A stitching pass reads outlines,
//! anchors and selection through it, and performs every mutation through it:
//! removing previously emitted instances, moving outlines into the
//! background, and appending fresh instances.
//!
//! # Ordering
//!
//! Components are addressed by ordinal within the layer's component list,
//! in drawing order. Removing a component shifts the ordinals of every later
//! component down by one, so callers removing several components must do so
//! from the highest ordinal down.
//!
//! # Errors
//!
//! Every method may fail with a [`HostError`]. A failure aborts the current
//! layer only; anything already mutated on that layer stays mutated.
//!
//! An in-memory implementation is provided by [`Font`](crate::font::Font).

use alloc::string::String;
use alloc::vec::Vec;

use crate::emit::{PlacedInstance, ProvenanceTag};
use crate::error::HostError;
use crate::font::{LayerId, MasterId, PathId, PathShape};
use crate::orient::MotifAnchors;

/// A selected node: the path it belongs to and its index within the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    /// Owning path.
    pub path: PathId,
    /// Node index within the path.
    pub node: usize,
}

impl NodeRef {
    /// Creates a node reference.
    #[inline]
    #[must_use]
    pub const fn new(path: PathId, node: usize) -> Self {
        Self { path, node }
    }
}

/// Document operations a stitching pass needs.
pub trait Host {
    /// Name of the glyph owning `layer`.
    fn glyph_name(&self, layer: LayerId) -> Result<String, HostError>;

    /// Master `layer` belongs to.
    fn master(&self, layer: LayerId) -> Result<MasterId, HostError>;

    /// Foreground outlines of `layer`, in drawing order.
    fn paths(&self, layer: LayerId) -> Result<Vec<PathShape>, HostError>;

    /// Removes every foreground outline of `layer`. Components stay.
    fn clear_paths(&mut self, layer: LayerId) -> Result<(), HostError>;

    /// Outlines preserved in the background of `layer`.
    fn background(&self, layer: LayerId) -> Result<Vec<PathShape>, HostError>;

    /// Replaces the background of `layer` with `paths`.
    fn replace_background(
        &mut self,
        layer: LayerId,
        paths: Vec<PathShape>,
    ) -> Result<(), HostError>;

    /// Anchors of motif glyph `glyph` in `master`.
    ///
    /// Returns `Ok(None)` if the font has no glyph of that name. A glyph that
    /// exists but declares no anchors yields default (empty) anchors.
    fn motif_anchors(
        &self,
        glyph: &str,
        master: MasterId,
    ) -> Result<Option<MotifAnchors>, HostError>;

    /// Provenance tag of every component on `layer`, by ordinal.
    fn component_tags(&self, layer: LayerId) -> Result<Vec<Option<ProvenanceTag>>, HostError>;

    /// Removes the component at ordinal `index`.
    fn remove_component(&mut self, layer: LayerId, index: usize) -> Result<(), HostError>;

    /// Appends `instance` as a new component on top of the layer's content.
    fn append_component(
        &mut self,
        layer: LayerId,
        instance: &PlacedInstance,
    ) -> Result<(), HostError>;

    /// Currently selected nodes on `layer`. Empty means no selection.
    fn selection(&self, layer: LayerId) -> Result<Vec<NodeRef>, HostError>;
}
