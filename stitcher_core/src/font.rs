// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document model.
//!
//! [`Font`] is a minimal glyph store implementing [`Host`]. Each layer
//! belongs to a glyph and a master and owns an ordered shape list in which
//! outlines and motif references are a closed [`Shape`] union, a separate
//! background path store, named anchors, and a node selection.
//!
//! Path identities ([`PathId`]) are allocated once per font and never reused,
//! so provenance tags keep resolving after paths move between the foreground
//! and the background.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point};

use crate::emit::{PlacedInstance, ProvenanceTag};
use crate::error::HostError;
use crate::host::{Host, NodeRef};
use crate::orient::{MotifAnchors, ORIENTATION_ANCHOR, ORIGIN_ANCHOR};
use crate::path::Path;

/// A handle to a layer in a [`Font`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u32);

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({})", self.0)
    }
}

/// Stable identity of a source path.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathId(pub u32);

impl fmt::Debug for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathId({})", self.0)
    }
}

/// Identifies a master (design axis position) of a font.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MasterId(pub u32);

impl fmt::Debug for MasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterId({})", self.0)
    }
}

/// An outline together with its identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PathShape {
    /// Stable identity.
    pub id: PathId,
    /// Geometry.
    pub path: Path,
}

/// A reference to another glyph, placed with a transform.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentShape {
    /// Name of the referenced glyph.
    pub name: String,
    /// Placement transform.
    pub transform: Affine,
    /// Whether the reference acts as a mask.
    pub mask: bool,
    /// Provenance of stitched instances; `None` for hand-placed components.
    pub tag: Option<ProvenanceTag>,
    /// Whether the host may realign the component to its base glyph.
    pub automatic_alignment: bool,
}

impl ComponentShape {
    /// Creates a hand-placed (untagged) component.
    #[must_use]
    pub fn new(name: &str, transform: Affine) -> Self {
        Self {
            name: name.to_string(),
            transform,
            mask: false,
            tag: None,
            automatic_alignment: true,
        }
    }

    /// Origin of the placed component.
    #[must_use]
    pub fn position(&self) -> Point {
        self.transform * Point::ORIGIN
    }
}

impl From<&PlacedInstance> for ComponentShape {
    fn from(instance: &PlacedInstance) -> Self {
        Self {
            name: instance.motif_name.clone(),
            transform: instance.transform(),
            mask: instance.mask,
            tag: Some(instance.tag),
            automatic_alignment: false,
        }
    }
}

/// One entry of a layer's shape list.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// An outline.
    Path(PathShape),
    /// A glyph reference.
    Component(ComponentShape),
}

/// A named point on a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Anchor name.
    pub name: String,
    /// Position in glyph units.
    pub position: Point,
}

/// One master's drawing of a glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Name of the owning glyph.
    pub glyph: String,
    /// Master this layer belongs to.
    pub master: MasterId,
    /// Foreground shapes in drawing order.
    pub shapes: Vec<Shape>,
    /// Preserved background outlines.
    pub background: Vec<PathShape>,
    /// Named anchors.
    pub anchors: Vec<Anchor>,
    /// Selected nodes.
    pub selection: Vec<NodeRef>,
}

impl Layer {
    fn new(glyph: &str, master: MasterId) -> Self {
        Self {
            glyph: glyph.to_string(),
            master,
            shapes: Vec::new(),
            background: Vec::new(),
            anchors: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Foreground outlines in drawing order.
    pub fn paths(&self) -> impl Iterator<Item = &PathShape> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Path(p) => Some(p),
            Shape::Component(_) => None,
        })
    }

    /// Components in drawing order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentShape> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Component(c) => Some(c),
            Shape::Path(_) => None,
        })
    }

    /// Looks up an anchor by name.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Option<Point> {
        self.anchors
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.position)
    }
}

/// An in-memory font.
#[derive(Clone, Debug, Default)]
pub struct Font {
    layers: BTreeMap<LayerId, Layer>,
    next_layer: u32,
    next_path: u32,
}

impl Font {
    /// Creates an empty font.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty layer for `glyph` in `master`.
    pub fn add_layer(&mut self, glyph: &str, master: MasterId) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.insert(id, Layer::new(glyph, master));
        id
    }

    /// Returns the layer, if it exists.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    /// Returns the layer mutably, if it exists.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    /// All layer handles in creation order.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.keys().copied()
    }

    /// Appends an outline to the foreground and returns its identity.
    pub fn add_path(&mut self, layer: LayerId, path: Path) -> Result<PathId, HostError> {
        let id = PathId(self.next_path);
        self.layer_mut_or_err(layer)?
            .shapes
            .push(Shape::Path(PathShape { id, path }));
        self.next_path += 1;
        Ok(id)
    }

    /// Appends a component to the foreground.
    pub fn add_component(
        &mut self,
        layer: LayerId,
        component: ComponentShape,
    ) -> Result<(), HostError> {
        self.layer_mut_or_err(layer)?
            .shapes
            .push(Shape::Component(component));
        Ok(())
    }

    /// Sets a named anchor, replacing any anchor of the same name.
    pub fn set_anchor(
        &mut self,
        layer: LayerId,
        name: &str,
        position: Point,
    ) -> Result<(), HostError> {
        let layer = self.layer_mut_or_err(layer)?;
        layer.anchors.retain(|a| a.name != name);
        layer.anchors.push(Anchor {
            name: name.to_string(),
            position,
        });
        Ok(())
    }

    /// Adds a node to the layer's selection.
    pub fn select_node(&mut self, layer: LayerId, node: NodeRef) -> Result<(), HostError> {
        let layer = self.layer_mut_or_err(layer)?;
        if !layer.selection.contains(&node) {
            layer.selection.push(node);
        }
        Ok(())
    }

    /// Clears the layer's selection.
    pub fn clear_selection(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.layer_mut_or_err(layer)?.selection.clear();
        Ok(())
    }

    fn layer_or_err(&self, id: LayerId) -> Result<&Layer, HostError> {
        self.layers.get(&id).ok_or(HostError::UnknownLayer(id))
    }

    fn layer_mut_or_err(&mut self, id: LayerId) -> Result<&mut Layer, HostError> {
        self.layers.get_mut(&id).ok_or(HostError::UnknownLayer(id))
    }

    /// Indices into `shapes` of the layer's components, in order.
    fn component_slots(layer: &Layer) -> impl Iterator<Item = usize> + '_ {
        layer
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Shape::Component(_)))
            .map(|(i, _)| i)
    }
}

impl Host for Font {
    fn glyph_name(&self, layer: LayerId) -> Result<String, HostError> {
        Ok(self.layer_or_err(layer)?.glyph.clone())
    }

    fn master(&self, layer: LayerId) -> Result<MasterId, HostError> {
        Ok(self.layer_or_err(layer)?.master)
    }

    fn paths(&self, layer: LayerId) -> Result<Vec<PathShape>, HostError> {
        Ok(self.layer_or_err(layer)?.paths().cloned().collect())
    }

    fn clear_paths(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.layer_mut_or_err(layer)?
            .shapes
            .retain(|s| matches!(s, Shape::Component(_)));
        Ok(())
    }

    fn background(&self, layer: LayerId) -> Result<Vec<PathShape>, HostError> {
        Ok(self.layer_or_err(layer)?.background.clone())
    }

    fn replace_background(
        &mut self,
        layer: LayerId,
        paths: Vec<PathShape>,
    ) -> Result<(), HostError> {
        self.layer_mut_or_err(layer)?.background = paths;
        Ok(())
    }

    fn motif_anchors(
        &self,
        glyph: &str,
        master: MasterId,
    ) -> Result<Option<MotifAnchors>, HostError> {
        let mut found = false;
        for layer in self.layers.values().filter(|l| l.glyph == glyph) {
            found = true;
            if layer.master == master {
                return Ok(Some(MotifAnchors {
                    origin: layer.anchor(ORIGIN_ANCHOR),
                    orientation: layer.anchor(ORIENTATION_ANCHOR),
                }));
            }
        }
        // The glyph exists but has no layer for this master: no anchors.
        Ok(found.then(MotifAnchors::default))
    }

    fn component_tags(&self, layer: LayerId) -> Result<Vec<Option<ProvenanceTag>>, HostError> {
        Ok(self
            .layer_or_err(layer)?
            .components()
            .map(|c| c.tag)
            .collect())
    }

    fn remove_component(&mut self, layer: LayerId, index: usize) -> Result<(), HostError> {
        let l = self.layer_mut_or_err(layer)?;
        let slot = Self::component_slots(l).nth(index);
        match slot {
            Some(slot) => {
                l.shapes.remove(slot);
                Ok(())
            }
            None => Err(HostError::ComponentOutOfRange {
                layer,
                index,
                len: Self::component_slots(l).count(),
            }),
        }
    }

    fn append_component(
        &mut self,
        layer: LayerId,
        instance: &PlacedInstance,
    ) -> Result<(), HostError> {
        self.add_component(layer, ComponentShape::from(instance))
    }

    fn selection(&self, layer: LayerId) -> Result<Vec<NodeRef>, HostError> {
        Ok(self.layer_or_err(layer)?.selection.clone())
    }
}
