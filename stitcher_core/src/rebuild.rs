// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rebuild controller.
//!
//! [`Stitcher::run`] drives one invocation over one or more layers. Each
//! invocation picks a [`RebuildMode`]:
//!
//! - [`SingleShotOverlay`](RebuildMode::SingleShotOverlay) when the request
//!   carries [`Overrides`]: one layer, nothing deleted, the background left
//!   alone, fresh instances appended on top.
//! - [`SelectiveRebuild`](RebuildMode::SelectiveRebuild) when exactly one
//!   layer is targeted and it has a node selection: only paths with a
//!   selected node are dirty, only instances tagged with a dirty path are
//!   deleted, and only dirty paths are stamped again.
//! - [`FullRebuild`](RebuildMode::FullRebuild) otherwise: every component on
//!   the layer is deleted and every path is stamped again.
//!
//! Outside overlays, `use_background` moves the foreground outlines into the
//! background before stamping. A full rebuild replaces the background; a
//! selective rebuild merges into it by [`PathId`], so clean paths keep their
//! source geometry and their instances stay resolvable. When the foreground
//! has no outlines the existing background is stamped instead, which makes
//! re-running a pass on an already stitched layer idempotent.
//!
//! Layers are processed strictly in request order. A layer-scoped failure
//! (see [`StitchError`]) ends that layer's pass and the batch moves on;
//! mutations already applied to the failed layer are not rolled back.

use alloc::borrow::Cow;
use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

use crate::balance::balance;
use crate::config::{Configuration, Overrides};
use crate::dirty::DirtyPaths;
use crate::emit::{ProvenanceTag, emit, resolve_motifs};
use crate::error::StitchError;
use crate::font::{LayerId, PathId, PathShape};
use crate::host::Host;
use crate::place::place;
use crate::trace::{
    BackgroundPreservedEvent, InstancesRemovedEvent, LayerBeginEvent, LayerEndEvent,
    LayerFailedEvent, PathSkippedEvent, PathStampedEvent, Tracer,
};

/// How a layer is regenerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RebuildMode {
    /// Delete every component, stamp every path.
    FullRebuild,
    /// Delete and restamp only selected paths.
    SelectiveRebuild,
    /// Stamp every path on top of existing content.
    SingleShotOverlay,
}

impl RebuildMode {
    /// Returns a short stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullRebuild => "full",
            Self::SelectiveRebuild => "selective",
            Self::SingleShotOverlay => "overlay",
        }
    }
}

/// What to stitch.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// Interactive invocation over the selected layers, using the stored
    /// configuration.
    Layers(Vec<LayerId>),
    /// Batch invocation on one layer with per-call overrides.
    Overlay {
        /// Target layer.
        layer: LayerId,
        /// Overrides applied on top of the stored configuration.
        overrides: Overrides,
    },
}

/// Per-path result of a successful stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStamp {
    /// Source path.
    pub path: PathId,
    /// Fine-grained samples taken.
    pub fine_samples: usize,
    /// Instances appended.
    pub instances: usize,
}

/// Summary of a completed layer pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerReport {
    /// Mode the layer ran in.
    pub mode: RebuildMode,
    /// Components deleted before stamping.
    pub removed: usize,
    /// Outlines moved into the background.
    pub preserved: usize,
    /// Paths that received instances.
    pub stamped: Vec<PathStamp>,
    /// Paths skipped for degenerate geometry.
    pub skipped: Vec<StitchError>,
}

impl LayerReport {
    fn new(mode: RebuildMode) -> Self {
        Self {
            mode,
            removed: 0,
            preserved: 0,
            stamped: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Total instances appended.
    #[must_use]
    pub fn instances(&self) -> usize {
        self.stamped.iter().map(|s| s.instances).sum()
    }
}

/// Result of a layer pass that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerOutcome {
    /// The layer was stamped.
    Stitched(LayerReport),
    /// The layer belongs to one of the motif glyphs and was left alone.
    MotifGlyph,
}

/// Outcome of one layer within a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerResult {
    /// Layer processed.
    pub layer: LayerId,
    /// What happened.
    pub outcome: Result<LayerOutcome, StitchError>,
}

/// Outcomes of every layer in a request, in request order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    /// Per-layer results.
    pub layers: Vec<LayerResult>,
}

impl BatchReport {
    /// Layers that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (LayerId, &StitchError)> {
        self.layers
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.layer, e)))
    }

    /// Report of a stitched layer, if it was stitched.
    #[must_use]
    pub fn report(&self, layer: LayerId) -> Option<&LayerReport> {
        self.layers
            .iter()
            .find(|r| r.layer == layer)
            .and_then(|r| match &r.outcome {
                Ok(LayerOutcome::Stitched(report)) => Some(report),
                _ => None,
            })
    }
}

/// Drives stitching passes with a stored configuration.
#[derive(Clone, Debug, Default)]
pub struct Stitcher {
    config: Configuration,
}

impl Stitcher {
    /// Creates a controller for `config`.
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// The stored configuration.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Picks the rebuild mode for `request`.
    pub fn choose_mode<H: Host + ?Sized>(
        host: &H,
        request: &Request,
    ) -> Result<RebuildMode, StitchError> {
        match request {
            Request::Overlay { .. } => Ok(RebuildMode::SingleShotOverlay),
            Request::Layers(layers) => match layers.as_slice() {
                [layer] if !host.selection(*layer)?.is_empty() => {
                    Ok(RebuildMode::SelectiveRebuild)
                }
                _ => Ok(RebuildMode::FullRebuild),
            },
        }
    }

    /// Runs `request` against `host`.
    ///
    /// Never fails as a whole: every layer's outcome is in the report.
    pub fn run<H: Host + ?Sized>(
        &self,
        host: &mut H,
        request: &Request,
        tracer: &mut Tracer<'_>,
    ) -> BatchReport {
        let (layers, config) = match request {
            Request::Layers(layers) => (layers.clone(), Ok(Cow::Borrowed(&self.config))),
            Request::Overlay { layer, overrides } => (
                vec![*layer],
                self.config.with_overrides(overrides).map(Cow::Owned),
            ),
        };

        let mut report = BatchReport::default();
        for layer in layers {
            let outcome = match &config {
                Ok(config) => Self::choose_mode(host, request).and_then(|mode| {
                    tracer.layer_begin(&LayerBeginEvent {
                        layer,
                        mode,
                        interval: config.interval(),
                        balance: config.balance,
                    });
                    stitch_layer(&mut *host, layer, mode, config, tracer)
                }),
                Err(e) => Err(e.clone()),
            };
            match &outcome {
                Ok(LayerOutcome::Stitched(r)) => tracer.layer_end(&LayerEndEvent {
                    layer,
                    paths_stamped: count(r.stamped.len()),
                    paths_skipped: count(r.skipped.len()),
                    instances: count(r.instances()),
                }),
                Ok(LayerOutcome::MotifGlyph) => tracer.layer_end(&LayerEndEvent {
                    layer,
                    paths_stamped: 0,
                    paths_skipped: 0,
                    instances: 0,
                }),
                Err(e) => tracer.layer_failed(&LayerFailedEvent {
                    layer,
                    kind: e.kind(),
                }),
            }
            report.layers.push(LayerResult { layer, outcome });
        }
        report
    }
}

/// Runs one layer pass in `mode`.
///
/// Deletions happen from the highest component ordinal down. Geometry errors
/// skip the offending path; any other error ends the pass.
pub fn stitch_layer<H: Host + ?Sized>(
    host: &mut H,
    layer: LayerId,
    mode: RebuildMode,
    config: &Configuration,
    tracer: &mut Tracer<'_>,
) -> Result<LayerOutcome, StitchError> {
    let glyph = host.glyph_name(layer)?;
    if config.motifs().iter().any(|m| m.name == glyph) {
        return Ok(LayerOutcome::MotifGlyph);
    }

    let master = host.master(layer)?;
    let motifs = resolve_motifs(host, config.motifs(), master)?;

    let dirty: Option<BTreeSet<PathId>> = match mode {
        RebuildMode::SelectiveRebuild => {
            Some(DirtyPaths::from_selection(&host.selection(layer)?).drain())
        }
        RebuildMode::FullRebuild | RebuildMode::SingleShotOverlay => None,
    };
    let is_dirty = |id: PathId| dirty.as_ref().is_none_or(|d| d.contains(&id));

    let mut report = LayerReport::new(mode);

    if mode != RebuildMode::SingleShotOverlay {
        let tags = host.component_tags(layer)?;
        for (index, tag) in tags.iter().enumerate().rev() {
            let doomed = match mode {
                RebuildMode::SelectiveRebuild => tag.is_some_and(|t| is_dirty(t.path())),
                _ => true,
            };
            if doomed {
                host.remove_component(layer, index)?;
                report.removed += 1;
            }
        }
        tracer.instances_removed(&InstancesRemovedEvent {
            layer,
            removed: count(report.removed),
        });
    }

    let use_background = config.use_background && mode != RebuildMode::SingleShotOverlay;
    let sources = if use_background {
        let foreground = host.paths(layer)?;
        if !foreground.is_empty() {
            report.preserved = foreground.len();
            let background = match mode {
                RebuildMode::SelectiveRebuild => {
                    merge_background(host.background(layer)?, foreground)
                }
                RebuildMode::FullRebuild | RebuildMode::SingleShotOverlay => foreground,
            };
            host.replace_background(layer, background)?;
            host.clear_paths(layer)?;
            tracer.background_preserved(&BackgroundPreservedEvent {
                layer,
                paths: count(report.preserved),
            });
        }
        host.background(layer)?
    } else {
        host.paths(layer)?
    };

    for shape in sources.iter().filter(|s| is_dirty(s.id)) {
        let placed = if config.balance {
            balance(&shape.path, config.interval())
        } else {
            place(&shape.path, config.interval())
        };
        let placement = match placed {
            Ok(placement) => placement,
            Err(StitchError::DegenerateGeometry { reason, .. }) => {
                tracer.path_skipped(&PathSkippedEvent {
                    layer,
                    path: shape.id,
                    reason,
                });
                report
                    .skipped
                    .push(StitchError::degenerate(reason).in_path(shape.id));
                continue;
            }
            Err(e) => return Err(e),
        };

        let instances = emit(&placement.dots, &motifs, ProvenanceTag::for_path(shape.id));
        for instance in &instances {
            host.append_component(layer, instance)?;
        }
        tracer.path_stamped(&PathStampedEvent {
            layer,
            path: shape.id,
            fine_samples: count(placement.fine_samples),
            instances: count(instances.len()),
        });
        report.stamped.push(PathStamp {
            path: shape.id,
            fine_samples: placement.fine_samples,
            instances: instances.len(),
        });
    }

    Ok(LayerOutcome::Stitched(report))
}

/// Folds `foreground` into `background` by path identity.
///
/// Entries sharing an id are replaced in place; new paths are appended.
fn merge_background(
    mut background: Vec<PathShape>,
    foreground: Vec<PathShape>,
) -> Vec<PathShape> {
    for shape in foreground {
        match background.iter_mut().find(|b| b.id == shape.id) {
            Some(slot) => *slot = shape,
            None => background.push(shape),
        }
    }
    background
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
