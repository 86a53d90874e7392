// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for stitching passes.
//!
//! Errors are scoped to the smallest unit that can be skipped without
//! corrupting document state:
//!
//! - [`StitchError::DegenerateGeometry`] is path-scoped. The offending path
//!   contributes nothing and the pass continues with the remaining paths.
//! - [`StitchError::InvalidConfiguration`], [`StitchError::MissingMotif`], and
//!   [`StitchError::Host`] are layer-scoped. The layer is abandoned and a batch
//!   moves on to the next layer.
//!
//! Nothing is rolled back across paths or layers.

use alloc::string::String;

use thiserror::Error;

use crate::font::{LayerId, PathId};

/// Failure reported by a [`Host`](crate::host::Host) implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// The layer handle does not refer to a layer in the document.
    #[error("unknown layer {0:?}")]
    UnknownLayer(LayerId),
    /// A component ordinal was outside the layer's component list.
    #[error("component #{index} out of range on layer {layer:?} ({len} components)")]
    ComponentOutOfRange {
        /// Layer that was addressed.
        layer: LayerId,
        /// Requested ordinal.
        index: usize,
        /// Number of components on the layer.
        len: usize,
    },
    /// Any other host-side failure, with a diagnostic message.
    #[error("host failure: {0}")]
    Other(String),
}

/// Canonical error type for stitching.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StitchError {
    /// The configuration cannot drive a pass (e.g. empty motif string).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// None of the configured motifs exist in the font.
    #[error("no usable motif among {requested:?}")]
    MissingMotif {
        /// Motif names that were requested.
        requested: String,
    },
    /// A path cannot be resampled.
    #[error("degenerate geometry in path {path:?}: {reason}")]
    DegenerateGeometry {
        /// Path that was skipped, if it is known.
        path: Option<PathId>,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A host collaborator call failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl StitchError {
    /// Creates a [`DegenerateGeometry`](Self::DegenerateGeometry) error that is
    /// not yet attributed to a path.
    #[must_use]
    pub const fn degenerate(reason: &'static str) -> Self {
        Self::DegenerateGeometry { path: None, reason }
    }

    /// Attributes a geometry error to `path`. Other kinds pass through.
    #[must_use]
    pub fn in_path(self, id: PathId) -> Self {
        match self {
            Self::DegenerateGeometry { reason, .. } => Self::DegenerateGeometry {
                path: Some(id),
                reason,
            },
            other => other,
        }
    }

    /// Returns the error's kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Self::MissingMotif { .. } => ErrorKind::MissingMotif,
            Self::DegenerateGeometry { .. } => ErrorKind::DegenerateGeometry,
            Self::Host(_) => ErrorKind::HostCollaboratorFailure,
        }
    }
}

/// Fieldless discriminant of [`StitchError`], cheap to copy into trace events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StitchError::InvalidConfiguration`].
    InvalidConfiguration,
    /// See [`StitchError::MissingMotif`].
    MissingMotif,
    /// See [`StitchError::DegenerateGeometry`].
    DegenerateGeometry,
    /// See [`StitchError::Host`].
    HostCollaboratorFailure,
}

impl ErrorKind {
    /// Returns a short stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "invalid-configuration",
            Self::MissingMotif => "missing-motif",
            Self::DegenerateGeometry => "degenerate-geometry",
            Self::HostCollaboratorFailure => "host-failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn in_path_attributes_geometry_errors() {
        let err = StitchError::degenerate("no segments").in_path(PathId(3));
        assert_eq!(
            err,
            StitchError::DegenerateGeometry {
                path: Some(PathId(3)),
                reason: "no segments",
            }
        );
        assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);
    }

    #[test]
    fn in_path_leaves_other_kinds_alone() {
        let err = StitchError::InvalidConfiguration("empty".to_string())
            .in_path(PathId(1));

        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn host_errors_convert() {
        let err: StitchError = HostError::UnknownLayer(LayerId(9)).into();
        assert_eq!(err.kind(), ErrorKind::HostCollaboratorFailure);
        assert!(
            err.to_string().contains("LayerId(9)"),
            "message should name the layer: {err}"
        );
    }
}
