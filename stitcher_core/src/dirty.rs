// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-path tracking for selective rebuilds.
//!
//! A selective rebuild regenerates only the instances stamped on paths the
//! user is editing. Selected nodes mark their owning path on the
//! [`PATHS`] channel of an [`understory_dirty`] tracker; draining the channel
//! yields each dirty path exactly once, in ascending id order.
//!
//! Paths do not depend on each other, so marking never propagates.

use alloc::collections::BTreeSet;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::font::PathId;
use crate::host::NodeRef;

/// A path's geometry is being edited and its instances must be regenerated.
pub const PATHS: Channel = Channel::new(0);

/// Set of paths awaiting regeneration.
#[derive(Debug)]
pub struct DirtyPaths {
    tracker: DirtyTracker<u32>,
}

impl Default for DirtyPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyPaths {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Builds the set from a node selection.
    #[must_use]
    pub fn from_selection(selection: &[NodeRef]) -> Self {
        let mut dirty = Self::new();
        for node in selection {
            dirty.mark(node.path);
        }
        dirty
    }

    /// Marks `path` dirty.
    pub fn mark(&mut self, path: PathId) {
        self.tracker.mark(path.0, PATHS);
    }

    /// Takes every dirty path, leaving the set empty.
    pub fn drain(&mut self) -> BTreeSet<PathId> {
        self.tracker
            .drain(PATHS)
            .deterministic()
            .run()
            .map(PathId)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn selection_marks_each_path_once() {
        let selection = vec![
            NodeRef::new(PathId(3), 0),
            NodeRef::new(PathId(1), 2),
            NodeRef::new(PathId(3), 4),
        ];
        let mut dirty = DirtyPaths::from_selection(&selection);
        let drained: Vec<PathId> = dirty.drain().into_iter().collect();
        assert_eq!(drained, [PathId(1), PathId(3)]);
    }

    #[test]
    fn drain_empties_the_set() {
        let mut dirty = DirtyPaths::new();
        dirty.mark(PathId(7));
        assert_eq!(dirty.drain().len(), 1);
        assert!(dirty.drain().is_empty(), "second drain must be empty");
    }
}
