// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

/// Structural faults reported by
/// [`SkipList::check_invariants`](crate::skiplist::skiplist::SkipList::check_invariants).
///
/// None of the map operations return these; a healthy list never produces one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipListError {
    #[error("keys are not strictly increasing at level {level}")]
    OutOfOrder { level: usize },
    #[error("level {level} links to a node that no longer exists")]
    DanglingLink { level: usize },
    #[error("node reaches level {node_level}, above the maximum of {max_level}")]
    NodeLevelExceedsMaximum { node_level: usize, max_level: usize },
    #[error("head is linked at level {level}, above the current list level")]
    LinkAboveLevel { level: usize },
    #[error("list level {level} exceeds the maximum of {max_level}")]
    LevelExceedsMaximum { level: usize, max_level: usize },
    #[error("level {level} links {found} nodes, but {expected} nodes reach that level")]
    TowerMismatch {
        level: usize,
        expected: usize,
        found: usize,
    },
    #[error("length is {expected} but {found} keys are linked at level 0")]
    LengthMismatch { expected: usize, found: usize },
    #[error("{live} nodes are allocated but {len} are linked")]
    LeakedNodes { live: usize, len: usize },
}
