// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// Construction options for a [`SkipList`].
pub mod config;
/// Errors surfaced by structural checks.
pub mod errs;
/// A single-threaded [`skip list`] ordered map backed by a node arena.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
pub mod skiplist;

pub use config::{
    Config,
    DEFAULT_MAX_LEVEL,
    MINIMUM_MAX_LEVEL,
};
pub use errs::SkipListError;
pub use skiplist::{
    CoinFlipLevelGenerator,
    LevelGenerator,
    SkipList,
};
