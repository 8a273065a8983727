// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! A skiplist implementation which allows faster random access than a standard
//! linked list.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! The distribution is geometric: every node flips a fair coin to decide
//! whether it also occupies the next level up, up to the list's maximum level.
//! A custom [`LevelGenerator`] can be supplied when the shape of the list has
//! to be controlled, e.g. for reproducible tests.

pub mod level_generator;
pub mod skiplist;
mod skipnode;
mod test;

pub use self::level_generator::{
    CoinFlipLevelGenerator,
    LevelGenerator,
};
pub use self::skiplist::SkipList;
