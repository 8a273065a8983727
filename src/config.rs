// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

/// The default ceiling on a node's level. A list with this ceiling comfortably
/// indexes a few thousand keys before the top tier saturates.
pub const DEFAULT_MAX_LEVEL: usize = 12;

/// The floor a requested maximum level is clamped to. A list with this ceiling
/// is a plain sorted singly linked list.
pub const MINIMUM_MAX_LEVEL: usize = 0;

/// Construction options for a [`SkipList`](crate::skiplist::skiplist::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// highest level any node may reach
    max_level: usize,
    /// fixed seed for level generation, entropy when unset
    seed: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }

    /// Sets the maximum level. Negative values are clamped to
    /// [`MINIMUM_MAX_LEVEL`].
    pub fn with_max_level(mut self, max_level: isize) -> Self {
        self.max_level = usize::try_from(max_level).unwrap_or(MINIMUM_MAX_LEVEL);
        self
    }

    /// Pins the level generator to a seed so the shape of the list is
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
