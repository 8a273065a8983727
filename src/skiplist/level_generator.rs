// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The highest level this generator will ever produce.
    fn max_level(&self) -> usize;
    /// Generate a random level for a new node in the range `[0, max_level]`.
    ///
    /// This must never return a level that is `> self.max_level()`.
    fn random(&mut self) -> usize;
}

/// A level generator which flips a fair coin for every level.
///
/// Starting at level 0, the level is raised while it is below `max_level` and
/// the coin comes up heads, so the probability of generating level `k` is
/// `2^-(k+1)` for `k < max_level`, with the remaining mass folded into
/// `max_level` itself.
#[derive(Debug, Clone)]
pub struct CoinFlipLevelGenerator<R = SmallRng> {
    max_level: usize,
    rng: R,
}

impl CoinFlipLevelGenerator<SmallRng> {
    /// Create a generator seeded from system entropy. Two lists built this way
    /// will not share a shape.
    pub fn new(max_level: usize) -> Self {
        Self::with_rng(max_level, SmallRng::from_entropy())
    }

    /// Create a generator with a fixed seed, for reproducible lists.
    pub fn seeded(max_level: usize, seed: u64) -> Self {
        Self::with_rng(max_level, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoinFlipLevelGenerator<R> {
    pub fn with_rng(max_level: usize, rng: R) -> Self {
        CoinFlipLevelGenerator { max_level, rng }
    }
}

impl<R: Rng> LevelGenerator for CoinFlipLevelGenerator<R> {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn random(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.rng.gen::<bool>() {
            level += 1;
        }
        level
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    fn max_level(&self) -> usize {
        (**self).max_level()
    }

    fn random(&mut self) -> usize {
        (**self).random()
    }
}
