// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    borrow::Borrow,
    fmt,
    mem,
};

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::Config,
    errs::SkipListError,
    skiplist::{
        level_generator::{
            CoinFlipLevelGenerator,
            LevelGenerator,
        },
        skipnode::{
            Arena,
            Link,
            NodeId,
            SkipNode,
        },
    },
};

/// A position during a top-down scan: either the sentinel head or a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Head,
    Node(NodeId),
}

/// An ordered map built as a tower of singly linked lists.
///
/// Level 0 links every entry in key order; each level above links a random
/// subset of the level below it, so a lookup can skip ahead on the sparse
/// levels before settling on level 0. Lookup, insert and delete all take
/// expected `O(log n)` time.
///
/// Nodes live in an arena and link to each other by index. The head is not a
/// node; it's the array of links every scan starts from, sized for the
/// maximum level up front.
///
/// The list is not synchronized. Share it behind a lock and treat every
/// method as one unit of work.
pub struct SkipList<K, V, G = CoinFlipLevelGenerator> {
    head: Box<[Link]>,
    nodes: Arena<K, V>,
    /// highest level populated so far. deletes never lower it, even when they
    /// empty the top levels.
    level: usize,
    len: usize,
    generator: G,
}

impl<K: Ord, V> SkipList<K, V> {
    /// Create an empty list with the default maximum level.
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    /// Create an empty list whose nodes never rise above `max_level`. Negative
    /// values are clamped to zero, which yields a plain sorted linked list.
    pub fn with_max_level(max_level: isize) -> Self {
        Self::with_config(Config::new().with_max_level(max_level))
    }

    pub fn with_config(config: Config) -> Self {
        let generator = match config.seed() {
            | Some(seed) => CoinFlipLevelGenerator::seeded(config.max_level(), seed),
            | None => CoinFlipLevelGenerator::new(config.max_level()),
        };
        Self::with_generator(generator)
    }
}

impl<K: Ord, V, G: LevelGenerator> SkipList<K, V, G> {
    /// Create an empty list that draws node levels from `generator`. The
    /// generator's maximum level becomes the list's.
    pub fn with_generator(generator: G) -> Self {
        let max_level = generator.max_level();
        debug!(max_level, "creating skiplist");

        SkipList {
            head: vec![None; max_level + 1].into_boxed_slice(),
            nodes: Arena::new(),
            level: 0,
            len: 0,
            generator,
        }
    }

    /// Number of keys in the list. This doesn't walk the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The highest level populated so far.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.head.len() - 1
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| &self.nodes[id].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        Some(&mut self.nodes[id].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Insert `value` under `key`. If the key is already present its value is
    /// overwritten in place and the old value is returned; the list's shape
    /// doesn't change.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let node_level = self.random_level();
        if node_level > self.level {
            trace!(from = self.level, to = node_level, "raising list level");
            self.level = node_level;
        }

        // levels opened just now have nothing past the head, so the scan
        // leaves the head as their predecessor.
        let preds = self.predecessors(&key);

        if let Some(id) = self.next(preds[0], 0) {
            let existing = &mut self.nodes[id];
            if existing.key == key {
                trace!("key exists, updating in place");
                return Some(mem::replace(&mut existing.value, value));
            }
        }

        let id = self.nodes.alloc(SkipNode::new(key, value, node_level));
        for (level, &pred) in preds.iter().enumerate().take(node_level + 1) {
            let next = self.next(pred, level);
            self.nodes[id].forward[level] = next;
            *self.next_mut(pred, level) = Some(id);
        }
        self.len += 1;

        None
    }

    /// Remove `key`, returning its value if it was present.
    #[instrument(level = "trace", skip_all)]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let preds = self.predecessors(key);

        let target = self.next(preds[0], 0)?;
        if self.key_at::<Q>(target) != key {
            return None;
        }

        // the target isn't linked above its own level, so the predecessors
        // recorded there are left alone.
        let node_level = self.nodes[target].level();
        for (level, &pred) in preds.iter().enumerate().take(node_level + 1) {
            let next = self.nodes[target].forward[level];
            *self.next_mut(pred, level) = next;
        }

        let node = self.nodes.release(target)?;
        self.len -= 1;

        Some(node.value)
    }

    /// Remove `key`, reporting whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Drop every entry and return the list to its freshly constructed state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head.fill(None);
        self.level = 0;
        self.len = 0;
    }

    /// Walk every level and verify the structure. Keys must strictly increase on
    /// each level, each level must link exactly the nodes tall enough to reach
    /// it, and the length must match both level 0 and the live node count.
    pub fn check_invariants(&self) -> Result<(), SkipListError> {
        let max_level = self.max_level();
        if self.level > max_level {
            return Err(SkipListError::LevelExceedsMaximum {
                level: self.level,
                max_level,
            });
        }
        let above = self.level + 1..=max_level;
        if let Some(level) = above.clone().find(|&level| self.head[level].is_some()) {
            return Err(SkipListError::LinkAboveLevel { level });
        }

        // tower[i] counts the nodes on level 0 tall enough to reach level i
        let mut tower = vec![0usize; max_level + 1];

        for level in 0..=self.level {
            let mut found = 0;
            let mut prev: Option<&K> = None;
            let mut link = self.head[level];

            while let Some(id) = link {
                let node = self
                    .nodes
                    .get(id)
                    .ok_or(SkipListError::DanglingLink { level })?;

                if node.level() > max_level {
                    return Err(SkipListError::NodeLevelExceedsMaximum {
                        node_level: node.level(),
                        max_level,
                    });
                }
                if prev.is_some_and(|prev| prev >= &node.key) {
                    return Err(SkipListError::OutOfOrder { level });
                }
                if level == 0 {
                    for count in tower.iter_mut().take(node.level() + 1) {
                        *count += 1;
                    }
                }

                found += 1;
                let Some(&next) = node.forward.get(level) else {
                    return Err(SkipListError::TowerMismatch {
                        level,
                        expected: tower[level],
                        found,
                    });
                };
                prev = Some(&node.key);
                link = next;
            }

            if level == 0 && found != self.len {
                return Err(SkipListError::LengthMismatch {
                    expected: self.len,
                    found,
                });
            }
            if found != tower[level] {
                return Err(SkipListError::TowerMismatch {
                    level,
                    expected: tower[level],
                    found,
                });
            }
        }

        if let Some(level) = above.into_iter().find(|&level| tower[level] > 0) {
            return Err(SkipListError::TowerMismatch {
                level,
                expected: tower[level],
                found: 0,
            });
        }
        if self.nodes.live() != self.len {
            return Err(SkipListError::LeakedNodes {
                live: self.nodes.live(),
                len: self.len,
            });
        }

        Ok(())
    }

    /// Entries in key order, read straight off level 0.
    pub(crate) fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            nodes: &self.nodes,
            next: self.head[0],
        }
    }

    fn random_level(&mut self) -> usize {
        self.generator.random().min(self.max_level())
    }

    fn key_at<Q>(&self, id: NodeId) -> &Q
    where
        K: Borrow<Q>,
        Q: ?Sized,
    {
        self.nodes[id].key.borrow()
    }

    fn next(&self, cursor: Cursor, level: usize) -> Link {
        match cursor {
            | Cursor::Head => self.head[level],
            | Cursor::Node(id) => self.nodes[id].forward[level],
        }
    }

    fn next_mut(&mut self, cursor: Cursor, level: usize) -> &mut Link {
        match cursor {
            | Cursor::Head => &mut self.head[level],
            | Cursor::Node(id) => &mut self.nodes[id].forward[level],
        }
    }

    /// Scan from the top populated level down to level 0, moving forward while
    /// the next key is below `key` and dropping a level when it isn't.
    /// `visit` is handed the last position reached on each level. Returns the
    /// final position on level 0.
    fn descend<Q>(&self, key: &Q, mut visit: impl FnMut(usize, Cursor)) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = Cursor::Head;
        for level in (0..=self.level).rev() {
            while let Some(next) = self.next(cursor, level) {
                if self.key_at::<Q>(next) >= key {
                    break;
                }
                cursor = Cursor::Node(next);
            }
            visit(level, cursor);
        }
        cursor
    }

    /// The predecessor of `key` on every level up to the current list level.
    fn predecessors<Q>(&self, key: &Q) -> Vec<Cursor>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut preds = vec![Cursor::Head; self.level + 1];
        self.descend(key, |level, cursor| preds[level] = cursor);
        preds
    }

    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let cursor = self.descend(key, |_, _| {});
        let candidate = self.next(cursor, 0)?;
        (self.key_at::<Q>(candidate) == key).then_some(candidate)
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        SkipList::new()
    }
}

impl<K, V, G> fmt::Debug for SkipList<K, V, G>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: Ord, V, G: LevelGenerator> Extend<(K, V)> for SkipList<K, V, G> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

/// Borrowing walk over level 0.
pub(crate) struct Entries<'a, K, V> {
    nodes: &'a Arena<K, V>,
    next: Link,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.forward[0];
        Some((&node.key, &node.value))
    }
}
