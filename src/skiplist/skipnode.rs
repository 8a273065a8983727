// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::ops::{
    Index,
    IndexMut,
};

/// Address of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A forward link. `None` marks the end of a level.
pub(crate) type Link = Option<NodeId>;

/// SkipNodes make up the SkipList. Every node is owned by the arena; the
/// forward links are plain indices and own nothing.
///
/// `forward` has one entry per level the node participates in, so its length is
/// the node's level plus one and it never changes after creation.
#[derive(Debug)]
pub(crate) struct SkipNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) forward: Box<[Link]>,
}

impl<K, V> SkipNode<K, V> {
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        SkipNode {
            key,
            value,
            forward: vec![None; level + 1].into_boxed_slice(),
        }
    }

    pub(crate) fn level(&self) -> usize {
        self.forward.len() - 1
    }
}

/// Slot storage for nodes. Released slots are recycled by later allocations so
/// delete-heavy workloads don't grow the backing vector.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<SkipNode<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: SkipNode<K, V>) -> NodeId {
        match self.free.pop() {
            | Some(id) => {
                self.slots[id.0] = Some(node);
                id
            },
            | None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            },
        }
    }

    /// Takes the node out of its slot and marks the slot reusable.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<SkipNode<K, V>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&SkipNode<K, V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut SkipNode<K, V>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = SkipNode<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            | Some(node) => node,
            | None => panic!("dangling node id {}", id.0),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            | Some(node) => node,
            | None => panic!("dangling node id {}", id.0),
        }
    }
}
