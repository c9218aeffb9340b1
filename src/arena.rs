//! Node arena: allocates and recycles [`Node`]s so that insert/remove
//! churn — O(log N) nodes touched per operation — does not translate
//! into O(log N) heap allocations per operation.

use crate::node::{Node, NodeIdx};

pub(crate) struct Arena<K, S> {
    slots: Vec<Node<K, S>>,
    free: Vec<NodeIdx>,
}

impl<K, S> Arena<K, S> {
    pub(crate) fn new() -> Arena<K, S> {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Returns a node carrying the given fields with all link slots
    /// empty, reusing a freed slot when one is available.
    pub(crate) fn acquire(&mut self, level: u32, count: u32, key: K, score: S) -> NodeIdx {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Node::new(level, count, key, score);
                idx
            }
            None => {
                self.slots.push(Node::new(level, count, key, score));
                self.slots.len() - 1
            }
        }
    }

    /// Clears a node's link slots and returns it to the free pool. Only
    /// the link fields are touched — `key`/`score`/`level`/`count` are
    /// left as-is until the slot is reused by [`Arena::acquire`].
    pub(crate) fn release(&mut self, idx: NodeIdx) {
        let node = &mut self.slots[idx];
        node.prev = None;
        node.next = None;
        node.up = None;
        node.down = None;
        self.free.push(idx);
    }

    #[inline]
    pub(crate) fn get(&self, idx: NodeIdx) -> &Node<K, S> {
        &self.slots[idx]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: NodeIdx) -> &mut Node<K, S> {
        &mut self.slots[idx]
    }

    /// Drops every slot and the free list, as if the arena were freshly
    /// constructed. Backing storage capacity is released.
    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.free = Vec::new();
    }

    pub(crate) fn swap(&mut self, other: &mut Arena<K, S>) {
        std::mem::swap(&mut self.slots, &mut other.slots);
        std::mem::swap(&mut self.free, &mut other.free);
    }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
