//! Key→Node directory: maps a caller key to the node that currently
//! represents that key at the top of its column.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::node::NodeIdx;

pub(crate) struct Directory<K> {
    by_key: HashMap<K, NodeIdx>,
}

impl<K> Directory<K>
where
    K: Eq + Hash,
{
    pub(crate) fn new() -> Directory<K> {
        Directory {
            by_key: HashMap::new(),
        }
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<NodeIdx>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_key.get(key).copied()
    }

    pub(crate) fn upsert(&mut self, key: K, idx: NodeIdx) {
        self.by_key.insert(key, idx);
    }

    pub(crate) fn forget<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_key.remove(key);
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    pub(crate) fn clear(&mut self) {
        self.by_key.clear();
    }

    pub(crate) fn swap(&mut self, other: &mut Directory<K>) {
        std::mem::swap(&mut self.by_key, &mut other.by_key);
    }

    /// Every `(key, node)` pair currently tracked. Used by invariant
    /// checks; not meaningful to callers outside the crate.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, NodeIdx)> {
        self.by_key.iter().map(|(k, &idx)| (k, idx))
    }
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;
