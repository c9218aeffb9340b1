//! The tower itself — the 2-D linked structure of horizontal sorted
//! lanes and vertical promotion columns — plus the rebalancer that keeps
//! the fanout invariant under insertion and removal, and the public
//! mutators built on top of it.
//!
//! Ported from `examples/original_source/RankList/RankList.h`'s
//! `CRankList`, with raw pointers replaced by arena indices (see
//! [`crate::arena`]) and the node-map replaced by [`crate::directory`].

use std::borrow::Borrow;
use std::hash::Hash;

use log::trace;

use crate::arena::Arena;
use crate::directory::Directory;
use crate::node::NodeIdx;

/// Default fanout `N`, matching the reference's `template<... int N = 4>`.
pub const DEFAULT_FANOUT: u32 = 4;

/// A ranked leaderboard index.
///
/// Maintains a dynamic population of `(key, score)` entries and answers
/// rank-of-key, key-of-rank, and range-slice queries in `O(log N)`,
/// ordered by score descending with ties broken by insertion recency
/// (a later insert of an equal score ranks lower than an earlier one).
///
/// Not thread-safe: used from a single control flow, like any other
/// plain collection. See the crate-level documentation for the full
/// contract.
pub struct RankIndex<K, S> {
    pub(crate) fanout: u32,
    pub(crate) root: Option<NodeIdx>,
    pub(crate) arena: Arena<K, S>,
    pub(crate) directory: Directory<K>,
}

impl<K, S> RankIndex<K, S>
where
    K: Clone + Eq + Hash,
    S: Copy + Ord,
{
    /// Builds an empty index with the reference's default fanout of 4.
    pub fn new() -> RankIndex<K, S> {
        RankIndex::with_fanout(DEFAULT_FANOUT)
    }

    /// Builds an empty index with a caller-chosen fanout target.
    ///
    /// `fanout` bounds how many bottom-lane entries a single non-bottom
    /// node may summarize before the rebalancer promotes a new column;
    /// it governs tower height. Must be at least 2.
    pub fn with_fanout(fanout: u32) -> RankIndex<K, S> {
        debug_assert!(fanout >= 2, "fanout must be at least 2");
        RankIndex {
            fanout,
            root: None,
            arena: Arena::new(),
            directory: Directory::new(),
        }
    }

    /// Inserts `key` with `score` if absent, or updates its score if
    /// present. See spec §4.4 for the full decision tree.
    pub fn set_rank(&mut self, key: K, score: S) {
        if let Some(top) = self.directory.lookup(&key) {
            if self.arena.get(top).score == score {
                return; // unchanged
            }

            let bottom = self.bottom_of_column(top);
            let prev_ok = match self.arena.get(bottom).prev {
                Some(p) => self.arena.get(p).score >= score,
                None => true,
            };
            let next_ok = match self.arena.get(bottom).next {
                Some(n) => score > self.arena.get(n).score,
                None => true,
            };

            if prev_ok && next_ok {
                // In-place score change: local order preserved, overwrite
                // the column's score bottom-upward, no structural change.
                let mut cur = Some(bottom);
                while let Some(idx) = cur {
                    self.arena.get_mut(idx).score = score;
                    cur = self.arena.get(idx).up;
                }
                return;
            }

            // Reposition: remove then fall through to fresh insertion.
            self.remove_rank(&key);
        }

        let Some(root) = self.root else {
            self.create_root(key, score);
            return;
        };

        if self.arena.get(root).score < score {
            self.insert_root(key, score);
            return;
        }

        let (prev, parents) = self.find_prev_node(score, root);
        let mut top_node = self.insert_bottom_after(prev, key, score);

        for &parent in parents.iter().rev() {
            self.arena.get_mut(parent).count += 1;

            if self.arena.get(parent).down.is_some() {
                let level = self.arena.get(parent).level;
                let threshold = pow_u64(self.fanout, level - 1);
                if self.arena.get(parent).count as u64 > threshold {
                    trace!(
                        "promoting column at level {level}, count {}",
                        self.arena.get(parent).count
                    );
                    top_node = self.insert_up(top_node, parent);
                }
            }
        }

        let root = self.root.expect("root exists after insertion");
        let root_level = self.arena.get(root).level;
        if self.segment_count(root) as u64 > pow_u64(self.fanout, root_level) {
            self.increase_level();
        }
    }

    /// Removes `key` if present; a no-op otherwise.
    pub fn remove_rank<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let top = match self.directory.lookup(key) {
            Some(top) => top,
            None => return,
        };

        if self.root == Some(top) {
            self.remove_root();
        } else {
            self.remove_node(top);
        }

        self.directory.forget(key);
    }

    /// Releases every node and empties the directory.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.directory.clear();
    }

    /// Exchanges the root, directory and arena of two indices.
    pub fn swap(&mut self, other: &mut RankIndex<K, S>) {
        std::mem::swap(&mut self.fanout, &mut other.fanout);
        std::mem::swap(&mut self.root, &mut other.root);
        self.arena.swap(&mut other.arena);
        self.directory.swap(&mut other.directory);
    }

    // --- rebalancer internals ---

    fn create_root(&mut self, key: K, score: S) {
        let bottom = self.arena.acquire(1, 1, key.clone(), score);
        let root = self.arena.acquire(2, 1, key.clone(), score);
        self.arena.get_mut(root).down = Some(bottom);
        self.arena.get_mut(bottom).up = Some(root);
        self.root = Some(root);
        self.directory.upsert(key, root);
    }

    /// New best: promotes `key`/`score` to the front of every level,
    /// displacing the former root's identity into a fresh bottom node.
    fn insert_root(&mut self, key: K, score: S) {
        let root = self.root.expect("insert_root requires a non-empty tower");
        let bottom = self.bottom_of_column(root);
        let old = {
            let n = self.arena.get(root);
            (n.key.clone(), n.score)
        };
        self.insert_bottom_after(bottom, old.0, old.1);

        let mut cur = Some(root);
        while let Some(idx) = cur {
            let has_down = self.arena.get(idx).down.is_some();
            {
                let n = self.arena.get_mut(idx);
                n.key = key.clone();
                n.score = score;
            }
            if has_down {
                self.arena.get_mut(idx).count += 1;
            }
            cur = self.arena.get(idx).down;
        }

        trace!("new best score promoted to root");
        self.directory.upsert(key, root);
    }

    fn remove_root(&mut self) {
        let root = self.root.expect("remove_root requires a non-empty tower");
        let bottom = self.bottom_of_column(root);

        match self.arena.get(bottom).next {
            None => {
                trace!("removing the only entry, tower becomes empty");
                self.release_column(root);
                self.root = None;
            }
            Some(next) => {
                let promoted = {
                    let n = self.arena.get(next);
                    (n.key.clone(), n.score)
                };

                let mut cur = Some(root);
                while let Some(idx) = cur {
                    let n = self.arena.get_mut(idx);
                    n.key = promoted.0.clone();
                    n.score = promoted.1;
                    cur = self.arena.get(idx).down;
                }
                self.directory.upsert(promoted.0, root);

                self.remove_node(next);
            }
        }
    }

    /// Unlinks the column containing `node` (any node of the column —
    /// not necessarily its top), decrementing every ancestor whose
    /// segment contains it and splicing each level's lane.
    fn remove_node(&mut self, node: NodeIdx) {
        let top = self.top_of_column(node);

        let mut parent = top;
        loop {
            while let Some(up) = self.arena.get(parent).up {
                parent = up;
                self.arena.get_mut(parent).count -= 1;
            }
            match self.arena.get(parent).prev {
                Some(prev) => parent = prev,
                None => break,
            }
        }

        let mut cur = Some(top);
        while let Some(idx) = cur {
            let (level, count, prev, next, down) = {
                let n = self.arena.get(idx);
                (n.level, n.count, n.prev, n.next, n.down)
            };

            if level > 1 {
                if let Some(p) = prev {
                    self.arena.get_mut(p).count += count - 1;
                }
            }
            if let Some(p) = prev {
                self.arena.get_mut(p).next = next;
            }
            if let Some(n) = next {
                self.arena.get_mut(n).prev = prev;
            }

            self.arena.release(idx);
            cur = down;
        }
    }

    fn release_column(&mut self, top: NodeIdx) {
        let mut cur = Some(top);
        while let Some(idx) = cur {
            let down = self.arena.get(idx).down;
            self.arena.release(idx);
            cur = down;
        }
    }

    /// Descends from `start`, at each level walking `next` while
    /// `next.score >= score`, recording the node chosen at every
    /// non-bottom level as a promotion candidate. Returns the bottom
    /// node after which the new entry belongs, plus the recorded
    /// parents in root-to-bottom order.
    fn find_prev_node(&self, score: S, start: NodeIdx) -> (NodeIdx, Vec<NodeIdx>) {
        let mut parents = Vec::new();
        let mut node = start;
        loop {
            loop {
                match self.arena.get(node).next {
                    Some(next) if self.arena.get(next).score >= score => node = next,
                    _ => break,
                }
            }
            match self.arena.get(node).down {
                None => return (node, parents),
                Some(down) => {
                    parents.push(node);
                    node = down;
                }
            }
        }
    }

    fn insert_bottom_after(&mut self, after: NodeIdx, key: K, score: S) -> NodeIdx {
        debug_assert_eq!(self.arena.get(after).level, 1);

        let new_idx = self.arena.acquire(1, 1, key.clone(), score);
        let next = self.arena.get(after).next;

        self.arena.get_mut(new_idx).prev = Some(after);
        self.arena.get_mut(new_idx).next = next;
        if let Some(n) = next {
            self.arena.get_mut(n).prev = Some(new_idx);
        }
        self.arena.get_mut(after).next = Some(new_idx);

        self.directory.upsert(key, new_idx);
        new_idx
    }

    /// Promotes `down_node`'s column one level, inserting a new node at
    /// `parent`'s level immediately after `parent` and stealing the
    /// overflowed tail of `parent`'s segment.
    fn insert_up(&mut self, down_node: NodeIdx, parent: NodeIdx) -> NodeIdx {
        let count = self.segment_count(down_node);
        let identity = {
            let n = self.arena.get(down_node);
            (n.key.clone(), n.score)
        };
        let level = self.arena.get(parent).level;

        let new_idx = self.arena.acquire(level, count, identity.0.clone(), identity.1);
        let next = self.arena.get(parent).next;

        self.arena.get_mut(new_idx).down = Some(down_node);
        self.arena.get_mut(new_idx).prev = Some(parent);
        self.arena.get_mut(new_idx).next = next;
        if let Some(n) = next {
            self.arena.get_mut(n).prev = Some(new_idx);
        }
        self.arena.get_mut(parent).next = Some(new_idx);
        self.arena.get_mut(parent).count -= count;
        self.arena.get_mut(down_node).up = Some(new_idx);

        self.directory.upsert(identity.0, new_idx);
        new_idx
    }

    fn increase_level(&mut self) {
        let root = self.root.expect("increase_level requires a non-empty tower");
        let count = self.segment_count(root);
        let identity = {
            let n = self.arena.get(root);
            (n.key.clone(), n.score)
        };
        let level = self.arena.get(root).level + 1;

        trace!("growing tower one level, new root level {level}");

        let new_idx = self.arena.acquire(level, count, identity.0.clone(), identity.1);
        self.arena.get_mut(new_idx).down = Some(root);
        self.arena.get_mut(root).up = Some(new_idx);
        self.root = Some(new_idx);
        self.directory.upsert(identity.0, new_idx);
    }

    /// Sum of `count` starting at `node` and continuing along `next`
    /// until a node that is itself a promoted column head is reached.
    pub(crate) fn segment_count(&self, node: NodeIdx) -> u32 {
        let mut total = self.arena.get(node).count;
        let mut cur = node;
        loop {
            match self.arena.get(cur).next {
                Some(next) if self.arena.get(next).up.is_none() => {
                    total += self.arena.get(next).count;
                    cur = next;
                }
                _ => break,
            }
        }
        total
    }

    pub(crate) fn top_of_column(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(up) = self.arena.get(idx).up {
            idx = up;
        }
        idx
    }

    pub(crate) fn bottom_of_column(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(down) = self.arena.get(idx).down {
            idx = down;
        }
        idx
    }
}

impl<K, S> Default for RankIndex<K, S>
where
    K: Clone + Eq + Hash,
    S: Copy + Ord,
{
    fn default() -> RankIndex<K, S> {
        RankIndex::new()
    }
}

impl<K, S> std::fmt::Debug for RankIndex<K, S>
where
    K: Clone + Eq + Hash,
    S: Copy + Ord,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankIndex")
            .field("size", &self.size())
            .field("max_level", &self.max_level())
            .finish()
    }
}

pub(crate) fn pow_u64(base: u32, exp: u32) -> u64 {
    (base as u64).checked_pow(exp).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "tower_test.rs"]
mod tower_test;
