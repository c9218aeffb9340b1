//! `ranktower` is a ranked leaderboard index: an in-memory structure
//! that maintains a dynamic population of entities, each identified by
//! a unique key and carrying a totally-ordered score, and answers
//! ordering queries — rank of a given key, entity at a given rank, and
//! contiguous rank slices — in `O(log N)`, while supporting insertion,
//! score update and removal.
//!
//! Ordering is by score descending (a larger score is a better rank;
//! rank 1 is the highest score); ties are broken by insertion recency —
//! a later insert of an equal score ranks below an earlier one.
//!
//! The index is a multi-level, horizontally-linked "tower": a dense
//! bottom lane holding every live entry, with sparse summary lanes
//! above it whose node counts are kept consistent under insertion and
//! removal so that rank-from-key and key-from-rank traversals both stay
//! logarithmic. See `DESIGN.md` in the crate's repository for how each
//! module maps onto that structure.
//!
//! ```
//! use ranktower::RankIndex;
//!
//! let mut board: RankIndex<&str, i64> = RankIndex::new();
//! board.set_rank("alice", 30);
//! board.set_rank("bob", 10);
//! board.set_rank("carol", 20);
//!
//! assert_eq!(board.rank_of("alice"), 1);
//! assert_eq!(board.rank_of("carol"), 2);
//! assert_eq!(board.node_at(1).map(|(k, _)| *k), Some("alice"));
//! ```
//!
//! This crate has no user-visible failure modes: mutators are total
//! (duplicate-key inserts upsert, absent-key removes are no-ops) and
//! queries return a typed-absent value (`0`, `None`, or an empty `Vec`)
//! rather than erroring. It is not thread-safe — used from a single
//! control flow, like `std::collections::BTreeMap`.

mod arena;
mod directory;
mod node;
mod query;
mod tower;

pub use query::Iter;
pub use tower::{RankIndex, DEFAULT_FANOUT};
