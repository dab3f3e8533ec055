//! Index Module
//!
//! Ordered, rank-aware indexes stored inside a domain.
//!
//! ## Responsibilities
//! - Sorted mapping from integer key to string value
//! - O(log n) expected insert, search, delete and rank
//! - Range deletion over inclusive key bounds
//!
//! ## Data Structure Choice
//! A skip list whose nodes carry a per-level `span` (the number of
//! base-level hops to the successor at that level). Summing spans along the
//! search path yields the ordinal position of a key without a full scan.
//!
//! ```text
//! Level 3:  HEAD ───────────(3)──────────► 30 ──────(2)──────► NIL
//! Level 2:  HEAD ──(1)──► 10 ──(2)───────► 30 ──(1)──► 40 ───► NIL
//! Level 1:  HEAD ──(1)──► 10 ──(1)──► 20 ─(1)─► 30 ─(1)─► 40 ─► NIL
//! ```
//!
//! The index has no locking of its own; callers serialize access
//! (see [`crate::store::Domain`]).

mod skiplist;

pub use skiplist::{Iter, SkipList};

/// Highest level any node may reach
pub const MAX_LEVEL: usize = 16;

/// Probability of promoting a node one more level
pub const P: f64 = 0.5;
