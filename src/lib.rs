//! Advanced In-Memory Data Structures for Rust
//!
//! This crate provides container types with carefully chosen asymptotic
//! guarantees and auxiliary operations not found in the standard collections.
//!
//! # Features
//!
//! - **Min-Max Heap**: O(1) access to both extremes; O(log n) insertion and
//!   removal of either extreme; O(n) bulk construction
//! - **Rank-Pairing Heap**: O(1) amortized increase-priority; O(log n)
//!   amortized extract-max; deduplication of values across their lifetime
//! - **Suffix Tree**: O(n) construction via Ukkonen's on-line algorithm;
//!   O(m) longest suffix-prefix overlap; O(m + occ) substring location
//! - **Range-Minimum Query**: O(n) construction, O(1) query
//!   (Fischer–Heun block decomposition with Cartesian-tree shape memos)
//! - **Union-Find**: amortized ~O(α(n)) find/union with path compression and
//!   union by rank, plus group enumeration in time linear in the group size
//! - **Updatable Priority Queue**: a standard binary max-heap with
//!   deduplicated re-insertion for priority updates
//! - **Immutable List**: persistent Lisp-style list whose nodes are released
//!   through a non-recursive deletion queue
//! - **Stable Double**: overflow- and underflow-resistant scalar arithmetic
//!   in log-transformed space
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::min_max::MinMaxHeap;
//!
//! let mut heap: MinMaxHeap<i32> = [5, 1, 9, 3].into_iter().collect();
//! assert_eq!(*heap.min(), 1);
//! assert_eq!(*heap.max(), 9);
//! heap.pop_max();
//! assert_eq!(*heap.max(), 5);
//! ```
//!
//! The containers are independent of one another and single-threaded; the
//! caller is responsible for exclusion. The one exception is the deletion
//! queue behind [`immutable_list::ImmutableList`], which tolerates drops
//! arriving from multiple threads.

pub mod immutable_list;
pub mod min_max;
pub mod range_min_query;
pub mod rank_pairing;
pub mod stable_double;
pub mod suffix_tree;
pub mod traits;
pub mod union_find;
pub mod updatable_queue;

// Re-export the main types for convenience
pub use immutable_list::ImmutableList;
pub use min_max::MinMaxHeap;
pub use range_min_query::RangeMinQuery;
pub use rank_pairing::RankPairingHeap;
pub use stable_double::StableDouble;
pub use suffix_tree::SuffixTree;
pub use traits::{Compare, FnCompare, NaturalOrder};
pub use union_find::UnionFind;
pub use updatable_queue::UpdatablePriorityQueue;
