//! Rank-Pairing Heap implementation
//!
//! A rank-pairing heap (Haeupler, Sen, and Tarjan, 2011) is a meldable
//! priority queue achieving:
//! - O(1) amortized insert and increase-priority
//! - O(log n) amortized extract
//!
//! This implementation follows the max-heap convention and deduplicates
//! values: each value may be pushed once, reprioritized upward while it is
//! live, and popped exactly once. A popped value is remembered forever and
//! all later pushes or reprioritizations of it are ignored.
//!
//! # Algorithm Overview
//!
//! The heap is a forest of *half-trees*: binary trees in which only left
//! edges carry the heap-ordering constraint. A node's right child belongs to
//! its parent's spine and is unordered with respect to it. One root is
//! distinguished as the current maximum; the remaining roots sit in an
//! unordered set.
//!
//! - **Insert**: make a rank-0 half-tree, compare with the first root.
//! - **Increase-priority**: cut the node from its parent, splicing its right
//!   spine into its place, then walk up restoring the rank rule.
//! - **Extract**: dismantle the first root's left spine into fresh
//!   half-trees, then do one bucketed linking pass by rank.
//!
//! # Rank Invariant (type-2 rule)
//!
//! Writing the rank differences from a node to its two children as a pair,
//! every internal node is a (1,1)-node, a (1,2)-node, or a (0,i)-node with
//! i >= 0. Linking two roots of equal rank increments the winner's rank;
//! the restoration walk after a cut recomputes ranks from the surviving
//! children and stops at the first node whose stored rank is already small
//! enough.
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::rank_pairing::RankPairingHeap;
//!
//! let mut heap = RankPairingHeap::new();
//! heap.push_or_reprioritize("a", 3);
//! heap.push_or_reprioritize("b", 5);
//! heap.push_or_reprioritize("b", 2); // downward: ignored
//! assert_eq!(heap.top(), (&"b", &5));
//! assert_eq!(heap.pop(), ("b", 5));
//! heap.push_or_reprioritize("b", 100); // popped: ignored
//! assert_eq!(heap.pop(), ("a", 3));
//! assert!(heap.is_empty());
//! ```

use crate::traits::{Compare, NaturalOrder};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use std::hash::Hash;

new_key_type! {
    /// Arena key referencing a node of the half-tree forest.
    struct NodeKey;
}

/// A node of the forest: a value, its priority, and the half-tree shape.
///
/// All references between nodes are arena keys; `None` is the null
/// sentinel for a missing parent or child.
#[derive(Debug)]
struct Node<T, P> {
    value: T,
    priority: P,
    /// Rank label bounding the height under the type-2 rule.
    rank: usize,
    parent: Option<NodeKey>,
    /// The heap-ordered child: this node's priority is not below its left
    /// child's.
    left: Option<NodeKey>,
    /// Spine link, unordered with respect to this node.
    right: Option<NodeKey>,
}

/// A priority queue with amortized O(1) priority increases and
/// deduplication of values.
///
/// Values must be hashable; each value is stored once in the forest and
/// once as a map key, so `T: Clone`. The comparator `C` decides priority
/// order (see [`Compare`]); the default [`NaturalOrder`] makes this a
/// max-heap over `P: Ord`.
pub struct RankPairingHeap<T, P, C = NaturalOrder> {
    /// Backing arena for all nodes of the forest.
    nodes: SlotMap<NodeKey, Node<T, P>>,
    /// The root holding the current maximum.
    first_root: Option<NodeKey>,
    /// Every other half-tree root, unordered.
    other_roots: FxHashSet<NodeKey>,
    /// Where each value currently lives: `Some(key)` while live, `None`
    /// once popped. Absent values have never been seen.
    current_nodes: FxHashMap<T, Option<NodeKey>>,
    /// Number of live (pushed and not yet popped) items.
    len: usize,
    compare: C,
}

impl<T, P> RankPairingHeap<T, P, NaturalOrder>
where
    T: Clone + Hash + Eq,
    P: Ord,
{
    /// Creates an empty heap ordered by `P`'s natural order (a max-heap).
    pub fn new() -> Self {
        Self::with_compare(NaturalOrder)
    }
}

impl<T, P> Default for RankPairingHeap<T, P, NaturalOrder>
where
    T: Clone + Hash + Eq,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, C> RankPairingHeap<T, P, C>
where
    T: Clone + Hash + Eq,
    C: Compare<P>,
{
    /// Creates an empty heap using a non-default comparator.
    ///
    /// Wrap a closure in [`crate::traits::FnCompare`] to order by anything
    /// other than `Ord`.
    pub fn with_compare(compare: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            first_root: None,
            other_roots: FxHashSet::default(),
            current_nodes: FxHashMap::default(),
            len: 0,
            compare,
        }
    }

    /// Returns the number of live items on the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live items on the heap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first_root.is_none()
    }

    /// Returns the highest-priority item on the heap and its priority.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty.
    pub fn top(&self) -> (&T, &P) {
        let key = self
            .first_root
            .expect("top() called on an empty RankPairingHeap");
        let node = &self.nodes[key];
        (&node.value, &node.priority)
    }

    /// Adds the value to the heap if it has never been seen. If it is live,
    /// raises its priority to the greater of the current and the given
    /// priority. If it has been popped already, does nothing.
    pub fn push_or_reprioritize(&mut self, value: T, priority: P) {
        match self.current_nodes.get(&value).copied() {
            Some(Some(key)) => {
                // Seen before and not yet popped
                self.reprioritize(key, priority);
            }
            Some(None) => {
                // Popped values are tombstones; popping is final.
            }
            None => {
                let key = self.nodes.insert(Node {
                    value: value.clone(),
                    priority,
                    rank: 0,
                    parent: None,
                    left: None,
                    right: None,
                });
                self.place_half_tree(key);
                self.current_nodes.insert(value, Some(key));
                self.len += 1;
            }
        }
    }

    /// Removes the highest-priority item from the heap and returns it with
    /// its priority. The value becomes a tombstone and is never re-added.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty.
    pub fn pop(&mut self) -> (T, P) {
        let first = self
            .first_root
            .take()
            .expect("pop() called on an empty RankPairingHeap");
        self.len -= 1;

        // Mark this value as popped
        let value = self.nodes[first].value.clone();
        self.current_nodes.insert(value, None);

        // Collect the other roots for the linking pass
        let mut working: Vec<NodeKey> = self.other_roots.drain().collect();

        // Dismantle the popped root: its left child, then every node down
        // that child's right spine, becomes a fresh half-tree.
        if let Some(left) = self.nodes[first].left.take() {
            self.nodes[left].parent = None;
            working.push(left);
            let mut spine = left;
            while let Some(next) = self.nodes[spine].right.take() {
                self.nodes[next].parent = None;
                working.push(next);
                spine = next;
            }
        }

        let popped = self
            .nodes
            .remove(first)
            .expect("first root is present in the arena");

        // One-pass bucketed linking over the half-trees: equal ranks are
        // linked immediately and the winner joins the forest; everything
        // left in a bucket at the end joins as-is.
        let mut buckets: Vec<Option<NodeKey>> = Vec::new();
        for root in working {
            // Compact the rank to make a 1-node
            let rank = match self.nodes[root].left {
                Some(l) => self.nodes[l].rank + 1,
                None => 0,
            };
            self.nodes[root].rank = rank;

            if buckets.len() <= rank {
                buckets.resize(rank + 1, None);
            }
            match buckets[rank].take() {
                Some(other) => {
                    let root_loses = self
                        .compare
                        .precedes(&self.nodes[root].priority, &self.nodes[other].priority);
                    let winner = if root_loses {
                        self.link(other, root);
                        other
                    } else {
                        self.link(root, other);
                        root
                    };
                    self.place_half_tree(winner);
                }
                None => buckets[rank] = Some(root),
            }
        }
        for root in buckets.into_iter().flatten() {
            self.place_half_tree(root);
        }

        (popped.value, popped.priority)
    }

    /// Links two half-tree roots; `winner` must not order before `loser`.
    fn link(&mut self, winner: NodeKey, loser: NodeKey) {
        // Tied contests increase the winner's rank
        if self.nodes[winner].rank == self.nodes[loser].rank {
            self.nodes[winner].rank += 1;
        }
        // The winner's old left subtree moves onto the loser's right spine
        let old_left = self.nodes[winner].left;
        self.nodes[loser].right = old_left;
        if let Some(l) = old_left {
            self.nodes[l].parent = Some(loser);
        }
        // The loser becomes the winner's heap-ordered child
        self.nodes[winner].left = Some(loser);
        self.nodes[loser].parent = Some(winner);
    }

    /// Inserts a half-tree root into the forest through the tournament
    /// against the current first root.
    fn place_half_tree(&mut self, key: NodeKey) {
        match self.first_root {
            None => {
                // This is the first half-tree
                self.first_root = Some(key);
            }
            Some(first) => {
                if self
                    .compare
                    .precedes(&self.nodes[first].priority, &self.nodes[key].priority)
                {
                    // This is the new maximum
                    self.other_roots.insert(first);
                    self.first_root = Some(key);
                } else {
                    self.other_roots.insert(key);
                }
            }
        }
    }

    /// Raises a live node's priority to the greater of its current priority
    /// and the given one, restructuring if the heap order broke.
    fn reprioritize(&mut self, key: NodeKey, priority: P) {
        if !self.compare.precedes(&self.nodes[key].priority, &priority) {
            // Not an increase: nothing to do
            return;
        }
        self.nodes[key].priority = priority;

        let parent = self.nodes[key].parent;
        match parent {
            None => {
                // Already a root; it may now displace the first root.
                let first = self
                    .first_root
                    .expect("a non-empty forest has a first root");
                if first != key
                    && self
                        .compare
                        .precedes(&self.nodes[first].priority, &self.nodes[key].priority)
                {
                    self.other_roots.remove(&key);
                    self.other_roots.insert(first);
                    self.first_root = Some(key);
                }
            }
            Some(parent) => {
                // Cut the node out: its right subtree takes its place under
                // the parent, and the node itself re-enters the forest as a
                // fresh half-tree.
                let right = self.nodes[key].right.take();
                self.nodes[key].parent = None;
                if let Some(r) = right {
                    self.nodes[r].parent = Some(parent);
                }
                if self.nodes[parent].left == Some(key) {
                    self.nodes[parent].left = right;
                } else {
                    self.nodes[parent].right = right;
                }

                self.place_half_tree(key);
                self.restore_rank_above(parent);
            }
        }
    }

    /// Walks up from a node that lost a child, recomputing ranks until the
    /// type-2 rule holds again.
    fn restore_rank_above(&mut self, start: NodeKey) {
        let mut current = Some(start);
        while let Some(key) = current {
            let node = &self.nodes[key];
            let left_rank = node.left.map(|k| self.nodes[k].rank);
            let right_rank = node.right.map(|k| self.nodes[k].rank);
            let next_rank = match (left_rank, right_rank) {
                (None, None) => 0,
                (Some(r), None) | (None, Some(r)) => r + 1,
                (Some(l), Some(r)) => {
                    // A (1,1) or (1,2) node steps one above its higher
                    // child; a (0,i) node matches it.
                    let hi = l.max(r);
                    if hi - l.min(r) <= 1 {
                        hi + 1
                    } else {
                        hi
                    }
                }
            };
            if next_rank >= self.nodes[key].rank {
                // The rank rule is locally restored
                break;
            }
            self.nodes[key].rank = next_rank;
            current = self.nodes[key].parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FnCompare;

    #[test]
    fn test_push_reprioritize_pop_sequence() {
        let mut heap = RankPairingHeap::new();
        heap.push_or_reprioritize("a", 3);
        heap.push_or_reprioritize("b", 5);
        heap.push_or_reprioritize("c", 1);
        heap.push_or_reprioritize("c", 7);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.pop(), ("c", 7));
        assert_eq!(heap.pop(), ("b", 5));
        assert_eq!(heap.pop(), ("a", 3));

        // A popped value never comes back
        heap.push_or_reprioritize("c", 100);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_downward_reprioritize_is_noop() {
        let mut heap = RankPairingHeap::new();
        heap.push_or_reprioritize('x', 10);
        heap.push_or_reprioritize('y', 20);
        heap.push_or_reprioritize('y', 5);
        assert_eq!(heap.top(), (&'y', &20));
        heap.push_or_reprioritize('x', 1);
        assert_eq!(heap.pop(), ('y', 20));
        assert_eq!(heap.pop(), ('x', 10));
    }

    #[test]
    fn test_pop_order_is_non_increasing() {
        let mut heap = RankPairingHeap::new();
        for (i, priority) in [17, 3, 64, 0, 42, 8, 91, 25, 5, 77].into_iter().enumerate() {
            heap.push_or_reprioritize(i, priority);
        }
        let mut last = i32::MAX;
        while !heap.is_empty() {
            let (_, priority) = heap.pop();
            assert!(priority <= last);
            last = priority;
        }
    }

    #[test]
    fn test_reprioritize_after_structure_forms() {
        let mut heap = RankPairingHeap::new();
        for i in 0..32 {
            heap.push_or_reprioritize(i, i);
        }
        // Linking happens on the first pop, building real half-trees.
        assert_eq!(heap.pop(), (31, 31));
        // Raise a value buried somewhere inside a half-tree.
        heap.push_or_reprioritize(4, 1000);
        assert_eq!(heap.pop(), (4, 1000));
        assert_eq!(heap.pop(), (30, 30));
        // And one more cut after further restructuring.
        heap.push_or_reprioritize(0, 500);
        assert_eq!(heap.pop(), (0, 500));
        let mut last = i32::MAX;
        while !heap.is_empty() {
            let (_, priority) = heap.pop();
            assert!(priority <= last);
            last = priority;
        }
    }

    #[test]
    fn test_custom_comparator_makes_min_heap() {
        let mut heap = RankPairingHeap::with_compare(FnCompare(|a: &i32, b: &i32| b < a));
        heap.push_or_reprioritize("low", 2);
        heap.push_or_reprioritize("high", 40);
        heap.push_or_reprioritize("mid", 10);
        // Under the reversed order, "increase" means decrease.
        heap.push_or_reprioritize("high", 1);
        assert_eq!(heap.pop(), ("high", 1));
        assert_eq!(heap.pop(), ("low", 2));
        assert_eq!(heap.pop(), ("mid", 10));
    }

    #[test]
    fn test_duplicate_push_keeps_higher_priority() {
        let mut heap = RankPairingHeap::new();
        heap.push_or_reprioritize("k", 5);
        heap.push_or_reprioritize("k", 9);
        heap.push_or_reprioritize("k", 7);
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.pop(), ("k", 9));
        assert!(heap.is_empty());
    }

    #[test]
    #[should_panic(expected = "top() called on an empty RankPairingHeap")]
    fn test_top_on_empty_panics() {
        let heap: RankPairingHeap<u32, u32> = RankPairingHeap::new();
        heap.top();
    }

    #[test]
    #[should_panic(expected = "pop() called on an empty RankPairingHeap")]
    fn test_pop_on_empty_panics() {
        let mut heap: RankPairingHeap<u32, u32> = RankPairingHeap::new();
        heap.pop();
    }
}
