//! Updatable Priority Queue implementation
//!
//! A thin wrapper over the standard binary max-heap that makes priorities
//! updatable by re-insertion. Since the heap orders whole elements, an
//! *identity* is extracted from each element so that stale copies of an
//! already-popped element can be recognized and discarded. Re-pushing an
//! element with a higher priority shadows its older copies; they are
//! drained lazily as they surface.
//!
//! For efficient priority *increases* on large workloads prefer
//! [`crate::rank_pairing::RankPairingHeap`]; this wrapper trades asymptotic
//! bounds for having no structure of its own.
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::updatable_queue::UpdatablePriorityQueue;
//!
//! let mut queue = UpdatablePriorityQueue::new(|item: &(i32, &str)| item.1);
//! queue.push((3, "a"));
//! queue.push((1, "c"));
//! queue.push((7, "c")); // updates "c" upward
//! assert_eq!(queue.pop(), (7, "c"));
//! assert_eq!(queue.pop(), (3, "a"));
//! assert!(queue.is_empty());
//! ```

use rustc_hash::FxHashSet;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// A priority queue whose priorities can be raised by pushing the same
/// element again.
///
/// There is deliberately no `len`: the heap may hold stale duplicates, so
/// the live count is unknowable without draining.
pub struct UpdatablePriorityQueue<T, I, F>
where
    T: Ord,
    I: Hash + Eq,
    F: Fn(&T) -> I,
{
    /// The actual underlying priority queue.
    queue: BinaryHeap<T>,
    /// Identities already popped, used to discard stale copies.
    seen: FxHashSet<I>,
    /// The identity extractor.
    get_identity: F,
}

impl<T> UpdatablePriorityQueue<T, T, fn(&T) -> T>
where
    T: Ord + Clone + Hash + Eq,
{
    /// Makes a queue whose elements are their own identities.
    ///
    /// This requires that hashing and equality of the element ignore
    /// whatever part of it acts as the priority; otherwise re-pushes are
    /// never recognized as updates.
    pub fn with_self_identity() -> Self {
        Self::new(|item: &T| item.clone())
    }
}

impl<T, I, F> UpdatablePriorityQueue<T, I, F>
where
    T: Ord,
    I: Hash + Eq,
    F: Fn(&T) -> I,
{
    /// Makes a queue that derives element identity with the given function.
    pub fn new(get_identity: F) -> Self {
        Self {
            queue: BinaryHeap::new(),
            seen: FxHashSet::default(),
            get_identity,
        }
    }

    /// Returns `true` if no live element remains.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the greatest live element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn peek(&self) -> &T {
        let top = self
            .queue
            .peek()
            .expect("peek() called on an empty UpdatablePriorityQueue");
        debug_assert!(
            !self.seen.contains(&(self.get_identity)(top)),
            "stale element surfaced at the top"
        );
        top
    }

    /// Queues the element unless its identity has already been popped.
    pub fn push(&mut self, item: T) {
        if !self.seen.contains(&(self.get_identity)(&item)) {
            self.queue.push(item);
        }
    }

    /// Removes and returns the greatest live element, then discards any
    /// stale copies of it that surface.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn pop(&mut self) -> T {
        let top = self
            .queue
            .pop()
            .expect("pop() called on an empty UpdatablePriorityQueue");
        self.seen.insert((self.get_identity)(&top));
        // Keep the invariant that the element at the top is live
        while let Some(next) = self.queue.peek() {
            if self.seen.contains(&(self.get_identity)(next)) {
                self.queue.pop();
            } else {
                break;
            }
        }
        top
    }

    /// Clears the queue and all its memories of past elements.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_by_reinsertion() {
        let mut queue = UpdatablePriorityQueue::new(|item: &(i32, &str)| item.1);
        queue.push((3, "a"));
        queue.push((5, "b"));
        queue.push((1, "c"));
        queue.push((7, "c"));

        assert_eq!(queue.pop(), (7, "c"));
        assert_eq!(queue.pop(), (5, "b"));
        assert_eq!(queue.pop(), (3, "a"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_after_pop_is_ignored() {
        let mut queue = UpdatablePriorityQueue::new(|item: &(i32, char)| item.1);
        queue.push((2, 'x'));
        assert_eq!(queue.pop(), (2, 'x'));
        queue.push((100, 'x'));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stale_copies_are_drained() {
        let mut queue = UpdatablePriorityQueue::new(|item: &(i32, u8)| item.1);
        for priority in [1, 4, 9, 2] {
            queue.push((priority, 0));
        }
        queue.push((3, 1));
        assert_eq!(queue.pop(), (9, 0));
        // Every leftover copy of identity 0 must be gone before the next top.
        assert_eq!(*queue.peek(), (3, 1));
        assert_eq!(queue.pop(), (3, 1));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_self_identity() {
        let mut queue = UpdatablePriorityQueue::with_self_identity();
        queue.push("pear");
        queue.push("apple");
        queue.push("apple");
        assert_eq!(queue.pop(), "pear");
        assert_eq!(queue.pop(), "apple");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_forgets_history() {
        let mut queue = UpdatablePriorityQueue::new(|item: &(i32, u8)| item.1);
        queue.push((1, 7));
        queue.pop();
        queue.push((2, 7));
        assert!(queue.is_empty());
        queue.clear();
        queue.push((2, 7));
        assert_eq!(queue.pop(), (2, 7));
    }

    #[test]
    #[should_panic(expected = "pop() called on an empty UpdatablePriorityQueue")]
    fn test_pop_on_empty_panics() {
        let mut queue: UpdatablePriorityQueue<u32, u32, fn(&u32) -> u32> =
            UpdatablePriorityQueue::with_self_identity();
        queue.pop();
    }
}
