//! Immutable List implementation
//!
//! A Lisp-style persistent singly-linked list with O(1) copy and O(1)
//! copy-and-prepend. Tails are shared between lists through reference
//! counting.
//!
//! # Non-recursive destruction
//!
//! A naive reference-counted list destroys its nodes recursively: dropping
//! the head drops its tail, which drops *its* tail, and a list of a hundred
//! thousand nodes overflows the call stack. Here every node instead hands
//! its tail link to a deletion queue shared by the whole chain. The thread
//! whose drop finds the queue idle becomes the drainer and releases nodes
//! iteratively, re-polling after every release because releasing a node may
//! enqueue the next one; drops arriving from other threads while a drain is
//! in progress are picked up by the running drainer. The queue is a FIFO
//! behind a re-entrant mutex, so enqueues from inside the drain loop are
//! harmless.
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::immutable_list::ImmutableList;
//!
//! let base = ImmutableList::new().push_front(3).push_front(2);
//! let extended = base.push_front(1);
//! assert_eq!(extended.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! // `base` still sees its own two elements.
//! assert_eq!(base.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
//! ```

use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

/// Pending node releases plus the flag marking an active drainer.
struct DeletionQueue<T> {
    pending: VecDeque<Arc<Node<T>>>,
    draining: bool,
}

/// Releases nodes in a queue, non-recursively. Node drops call back into it
/// to enqueue further releases, possibly from other threads.
struct QueueDeleter<T> {
    queue: ReentrantMutex<RefCell<DeletionQueue<T>>>,
}

impl<T> QueueDeleter<T> {
    fn new() -> Self {
        Self {
            queue: ReentrantMutex::new(RefCell::new(DeletionQueue {
                pending: VecDeque::new(),
                draining: false,
            })),
        }
    }

    /// Queues a node handle for release.
    ///
    /// Either a drainer is already running and will pick this up, or this
    /// call becomes the drainer and processes items until the queue is
    /// empty. The caller's node keeps the deleter alive for the duration of
    /// the call, so re-polling after the final release is sound here even
    /// though the release of a node may drop a reference to the deleter
    /// itself.
    fn queue(&self, to_delete: Arc<Node<T>>) {
        {
            let guard = self.queue.lock();
            let mut state = guard.borrow_mut();
            state.pending.push_back(to_delete);
            if state.draining {
                // Somebody else will take care of it.
                return;
            }
            state.draining = true;
        }

        // We made the queue active, so we are the drainer.
        loop {
            let node = {
                let guard = self.queue.lock();
                let mut state = guard.borrow_mut();
                match state.pending.pop_front() {
                    Some(node) => node,
                    None => {
                        state.draining = false;
                        return;
                    }
                }
            };
            // Released outside the lock; this may re-enter `queue` through
            // the node's drop, which appends and returns immediately.
            drop(node);
        }
    }
}

/// One cell of the list. The tail link is surrendered to the deletion
/// queue on drop instead of being dropped in place.
struct Node<T> {
    data: T,
    next: Option<Arc<Node<T>>>,
    /// The release queue shared by every node of the chain.
    deleter: Arc<QueueDeleter<T>>,
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        if let Some(next) = self.next.take() {
            self.deleter.queue(next);
        }
    }
}

/// A persistent singly-linked list sharing its tail with every list it was
/// built from.
pub struct ImmutableList<T> {
    head: Option<Arc<Node<T>>>,
}

impl<T> ImmutableList<T> {
    /// Makes a new empty list.
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Returns the list with `item` prepended, in O(1). `self` is
    /// unchanged.
    pub fn push_front(&self, item: T) -> Self {
        let deleter = match &self.head {
            // Extend the chain's existing deleter
            Some(head) => Arc::clone(&head.deleter),
            // A new chain gets a fresh one
            None => Arc::new(QueueDeleter::new()),
        };
        Self {
            head: Some(Arc::new(Node {
                data: item,
                next: self.head.clone(),
                deleter,
            })),
        }
    }

    /// Returns the rest of the list with the first item removed, in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_front(&self) -> Self {
        let head = self
            .head
            .as_ref()
            .expect("pop_front() called on an empty ImmutableList");
        Self {
            head: head.next.clone(),
        }
    }

    /// Returns the first item.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn front(&self) -> &T {
        let head = self
            .head
            .as_ref()
            .expect("front() called on an empty ImmutableList");
        &head.data
    }

    /// Returns `true` if the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterates the items front to back.
    ///
    /// The iterator borrows the list and owns nothing.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            here: self.head.as_deref(),
        }
    }
}

impl<T> Default for ImmutableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ImmutableList<T> {
    /// O(1): both lists share the same nodes.
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ImmutableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ImmutableList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ImmutableList<T> {}

impl<T: PartialOrd> PartialOrd for ImmutableList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

/// Borrowing iterator over an [`ImmutableList`].
pub struct Iter<'a, T> {
    here: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.here?;
        self.here = node.next.as_deref();
        Some(&node.data)
    }
}

impl<'a, T> IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &ImmutableList<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_prepend_shares_tails() {
        let empty = ImmutableList::new();
        let a = empty.push_front(3);
        let b = a.push_front(2);
        let c = b.push_front(1);

        assert!(empty.is_empty());
        assert_eq!(collect(&a), vec![3]);
        assert_eq!(collect(&b), vec![2, 3]);
        assert_eq!(collect(&c), vec![1, 2, 3]);
        assert_eq!(*c.front(), 1);
    }

    #[test]
    fn test_pop_front_leaves_original() {
        let list = ImmutableList::new().push_front(3).push_front(2).push_front(1);
        let popped = list.pop_front();
        assert_eq!(collect(&popped), vec![2, 3]);
        assert_eq!(collect(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_branching_from_shared_tail() {
        let tail = ImmutableList::new().push_front(9);
        let left = tail.push_front(1);
        let right = tail.push_front(2);
        assert_eq!(collect(&left), vec![1, 9]);
        assert_eq!(collect(&right), vec![2, 9]);
        drop(left);
        // Dropping one branch leaves the shared tail intact.
        assert_eq!(collect(&right), vec![2, 9]);
        assert_eq!(collect(&tail), vec![9]);
    }

    #[test]
    fn test_comparisons() {
        let make = |values: &[i32]| {
            values
                .iter()
                .rev()
                .fold(ImmutableList::new(), |list, &v| list.push_front(v))
        };
        assert_eq!(make(&[1, 2, 3]), make(&[1, 2, 3]));
        assert_ne!(make(&[1, 2, 3]), make(&[1, 2]));
        assert!(make(&[]) < make(&[1]));
        assert!(make(&[1, 2]) < make(&[1, 3]));
        assert!(make(&[1, 2]) < make(&[1, 2, 0]));
        assert!(make(&[2]) > make(&[1, 9, 9]));
    }

    #[test]
    fn test_long_chain_drops_iteratively() {
        // Would overflow the stack under recursive destruction.
        let mut list = ImmutableList::new();
        for i in 0..100_000 {
            list = list.push_front(i);
        }
        assert_eq!(*list.front(), 99_999);
        drop(list);
    }

    #[test]
    #[should_panic(expected = "front() called on an empty ImmutableList")]
    fn test_front_on_empty_panics() {
        let list: ImmutableList<u8> = ImmutableList::new();
        list.front();
    }
}
