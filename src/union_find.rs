//! Union-Find implementation
//!
//! A disjoint-set structure over the indices `0..n` with path compression
//! and union by rank, extended with per-node child sets so that the members
//! of a group can be enumerated in time linear in the group size. `find`
//! and `union` run in amortized ~O(α(n)).
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::union_find::UnionFind;
//!
//! let mut uf = UnionFind::new(10);
//! uf.union_groups(0, 1);
//! uf.union_groups(2, 3);
//! uf.union_groups(3, 4);
//! assert_eq!(uf.find_group(2), uf.find_group(4));
//! assert_eq!(uf.group_size(3), 3);
//! ```

use rustc_hash::FxHashSet;

/// One index of the forest.
///
/// `head` is the parent pointer, equal to the node's own index at a group
/// root. `rank` and `size` are meaningful only at the root. `children`
/// mirrors the parent pointers downward and is kept exact through path
/// compression, which is what makes group enumeration linear.
#[derive(Debug, Clone)]
struct UfNode {
    rank: usize,
    size: usize,
    head: usize,
    children: FxHashSet<usize>,
}

/// A union-find over `0..n` that can also enumerate group members.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    nodes: Vec<UfNode>,
}

impl UnionFind {
    /// Creates a structure of `n` singleton groups.
    pub fn new(n: usize) -> Self {
        let nodes = (0..n)
            .map(|i| UfNode {
                rank: 0,
                size: 1,
                head: i,
                children: FxHashSet::default(),
            })
            .collect();
        Self { nodes }
    }

    /// Returns the number of indices in the structure.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the structure covers no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the current representative of the group containing `i`.
    ///
    /// The representative may change after a union. Path compression
    /// mutates the forest, moving every traversed node directly below the
    /// root and updating the child sets to match.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn find_group(&mut self, i: usize) -> usize {
        // Traverse the tree upwards
        let mut path = Vec::new();
        let mut current = i;
        while self.nodes[current].head != current {
            path.push(current);
            current = self.nodes[current].head;
        }
        // Compress the path; the final entry already points at the root.
        for p in 1..path.len() {
            let moved = path[p - 1];
            self.nodes[moved].head = current;
            self.nodes[path[p]].children.remove(&moved);
            self.nodes[current].children.insert(moved);
        }
        current
    }

    /// Merges the group containing `i` with the group containing `j`.
    ///
    /// Merging is by rank; merging two roots of equal rank increments the
    /// surviving root's rank.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn union_groups(&mut self, i: usize, j: usize) {
        let head_i = self.find_group(i);
        let head_j = self.find_group(j);
        if head_i == head_j {
            // Already in the same group
            return;
        }
        // Rank decides which root absorbs the other
        if self.nodes[head_i].rank > self.nodes[head_j].rank {
            let absorbed = self.nodes[head_j].size;
            self.nodes[head_j].head = head_i;
            self.nodes[head_i].children.insert(head_j);
            self.nodes[head_i].size += absorbed;
        } else {
            let absorbed = self.nodes[head_i].size;
            self.nodes[head_i].head = head_j;
            self.nodes[head_j].children.insert(head_i);
            self.nodes[head_j].size += absorbed;

            if self.nodes[head_j].rank == self.nodes[head_i].rank {
                self.nodes[head_j].rank += 1;
            }
        }
    }

    /// Returns the size of the group containing `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn group_size(&mut self, i: usize) -> usize {
        let head = self.find_group(i);
        self.nodes[head].size
    }

    /// Returns the indices in the same group as `i`, in arbitrary order.
    ///
    /// Runs in time linear in the size of the group by walking the child
    /// sets down from the root.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn group(&mut self, i: usize) -> Vec<usize> {
        let mut members = Vec::new();
        let mut stack = vec![self.find_group(i)];
        while let Some(current) = stack.pop() {
            members.push(current);
            stack.extend(self.nodes[current].children.iter().copied());
        }
        members
    }

    /// Returns every non-empty group as a separate vector, in O(n).
    pub fn all_groups(&mut self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for i in 0..self.nodes.len() {
            let head = self.find_group(i);
            groups[head].push(i);
        }
        groups.retain(|group| !group.is_empty());
        groups
    }
}
