//! Range-Minimum Query implementation
//!
//! Given a fixed sequence, answers "which index holds the minimum of
//! `[lo, hi)`" in O(1) after O(n) preprocessing, following the
//! Fischer–Heun hybrid design:
//!
//! - The sequence is cut into blocks of size `b = ⌊log2 n⌋ / 4 + 1`.
//! - Two blocks whose Cartesian trees have the same shape answer every
//!   in-block query with the same argmin offsets, so one O(b²) offset table
//!   is shared per distinct shape. Shapes are identified by a small
//!   bit-encoding and deduplicated through a hash map.
//! - A sparse table over per-block minima answers the full-block middle of
//!   a straddling query from two overlapping power-of-two spans.
//!
//! Ties resolve to the leftmost index.
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::range_min_query::RangeMinQuery;
//!
//! let values = [4, 1, 3, 2, 5, 0, 6];
//! let rmq = RangeMinQuery::new(&values);
//! assert_eq!(rmq.range_min(0, 4), 1);
//! assert_eq!(rmq.range_min(2, 6), 5);
//! ```

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Shared argmin table for all blocks of one Cartesian-tree shape.
///
/// `table[i][j - i - 1]` is the offset of the minimum of `[i, j)` within
/// the block, built by a naive O(b²) sweep over the first block that
/// exhibits the shape.
#[derive(Debug)]
struct IntervalMemo {
    table: Vec<Vec<usize>>,
}

impl IntervalMemo {
    fn build<T: Ord>(block: &[T]) -> Self {
        let len = block.len();
        let mut table = Vec::with_capacity(len);
        for i in 0..len {
            let mut row = Vec::with_capacity(len - i);
            let mut best = i;
            for j in i..len {
                if block[j] < block[best] {
                    best = j;
                }
                row.push(best);
            }
            table.push(row);
        }
        Self { table }
    }

    /// Offset of the minimum of `[i, j)`; requires `i < j <= len`.
    #[inline]
    fn range_min_offset(&self, i: usize, j: usize) -> usize {
        self.table[i][j - i - 1]
    }
}

/// Computes the Cartesian-tree topology of a block as a bit string.
///
/// The tree is built by the rightmost-spine insertion algorithm (each new
/// element climbs the spine past larger values), then serialized in BFS
/// order, one bit per slot, nulls included. The shape determines every
/// in-block argmin, so equal encodings may share an [`IntervalMemo`].
fn cartesian_shape<T: Ord>(block: &[T]) -> u64 {
    let len = block.len();
    debug_assert!(len >= 1 && 2 * len + 1 <= u64::BITS as usize);

    let mut parent: Vec<Option<usize>> = vec![None; len];
    let mut left: Vec<Option<usize>> = vec![None; len];
    let mut right: Vec<Option<usize>> = vec![None; len];
    let mut root = 0;
    for i in 1..len {
        // Climb the rightmost spine past strictly larger values.
        let mut here = Some(i - 1);
        while let Some(h) = here {
            if block[i] < block[h] {
                here = parent[h];
            } else {
                break;
            }
        }
        match here {
            Some(h) => {
                parent[i] = Some(h);
                left[i] = right[h];
                if let Some(l) = left[i] {
                    parent[l] = Some(i);
                }
                right[h] = Some(i);
            }
            None => {
                left[i] = Some(root);
                parent[root] = Some(i);
                root = i;
            }
        }
    }

    let mut encoding = 0u64;
    let mut bit = 0;
    let mut queue: VecDeque<Option<usize>> = VecDeque::from([Some(root)]);
    while let Some(slot) = queue.pop_front() {
        if let Some(node) = slot {
            encoding |= 1 << bit;
            queue.push_back(left[node]);
            queue.push_back(right[node]);
        }
        bit += 1;
    }
    encoding
}

/// An O(n)-construction, O(1)-query range-minimum structure over a
/// borrowed slice.
///
/// The structure holds indices into the slice it was built from; it lives
/// no longer than that borrow, and queries return indices into it.
#[derive(Debug)]
pub struct RangeMinQuery<'a, T: Ord> {
    values: &'a [T],
    block_size: usize,
    /// Per block, the index of its shape's memo.
    block_memo: Vec<usize>,
    shape_memos: Vec<IntervalMemo>,
    /// `sparse[k][i]` is the index of the minimum across the 2^k blocks
    /// starting at block i.
    sparse: Vec<Vec<usize>>,
    /// `log_table[m]` is the largest k with 2^k <= m, for m up to the
    /// number of blocks inclusive.
    log_table: Vec<usize>,
}

impl<'a, T: Ord> RangeMinQuery<'a, T> {
    /// Preprocesses `values` in O(n).
    pub fn new(values: &'a [T]) -> Self {
        let n = values.len();
        let log_n = if n <= 1 { 0 } else { (n as u64).ilog2() as usize };
        let block_size = log_n / 4 + 1;
        let num_blocks = (n + block_size - 1) / block_size;

        // Deduplicate Cartesian shapes; each distinct shape pays for its
        // offset table once.
        let mut shape_index: FxHashMap<u64, usize> = FxHashMap::default();
        let mut shape_memos: Vec<IntervalMemo> = Vec::new();
        let mut block_memo = Vec::with_capacity(num_blocks);
        for b in 0..num_blocks {
            let start = b * block_size;
            let end = (start + block_size).min(n);
            let block = &values[start..end];
            let idx = *shape_index.entry(cartesian_shape(block)).or_insert_with(|| {
                shape_memos.push(IntervalMemo::build(block));
                shape_memos.len() - 1
            });
            block_memo.push(idx);
        }

        // Sized one past the block count so a query spanning every block
        // stays in range.
        let mut log_table = vec![0usize; num_blocks + 1];
        for m in 2..=num_blocks {
            log_table[m] = log_table[m / 2] + 1;
        }

        let mut sparse: Vec<Vec<usize>> = Vec::new();
        if num_blocks > 0 {
            let mut level = Vec::with_capacity(num_blocks);
            for b in 0..num_blocks {
                let start = b * block_size;
                let end = (start + block_size).min(n);
                let memo = &shape_memos[block_memo[b]];
                level.push(start + memo.range_min_offset(0, end - start));
            }
            sparse.push(level);
            for k in 1..=log_table[num_blocks] {
                let span = 1usize << k;
                let half = span >> 1;
                let prev = &sparse[k - 1];
                let mut level = Vec::with_capacity(num_blocks + 1 - span);
                for i in 0..=(num_blocks - span) {
                    let lower = prev[i];
                    let upper = prev[i + half];
                    level.push(if values[upper] < values[lower] { upper } else { lower });
                }
                sparse.push(level);
            }
        }

        Self {
            values,
            block_size,
            block_memo,
            shape_memos,
            sparse,
            log_table,
        }
    }

    /// Returns the index of the minimum value in `[lo, hi)`; ties resolve
    /// to the leftmost index.
    ///
    /// # Panics
    ///
    /// Panics if `lo >= hi` or `hi` exceeds the construction range.
    pub fn range_min(&self, lo: usize, hi: usize) -> usize {
        assert!(lo < hi, "range_min() requires a non-empty interval");
        assert!(
            hi <= self.values.len(),
            "range_min() interval exceeds the construction range"
        );

        let first_block = lo / self.block_size;
        let last_block = (hi - 1) / self.block_size;

        if first_block == last_block {
            // Within one block the shape memo answers directly
            let start = first_block * self.block_size;
            let memo = &self.shape_memos[self.block_memo[first_block]];
            return start + memo.range_min_offset(lo - start, hi - start);
        }

        // Straddling: the suffix of the first block, the prefix of the
        // last, and (if any blocks lie strictly between) two overlapping
        // power-of-two spans from the sparse table.
        let first_start = first_block * self.block_size;
        let first_end = (first_start + self.block_size).min(self.values.len());
        let last_start = last_block * self.block_size;

        let first_memo = &self.shape_memos[self.block_memo[first_block]];
        let last_memo = &self.shape_memos[self.block_memo[last_block]];
        let mut candidates = [
            first_start + first_memo.range_min_offset(lo - first_start, first_end - first_start),
            last_start + last_memo.range_min_offset(0, hi - last_start),
            usize::MAX,
            usize::MAX,
        ];
        let mut count = 2;

        if first_block + 1 < last_block {
            let middle = last_block - first_block - 1;
            let k = self.log_table[middle];
            candidates[2] = self.sparse[k][first_block + 1];
            candidates[3] = self.sparse[k][last_block - (1 << k)];
            count = 4;
        }

        candidates[..count]
            .iter()
            .copied()
            .min_by(|&a, &b| self.values[a].cmp(&self.values[b]).then(a.cmp(&b)))
            .expect("at least two candidates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force<T: Ord>(values: &[T], lo: usize, hi: usize) -> usize {
        let mut best = lo;
        for i in lo..hi {
            if values[i] < values[best] {
                best = i;
            }
        }
        best
    }

    fn check_all_intervals(values: &[i32]) {
        let rmq = RangeMinQuery::new(values);
        for lo in 0..values.len() {
            for hi in (lo + 1)..=values.len() {
                assert_eq!(
                    rmq.range_min(lo, hi),
                    brute_force(values, lo, hi),
                    "interval [{lo}, {hi}) over {values:?}"
                );
            }
        }
    }

    #[test]
    fn test_documented_queries() {
        let values = [4, 1, 3, 2, 5, 0, 6];
        let rmq = RangeMinQuery::new(&values);
        assert_eq!(rmq.range_min(0, 4), 1);
        assert_eq!(rmq.range_min(2, 6), 5);
        assert_eq!(rmq.range_min(4, 7), 5);
    }

    #[test]
    fn test_every_interval_small() {
        check_all_intervals(&[4, 1, 3, 2, 5, 0, 6]);
        check_all_intervals(&[3, 3, 3, 3]);
        check_all_intervals(&[9]);
        check_all_intervals(&[2, 1]);
    }

    #[test]
    fn test_every_interval_larger() {
        // Long enough for multi-block straddles and a block size above 1.
        let values: Vec<i32> = (0..96).map(|i| (i * 37 + 11) % 53).collect();
        check_all_intervals(&values);
    }

    #[test]
    fn test_ties_resolve_leftmost() {
        let values = [5, 0, 7, 0, 0, 8];
        let rmq = RangeMinQuery::new(&values);
        assert_eq!(rmq.range_min(0, 6), 1);
        assert_eq!(rmq.range_min(2, 6), 3);
        assert_eq!(rmq.range_min(4, 6), 4);
    }

    #[test]
    fn test_empty_sequence_constructs() {
        let values: [i32; 0] = [];
        let _rmq = RangeMinQuery::new(&values);
    }

    #[test]
    fn test_descending_and_ascending() {
        check_all_intervals(&(0..40).collect::<Vec<_>>());
        check_all_intervals(&(0..40).rev().collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "non-empty interval")]
    fn test_inverted_interval_panics() {
        let values = [1, 2, 3];
        let rmq = RangeMinQuery::new(&values);
        rmq.range_min(2, 2);
    }

    #[test]
    #[should_panic(expected = "exceeds the construction range")]
    fn test_out_of_bounds_interval_panics() {
        let values = [1, 2, 3];
        let rmq = RangeMinQuery::new(&values);
        rmq.range_min(0, 4);
    }
}
