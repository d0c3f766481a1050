//! Minimum-priority queue with deterministic tie-breaking.
//!
//! Elements are stored in a min-heap keyed by `(key, insertion_order)`.
//! Smaller keys are popped first; ties are broken by insertion order
//! (FIFO), so the element type itself never needs to be comparable.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::SearchError;

#[derive(Debug)]
struct Entry<T, K> {
    elem: T,
    key: K,
    /// Monotonically increasing; lower = inserted earlier.
    seq: u64,
}

impl<T, K: Ord> PartialEq for Entry<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, K: Ord> Eq for Entry<T, K> {}

impl<T, K: Ord> PartialOrd for Entry<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> Ord for Entry<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A minimum-priority queue over arbitrary elements.
///
/// The key is supplied by the caller at push time and never re-evaluated,
/// so later changes to whatever the key was derived from do not reorder
/// elements already queued.
#[derive(Debug)]
pub struct PriorityQueue<T, K> {
    heap: BinaryHeap<Reverse<Entry<T, K>>>,
    seq: u64,
}

impl<T, K: Ord> PriorityQueue<T, K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Insert `elem` ordered by `key`.
    pub fn push(&mut self, elem: T, key: K) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { elem, key, seq }));
    }

    /// Remove and return the element with the smallest key; among equal
    /// keys, the one pushed first.
    pub fn pop_min(&mut self) -> Result<T, SearchError> {
        self.heap
            .pop()
            .map(|Reverse(e)| e.elem)
            .ok_or(SearchError::EmptyQueue)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T, K: Ord> Default for PriorityQueue<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_key_first() {
        let mut q = PriorityQueue::new();
        q.push("a", 3);
        q.push("b", 1);
        q.push("c", 2);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop_min(), Ok("b"));
        assert_eq!(q.pop_min(), Ok("c"));
        assert_eq!(q.pop_min(), Ok("a"));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_keys_pop_in_push_order() {
        let mut q = PriorityQueue::new();
        for name in ["first", "second", "third"] {
            q.push(name, (4, 1));
        }
        q.push("earlier", (4, 0));
        assert_eq!(q.pop_min(), Ok("earlier"));
        assert_eq!(q.pop_min(), Ok("first"));
        assert_eq!(q.pop_min(), Ok("second"));
        assert_eq!(q.pop_min(), Ok("third"));
    }

    #[test]
    fn empty_pop_is_an_error() {
        let mut q: PriorityQueue<u8, i32> = PriorityQueue::new();
        assert_eq!(q.pop_min(), Err(SearchError::EmptyQueue));
        q.push(1, 0);
        assert_eq!(q.pop_min(), Ok(1));
        assert_eq!(q.pop_min(), Err(SearchError::EmptyQueue));
    }

    #[test]
    fn elements_need_not_be_comparable() {
        struct Opaque(u32);
        let mut q = PriorityQueue::new();
        q.push(Opaque(7), 0);
        q.push(Opaque(8), 0);
        assert_eq!(q.pop_min().map(|o| o.0), Ok(7));
    }

    #[test]
    fn pop_sequence_is_sorted_and_stable() {
        // Keys cycle through 0..5 so every key appears many times.
        let keys: Vec<i32> = (0..60).map(|i| (i * 7 + 3) % 5).collect();
        let mut q = PriorityQueue::new();
        for (i, &k) in keys.iter().enumerate() {
            q.push(i, k);
        }
        let mut popped = Vec::new();
        while !q.is_empty() {
            popped.push(q.pop_min().unwrap());
        }
        assert_eq!(popped.len(), keys.len());
        for w in popped.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert!(keys[a] <= keys[b]);
            if keys[a] == keys[b] {
                assert!(a < b, "equal keys must pop in push order");
            }
        }
    }
}
