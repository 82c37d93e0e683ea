//! Critical pairs and the pending-pair queue.
//!
//! Pairs are keyed by the valuation and exponent of the leading term of
//! their S-polynomial and served smallest key first. The queue may hold
//! stale pairs whose basis slots have been tombstoned; the driver drops
//! those on pop.

use crate::series::TateSeries;
use crate::term::{Exponent, cmp_lex};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A pending S-polynomial, or a basis element rescued during shrinking.
#[derive(Debug, Clone)]
pub struct CriticalPair {
    /// Valuation of the leading term of `poly`.
    pub valuation: i64,
    /// Exponent of the leading term of `poly`.
    pub exponent: Exponent,
    /// Indices of the source elements in the growing basis; `None` marks a
    /// rescued element that is re-inserted rather than reduced as an
    /// S-polynomial.
    pub slots: Option<(usize, usize)>,
    /// The S-polynomial (or rescued element) itself.
    pub poly: TateSeries,
}

impl CriticalPair {
    /// A proper S-polynomial pair between basis slots `i` and `j`.
    pub fn spair(i: usize, j: usize, poly: TateSeries) -> Self {
        let lead = poly
            .leading_term()
            .expect("critical pair built from a zero S-polynomial");
        Self {
            valuation: lead.valuation(),
            exponent: lead.exponent().clone(),
            slots: Some((i, j)),
            poly,
        }
    }

    /// A rescued basis element queued for re-insertion.
    pub fn rescued(poly: TateSeries) -> Self {
        let lead = poly
            .leading_term()
            .expect("rescued a zero basis element");
        Self {
            valuation: lead.valuation(),
            exponent: lead.exponent().clone(),
            slots: None,
            poly,
        }
    }

    fn key_cmp(&self, other: &Self) -> Ordering {
        self.valuation
            .cmp(&other.valuation)
            .then_with(|| cmp_lex(&self.exponent, &other.exponent))
    }
}

impl PartialEq for CriticalPair {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for CriticalPair {}

impl PartialOrd for CriticalPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CriticalPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Min-heap of pending pairs.
#[derive(Debug, Default)]
pub struct PairQueue {
    heap: BinaryHeap<Reverse<CriticalPair>>,
}

impl PairQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a pair.
    pub fn push(&mut self, pair: CriticalPair) {
        self.heap.push(Reverse(pair));
    }

    /// Dequeue the pair with the smallest (valuation, exponent) key.
    pub fn pop_min(&mut self) -> Option<CriticalPair> {
        self.heap.pop().map(|Reverse(p)| p)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending pairs.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::TateAlgebra;

    #[test]
    fn pops_in_key_order() {
        let a = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let mut q = PairQueue::new();
        q.push(CriticalPair::spair(0, 1, a.series(&[(3, &[0, 3])])));
        q.push(CriticalPair::spair(0, 2, a.series(&[(3, &[0, 2])])));
        q.push(CriticalPair::spair(1, 2, a.series(&[(1, &[5, 0])])));
        // Valuation 0 first, then lexicographically smaller exponent.
        assert_eq!(q.pop_min().unwrap().valuation, 0);
        let p = q.pop_min().unwrap();
        assert_eq!(p.exponent.as_slice(), &[0, 2]);
        let p = q.pop_min().unwrap();
        assert_eq!(p.exponent.as_slice(), &[0, 3]);
        assert!(q.is_empty());
    }
}
