//! Co-occurrence edge mapping over label-index pairs.
//!
//! An [`EdgeMap`] is the intermediate product of a graph builder: a mapping
//! from unordered pairs of distinct labels to co-occurrence weights. Keys are
//! unique and self-pairs are rejected at construction, so downstream graph
//! assembly never has to deduplicate or filter loops.

use std::collections::BTreeMap;

use crate::error::{KumiwakeError, Result};

/// Unordered pair of distinct label indices, stored normalised (`lo < hi`).
///
/// # Examples
/// ```
/// use kumiwake_core::LabelPair;
///
/// let pair = LabelPair::new(3, 1).expect("distinct labels");
/// assert_eq!((pair.lo(), pair.hi()), (1, 3));
/// assert_eq!(pair, LabelPair::new(1, 3).expect("distinct labels"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelPair {
    lo: usize,
    hi: usize,
}

impl LabelPair {
    /// Creates a normalised pair from two distinct label indices.
    ///
    /// # Errors
    /// Returns [`KumiwakeError::SelfEdge`] when `a == b`; the label graph
    /// carries no self-loops by construction.
    pub fn new(a: usize, b: usize) -> Result<Self> {
        if a == b {
            return Err(KumiwakeError::SelfEdge { index: a });
        }
        Ok(Self {
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    /// Returns the smaller label index.
    #[must_use]
    pub const fn lo(self) -> usize {
        self.lo
    }

    /// Returns the larger label index.
    #[must_use]
    pub const fn hi(self) -> usize {
        self.hi
    }
}

/// Mapping from label pairs to co-occurrence weights.
///
/// Iteration order is deterministic (ascending by pair), which keeps graph
/// assembly and the diagnostic edge-weight list reproducible.
///
/// # Examples
/// ```
/// use kumiwake_core::{EdgeMap, LabelPair};
///
/// let mut edges = EdgeMap::new();
/// edges.insert(LabelPair::new(0, 1)?, 2.0)?;
/// edges.accumulate(LabelPair::new(0, 1)?, 1.0);
/// assert_eq!(edges.get(LabelPair::new(0, 1)?), Some(3.0));
/// assert_eq!(edges.len(), 1);
/// # Ok::<(), kumiwake_core::KumiwakeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMap {
    weights: BTreeMap<LabelPair, f64>,
}

impl EdgeMap {
    /// Creates an empty edge map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new edge, rejecting keys that are already present.
    ///
    /// Conflicting duplicate keys are a caller contract violation rather than
    /// a silent overwrite; builders that intend to combine weights use
    /// [`Self::accumulate`].
    ///
    /// # Errors
    /// Returns [`KumiwakeError::DuplicateEdge`] when `pair` already has a
    /// weight recorded.
    pub fn insert(&mut self, pair: LabelPair, weight: f64) -> Result<()> {
        if self.weights.contains_key(&pair) {
            return Err(KumiwakeError::DuplicateEdge {
                first: pair.lo(),
                second: pair.hi(),
            });
        }
        self.weights.insert(pair, weight);
        Ok(())
    }

    /// Adds `weight` to the existing entry for `pair`, creating it if absent.
    pub fn accumulate(&mut self, pair: LabelPair, weight: f64) {
        *self.weights.entry(pair).or_insert(0.0) += weight;
    }

    /// Returns the weight recorded for `pair`, if any.
    #[must_use]
    pub fn get(&self, pair: LabelPair) -> Option<f64> {
        self.weights.get(&pair).copied()
    }

    /// Returns the number of edges in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns whether the map contains no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over edges in ascending pair order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelPair, f64)> + '_ {
        self.weights.iter().map(|(&pair, &weight)| (pair, weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KumiwakeError;

    #[test]
    fn pair_normalises_order() {
        let forward = LabelPair::new(2, 5).expect("distinct labels");
        let reverse = LabelPair::new(5, 2).expect("distinct labels");
        assert_eq!(forward, reverse);
        assert_eq!(forward.lo(), 2);
        assert_eq!(forward.hi(), 5);
    }

    #[test]
    fn pair_rejects_self_edge() {
        let err = LabelPair::new(4, 4).expect_err("self edge must be rejected");
        assert!(matches!(err, KumiwakeError::SelfEdge { index: 4 }));
    }

    #[test]
    fn insert_rejects_duplicate_key() {
        let pair = LabelPair::new(0, 1).expect("distinct labels");
        let mut edges = EdgeMap::new();
        edges.insert(pair, 1.0).expect("first insert succeeds");
        let err = edges.insert(pair, 2.0).expect_err("duplicate must be rejected");
        assert!(matches!(
            err,
            KumiwakeError::DuplicateEdge { first: 0, second: 1 }
        ));
        assert_eq!(edges.get(pair), Some(1.0), "original weight is kept");
    }

    #[test]
    fn accumulate_sums_weights() {
        let pair = LabelPair::new(1, 3).expect("distinct labels");
        let mut edges = EdgeMap::new();
        edges.accumulate(pair, 1.0);
        edges.accumulate(pair, 2.5);
        assert_eq!(edges.get(pair), Some(3.5));
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn iteration_is_ordered_by_pair() {
        let mut edges = EdgeMap::new();
        edges.accumulate(LabelPair::new(2, 3).expect("distinct"), 1.0);
        edges.accumulate(LabelPair::new(0, 1).expect("distinct"), 1.0);
        edges.accumulate(LabelPair::new(0, 3).expect("distinct"), 1.0);
        let order: Vec<(usize, usize)> = edges.iter().map(|(p, _)| (p.lo(), p.hi())).collect();
        assert_eq!(order, vec![(0, 1), (0, 3), (2, 3)]);
    }
}
