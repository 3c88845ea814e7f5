//! Graph builders: from a label matrix to a co-occurrence edge map.

use std::sync::Arc;

use crate::{
    edge_map::{EdgeMap, LabelPair},
    error::{KumiwakeError, Result},
    labelsource::LabelSource,
};

/// Produces the weighted edge map a label graph is assembled from.
///
/// The builder is the upstream collaborator of the clustering pipeline: it
/// decides which label pairs are connected and how strongly, while
/// [`crate::LabelGraph::assemble`] performs the mechanical translation into a
/// graph.
pub trait GraphBuilder {
    /// Returns whether the produced edge weights are meaningful.
    ///
    /// When `false`, graph assembly replaces every weight with a uniform
    /// neutral weight.
    fn is_weighted(&self) -> bool;

    /// Builds the edge map for the given label source.
    ///
    /// # Errors
    /// Returns [`KumiwakeError::LabelSource`] when reading a sample row
    /// fails, and [`KumiwakeError::SelfEdge`] when a row lists the same label
    /// twice.
    fn transform<S: LabelSource + ?Sized>(&self, source: &S) -> Result<EdgeMap>;
}

/// Connects labels by how often they co-occur across samples.
///
/// For every sample, each unordered pair of distinct positive labels
/// contributes one count to that pair's edge. Self-edges are never emitted.
///
/// # Examples
/// ```
/// use kumiwake_core::{CooccurrenceBuilder, GraphBuilder, LabelPair, LabelSource, LabelSourceError};
///
/// struct Tiny(Vec<Vec<usize>>);
///
/// impl LabelSource for Tiny {
///     fn num_samples(&self) -> usize { self.0.len() }
///     fn num_labels(&self) -> usize { 3 }
///     fn name(&self) -> &str { "tiny" }
///     fn row(&self, sample: usize) -> Result<&[usize], LabelSourceError> {
///         self.0
///             .get(sample)
///             .map(Vec::as_slice)
///             .ok_or(LabelSourceError::OutOfBounds { index: sample })
///     }
/// }
///
/// let source = Tiny(vec![vec![0, 1], vec![0, 1, 2]]);
/// let edges = CooccurrenceBuilder::new(true).transform(&source)?;
/// assert_eq!(edges.get(LabelPair::new(0, 1)?), Some(2.0));
/// assert_eq!(edges.get(LabelPair::new(1, 2)?), Some(1.0));
/// # Ok::<(), kumiwake_core::KumiwakeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CooccurrenceBuilder {
    weighted: bool,
}

impl CooccurrenceBuilder {
    /// Creates a builder; `weighted` selects whether co-occurrence counts are
    /// carried into the graph or flattened to a neutral weight.
    #[must_use]
    pub const fn new(weighted: bool) -> Self {
        Self { weighted }
    }
}

impl GraphBuilder for CooccurrenceBuilder {
    fn is_weighted(&self) -> bool {
        self.weighted
    }

    fn transform<S: LabelSource + ?Sized>(&self, source: &S) -> Result<EdgeMap> {
        let mut edges = EdgeMap::new();
        for sample in 0..source.num_samples() {
            let row = source
                .row(sample)
                .map_err(|error| KumiwakeError::LabelSource {
                    label_source: Arc::from(source.name()),
                    error,
                })?;
            for (offset, &first) in row.iter().enumerate() {
                for &second in row.iter().skip(offset + 1) {
                    edges.accumulate(LabelPair::new(first, second)?, 1.0);
                }
            }
        }
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabelSourceError;

    struct RowSource {
        rows: Vec<Vec<usize>>,
        num_labels: usize,
    }

    impl LabelSource for RowSource {
        fn num_samples(&self) -> usize {
            self.rows.len()
        }

        fn num_labels(&self) -> usize {
            self.num_labels
        }

        fn name(&self) -> &str {
            "rows"
        }

        fn row(&self, sample: usize) -> core::result::Result<&[usize], LabelSourceError> {
            self.rows
                .get(sample)
                .map(Vec::as_slice)
                .ok_or(LabelSourceError::OutOfBounds { index: sample })
        }
    }

    #[test]
    fn counts_pairs_across_samples() {
        let source = RowSource {
            rows: vec![vec![0, 1, 2], vec![0, 1], vec![2]],
            num_labels: 3,
        };
        let edges = CooccurrenceBuilder::new(true)
            .transform(&source)
            .expect("valid source");
        assert_eq!(edges.len(), 3);
        assert_eq!(edges.get(LabelPair::new(0, 1).expect("distinct")), Some(2.0));
        assert_eq!(edges.get(LabelPair::new(0, 2).expect("distinct")), Some(1.0));
        assert_eq!(edges.get(LabelPair::new(1, 2).expect("distinct")), Some(1.0));
    }

    #[test]
    fn single_label_rows_emit_no_edges() {
        let source = RowSource {
            rows: vec![vec![0], vec![1], vec![]],
            num_labels: 2,
        };
        let edges = CooccurrenceBuilder::new(true)
            .transform(&source)
            .expect("valid source");
        assert!(edges.is_empty());
    }

    #[test]
    fn duplicate_label_in_row_is_a_self_edge() {
        let source = RowSource {
            rows: vec![vec![1, 1]],
            num_labels: 2,
        };
        let err = CooccurrenceBuilder::new(true)
            .transform(&source)
            .expect_err("duplicate label in a row");
        assert!(matches!(err, KumiwakeError::SelfEdge { index: 1 }));
    }
}
