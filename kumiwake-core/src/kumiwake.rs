//! Core clustering orchestration for the Kumiwake library.
//!
//! Provides the [`Kumiwake`] entry point: build the label graph from the
//! graph builder's edge map, run the selected community-detection algorithm,
//! and convert the resulting partition into a membership list.

use tracing::{info, instrument, warn};

use crate::{
    Result,
    detect::{CommunityDetector, DetectionMethod, ModularityDetector, PropagationDetector},
    error::KumiwakeError,
    graph::LabelGraph,
    graph_builder::GraphBuilder,
    labelsource::LabelSource,
    membership::Membership,
    partition::PartitionAssignment,
};

/// Entry point for partitioning a label space into co-occurrence communities.
///
/// # Examples
/// ```
/// use kumiwake_core::{
///     CooccurrenceBuilder, KumiwakeBuilder, LabelSource, LabelSourceError,
/// };
///
/// struct Tiny(Vec<Vec<usize>>);
///
/// impl LabelSource for Tiny {
///     fn num_samples(&self) -> usize { self.0.len() }
///     fn num_labels(&self) -> usize { 4 }
///     fn name(&self) -> &str { "tiny" }
///     fn row(&self, sample: usize) -> Result<&[usize], LabelSourceError> {
///         self.0
///             .get(sample)
///             .map(Vec::as_slice)
///             .ok_or(LabelSourceError::OutOfBounds { index: sample })
///     }
/// }
///
/// let source = Tiny(vec![vec![0, 1], vec![0, 1, 2], vec![3]]);
/// let mut kumiwake = KumiwakeBuilder::new().build().expect("builder must succeed");
/// let membership = kumiwake
///     .fit_predict(&CooccurrenceBuilder::new(true), &source)
///     .expect("clustering must succeed");
///
/// let labels: usize = membership.communities().iter().map(Vec::len).sum();
/// assert_eq!(labels, 4);
/// assert!(kumiwake.graph().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Kumiwake {
    method: DetectionMethod,
    resolution: f64,
    max_iter: usize,
    seed: Option<u64>,
    graph: Option<LabelGraph>,
    edge_weights: Option<Vec<f64>>,
}

impl Kumiwake {
    pub(crate) const fn new(
        method: DetectionMethod,
        resolution: f64,
        max_iter: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            method,
            resolution,
            max_iter,
            seed,
            graph: None,
            edge_weights: None,
        }
    }

    /// Returns the configured detection method.
    #[must_use]
    pub const fn method(&self) -> DetectionMethod {
        self.method
    }

    /// Returns the label graph assembled by the most recent
    /// [`Self::fit_predict`] call, for diagnostics and visualisation.
    #[must_use]
    pub const fn graph(&self) -> Option<&LabelGraph> {
        self.graph.as_ref()
    }

    /// Returns the edge-weight list used by the most recent
    /// [`Self::fit_predict`] call, or `None` when the builder was unweighted
    /// or no call has completed.
    #[must_use]
    pub fn edge_weights(&self) -> Option<&[f64]> {
        self.edge_weights.as_deref()
    }

    /// Partitions the label space of `labels` and returns the communities as
    /// a membership list.
    ///
    /// Runs the full pipeline: the graph builder's `transform` produces an
    /// edge map, the map is assembled into a label graph, the configured
    /// detector partitions the graph, and the partition is converted into a
    /// [`Membership`]. The assembled graph and its weight list are retained
    /// and exposed via [`Self::graph`] and [`Self::edge_weights`].
    ///
    /// # Errors
    /// Returns [`KumiwakeError::LabelSource`] when the builder cannot read
    /// the label matrix, [`KumiwakeError::InvalidEdgeKey`] when the edge map
    /// references a label outside the label space, and
    /// [`KumiwakeError::Detection`] when the community-detection algorithm
    /// fails; detection failures surface unchanged and are never retried.
    pub fn fit_predict<B: GraphBuilder, S: LabelSource>(
        &mut self,
        builder: &B,
        labels: &S,
    ) -> Result<Membership> {
        let num_labels = labels.num_labels();
        self.fit_predict_with_len(builder, labels, num_labels)
    }

    #[instrument(
        name = "core.fit_predict",
        err,
        skip(self, builder, labels),
        fields(
            label_source = %labels.name(),
            num_labels = num_labels,
            method = %self.method,
        ),
    )]
    fn fit_predict_with_len<B: GraphBuilder, S: LabelSource>(
        &mut self,
        builder: &B,
        labels: &S,
        num_labels: usize,
    ) -> Result<Membership> {
        if num_labels == 0 {
            warn!(
                label_source = labels.name(),
                "label space is empty, returning empty membership"
            );
        }

        let edge_map = builder.transform(labels)?;
        let graph = LabelGraph::assemble(num_labels, &edge_map, builder.is_weighted())?;
        let assignment = self.detect(&graph)?;
        let membership = Membership::from_assignment(&assignment, num_labels)?;

        self.edge_weights = builder.is_weighted().then(|| graph.edge_weights());
        self.graph = Some(graph);

        info!(
            communities = membership.len(),
            "label space partitioned"
        );
        Ok(membership)
    }

    fn detect(&self, graph: &LabelGraph) -> Result<PartitionAssignment> {
        let outcome = match self.method {
            DetectionMethod::Louvain => ModularityDetector::new()
                .with_resolution(self.resolution)
                .with_max_iter(self.max_iter)
                .detect(graph),
            DetectionMethod::LabelPropagation => {
                let mut detector = PropagationDetector::new().with_max_iter(self.max_iter);
                if let Some(seed) = self.seed {
                    detector = detector.with_seed(seed);
                }
                detector.detect(graph)
            }
        };
        outcome.map_err(|error| KumiwakeError::Detection { error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::KumiwakeBuilder, error::LabelSourceError, graph_builder::CooccurrenceBuilder};

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
    fn pipeline_partitions_cooccurring_labels() {
        // Labels 0-2 co-occur heavily; label 3 only ever appears alone.
        let source = RowSource {
            rows: vec![
                vec![0, 1],
                vec![0, 1, 2],
                vec![1, 2],
                vec![0, 2],
                vec![3],
            ],
            num_labels: 4,
        };
        let mut kumiwake = KumiwakeBuilder::new().build().expect("valid configuration");
        let membership = kumiwake
            .fit_predict(&CooccurrenceBuilder::new(true), &source)
            .expect("clustering succeeds");

        assert_eq!(membership.communities(), &[vec![0, 1, 2], vec![3]]);
        let graph = kumiwake.graph().expect("graph retained after fit");
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            kumiwake.edge_weights().map(<[f64]>::len),
            Some(3),
            "weighted builder exposes per-edge weights"
        );
    }

    #[test]
    fn unweighted_builder_reports_no_weight_list() {
        let source = RowSource {
            rows: vec![vec![0, 1]],
            num_labels: 2,
        };
        let mut kumiwake = KumiwakeBuilder::new().build().expect("valid configuration");
        let membership = kumiwake
            .fit_predict(&CooccurrenceBuilder::new(false), &source)
            .expect("clustering succeeds");

        let labels: usize = membership.communities().iter().map(Vec::len).sum();
        assert_eq!(labels, 2);
        assert!(kumiwake.edge_weights().is_none());
        assert!(kumiwake.graph().is_some());
    }

    #[test]
    fn empty_label_space_produces_empty_membership() {
        let source = RowSource {
            rows: Vec::new(),
            num_labels: 0,
        };
        let mut kumiwake = KumiwakeBuilder::new().build().expect("valid configuration");
        let membership = kumiwake
            .fit_predict(&CooccurrenceBuilder::new(true), &source)
            .expect("empty label space is not an error");
        assert!(membership.is_empty());
    }

    #[test]
    fn label_propagation_method_covers_every_label() {
        let source = RowSource {
            rows: vec![vec![0, 1], vec![0, 1], vec![2, 3]],
            num_labels: 4,
        };
        let mut kumiwake = KumiwakeBuilder::new()
            .with_method(DetectionMethod::LabelPropagation)
            .with_seed(5)
            .build()
            .expect("valid configuration");
        let membership = kumiwake
            .fit_predict(&CooccurrenceBuilder::new(true), &source)
            .expect("clustering succeeds");

        let mut seen: Vec<usize> = membership
            .communities()
            .iter()
            .flat_map(|community| community.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn builder_rejects_non_finite_resolution() {
        let err = KumiwakeBuilder::new()
            .with_resolution(f64::INFINITY)
            .build()
            .expect_err("infinite resolution is invalid");
        assert!(matches!(err, KumiwakeError::InvalidResolution { .. }));
    }
}
