//! Label graph assembly.
//!
//! Translates an [`EdgeMap`] into an undirected `petgraph` graph with one
//! node per label. Isolated labels are materialised as nodes so community
//! detection always assigns every label to some community.

use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::{
    edge_map::EdgeMap,
    error::{KumiwakeError, Result},
};

/// Weight applied uniformly when the producing builder is unweighted.
const NEUTRAL_WEIGHT: f64 = 1.0;

/// Undirected label co-occurrence graph.
///
/// Nodes are label indices `0..num_labels`; each edge carries a co-occurrence
/// weight. Built fresh per clustering call and never mutated afterwards.
///
/// # Examples
/// ```
/// use kumiwake_core::{EdgeMap, LabelGraph, LabelPair};
///
/// let mut edges = EdgeMap::new();
/// edges.insert(LabelPair::new(0, 1)?, 2.0)?;
/// let graph = LabelGraph::assemble(4, &edges, true)?;
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), kumiwake_core::KumiwakeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LabelGraph {
    graph: UnGraph<(), f64>,
}

impl LabelGraph {
    /// Assembles a graph with `num_labels` nodes and one edge per edge-map
    /// entry.
    ///
    /// When `weighted` is false every edge receives the uniform neutral
    /// weight instead of the builder's per-edge value, matching the
    /// convention the detection algorithms expect for unweighted graphs.
    ///
    /// # Errors
    /// Returns [`KumiwakeError::InvalidEdgeKey`] when an edge references a
    /// label index outside `[0, num_labels)`.
    pub fn assemble(num_labels: usize, edges: &EdgeMap, weighted: bool) -> Result<Self> {
        let mut graph = UnGraph::with_capacity(num_labels, edges.len());
        for _ in 0..num_labels {
            graph.add_node(());
        }
        for (pair, weight) in edges.iter() {
            if pair.hi() >= num_labels {
                return Err(KumiwakeError::InvalidEdgeKey {
                    first: pair.lo(),
                    second: pair.hi(),
                    num_labels,
                });
            }
            let carried = if weighted { weight } else { NEUTRAL_WEIGHT };
            graph.add_edge(
                NodeIndex::new(pair.lo()),
                NodeIndex::new(pair.hi()),
                carried,
            );
        }
        Ok(Self { graph })
    }

    /// Returns the number of labels (nodes) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the edge weights in the graph's edge order.
    ///
    /// Exposed for diagnostics and visualisation; not part of the clustering
    /// contract.
    #[must_use]
    pub fn edge_weights(&self) -> Vec<f64> {
        self.graph
            .edge_references()
            .map(|edge| *edge.weight())
            .collect()
    }

    /// Iterates over edges as `(lower, higher, weight)` triples.
    pub(crate) fn weighted_edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph.edge_references().map(|edge| {
            let a = edge.source().index();
            let b = edge.target().index();
            (a.min(b), a.max(b), *edge.weight())
        })
    }
}
