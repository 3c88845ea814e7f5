//! Asynchronous label propagation over the weighted label graph.
//!
//! Each node repeatedly adopts the label carrying the most incident edge
//! weight among its neighbours, sweeping nodes in a shuffled order until no
//! label changes. Ties are broken randomly; seeding the sweep makes a run
//! reproducible. Isolated nodes keep their own label and therefore always
//! form singleton communities.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::{CommunityDetector, finite_edges, group_by_label};
use crate::{
    error::DetectionError,
    graph::LabelGraph,
    partition::PartitionAssignment,
};

/// Label-propagation community detector.
///
/// The native output of propagation is a set of node groups; [`detect`]
/// normalises them into a [`PartitionAssignment`] with community ids numbered
/// in group iteration order starting at 0.
///
/// [`detect`]: CommunityDetector::detect
///
/// # Examples
/// ```
/// use kumiwake_core::{
///     CommunityDetector, EdgeMap, LabelGraph, LabelPair, PropagationDetector,
/// };
///
/// let mut edges = EdgeMap::new();
/// edges.insert(LabelPair::new(0, 1)?, 1.0)?;
/// edges.insert(LabelPair::new(2, 3)?, 1.0)?;
/// let graph = LabelGraph::assemble(4, &edges, true)?;
///
/// let assignment = PropagationDetector::new()
///     .with_seed(7)
///     .detect(&graph)
///     .expect("detection succeeds");
/// assert_eq!(assignment.get(0), assignment.get(1));
/// assert_eq!(assignment.get(2), assignment.get(3));
/// assert_ne!(assignment.get(0), assignment.get(2));
/// # Ok::<(), kumiwake_core::KumiwakeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropagationDetector {
    max_iter: usize,
    seed: Option<u64>,
}

impl PropagationDetector {
    /// Creates a detector with default settings and an entropy-seeded sweep.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_iter: 100,
            seed: None,
        }
    }

    /// Overrides the maximum number of propagation sweeps.
    #[must_use]
    pub const fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seeds the sweep order and tie-breaking for reproducible runs.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PropagationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetector for PropagationDetector {
    fn detect(&self, graph: &LabelGraph) -> Result<PartitionAssignment, DetectionError> {
        let node_count = graph.node_count();
        if node_count == 0 {
            return Ok(PartitionAssignment::new());
        }

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        for (a, b, weight) in finite_edges(graph)? {
            adjacency[a].push((b, weight));
            adjacency[b].push((a, weight));
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut labels: Vec<usize> = (0..node_count).collect();
        let mut order: Vec<usize> = (0..node_count).collect();

        for _ in 0..self.max_iter {
            let mut changed = false;
            order.shuffle(&mut rng);

            for &node in &order {
                // Weight carried into each neighbouring label; BTreeMap keeps
                // tie candidates in a deterministic order for seeded runs.
                let mut incident: BTreeMap<usize, f64> = BTreeMap::new();
                for &(neighbour, weight) in &adjacency[node] {
                    *incident.entry(labels[neighbour]).or_insert(0.0) += weight;
                }
                if incident.is_empty() {
                    continue;
                }
                let heaviest = incident.values().copied().fold(f64::NEG_INFINITY, f64::max);

                let candidates: Vec<usize> = incident
                    .iter()
                    .filter(|&(_, &weight)| weight == heaviest)
                    .map(|(&label, _)| label)
                    .collect();
                let adopted = if candidates.len() == 1 {
                    candidates[0]
                } else {
                    candidates[rng.gen_range(0..candidates.len())]
                };

                if labels[node] != adopted {
                    labels[node] = adopted;
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        Ok(PartitionAssignment::from_groups(group_by_label(&labels)))
    }
}
