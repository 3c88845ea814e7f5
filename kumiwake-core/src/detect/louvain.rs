//! Greedy modularity optimisation (Louvain) over the weighted label graph.
//!
//! Multi-level scheme after Blondel et al. (2008): repeatedly move nodes to
//! the neighbouring community with the highest modularity gain, then collapse
//! communities into a coarser graph and repeat until modularity stops
//! improving. Node sweeps use a fixed order, so detection is deterministic
//! for a given graph.

use std::collections::{BTreeMap, HashMap};

use super::{CommunityDetector, finite_edges, renumber_by_first_appearance};
use crate::{
    error::DetectionError,
    graph::LabelGraph,
    partition::PartitionAssignment,
};

/// Modularity-based community detector.
///
/// # Examples
/// ```
/// use kumiwake_core::{
///     CommunityDetector, EdgeMap, LabelGraph, LabelPair, ModularityDetector,
/// };
///
/// let mut edges = EdgeMap::new();
/// edges.insert(LabelPair::new(0, 1)?, 2.0)?;
/// edges.insert(LabelPair::new(1, 2)?, 1.0)?;
/// let graph = LabelGraph::assemble(4, &edges, true)?;
///
/// let assignment = ModularityDetector::new().detect(&graph).expect("detection succeeds");
/// assert_eq!(assignment.len(), 4);
/// # Ok::<(), kumiwake_core::KumiwakeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModularityDetector {
    resolution: f64,
    max_iter: usize,
    max_levels: usize,
    min_modularity_gain: f64,
}

impl ModularityDetector {
    /// Creates a detector with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resolution: 1.0,
            max_iter: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
        }
    }

    /// Overrides the resolution parameter; higher values favour smaller
    /// communities.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Overrides the maximum number of node sweeps per level.
    #[must_use]
    pub const fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Overrides the maximum number of aggregation levels.
    #[must_use]
    pub const fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }
}

impl Default for ModularityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetector for ModularityDetector {
    fn detect(&self, graph: &LabelGraph) -> Result<PartitionAssignment, DetectionError> {
        let node_count = graph.node_count();
        if node_count == 0 {
            return Ok(PartitionAssignment::new());
        }

        let edges = finite_edges(graph)?;
        let mut level = LevelGraph {
            node_count,
            edges,
            self_loops: vec![0.0; node_count],
        };

        // Stack of community→member mappings, one per aggregation level.
        let mut level_members: Vec<Vec<Vec<usize>>> = Vec::new();
        let mut previous_modularity = f64::NEG_INFINITY;

        for _ in 0..self.max_levels {
            let (communities, improved) = self.local_moving(&level);
            if !improved {
                break;
            }

            let modularity = level.modularity(&communities, self.resolution);
            if modularity - previous_modularity < self.min_modularity_gain {
                break;
            }
            previous_modularity = modularity;

            let (coarser, members) = aggregate(&level, &communities);
            if members.len() == level.node_count {
                break;
            }
            level_members.push(members);
            level = coarser;
        }

        // Expand the coarsest identity partition back through every level.
        let mut ids: Vec<usize> = (0..level.node_count).collect();
        while let Some(members) = level_members.pop() {
            ids = expand(&ids, &members);
        }

        let ids = renumber_by_first_appearance(&ids);
        let mut assignment = PartitionAssignment::new();
        for (label, community) in ids.into_iter().enumerate() {
            assignment.insert(label, community);
        }
        Ok(assignment)
    }
}

impl ModularityDetector {
    /// Phase 1: sweep nodes in index order, moving each to the neighbouring
    /// community with the highest positive modularity gain.
    fn local_moving(&self, level: &LevelGraph) -> (Vec<usize>, bool) {
        let n = level.node_count;
        let total = level.total_weight();
        if total == 0.0 {
            return ((0..n).collect(), false);
        }

        let mut adjacency: Vec<HashMap<usize, f64>> = vec![HashMap::new(); n];
        for &(a, b, weight) in &level.edges {
            *adjacency[a].entry(b).or_insert(0.0) += weight;
            *adjacency[b].entry(a).or_insert(0.0) += weight;
        }

        let degrees = level.degrees();
        let mut communities: Vec<usize> = (0..n).collect();
        let mut community_degrees = degrees.clone();
        let mut any_moved = false;

        for _ in 0..self.max_iter {
            let mut moved = false;

            for node in 0..n {
                let home = communities[node];
                let degree = degrees[node];
                community_degrees[home] -= degree;

                let mut neighbour_weights: HashMap<usize, f64> = HashMap::new();
                for (&neighbour, &weight) in &adjacency[node] {
                    *neighbour_weights
                        .entry(communities[neighbour])
                        .or_insert(0.0) += weight;
                }

                // Deterministic tie handling: candidates are visited in
                // ascending community order and only strictly better gains win.
                let mut candidates: Vec<(usize, f64)> =
                    neighbour_weights.into_iter().collect();
                candidates.sort_by_key(|&(community, _)| community);

                let mut best = home;
                let mut best_gain = 0.0;
                for (community, incident) in candidates {
                    let gain = incident / total
                        - self.resolution * community_degrees[community] * degree
                            / (2.0 * total * total);
                    if gain > best_gain {
                        best_gain = gain;
                        best = community;
                    }
                }

                if best == home {
                    community_degrees[home] += degree;
                } else {
                    communities[node] = best;
                    community_degrees[best] += degree;
                    moved = true;
                    any_moved = true;
                }
            }

            if !moved {
                break;
            }
        }

        (communities, any_moved)
    }
}

/// One level of the multi-level optimisation: an undirected weighted graph
/// with explicit self-loop weights accumulated from collapsed communities.
struct LevelGraph {
    node_count: usize,
    edges: Vec<(usize, usize, f64)>,
    self_loops: Vec<f64>,
}

impl LevelGraph {
    fn total_weight(&self) -> f64 {
        let edge_sum: f64 = self.edges.iter().map(|&(_, _, w)| w).sum();
        edge_sum + self.self_loops.iter().sum::<f64>()
    }

    fn degrees(&self) -> Vec<f64> {
        let mut degrees = vec![0.0; self.node_count];
        for &(a, b, weight) in &self.edges {
            degrees[a] += weight;
            degrees[b] += weight;
        }
        for (node, &loop_weight) in self.self_loops.iter().enumerate() {
            // A self-loop contributes both endpoints to the degree.
            degrees[node] += 2.0 * loop_weight;
        }
        degrees
    }

    fn modularity(&self, communities: &[usize], resolution: f64) -> f64 {
        let total = self.total_weight();
        if total == 0.0 {
            return 0.0;
        }
        let degrees = self.degrees();

        let mut quality = 0.0;
        for &(a, b, weight) in &self.edges {
            if communities[a] == communities[b] {
                let expected = degrees[a] * degrees[b] / (2.0 * total);
                quality += weight - resolution * expected;
            }
        }
        for (node, &loop_weight) in self.self_loops.iter().enumerate() {
            if loop_weight > 0.0 {
                let expected = degrees[node] * degrees[node] / (2.0 * total);
                quality += loop_weight - resolution * expected / 2.0;
            }
        }
        quality / total
    }
}

/// Phase 2: collapse each community into a single node, summing parallel
/// edges and folding intra-community weight into self-loops. Returns the
/// coarser graph and, per coarse node, the fine nodes it absorbed.
fn aggregate(level: &LevelGraph, communities: &[usize]) -> (LevelGraph, Vec<Vec<usize>>) {
    let mut seen: Vec<usize> = communities.to_vec();
    seen.sort_unstable();
    seen.dedup();
    let coarse_count = seen.len();
    let coarse_of: HashMap<usize, usize> = seen
        .iter()
        .enumerate()
        .map(|(index, &community)| (community, index))
        .collect();

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); coarse_count];
    for (node, &community) in communities.iter().enumerate() {
        members[coarse_of[&community]].push(node);
    }

    let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    let mut self_loops = vec![0.0; coarse_count];
    for &(a, b, weight) in &level.edges {
        let ca = coarse_of[&communities[a]];
        let cb = coarse_of[&communities[b]];
        if ca == cb {
            self_loops[ca] += weight;
        } else {
            let key = (ca.min(cb), ca.max(cb));
            *merged.entry(key).or_insert(0.0) += weight;
        }
    }
    for (node, &loop_weight) in level.self_loops.iter().enumerate() {
        self_loops[coarse_of[&communities[node]]] += loop_weight;
    }

    let edges = merged
        .into_iter()
        .map(|((a, b), weight)| (a, b, weight))
        .collect();

    (
        LevelGraph {
            node_count: coarse_count,
            edges,
            self_loops,
        },
        members,
    )
}

/// Projects a coarse partition back onto the fine nodes it was built from.
fn expand(coarse_ids: &[usize], members: &[Vec<usize>]) -> Vec<usize> {
    let fine_count: usize = members.iter().map(Vec::len).sum();
    let mut ids = vec![0usize; fine_count];
    for (coarse_node, fine_nodes) in members.iter().enumerate() {
        for &fine_node in fine_nodes {
            ids[fine_node] = coarse_ids[coarse_node];
        }
    }
    ids
}
