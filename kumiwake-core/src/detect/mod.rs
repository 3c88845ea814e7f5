//! Community detection over the label graph.
//!
//! Two detectors are provided behind the [`CommunityDetector`] trait:
//! greedy modularity optimisation ([`ModularityDetector`]) and asynchronous
//! label propagation ([`PropagationDetector`]). The method enumeration is
//! closed: an unrecognised method string parses to an error rather than
//! falling back to either algorithm.

mod label_prop;
mod louvain;


use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
    sync::Arc,
};

use crate::{
    error::{DetectionError, KumiwakeError},
    graph::LabelGraph,
    partition::PartitionAssignment,
};

pub use self::{label_prop::PropagationDetector, louvain::ModularityDetector};

/// Community-detection method selector.
///
/// # Examples
/// ```
/// use kumiwake_core::{DetectionMethod, KumiwakeError};
///
/// let method: DetectionMethod = "louvain".parse()?;
/// assert_eq!(method, DetectionMethod::Louvain);
///
/// let err = "walktrap".parse::<DetectionMethod>().unwrap_err();
/// assert!(matches!(err, KumiwakeError::UnsupportedMethod { .. }));
/// # Ok::<(), KumiwakeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionMethod {
    /// Modularity-maximising greedy partitioning (Louvain).
    Louvain,
    /// Asynchronous label-propagation community detection.
    LabelPropagation,
}

impl DetectionMethod {
    /// Returns the canonical method string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Louvain => "louvain",
            Self::LabelPropagation => "label_propagation",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = KumiwakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "louvain" => Ok(Self::Louvain),
            "label_propagation" => Ok(Self::LabelPropagation),
            other => Err(KumiwakeError::UnsupportedMethod {
                got: Arc::from(other),
            }),
        }
    }
}

/// Capability interface for community-detection algorithms.
///
/// Implementations must assign every node of the graph to exactly one
/// community, including isolated nodes, and must return an empty assignment
/// for an empty graph.
pub trait CommunityDetector {
    /// Partitions the graph's nodes into communities.
    ///
    /// # Errors
    /// Returns a [`DetectionError`] when the algorithm cannot run to
    /// completion; failures are surfaced unchanged and never retried.
    fn detect(&self, graph: &LabelGraph) -> Result<PartitionAssignment, DetectionError>;
}

/// Renumbers arbitrary community ids to contiguous ids in order of first
/// appearance over nodes `0..n`.
fn renumber_by_first_appearance(ids: &[usize]) -> Vec<usize> {
    let mut remap = HashMap::new();
    let mut next = 0usize;
    ids.iter()
        .map(|&id| {
            *remap.entry(id).or_insert_with(|| {
                let assigned = next;
                next += 1;
                assigned
            })
        })
        .collect()
}

/// Collects nodes into groups sharing a final label, ordered by the first
/// node carrying each label. This is the label-propagation output shape
/// before normalisation into a [`PartitionAssignment`].
fn group_by_label(labels: &[usize]) -> Vec<Vec<usize>> {
    let mut position: BTreeMap<usize, usize> = BTreeMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (node, &label) in labels.iter().enumerate() {
        let index = *position.entry(label).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[index].push(node);
    }
    groups
}

/// Collects the graph's edges as `(lower, higher, weight)` triples, rejecting
/// non-finite weights before any algorithm state is built.
fn finite_edges(graph: &LabelGraph) -> Result<Vec<(usize, usize, f64)>, DetectionError> {
    graph
        .weighted_edges()
        .map(|(a, b, weight)| {
            if weight.is_finite() {
                Ok((a, b, weight))
            } else {
                Err(DetectionError::NonFiniteWeight {
                    first: a,
                    second: b,
                    weight,
                })
            }
        })
        .collect()
}
