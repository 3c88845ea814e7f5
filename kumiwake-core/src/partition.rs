//! Canonical partition-assignment shape shared by all detectors.
//!
//! Community-detection algorithms disagree on output shape: modularity
//! optimisation yields a node-to-community mapping while label propagation
//! yields node groups. Both are normalised into [`PartitionAssignment`] at the
//! dispatch boundary so the membership converter never branches on algorithm
//! identity.

use std::collections::BTreeMap;

/// Mapping from label index to community identifier.
///
/// # Examples
/// ```
/// use kumiwake_core::PartitionAssignment;
///
/// let mut assignment = PartitionAssignment::new();
/// assignment.insert(0, 0);
/// assignment.insert(1, 2);
/// assert_eq!(assignment.get(1), Some(2));
/// assert_eq!(assignment.max_community_id(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionAssignment {
    communities: BTreeMap<usize, usize>,
}

impl PartitionAssignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalises node groups into an assignment, numbering communities in
    /// group iteration order starting at 0.
    ///
    /// This is the canonicalisation applied to label-propagation output,
    /// which natively produces a sequence of node groups rather than a
    /// node-to-community mapping.
    ///
    /// # Examples
    /// ```
    /// use kumiwake_core::PartitionAssignment;
    ///
    /// let assignment = PartitionAssignment::from_groups(vec![vec![0, 1, 2], vec![3]]);
    /// assert_eq!(assignment.get(2), Some(0));
    /// assert_eq!(assignment.get(3), Some(1));
    /// ```
    #[must_use]
    pub fn from_groups<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = usize>,
    {
        let mut assignment = Self::new();
        for (community, group) in groups.into_iter().enumerate() {
            for label in group {
                assignment.insert(label, community);
            }
        }
        assignment
    }

    /// Records the community for a label, replacing any previous value.
    pub fn insert(&mut self, label: usize, community: usize) {
        self.communities.insert(label, community);
    }

    /// Returns the community assigned to `label`, if any.
    #[must_use]
    pub fn get(&self, label: usize) -> Option<usize> {
        self.communities.get(&label).copied()
    }

    /// Returns the number of assigned labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Returns whether no label has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Returns the largest community identifier present, if any.
    #[must_use]
    pub fn max_community_id(&self) -> Option<usize> {
        self.communities.values().copied().max()
    }

    /// Iterates over `(label, community)` entries in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.communities
            .iter()
            .map(|(&label, &community)| (label, community))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_numbered_in_iteration_order() {
        let assignment = PartitionAssignment::from_groups(vec![vec![4, 0], vec![2], vec![1, 3]]);
        assert_eq!(assignment.get(0), Some(0));
        assert_eq!(assignment.get(4), Some(0));
        assert_eq!(assignment.get(2), Some(1));
        assert_eq!(assignment.get(1), Some(2));
        assert_eq!(assignment.get(3), Some(2));
        assert_eq!(assignment.max_community_id(), Some(2));
    }

    #[test]
    fn empty_groups_yield_empty_assignment() {
        let assignment = PartitionAssignment::from_groups(Vec::<Vec<usize>>::new());
        assert!(assignment.is_empty());
        assert_eq!(assignment.max_community_id(), None);
    }

    #[test]
    fn insert_overrides_previous_community() {
        let mut assignment = PartitionAssignment::new();
        assignment.insert(7, 1);
        assignment.insert(7, 3);
        assert_eq!(assignment.get(7), Some(3));
        assert_eq!(assignment.len(), 1);
    }
}
