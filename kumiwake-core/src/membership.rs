//! Conversion from a partition assignment to community membership lists.

use crate::{
    error::{KumiwakeError, Result},
    partition::PartitionAssignment,
};

/// Ordered communities of label indices, indexed by community identifier.
///
/// Entry `c` lists, in ascending order, every label assigned to community
/// `c`. Communities with no labels are kept as empty entries so identifiers
/// stay aligned for callers that index communities elsewhere.
///
/// # Examples
/// ```
/// use kumiwake_core::{Membership, PartitionAssignment};
///
/// let assignment = PartitionAssignment::from_groups(vec![vec![0, 1, 2], vec![3]]);
/// let membership = Membership::from_assignment(&assignment, 4)?;
/// assert_eq!(membership.communities(), &[vec![0, 1, 2], vec![3]]);
/// # Ok::<(), kumiwake_core::KumiwakeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    communities: Vec<Vec<usize>>,
}

impl Membership {
    /// Converts an assignment covering `[0, num_labels)` into membership
    /// lists of length `1 + max community id`.
    ///
    /// The output depends only on the assignment's contents, never on its
    /// iteration order: labels are visited in ascending index order, so each
    /// community list comes out strictly ascending.
    ///
    /// # Errors
    /// Returns [`KumiwakeError::MissingAssignment`] when any label in
    /// `[0, num_labels)` has no community recorded.
    pub fn from_assignment(
        assignment: &PartitionAssignment,
        num_labels: usize,
    ) -> Result<Self> {
        let mut ids = Vec::with_capacity(num_labels);
        for label in 0..num_labels {
            let community = assignment
                .get(label)
                .ok_or(KumiwakeError::MissingAssignment { label })?;
            ids.push(community);
        }
        let community_count = ids.iter().copied().max().map_or(0, |max| max + 1);
        let mut communities = vec![Vec::new(); community_count];
        for (label, &community) in ids.iter().enumerate() {
            communities[community].push(label);
        }
        Ok(Self { communities })
    }

    /// Returns the membership lists, indexed by community identifier.
    #[must_use]
    pub fn communities(&self) -> &[Vec<usize>] {
        &self.communities
    }

    /// Returns the labels of community `community`, if it exists.
    #[must_use]
    pub fn get(&self, community: usize) -> Option<&[usize]> {
        self.communities.get(community).map(Vec::as_slice)
    }

    /// Returns the number of communities, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Returns whether there are no communities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Consumes the membership and returns the underlying lists.
    #[must_use]
    pub fn into_vec(self) -> Vec<Vec<usize>> {
        self.communities
    }
}
