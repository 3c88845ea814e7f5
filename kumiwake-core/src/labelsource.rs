//! Label matrix abstractions for the Kumiwake core runtime.

use crate::error::LabelSourceError;

/// Abstraction over a multi-label indicator matrix that can yield, per
/// sample, the indices of the labels assigned to that sample.
///
/// Rows must list label indices in strictly ascending order; implementations
/// are expected to validate this at construction time.
///
/// # Examples
/// ```
/// use kumiwake_core::{LabelSource, LabelSourceError};
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
/// let source = Tiny(vec![vec![0, 2], vec![1]]);
/// assert_eq!(source.num_samples(), 2);
/// assert_eq!(source.row(0)?, &[0, 2]);
/// assert!(source.row(9).is_err());
/// # Ok::<(), LabelSourceError>(())
/// ```
pub trait LabelSource {
    /// Returns the number of samples (rows) in the source.
    fn num_samples(&self) -> usize;

    /// Returns the number of labels (columns) in the source.
    fn num_labels(&self) -> usize;

    /// Returns whether the source contains no samples.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.num_samples() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the ascending label indices assigned to `sample`.
    ///
    /// # Errors
    /// Returns [`LabelSourceError::OutOfBounds`] when `sample` is not a valid
    /// row index.
    fn row(&self, sample: usize) -> Result<&[usize], LabelSourceError>;
}
