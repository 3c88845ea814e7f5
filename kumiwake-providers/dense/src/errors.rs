use thiserror::Error;

/// Validation errors raised while constructing a dense label matrix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DenseLabelMatrixError {
    /// A row referenced a label outside the declared label space.
    #[error("row {row} references label {label} outside [0, {num_labels})")]
    LabelOutOfRange {
        /// Offending row index.
        row: usize,
        /// Offending label index.
        label: usize,
        /// Declared number of labels.
        num_labels: usize,
    },
    /// A row's label indices were not strictly ascending.
    #[error("row {row} must list labels in strictly ascending order")]
    UnsortedRow {
        /// Offending row index.
        row: usize,
    },
    /// An indicator row had a different width than the first row.
    #[error("indicator row {row} has width {actual} but expected {expected}")]
    RaggedRow {
        /// Offending row index.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
}
