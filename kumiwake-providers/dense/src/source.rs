//! Dense label matrix stored as per-sample label index rows.

use kumiwake_core::{LabelSource, LabelSourceError};

use crate::errors::DenseLabelMatrixError;

/// In-memory multi-label matrix: one row of ascending positive-label indices
/// per sample, over an explicit label space of `num_labels` columns.
#[derive(Debug)]
pub struct DenseLabelMatrix {
    rows: Vec<Vec<usize>>,
    num_labels: usize,
    name: String,
}

impl DenseLabelMatrix {
    /// Creates a new dense label matrix.
    ///
    /// # Panics
    /// Panics when a row is unsorted or references a label outside
    /// `[0, num_labels)`; use [`Self::try_new`] for fallible construction.
    ///
    /// # Examples
    /// ```
    /// use kumiwake_providers_dense::DenseLabelMatrix;
    /// let matrix = DenseLabelMatrix::new("demo", 3, vec![vec![0, 2], vec![1]]);
    /// ```
    #[track_caller]
    #[must_use]
    pub fn new(name: impl Into<String>, num_labels: usize, rows: Vec<Vec<usize>>) -> Self {
        Self::try_new(name, num_labels, rows).expect("rows must be ascending and in range")
    }

    /// Creates a dense label matrix after validating every row.
    ///
    /// # Errors
    /// Returns [`DenseLabelMatrixError::UnsortedRow`] when a row is not
    /// strictly ascending and [`DenseLabelMatrixError::LabelOutOfRange`] when
    /// a label index is outside `[0, num_labels)`.
    ///
    /// # Examples
    /// ```
    /// use kumiwake_providers_dense::{DenseLabelMatrix, DenseLabelMatrixError};
    ///
    /// let err = DenseLabelMatrix::try_new("demo", 2, vec![vec![0, 5]]);
    /// assert!(matches!(err, Err(DenseLabelMatrixError::LabelOutOfRange { .. })));
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        num_labels: usize,
        rows: Vec<Vec<usize>>,
    ) -> Result<Self, DenseLabelMatrixError> {
        for (row_index, row) in rows.iter().enumerate() {
            if !row.windows(2).all(|pair| pair[0] < pair[1]) {
                return Err(DenseLabelMatrixError::UnsortedRow { row: row_index });
            }
            if let Some(&label) = row.iter().find(|&&label| label >= num_labels) {
                return Err(DenseLabelMatrixError::LabelOutOfRange {
                    row: row_index,
                    label,
                    num_labels,
                });
            }
        }
        Ok(Self {
            rows,
            num_labels,
            name: name.into(),
        })
    }

    /// Builds a matrix from a dense boolean indicator matrix; the label space
    /// width is taken from the first row.
    ///
    /// # Errors
    /// Returns [`DenseLabelMatrixError::RaggedRow`] when row widths differ.
    ///
    /// # Examples
    /// ```
    /// use kumiwake_core::LabelSource;
    /// use kumiwake_providers_dense::DenseLabelMatrix;
    ///
    /// let matrix = DenseLabelMatrix::from_indicator(
    ///     "demo",
    ///     &[vec![true, false, true], vec![false, true, false]],
    /// )?;
    /// assert_eq!(matrix.num_labels(), 3);
    /// assert_eq!(matrix.row(0)?, &[0, 2]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_indicator(
        name: impl Into<String>,
        indicator: &[Vec<bool>],
    ) -> Result<Self, DenseLabelMatrixError> {
        let num_labels = indicator.first().map_or(0, Vec::len);
        let mut rows = Vec::with_capacity(indicator.len());
        for (row_index, flags) in indicator.iter().enumerate() {
            if flags.len() != num_labels {
                return Err(DenseLabelMatrixError::RaggedRow {
                    row: row_index,
                    expected: num_labels,
                    actual: flags.len(),
                });
            }
            rows.push(
                flags
                    .iter()
                    .enumerate()
                    .filter_map(|(label, &set)| set.then_some(label))
                    .collect(),
            );
        }
        Ok(Self {
            rows,
            num_labels,
            name: name.into(),
        })
    }
}

impl LabelSource for DenseLabelMatrix {
    fn num_samples(&self) -> usize {
        self.rows.len()
    }

    fn num_labels(&self) -> usize {
        self.num_labels
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn row(&self, sample: usize) -> Result<&[usize], LabelSourceError> {
        self.rows
            .get(sample)
            .map(Vec::as_slice)
            .ok_or(LabelSourceError::OutOfBounds { index: sample })
    }
}
