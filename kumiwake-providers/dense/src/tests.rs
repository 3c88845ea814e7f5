//! Unit tests for the dense label-matrix provider.

use kumiwake_core::{LabelSource, LabelSourceError};
use rstest::rstest;

use crate::{DenseLabelMatrix, DenseLabelMatrixError};

#[test]
fn exposes_rows_and_dimensions() {
    let matrix = DenseLabelMatrix::new("demo", 4, vec![vec![0, 3], vec![], vec![1, 2, 3]]);
    assert_eq!(matrix.num_samples(), 3);
    assert_eq!(matrix.num_labels(), 4);
    assert_eq!(matrix.name(), "demo");
    assert_eq!(matrix.row(0).expect("valid sample"), &[0, 3]);
    assert_eq!(matrix.row(1).expect("valid sample"), &[] as &[usize]);
}

#[test]
fn out_of_bounds_sample_is_rejected() {
    let matrix = DenseLabelMatrix::new("demo", 2, vec![vec![0]]);
    let err = matrix.row(3).expect_err("sample 3 does not exist");
    assert_eq!(err, LabelSourceError::OutOfBounds { index: 3 });
}

#[rstest]
#[case(vec![vec![1, 0]])]
#[case(vec![vec![0, 0]])]
fn unsorted_rows_are_rejected(#[case] rows: Vec<Vec<usize>>) {
    let err = DenseLabelMatrix::try_new("demo", 2, rows).expect_err("row order is invalid");
    assert_eq!(err, DenseLabelMatrixError::UnsortedRow { row: 0 });
}

#[test]
fn out_of_range_label_is_rejected() {
    let err = DenseLabelMatrix::try_new("demo", 3, vec![vec![0], vec![1, 7]])
        .expect_err("label 7 exceeds the label space");
    assert_eq!(
        err,
        DenseLabelMatrixError::LabelOutOfRange {
            row: 1,
            label: 7,
            num_labels: 3
        }
    );
}

#[test]
fn indicator_rows_convert_to_label_indices() {
    let matrix = DenseLabelMatrix::from_indicator(
        "demo",
        &[vec![true, true, false], vec![false, false, true]],
    )
    .expect("consistent indicator");
    assert_eq!(matrix.num_labels(), 3);
    assert_eq!(matrix.row(0).expect("valid sample"), &[0, 1]);
    assert_eq!(matrix.row(1).expect("valid sample"), &[2]);
}

#[test]
fn ragged_indicator_is_rejected() {
    let err = DenseLabelMatrix::from_indicator("demo", &[vec![true, false], vec![true]])
        .expect_err("second row is narrower");
    assert_eq!(
        err,
        DenseLabelMatrixError::RaggedRow {
            row: 1,
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn empty_indicator_yields_empty_label_space() {
    let matrix = DenseLabelMatrix::from_indicator("demo", &[]).expect("empty matrix is valid");
    assert_eq!(matrix.num_samples(), 0);
    assert_eq!(matrix.num_labels(), 0);
}
