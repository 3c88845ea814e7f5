//! Dense label-matrix providers backed by in-memory row storage.

mod errors;
mod source;

pub use errors::DenseLabelMatrixError;
pub use source::DenseLabelMatrix;

#[cfg(test)]
mod tests;
