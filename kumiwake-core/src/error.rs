//! Error types for the Kumiwake core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::LabelSource`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LabelSourceError {
    /// Requested sample was outside the source's bounds.
    #[error("sample {index} is out of bounds")]
    OutOfBounds {
        /// The requested sample row that exceeded the source bounds.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LabelSourceError`] variants.
    enum LabelSourceErrorCode for LabelSourceError {
        /// Requested sample was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "LABEL_SOURCE_OUT_OF_BOUNDS",
    }
}

/// An error surfaced unchanged from a community-detection algorithm.
///
/// Detection failures are opaque to the clustering pipeline: they are wrapped
/// in [`KumiwakeError::Detection`] and propagated without retries.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetectionError {
    /// An edge carried a weight the algorithm cannot optimise over.
    #[error("edge between labels {first} and {second} has non-finite weight {weight}")]
    NonFiniteWeight {
        /// Lower label index of the offending edge.
        first: usize,
        /// Higher label index of the offending edge.
        second: usize,
        /// The non-finite weight encountered.
        weight: f64,
    },
}

/// Error type produced when constructing or running [`crate::Kumiwake`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum KumiwakeError {
    /// Resolution must be a finite, strictly positive number.
    #[error("resolution must be finite and positive (got {got})")]
    InvalidResolution {
        /// The invalid resolution supplied by the caller.
        got: f64,
    },
    /// An edge referenced a label index outside the label space.
    #[error("edge ({first}, {second}) references a label outside [0, {num_labels})")]
    InvalidEdgeKey {
        /// Lower label index of the edge key.
        first: usize,
        /// Higher label index of the edge key.
        second: usize,
        /// Number of labels in the graph under assembly.
        num_labels: usize,
    },
    /// An edge map already contained the given key.
    #[error("duplicate edge ({first}, {second}) in edge map")]
    DuplicateEdge {
        /// Lower label index of the duplicated key.
        first: usize,
        /// Higher label index of the duplicated key.
        second: usize,
    },
    /// A label pair referenced the same label twice.
    #[error("label {index} cannot co-occur with itself")]
    SelfEdge {
        /// The label index used for both ends of the pair.
        index: usize,
    },
    /// The requested community-detection method is not recognised.
    #[error("unsupported community-detection method `{got}`")]
    UnsupportedMethod {
        /// The method string that failed to parse.
        got: Arc<str>,
    },
    /// The partition assignment did not cover every label.
    #[error("partition assignment is missing label {label}")]
    MissingAssignment {
        /// The label index absent from the assignment.
        label: usize,
    },
    /// A [`crate::LabelSource`] operation failed while building the graph.
    #[error("label source `{label_source}` failed: {error}")]
    LabelSource {
        /// Identifier for the label source that produced the error.
        label_source: Arc<str>,
        #[source]
        /// Underlying label source error bubbled up by the graph builder.
        error: LabelSourceError,
    },
    /// The community-detection algorithm failed.
    #[error("community detection failed: {error}")]
    Detection {
        #[source]
        /// Underlying algorithm error, surfaced unchanged.
        error: DetectionError,
    },
}

define_error_codes! {
    /// Stable codes describing [`KumiwakeError`] variants.
    enum KumiwakeErrorCode for KumiwakeError {
        /// Resolution must be a finite, strictly positive number.
        InvalidResolution => InvalidResolution { .. } => "KUMIWAKE_INVALID_RESOLUTION",
        /// An edge referenced a label index outside the label space.
        InvalidEdgeKey => InvalidEdgeKey { .. } => "KUMIWAKE_INVALID_EDGE_KEY",
        /// An edge map already contained the given key.
        DuplicateEdge => DuplicateEdge { .. } => "KUMIWAKE_DUPLICATE_EDGE",
        /// A label pair referenced the same label twice.
        SelfEdge => SelfEdge { .. } => "KUMIWAKE_SELF_EDGE",
        /// The requested community-detection method is not recognised.
        UnsupportedMethod => UnsupportedMethod { .. } => "KUMIWAKE_UNSUPPORTED_METHOD",
        /// The partition assignment did not cover every label.
        MissingAssignment => MissingAssignment { .. } => "KUMIWAKE_MISSING_ASSIGNMENT",
        /// A label source operation failed while building the graph.
        LabelSourceFailure => LabelSource { .. } => "KUMIWAKE_LABEL_SOURCE_FAILURE",
        /// The community-detection algorithm failed.
        DetectionFailure => Detection { .. } => "KUMIWAKE_DETECTION_FAILURE",
    }
}

impl KumiwakeError {
    /// Retrieve the inner [`LabelSourceErrorCode`] when the error originated in a [`crate::LabelSource`].
    pub const fn label_source_code(&self) -> Option<LabelSourceErrorCode> {
        match self {
            Self::LabelSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, KumiwakeError>;
