//! Kumiwake core library.
//!
//! Partitions a multi-label classification problem's label space into
//! communities of co-occurring labels: a graph builder turns the label matrix
//! into a weighted edge map, the map is assembled into a label graph, and a
//! community-detection algorithm groups the labels for downstream ensemble
//! classifiers.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod detect;
mod edge_map;
mod error;
mod graph;
mod graph_builder;
mod kumiwake;
mod labelsource;
mod membership;
mod partition;

pub use crate::{
    builder::KumiwakeBuilder,
    detect::{
        CommunityDetector, DetectionMethod, ModularityDetector, PropagationDetector,
    },
    edge_map::{EdgeMap, LabelPair},
    error::{
        DetectionError, KumiwakeError, KumiwakeErrorCode, LabelSourceError, LabelSourceErrorCode,
        Result,
    },
    graph::LabelGraph,
    graph_builder::{CooccurrenceBuilder, GraphBuilder},
    kumiwake::Kumiwake,
    labelsource::LabelSource,
    membership::Membership,
    partition::PartitionAssignment,
};
