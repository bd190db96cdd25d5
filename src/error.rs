//! Error types
//!
//! Only configuration problems are failures. Malformed records are skipped
//! and counted in [`BuildReport`](crate::builder::BuildReport) instead.

use crate::builder::Role;
use collabnet_algorithms::LouvainError;
use thiserror::Error;

/// Invalid pipeline configuration, reported when a pipeline stage is constructed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grouping policy has no group templates")]
    EmptyGroupingPolicy,

    #[error("group template {index} lists no roles")]
    EmptyGroupTemplate { index: usize },

    #[error("group template {index} repeats role {role}")]
    DuplicateRole { index: usize, role: Role },

    #[error("group template {index} combines the whole singer field with its split members")]
    ConflictingSingerRoles { index: usize },

    #[error("group template {index} holds only role {role} and can never produce an edge")]
    SingleRoleTemplate { index: usize, role: Role },

    #[error("invalid community detection settings: {0}")]
    Louvain(#[from] LouvainError),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSizeConstant { name: &'static str, value: f64 },

    #[error("edge width divisor must be finite and positive, got {0}")]
    InvalidWidthDivisor(f64),

    #[error("palette entry {0} is blank")]
    BlankPaletteColor(usize),

    #[error("palette color {0} appears more than once")]
    DuplicatePaletteColor(String),

    #[error("fallback color must be non-blank and distinct from the palette, got {0:?}")]
    InvalidFallbackColor(String),

    #[error("could not parse configuration: {0}")]
    Parse(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from annotating a graph with a partition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotateError {
    #[error("partition covers {partition} nodes but the graph has {graph}")]
    PartitionMismatch { graph: usize, partition: usize },
}

/// Umbrella error for callers driving the whole pipeline
#[derive(Error, Debug)]
pub enum CollabError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Annotation error: {0}")]
    Annotate(#[from] AnnotateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CollabResult<T> = Result<T, CollabError>;
