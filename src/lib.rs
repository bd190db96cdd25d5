//! Collabnet
//!
//! Builds weighted collaboration networks from song credit records, finds
//! communities of frequent collaborators with Louvain modularity
//! optimization, and exports a colored, sized node-link graph for rendering.
//!
//! # Architecture
//!
//! The pipeline runs four stages, each a plain value constructed from
//! validated settings:
//!
//! - [`builder`]: records to an undirected weighted [`CollaborationGraph`]
//! - [`algo`]: Louvain partition over a CSR view (`collabnet-algorithms` crate)
//! - [`annotate`]: node size, edge width and community color
//! - [`export`]: renderer-neutral node-link structure, serializable as JSON
//!
//! [`Pipeline`] wires them together and [`PipelineConfig`] loads their
//! settings from YAML or JSON.
//!
//! ## Example Usage
//!
//! ```rust
//! use collabnet::{Pipeline, SongRecord, YearRange};
//!
//! let records = vec![
//!     SongRecord::new(1960, Some("A"), Some("B"), Some("C")),
//!     SongRecord::new(1965, Some("A"), Some("B"), Some("D")),
//!     SongRecord::new(1970, Some("B"), Some("C"), Some("A")),
//! ];
//!
//! let pipeline = Pipeline::default();
//! let output = pipeline.run(YearRange::new(1960, 1970).select(&records)).unwrap();
//!
//! // A and B share all three songs
//! let ab = output.graph.edges.iter().find(|e| e.source == "A" && e.target == "B").unwrap();
//! assert_eq!(ab.weight, 3);
//! assert_eq!(output.graph.nodes.len(), 4);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod annotate;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod pipeline;
pub mod record;

// Re-export main types for convenience
pub use algo::{CommunityDetector, LouvainConfig, Partition};
pub use annotate::{
    AnnotatedGraph, AnnotationConfig, Annotator, CommunityRank, NodeAttributes,
    DEFAULT_FALLBACK_COLOR, TABLEAU_PALETTE,
};
pub use builder::{BuildReport, BuildResult, GraphBuilder, GroupingPolicy, Role};
pub use config::PipelineConfig;
pub use error::{AnnotateError, CollabError, CollabResult, ConfigError, ConfigResult};
pub use export::{export, EdgeLink, NodeLink, NodeLinkGraph};
pub use graph::{CollaborationGraph, Edge, PersonId};
pub use pipeline::{Pipeline, PipelineOutput};
pub use record::{normalize_name, SongRecord, YearRange};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
