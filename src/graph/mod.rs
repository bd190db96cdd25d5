//! Collaboration graph data model
//!
//! People are nodes keyed by normalized name; an undirected edge carries the
//! number of collaboration groups its two endpoints share.

pub mod edge;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use store::CollaborationGraph;
pub use types::PersonId;
