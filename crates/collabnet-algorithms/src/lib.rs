pub mod common;
pub mod modularity;
pub mod community;

pub use common::{GraphView, NodeId};
pub use modularity::modularity;
pub use community::{louvain, LouvainConfig, LouvainError, LouvainResult};
