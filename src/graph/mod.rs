//! Defines the core data structures for the causal graph.
pub mod dag;
pub mod node;
pub mod snapshot;

// Re-export key types for convenient access
pub use dag::CausalGraph;
pub use node::{round3, Edge, EdgeParams, NodeId, NodeParams};
pub use snapshot::GraphSnapshot;
