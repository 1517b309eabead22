//! Structural analysis over the causal graph.
pub mod topology;
