//! Synthetic alert time series for benchmarking causal discovery.
//!
//! Pipeline: [`scm::generate_dag`] builds a random DAG, a
//! [`scm::ParameterSpace`] attaches fault / persistence / propagation
//! parameters, [`compute::synthesize`] simulates one binary alert column per
//! node, and [`metrics`] scores a discovered edge set against the ground truth.
//!
//! All randomness flows through an explicit `rand::Rng` handle, so seeding it
//! makes every stage reproducible.

pub mod analysis;
pub mod compute;
pub mod config;
pub mod display;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod scm;

pub use compute::{synthesize, synthesize_replicates, Synthesizer, TimeSeriesTable};
pub use config::{Benchmark, BenchmarkConfig};
pub use error::{Result, TwinError};
pub use graph::{CausalGraph, Edge, EdgeParams, GraphSnapshot, NodeId, NodeParams};
pub use metrics::{compare, compare_verbose, f1, ground_truth};
pub use scm::{generate_dag, ParamRange, ParameterSpace};
