//! Builds the structural causal model: a random DAG plus its parameters.
pub mod generator;
pub mod params;

pub use generator::generate_dag;
pub use params::{ParamRange, ParameterSpace};
