//! Synthesizes alert time series from a parametrized graph.
pub mod synth;
pub mod table;

pub use synth::{synthesize, synthesize_replicates, Synthesizer};
pub use table::TimeSeriesTable;
