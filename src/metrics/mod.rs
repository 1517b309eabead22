//! Precision / recall / F1 scoring of discovered causal edges.
pub mod score;

pub use score::{compare, compare_verbose, f1, ground_truth, parse_edges, ComparisonReport, PrecisionRecall};
