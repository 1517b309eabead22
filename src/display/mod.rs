//! Text and Graphviz renderings for human inspection.
pub mod trace;

pub use trace::{format_parent_report, format_summary, to_dot};
