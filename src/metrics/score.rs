//! Scores a discovered edge set against the generating DAG.

use crate::error::{Result, TwinError};
use crate::graph::{CausalGraph, Edge};
use std::collections::BTreeSet;
use std::fmt;

/// The true edge set of `graph`, one entry per directed edge.
pub fn ground_truth(graph: &CausalGraph) -> BTreeSet<Edge> {
    graph
        .edges()
        .map(|(cause, effect)| Edge::new(cause.index() as u32, effect.index() as u32))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionRecall {
    pub precision: f64,
    pub recall: f64,
}

impl PrecisionRecall {
    pub fn f1(&self) -> f64 {
        f1(self.precision, self.recall)
    }
}

/// Precision and recall of `discovered` against `ground_truth`.
///
/// Precision is 0 when nothing was discovered. An empty ground truth leaves
/// recall undefined and is reported as `DivisionByZero`.
pub fn compare(ground_truth: &BTreeSet<Edge>, discovered: &BTreeSet<Edge>) -> Result<PrecisionRecall> {
    Ok(compare_verbose(ground_truth, discovered)?.scores())
}

/// Harmonic mean of precision and recall; 0 if either is exactly 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision != 0.0 && recall != 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Breakdown of a comparison, printable as a short report.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub ground_truth_count: usize,
    pub discovered_count: usize,
    /// Discovered edges that are in the ground truth.
    pub correct: BTreeSet<Edge>,
    /// Discovered edges that are not in the ground truth.
    pub additional: BTreeSet<Edge>,
    /// Ground-truth edges that were not discovered.
    pub missed: BTreeSet<Edge>,
    pub precision: f64,
    pub recall: f64,
}

impl ComparisonReport {
    pub fn scores(&self) -> PrecisionRecall {
        PrecisionRecall { precision: self.precision, recall: self.recall }
    }
}

pub fn compare_verbose(ground_truth: &BTreeSet<Edge>, discovered: &BTreeSet<Edge>) -> Result<ComparisonReport> {
    if ground_truth.is_empty() {
        return Err(TwinError::DivisionByZero("recall is undefined for an empty ground truth".into()));
    }

    let correct: BTreeSet<Edge> = ground_truth.intersection(discovered).copied().collect();
    let additional = discovered.difference(&correct).copied().collect();
    let missed = ground_truth.difference(&correct).copied().collect();

    let precision = if discovered.is_empty() {
        0.0
    } else {
        correct.len() as f64 / discovered.len() as f64
    };
    let recall = correct.len() as f64 / ground_truth.len() as f64;

    Ok(ComparisonReport {
        ground_truth_count: ground_truth.len(),
        discovered_count: discovered.len(),
        correct,
        additional,
        missed,
        precision,
        recall,
    })
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of ground truth edges: {}", self.ground_truth_count)?;
        writeln!(f, "Number of discovered edges: {}", self.discovered_count)?;
        writeln!(f)?;
        writeln!(f, "\tCorrectly discovered: {}", self.correct.len())?;
        writeln!(f, "\tAdditionally discovered: {}", self.additional.len())?;
        writeln!(f, "\tMissed: {}", self.missed.len())?;
        writeln!(f)?;
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall: {:.4}", self.recall)?;
        write!(f, "F1: {:.4}", f1(self.precision, self.recall))
    }
}

/// Parses an edge list, one `u->v` per item; blank items and `#` comments are skipped.
pub fn parse_edges<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<BTreeSet<Edge>> {
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.parse::<Edge>())
        .collect()
}
