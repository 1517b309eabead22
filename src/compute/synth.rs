//! The alert-propagation simulator.
//!
//! Every node carries a binary alert signal. At each sample after the first, a
//! node is active when any of three independent gates fires:
//!
//! 1. **persistence**: it was active on the previous sample and a
//!    Bernoulli(`v_self`) trial succeeds,
//! 2. **injection**: a Bernoulli(`lam`) trial succeeds,
//! 3. **propagation**: for some parent `u` with edge `(v_prop, lag)`, `u` was
//!    active `lag` samples ago and a Bernoulli(`v_prop`) trial succeeds.
//!
//! Sample 0 is always inactive. Nodes are simulated in topological order, so a
//! parent's column is complete before any child reads its lagged history.

use super::table::TimeSeriesTable;
use crate::error::{Result, TwinError};
use crate::graph::{CausalGraph, EdgeParams, NodeId, NodeParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, info};

/// Pre-resolved inputs for one node: its own parameters and its incoming edges.
#[derive(Debug, Clone)]
struct NodePlan {
    node: NodeId,
    params: NodeParams,
    parents: SmallVec<[(NodeId, EdgeParams); 4]>,
}

/// A validated, topologically ordered simulation plan for one graph.
///
/// Building the plan checks every parameter once; running it only consumes
/// randomness, so the same plan can be replayed with many seeds.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    plan: Vec<NodePlan>,
}

impl Synthesizer {
    /// Resolves parameters and evaluation order.
    ///
    /// Fails with `MissingParameter` if any node or edge was never parametrized,
    /// and with `CycleDetected` if the graph is not a DAG.
    pub fn new(graph: &CausalGraph) -> Result<Self> {
        let order = graph.topological_order()?;
        let mut plan = Vec::with_capacity(order.len());

        for node in order {
            let params = graph.node_params(node).ok_or_else(|| TwinError::MissingParameter {
                what: format!("node {} has no lam/v_self", node.index()),
            })?;
            params.validate()?;

            let mut parents = SmallVec::new();
            for parent in graph.parents(node) {
                let edge = graph.edge_params(parent, node).ok_or_else(|| TwinError::MissingParameter {
                    what: format!("edge {}->{} has no v_prop/lag", parent.index(), node.index()),
                })?;
                edge.validate()?;
                parents.push((parent, edge));
            }

            plan.push(NodePlan { node, params, parents });
        }

        Ok(Self { plan })
    }

    /// Simulates `length` samples for every node.
    ///
    /// Per node and sample the trials are drawn in a fixed order: `v_self`,
    /// `lam`, then one `v_prop` trial per parent in ascending parent id. Every
    /// trial is drawn even when the outcome is already decided (including
    /// samples before an edge's lag has elapsed), so the random stream consumed
    /// does not depend on the signal values.
    pub fn run<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<TimeSeriesTable> {
        if length < 1 {
            return Err(TwinError::InvalidArgument("time series length must be positive".into()));
        }

        let mut columns: Vec<Vec<u8>> = vec![Vec::new(); self.plan.len()];

        for step in &self.plan {
            let column = simulate_node(step, &columns, length, rng);
            debug!(
                node = step.node.index(),
                parents = step.parents.len(),
                active = column.iter().filter(|&&v| v == 1).count(),
                "simulated alert column"
            );
            columns[step.node.index()] = column;
        }

        Ok(TimeSeriesTable::from_columns(length, columns))
    }

    /// Runs one independent simulation per seed, in parallel.
    ///
    /// Replicate `k` equals `run(length, &mut StdRng::seed_from_u64(seeds[k]))`.
    pub fn run_replicates(&self, length: usize, seeds: &[u64]) -> Result<Vec<TimeSeriesTable>> {
        seeds
            .par_iter()
            .map(|&seed| self.run(length, &mut StdRng::seed_from_u64(seed)))
            .collect()
    }
}

fn simulate_node<R: Rng + ?Sized>(step: &NodePlan, columns: &[Vec<u8>], length: usize, rng: &mut R) -> Vec<u8> {
    let mut column = Vec::with_capacity(length);
    // No fault at start.
    let mut previous = false;
    column.push(0);

    for i in 1..length {
        let error_self = rng.gen_bool(step.params.v_self);
        let error_new = rng.gen_bool(step.params.lam);
        let gate_self = previous && error_self;

        let mut propagated = false;
        for &(parent, edge) in &step.parents {
            let error_prop = rng.gen_bool(edge.v_prop);
            if i >= edge.lag {
                // Topological order guarantees the parent column is complete.
                let parent_active = columns[parent.index()][i - edge.lag] == 1;
                propagated |= parent_active && error_prop;
            }
        }

        let current = gate_self || error_new || propagated;
        column.push(current as u8);
        previous = current;
    }

    column
}

/// Builds a plan for `graph` and simulates `length` samples per node.
pub fn synthesize<R: Rng + ?Sized>(graph: &CausalGraph, length: usize, rng: &mut R) -> Result<TimeSeriesTable> {
    let table = Synthesizer::new(graph)?.run(length, rng)?;
    info!(nodes = table.width(), length, "synthesized alert time series");
    Ok(table)
}

/// Parallel replicates of [`synthesize`], one per seed.
pub fn synthesize_replicates(graph: &CausalGraph, length: usize, seeds: &[u64]) -> Result<Vec<TimeSeriesTable>> {
    let tables = Synthesizer::new(graph)?.run_replicates(length, seeds)?;
    info!(nodes = graph.node_count(), length, replicates = tables.len(), "synthesized replicate batch");
    Ok(tables)
}
