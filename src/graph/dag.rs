//! dag.rs
//! Wraps a petgraph `DiGraph` with the structural-causal-model parameters and
//! the structural queries used by the synthesizer and the scorer.

use super::node::{EdgeParams, NodeId, NodeParams};
use crate::analysis::topology;
use crate::error::{Result, TwinError};
use petgraph::algo::has_path_connecting;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// A directed acyclic graph whose nodes and edges carry optional SCM parameters.
///
/// `None` weights mean "not parametrized yet"; synthesis refuses to run until
/// every node and edge carries parameters.
#[derive(Debug, Clone, Default)]
pub struct CausalGraph {
    pub(crate) graph: DiGraph<Option<NodeParams>, Option<EdgeParams>>,
}

impl CausalGraph {
    pub fn new() -> Self { Self::default() }

    /// Creates a graph with `n` unparametrized, unconnected nodes labelled `0..n`.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::new();
        for _ in 0..n {
            graph.add_node();
        }
        graph
    }

    pub fn add_node(&mut self) -> NodeId {
        self.graph.add_node(None)
    }

    /// Adds the edge `cause -> effect`.
    ///
    /// Labels may point in either direction; anything that would close a cycle
    /// is rejected, so the graph stays a DAG at all times.
    pub fn add_edge(&mut self, cause: NodeId, effect: NodeId) -> Result<()> {
        self.check_node(cause)?;
        self.check_node(effect)?;
        if cause == effect {
            return Err(TwinError::CycleDetected { node: cause });
        }
        if self.graph.find_edge(cause, effect).is_some() {
            return Err(TwinError::InvalidArgument(format!(
                "Duplicate edge {}->{}",
                cause.index(),
                effect.index()
            )));
        }
        if has_path_connecting(&self.graph, effect, cause, None) {
            return Err(TwinError::CycleDetected { node: cause });
        }
        self.graph.add_edge(cause, effect, None);
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    /// Node ids in ascending label order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    /// All `(cause, effect)` pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }

    // --- Parameters ---

    pub fn node_params(&self, id: NodeId) -> Option<NodeParams> {
        self.graph.node_weight(id).copied().flatten()
    }

    pub fn edge_params(&self, cause: NodeId, effect: NodeId) -> Option<EdgeParams> {
        let edge = self.graph.find_edge(cause, effect)?;
        self.graph.edge_weight(edge).copied().flatten()
    }

    pub fn set_node_params(&mut self, id: NodeId, params: NodeParams) -> Result<()> {
        params.validate()?;
        self.check_node(id)?;
        self.graph[id] = Some(params);
        Ok(())
    }

    pub fn set_edge_params(&mut self, cause: NodeId, effect: NodeId, params: EdgeParams) -> Result<()> {
        params.validate()?;
        let edge = self.graph.find_edge(cause, effect).ok_or_else(|| {
            TwinError::InvalidArgument(format!("No edge {}->{}", cause.index(), effect.index()))
        })?;
        self.graph[edge] = Some(params);
        Ok(())
    }

    /// True once every node and every edge carries parameters.
    pub fn is_parametrized(&self) -> bool {
        self.graph.raw_nodes().iter().all(|n| n.weight.is_some())
            && self.graph.raw_edges().iter().all(|e| e.weight.is_some())
    }

    // --- Structural queries ---

    /// Direct causes of `id`, in ascending label order.
    pub fn parents(&self, id: NodeId) -> Vec<NodeId> {
        let mut parents: Vec<NodeId> = self.graph.neighbors_directed(id, Direction::Incoming).collect();
        parents.sort_unstable();
        parents
    }

    /// Direct effects of `id`, in ascending label order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.graph.neighbors_directed(id, Direction::Outgoing).collect();
        children.sort_unstable();
        children
    }

    /// Nodes without parents, in ascending label order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|&id| self.graph.neighbors_directed(id, Direction::Incoming).next().is_none())
            .collect()
    }

    /// In-degree plus out-degree.
    pub fn degree(&self, id: NodeId) -> usize {
        self.graph.edges_directed(id, Direction::Incoming).count()
            + self.graph.edges_directed(id, Direction::Outgoing).count()
    }

    /// Average of `degree` over all nodes; 0.0 for an empty graph.
    pub fn mean_degree(&self) -> f64 {
        let count = self.node_count();
        if count == 0 {
            return 0.0;
        }
        let total: usize = self.graph.node_indices().map(|id| self.degree(id)).sum();
        total as f64 / count as f64
    }

    // --- Graph Algorithms ---

    /// Returns an order in which every parent precedes all of its children.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        topology::sort(self)
    }

    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_ok()
    }

    fn check_node(&self, id: NodeId) -> Result<()> {
        if id.index() < self.node_count() {
            Ok(())
        } else {
            Err(TwinError::InvalidArgument(format!("Unknown node {}", id.index())))
        }
    }
}
