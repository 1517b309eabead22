//! Serializable form of a (possibly parametrized) causal graph.

use super::dag::CausalGraph;
use super::node::{EdgeParams, NodeId, NodeParams};
use crate::error::{Result, TwinError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u32,
    pub params: Option<NodeParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub cause: u32,
    pub effect: u32,
    pub params: Option<EdgeParams>,
}

/// Node list plus edge list. Node ids must be exactly `0..n` in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    pub fn capture(graph: &CausalGraph) -> Self {
        let nodes = graph
            .node_ids()
            .map(|id| NodeRecord { id: id.index() as u32, params: graph.node_params(id) })
            .collect();
        let edges = graph
            .edges()
            .map(|(cause, effect)| EdgeRecord {
                cause: cause.index() as u32,
                effect: effect.index() as u32,
                params: graph.edge_params(cause, effect),
            })
            .collect();
        Self { nodes, edges }
    }

    /// Rebuilds the graph, re-running every structural and parameter check.
    pub fn restore(&self) -> Result<CausalGraph> {
        let mut graph = CausalGraph::with_nodes(self.nodes.len());
        for (i, record) in self.nodes.iter().enumerate() {
            if record.id as usize != i {
                return Err(TwinError::InvalidArgument(format!(
                    "Snapshot node ids must be contiguous from 0; found {} at position {}",
                    record.id, i
                )));
            }
            if let Some(params) = record.params {
                graph.set_node_params(NodeId::new(i), params)?;
            }
        }
        for record in &self.edges {
            let (cause, effect) = (NodeId::new(record.cause as usize), NodeId::new(record.effect as usize));
            graph.add_edge(cause, effect)?;
            if let Some(params) = record.params {
                graph.set_edge_params(cause, effect, params)?;
            }
        }
        Ok(graph)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
