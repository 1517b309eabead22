use crate::error::{Result, TwinError};
use crate::graph::{CausalGraph, NodeId};

/// Performs a Topological Sort using Depth-First Search (DFS).
///
/// Returns a list of NodeIds where every parent appears before its children,
/// whatever the numeric labels of the nodes are.
///
/// Roots are entered in ascending label order and parents are visited in
/// ascending label order, so the result is deterministic for a given graph.
/// When labels already follow the causal order (as generated DAGs do), the
/// result is simply `0..n`.
pub fn sort(graph: &CausalGraph) -> Result<Vec<NodeId>> {
    let count = graph.node_count();
    let mut order = Vec::with_capacity(count);
    let mut state = vec![VisitState::None; count];

    // We iterate 0..count to ensure all nodes (even disconnected ones) are visited.
    for node in graph.node_ids() {
        if state[node.index()] == VisitState::None {
            visit(node, graph, &mut state, &mut order)?;
        }
    }

    Ok(order)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    None,
    Visiting, // Used for cycle detection
    Visited,
}

fn visit(
    node: NodeId,
    graph: &CausalGraph,
    state: &mut [VisitState],
    order: &mut Vec<NodeId>,
) -> Result<()> {
    let idx = node.index();

    match state[idx] {
        VisitState::Visited => return Ok(()),
        VisitState::Visiting => return Err(TwinError::CycleDetected { node }),
        VisitState::None => state[idx] = VisitState::Visiting,
    }

    // Post-order on the parent relation gives [Parent, ..., Child].
    for parent in graph.parents(node) {
        visit(parent, graph, state, order)?;
    }

    state[idx] = VisitState::Visited;
    order.push(node);
    Ok(())
}
