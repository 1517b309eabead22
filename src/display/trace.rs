use crate::graph::{CausalGraph, EdgeParams, NodeId, NodeParams};
use petgraph::dot::{Config, Dot};
use petgraph::visit::EdgeRef;
use std::fmt::Write;

/// Nodes and edges, first as bare labels, then with their parameters.
pub fn format_summary(graph: &CausalGraph) -> String {
    let mut output = String::new();
    let nodes: Vec<usize> = graph.node_ids().map(|id| id.index()).collect();
    let edges: Vec<(usize, usize)> = graph.edges().map(|(u, v)| (u.index(), v.index())).collect();

    let _ = writeln!(output, "Nodes: {:?}", nodes);
    let _ = writeln!(output, "Edges: {:?}", edges);

    let _ = writeln!(output, "\nNodes (full view):");
    for id in graph.node_ids() {
        let _ = writeln!(output, "  {}: {}", id.index(), format_node_params(graph.node_params(id)));
    }
    let _ = writeln!(output, "\nEdges (full view):");
    for (u, v) in graph.edges() {
        let _ = writeln!(output, "  {}->{}: {}", u.index(), v.index(), format_edge_params(graph.edge_params(u, v)));
    }
    output
}

/// For every node: its own parameters, its parents, and for each parent the
/// parent's parameters plus the connecting edge's `v_prop` and `lag`.
pub fn format_parent_report(graph: &CausalGraph) -> String {
    let mut output = String::new();
    for node in graph.node_ids() {
        let parents = graph.parents(node);
        let labels: Vec<usize> = parents.iter().map(|p| p.index()).collect();

        let _ = writeln!(output, "Node {} {}", node.index(), format_node_params(graph.node_params(node)));
        let _ = writeln!(output, "|  Parents: {:?}", labels);
        for (i, &parent) in parents.iter().enumerate() {
            let connector = if i == parents.len() - 1 { "`--" } else { "|--" };
            let _ = writeln!(
                output,
                "{} Node {} {} via {}",
                connector,
                parent.index(),
                format_node_params(graph.node_params(parent)),
                format_edge_params(graph.edge_params(parent, node))
            );
        }
    }
    output
}

/// Graphviz DOT rendering of the graph with parameters as labels.
///
/// Layout and drawing are left to external tools (`dot -Tsvg`).
pub fn to_dot(graph: &CausalGraph) -> String {
    format!(
        "{:?}",
        Dot::with_attr_getters(
            &graph.graph,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_, edge| format!("label = \"{}\"", dot_edge_label(edge.weight())),
            &|_, (id, params)| format!("label = \"{}\"", dot_node_label(id, params)),
        )
    )
}

fn dot_node_label(id: NodeId, params: &Option<NodeParams>) -> String {
    match params {
        Some(p) => format!("{}\\nlam={:.3} v_self={:.3}", id.index(), p.lam, p.v_self),
        None => id.index().to_string(),
    }
}

fn dot_edge_label(params: &Option<EdgeParams>) -> String {
    match params {
        Some(p) => format!("v_prop={:.3} lag={}", p.v_prop, p.lag),
        None => String::new(),
    }
}

fn format_node_params(params: Option<NodeParams>) -> String {
    match params {
        Some(p) => format!("[lam={:.3}, v_self={:.3}]", p.lam, p.v_self),
        None => "[?]".to_string(),
    }
}

fn format_edge_params(params: Option<EdgeParams>) -> String {
    match params {
        Some(p) => format!("[v_prop={:.3}, lag={}]", p.v_prop, p.lag),
        None => "[?]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> CausalGraph {
        let mut graph = CausalGraph::with_nodes(3);
        let (a, b, c) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));
        graph.add_edge(a, c).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.set_node_params(a, NodeParams::new(0.05, 0.9).unwrap()).unwrap();
        graph.set_edge_params(a, c, EdgeParams::new(0.75, 2).unwrap()).unwrap();
        graph
    }

    #[test]
    fn test_summary_lists_structure_and_params() {
        let text = format_summary(&sample_graph());
        assert!(text.contains("Nodes: [0, 1, 2]"));
        assert!(text.contains("Edges: [(0, 2), (1, 2)]"));
        assert!(text.contains("0: [lam=0.050, v_self=0.900]"));
        assert!(text.contains("0->2: [v_prop=0.750, lag=2]"));
        assert!(text.contains("1->2: [?]"));
    }

    #[test]
    fn test_parent_report() {
        let text = format_parent_report(&sample_graph());
        assert!(text.contains("Node 2 [?]\n|  Parents: [0, 1]"));
        assert!(text.contains("|-- Node 0 [lam=0.050, v_self=0.900] via [v_prop=0.750, lag=2]"));
        assert!(text.contains("`-- Node 1 [?] via [?]"));
        assert!(text.contains("|  Parents: []"));
    }

    #[test]
    fn test_dot_output() {
        let text = to_dot(&sample_graph());
        assert!(text.starts_with("digraph"));
        assert!(text.contains("0 -> 2"));
        assert!(text.contains("v_prop=0.750 lag=2"));
        assert!(text.contains("lam=0.050"));
    }
}
