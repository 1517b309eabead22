//! Random DAG generation from an Erdős–Rényi adjacency matrix.

use crate::error::{check_probability, Result, TwinError};
use crate::graph::{CausalGraph, NodeId};
use rand::Rng;
use tracing::info;

/// Generates a random DAG of `n` nodes where each forward pair is connected
/// with probability `p`.
///
/// A full `n x n` Bernoulli(p) matrix is drawn row by row and masked to its
/// strict upper triangle, so every edge satisfies `cause < effect` and the
/// result is acyclic by construction. All `n * n` draws are consumed even
/// though the lower triangle is discarded.
pub fn generate_dag<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<CausalGraph> {
    if n == 0 {
        return Err(TwinError::InvalidArgument("DAG size must be positive".into()));
    }
    check_probability("edge probability", p)?;

    let mut graph = CausalGraph::with_nodes(n);
    for i in 0..n {
        for j in 0..n {
            let fired = rng.gen_bool(p);
            // Forward edges cannot close a cycle; skip the reachability check.
            if fired && j > i {
                graph.graph.add_edge(NodeId::new(i), NodeId::new(j), None);
            }
        }
    }

    info!(nodes = n, edges = graph.edge_count(), p, "generated random DAG");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0.5)]
    #[case(8, 0.3)]
    #[case(25, 0.5)]
    #[case(40, 1.0)]
    fn test_generated_edges_point_forward(#[case] n: usize, #[case] p: f64) {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate_dag(n, p, &mut rng).unwrap();
        assert_eq!(graph.node_count(), n);
        for (cause, effect) in graph.edges() {
            assert!(cause < effect);
        }
        assert!(graph.is_acyclic());
    }

    #[test]
    fn test_extreme_probabilities() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_dag(10, 0.0, &mut rng).unwrap().edge_count(), 0);
        // Every strict upper-triangle entry fires.
        assert_eq!(generate_dag(10, 1.0, &mut rng).unwrap().edge_count(), 45);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(generate_dag(0, 0.5, &mut rng), Err(TwinError::InvalidArgument(_))));
        assert!(matches!(generate_dag(5, 1.5, &mut rng), Err(TwinError::InvalidArgument(_))));
        assert!(matches!(generate_dag(5, -0.1, &mut rng), Err(TwinError::InvalidArgument(_))));
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = generate_dag(15, 0.4, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_dag(15, 0.4, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }
}
