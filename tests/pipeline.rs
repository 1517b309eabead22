use causal_twin::metrics::{compare, ground_truth};
use causal_twin::{generate_dag, synthesize, BenchmarkConfig, Edge, GraphSnapshot, NodeId, ParameterSpace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

#[test]
fn generated_benchmark_respects_structural_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut graph = generate_dag(20, 0.25, &mut rng).unwrap();
    ParameterSpace::default().parametrize(&mut graph, &mut rng).unwrap();
    let table = synthesize(&graph, 300, &mut rng).unwrap();

    assert!(graph.is_acyclic());
    assert_eq!(table.width(), 20);
    for node in graph.node_ids() {
        let column = table.column(node).unwrap();
        assert_eq!(column.len(), 300);
        assert_eq!(column[0], 0);
        assert!(column.iter().all(|&v| v <= 1));
    }
    for (cause, effect) in graph.edges() {
        assert!(cause < effect);
        assert!(graph.edge_params(cause, effect).unwrap().lag >= 1);
    }
}

#[test]
fn perfect_discovery_scores_one() {
    let config = BenchmarkConfig { nodes: 12, edge_probability: 0.5, length: 100, seed: Some(9), ..Default::default() };
    let benchmark = config.run(&mut config.rng()).unwrap();
    let truth = ground_truth(&benchmark.graph);
    assert!(!truth.is_empty());

    let scores = compare(&truth, &truth).unwrap();
    assert_eq!((scores.precision, scores.recall, scores.f1()), (1.0, 1.0, 1.0));

    // Reversing every edge finds nothing.
    let reversed: BTreeSet<Edge> = truth.iter().map(|e| Edge::new(e.effect, e.cause)).collect();
    assert_eq!(compare(&truth, &reversed).unwrap().f1(), 0.0);
}

#[test]
fn saved_benchmark_reloads_and_resynthesizes_identically() {
    let config = BenchmarkConfig { nodes: 8, length: 150, seed: Some(77), ..Default::default() };
    let benchmark = config.run(&mut config.rng()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    GraphSnapshot::capture(&benchmark.graph).to_json_file(&path).unwrap();
    let reloaded = GraphSnapshot::from_json_file(&path).unwrap().restore().unwrap();

    assert_eq!(ground_truth(&reloaded), ground_truth(&benchmark.graph));
    let a = synthesize(&benchmark.graph, 150, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = synthesize(&reloaded, 150, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a, b);

    let mut csv = Vec::new();
    a.write_csv(&mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert_eq!(text.lines().count(), 151);
    assert_eq!(text.lines().next().unwrap(), "0,1,2,3,4,5,6,7");
    assert_eq!(a.get(NodeId::new(0), 0), Some(0));
}
