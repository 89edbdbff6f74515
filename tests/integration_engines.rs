//! 分步引擎集成测试
//!
//! 覆盖两种算法的完整运行、终止后的幂等性以及交叉验证

mod common;

use common::assertions::{assert_distances, assert_unreachable};
use common::data_fixtures::{disconnected, random_graph, triangle};
use common::run_engine;
use pathstep::{
    engine_for, run_to_completion, Algorithm, BellmanFordEngine, Distance, Edge, EnginePhase,
    Node, NodeId, PathError, Processed, StepEngine,
};

fn edge_ids(edges: &[Edge]) -> Vec<u64> {
    let mut ids: Vec<u64> = edges.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn test_dijkstra_triangle() {
    let graph = triangle(Algorithm::Dijkstra);
    let engine = run_engine(Algorithm::Dijkstra, graph.nodes(), graph.edges(), 1);

    assert_eq!(engine.phase(), EnginePhase::Converged);
    let distances = engine.distances().expect("距离表应存在");
    assert_distances(distances, &[(1, 0.0), (2, 1.0), (3, 3.0)]);

    let productive = engine.history().iter().filter(|s| s.is_productive()).count();
    assert_eq!(productive, 2);

    let tree = engine.shortest_path_tree().expect("应能构建最短路径树");
    assert_eq!(edge_ids(&tree), vec![1, 2]);
}

#[test]
fn test_bellman_ford_triangle() {
    let graph = triangle(Algorithm::BellmanFord);
    let mut engine = engine_for(Algorithm::BellmanFord);
    engine
        .initialize(graph.nodes(), graph.edges(), 1)
        .expect("初始化失败");

    for _ in 0..3 {
        engine.step().expect("执行失败");
    }
    let after_first_pass = engine.distances().expect("距离表应存在");
    assert_distances(after_first_pass, &[(1, 0.0), (2, 1.0), (3, 3.0)]);
    assert!(!engine.is_complete());

    run_to_completion(engine.as_mut(), 100).expect("运行失败");
    assert_eq!(engine.phase(), EnginePhase::Converged);
    assert_eq!(engine.history().len(), 6);

    let last = engine.history().latest().expect("历史不应为空");
    assert_eq!(last.processed, Processed::Edge { id: 3, pass: 1 });

    let tree = engine.shortest_path_tree().expect("应能构建最短路径树");
    assert_eq!(edge_ids(&tree), vec![1, 2]);
}

#[test]
fn test_single_node_converges_without_steps() {
    let nodes = vec![Node::new(7, "solo", 0.0, 0.0)];

    for algorithm in [Algorithm::Dijkstra, Algorithm::BellmanFord] {
        let mut engine = engine_for(algorithm);
        engine.initialize(&nodes, &[], 7).expect("初始化失败");

        assert!(engine.is_complete(), "{} 应立即收敛", algorithm);
        assert_eq!(engine.phase(), EnginePhase::Converged);
        assert!(engine.history().is_empty());
        assert_distances(engine.distances().expect("距离表应存在"), &[(7, 0.0)]);
        assert!(engine.shortest_path_tree().expect("应能构建").is_empty());

        let snapshot = engine.step().expect("终止后 step 不应报错");
        assert_eq!(snapshot.processed, Processed::Nothing);
        assert!(engine.history().is_empty());
    }
}

#[test]
fn test_unreachable_node_is_omitted_from_tree() {
    for algorithm in [Algorithm::Dijkstra, Algorithm::BellmanFord] {
        let graph = disconnected(algorithm);
        let engine = run_engine(algorithm, graph.nodes(), graph.edges(), 1);

        assert_eq!(engine.phase(), EnginePhase::Converged);
        let distances = engine.distances().expect("距离表应存在");
        assert_unreachable(distances, 4);
        assert_eq!(engine.predecessors().and_then(|p| p.get(4)), None);

        let tree = engine.shortest_path_tree().expect("应能构建最短路径树");
        assert!(tree.iter().all(|e| !e.touches(4)));
        assert_eq!(tree.len(), 2);
    }
}

#[test]
fn test_step_before_initialize_fails() {
    for algorithm in [Algorithm::Dijkstra, Algorithm::BellmanFord] {
        let mut engine = engine_for(algorithm);
        assert!(matches!(engine.step(), Err(PathError::NotInitialized)));
        assert!(matches!(
            engine.shortest_path_tree(),
            Err(PathError::NotInitialized)
        ));
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }
}

#[test]
fn test_unknown_source_is_rejected() {
    let graph = triangle(Algorithm::Dijkstra);
    let mut engine = engine_for(Algorithm::Dijkstra);
    let result = engine.initialize(graph.nodes(), graph.edges(), 42);
    assert!(matches!(result, Err(PathError::InvalidSourceNode(42))));
    assert_eq!(engine.phase(), EnginePhase::Idle);
}

#[test]
fn test_tree_requires_convergence() {
    let graph = triangle(Algorithm::BellmanFord);
    let mut engine = BellmanFordEngine::new();
    engine
        .initialize(graph.nodes(), graph.edges(), 1)
        .expect("初始化失败");
    engine.step().expect("执行失败");

    assert!(matches!(
        engine.shortest_path_tree(),
        Err(PathError::NotConverged)
    ));
}

#[test]
fn test_reinitialize_discards_previous_run() {
    let graph = triangle(Algorithm::Dijkstra);
    let mut engine = engine_for(Algorithm::Dijkstra);
    engine
        .initialize(graph.nodes(), graph.edges(), 1)
        .expect("初始化失败");
    run_to_completion(engine.as_mut(), 100).expect("运行失败");

    engine
        .initialize(graph.nodes(), graph.edges(), 3)
        .expect("重新初始化失败");
    assert_eq!(engine.phase(), EnginePhase::Initialized);
    assert!(engine.history().is_empty());
    assert_eq!(engine.source(), Some(3));

    run_to_completion(engine.as_mut(), 100).expect("运行失败");
    assert_distances(
        engine.distances().expect("距离表应存在"),
        &[(3, 0.0), (2, 2.0), (1, 3.0)],
    );
}

#[test]
fn test_step_limit_is_enforced() {
    let graph = triangle(Algorithm::BellmanFord);
    let mut engine = engine_for(Algorithm::BellmanFord);
    engine
        .initialize(graph.nodes(), graph.edges(), 1)
        .expect("初始化失败");

    let result = run_to_completion(engine.as_mut(), 2);
    assert!(matches!(result, Err(PathError::StepLimitExceeded(2))));
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn test_algorithms_agree_on_non_negative_graphs() {
    for seed in 0..64 {
        let (nodes, edges) = random_graph(seed, false);

        let dijkstra = run_engine(Algorithm::Dijkstra, &nodes, &edges, 1);
        let bellman_ford = run_engine(Algorithm::BellmanFord, &nodes, &edges, 1);

        assert_eq!(bellman_ford.phase(), EnginePhase::Converged, "seed {}", seed);
        assert_eq!(
            dijkstra.distances(),
            bellman_ford.distances(),
            "seed {} 的距离表不一致",
            seed
        );
    }
}

#[test]
fn test_predecessor_chains_reach_source() {
    for seed in 0..64 {
        let (nodes, edges) = random_graph(seed, false);

        for algorithm in [Algorithm::Dijkstra, Algorithm::BellmanFord] {
            let engine = run_engine(algorithm, &nodes, &edges, 1);
            let distances = engine.distances().expect("距离表应存在");
            let predecessors = engine.predecessors().expect("前驱表应存在");

            for node in distances.reachable() {
                let path = predecessors
                    .path_to(1, node)
                    .unwrap_or_else(|| panic!("seed {}: 节点 {} 无法回溯到起点", seed, node));
                assert!(path.len() <= nodes.len());
                assert_eq!(path.first(), Some(&1));
            }

            let tree = engine.shortest_path_tree().expect("应能构建最短路径树");
            assert_eq!(tree.len(), distances.reachable().len() - 1, "seed {}", seed);
        }
    }
}

/// 负权自环的下界
fn self_loop_floor(edges: &[Edge], node: NodeId) -> Option<f64> {
    edges
        .iter()
        .filter(|e| e.from == node && e.is_self_loop() && e.weight < 0.0)
        .map(|e| e.weight)
        .reduce(f64::min)
}

#[test]
fn test_negative_graphs_keep_predecessor_chains() {
    let mut converged = 0;
    for seed in 0..128 {
        let (nodes, edges) = random_graph(seed, true);
        let engine = run_engine(Algorithm::BellmanFord, &nodes, &edges, 1);
        if engine.phase() != EnginePhase::Converged {
            continue;
        }
        converged += 1;

        let distances = engine.distances().expect("距离表应存在");
        let predecessors = engine.predecessors().expect("前驱表应存在");
        for node in distances.reachable() {
            match predecessors.get(node) {
                Some(_) => {
                    let path = predecessors
                        .path_to(1, node)
                        .unwrap_or_else(|| panic!("seed {}: 节点 {} 无法回溯到起点", seed, node));
                    assert!(path.len() <= nodes.len(), "seed {}", seed);
                }
                // 没有前驱的可达节点只能是起点，或者只靠自环下界
                None => assert!(
                    node == 1 || self_loop_floor(&edges, node).is_some(),
                    "seed {}: 节点 {} 可达但没有前驱",
                    seed,
                    node
                ),
            }
        }

        let tree = engine.shortest_path_tree().expect("应能构建最短路径树");
        assert!(tree.iter().all(|e| !e.is_self_loop()), "seed {}", seed);
    }
    assert!(converged > 0);
}

#[test]
fn test_self_loops_only_lower_their_own_node() {
    for seed in 0..128 {
        let (nodes, edges) = random_graph(seed, true);
        let without_loops: Vec<Edge> = edges
            .iter()
            .filter(|e| !e.is_self_loop())
            .cloned()
            .collect();

        let with = run_engine(Algorithm::BellmanFord, &nodes, &edges, 1);
        let without = run_engine(Algorithm::BellmanFord, &nodes, &without_loops, 1);
        if without.phase() != EnginePhase::Converged {
            continue;
        }
        assert_eq!(with.phase(), EnginePhase::Converged, "seed {}", seed);
        assert_eq!(with.predecessors(), without.predecessors(), "seed {}", seed);

        let with_distances = with.distances().expect("距离表应存在");
        let without_distances = without.distances().expect("距离表应存在");
        for node in nodes.iter().map(|n| n.id) {
            let path = without_distances.get(node);
            let expected = match self_loop_floor(&edges, node) {
                Some(floor) if Distance::Finite(floor) < path => Distance::Finite(floor),
                _ => path,
            };
            assert_eq!(with_distances.get(node), expected, "seed {} 节点 {}", seed, node);
        }
    }
}

#[test]
fn test_step_after_termination_is_idempotent() {
    for seed in 0..32 {
        let (nodes, edges) = random_graph(seed, true);
        let mut engine = run_engine(Algorithm::BellmanFord, &nodes, &edges, 1);

        assert!(engine.is_complete());
        let phase = engine.phase();
        let history_len = engine.history().len();
        let distances = engine.distances().cloned();

        let first = engine.step().expect("终止后 step 不应报错");
        let second = engine.step().expect("终止后 step 不应报错");

        assert_eq!(first, second);
        assert_eq!(engine.phase(), phase);
        assert_eq!(engine.history().len(), history_len);
        assert_eq!(engine.distances().cloned(), distances);
    }
}

#[test]
fn test_reachable_negative_edge_never_converges() {
    let nodes: Vec<Node> = (1..=3).map(|id| Node::new(id, id.to_string(), 0.0, 0.0)).collect();
    let edges = vec![Edge::new(1, 1, 2, 1.0), Edge::new(2, 2, 3, -4.0)];

    let mut engine = engine_for(Algorithm::BellmanFord);
    engine.initialize(&nodes, &edges, 1).expect("初始化失败");
    run_to_completion(engine.as_mut(), 1_000).expect("运行失败");

    assert_eq!(engine.phase(), EnginePhase::MaxIterationsReached);
    assert!(matches!(
        engine.shortest_path_tree(),
        Err(PathError::NotConverged)
    ));

    let last = engine.history().latest().cloned();
    assert_eq!(engine.step().ok(), last);
}

#[test]
fn test_self_loops_leave_distances_unchanged() {
    let mut graph = triangle(Algorithm::Dijkstra);
    graph.add_edge(2, 2, 0.5).expect("添加自环失败");
    graph.add_edge(3, 3, 4.0).expect("添加自环失败");

    for algorithm in [Algorithm::Dijkstra, Algorithm::BellmanFord] {
        let engine = run_engine(algorithm, graph.nodes(), graph.edges(), 1);
        assert_distances(
            engine.distances().expect("距离表应存在"),
            &[(1, 0.0), (2, 1.0), (3, 3.0)],
        );
        let tree = engine.shortest_path_tree().expect("应能构建最短路径树");
        assert!(tree.iter().all(|e| !e.is_self_loop()));
    }
}
