//! 测试数据生成模块
//!
//! 提供规范场景图和可复现的随机图

use pathstep::{Algorithm, Edge, Graph, Node};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 三角形：1-2 (1), 2-3 (2), 1-3 (5)
pub fn triangle(algorithm: Algorithm) -> Graph {
    let mut graph = Graph::new(algorithm);
    let a = graph.add_node("A", 0.0, 0.0).id;
    let b = graph.add_node("B", 100.0, 0.0).id;
    let c = graph.add_node("C", 50.0, 80.0).id;
    graph.add_edge(a, b, 1.0).expect("添加边失败");
    graph.add_edge(b, c, 2.0).expect("添加边失败");
    graph.add_edge(a, c, 5.0).expect("添加边失败");
    graph
}

/// 两个连通分量：{1, 2, 3} 与孤立的 4
pub fn disconnected(algorithm: Algorithm) -> Graph {
    let mut graph = triangle(algorithm);
    graph.add_node("D", 200.0, 200.0);
    graph
}

/// 可复现的随机无向图
///
/// `allow_negative` 为 true 时包含负权边和至少一个负权自环。
/// 权重取整数，保证两种算法的浮点求和结果完全一致
pub fn random_graph(seed: u64, allow_negative: bool) -> (Vec<Node>, Vec<Edge>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let node_count = rng.gen_range(1..=8u64);
    let edge_count = rng.gen_range(0..=12u64);

    let nodes: Vec<Node> = (1..=node_count)
        .map(|id| Node::new(id, format!("N{}", id), 0.0, 0.0))
        .collect();

    let mut edges: Vec<Edge> = (1..=edge_count)
        .map(|id| {
            let from = rng.gen_range(1..=node_count);
            let to = rng.gen_range(1..=node_count);
            let low = if allow_negative { -3 } else { 0 };
            let weight = rng.gen_range(low..=9) as f64;
            Edge::new(id, from, to, weight)
        })
        .collect();

    // 允许负权时额外放一个负权自环
    if allow_negative {
        let node = rng.gen_range(1..=node_count);
        let weight = rng.gen_range(-5..=-1) as f64;
        edges.push(Edge::new(edge_count + 1, node, node, weight));
    }

    (nodes, edges)
}
