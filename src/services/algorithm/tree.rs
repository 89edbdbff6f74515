//! 最短路径树重建
//!
//! 收敛后根据前驱表挑出构成最短路径树的边，供展示层高亮

use std::collections::BTreeMap;

use crate::core::distance::PredecessorTable;
use crate::core::model::{Edge, EdgeId};

/// 从前驱表重建最短路径树
///
/// 每个有前驱 `p` 的节点贡献一条连接它和 `p` 的边（不区分方向）；
/// 有平行边时取权重最小的一条，权重相同取先加入的。
/// 没有前驱的节点（起点、不可达节点）不贡献边。结果按边ID去重排序。
pub fn shortest_path_tree(predecessors: &PredecessorTable, edges: &[Edge]) -> Vec<Edge> {
    let mut tree: BTreeMap<EdgeId, Edge> = BTreeMap::new();

    for (node, predecessor) in predecessors.iter() {
        let Some(predecessor) = predecessor else {
            continue;
        };

        let best = edges
            .iter()
            .filter(|e| !e.is_self_loop() && e.connects(node, predecessor))
            .fold(None::<&Edge>, |best, edge| match best {
                Some(current) if current.weight <= edge.weight => Some(current),
                _ => Some(edge),
            });

        if let Some(edge) = best {
            tree.entry(edge.id).or_insert_with(|| edge.clone());
        }
    }

    tree.into_values().collect()
}
