//! 步骤表投影
//!
//! 把快照展开成 (步骤, 节点名, 代价, 前驱节点名) 行，供表格展示

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::core::distance::Distance;
use crate::core::model::{Node, NodeId};
use crate::core::snapshot::StepSnapshot;

/// 展示层的一行
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct StepRow {
    #[tabled(rename = "Step")]
    pub step: usize,
    #[tabled(rename = "Node")]
    pub node: String,
    #[tabled(rename = "Cost")]
    pub cost: Distance,
    #[tabled(rename = "Previous")]
    pub previous: String,
}

fn label_for(nodes: &[Node], id: NodeId) -> String {
    nodes
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.label.clone())
        .unwrap_or_else(|| id.to_string())
}

/// 按节点顺序展开一个快照
pub fn step_rows(snapshot: &StepSnapshot, nodes: &[Node]) -> Vec<StepRow> {
    nodes
        .iter()
        .map(|node| StepRow {
            step: snapshot.step,
            node: node.label.clone(),
            cost: snapshot.distances.get(node.id),
            previous: snapshot
                .predecessors
                .get(node.id)
                .map(|p| label_for(nodes, p))
                .unwrap_or_else(|| "None".to_string()),
        })
        .collect()
}

/// 渲染一组快照为文本表格
pub fn render_steps<'a, I>(snapshots: I, nodes: &[Node]) -> String
where
    I: IntoIterator<Item = &'a StepSnapshot>,
{
    let rows: Vec<StepRow> = snapshots
        .into_iter()
        .flat_map(|snapshot| step_rows(snapshot, nodes))
        .collect();
    Table::new(rows).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::{DistanceTable, PredecessorTable};
    use crate::core::snapshot::Processed;

    fn sample() -> (StepSnapshot, Vec<Node>) {
        let nodes = vec![
            Node::new(1, "A", 0.0, 0.0),
            Node::new(2, "B", 0.0, 0.0),
            Node::new(3, "C", 0.0, 0.0),
        ];
        let mut distances = DistanceTable::initial([1, 2, 3], 1);
        distances.set(2, Distance::Finite(1.0));
        let mut predecessors = PredecessorTable::initial([1, 2, 3]);
        predecessors.set(2, 1);

        let snapshot = StepSnapshot {
            step: 0,
            processed: Processed::Node { id: 1 },
            distances,
            predecessors,
            updated: vec![2],
        };
        (snapshot, nodes)
    }

    #[test]
    fn test_step_rows() {
        let (snapshot, nodes) = sample();
        let rows = step_rows(&snapshot, &nodes);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].previous, "None");
        assert_eq!(rows[1].cost, Distance::Finite(1.0));
        assert_eq!(rows[1].previous, "A");
        assert_eq!(rows[2].cost.to_string(), "∞");
    }

    #[test]
    fn test_render_steps_contains_headers() {
        let (snapshot, nodes) = sample();
        let table = render_steps([&snapshot], &nodes);

        assert!(table.contains("Step"));
        assert!(table.contains("Previous"));
        assert!(table.contains('∞'));
    }
}
