//! 自定义断言辅助模块

use pathstep::{Distance, DistanceTable, NodeId};

/// 断言距离表与期望的有限距离一致
pub fn assert_distances(table: &DistanceTable, expected: &[(NodeId, f64)]) {
    for &(node, distance) in expected {
        assert_eq!(
            table.get(node),
            Distance::Finite(distance),
            "节点 {} 的距离不匹配",
            node
        );
    }
}

/// 断言节点不可达
pub fn assert_unreachable(table: &DistanceTable, node: NodeId) {
    assert_eq!(
        table.get(node),
        Distance::Unreachable,
        "节点 {} 应该不可达",
        node
    );
}
