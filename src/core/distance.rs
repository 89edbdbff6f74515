//! 距离表与前驱表
//!
//! 不可达用显式的 `Distance::Unreachable` 表示，不依赖浮点无穷大

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::core::model::{NodeId, Weight};

/// 从起点出发的距离
///
/// 变体顺序决定了比较结果：任何有限距离都小于 `Unreachable`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    Finite(Weight),
    #[default]
    Unreachable,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0.0);

    pub fn is_reachable(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn value(&self) -> Option<Weight> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Unreachable => None,
        }
    }

    /// 沿一条权重为 `weight` 的边延伸；不可达加任何权重仍不可达
    pub fn extend(&self, weight: Weight) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d + weight),
            Distance::Unreachable => Distance::Unreachable,
        }
    }

    /// 严格小于比较，用于松弛判断
    pub fn improves_on(&self, other: &Distance) -> bool {
        self < other
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Unreachable => write!(f, "∞"),
        }
    }
}

/// 节点ID到距离的映射，按节点ID有序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceTable {
    entries: BTreeMap<NodeId, Distance>,
}

impl DistanceTable {
    /// 起点为0，其余节点不可达
    pub fn initial<I>(nodes: I, source: NodeId) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut entries: BTreeMap<NodeId, Distance> = nodes
            .into_iter()
            .map(|id| (id, Distance::Unreachable))
            .collect();
        entries.insert(source, Distance::ZERO);
        Self { entries }
    }

    /// 未登记的节点视为不可达
    pub fn get(&self, node: NodeId) -> Distance {
        self.entries
            .get(&node)
            .copied()
            .unwrap_or(Distance::Unreachable)
    }

    pub fn set(&mut self, node: NodeId, distance: Distance) {
        self.entries.insert(node, distance);
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Distance)> + '_ {
        self.entries.iter().map(|(id, d)| (*id, *d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 所有可达节点
    pub fn reachable(&self) -> BTreeSet<NodeId> {
        self.iter()
            .filter(|(_, d)| d.is_reachable())
            .map(|(id, _)| id)
            .collect()
    }
}

/// 节点ID到前驱节点的映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredecessorTable {
    entries: BTreeMap<NodeId, Option<NodeId>>,
}

impl PredecessorTable {
    /// 所有节点的前驱初始化为空
    pub fn initial<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self {
            entries: nodes.into_iter().map(|id| (id, None)).collect(),
        }
    }

    pub fn get(&self, node: NodeId) -> Option<NodeId> {
        self.entries.get(&node).copied().flatten()
    }

    pub fn set(&mut self, node: NodeId, predecessor: NodeId) {
        self.entries.insert(node, Some(predecessor));
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Option<NodeId>)> + '_ {
        self.entries.iter().map(|(id, p)| (*id, *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 沿前驱链从 `target` 回溯到 `source`，返回正向路径
    ///
    /// 链中断、出现环或跳数超过节点数时返回 `None`
    pub fn path_to(&self, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![target];
        let mut seen = BTreeSet::from([target]);
        let mut current = target;

        while current != source {
            let predecessor = self.get(current)?;
            if !seen.insert(predecessor) || path.len() > self.entries.len() {
                return None;
            }
            path.push(predecessor);
            current = predecessor;
        }

        path.reverse();
        Some(path)
    }
}
