//! 图的基础数据类型
//!
//! 节点与边都带有外部分配的整数ID；坐标只用于展示，算法不读取

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点ID，单调递增且永不复用
pub type NodeId = u64;

/// 边ID，使用独立的计数器分配
pub type EdgeId = u64;

/// 边权重
pub type Weight = f64;

/// 图节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            label: label.into(),
            x,
            y,
        }
    }
}

/// 图的边
///
/// 两个引擎都把边视为无向边：可以从任意一个端点松弛到另一个端点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self {
            id,
            from,
            to,
            weight,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// 是否以 `node` 为端点
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// 是否连接 `a` 和 `b`（不区分方向）
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// 给定一个端点，返回另一个端点；`node` 不是端点时返回 `None`
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

/// 可视化的两种最短路径算法
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// 链路状态（Dijkstra）
    #[default]
    Dijkstra,
    /// 距离向量（Bellman-Ford）
    BellmanFord,
}

impl Algorithm {
    /// 该算法是否允许负权边
    pub fn allows_negative_weights(self) -> bool {
        matches!(self, Algorithm::BellmanFord)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => write!(f, "dijkstra"),
            Algorithm::BellmanFord => write!(f, "bellman-ford"),
        }
    }
}
