//! 步骤快照与引擎阶段

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::distance::{DistanceTable, PredecessorTable};
use crate::core::model::{EdgeId, NodeId};

/// 一步中被处理的对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Processed {
    /// Dijkstra 本步确定的节点
    Node { id: NodeId },
    /// Bellman-Ford 本步松弛的边及其所在轮次
    Edge { id: EdgeId, pass: usize },
    /// 空操作快照（初始化即收敛时返回）
    Nothing,
}

impl fmt::Display for Processed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Processed::Node { id } => write!(f, "node {}", id),
            Processed::Edge { id, pass } => write!(f, "edge {} (pass {})", id, pass),
            Processed::Nothing => write!(f, "-"),
        }
    }
}

/// 某一步结束后的表状态
///
/// 快照追加到历史后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub step: usize,
    pub processed: Processed,
    pub distances: DistanceTable,
    pub predecessors: PredecessorTable,
    /// 本步距离或前驱发生变化的节点，按ID升序
    pub updated: Vec<NodeId>,
}

impl StepSnapshot {
    /// 本步是否改变了距离表或前驱表
    pub fn is_productive(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// 引擎状态机：`Idle → Initialized → Stepping → Converged`
///
/// Bellman-Ford 另有终止状态 `MaxIterationsReached`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    Idle,
    Initialized,
    Stepping,
    Converged,
    MaxIterationsReached,
}

impl EnginePhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EnginePhase::Converged | EnginePhase::MaxIterationsReached
        )
    }
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnginePhase::Idle => "idle",
            EnginePhase::Initialized => "initialized",
            EnginePhase::Stepping => "stepping",
            EnginePhase::Converged => "converged",
            EnginePhase::MaxIterationsReached => "max iterations reached",
        };
        write!(f, "{}", name)
    }
}
