//! 分步引擎框架
//!
//! 两种算法共用同一个外壳 `SteppedEngine`：它负责状态机、快照历史、
//! 收敛后的最短路径树和终止后的幂等返回；算法本身只实现 `StepState`。

use log::{debug, info, warn};
use std::collections::BTreeSet;

use crate::core::distance::{DistanceTable, PredecessorTable};
use crate::core::error::{PathError, PathResult};
use crate::core::model::{Algorithm, Edge, Node, NodeId};
use crate::core::snapshot::{EnginePhase, Processed, StepSnapshot};
use crate::services::algorithm::bellman_ford::BellmanFordState;
use crate::services::algorithm::dijkstra::DijkstraState;
use crate::services::algorithm::history::StepHistory;
use crate::services::algorithm::tree::shortest_path_tree;

/// 引擎对外接口：initialize / step / is_complete / 最短路径树
pub trait StepEngine {
    fn algorithm(&self) -> Algorithm;

    /// 开始新一轮运行，丢弃之前的工作状态和历史
    fn initialize(&mut self, nodes: &[Node], edges: &[Edge], source: NodeId) -> PathResult<()>;

    /// 执行一步并返回本步快照；终止后重复返回最终快照
    fn step(&mut self) -> PathResult<StepSnapshot>;

    fn phase(&self) -> EnginePhase;

    fn is_complete(&self) -> bool {
        self.phase().is_terminal()
    }

    /// 收敛后的最短路径树（源点为根；有不可达节点时为森林）
    fn shortest_path_tree(&self) -> PathResult<Vec<Edge>>;

    fn history(&self) -> &StepHistory;

    fn history_mut(&mut self) -> &mut StepHistory;

    fn distances(&self) -> Option<&DistanceTable>;

    fn predecessors(&self) -> Option<&PredecessorTable>;

    fn source(&self) -> Option<NodeId>;
}

/// 单步推进的结果
#[derive(Debug)]
pub enum Advance {
    Stepped(StepSnapshot),
    Finished(EnginePhase),
}

/// 一次运行的算法状态
///
/// 状态可以克隆，从同一个状态重放会得到完全相同的快照序列
pub trait StepState: Sized {
    const ALGORITHM: Algorithm;

    fn start(input: RunInput) -> PathResult<Self>;

    /// 推进一步；`step` 是本步快照的编号
    fn advance(&mut self, step: usize) -> Advance;

    /// 已经没有任何一步能改变表
    fn is_exhausted(&self) -> bool;

    fn distances(&self) -> &DistanceTable;

    fn predecessors(&self) -> &PredecessorTable;

    fn edges(&self) -> &[Edge];
}

/// 清洗后的运行输入
#[derive(Debug, Clone)]
pub struct RunInput {
    pub node_ids: Vec<NodeId>,
    pub edges: Vec<Edge>,
    pub source: NodeId,
}

impl RunInput {
    /// 去掉重复节点ID、悬空边和权重不是有限数的边；起点必须存在
    pub fn prepare(nodes: &[Node], edges: &[Edge], source: NodeId) -> PathResult<Self> {
        let mut seen = BTreeSet::new();
        let mut node_ids = Vec::with_capacity(nodes.len());
        for node in nodes {
            if seen.insert(node.id) {
                node_ids.push(node.id);
            } else {
                warn!("忽略重复的节点ID {}", node.id);
            }
        }

        if !seen.contains(&source) {
            return Err(PathError::InvalidSourceNode(source));
        }

        let mut edge_ids = BTreeSet::new();
        let edges = edges
            .iter()
            .filter(|edge| {
                if !seen.contains(&edge.from) || !seen.contains(&edge.to) {
                    warn!(
                        "跳过悬空边 {}: {} -- {}",
                        edge.id, edge.from, edge.to
                    );
                    return false;
                }
                if !edge.weight.is_finite() {
                    warn!("跳过权重无效的边 {}: {}", edge.id, edge.weight);
                    return false;
                }
                if !edge_ids.insert(edge.id) {
                    warn!("忽略重复的边ID {}", edge.id);
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        Ok(Self {
            node_ids,
            edges,
            source,
        })
    }
}

/// 通用的分步引擎外壳
#[derive(Debug, Clone)]
pub struct SteppedEngine<S> {
    phase: EnginePhase,
    state: Option<S>,
    source: Option<NodeId>,
    history: StepHistory,
    tree: Option<Vec<Edge>>,
    terminal: Option<StepSnapshot>,
}

impl<S> Default for SteppedEngine<S> {
    fn default() -> Self {
        Self {
            phase: EnginePhase::Idle,
            state: None,
            source: None,
            history: StepHistory::default(),
            tree: None,
            terminal: None,
        }
    }
}

impl<S: StepState> SteppedEngine<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前运行状态的只读视图
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    fn finish(&mut self, phase: EnginePhase) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        self.phase = phase;
        if phase == EnginePhase::Converged {
            self.tree = Some(shortest_path_tree(state.predecessors(), state.edges()));
        }

        let terminal = match self.history.latest() {
            Some(snapshot) => snapshot.clone(),
            None => StepSnapshot {
                step: 0,
                processed: Processed::Nothing,
                distances: state.distances().clone(),
                predecessors: state.predecessors().clone(),
                updated: Vec::new(),
            },
        };
        self.terminal = Some(terminal);

        info!(
            "{} 结束: {}，共 {} 步",
            S::ALGORITHM,
            phase,
            self.history.len()
        );
    }
}

impl<S: StepState> StepEngine for SteppedEngine<S> {
    fn algorithm(&self) -> Algorithm {
        S::ALGORITHM
    }

    fn initialize(&mut self, nodes: &[Node], edges: &[Edge], source: NodeId) -> PathResult<()> {
        let input = RunInput::prepare(nodes, edges, source)?;
        let node_count = input.node_ids.len();
        let edge_count = input.edges.len();
        let state = S::start(input)?;

        *self = Self::default();
        self.state = Some(state);
        self.source = Some(source);
        self.phase = EnginePhase::Initialized;
        info!(
            "{} 初始化: {} 个节点, {} 条边, 起点 {}",
            S::ALGORITHM,
            node_count,
            edge_count,
            source
        );

        if self.state.as_ref().is_some_and(|s| s.is_exhausted()) {
            self.finish(EnginePhase::Converged);
        }
        Ok(())
    }

    fn step(&mut self) -> PathResult<StepSnapshot> {
        if self.phase.is_terminal() {
            if let Some(terminal) = &self.terminal {
                return Ok(terminal.clone());
            }
        }

        let state = self.state.as_mut().ok_or(PathError::NotInitialized)?;
        match state.advance(self.history.len()) {
            Advance::Stepped(snapshot) => {
                debug!(
                    "{} 第 {} 步: 处理 {}，更新 {:?}",
                    S::ALGORITHM,
                    snapshot.step,
                    snapshot.processed,
                    snapshot.updated
                );
                let exhausted = state.is_exhausted();
                self.phase = EnginePhase::Stepping;
                self.history.push(snapshot.clone());
                if exhausted {
                    self.finish(EnginePhase::Converged);
                }
                Ok(snapshot)
            }
            Advance::Finished(phase) => {
                self.finish(phase);
                self.terminal.clone().ok_or(PathError::NotInitialized)
            }
        }
    }

    fn phase(&self) -> EnginePhase {
        self.phase
    }

    fn shortest_path_tree(&self) -> PathResult<Vec<Edge>> {
        if self.state.is_none() {
            return Err(PathError::NotInitialized);
        }
        self.tree.clone().ok_or(PathError::NotConverged)
    }

    fn history(&self) -> &StepHistory {
        &self.history
    }

    fn history_mut(&mut self) -> &mut StepHistory {
        &mut self.history
    }

    fn distances(&self) -> Option<&DistanceTable> {
        self.state.as_ref().map(|s| s.distances())
    }

    fn predecessors(&self) -> Option<&PredecessorTable> {
        self.state.as_ref().map(|s| s.predecessors())
    }

    fn source(&self) -> Option<NodeId> {
        self.source
    }
}

/// Dijkstra（链路状态）分步引擎
pub type DijkstraEngine = SteppedEngine<DijkstraState>;

/// Bellman-Ford（距离向量）分步引擎
pub type BellmanFordEngine = SteppedEngine<BellmanFordState>;

/// 按算法创建引擎
pub fn engine_for(algorithm: Algorithm) -> Box<dyn StepEngine> {
    match algorithm {
        Algorithm::Dijkstra => Box::new(DijkstraEngine::new()),
        Algorithm::BellmanFord => Box::new(BellmanFordEngine::new()),
    }
}

/// 连续调用 `step()` 直到引擎终止，返回实际执行的步数
pub fn run_to_completion(engine: &mut dyn StepEngine, max_steps: usize) -> PathResult<usize> {
    let mut calls = 0;
    while !engine.is_complete() {
        if calls >= max_steps {
            return Err(PathError::StepLimitExceeded(max_steps));
        }
        engine.step()?;
        calls += 1;
    }
    Ok(engine.history().len())
}
