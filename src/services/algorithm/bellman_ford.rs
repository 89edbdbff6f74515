//! Bellman-Ford算法模块
//!
//! 距离向量风格的分步最短路径：每一步按加边顺序松弛一条边，
//! 且两个方向都松弛（边是无向的）。一轮结束时与轮初的路径距离比较，
//! 没有变化即收敛。支持负权边，可检测可达的负权环。

use std::collections::{BTreeMap, BTreeSet};

use crate::core::distance::{Distance, DistanceTable, PredecessorTable};
use crate::core::error::PathResult;
use crate::core::model::{Algorithm, Edge, NodeId};
use crate::core::snapshot::{EnginePhase, Processed, StepSnapshot};
use crate::services::algorithm::engine::{Advance, RunInput, StepState};

/// 一次 Bellman-Ford 运行的工作状态
///
/// `paths` 只记录经边松弛得到的路径距离，松弛和收敛判断都只读它；
/// `distances` 是展示用的距离表，等于路径距离与负权自环下界中的较小者。
#[derive(Debug, Clone)]
pub struct BellmanFordState {
    edges: Vec<Edge>,
    node_count: usize,
    paths: DistanceTable,
    /// 负权自环给出的下界，只作用于自环所在节点
    floors: BTreeMap<NodeId, Distance>,
    distances: DistanceTable,
    predecessors: PredecessorTable,
    /// 下一条要处理的边
    cursor: usize,
    /// 当前轮次，从0开始
    pass: usize,
    /// 本轮开始时的路径距离
    pass_start: DistanceTable,
    /// 自环下界是否已经应用过
    seeded: bool,
}

impl BellmanFordState {
    pub fn pass(&self) -> usize {
        self.pass
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 最多执行的完整轮数：n-1 轮松弛加一轮验证
    pub fn max_passes(&self) -> usize {
        self.node_count.max(1)
    }

    /// 节点的展示距离：路径距离与自环下界取小
    fn shown(&self, node: NodeId) -> Distance {
        let path = self.paths.get(node);
        match self.floors.get(&node) {
            Some(floor) if floor.improves_on(&path) => *floor,
            _ => path,
        }
    }

    /// 同步展示距离，有变化时记入 `updated`
    fn refresh(&mut self, node: NodeId, updated: &mut BTreeSet<NodeId>) {
        let shown = self.shown(node);
        if self.distances.get(node) != shown {
            self.distances.set(node, shown);
            updated.insert(node);
        }
    }

    /// 第一步之前应用负权自环：distance[n] = min(distance[n], 自环权重)
    ///
    /// 下界不进入路径距离，也不设置前驱，因此不会传播到其他节点。
    /// 非负自环不可能缩短任何路径，直接忽略。
    fn seed_self_loops(&mut self, updated: &mut BTreeSet<NodeId>) {
        let loops: Vec<(NodeId, Distance)> = self
            .edges
            .iter()
            .filter(|e| e.is_self_loop() && e.weight < 0.0)
            .map(|e| (e.from, Distance::Finite(e.weight)))
            .collect();

        for (node, floor) in loops {
            let lower = match self.floors.get(&node) {
                Some(current) if !floor.improves_on(current) => continue,
                _ => floor,
            };
            self.floors.insert(node, lower);
            self.refresh(node, updated);
        }
    }

    /// 把 `node` 的路径距离降到 `candidate`，前驱设为 `via`
    fn lower(
        &mut self,
        node: NodeId,
        candidate: Distance,
        via: NodeId,
        updated: &mut BTreeSet<NodeId>,
    ) {
        self.paths.set(node, candidate);
        self.predecessors.set(node, via);
        updated.insert(node);
        self.refresh(node, updated);
    }

    /// 双向松弛一条边
    fn relax(&mut self, edge: &Edge, updated: &mut BTreeSet<NodeId>) {
        let forward = self.paths.get(edge.from).extend(edge.weight);
        if forward.improves_on(&self.paths.get(edge.to)) {
            self.lower(edge.to, forward, edge.from, updated);
        }

        let backward = self.paths.get(edge.to).extend(edge.weight);
        if backward.improves_on(&self.paths.get(edge.from)) {
            self.lower(edge.from, backward, edge.to, updated);
        }
    }
}

impl StepState for BellmanFordState {
    const ALGORITHM: Algorithm = Algorithm::BellmanFord;

    fn start(input: RunInput) -> PathResult<Self> {
        let RunInput {
            node_ids,
            edges,
            source,
        } = input;
        let paths = DistanceTable::initial(node_ids.iter().copied(), source);

        Ok(Self {
            edges,
            node_count: node_ids.len(),
            pass_start: paths.clone(),
            distances: paths.clone(),
            paths,
            floors: BTreeMap::new(),
            predecessors: PredecessorTable::initial(node_ids),
            cursor: 0,
            pass: 0,
            seeded: false,
        })
    }

    fn advance(&mut self, step: usize) -> Advance {
        let mut updated = BTreeSet::new();

        if !self.seeded {
            self.seeded = true;
            self.seed_self_loops(&mut updated);
        }

        // 轮次边界不算一步，直接继续处理新一轮的第一条边
        while self.cursor >= self.edges.len() {
            if self.paths == self.pass_start {
                return Advance::Finished(EnginePhase::Converged);
            }
            if self.pass + 1 >= self.max_passes() {
                return Advance::Finished(EnginePhase::MaxIterationsReached);
            }
            self.pass += 1;
            self.cursor = 0;
            self.pass_start = self.paths.clone();
        }

        let edge = self.edges[self.cursor].clone();
        self.cursor += 1;
        if !edge.is_self_loop() {
            self.relax(&edge, &mut updated);
        }

        Advance::Stepped(StepSnapshot {
            step,
            processed: Processed::Edge {
                id: edge.id,
                pass: self.pass,
            },
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            updated: updated.into_iter().collect(),
        })
    }

    fn is_exhausted(&self) -> bool {
        self.edges.is_empty()
    }

    fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    fn predecessors(&self) -> &PredecessorTable {
        &self.predecessors
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
