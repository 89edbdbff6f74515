//! Dijkstra算法模块
//!
//! 链路状态风格的分步最短路径：每一步从前沿中取出距离最小的未访问节点，
//! 松弛它的所有关联边（无向），然后记录快照。
//! 距离相同时取节点ID最小者，保证结果可复现。

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use crate::core::distance::{Distance, DistanceTable, PredecessorTable};
use crate::core::error::{PathError, PathResult};
use crate::core::model::{Algorithm, Edge, NodeId, Weight};
use crate::core::snapshot::{EnginePhase, Processed, StepSnapshot};
use crate::services::algorithm::engine::{Advance, RunInput, StepState};

/// 节点距离结构体，用于优先队列
///
/// 比较顺序反转以得到最小堆；距离相同时ID小的优先
#[derive(Debug, Clone, Copy)]
struct NodeDistance {
    node: NodeId,
    distance: Weight,
}

impl PartialEq for NodeDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeDistance {}

impl Ord for NodeDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for NodeDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 一次 Dijkstra 运行的工作状态
#[derive(Debug, Clone)]
pub struct DijkstraState {
    edges: Vec<Edge>,
    distances: DistanceTable,
    predecessors: PredecessorTable,
    unvisited: BTreeSet<NodeId>,
    frontier: BinaryHeap<NodeDistance>,
}

impl DijkstraState {
    pub fn unvisited(&self) -> &BTreeSet<NodeId> {
        &self.unvisited
    }

    /// 取出距离最小的未访问节点，跳过堆中的过期条目
    ///
    /// 前沿只包含可达节点，堆空说明剩余节点都不可达
    fn pop_closest(&mut self) -> Option<NodeId> {
        while let Some(NodeDistance { node, distance }) = self.frontier.pop() {
            if !self.unvisited.contains(&node) {
                continue;
            }
            if self.distances.get(node) != Distance::Finite(distance) {
                continue;
            }
            return Some(node);
        }
        None
    }
}

impl StepState for DijkstraState {
    const ALGORITHM: Algorithm = Algorithm::Dijkstra;

    fn start(input: RunInput) -> PathResult<Self> {
        if let Some(edge) = input.edges.iter().find(|e| e.weight < 0.0) {
            return Err(PathError::NegativeWeight {
                edge: edge.id,
                weight: edge.weight,
            });
        }

        let RunInput {
            node_ids,
            edges,
            source,
        } = input;

        let mut state = Self {
            edges,
            distances: DistanceTable::initial(node_ids.iter().copied(), source),
            predecessors: PredecessorTable::initial(node_ids.iter().copied()),
            unvisited: node_ids.into_iter().collect(),
            frontier: BinaryHeap::new(),
        };

        // 只有起点一个节点时直接视为已确定，初始化即收敛
        if state.unvisited.len() == 1 {
            state.unvisited.remove(&source);
        } else {
            state.frontier.push(NodeDistance {
                node: source,
                distance: 0.0,
            });
        }

        Ok(state)
    }

    fn advance(&mut self, step: usize) -> Advance {
        if self.unvisited.is_empty() {
            return Advance::Finished(EnginePhase::Converged);
        }

        let Some(current) = self.pop_closest() else {
            return Advance::Finished(EnginePhase::Converged);
        };
        let base = self.distances.get(current);

        self.unvisited.remove(&current);

        let mut updated = BTreeSet::new();
        for edge in self.edges.iter().filter(|e| e.touches(current)) {
            // 自环的另一端是刚访问过的自己，会在这里被跳过
            let Some(neighbor) = edge.opposite(current) else {
                continue;
            };
            if !self.unvisited.contains(&neighbor) {
                continue;
            }

            let candidate = base.extend(edge.weight);
            if candidate.improves_on(&self.distances.get(neighbor)) {
                self.distances.set(neighbor, candidate);
                self.predecessors.set(neighbor, current);
                updated.insert(neighbor);
                if let Distance::Finite(distance) = candidate {
                    self.frontier.push(NodeDistance {
                        node: neighbor,
                        distance,
                    });
                }
            }
        }

        Advance::Stepped(StepSnapshot {
            step,
            processed: Processed::Node { id: current },
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            updated: updated.into_iter().collect(),
        })
    }

    fn is_exhausted(&self) -> bool {
        self.unvisited.is_empty()
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
