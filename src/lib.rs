//! pathstep - 分步执行的最短路径算法引擎
//!
//! 用户编辑一个小型带权图，然后逐步执行 Dijkstra（链路状态）或
//! Bellman-Ford（距离向量）算法，观察每一步后的距离表和前驱表。
//! 展示层只需要 initialize / step / is_complete 三个操作，
//! 以及收敛后的最短路径树。

pub mod config;
pub mod core;
pub mod graph;
pub mod services;
pub mod utils;

pub use crate::core::{
    Algorithm, Distance, DistanceTable, Edge, EdgeId, EnginePhase, Node, NodeId, PathError,
    PathResult, PredecessorTable, Processed, StepSnapshot,
};
pub use crate::graph::{Graph, GraphDocument};
pub use crate::services::algorithm::{
    engine_for, run_to_completion, BellmanFordEngine, DijkstraEngine, StepEngine, StepHistory,
};
