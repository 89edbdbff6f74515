//! 算法模块
//!
//! 分步执行的最短路径引擎及其配套的历史、树重建和表格投影

pub mod bellman_ford;
pub mod dijkstra;
pub mod engine;
pub mod history;
pub mod table;
pub mod tree;

// 重新导出常用类型
pub use bellman_ford::BellmanFordState;
pub use dijkstra::DijkstraState;
pub use engine::{
    engine_for, run_to_completion, Advance, BellmanFordEngine, DijkstraEngine, RunInput,
    StepEngine, StepState, SteppedEngine,
};
pub use history::StepHistory;
pub use table::{render_steps, step_rows, StepRow};
pub use tree::shortest_path_tree;
