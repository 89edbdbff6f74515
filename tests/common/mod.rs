//! 集成测试共享工具模块
//!
//! 提供测试图、随机图生成和断言辅助函数

#![allow(dead_code)]

pub mod assertions;
pub mod data_fixtures;

use pathstep::{run_to_completion, Algorithm, Edge, Node, StepEngine};

/// 把引擎跑到结束，失败时直接 panic
pub fn run_engine(algorithm: Algorithm, nodes: &[Node], edges: &[Edge], source: u64) -> Box<dyn StepEngine> {
    let mut engine = pathstep::engine_for(algorithm);
    engine
        .initialize(nodes, edges, source)
        .expect("初始化引擎失败");
    run_to_completion(engine.as_mut(), 10_000).expect("运行引擎失败");
    engine
}
