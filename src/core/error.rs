//! 统一错误处理
//!
//! ## 设计
//!
//! 1. 引擎错误 `PathError` 覆盖调用顺序错误（未初始化、未收敛）和起点校验
//! 2. 图编辑错误 `GraphError` 与配置错误 `ConfigError` 通过 `#[from]` 汇入 `PathError`
//! 3. Bellman-Ford 超出迭代上限属于终止状态（见 `EnginePhase::MaxIterationsReached`），不是错误

use thiserror::Error;

use crate::core::model::{EdgeId, NodeId, Weight};

/// 统一的结果类型
pub type PathResult<T> = Result<T, PathError>;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("引擎尚未初始化")]
    NotInitialized,

    #[error("算法尚未收敛，无法获取最短路径树")]
    NotConverged,

    #[error("起点不存在: {0}")]
    InvalidSourceNode(NodeId),

    #[error("Dijkstra 不支持负权边: 边 {edge} 权重为 {weight}")]
    NegativeWeight { edge: EdgeId, weight: Weight },

    #[error("超过步数上限 {0} 仍未结束")]
    StepLimitExceeded(usize),

    #[error("图错误: {0}")]
    Graph(#[from] GraphError),

    #[error("配置错误: {0}")]
    Config(String),
}

impl From<ConfigError> for PathError {
    fn from(err: ConfigError) -> Self {
        PathError::Config(err.to_string())
    }
}

/// 图编辑错误类型
///
/// 只在图模型的编辑操作中产生；引擎对脏数据采取跳过策略，不会返回这些错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("节点未找到: {0}")]
    NodeNotFound(NodeId),

    #[error("边未找到: {0}")]
    EdgeNotFound(EdgeId),

    #[error("边的端点不存在: {from} -> {to}")]
    DanglingEndpoint { from: NodeId, to: NodeId },

    #[error("无效的边权重: {0}")]
    InvalidWeight(Weight),

    #[error("当前算法不允许负权边: {0}")]
    NegativeWeight(Weight),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置解析错误: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("无效配置: {0}")]
    Invalid(String),
}
