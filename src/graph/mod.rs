//! 图模型
//!
//! 保存用户编辑的节点和边，引擎在运行开始时读取它的快照。
//! 边按加入顺序保存，Bellman-Ford 依赖这个顺序决定松弛次序。

pub mod id_gen;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::GraphError;
use crate::core::model::{Algorithm, Edge, EdgeId, Node, NodeId, Weight};
pub use id_gen::IdGenerator;

/// 可序列化的图文档，用于从文件加载或导出图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// 带权图
#[derive(Debug, Clone, Default)]
pub struct Graph {
    algorithm: Algorithm,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_ids: IdGenerator,
    edge_ids: IdGenerator,
}

impl Graph {
    /// 创建空图；`algorithm` 决定加边时是否允许负权重
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// 从已有的节点和边恢复图
    ///
    /// 不做引用完整性校验，悬空边由引擎在遍历时跳过。
    /// 两个计数器越过已有的最大ID，保证之后分配的ID不会重复。
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, algorithm: Algorithm) -> Self {
        let mut node_ids = IdGenerator::default();
        let mut edge_ids = IdGenerator::default();
        for node in &nodes {
            node_ids.advance_past(node.id);
        }
        for edge in &edges {
            edge_ids.advance_past(edge.id);
        }

        Self {
            algorithm,
            nodes,
            edges,
            node_ids,
            edge_ids,
        }
    }

    pub fn from_document(document: GraphDocument, algorithm: Algorithm) -> Self {
        Self::from_parts(document.nodes, document.edges, algorithm)
    }

    /// 加载外部文档时使用：边权重要通过与 `add_edge` 相同的检查
    pub fn try_from_document(
        document: GraphDocument,
        algorithm: Algorithm,
    ) -> Result<Self, GraphError> {
        for edge in &document.edges {
            check_weight(edge.weight, algorithm)?;
        }
        Ok(Self::from_document(document, algorithm))
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn label_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    /// 添加节点并分配新ID
    pub fn add_node(&mut self, label: impl Into<String>, x: f64, y: f64) -> Node {
        let node = Node::new(self.node_ids.id(), label, x, y);
        debug!("添加节点 {} ({})", node.id, node.label);
        self.nodes.push(node.clone());
        node
    }

    /// 删除节点，同时删除所有与它相连的边
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(GraphError::NodeNotFound(id))?;
        let node = self.nodes.remove(index);

        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        debug!(
            "删除节点 {}，级联删除 {} 条边",
            id,
            before - self.edges.len()
        );
        Ok(node)
    }

    /// 添加边并分配新ID
    ///
    /// 端点必须存在，权重必须是有限数；Dijkstra 模式下拒绝负权重
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<Edge, GraphError> {
        if !self.contains_node(from) || !self.contains_node(to) {
            return Err(GraphError::DanglingEndpoint { from, to });
        }
        check_weight(weight, self.algorithm)?;

        let edge = Edge::new(self.edge_ids.id(), from, to, weight);
        debug!("添加边 {}: {} -- {} ({})", edge.id, from, to, weight);
        self.edges.push(edge.clone());
        Ok(edge)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(GraphError::EdgeNotFound(id))?;
        Ok(self.edges.remove(index))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn check_weight(weight: Weight, algorithm: Algorithm) -> Result<(), GraphError> {
    if !weight.is_finite() {
        return Err(GraphError::InvalidWeight(weight));
    }
    if weight < 0.0 && !algorithm.allows_negative_weights() {
        return Err(GraphError::NegativeWeight(weight));
    }
    Ok(())
}
