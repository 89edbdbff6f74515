//! 核心类型：图元素、距离表、快照和错误

pub mod distance;
pub mod error;
pub mod model;
pub mod snapshot;

pub use distance::{Distance, DistanceTable, PredecessorTable};
pub use error::{ConfigError, GraphError, PathError, PathResult};
pub use model::{Algorithm, Edge, EdgeId, Node, NodeId, Weight};
pub use snapshot::{EnginePhase, Processed, StepSnapshot};
