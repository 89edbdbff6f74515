//! 步骤历史
//!
//! 只追加的快照日志，外加一个"已展示到第几步"的游标，
//! 展示层据此实现逐步显示和来回拖动。

use serde::Serialize;

use crate::core::snapshot::StepSnapshot;

/// 快照历史
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepHistory {
    snapshots: Vec<StepSnapshot>,
    #[serde(skip)]
    revealed: usize,
}

impl StepHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只有引擎可以追加快照
    pub(crate) fn push(&mut self, snapshot: StepSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&StepSnapshot> {
        self.snapshots.get(step)
    }

    pub fn latest(&self) -> Option<&StepSnapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepSnapshot> + '_ {
        self.snapshots.iter()
    }

    pub fn as_slice(&self) -> &[StepSnapshot] {
        &self.snapshots
    }

    /// 已展示的快照数量
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// 已展示的快照
    pub fn visible(&self) -> &[StepSnapshot] {
        &self.snapshots[..self.revealed]
    }

    /// 多展示一步，返回新展示的快照；已全部展示时返回 `None`
    pub fn reveal_next(&mut self) -> Option<&StepSnapshot> {
        if self.revealed >= self.snapshots.len() {
            return None;
        }
        self.revealed += 1;
        self.snapshots.get(self.revealed - 1)
    }

    /// 展示到第 `step` 步（含），超出范围时截到最后一步
    pub fn scrub_to(&mut self, step: usize) -> Option<&StepSnapshot> {
        if self.snapshots.is_empty() {
            self.revealed = 0;
            return None;
        }
        let step = step.min(self.snapshots.len() - 1);
        self.revealed = step + 1;
        self.snapshots.get(step)
    }

    pub fn reveal_all(&mut self) {
        self.revealed = self.snapshots.len();
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed >= self.snapshots.len()
    }
}
