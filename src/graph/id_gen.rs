//! ID生成器
//!
//! 节点和边各用一个计数器，ID从1开始单调递增，删除后也不会复用

/// 顺序ID生成器
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// 创建新的ID生成器，使用指定的初始值
    pub fn new(init: u64) -> Self {
        Self { next: init }
    }

    /// 生成下一个ID
    pub fn id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// 确保之后生成的ID都大于 `used`
    pub fn advance_past(&mut self, used: u64) {
        if used >= self.next {
            self.next = used + 1;
        }
    }

    /// 获取下一个将要分配的ID
    pub fn current_value(&self) -> u64 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
