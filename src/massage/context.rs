//! # 计算上下文
//!
//! 转换过程只通过上下文报告警告与失败，不依赖它做流程控制。
//! 失败本身总是作为错误返回给调用方，由调用方负责展示；
//! `fail` 只供需要记录作业状态的宿主使用，终端与收集型上下文忽略它。
//!
//! ## 依赖关系
//! - 被 `massage/mod.rs`, `massage/rules.rs`, `commands/` 使用
//! - 使用 `utils/output.rs`

use crate::error::FailureKind;
use crate::utils::output;

use std::cell::RefCell;

/// 宿主计算上下文
pub trait CalcContext {
    /// 报告一条警告信息
    fn report(&self, message: &str);

    /// 标记计算失败
    fn fail(&self, _kind: FailureKind, _message: &str) {}
}

/// 终端上下文：警告直接打印
pub struct ConsoleContext {
    label: String,
}

impl ConsoleContext {
    pub fn new(label: impl Into<String>) -> Self {
        ConsoleContext {
            label: label.into(),
        }
    }
}

impl CalcContext for ConsoleContext {
    fn report(&self, message: &str) {
        output::print_warning(&format!("{}: {}", self.label, message));
    }
}

/// 静默上下文 (`--quiet`)
pub struct NullContext;

impl CalcContext for NullContext {
    fn report(&self, _message: &str) {}
}

/// 收集型上下文：保存所有消息，供批量处理汇总
#[derive(Default)]
pub struct RecordingContext {
    messages: RefCell<Vec<String>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages.into_inner()
    }
}

impl CalcContext for RecordingContext {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
