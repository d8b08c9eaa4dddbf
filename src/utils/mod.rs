//! # 工具函数模块
//!
//! 提供终端输出、嵌套映射查找等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `massage/context.rs` 使用
//! - 子模块: output, nested

pub mod nested;
pub mod output;
