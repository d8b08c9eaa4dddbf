//! # query 子命令 CLI 定义
//!
//! 在请求文件中查找键
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/query.rs`

use clap::Args;
use std::path::PathBuf;

/// query 子命令参数
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// YAML file to search
    pub file: PathBuf,

    /// Key to look for at any nesting depth
    pub key: String,
}
