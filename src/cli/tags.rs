//! # tags 子命令 CLI 定义
//!
//! 列出参考参数表
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/tags.rs`

use clap::Args;
use std::path::PathBuf;

/// tags 子命令参数
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Only show tags whose name contains this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Alternative reference table of valid INCAR tags (YAML)
    #[arg(long, env = "VASP_MASSAGE_TAGS")]
    pub tags: Option<PathBuf>,
}
