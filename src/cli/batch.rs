//! # batch 子命令 CLI 定义
//!
//! 批量转换目录中的弛豫请求，为每个请求生成 INCAR
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::massage::TranslateArgs;
use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory (or single file) containing request files
    pub input: PathBuf,

    /// Output directory for INCAR files (default: next to each request)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Glob pattern(s) for request files, comma-separated
    #[arg(short, long, default_value = "*.yaml,*.yml")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing INCAR files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Write a CSV summary of all translations
    #[arg(long)]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub translate: TranslateArgs,
}
