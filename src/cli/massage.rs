//! # massage 子命令 CLI 定义
//!
//! 将单个 YAML 弛豫请求转换为 INCAR 参数
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/batch.rs` 使用
//! - 参数传递给 `commands/massage.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// VASP INCAR syntax
    Incar,
    /// YAML mapping
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Incar => write!(f, "incar"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// 转换选项（massage 与 batch 共用）
#[derive(Args, Debug, Clone)]
pub struct TranslateArgs {
    /// Alternative reference table of valid INCAR tags (YAML)
    #[arg(long, env = "VASP_MASSAGE_TAGS")]
    pub tags: Option<PathBuf>,

    /// INCAR template whose tags are used as raw overrides (request file wins)
    #[arg(long)]
    pub incar: Option<PathBuf>,

    /// Fill missing relax.* options with their schema defaults
    #[arg(long, default_value_t = false)]
    pub defaults: bool,

    /// Drop raw overrides that are not in the reference table instead of failing
    #[arg(long, default_value_t = false)]
    pub lenient: bool,
}

/// massage 子命令参数
#[derive(Args, Debug)]
pub struct MassageArgs {
    /// Relaxation request file (YAML)
    pub request: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "incar")]
    pub format: OutputFormat,

    /// Suppress warnings from the translation
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    #[command(flatten)]
    pub translate: TranslateArgs,
}
