//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `massage`: 转换单个弛豫请求
//! - `batch`: 批量转换目录中的请求
//! - `tags`: 列出参考参数表
//! - `schema`: 列出 `relax.*` 选项
//! - `query`: 在请求文件中查找键
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: massage, batch, tags, query

pub mod batch;
pub mod massage;
pub mod query;
pub mod tags;

use clap::{Parser, Subcommand};

/// vasp-massage - VASP 弛豫参数转换工具
#[derive(Parser)]
#[command(name = "vasp-massage")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Translate declarative VASP relaxation settings into INCAR parameters", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Translate one relaxation request into INCAR parameters
    Massage(massage::MassageArgs),

    /// Translate every request file in a directory
    Batch(batch::BatchArgs),

    /// List the valid INCAR parameters of the reference table
    Tags(tags::TagsArgs),

    /// Show the relax.* options with their defaults
    Schema,

    /// Find every value stored under a key in a request file
    Query(query::QueryArgs),
}
