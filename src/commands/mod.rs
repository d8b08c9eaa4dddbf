//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `massage/`, `parsers/`, `models/`, `utils/`
//! - 子模块: massage, batch, tags, schema, query

pub mod batch;
pub mod massage;
pub mod query;
pub mod schema;
pub mod tags;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Massage(args) => massage::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Tags(args) => tags::execute(args),
        Commands::Schema => schema::execute(),
        Commands::Query(args) => query::execute(args),
    }
}
