//! # schema 命令实现
//!
//! 列出 `relax.*` 选项、类型、默认值与说明。
//!
//! ## 依赖关系
//! - 使用 `models/relax.rs`
//! - 使用 `utils/output.rs`

use crate::error::Result;
use crate::models::RELAX_SCHEMA;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct SchemaRow {
    #[tabled(rename = "Option")]
    option: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Default")]
    default: &'static str,
    #[tabled(rename = "Description")]
    help: &'static str,
}

/// 执行 schema 命令
pub fn execute() -> Result<()> {
    output::print_header("Relaxation Options");

    let rows: Vec<SchemaRow> = RELAX_SCHEMA
        .iter()
        .map(|entry| SchemaRow {
            option: format!("relax.{}", entry.name),
            kind: entry.kind,
            default: entry.default.unwrap_or("-"),
            help: entry.help,
        })
        .collect();

    println!("{}", Table::new(&rows));
    output::print_info("Defaults are only applied with `massage --defaults` / `batch --defaults`.");

    Ok(())
}
