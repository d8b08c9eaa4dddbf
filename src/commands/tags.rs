//! # tags 命令实现
//!
//! 以表格形式列出参考参数表，并标出由规则推导的参数。
//!
//! ## 依赖关系
//! - 使用 `cli/tags.rs` 定义的参数
//! - 使用 `tags/`, `massage/rules.rs`
//! - 使用 `utils/output.rs`

use crate::cli::tags::TagsArgs;
use crate::error::Result;
use crate::massage::rules;
use crate::tags::TagTable;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 参数表行
#[derive(Debug, Clone, Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Derived")]
    derived: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// 执行 tags 命令
pub fn execute(args: TagsArgs) -> Result<()> {
    let owned;
    let table = match args.tags {
        Some(ref path) => {
            owned = TagTable::from_file(path)?;
            &owned
        }
        None => TagTable::packaged(),
    };

    let rows = tag_rows(table, args.filter.as_deref());

    output::print_header(&format!("Valid INCAR Parameters ({} of {})", rows.len(), table.len()));
    if rows.is_empty() {
        output::print_warning("No tags match the filter.");
        return Ok(());
    }
    println!("{}", Table::new(&rows));

    Ok(())
}

fn tag_rows(table: &TagTable, filter: Option<&str>) -> Vec<TagRow> {
    let filter = filter.map(|f| f.to_lowercase());
    let derived: Vec<&str> = rules::derived_names().collect();

    table
        .entries()
        .iter()
        .filter(|(name, _)| filter.as_deref().map_or(true, |f| name.contains(f)))
        .map(|(name, info)| TagRow {
            tag: name.to_uppercase(),
            kind: info.kind.clone().unwrap_or_default(),
            derived: if derived.contains(&name.as_str()) {
                "yes".to_string()
            } else {
                String::new()
            },
            description: info.description.clone().unwrap_or_default(),
        })
        .collect()
}
