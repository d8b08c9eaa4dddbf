//! # query 命令实现
//!
//! 在 YAML 文件的任意嵌套层级中查找键并打印所有取值。
//!
//! ## 依赖关系
//! - 使用 `cli/query.rs` 定义的参数
//! - 使用 `parsers/request.rs`, `utils/nested.rs`, `utils/output.rs`

use crate::cli::query::QueryArgs;
use crate::error::Result;
use crate::parsers::request;
use crate::utils::{nested, output};

/// 执行 query 命令
pub fn execute(args: QueryArgs) -> Result<()> {
    let doc = request::load_yaml_file(&args.file)?;
    let found = nested::find_key_in_dicts(&doc, &args.key);

    if found.is_empty() {
        output::print_warning(&format!(
            "Key '{}' not found in {}",
            args.key,
            args.file.display()
        ));
        return Ok(());
    }

    for value in found {
        let text = serde_yaml::to_string(value)?;
        println!("{}: {}", args.key, text.trim_end());
    }

    Ok(())
}
