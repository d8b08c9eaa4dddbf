//! # vasp-massage - VASP 弛豫参数转换工具
//!
//! 将高层次的弛豫请求（自由度、算法、收敛阈值、步数）翻译为
//! VASP 的 IBRION / EDIFFG / NSW / ISIF 参数，并叠加用户的原始覆盖参数。
//!
//! ## 子命令
//! - `massage` - 转换单个请求，输出 INCAR 或 YAML
//! - `batch`   - 并行批量转换请求文件
//! - `tags`    - 列出参考参数表
//! - `schema`  - 显示 `relax.*` 选项及默认值
//! - `query`   - 在 YAML 文档中按键名递归查找
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── massage/  (参数推导引擎)
//!   │     ├── parsers/  (请求与 INCAR 解析)
//!   │     ├── tags/     (参考参数表)
//!   │     ├── batch/    (批量执行)
//!   │     └── models/   (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod massage;
mod models;
mod parsers;
mod tags;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        match e.kind() {
            Some(kind) => utils::output::print_error(&format!("{} ({})", e, kind.exit_code())),
            None => utils::output::print_error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
