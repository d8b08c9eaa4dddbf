//! # 终端输出工具
//!
//! 所有面向用户的消息都经过这里：带颜色的级别标签 + 消息。
//! 提示、警告与错误写入 stderr，其余写入 stdout，
//! 这样 `massage` 输出到标准输出的 INCAR 不会混入诊断信息。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和 `massage/context.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Info,
    Warn,
    Error,
    Skip,
    Done,
}

impl Level {
    fn tag(&self) -> ColoredString {
        match self {
            Level::Ok => "[OK]".green().bold(),
            Level::Info => "[*]".blue().bold(),
            Level::Warn => "[WARN]".yellow().bold(),
            Level::Error => "[ERR]".red().bold(),
            Level::Skip => "[SKIP]".dimmed(),
            Level::Done => "[DONE]".green().bold(),
        }
    }
}

/// 按级别打印一条消息
pub fn print(level: Level, msg: &str) {
    if matches!(level, Level::Info | Level::Warn | Level::Error) {
        eprintln!("{} {}", level.tag(), msg);
    } else {
        println!("{} {}", level.tag(), msg);
    }
}

pub fn print_success(msg: &str) {
    print(Level::Ok, msg);
}

pub fn print_error(msg: &str) {
    print(Level::Error, msg);
}

pub fn print_warning(msg: &str) {
    print(Level::Warn, msg);
}

pub fn print_info(msg: &str) {
    print(Level::Info, msg);
}

pub fn print_skip(msg: &str) {
    print(Level::Skip, msg);
}

pub fn print_done(msg: &str) {
    print(Level::Done, msg);
}

const RULE_WIDTH: usize = 72;

/// 打印标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("\n{}\n  {}\n{}\n", rule.dimmed(), title.bold(), rule.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}
