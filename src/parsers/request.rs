//! # 弛豫请求文件解析器
//!
//! 读取 YAML 格式的弛豫请求。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/relax.rs`

use crate::error::{MassageError, Result};
use crate::models::RelaxationRequest;

use std::fs;
use std::path::Path;

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MassageError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|e| MassageError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

fn parse_yaml(content: &str, name: &str) -> Result<serde_yaml::Value> {
    serde_yaml::from_str(content).map_err(|e| MassageError::ParseError {
        format: "yaml".to_string(),
        path: name.to_string(),
        reason: e.to_string(),
    })
}

/// 读取 YAML 文档
pub fn load_yaml_file(path: &Path) -> Result<serde_yaml::Value> {
    parse_yaml(&read_file(path)?, &path.display().to_string())
}

/// 解析弛豫请求文件
pub fn parse_request_file(path: &Path) -> Result<RelaxationRequest> {
    parse_request_content(&read_file(path)?, &path.display().to_string())
}

/// 从字符串内容解析弛豫请求
pub fn parse_request_content(content: &str, name: &str) -> Result<RelaxationRequest> {
    RelaxationRequest::from_yaml_value(parse_yaml(content, name)?, name)
}
