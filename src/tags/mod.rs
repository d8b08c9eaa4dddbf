//! # INCAR 参考参数表
//!
//! 加载 `tags.yml`：列出所有合法的 INCAR 参数名及说明。
//! 转换只使用键集合（保持文件中的顺序），说明信息仅用于展示。
//!
//! 内置表在编译期嵌入，首次访问时解析一次，之后在整个进程内只读共享。
//!
//! ## 依赖关系
//! - 被 `massage/`, `commands/tags.rs` 使用
//! - 使用 `serde_yaml` 解析

use crate::error::{MassageError, Result};

use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const PACKAGED_TAGS: &str = include_str!("tags.yml");

lazy_static! {
    static ref PACKAGED: TagTable =
        TagTable::from_yaml_str(PACKAGED_TAGS, "tags.yml").expect("packaged tags.yml is valid");
}

/// 参数说明
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagInfo {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

/// 合法参数表
#[derive(Debug, Clone)]
pub struct TagTable {
    entries: Vec<(String, TagInfo)>,
    index: HashSet<String>,
}

impl TagTable {
    /// 内置参考表
    pub fn packaged() -> &'static TagTable {
        &PACKAGED
    }

    /// 从文件加载参考表
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MassageError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// 从 YAML 字符串解析，键统一为小写，保持文件顺序
    pub fn from_yaml_str(content: &str, source: &str) -> Result<Self> {
        let parse_error = |reason: String| MassageError::ParseError {
            format: "tags".to_string(),
            path: source.to_string(),
            reason,
        };

        let mapping: serde_yaml::Mapping = serde_yaml::from_str(content)?;
        let mut entries = Vec::with_capacity(mapping.len());
        let mut index = HashSet::with_capacity(mapping.len());

        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| parse_error(format!("non-string tag name {:?}", key)))?
                .to_lowercase();
            let info: TagInfo = if value.is_null() {
                TagInfo::default()
            } else {
                serde_yaml::from_value(value)?
            };
            if !index.insert(name.clone()) {
                return Err(parse_error(format!("duplicate tag '{}'", name)));
            }
            entries.push((name, info));
        }

        if entries.is_empty() {
            return Err(parse_error("no tags defined".to_string()));
        }

        Ok(TagTable { entries, index })
    }

    /// 参数名（文件顺序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn entries(&self) -> &[(String, TagInfo)] {
        &self.entries
    }

    /// 是否为合法参数（大小写不敏感）
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
