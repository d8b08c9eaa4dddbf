//! # 参数值与参数集合数据模型
//!
//! `ParamValue` 表示 INCAR 中的单个标量（或列表）值，
//! `ParameterSet` 是转换结果：小写参数名到值的有序映射。
//!
//! ## 依赖关系
//! - 被 `massage/`, `parsers/`, `commands/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// INCAR 参数值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
}

/// 以 INCAR 语法显示
impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(true) => write!(f, ".TRUE."),
            ParamValue::Bool(false) => write!(f, ".FALSE."),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Str(s) => write!(f, "{}", s),
            ParamValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

/// 转换后的参数集合
///
/// 键统一为小写；按键名排序，保证同一输入的输出逐位一致。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置参数（键转换为小写），返回被替换的旧值
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.values.insert(key.to_lowercase(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(&key.to_lowercase())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_normalises_case() {
        let mut params = ParameterSet::new();
        params.set("ISIF", 3i64);
        assert_eq!(params.get("isif"), Some(&ParamValue::Int(3)));
        assert_eq!(params.get("Isif"), Some(&ParamValue::Int(3)));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["isif"]);
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut params = ParameterSet::new();
        params.set("ediffg", 0.01);
        let old = params.set("ediffg", -0.01);
        assert_eq!(old, Some(ParamValue::Float(0.01)));
        assert_eq!(params.get("ediffg"), Some(&ParamValue::Float(-0.01)));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_display_incar_syntax() {
        assert_eq!(ParamValue::Bool(true).to_string(), ".TRUE.");
        assert_eq!(ParamValue::Float(-0.01).to_string(), "-0.01");
        let magmom = ParamValue::List(vec![ParamValue::Float(1.5), ParamValue::Float(-1.5)]);
        assert_eq!(magmom.to_string(), "1.5 -1.5");
    }

    #[test]
    fn test_untagged_yaml_values() {
        let v: ParamValue = serde_yaml::from_str("60").unwrap();
        assert_eq!(v, ParamValue::Int(60));
        let v: ParamValue = serde_yaml::from_str("0.01").unwrap();
        assert_eq!(v, ParamValue::Float(0.01));
        let v: ParamValue = serde_yaml::from_str("Accurate").unwrap();
        assert_eq!(v, ParamValue::Str("Accurate".to_string()));
        let v: ParamValue = serde_yaml::from_str("[1, 2]").unwrap();
        assert_eq!(v, ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(2)]));
    }
}
