//! # 嵌套映射查找
//!
//! 在嵌套的 YAML 映射中查找某个键的所有取值。
//!
//! ## 依赖关系
//! - 被 `commands/query.rs` 使用

use serde_yaml::Value;

/// 深度优先查找 `key` 对应的所有值（文档顺序）
///
/// 命中的值本身不再向下搜索。
pub fn find_key_in_dicts<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(value, key, &mut found);
    found
}

fn collect<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    if let Value::Mapping(mapping) = value {
        for (k, v) in mapping {
            if k.as_str() == Some(key) {
                found.push(v);
            } else if v.is_mapping() {
                collect(v, key, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_nested_keys() {
        let doc: Value = serde_yaml::from_str(
            r#"
steps: 1
relax:
  steps: 60
  inner:
    steps: 3
other:
  - steps: 99
"#,
        )
        .unwrap();

        let found: Vec<i64> = find_key_in_dicts(&doc, "steps")
            .into_iter()
            .filter_map(|v| v.as_i64())
            .collect();
        // 列表中的映射不参与查找
        assert_eq!(found, vec![1, 60, 3]);
    }

    #[test]
    fn test_match_does_not_descend() {
        let doc: Value = serde_yaml::from_str("relax:\n  relax: 1\n").unwrap();
        let found = find_key_in_dicts(&doc, "relax");
        assert_eq!(found.len(), 1);
        assert!(found[0].is_mapping());
    }

    #[test]
    fn test_missing_key() {
        let doc: Value = serde_yaml::from_str("a: 1").unwrap();
        assert!(find_key_in_dicts(&doc, "b").is_empty());
        assert!(find_key_in_dicts(&Value::Null, "b").is_empty());
    }
}
