//! # VASP INCAR 读写
//!
//! 读取已有 INCAR 作为原始覆盖参数模板，并将转换结果写成 INCAR。
//!
//! ## INCAR 格式说明
//! ```text
//! SYSTEM = Si bulk        # comment
//! ENCUT = 520 ; ISMEAR = 0
//! LWAVE = .FALSE.
//! MAGMOM = 1.0 -1.0
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/massage.rs`, `commands/batch.rs` 使用
//! - 使用 `models/parameters.rs`

use crate::error::{MassageError, Result};
use crate::models::{ParamValue, ParameterSet};

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref ASSIGNMENT: Regex =
        Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*=\s*(.*?)\s*$").expect("valid regex");
}

/// 解析 INCAR 文件
pub fn parse_incar_file(path: &Path) -> Result<Vec<(String, ParamValue)>> {
    let content = fs::read_to_string(path).map_err(|e| MassageError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_incar_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 INCAR，返回 (小写参数名, 值) 列表
pub fn parse_incar_content(content: &str, name: &str) -> Result<Vec<(String, ParamValue)>> {
    let mut tags = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        // 去掉 # 或 ! 之后的注释
        let code = match line.find(|c| c == '#' || c == '!') {
            Some(pos) => &line[..pos],
            None => line,
        };

        for statement in code.split(';') {
            if statement.trim().is_empty() {
                continue;
            }
            let caps = ASSIGNMENT
                .captures(statement)
                .ok_or_else(|| MassageError::ParseError {
                    format: "incar".to_string(),
                    path: name.to_string(),
                    reason: format!("Invalid assignment at line {}: '{}'", lineno + 1, statement.trim()),
                })?;

            let raw_value = &caps[2];
            if raw_value.is_empty() {
                return Err(MassageError::ParseError {
                    format: "incar".to_string(),
                    path: name.to_string(),
                    reason: format!("Missing value for '{}' at line {}", &caps[1], lineno + 1),
                });
            }

            tags.push((caps[1].to_lowercase(), parse_value(raw_value)));
        }
    }

    Ok(tags)
}

/// 解析参数值：多个数值/布尔 token 视为列表，其余整体视为字符串
fn parse_value(raw: &str) -> ParamValue {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() == 1 {
        return parse_scalar(tokens[0]);
    }

    let items: Vec<ParamValue> = tokens.iter().map(|t| parse_scalar(t)).collect();
    if items.iter().all(|i| matches!(i, ParamValue::Str(_))) {
        ParamValue::Str(tokens.join(" "))
    } else {
        ParamValue::List(items)
    }
}

fn parse_scalar(token: &str) -> ParamValue {
    match token.to_uppercase().as_str() {
        ".TRUE." | ".T." | "T" => return ParamValue::Bool(true),
        ".FALSE." | ".F." | "F" => return ParamValue::Bool(false),
        _ => {}
    }
    if let Ok(v) = token.parse::<i64>() {
        return ParamValue::Int(v);
    }
    if let Ok(v) = token.parse::<f64>() {
        return ParamValue::Float(v);
    }
    ParamValue::Str(token.to_string())
}

/// 生成 INCAR 内容，参数名大写
pub fn to_incar_string(params: &ParameterSet, title: Option<&str>) -> String {
    let mut result = String::new();

    if let Some(title) = title {
        result.push_str(&format!("# {}\n", title));
    }

    for (key, value) in params.iter() {
        result.push_str(&format!("{} = {}\n", key.to_uppercase(), value));
    }

    result
}

/// 写入 INCAR 文件
pub fn write_incar_file(path: &Path, params: &ParameterSet, title: Option<&str>) -> Result<()> {
    fs::write(path, to_incar_string(params, title)).map_err(|e| MassageError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_incar() {
        let content = r#"SYSTEM = Si bulk   # title
ENCUT = 520 ; ISMEAR = 0
  LWAVE = .FALSE.   ! no wavecar
EDIFF = 1E-6
MAGMOM = 1.0 -1.0

"#;
        let tags = parse_incar_content(content, "INCAR").unwrap();
        assert_eq!(
            tags,
            vec![
                ("system".to_string(), ParamValue::Str("Si bulk".to_string())),
                ("encut".to_string(), ParamValue::Int(520)),
                ("ismear".to_string(), ParamValue::Int(0)),
                ("lwave".to_string(), ParamValue::Bool(false)),
                ("ediff".to_string(), ParamValue::Float(1e-6)),
                (
                    "magmom".to_string(),
                    ParamValue::List(vec![ParamValue::Float(1.0), ParamValue::Float(-1.0)])
                ),
            ]
        );
    }

    #[test]
    fn test_parse_incar_invalid_line() {
        let err = parse_incar_content("ENCUT 520\n", "INCAR").unwrap_err();
        assert!(matches!(err, MassageError::ParseError { .. }));

        let err = parse_incar_content("ENCUT =\n", "INCAR").unwrap_err();
        assert!(err.to_string().contains("Missing value"));
    }

    #[test]
    fn test_to_incar_string() {
        let mut params = ParameterSet::new();
        params.set("nsw", 60i64);
        params.set("ediffg", -0.01);
        params.set("lwave", false);

        let text = to_incar_string(&params, Some("relaxation"));
        assert_eq!(
            text,
            "# relaxation\nEDIFFG = -0.01\nLWAVE = .FALSE.\nNSW = 60\n"
        );
    }

    #[test]
    fn test_rendered_incar_reads_back() {
        let mut params = ParameterSet::new();
        params.set("ibrion", 2i64);
        params.set("isif", 3i64);
        let text = to_incar_string(&params, None);
        let tags = parse_incar_content(&text, "INCAR").unwrap();
        assert_eq!(tags[0], ("ibrion".to_string(), ParamValue::Int(2)));
        assert_eq!(tags[1], ("isif".to_string(), ParamValue::Int(3)));
    }
}
