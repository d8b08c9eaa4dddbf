//! # 统一错误处理模块
//!
//! 定义 vasp-massage 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 参数转换失败的类别
///
/// 对应计算上下文中的退出码，宿主据此标记计算失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 原始覆盖参数不在参考表中
    UnrecognizedOverride,
    /// 自由度组合没有对应的弛豫模式
    InvalidDegreesOfFreedom,
    /// 输出参数集合与参考表不一致
    ParameterCheckFailed,
}

impl FailureKind {
    /// 宿主框架使用的退出码名称
    pub fn exit_code(&self) -> &'static str {
        match self {
            FailureKind::UnrecognizedOverride => "ERROR_UNRECOGNIZED_PARAMETER",
            FailureKind::InvalidDegreesOfFreedom => "ERROR_INVALID_DEGREES_OF_FREEDOM",
            FailureKind::ParameterCheckFailed => "ERROR_INVALID_PARAMETER_DETECTED",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.exit_code())
    }
}

/// vasp-massage 统一错误类型
#[derive(Error, Debug)]
pub enum MassageError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数转换错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unrecognized parameter '{key}': not listed in the reference tag table")]
    UnrecognizedOverride { key: String },

    #[error("Parameter '{key}' is given more than once with different capitalisation")]
    ConflictingOverride { key: String },

    #[error(
        "Invalid combination for degrees of freedom: positions={positions}, shape={shape}, volume={volume}"
    )]
    InvalidDegreesOfFreedom {
        positions: bool,
        shape: bool,
        volume: bool,
    },

    #[error("Massaged parameters contain keys outside the reference table: {}", .unexpected.join(", "))]
    ParameterCheckFailed { unexpected: Vec<String> },

    #[error("Invalid relax option '{option}': {reason}")]
    InvalidRelaxOption { option: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },
}

impl MassageError {
    /// 参数转换失败的类别；I/O 等其他错误返回 `None`
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            MassageError::UnrecognizedOverride { .. } => Some(FailureKind::UnrecognizedOverride),
            MassageError::InvalidDegreesOfFreedom { .. } => {
                Some(FailureKind::InvalidDegreesOfFreedom)
            }
            MassageError::ParameterCheckFailed { .. } => Some(FailureKind::ParameterCheckFailed),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MassageError>;
