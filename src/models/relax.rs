//! # 弛豫请求数据模型
//!
//! 描述用户的声明式弛豫设置（`relax.*` 命名空间）以及顶层的原始 INCAR 覆盖参数。
//!
//! ## 请求格式
//! ```text
//! relax:
//!   positions: true
//!   shape: false
//!   volume: false
//!   algo: cg
//!   force_cutoff: 0.01
//!   steps: 60
//! ENCUT: 520          # 原始覆盖参数
//! ```
//!
//! ## 依赖关系
//! - 被 `massage/`, `parsers/request.rs`, `commands/` 使用
//! - 使用 `models/parameters.rs`

use crate::error::{MassageError, Result};
use crate::models::parameters::ParamValue;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `relax` 命名空间下的全部选项
///
/// 每个字段都可缺省；缺省与显式给出是可区分的状态。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaxOptions {
    pub perform: Option<bool>,
    pub algo: Option<String>,
    pub energy_cutoff: Option<f64>,
    pub force_cutoff: Option<f64>,
    pub steps: Option<i64>,
    pub positions: Option<bool>,
    pub shape: Option<bool>,
    pub volume: Option<bool>,

    // 工作流层面的收敛检查，不写入 INCAR
    pub convergence_on: Option<bool>,
    pub convergence_absolute: Option<bool>,
    pub convergence_max_iterations: Option<i64>,
    pub convergence_volume: Option<f64>,
    pub convergence_positions: Option<f64>,
    pub convergence_shape_lengths: Option<f64>,
    pub convergence_shape_angles: Option<f64>,
}

impl RelaxOptions {
    /// 自由度三元组 (positions, shape, volume)，缺省视为 false
    pub fn dof(&self) -> (bool, bool, bool) {
        (
            self.positions.unwrap_or(false),
            self.shape.unwrap_or(false),
            self.volume.unwrap_or(false),
        )
    }

    /// 是否启用弛豫：任一自由度为 true
    pub fn is_active(&self) -> bool {
        let (positions, shape, volume) = self.dof();
        positions || shape || volume
    }

    /// 用 `RELAX_SCHEMA` 中的默认值补全缺省字段
    pub fn with_schema_defaults(mut self) -> Self {
        self.perform.get_or_insert(false);
        self.algo.get_or_insert_with(|| "cg".to_string());
        self.steps.get_or_insert(60);
        self.positions.get_or_insert(true);
        self.shape.get_or_insert(false);
        self.volume.get_or_insert(false);

        let defaults = ConvergenceCriteria::default();
        self.convergence_on.get_or_insert(defaults.enabled);
        self.convergence_absolute.get_or_insert(defaults.absolute);
        self.convergence_max_iterations
            .get_or_insert(defaults.max_iterations);
        self.convergence_volume.get_or_insert(defaults.volume);
        self.convergence_positions.get_or_insert(defaults.positions);
        self.convergence_shape_lengths
            .get_or_insert(defaults.shape_lengths);
        self.convergence_shape_angles
            .get_or_insert(defaults.shape_angles);
        self
    }

    /// 工作流收敛判据（缺省字段取默认值）
    pub fn convergence(&self) -> ConvergenceCriteria {
        let defaults = ConvergenceCriteria::default();
        ConvergenceCriteria {
            enabled: self.convergence_on.unwrap_or(defaults.enabled),
            absolute: self.convergence_absolute.unwrap_or(defaults.absolute),
            max_iterations: self
                .convergence_max_iterations
                .unwrap_or(defaults.max_iterations),
            volume: self.convergence_volume.unwrap_or(defaults.volume),
            positions: self.convergence_positions.unwrap_or(defaults.positions),
            shape_lengths: self
                .convergence_shape_lengths
                .unwrap_or(defaults.shape_lengths),
            shape_angles: self
                .convergence_shape_angles
                .unwrap_or(defaults.shape_angles),
        }
    }

    /// 检查数值选项的取值范围
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("energy_cutoff", self.energy_cutoff),
            ("force_cutoff", self.force_cutoff),
        ];
        for (option, value) in finite {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(invalid(option, format!("{} is not a finite number", v)));
                }
            }
        }

        if let Some(steps) = self.steps {
            if steps < 0 {
                return Err(invalid("steps", format!("{} is negative", steps)));
            }
        }

        let thresholds = [
            ("convergence_volume", self.convergence_volume),
            ("convergence_positions", self.convergence_positions),
            ("convergence_shape_lengths", self.convergence_shape_lengths),
            ("convergence_shape_angles", self.convergence_shape_angles),
        ];
        for (option, value) in thresholds {
            if let Some(v) = value {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(invalid(option, format!("{} must be >= 0", v)));
                }
            }
        }

        if let Some(n) = self.convergence_max_iterations {
            if n < 1 {
                return Err(invalid(
                    "convergence_max_iterations",
                    format!("{} must be >= 1", n),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(option: &str, reason: String) -> MassageError {
    MassageError::InvalidRelaxOption {
        option: option.to_string(),
        reason,
    }
}

/// 弛豫收敛判据（工作流层面）
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceCriteria {
    pub enabled: bool,
    /// true 时阈值为绝对差 (Å / 度)，否则为相对差
    pub absolute: bool,
    pub max_iterations: i64,
    pub volume: f64,
    pub positions: f64,
    pub shape_lengths: f64,
    pub shape_angles: f64,
}

impl Default for ConvergenceCriteria {
    fn default() -> Self {
        ConvergenceCriteria {
            enabled: false,
            absolute: false,
            max_iterations: 5,
            volume: 0.01,
            positions: 0.01,
            shape_lengths: 0.1,
            shape_angles: 0.1,
        }
    }
}

/// 弛豫选项说明条目
pub struct SchemaEntry {
    pub name: &'static str,
    pub kind: &'static str,
    pub default: Option<&'static str>,
    pub help: &'static str,
}

/// `relax.*` 选项说明表
pub const RELAX_SCHEMA: &[SchemaEntry] = &[
    SchemaEntry {
        name: "perform",
        kind: "bool",
        default: Some("false"),
        help: "If true, perform relaxation.",
    },
    SchemaEntry {
        name: "algo",
        kind: "str",
        default: Some("cg"),
        help: "Algorithm for ionic updates: 'cg' (conjugate gradient) or 'rd' (RMM-DIIS).",
    },
    SchemaEntry {
        name: "energy_cutoff",
        kind: "float",
        default: None,
        help: "Stop when the total energy change between two ionic steps is below this value.",
    },
    SchemaEntry {
        name: "force_cutoff",
        kind: "float",
        default: None,
        help: "Stop when all forces are below this value. Takes precedence over energy_cutoff.",
    },
    SchemaEntry {
        name: "steps",
        kind: "int",
        default: Some("60"),
        help: "Maximum number of ionic steps.",
    },
    SchemaEntry {
        name: "positions",
        kind: "bool",
        default: Some("true"),
        help: "Relax the atomic positions.",
    },
    SchemaEntry {
        name: "shape",
        kind: "bool",
        default: Some("false"),
        help: "Relax the unit cell shape.",
    },
    SchemaEntry {
        name: "volume",
        kind: "bool",
        default: Some("false"),
        help: "Relax the unit cell volume.",
    },
    SchemaEntry {
        name: "convergence_on",
        kind: "bool",
        default: Some("false"),
        help: "Check convergence of the relaxed structure against the criteria below.",
    },
    SchemaEntry {
        name: "convergence_absolute",
        kind: "bool",
        default: Some("false"),
        help: "Compare absolute instead of relative differences.",
    },
    SchemaEntry {
        name: "convergence_max_iterations",
        kind: "int",
        default: Some("5"),
        help: "Number of restarts if the convergence criteria are not met.",
    },
    SchemaEntry {
        name: "convergence_volume",
        kind: "float",
        default: Some("0.01"),
        help: "Volume tolerance (Å³ if absolute, else relative).",
    },
    SchemaEntry {
        name: "convergence_positions",
        kind: "float",
        default: Some("0.01"),
        help: "Position tolerance (Å if absolute, else relative).",
    },
    SchemaEntry {
        name: "convergence_shape_lengths",
        kind: "float",
        default: Some("0.1"),
        help: "Cell vector length tolerance (Å if absolute, else relative).",
    },
    SchemaEntry {
        name: "convergence_shape_angles",
        kind: "float",
        default: Some("0.1"),
        help: "Cell angle tolerance (degrees if absolute, else relative).",
    },
];

/// 一次转换的完整输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelaxationRequest {
    relax: RelaxOptions,
    /// 原始覆盖参数，键已转换为小写
    overrides: BTreeMap<String, ParamValue>,
}

impl RelaxationRequest {
    pub fn new(relax: RelaxOptions) -> Self {
        RelaxationRequest {
            relax,
            overrides: BTreeMap::new(),
        }
    }

    /// 添加一个原始覆盖参数
    ///
    /// 键大小写不敏感；同一参数以不同大小写给出不同值时报错。
    pub fn with_override(mut self, key: &str, value: impl Into<ParamValue>) -> Result<Self> {
        let value = value.into();
        let normalised = key.to_lowercase();
        if let Some(existing) = self.overrides.get(&normalised) {
            if *existing != value {
                return Err(MassageError::ConflictingOverride { key: normalised });
            }
        }
        self.overrides.insert(normalised, value);
        Ok(self)
    }

    /// 以 `base` 作为底层覆盖参数；请求中已有的键保持不变
    pub fn with_base_overrides(mut self, base: Vec<(String, ParamValue)>) -> Self {
        for (key, value) in base {
            self.overrides.entry(key.to_lowercase()).or_insert(value);
        }
        self
    }

    /// 从 YAML 文档构造请求
    ///
    /// `relax` 键解析为 `RelaxOptions`，其余顶层键均视为原始覆盖参数。
    pub fn from_yaml_value(value: serde_yaml::Value, source: &str) -> Result<Self> {
        let mapping = match value {
            serde_yaml::Value::Mapping(m) => m,
            serde_yaml::Value::Null => return Ok(RelaxationRequest::default()),
            _ => {
                return Err(parse_error(source, "top level must be a mapping".to_string()));
            }
        };

        let mut relax = RelaxOptions::default();
        let mut overrides = Vec::new();
        for (key, value) in mapping {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                other => {
                    return Err(parse_error(source, format!("non-string key {:?}", other)));
                }
            };

            if key.eq_ignore_ascii_case("relax") {
                if !value.is_null() {
                    relax = serde_yaml::from_value(value)?;
                }
                continue;
            }

            let parsed: ParamValue = serde_yaml::from_value(value)
                .map_err(|e| parse_error(source, format!("unsupported value for '{}': {}", key, e)))?;
            overrides.push((key, parsed));
        }

        overrides
            .into_iter()
            .try_fold(RelaxationRequest::new(relax), |request, (key, value)| {
                request.with_override(&key, value)
            })
    }

    pub fn relax(&self) -> &RelaxOptions {
        &self.relax
    }

    /// 替换 `relax` 选项（例如补全默认值后）
    pub fn map_relax(mut self, f: impl FnOnce(RelaxOptions) -> RelaxOptions) -> Self {
        self.relax = f(self.relax);
        self
    }

    /// 查找原始覆盖参数（大小写不敏感）
    pub fn raw(&self, key: &str) -> Option<&ParamValue> {
        self.overrides.get(&key.to_lowercase())
    }

    pub fn override_keys(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(|k| k.as_str())
    }
}

fn parse_error(source: &str, reason: String) -> MassageError {
    MassageError::ParseError {
        format: "request".to_string(),
        path: source.to_string(),
        reason,
    }
}
