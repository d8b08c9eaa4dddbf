//! # 数据模型模块
//!
//! 弛豫请求、参数集合以及 VASP 整数编码。
//!
//! ## 依赖关系
//! - 被 `massage/`, `parsers/` 和 `commands/` 使用
//! - 子模块: codes, parameters, relax

pub mod codes;
pub mod parameters;
pub mod relax;

pub use codes::{RelaxAlgo, RelaxMode};
pub use parameters::{ParamValue, ParameterSet};
pub use relax::{RelaxationRequest, RELAX_SCHEMA};
