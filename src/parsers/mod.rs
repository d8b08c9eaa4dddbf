//! # 解析器模块
//!
//! 读取 YAML 弛豫请求和 INCAR 模板，并将参数集合写回 INCAR。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: request, incar

pub mod incar;
pub mod request;
