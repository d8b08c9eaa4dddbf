//! # 参数转换模块
//!
//! 将声明式弛豫请求转换为 VASP INCAR 控制参数。
//!
//! ## 流程
//! 1. 取得参考参数表，为每个参数名查找推导规则
//! 2. 按参考表顺序逐个参数：执行规则，然后用原始覆盖参数（若存在）替换结果
//! 3. 检查输出参数均属于参考表
//!
//! 覆盖参数总是优先于推导结果。
//!
//! ## 依赖关系
//! - 被 `commands/massage.rs`, `commands/batch.rs` 使用
//! - 使用 `tags/`, `models/`
//! - 子模块: context, rules

pub mod context;
pub mod rules;

pub use context::{CalcContext, ConsoleContext, NullContext, RecordingContext};

use crate::error::{MassageError, Result};
use crate::models::{ParameterSet, RelaxationRequest};
use crate::tags::TagTable;

use rules::Rule;

/// 转换选项
#[derive(Debug, Clone, Copy)]
pub struct MassageOptions {
    /// 拒绝参考表以外的原始覆盖参数
    pub strict: bool,
}

impl Default for MassageOptions {
    fn default() -> Self {
        MassageOptions { strict: true }
    }
}

/// 参数转换器
///
/// 构造即完成转换；结果通过 [`ParametersMassage::parameters`] 只读访问。
#[derive(Debug)]
pub struct ParametersMassage {
    massaged: ParameterSet,
}

impl ParametersMassage {
    /// 使用指定参考表转换
    ///
    /// 失败时先通过 `ctx.fail` 通知宿主，再返回错误。
    pub fn with_table(
        ctx: &dyn CalcContext,
        request: &RelaxationRequest,
        table: &TagTable,
        options: MassageOptions,
    ) -> Result<Self> {
        Self::massage(ctx, request, table, options).map_err(|err| {
            if let Some(kind) = err.kind() {
                ctx.fail(kind, &err.to_string());
            }
            err
        })
    }

    fn massage(
        ctx: &dyn CalcContext,
        request: &RelaxationRequest,
        table: &TagTable,
        options: MassageOptions,
    ) -> Result<Self> {
        if options.strict {
            check_overrides(request, table)?;
        }

        let dispatch = build_dispatch(table);
        let mut massaged = ParameterSet::new();

        for (name, rule) in &dispatch {
            if let Some(rule) = rule {
                rule(request, ctx, &mut massaged)?;
            }
            // 原始覆盖参数优先于推导结果
            if let Some(raw) = request.raw(name) {
                massaged.set(name, raw.clone());
            }
        }

        check_parameters(&massaged, table)?;
        Ok(ParametersMassage { massaged })
    }

    /// 转换后的参数
    pub fn parameters(&self) -> &ParameterSet {
        &self.massaged
    }
}

/// 参数名 → 推导规则，保持参考表顺序
fn build_dispatch(table: &TagTable) -> Vec<(&str, Option<Rule>)> {
    table
        .names()
        .map(|name| (name, rules::rule_for(name)))
        .collect()
}

fn check_overrides(request: &RelaxationRequest, table: &TagTable) -> Result<()> {
    match request.override_keys().find(|key| !table.contains(key)) {
        Some(key) => Err(MassageError::UnrecognizedOverride {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// 输出参数必须是参考表的子集
fn check_parameters(massaged: &ParameterSet, table: &TagTable) -> Result<()> {
    let unexpected: Vec<String> = massaged
        .keys()
        .filter(|key| !table.contains(key))
        .map(|key| key.to_string())
        .collect();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(MassageError::ParameterCheckFailed { unexpected })
    }
}
