//! # 参数推导规则
//!
//! 每条规则只读取弛豫请求，按条件写入其目标参数。
//! 规则要么完整写入目标参数，要么什么都不写。
//!
//! | 参数 | 条件 | 结果 |
//! |------|------|------|
//! | ibrion | 启用弛豫 | 算法标签 → IBRION，缺省为 -1 |
//! | ediffg | 启用弛豫 | 能量判据为正，力判据为负且优先 |
//! | nsw | 启用弛豫且给出步数 | 步数 |
//! | isif | 任一自由度为 true | 自由度组合 → ISIF |
//!
//! ## 依赖关系
//! - 被 `massage/mod.rs` 调用
//! - 使用 `models/codes.rs`, `models/relax.rs`, `models/parameters.rs`

use crate::error::Result;
use crate::massage::context::CalcContext;
use crate::models::{ParamValue, ParameterSet, RelaxAlgo, RelaxMode, RelaxationRequest};

/// 推导规则函数
pub type Rule = fn(&RelaxationRequest, &dyn CalcContext, &mut ParameterSet) -> Result<()>;

/// 已注册的规则
const REGISTRY: &[(&str, Rule)] = &[
    ("ibrion", derive_ibrion),
    ("ediffg", derive_ediffg),
    ("nsw", derive_nsw),
    ("isif", derive_isif),
];

/// 查找参数对应的规则；纯透传参数没有规则
pub fn rule_for(name: &str) -> Option<Rule> {
    REGISTRY
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, rule)| *rule)
}

/// 已注册规则的参数名
pub fn derived_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(key, _)| *key)
}

/// 离子更新算法
///
/// 未给出 `algo` 时为 `NoUpdate`；给出但无法识别时不写入。
fn derive_ibrion(
    request: &RelaxationRequest,
    _ctx: &dyn CalcContext,
    params: &mut ParameterSet,
) -> Result<()> {
    let relax = request.relax();
    if !relax.is_active() {
        return Ok(());
    }

    let algo = match relax.algo.as_deref() {
        None => Some(RelaxAlgo::NoUpdate),
        Some(tag) => RelaxAlgo::from_tag(tag),
    };
    if let Some(algo) = algo {
        params.set("ibrion", algo);
    }
    Ok(())
}

/// 弛豫停止判据
fn derive_ediffg(
    request: &RelaxationRequest,
    ctx: &dyn CalcContext,
    params: &mut ParameterSet,
) -> Result<()> {
    let relax = request.relax();
    if !relax.is_active() {
        return Ok(());
    }

    let ediffg = match (relax.energy_cutoff, relax.force_cutoff) {
        (_, Some(force)) => {
            if relax.energy_cutoff.is_some() {
                ctx.report(
                    "User supplied both a force and an energy cutoff for the relaxation. \
                     Utilizing the force cutoff.",
                );
            }
            Some(-force.abs())
        }
        (Some(energy), None) => Some(energy),
        (None, None) => None,
    };
    if let Some(ediffg) = ediffg {
        params.set("ediffg", ediffg);
    }
    Ok(())
}

/// 最大离子步数
fn derive_nsw(
    request: &RelaxationRequest,
    _ctx: &dyn CalcContext,
    params: &mut ParameterSet,
) -> Result<()> {
    let relax = request.relax();
    if let (true, Some(steps)) = (relax.is_active(), relax.steps) {
        params.set("nsw", steps);
    }
    Ok(())
}

/// 弛豫模式，只由自由度组合决定
fn derive_isif(
    request: &RelaxationRequest,
    _ctx: &dyn CalcContext,
    params: &mut ParameterSet,
) -> Result<()> {
    let (positions, shape, volume) = request.relax().dof();
    if positions || shape || volume {
        let mode = RelaxMode::from_dof(positions, shape, volume)?;
        params.set("isif", ParamValue::from(mode));
    }
    Ok(())
}
