//! # VASP 控制码枚举
//!
//! 离子弛豫算法 (IBRION) 与弛豫模式 (ISIF) 的封闭枚举。
//! 内部始终使用枚举，仅在输出边界转换为整数。
//!
//! ## 依赖关系
//! - 被 `massage/rules.rs` 使用
//! - 使用 `models/parameters.rs` 做输出转换

use crate::error::{MassageError, Result};
use crate::models::parameters::ParamValue;

/// 离子弛豫算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxAlgo {
    /// 不移动离子
    NoUpdate,
    /// RMM-DIIS 准牛顿法
    IonicRelaxationRmmDiis,
    /// 共轭梯度法
    IonicRelaxationCg,
}

impl RelaxAlgo {
    /// 从用户标签解析，仅识别 `cg` 与 `rd`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cg" => Some(RelaxAlgo::IonicRelaxationCg),
            "rd" => Some(RelaxAlgo::IonicRelaxationRmmDiis),
            _ => None,
        }
    }

    /// IBRION 数值
    pub fn code(&self) -> i64 {
        match self {
            RelaxAlgo::NoUpdate => -1,
            RelaxAlgo::IonicRelaxationRmmDiis => 1,
            RelaxAlgo::IonicRelaxationCg => 2,
        }
    }
}

impl From<RelaxAlgo> for ParamValue {
    fn from(algo: RelaxAlgo) -> Self {
        ParamValue::Int(algo.code())
    }
}

/// 弛豫模式，由 (positions, shape, volume) 三元组唯一确定
///
/// See <https://www.vasp.at/wiki/index.php/ISIF>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxMode {
    PosOnly,
    PosShapeVol,
    PosShape,
    ShapeOnly,
    ShapeVol,
    VolOnly,
}

impl RelaxMode {
    /// 根据自由度组合查找弛豫模式
    ///
    /// 三个自由度均为 false 时没有对应模式，返回错误。
    pub fn from_dof(positions: bool, shape: bool, volume: bool) -> Result<Self> {
        match (positions, shape, volume) {
            (true, false, false) => Ok(RelaxMode::PosOnly),
            (true, true, true) => Ok(RelaxMode::PosShapeVol),
            (true, true, false) => Ok(RelaxMode::PosShape),
            (false, true, false) => Ok(RelaxMode::ShapeOnly),
            (false, true, true) => Ok(RelaxMode::ShapeVol),
            (false, false, true) => Ok(RelaxMode::VolOnly),
            // VASP 没有"只弛豫位置和体积"的模式
            (true, false, true) | (false, false, false) => {
                Err(MassageError::InvalidDegreesOfFreedom {
                    positions,
                    shape,
                    volume,
                })
            }
        }
    }

    /// ISIF 数值
    pub fn code(&self) -> i64 {
        match self {
            RelaxMode::PosOnly => 2,
            RelaxMode::PosShapeVol => 3,
            RelaxMode::PosShape => 4,
            RelaxMode::ShapeOnly => 5,
            RelaxMode::ShapeVol => 6,
            RelaxMode::VolOnly => 7,
        }
    }
}

impl From<RelaxMode> for ParamValue {
    fn from(mode: RelaxMode) -> Self {
        ParamValue::Int(mode.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algo_tags() {
        assert_eq!(RelaxAlgo::from_tag("cg"), Some(RelaxAlgo::IonicRelaxationCg));
        assert_eq!(RelaxAlgo::from_tag("rd"), Some(RelaxAlgo::IonicRelaxationRmmDiis));
        assert_eq!(RelaxAlgo::from_tag("CG"), None);
        assert_eq!(RelaxAlgo::from_tag("damped"), None);
        assert_eq!(RelaxAlgo::NoUpdate.code(), -1);
    }

    #[test]
    fn test_mode_table() {
        let cases = [
            ((true, false, false), 2),
            ((true, true, true), 3),
            ((true, true, false), 4),
            ((false, true, false), 5),
            ((false, true, true), 6),
            ((false, false, true), 7),
        ];
        for ((p, s, v), code) in cases {
            assert_eq!(RelaxMode::from_dof(p, s, v).unwrap().code(), code);
        }
    }

    #[test]
    fn test_mode_without_dof_is_rejected() {
        let err = RelaxMode::from_dof(false, false, false).unwrap_err();
        assert!(matches!(err, MassageError::InvalidDegreesOfFreedom { .. }));
    }

    #[test]
    fn test_positions_and_volume_only_is_rejected() {
        assert!(RelaxMode::from_dof(true, false, true).is_err());
    }
}
