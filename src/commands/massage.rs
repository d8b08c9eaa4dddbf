//! # massage 命令实现
//!
//! 将单个弛豫请求转换为 INCAR 参数。
//!
//! ## 功能
//! - 读取 YAML 请求，可选合并 INCAR 模板中的覆盖参数
//! - 可选补全 `relax.*` 默认值
//! - 输出 INCAR 或 YAML，写入文件或标准输出
//!
//! ## 依赖关系
//! - 使用 `cli/massage.rs` 定义的参数
//! - 使用 `massage/`, `parsers/`, `tags/`
//! - 使用 `utils/output.rs`

use crate::cli::massage::{MassageArgs, OutputFormat, TranslateArgs};
use crate::error::{MassageError, Result};
use crate::massage::{CalcContext, ConsoleContext, MassageOptions, NullContext, ParametersMassage};
use crate::models::relax::ConvergenceCriteria;
use crate::models::{ParameterSet, RelaxationRequest};
use crate::parsers::{incar, request};
use crate::tags::TagTable;
use crate::utils::output;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// 执行 massage 命令
pub fn execute(args: MassageArgs) -> Result<()> {
    let table = load_tag_table(&args.translate)?;
    let req = load_request(&args.request, &args.translate)?;

    let console = ConsoleContext::new(args.request.display().to_string());
    let ctx: &dyn CalcContext = if args.quiet { &NullContext } else { &console };

    let massager = translate(ctx, &req, &table, &args.translate)?;
    let params = massager.parameters();

    if !args.quiet {
        if let Some(note) = convergence_note(&req.relax().convergence()) {
            output::print_info(&note);
        }
        if params.is_empty() {
            output::print_warning("No INCAR parameters produced: relaxation is inactive and no overrides were given");
        }
    }

    let text = render(params, args.format, &args.request)?;

    match args.output {
        Some(ref path) => {
            fs::write(path, &text).map_err(|e| MassageError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_success(&format!(
                "{} parameters written to '{}' ({})",
                params.len(),
                path.display(),
                args.format
            ));
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// 工作流收敛检查的提示信息；未启用时为 `None`
fn convergence_note(criteria: &ConvergenceCriteria) -> Option<String> {
    if !criteria.enabled {
        return None;
    }
    Some(format!(
        "Structure convergence check enabled: up to {} restarts (volume {}, positions {}, lengths {}, angles {}, {})",
        criteria.max_iterations,
        criteria.volume,
        criteria.positions,
        criteria.shape_lengths,
        criteria.shape_angles,
        if criteria.absolute { "absolute" } else { "relative" }
    ))
}

/// 加载参考参数表：指定文件或内置表
pub(crate) fn load_tag_table(args: &TranslateArgs) -> Result<Cow<'static, TagTable>> {
    match args.tags {
        Some(ref path) => Ok(Cow::Owned(TagTable::from_file(path)?)),
        None => Ok(Cow::Borrowed(TagTable::packaged())),
    }
}

/// 读取请求并应用 INCAR 模板与默认值
pub(crate) fn load_request(path: &Path, args: &TranslateArgs) -> Result<RelaxationRequest> {
    let mut req = request::parse_request_file(path)?;

    if let Some(ref template) = args.incar {
        req = req.with_base_overrides(incar::parse_incar_file(template)?);
    }

    if args.defaults {
        req = req.map_relax(|relax| relax.with_schema_defaults());
    }

    req.relax().validate()?;
    Ok(req)
}

/// 执行转换
pub(crate) fn translate(
    ctx: &dyn CalcContext,
    req: &RelaxationRequest,
    table: &TagTable,
    args: &TranslateArgs,
) -> Result<ParametersMassage> {
    let options = MassageOptions {
        strict: !args.lenient,
    };
    ParametersMassage::with_table(ctx, req, table, options)
}

/// 按输出格式渲染参数
fn render(params: &ParameterSet, format: OutputFormat, source: &Path) -> Result<String> {
    match format {
        OutputFormat::Incar => Ok(incar::to_incar_string(
            params,
            Some(&format!("Generated by vasp-massage from {}", source.display())),
        )),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(params)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamValue;

    fn translate_args() -> TranslateArgs {
        TranslateArgs {
            tags: None,
            incar: None,
            defaults: false,
            lenient: false,
        }
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("vasp-massage-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_request_with_template_and_defaults() {
        let dir = scratch_dir("load-request");
        let request_path = dir.join("relax.yaml");
        let incar_path = dir.join("INCAR");
        fs::write(&request_path, "relax:\n  force_cutoff: 0.02\nNSW: 10\n").unwrap();
        fs::write(&incar_path, "NSW = 99\nENCUT = 400\n").unwrap();

        let args = TranslateArgs {
            incar: Some(incar_path),
            defaults: true,
            ..translate_args()
        };
        let req = load_request(&request_path, &args).unwrap();
        let massager = translate(&NullContext, &req, TagTable::packaged(), &args).unwrap();
        let params = massager.parameters();

        assert_eq!(params.get("nsw"), Some(&ParamValue::Int(10)));
        assert_eq!(params.get("encut"), Some(&ParamValue::Int(400)));
        assert_eq!(params.get("ibrion"), Some(&ParamValue::Int(2)));
        assert_eq!(params.get("isif"), Some(&ParamValue::Int(2)));
        assert_eq!(params.get("ediffg"), Some(&ParamValue::Float(-0.02)));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_render_yaml() {
        let mut params = ParameterSet::new();
        params.set("isif", 3i64);
        let text = render(&params, OutputFormat::Yaml, Path::new("r.yaml")).unwrap();
        assert_eq!(text.trim(), "isif: 3");
    }

    #[test]
    fn test_lenient_flag_disables_strict_mode() {
        let req = RelaxationRequest::default()
            .with_override("bogus", 1i64)
            .unwrap();
        assert!(translate(&NullContext, &req, TagTable::packaged(), &translate_args()).is_err());

        let args = TranslateArgs {
            lenient: true,
            ..translate_args()
        };
        let massager = translate(&NullContext, &req, TagTable::packaged(), &args).unwrap();
        assert!(massager.parameters().is_empty());
    }

    #[test]
    fn test_realistic_incar_template_in_strict_mode() {
        let dir = scratch_dir("strict-template");
        let request_path = dir.join("relax.yaml");
        let incar_path = dir.join("INCAR");
        fs::write(&request_path, "relax:\n  positions: true\n  algo: cg\n  force_cutoff: 0.02\n").unwrap();
        fs::write(
            &incar_path,
            "SYSTEM = slab\nISTART = 0 ; ICHARG = 2 ; INIWAV = 1\nMETAGGA = SCAN\nLASPH = .TRUE.\n\
             LDIPOL = .TRUE. ; IDIPOL = 3\nDIPOL = 0.5 0.5 0.5\nNSIM = 4 ; LPLANE = .TRUE.\n\
             LSCALAPACK = .FALSE.\nNBLOCK = 1 ; KBLOCK = 10\nLVDW = .FALSE. ; LMONO = .FALSE.\n\
             LOPTICS = .FALSE. ; LCALCEPS = .FALSE.\nKPAR = 2\n",
        )
        .unwrap();

        let args = TranslateArgs {
            incar: Some(incar_path),
            ..translate_args()
        };
        let req = load_request(&request_path, &args).unwrap();
        let massager = translate(&NullContext, &req, TagTable::packaged(), &args).unwrap();
        let params = massager.parameters();

        assert_eq!(params.get("metagga"), Some(&ParamValue::Str("SCAN".to_string())));
        assert_eq!(params.get("idipol"), Some(&ParamValue::Int(3)));
        assert_eq!(params.get("kblock"), Some(&ParamValue::Int(10)));
        assert_eq!(params.get("ibrion"), Some(&ParamValue::Int(2)));
        assert_eq!(params.get("isif"), Some(&ParamValue::Int(2)));
        assert_eq!(params.len(), 22);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_convergence_note_independent_of_output_target() {
        assert!(convergence_note(&ConvergenceCriteria::default()).is_none());

        let enabled = ConvergenceCriteria {
            enabled: true,
            absolute: true,
            ..Default::default()
        };
        let note = convergence_note(&enabled).unwrap();
        assert!(note.contains("up to 5 restarts"));
        assert!(note.ends_with("absolute)"));
    }
}
