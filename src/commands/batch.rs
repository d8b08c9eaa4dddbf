//! # batch 命令实现
//!
//! 批量转换弛豫请求并生成 INCAR。
//!
//! ## 功能
//! - 收集请求文件（glob + 可选递归）
//! - 并行转换，每个请求独立
//! - INCAR 写在请求旁边（`<stem>.INCAR`），或在输出目录中保持相对输入目录的子路径
//! - 多个请求映射到同一 INCAR 时在转换前报错
//! - 可选 CSV 汇总
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/`, `commands/massage.rs`, `parsers/incar.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::cli::massage::TranslateArgs;
use crate::commands::massage::{load_request, load_tag_table, translate};
use crate::error::{MassageError, Result};
use crate::massage::RecordingContext;
use crate::parsers::incar;
use crate::tags::TagTable;
use crate::utils::output;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Parameter Massage");

    if !args.input.exists() {
        return Err(MassageError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    if let Some(ref dir) = args.output {
        fs::create_dir_all(dir).map_err(|e| MassageError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(MassageError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!("Found {} request files", files.len()));

    let targets: HashMap<PathBuf, PathBuf> = files
        .iter()
        .map(|file| {
            let target = incar_path(file, &args.input, args.output.as_deref());
            (file.clone(), target)
        })
        .collect();
    check_unique_targets(&files, &targets)?;

    let table = load_tag_table(&args.translate)?;
    let table: &TagTable = &table;

    let result = BatchRunner::new(args.jobs).run(files, |path| match targets.get(path) {
        Some(target) => process_request(path, target, table, &args.translate, args.overwrite),
        None => ProcessResult::Failed(path.display().to_string(), "no INCAR target".to_string()),
    })?;

    report(&result);

    if let Some(ref summary) = args.summary {
        write_summary(&result, summary)?;
        output::print_success(&format!("Summary saved to '{}'", summary.display()));
    }

    output::print_separator();
    output::print_done(&format!(
        "Processed {} requests: {} written, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    Ok(())
}

/// 请求文件对应的 INCAR 路径
///
/// 指定输出目录时保留请求相对于输入目录的子路径。
fn incar_path(request: &Path, input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = request
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("request");
    let file_name = format!("{}.INCAR", stem);

    match output_dir {
        Some(dir) => {
            let subdir = request
                .strip_prefix(input)
                .ok()
                .and_then(|rel| rel.parent())
                .unwrap_or_else(|| Path::new(""));
            dir.join(subdir).join(file_name)
        }
        None => request.with_file_name(file_name),
    }
}

/// 两个请求不能写入同一个 INCAR
fn check_unique_targets(files: &[PathBuf], targets: &HashMap<PathBuf, PathBuf>) -> Result<()> {
    let mut owners: HashMap<&PathBuf, &PathBuf> = HashMap::new();
    for file in files {
        if let Some(target) = targets.get(file) {
            if let Some(previous) = owners.insert(target, file) {
                return Err(MassageError::InvalidArgument(format!(
                    "'{}' and '{}' would both write '{}'",
                    previous.display(),
                    file.display(),
                    target.display()
                )));
            }
        }
    }
    Ok(())
}

/// 转换单个请求并写出 INCAR
fn process_request(
    path: &Path,
    target: &Path,
    table: &TagTable,
    translate_args: &TranslateArgs,
    overwrite: bool,
) -> ProcessResult {
    let name = path.display().to_string();

    if target.exists() && !overwrite {
        return ProcessResult::Skipped(name);
    }

    let ctx = RecordingContext::new();
    let outcome = load_request(path, translate_args)
        .and_then(|req| translate(&ctx, &req, table, translate_args))
        .and_then(|massager| {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| MassageError::FileWriteError {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
            let title = format!("Generated by vasp-massage from {}", name);
            incar::write_incar_file(target, massager.parameters(), Some(&title))?;
            Ok(massager.parameters().clone())
        });

    match outcome {
        Ok(parameters) => ProcessResult::Success {
            path: name,
            parameters,
            warnings: ctx.into_messages(),
        },
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

/// 打印警告与失败详情
fn report(result: &BatchResult) {
    for entry in &result.entries {
        match entry {
            ProcessResult::Success { path, warnings, .. } => {
                for warning in warnings {
                    output::print_warning(&format!("{}: {}", path, warning));
                }
            }
            ProcessResult::Skipped(path) => {
                output::print_skip(&format!("{} (INCAR exists)", path));
            }
            ProcessResult::Failed(_, _) => {}
        }
    }

    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }
}

/// 保存 CSV 汇总
fn write_summary(result: &BatchResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["request", "status", "ibrion", "isif", "nsw", "ediffg", "message"])?;

    for entry in &result.entries {
        let record = match entry {
            ProcessResult::Success {
                path,
                parameters,
                warnings,
            } => {
                let field = |key: &str| {
                    parameters
                        .get(key)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                };
                [
                    path.clone(),
                    "ok".to_string(),
                    field("ibrion"),
                    field("isif"),
                    field("nsw"),
                    field("ediffg"),
                    warnings.join("; "),
                ]
            }
            ProcessResult::Skipped(path) => [
                path.clone(),
                "skipped".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
            ProcessResult::Failed(path, err) => [
                path.clone(),
                "failed".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                err.clone(),
            ],
        };
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| MassageError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vasp-massage-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn translate_args() -> TranslateArgs {
        TranslateArgs {
            tags: None,
            incar: None,
            defaults: false,
            lenient: false,
        }
    }

    #[test]
    fn test_incar_path() {
        let input = Path::new("/jobs");
        assert_eq!(
            incar_path(Path::new("/jobs/si.yaml"), input, None),
            PathBuf::from("/jobs/si.INCAR")
        );
        assert_eq!(
            incar_path(Path::new("/jobs/si.yaml"), input, Some(Path::new("/out"))),
            PathBuf::from("/out/si.INCAR")
        );
        assert_eq!(
            incar_path(Path::new("/jobs/a/b/si.yaml"), input, Some(Path::new("/out"))),
            PathBuf::from("/out/a/b/si.INCAR")
        );
        // 单文件输入
        assert_eq!(
            incar_path(Path::new("/jobs/si.yaml"), Path::new("/jobs/si.yaml"), Some(Path::new("/out"))),
            PathBuf::from("/out/si.INCAR")
        );
    }

    #[test]
    fn test_recursive_batch_keeps_same_stems_apart() {
        let dir = scratch_dir("batch-nested");
        let input = dir.join("in");
        fs::create_dir_all(input.join("a")).unwrap();
        fs::create_dir_all(input.join("b")).unwrap();
        fs::write(input.join("a/si.yaml"), "relax:\n  positions: true\n  steps: 11\n").unwrap();
        fs::write(input.join("b/si.yaml"), "relax:\n  positions: true\n  steps: 22\n").unwrap();

        let out = dir.join("out");
        let args = BatchArgs {
            input: input.clone(),
            output: Some(out.clone()),
            pattern: "*.yaml".to_string(),
            recursive: true,
            jobs: 2,
            overwrite: false,
            summary: None,
            translate: translate_args(),
        };
        execute(args).unwrap();

        let a = fs::read_to_string(out.join("a/si.INCAR")).unwrap();
        let b = fs::read_to_string(out.join("b/si.INCAR")).unwrap();
        assert!(a.contains("NSW = 11\n"));
        assert!(b.contains("NSW = 22\n"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_colliding_targets_are_rejected() {
        let dir = scratch_dir("batch-collide");
        fs::write(dir.join("si.yaml"), "relax:\n  positions: true\n").unwrap();
        fs::write(dir.join("si.yml"), "relax:\n  shape: true\n").unwrap();

        let args = BatchArgs {
            input: dir.clone(),
            output: None,
            pattern: "*.yaml,*.yml".to_string(),
            recursive: false,
            jobs: 1,
            overwrite: true,
            summary: None,
            translate: translate_args(),
        };
        let err = execute(args).unwrap_err();
        assert!(matches!(err, MassageError::InvalidArgument(_)));
        assert!(err.to_string().contains("si.INCAR"));
        assert!(!dir.join("si.INCAR").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_batch_translation_and_summary() {
        let dir = scratch_dir("batch");
        fs::write(
            dir.join("full.yaml"),
            "relax:\n  positions: true\n  shape: true\n  volume: true\n  algo: cg\n  energy_cutoff: 0.01\n  force_cutoff: 0.01\n  steps: 60\n",
        )
        .unwrap();
        fs::write(dir.join("bad.yaml"), "relax:\n  positions: true\nNOT_A_TAG: 1\n").unwrap();
        fs::write(dir.join("done.yaml"), "ENCUT: 400\n").unwrap();
        fs::write(dir.join("done.INCAR"), "ENCUT = 300\n").unwrap();

        let args = BatchArgs {
            input: dir.clone(),
            output: None,
            pattern: "*.yaml".to_string(),
            recursive: false,
            jobs: 2,
            overwrite: false,
            summary: Some(dir.join("summary.csv")),
            translate: translate_args(),
        };
        execute(args).unwrap();

        let written = fs::read_to_string(dir.join("full.INCAR")).unwrap();
        assert!(written.contains("EDIFFG = -0.01\n"));
        assert!(written.contains("IBRION = 2\n"));
        assert!(written.contains("ISIF = 3\n"));
        assert!(written.contains("NSW = 60\n"));

        assert!(!dir.join("bad.INCAR").exists());
        assert_eq!(fs::read_to_string(dir.join("done.INCAR")).unwrap(), "ENCUT = 300\n");

        let summary = fs::read_to_string(dir.join("summary.csv")).unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "request,status,ibrion,isif,nsw,ediffg,message");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("bad.yaml,failed"));
        assert!(lines[2].contains("done.yaml,skipped"));
        assert!(lines[3].contains("full.yaml,ok,2,3,60,-0.01"));
        assert!(lines[3].contains("force cutoff"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_batch_without_matches() {
        let dir = scratch_dir("batch-empty");
        let args = BatchArgs {
            input: dir.clone(),
            output: None,
            pattern: "*.yaml".to_string(),
            recursive: false,
            jobs: 1,
            overwrite: false,
            summary: None,
            translate: translate_args(),
        };
        assert!(matches!(execute(args), Err(MassageError::NoFilesFound { .. })));
        fs::remove_dir_all(&dir).ok();
    }
}
