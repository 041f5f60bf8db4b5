//! 目录批量重命名
//!
//! 预览与执行使用同一个自然排序，只要目录内容未变，两次得到的计划一致。
//! 目标目录与源目录相同时原地重命名，否则复制到目标目录，源文件保持不动。

use actix_web::{HttpResponse, Result as ActixResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{GraderError, Result};
use crate::models::renames::requests::DirectoryRenameRequest;
use crate::models::renames::responses::{RenameEntry, RenameResponse, RenameStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_name::lowercase_extension;
use crate::utils::rename_rule::{RenamePair, RenameRule, plan};
use crate::utils::sort_names;
use crate::utils::validate::{resolve_within, validate_file_name};

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// 列出目录下参与重命名的文件（自然排序）
pub async fn list_rename_candidates(dir: &Path, supported: &[String]) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        GraderError::file_operation(format!("无法读取目录 '{}': {e}", dir.display()))
    })?;

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if IGNORED_FILES.contains(&name.as_str()) {
            continue;
        }
        let ext = lowercase_extension(&name);
        if supported.iter().any(|s| s.eq_ignore_ascii_case(&ext)) {
            names.push(name);
        }
    }

    sort_names(&mut names);
    Ok(names)
}

/// 生成重命名计划，不改动文件
pub async fn preview_directory(
    source: &Path,
    rule: &RenameRule,
    supported: &[String],
) -> Result<Vec<RenameEntry>> {
    let files = list_rename_candidates(source, supported).await?;
    Ok(plan(&files, rule)
        .into_iter()
        .map(|pair| {
            let status = if pair.is_changed() {
                RenameStatus::WillRename
            } else {
                RenameStatus::Unchanged
            };
            entry(pair, status, None)
        })
        .collect())
}

fn entry(pair: RenamePair, status: RenameStatus, error: Option<String>) -> RenameEntry {
    RenameEntry {
        original: pair.original,
        renamed: pair.renamed,
        status,
        error,
    }
}

async fn rename_in_place(dir: &Path, pair: &RenamePair) -> Result<RenameStatus> {
    if !pair.is_changed() {
        return Ok(RenameStatus::Unchanged);
    }
    let destination = dir.join(&pair.renamed);
    // 不覆盖已有文件
    if tokio::fs::try_exists(&destination).await? {
        return Err(GraderError::file_operation(format!(
            "目标文件 '{}' 已存在",
            pair.renamed
        )));
    }
    tokio::fs::rename(dir.join(&pair.original), destination).await?;
    Ok(RenameStatus::Renamed)
}

async fn copy_to(source: &Path, target: &Path, pair: &RenamePair) -> Result<RenameStatus> {
    tokio::fs::create_dir_all(target).await?;
    tokio::fs::copy(source.join(&pair.original), target.join(&pair.renamed)).await?;
    Ok(RenameStatus::Copied)
}

/// 执行重命名，单个文件失败不影响其余文件
pub async fn apply_directory(
    source: &Path,
    target: Option<&Path>,
    rule: &RenameRule,
    supported: &[String],
) -> Result<Vec<RenameEntry>> {
    let files = list_rename_candidates(source, supported).await?;
    let target = target.filter(|t| *t != source);

    let mut entries = Vec::with_capacity(files.len());
    for pair in plan(&files, rule) {
        if let Err(msg) = validate_file_name(&pair.renamed) {
            entries.push(entry(pair, RenameStatus::Failed, Some(msg.to_string())));
            continue;
        }

        let outcome = match target {
            Some(target) => copy_to(source, target, &pair).await,
            None => rename_in_place(source, &pair).await,
        };
        match outcome {
            Ok(status) => entries.push(entry(pair, status, None)),
            Err(e) => {
                warn!("重命名 {} -> {} 失败: {}", pair.original, pair.renamed, e);
                let message = e.message().to_string();
                entries.push(entry(pair, RenameStatus::Failed, Some(message)));
            }
        }
    }

    Ok(entries)
}

struct ResolvedRequest {
    source: PathBuf,
    target: Option<PathBuf>,
    rule: RenameRule,
}

fn resolve_request(body: &DirectoryRenameRequest) -> Result<ResolvedRequest> {
    let workspace = Path::new(&AppConfig::get().rename.workspace_dir);
    let source = resolve_within(workspace, &body.source_dir)?;
    let target = match body.target_dir.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => Some(resolve_within(workspace, dir)?),
        _ => None,
    };
    let rule = RenameRule::from_options(&body.rule)?;
    Ok(ResolvedRequest {
        source,
        target,
        rule,
    })
}

fn error_response(e: &GraderError) -> HttpResponse {
    let code = ErrorCode::from_error(e);
    if e.is_client_error() {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(code, e.message()))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, e.message()))
    }
}

pub async fn handle_preview(body: DirectoryRenameRequest) -> ActixResult<HttpResponse> {
    let request = match resolve_request(&body) {
        Ok(request) => request,
        Err(e) => return Ok(error_response(&e)),
    };
    let supported = &AppConfig::get().rename.supported_extensions;

    match preview_directory(&request.source, &request.rule, supported).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RenameResponse::from_entries(entries),
            "预览生成成功",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_apply(body: DirectoryRenameRequest) -> ActixResult<HttpResponse> {
    let request = match resolve_request(&body) {
        Ok(request) => request,
        Err(e) => return Ok(error_response(&e)),
    };
    let supported = &AppConfig::get().rename.supported_extensions;

    match apply_directory(
        &request.source,
        request.target.as_deref(),
        &request.rule,
        supported,
    )
    .await
    {
        Ok(entries) => {
            let response = RenameResponse::from_entries(entries);
            info!(
                "目录 {} 重命名完成: 共 {} 个，变更 {} 个，失败 {} 个",
                request.source.display(),
                response.total,
                response.changed,
                response.failed
            );
            if response.failed == 0 {
                Ok(HttpResponse::Ok().json(ApiResponse::success(response, "重命名完成")))
            } else {
                Ok(HttpResponse::Ok().json(ApiResponse::error(
                    ErrorCode::RenameFailed,
                    response,
                    "部分文件重命名失败",
                )))
            }
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rename_rule::KeepParts;

    use tempfile::TempDir;

    fn temp_dir() -> (TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        (tmp, dir)
    }

    fn supported() -> Vec<String> {
        vec![".xlsx".to_string(), ".txt".to_string()]
    }

    fn last_two() -> RenameRule {
        RenameRule::Delimiter {
            delimiter: "_".to_string(),
            keep: KeepParts::Last(2),
            replacement: None,
        }
    }

    #[tokio::test]
    async fn test_candidates_filtered_and_sorted() {
        let (_tmp, dir) = temp_dir();
        for name in ["file10.txt", "file2.txt", "file1.TXT", ".DS_Store", "run.exe"] {
            tokio::fs::write(dir.join(name), b"x").await.unwrap();
        }
        tokio::fs::create_dir(dir.join("nested.txt")).await.unwrap();

        let names = list_rename_candidates(&dir, &supported()).await.unwrap();
        assert_eq!(names, vec!["file1.TXT", "file2.txt", "file10.txt"]);
    }

    #[tokio::test]
    async fn test_preview_then_apply_in_place() {
        let (_tmp, dir) = temp_dir();
        tokio::fs::write(dir.join("2506106_dzz_练习1_张三.xlsx"), b"a").await.unwrap();
        tokio::fs::write(dir.join("练习1_李四.xlsx"), b"b").await.unwrap();

        let preview = preview_directory(&dir, &last_two(), &supported()).await.unwrap();
        assert_eq!(preview.len(), 2);
        let changed: Vec<_> = preview
            .iter()
            .filter(|e| e.status == RenameStatus::WillRename)
            .collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].renamed, "练习1_张三.xlsx");
        // 预览不改动文件
        assert!(dir.join("2506106_dzz_练习1_张三.xlsx").exists());

        let applied = apply_directory(&dir, None, &last_two(), &supported()).await.unwrap();
        let response = RenameResponse::from_entries(applied);
        assert_eq!(response.changed, 1);
        assert_eq!(response.failed, 0);
        assert!(dir.join("练习1_张三.xlsx").exists());
        assert!(dir.join("练习1_李四.xlsx").exists());
        assert!(!dir.join("2506106_dzz_练习1_张三.xlsx").exists());
    }

    #[tokio::test]
    async fn test_apply_refuses_to_overwrite() {
        let (_tmp, dir) = temp_dir();
        tokio::fs::write(dir.join("a_x.txt"), b"old").await.unwrap();
        tokio::fs::write(dir.join("b_x.txt"), b"keep").await.unwrap();
        tokio::fs::write(dir.join("x.txt"), b"existing").await.unwrap();

        let rule = RenameRule::Delimiter {
            delimiter: "_".to_string(),
            keep: KeepParts::Last(1),
            replacement: None,
        };
        let entries = apply_directory(&dir, None, &rule, &supported()).await.unwrap();
        let failed = entries
            .iter()
            .filter(|e| e.status == RenameStatus::Failed)
            .count();
        assert_eq!(failed, 2);
        assert_eq!(tokio::fs::read(dir.join("x.txt")).await.unwrap(), b"existing");
    }

    #[tokio::test]
    async fn test_apply_copies_into_target() {
        let (_tmp, dir) = temp_dir();
        tokio::fs::write(dir.join("a.xlsx"), b"a").await.unwrap();
        tokio::fs::write(dir.join("b.xlsx"), b"b").await.unwrap();
        let target = dir.join("out");

        let rule = RenameRule::OrderedList(vec!["张三".to_string(), "李四".to_string()]);
        let entries = apply_directory(&dir, Some(&target), &rule, &supported())
            .await
            .unwrap();
        assert!(entries.iter().all(|e| e.status == RenameStatus::Copied));
        assert_eq!(tokio::fs::read(target.join("张三.xlsx")).await.unwrap(), b"a");
        assert_eq!(tokio::fs::read(target.join("李四.xlsx")).await.unwrap(), b"b");
        // 源文件保留
        assert!(dir.join("a.xlsx").exists());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let (_tmp, root) = temp_dir();
        let dir = root.join("missing");
        assert!(
            preview_directory(&dir, &last_two(), &supported())
                .await
                .is_err()
        );
    }
}
