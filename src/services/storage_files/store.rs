//! 外部存储目录操作
//!
//! 每个分类对应根目录下的一个子目录，目录不存在时按需创建。

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::{GraderError, Result};
use crate::models::storage_files::responses::{FileOperationResult, StorageStatsResponse, StoredFile};
use crate::utils::file_name::lowercase_extension;
use crate::utils::multipart::UploadedFile;
use crate::utils::validate::{upload_base_name, validate_category, validate_file_name};
use crate::utils::{format_file_size, natural_cmp};

impl FileOperationResult {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            error: None,
        }
    }

    fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// 分类目录，校验分类名并在需要时创建
pub async fn category_dir(root: &Path, category: &str, categories: &[String]) -> Result<PathBuf> {
    validate_category(category, categories).map_err(GraderError::validation)?;
    let dir = root.join(category);
    tokio::fs::create_dir_all(&dir).await?;
    Ok(dir)
}

/// 确保根目录与全部分类目录存在
pub async fn ensure_categories(root: &Path, categories: &[String]) -> Result<()> {
    for category in categories {
        tokio::fs::create_dir_all(root.join(category)).await?;
    }
    Ok(())
}

/// 保存上传的文件，同名文件覆盖
pub async fn save_uploads(
    dir: &Path,
    files: Vec<UploadedFile>,
    allowed_types: &[String],
) -> Vec<FileOperationResult> {
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let Some(name) = upload_base_name(&file.file_name) else {
            results.push(FileOperationResult::failed(file.file_name, "文件名不合法"));
            continue;
        };
        if file.oversized {
            results.push(FileOperationResult::failed(name, "文件超过大小限制"));
            continue;
        }
        let ext = lowercase_extension(&name);
        if !allowed_types.iter().any(|t| t.eq_ignore_ascii_case(&ext)) {
            results.push(FileOperationResult::failed(name, "不支持的文件类型"));
            continue;
        }

        match tokio::fs::write(dir.join(&name), &file.data).await {
            Ok(()) => {
                info!("保存文件 {} ({} 字节)", name, file.data.len());
                results.push(FileOperationResult::ok(name));
            }
            Err(e) => {
                warn!("保存文件 {} 失败: {}", name, e);
                results.push(FileOperationResult::failed(name, format!("保存失败: {e}")));
            }
        }
    }
    results
}

/// 列出目录下的文件（自然排序）
pub async fn list_files(dir: &Path) -> Result<Vec<StoredFile>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let modified_at = metadata
            .modified()
            .ok()
            .map(chrono::DateTime::<chrono::Utc>::from);
        files.push(StoredFile {
            name,
            size: metadata.len(),
            size_display: format_file_size(metadata.len()),
            modified_at,
        });
    }
    files.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    Ok(files)
}

/// 逐个删除文件
pub async fn delete_files(dir: &Path, names: &[String]) -> Vec<FileOperationResult> {
    let mut results = Vec::with_capacity(names.len());
    for name in names {
        if let Err(msg) = validate_file_name(name) {
            results.push(FileOperationResult::failed(name.as_str(), msg));
            continue;
        }
        match tokio::fs::remove_file(dir.join(name)).await {
            Ok(()) => {
                info!("删除文件 {}", dir.join(name).display());
                results.push(FileOperationResult::ok(name.as_str()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                results.push(FileOperationResult::failed(name.as_str(), "文件不存在"));
            }
            Err(e) => {
                warn!("删除文件 {} 失败: {}", name, e);
                results.push(FileOperationResult::failed(
                    name.as_str(),
                    format!("删除失败: {e}"),
                ));
            }
        }
    }
    results
}

/// 读取单个文件
pub async fn read_file(dir: &Path, name: &str) -> Result<Vec<u8>> {
    validate_file_name(name).map_err(GraderError::validation)?;
    match tokio::fs::read(dir.join(name)).await {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(GraderError::not_found(format!("文件 '{name}' 不存在")))
        }
        Err(e) => Err(e.into()),
    }
}

/// 汇总全部分类的文件数与总大小
pub async fn collect_stats(root: &Path, categories: &[String]) -> Result<StorageStatsResponse> {
    let mut file_count = 0;
    let mut total_size = 0;
    for category in categories {
        let dir = root.join(category);
        if !tokio::fs::try_exists(&dir).await? {
            continue;
        }
        for file in list_files(&dir).await? {
            file_count += 1;
            total_size += file.size;
        }
    }
    Ok(StorageStatsResponse {
        file_count,
        total_size,
        total_size_display: format_file_size(total_size),
        category_count: categories.len(),
    })
}
