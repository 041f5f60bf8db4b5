//! 答题卡导入
//!
//! 每个文件独立处理：解析文件名、读取表格、加载标准答案、评分、单事务写入，
//! 成功后清空读缓存。单个文件失败不影响同批次的其他文件。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;
use tracing::{error, info, warn};

use super::QuestionService;
use super::grading::grade_sheet;
use crate::cache::{ObjectCache, get_json, keys, put_json};
use crate::config::AppConfig;
use crate::models::questions::entities::StandardAnswer;
use crate::models::questions::requests::StorageImportRequest;
use crate::models::questions::responses::{BatchImportResponse, SheetImportResult};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::multipart::{UploadedFile, read_multipart};
use crate::utils::spreadsheet::parse_sheet;
use crate::utils::validate::{upload_base_name, validate_file_name};
use crate::utils::{parse_upload_name, sort_names};

/// 导入所需的依赖与参数
pub struct ImportContext<'a> {
    pub storage: &'a dyn Storage,
    pub cache: &'a dyn ObjectCache,
    pub admin_identity: &'a str,
    pub max_rows: usize,
    pub cache_ttl: u64,
}

impl SheetImportResult {
    fn failed(file_name: &str, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.to_string(),
            success: false,
            message: message.into(),
            class_name: None,
            creator: None,
            imported_rows: 0,
            matched_rows: 0,
            aggregate_score: None,
        }
    }
}

/// 读取标准答案，先查缓存；读取失败时按无标准答案处理
async fn load_standard_answers(
    ctx: &ImportContext<'_>,
    class_name: &str,
) -> Vec<StandardAnswer> {
    let cache_key = keys::standard_answers(ctx.admin_identity, class_name);
    if let Some(key) = get_json::<Vec<StandardAnswer>>(ctx.cache, &cache_key).await {
        return key;
    }

    match ctx
        .storage
        .list_standard_answers(ctx.admin_identity, class_name)
        .await
    {
        Ok(key) => {
            put_json(ctx.cache, &cache_key, &key, ctx.cache_ttl).await;
            key
        }
        Err(e) => {
            warn!("读取班级 {} 的标准答案失败，按无标准答案处理: {}", class_name, e);
            Vec::new()
        }
    }
}

/// 导入一张答题卡
pub async fn import_answer_sheet(
    ctx: &ImportContext<'_>,
    file_name: &str,
    data: &[u8],
) -> SheetImportResult {
    let upload = match parse_upload_name(file_name) {
        Ok(upload) => upload,
        Err(e) => return SheetImportResult::failed(file_name, e.message()),
    };

    let sheet = match parse_sheet(file_name, data) {
        Ok(sheet) => sheet,
        Err(e) => {
            warn!("答题卡 {} 读取失败: {}", file_name, e);
            return SheetImportResult::failed(
                file_name,
                format!("文件 '{file_name}' 读取失败：{}", e.message()),
            );
        }
    };

    if sheet.rows.len() > ctx.max_rows {
        return SheetImportResult::failed(
            file_name,
            format!("单张答题卡最多支持 {} 行，当前有 {} 行", ctx.max_rows, sheet.rows.len()),
        );
    }

    let is_admin = upload.submitter == ctx.admin_identity;
    let key = if is_admin {
        Vec::new()
    } else {
        let key = load_standard_answers(ctx, &upload.class_name).await;
        if key.is_empty() {
            warn!(
                "班级 {} 没有标准答案，{} 的答题卡全部按 0 分计",
                upload.class_name, upload.submitter
            );
        }
        key
    };

    let batch = match grade_sheet(
        &sheet,
        &upload.submitter,
        &upload.class_name,
        ctx.admin_identity,
        &key,
    ) {
        Ok(batch) => batch,
        Err(e) => {
            return SheetImportResult {
                class_name: Some(upload.class_name),
                creator: Some(upload.submitter),
                ..SheetImportResult::failed(file_name, e.message())
            };
        }
    };

    let matched_rows = batch.matched_rows;
    let aggregate_score = batch.aggregate.as_ref().map(|a| a.score);

    match ctx.storage.save_graded_batch(batch).await {
        Ok(saved) => {
            ctx.cache.invalidate_all().await;
            info!(
                "导入答题卡 {}: 班级 {}，提交者 {}，{} 行，匹配 {} 行",
                file_name, upload.class_name, upload.submitter, saved.imported_rows, matched_rows
            );
            SheetImportResult {
                file_name: file_name.to_string(),
                success: true,
                message: "导入成功".to_string(),
                class_name: Some(upload.class_name),
                creator: Some(upload.submitter),
                imported_rows: saved.imported_rows,
                matched_rows,
                aggregate_score,
            }
        }
        Err(e) => {
            error!("答题卡 {} 写入失败: {}", file_name, e);
            SheetImportResult {
                class_name: Some(upload.class_name),
                creator: Some(upload.submitter),
                ..SheetImportResult::failed(file_name, format!("导入数据时出错: {}", e.message()))
            }
        }
    }
}

/// 导入一个上传的文件
///
/// 浏览器可能带上客户端完整路径，只取最后一段作为文件名。
pub async fn import_uploaded_file(ctx: &ImportContext<'_>, file: &UploadedFile) -> SheetImportResult {
    let Some(name) = upload_base_name(&file.file_name) else {
        return SheetImportResult::failed(
            &file.file_name,
            format!("文件名 '{}' 不合法", file.file_name),
        );
    };
    if file.oversized {
        return SheetImportResult::failed(&name, format!("文件 '{name}' 超过大小限制"));
    }
    import_answer_sheet(ctx, &name, &file.data).await
}

/// 标准答案文件排在前面，其余保持原顺序
pub fn admin_first(names: Vec<String>, admin_identity: &str) -> Vec<String> {
    let marker = admin_identity.to_lowercase();
    let (mut admin, others): (Vec<_>, Vec<_>) = names
        .into_iter()
        .partition(|name| name.to_lowercase().contains(&marker));
    admin.extend(others);
    admin
}

/// 列出导入目录下的全部 .xlsx 文件（自然排序）
pub async fn list_importable_files(dir: &Path) -> crate::errors::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && name.ends_with(".xlsx")
        {
            names.push(name.to_string());
        }
    }
    sort_names(&mut names);
    Ok(names)
}

/// 从外部存储目录批量导入
///
/// 未指定文件时导入目录下全部 .xlsx，并先处理标准答案文件。
pub async fn import_from_directory(
    ctx: &ImportContext<'_>,
    dir: &Path,
    requested: Vec<String>,
) -> crate::errors::Result<BatchImportResponse> {
    let names = if requested.is_empty() {
        admin_first(list_importable_files(dir).await?, ctx.admin_identity)
    } else {
        requested
    };

    let mut results = Vec::with_capacity(names.len());
    for name in names {
        if let Err(msg) = validate_file_name(&name) {
            results.push(SheetImportResult::failed(&name, msg));
            continue;
        }
        let data = match tokio::fs::read(dir.join(&name)).await {
            Ok(data) => data,
            Err(e) => {
                warn!("读取外部存储文件 {} 失败: {}", name, e);
                results.push(SheetImportResult::failed(
                    &name,
                    format!("文件 '{name}' 读取失败：{e}"),
                ));
                continue;
            }
        };
        results.push(import_answer_sheet(ctx, &name, &data).await);
    }

    Ok(BatchImportResponse::from_results(results))
}

fn batch_response(response: BatchImportResponse) -> HttpResponse {
    if response.total == 0 {
        return HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::FileNotFound,
            response,
            "没有可导入的答题卡",
        ));
    }
    if response.failed == 0 {
        HttpResponse::Ok().json(ApiResponse::success(response, "导入成功"))
    } else if response.success > 0 {
        HttpResponse::Ok().json(ApiResponse::error(
            ErrorCode::ImportFailed,
            response,
            "部分答题卡导入失败",
        ))
    } else {
        HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ImportFailed,
            response,
            "答题卡导入失败",
        ))
    }
}

/// 上传导入
pub async fn import_uploaded(
    service: &QuestionService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let config = AppConfig::get();

    let form = match read_multipart(payload, Some(config.storage.max_size)).await {
        Ok(form) => form,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {}", e.message()),
            )));
        }
    };

    let ctx = ImportContext {
        storage: storage.as_ref(),
        cache: cache.as_ref(),
        admin_identity: &config.grading.admin_identity,
        max_rows: config.grading.max_rows,
        cache_ttl: config.cache.default_ttl,
    };

    let mut results = Vec::with_capacity(form.files.len());
    for file in &form.files {
        results.push(import_uploaded_file(&ctx, file).await);
    }

    Ok(batch_response(BatchImportResponse::from_results(results)))
}

/// 外部存储导入
pub async fn import_from_storage(
    service: &QuestionService,
    request: &HttpRequest,
    body: StorageImportRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let config = AppConfig::get();
    let dir = Path::new(&config.storage.root).join(&config.storage.import_category);

    let ctx = ImportContext {
        storage: storage.as_ref(),
        cache: cache.as_ref(),
        admin_identity: &config.grading.admin_identity,
        max_rows: config.grading.max_rows,
        cache_ttl: config.cache.default_ttl,
    };

    match import_from_directory(&ctx, &dir, body.files).await {
        Ok(response) => Ok(batch_response(response)),
        Err(e) => {
            error!("读取导入目录 {} 失败: {}", dir.display(), e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                format!("外部存储目录不可用: {}", dir.display()),
            )))
        }
    }
}
