use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};
use std::path::Path;

use super::{error_response, store};
use crate::config::AppConfig;
use crate::models::storage_files::responses::FileBatchResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::multipart::read_multipart;

pub async fn handle_upload(payload: Multipart) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().storage;

    let form = match read_multipart(payload, Some(config.max_size)).await {
        Ok(form) => form,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {}", e.message()),
            )));
        }
    };

    let category = form
        .field("category")
        .map(str::to_string)
        .unwrap_or_else(|| config.import_category.clone());
    if form.files.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "请至少上传一个文件",
        )));
    }

    let dir = match store::category_dir(Path::new(&config.root), &category, &config.categories).await
    {
        Ok(dir) => dir,
        Err(e) => return Ok(error_response(&e)),
    };

    let results = store::save_uploads(&dir, form.files, &config.allowed_types).await;
    let response = FileBatchResponse::new(category, results);
    if response.succeeded == response.results.len() {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "上传成功")))
    } else {
        Ok(HttpResponse::Ok().json(ApiResponse::error(
            ErrorCode::FileUploadFailed,
            response,
            "部分文件上传失败",
        )))
    }
}
