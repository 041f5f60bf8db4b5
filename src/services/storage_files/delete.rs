use actix_web::{HttpResponse, Result as ActixResult};
use std::path::Path;

use super::{error_response, store};
use crate::config::AppConfig;
use crate::models::storage_files::requests::DeleteStoredFilesRequest;
use crate::models::storage_files::responses::FileBatchResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_files(body: DeleteStoredFilesRequest) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().storage;
    if body.files.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "请选择要删除的文件",
        )));
    }

    let dir = match store::category_dir(Path::new(&config.root), &body.category, &config.categories)
        .await
    {
        Ok(dir) => dir,
        Err(e) => return Ok(error_response(&e)),
    };

    let results = store::delete_files(&dir, &body.files).await;
    let response = FileBatchResponse::new(body.category, results);
    if response.succeeded == response.results.len() {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "删除成功")))
    } else {
        Ok(HttpResponse::Ok().json(ApiResponse::error(
            ErrorCode::FileDeleteFailed,
            response,
            "部分文件删除失败",
        )))
    }
}
