use actix_web::{HttpResponse, Result as ActixResult};
use std::path::Path;

use super::{error_response, store};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::storage_files::requests::StoredFileListParams;
use crate::models::storage_files::responses::{CategoryListResponse, StoredFileListResponse};

pub async fn list_categories() -> ActixResult<HttpResponse> {
    let categories = AppConfig::get().storage.categories.clone();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CategoryListResponse { categories },
        "查询成功",
    )))
}

pub async fn list_files(query: StoredFileListParams) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().storage;
    let dir = match store::category_dir(Path::new(&config.root), &query.category, &config.categories)
        .await
    {
        Ok(dir) => dir,
        Err(e) => return Ok(error_response(&e)),
    };

    match store::list_files(&dir).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StoredFileListResponse {
                category: query.category,
                items,
            },
            "查询成功",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn storage_stats() -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().storage;
    match store::collect_stats(Path::new(&config.root), &config.categories).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}
