pub mod delete;
pub mod download;
pub mod list;
pub mod preview;
pub mod store;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};

use crate::errors::GraderError;
use crate::models::storage_files::requests::{DeleteStoredFilesRequest, StoredFileListParams};
use crate::models::{ApiResponse, ErrorCode};

pub struct StorageFileService;

impl StorageFileService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn upload(&self, payload: Multipart) -> ActixResult<HttpResponse> {
        upload::handle_upload(payload).await
    }

    pub async fn list_categories(&self) -> ActixResult<HttpResponse> {
        list::list_categories().await
    }

    pub async fn list_files(&self, query: StoredFileListParams) -> ActixResult<HttpResponse> {
        list::list_files(query).await
    }

    pub async fn stats(&self) -> ActixResult<HttpResponse> {
        list::storage_stats().await
    }

    pub async fn delete_files(&self, body: DeleteStoredFilesRequest) -> ActixResult<HttpResponse> {
        delete::delete_files(body).await
    }

    pub async fn download(&self, category: &str, name: &str) -> ActixResult<HttpResponse> {
        download::download_file(category, name).await
    }

    pub async fn preview(&self, category: &str, name: &str) -> ActixResult<HttpResponse> {
        preview::preview_file(category, name).await
    }
}

/// 存储操作错误转为响应
pub(crate) fn error_response(e: &GraderError) -> HttpResponse {
    match e {
        GraderError::Validation(msg) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            msg.as_str(),
        )),
        GraderError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::FileNotFound, msg.as_str())),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("外部存储操作失败: {}", e.message()),
        )),
    }
}
