use actix_web::{HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::models::storage_files::requests::{DeleteStoredFilesRequest, StoredFileListParams};
use crate::services::StorageFileService;

// 懒加载的全局 STORAGE_FILE_SERVICE 实例
static STORAGE_FILE_SERVICE: Lazy<StorageFileService> =
    Lazy::new(StorageFileService::new_lazy);

pub async fn upload(payload: actix_multipart::Multipart) -> ActixResult<HttpResponse> {
    STORAGE_FILE_SERVICE.upload(payload).await
}

pub async fn list_categories() -> ActixResult<HttpResponse> {
    STORAGE_FILE_SERVICE.list_categories().await
}

pub async fn list_files(query: web::Query<StoredFileListParams>) -> ActixResult<HttpResponse> {
    STORAGE_FILE_SERVICE.list_files(query.into_inner()).await
}

pub async fn delete_files(body: web::Json<DeleteStoredFilesRequest>) -> ActixResult<HttpResponse> {
    STORAGE_FILE_SERVICE.delete_files(body.into_inner()).await
}

pub async fn download(path: web::Path<(String, String)>) -> ActixResult<HttpResponse> {
    let (category, name) = path.into_inner();
    STORAGE_FILE_SERVICE.download(&category, &name).await
}

pub async fn preview(path: web::Path<(String, String)>) -> ActixResult<HttpResponse> {
    let (category, name) = path.into_inner();
    STORAGE_FILE_SERVICE.preview(&category, &name).await
}

pub async fn stats() -> ActixResult<HttpResponse> {
    STORAGE_FILE_SERVICE.stats().await
}

// 配置路由
pub fn configure_storage_files_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/storage")
            .route("/upload", web::post().to(upload))
            .route("/categories", web::get().to(list_categories))
            .service(
                web::resource("/files")
                    .route(web::get().to(list_files))
                    .route(web::delete().to(delete_files)),
            )
            .service(
                web::resource("/download/{category}/{name}")
                    .wrap(middleware::Compress::default())
                    .route(web::get().to(download)),
            )
            .route("/preview/{category}/{name}", web::get().to(preview))
            .route("/stats", web::get().to(stats)),
    );
}
