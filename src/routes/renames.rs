use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::renames::requests::DirectoryRenameRequest;
use crate::services::RenameService;

// 懒加载的全局 RENAME_SERVICE 实例
static RENAME_SERVICE: Lazy<RenameService> = Lazy::new(RenameService::new_lazy);

pub async fn preview(body: web::Json<DirectoryRenameRequest>) -> ActixResult<HttpResponse> {
    RENAME_SERVICE.preview(body.into_inner()).await
}

pub async fn apply(body: web::Json<DirectoryRenameRequest>) -> ActixResult<HttpResponse> {
    RENAME_SERVICE.apply(body.into_inner()).await
}

pub async fn archive(payload: actix_multipart::Multipart) -> ActixResult<HttpResponse> {
    RENAME_SERVICE.archive(payload).await
}

// 配置路由
pub fn configure_renames_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/renames")
            .route("/preview", web::post().to(preview))
            .route("/apply", web::post().to(apply))
            .route("/archive", web::post().to(archive)),
    );
}
