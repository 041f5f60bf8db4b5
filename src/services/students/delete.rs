use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::models::{ApiResponse, DeleteResponse, ErrorCode};

pub async fn delete_students(
    service: &StudentService,
    request: &HttpRequest,
    id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;

    match storage.delete_students(id).await {
        Ok(0) if id.is_some() => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "学生成绩不存在"))),
        Ok(deleted) => {
            cache.invalidate_all().await;
            info!("删除学生成绩 {} 条 (id: {:?})", deleted, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DeleteResponse { deleted },
                "删除成功",
            )))
        }
        Err(e) => {
            error!("删除学生成绩失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除学生成绩失败: {e}"),
                )),
            )
        }
    }
}
