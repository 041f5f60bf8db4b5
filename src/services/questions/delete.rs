use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuestionService;
use crate::models::{ApiResponse, DeleteResponse, ErrorCode};

pub async fn delete_questions(
    service: &QuestionService,
    request: &HttpRequest,
    id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;

    match storage.delete_questions(id).await {
        Ok(0) if id.is_some() => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "答题记录不存在"))),
        Ok(deleted) => {
            cache.invalidate_all().await;
            info!("删除答题记录 {} 条 (id: {:?})", deleted, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DeleteResponse { deleted },
                "删除成功",
            )))
        }
        Err(e) => {
            error!("删除答题记录失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除答题记录失败: {e}"),
                )),
            )
        }
    }
}
