use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::cache::{get_json, keys, put_json};
use crate::config::AppConfig;
use crate::models::students::requests::{StudentListParams, StudentListQuery};
use crate::models::students::responses::StudentListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    params: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let query = StudentListQuery::from(params);
    let key = format!(
        "{}:{}:{}:{}",
        keys::ALL_STUDENTS,
        query.page,
        query.size,
        query.class_name.as_deref().unwrap_or_default()
    );

    if let Some(cached) = get_json::<StudentListResponse>(cache.as_ref(), &key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(cached, "查询成功")));
    }

    match storage.list_students_with_pagination(query).await {
        Ok(response) => {
            put_json(
                cache.as_ref(),
                &key,
                &response,
                AppConfig::get().cache.default_ttl,
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学生成绩失败: {e}"),
            )),
        ),
    }
}
