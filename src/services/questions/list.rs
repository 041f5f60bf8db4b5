use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::cache::{get_json, keys, put_json};
use crate::config::AppConfig;
use crate::models::questions::requests::{QuestionListParams, QuestionListQuery};
use crate::models::questions::responses::QuestionListResponse;
use crate::models::{ApiResponse, ErrorCode};

fn cache_key(query: &QuestionListQuery) -> String {
    format!(
        "{}:{}:{}:{}:{}",
        keys::ALL_QUESTIONS,
        query.page,
        query.size,
        query.class_name.as_deref().unwrap_or_default(),
        query.creator.as_deref().unwrap_or_default()
    )
}

pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    params: QuestionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let query = QuestionListQuery::from(params);
    let key = cache_key(&query);

    if let Some(cached) = get_json::<QuestionListResponse>(cache.as_ref(), &key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(cached, "查询成功")));
    }

    match storage.list_questions_with_pagination(query).await {
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
                format!("查询答题记录失败: {e}"),
            )),
        ),
    }
}
