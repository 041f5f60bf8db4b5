use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::models::questions::requests::{QuestionListParams, StorageImportRequest};
use crate::services::QuestionService;

// 懒加载的全局 QUESTION_SERVICE 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn import_uploaded(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.import_uploaded(&req, payload).await
}

pub async fn import_from_storage(
    req: HttpRequest,
    body: web::Json<StorageImportRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .import_from_storage(&req, body.into_inner())
        .await
}

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<QuestionListParams>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_questions(&req, query.into_inner()).await
}

pub async fn delete_question(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .delete_questions(&req, Some(id.into_inner()))
        .await
}

pub async fn delete_all_questions(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_questions(&req, None).await
}

pub async fn export_questions(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.export_questions(&req).await
}

pub async fn download_template(kind: web::Path<String>) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.download_template(&kind).await
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .service(
                web::resource("")
                    .route(web::get().to(list_questions))
                    .route(web::delete().to(delete_all_questions)),
            )
            .route("/import", web::post().to(import_uploaded))
            .route("/import/storage", web::post().to(import_from_storage))
            .service(
                web::resource("/export")
                    .wrap(middleware::Compress::default())
                    .route(web::get().to(export_questions)),
            )
            .route("/template/{kind}", web::get().to(download_template))
            // 放在最后，避免吞掉上面的固定路径
            .route("/{id}", web::delete().to(delete_question)),
    );
}
