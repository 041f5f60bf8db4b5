use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::models::students::requests::StudentListParams;
use crate::services::StudentService;

// 懒加载的全局 STUDENT_SERVICE 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn delete_student(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .delete_students(&req, Some(id.into_inner()))
        .await
}

pub async fn delete_all_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_students(&req, None).await
}

pub async fn export_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.export_students(&req).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::delete().to(delete_all_students)),
            )
            .service(
                web::resource("/export")
                    .wrap(middleware::Compress::default())
                    .route(web::get().to(export_students)),
            )
            .route("/{id}", web::delete().to(delete_student)),
    );
}
