use actix_web::{HttpResponse, Result as ActixResult};
use tracing::error;

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::download::{XLSX_CONTENT_TYPE, file_response};
use crate::utils::spreadsheet::{TemplateKind, build_template};

pub async fn download_template(kind: &str) -> ActixResult<HttpResponse> {
    let Some(kind) = TemplateKind::parse(kind) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "模板类型只能是 standard 或 answer",
        )));
    };

    match build_template(kind) {
        Ok(body) => Ok(file_response(kind.file_name(), XLSX_CONTENT_TYPE, body)),
        Err(e) => {
            error!("生成模板失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("生成模板失败: {e}"),
                )),
            )
        }
    }
}
