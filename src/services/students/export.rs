use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::errors::Result;
use crate::models::students::entities::AggregateScore;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::download::file_response;
use crate::utils::spreadsheet::write_csv_with_bom;

const EXPORT_FILE_NAME: &str = "学生成绩.csv";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub fn students_to_csv(scores: &[AggregateScore]) -> Result<Vec<u8>> {
    write_csv_with_bom(
        &["ID", "姓名", "班级", "总分"],
        scores.iter().map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.class_name.clone(),
                s.score.to_string(),
            ]
        }),
    )
}

pub async fn export_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let scores = match storage.list_all_students().await {
        Ok(scores) => scores,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生成绩失败: {e}"),
                )),
            );
        }
    };

    match students_to_csv(&scores) {
        Ok(body) => Ok(file_response(EXPORT_FILE_NAME, CSV_CONTENT_TYPE, body)),
        Err(e) => {
            error!("导出学生成绩失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("导出失败: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_students_csv() {
        let scores = vec![
            AggregateScore {
                id: 1,
                name: "张三".to_string(),
                class_name: "2401".to_string(),
                score: 12,
            },
            AggregateScore {
                id: 2,
                name: "李四".to_string(),
                class_name: "2401".to_string(),
                score: 0,
            },
        ];
        let text = String::from_utf8(students_to_csv(&scores).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["\u{FEFF}ID,姓名,班级,总分", "1,张三,2401,12", "2,李四,2401,0"]
        );
    }
}
