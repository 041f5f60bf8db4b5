//! 答题记录导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuestionService;
use crate::errors::Result;
use crate::models::questions::entities::AnswerRecord;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::download::file_response;
use crate::utils::spreadsheet::write_csv_with_bom;

const EXPORT_FILE_NAME: &str = "题目详情.csv";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// 生成导出的 CSV 内容
pub fn questions_to_csv(records: &[AnswerRecord]) -> Result<Vec<u8>> {
    write_csv_with_bom(
        &["ID", "题目", "答案", "分值", "提交者", "班级", "导入时间"],
        records.iter().map(|r| {
            vec![
                r.id.to_string(),
                r.question.clone(),
                r.answer.clone(),
                r.score.clone(),
                r.creator.clone(),
                r.class_name.clone(),
                r.add_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        }),
    )
}

pub async fn export_questions(
    service: &QuestionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let records = match storage.list_all_questions().await {
        Ok(records) => records,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询答题记录失败: {e}"),
                )),
            );
        }
    };

    match questions_to_csv(&records) {
        Ok(body) => Ok(file_response(EXPORT_FILE_NAME, CSV_CONTENT_TYPE, body)),
        Err(e) => {
            error!("导出答题记录失败: {}", e);
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
    use chrono::TimeZone;

    #[test]
    fn test_csv_has_bom_and_rows() {
        let records = vec![AnswerRecord {
            id: 1,
            question: "列目录".to_string(),
            answer: "ls -a, -l".to_string(),
            score: "5".to_string(),
            creator: "admin".to_string(),
            class_name: "2401".to_string(),
            add_time: chrono::Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
        }];
        let csv = questions_to_csv(&records).unwrap();
        assert!(csv.starts_with("\u{FEFF}".as_bytes()));

        let text = String::from_utf8(csv).unwrap();
        let lines: Vec<&str> = text.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1,列目录,\"ls -a, -l\",5,admin,2401,2025-03-01 08:00:00"
        );
    }
}
