//! 外部存储文件预览
//!
//! 文本类文件直接返回内容，表格只返回表头和前若干行。

use actix_web::{HttpResponse, Result as ActixResult};
use std::path::Path;
use tracing::debug;

use super::{error_response, store};
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::storage_files::responses::{FilePreview, FilePreviewResponse};
use crate::utils::file_name::lowercase_extension;
use crate::utils::spreadsheet::parse_workbook;

/// 表格预览行数
pub const PREVIEW_ROWS: usize = 10;

const TEXT_TYPES: &[&str] = &[".txt", ".py", ".csv"];
const SHEET_TYPES: &[&str] = &[".xlsx", ".xls"];

/// 按扩展名生成预览
pub fn build_preview(name: &str, data: &[u8]) -> FilePreview {
    let ext = lowercase_extension(name);
    if TEXT_TYPES.contains(&ext.as_str()) {
        let text = String::from_utf8_lossy(data);
        return FilePreview::Text {
            content: text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string(),
        };
    }
    if SHEET_TYPES.contains(&ext.as_str()) {
        return match parse_workbook(data) {
            Ok(mut sheet) => {
                let truncated = sheet.rows.len() > PREVIEW_ROWS;
                sheet.rows.truncate(PREVIEW_ROWS);
                FilePreview::Table {
                    header: sheet.header,
                    rows: sheet.rows,
                    truncated,
                }
            }
            Err(e) => {
                debug!("预览表格 {} 失败: {}", name, e);
                FilePreview::Unsupported {
                    message: "无法预览Excel文件".to_string(),
                }
            }
        };
    }
    FilePreview::Unsupported {
        message: "暂不支持此文件类型的预览".to_string(),
    }
}

pub async fn preview_file(category: &str, name: &str) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().storage;
    let dir = match store::category_dir(Path::new(&config.root), category, &config.categories).await
    {
        Ok(dir) => dir,
        Err(e) => return Ok(error_response(&e)),
    };

    let data = match store::read_file(&dir, name).await {
        Ok(data) => data,
        Err(e) => return Ok(error_response(&e)),
    };

    let preview = build_preview(name, &data);
    let supported = !matches!(preview, FilePreview::Unsupported { .. });
    let response = FilePreviewResponse {
        category: category.to_string(),
        name: name.to_string(),
        supported,
        preview,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "预览成功")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_text_preview_strips_bom() {
        let preview = build_preview("notes.CSV", "\u{FEFF}a,b\n1,2\n".as_bytes());
        assert_eq!(
            preview,
            FilePreview::Text {
                content: "a,b\n1,2\n".to_string()
            }
        );

        let script = build_preview("run.py", b"print('hi')\xff");
        assert!(matches!(script, FilePreview::Text { content } if content.starts_with("print('hi')")));
    }

    #[test]
    fn test_sheet_preview_is_capped() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "序号").unwrap();
        worksheet.write_string(0, 1, "答案").unwrap();
        for row in 1..=15u32 {
            worksheet.write_number(row, 0, row as f64).unwrap();
            worksheet.write_string(row, 1, "ls").unwrap();
        }
        let data = workbook.save_to_buffer().unwrap();

        match build_preview("2401_张三.xlsx", &data) {
            FilePreview::Table {
                header,
                rows,
                truncated,
            } => {
                assert_eq!(header, vec!["序号", "答案"]);
                assert_eq!(rows.len(), PREVIEW_ROWS);
                assert_eq!(rows[9], vec!["10", "ls"]);
                assert!(truncated);
            }
            other => panic!("unexpected preview: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_and_broken_files() {
        assert!(matches!(
            build_preview("photo.png", b"\x89PNG"),
            FilePreview::Unsupported { .. }
        ));
        assert_eq!(
            build_preview("broken.xls", b"not a workbook"),
            FilePreview::Unsupported {
                message: "无法预览Excel文件".to_string()
            }
        );
    }
}
