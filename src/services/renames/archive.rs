//! 上传文件按规则重命名后打包下载

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::{info, warn};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::errors::Result;
use crate::models::renames::requests::RenameRuleOptions;
use crate::models::renames::responses::{RenameEntry, RenameStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::download::file_response;
use crate::utils::multipart::{MultipartForm, UploadedFile, read_multipart};
use crate::utils::natural_cmp;
use crate::utils::rename_rule::{RenameRule, plan};
use crate::utils::validate::upload_base_name;

const ARCHIVE_FILE_NAME: &str = "renamed_files.zip";
const ZIP_CONTENT_TYPE: &str = "application/zip";

/// 打包结果
pub struct RenamedArchive {
    pub data: Vec<u8>,
    pub entries: Vec<RenameEntry>,
}

impl RenamedArchive {
    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == RenameStatus::Failed)
            .count()
    }
}

/// 按自然排序计算新名称并写入 ZIP，重名的文件跳过
pub fn build_archive(mut files: Vec<UploadedFile>, rule: &RenameRule) -> Result<RenamedArchive> {
    files.sort_by(|a, b| natural_cmp(&a.file_name, &b.file_name));
    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    let pairs = plan(&names, rule);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(files.len());

    for (file, pair) in files.iter().zip(pairs) {
        if !seen.insert(pair.renamed.clone()) {
            warn!("压缩包中已存在 {}，跳过 {}", pair.renamed, pair.original);
            entries.push(RenameEntry {
                original: pair.original,
                renamed: pair.renamed,
                status: RenameStatus::Failed,
                error: Some("新文件名重复，已跳过".to_string()),
            });
            continue;
        }

        writer.start_file(pair.renamed.as_str(), options)?;
        writer.write_all(&file.data)?;
        let status = if pair.is_changed() {
            RenameStatus::Renamed
        } else {
            RenameStatus::Unchanged
        };
        entries.push(RenameEntry {
            original: pair.original,
            renamed: pair.renamed,
            status,
            error: None,
        });
    }

    let data = writer.finish()?.into_inner();
    Ok(RenamedArchive { data, entries })
}

fn rule_options(form: &MultipartForm) -> RenameRuleOptions {
    RenameRuleOptions {
        rename_list: form.field("rename_list").map(str::to_string),
        custom_rule: form.field("custom_rule").map(str::to_string),
        delimiter: form.field("delimiter").unwrap_or("_").to_string(),
        keep_parts: form.field("keep_parts").unwrap_or("last:2").to_string(),
        replacement: form.field("replacement").map(str::to_string),
    }
}

pub async fn handle_archive(payload: Multipart) -> ActixResult<HttpResponse> {
    let form = match read_multipart(payload, None).await {
        Ok(form) => form,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {}", e.message()),
            )));
        }
    };

    let rule = match RenameRule::from_options(&rule_options(&form)) {
        Ok(rule) => rule,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RenameRuleInvalid,
                e.message(),
            )));
        }
    };

    let files: Vec<UploadedFile> = form
        .files
        .into_iter()
        .filter_map(|file| {
            upload_base_name(&file.file_name).map(|name| UploadedFile {
                file_name: name,
                ..file
            })
        })
        .collect();
    if files.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "请至少上传一个文件",
        )));
    }

    match build_archive(files, &rule) {
        Ok(archive) => {
            let skipped = archive.skipped();
            info!(
                "生成重命名压缩包: {} 个文件，跳过 {} 个",
                archive.entries.len(),
                skipped
            );
            let mut response = file_response(ARCHIVE_FILE_NAME, ZIP_CONTENT_TYPE, archive.data);
            if let Ok(value) = actix_web::http::header::HeaderValue::from_str(&skipped.to_string())
            {
                response.headers_mut().insert(
                    actix_web::http::header::HeaderName::from_static("x-skipped-files"),
                    value,
                );
            }
            Ok(response)
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::from_error(&e),
                format!("打包失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn upload(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            data: data.to_vec(),
            oversized: false,
        }
    }

    #[test]
    fn test_archive_uses_sorted_order_and_new_names() {
        let files = vec![upload("b.xlsx", b"second"), upload("a.xlsx", b"first")];
        let rule = RenameRule::OrderedList(vec!["张三".to_string(), "李四".to_string()]);

        let archive = build_archive(files, &rule).unwrap();
        assert_eq!(archive.skipped(), 0);

        let mut zip = zip::ZipArchive::new(Cursor::new(archive.data)).unwrap();
        assert_eq!(zip.len(), 2);
        let mut content = String::new();
        zip.by_name("张三.xlsx")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_duplicate_names_are_skipped() {
        let files = vec![upload("1_x.txt", b"a"), upload("2_x.txt", b"b")];
        let rule = RenameRule::Template("result".to_string());

        let archive = build_archive(files, &rule).unwrap();
        assert_eq!(archive.skipped(), 1);
        assert_eq!(archive.entries[1].status, RenameStatus::Failed);

        let zip = zip::ZipArchive::new(Cursor::new(archive.data)).unwrap();
        assert_eq!(zip.len(), 1);
    }
}
