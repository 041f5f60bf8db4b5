//! multipart 表单读取

use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;

use crate::errors::{GraderError, Result};

/// 上传的单个文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 客户端给出的原始文件名
    pub file_name: String,
    pub data: Vec<u8>,
    /// 超出大小限制，内容已丢弃
    pub oversized: bool,
}

/// 解析后的表单：文件与普通文本字段
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// 读取整个表单，带文件名的字段视为文件
///
/// 单个文件超过 `max_file_size` 时继续读完该字段但不保留内容。
pub async fn read_multipart(
    mut payload: Multipart,
    max_file_size: Option<usize>,
) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| GraderError::validation(format!("读取表单字段失败: {e}")))?;

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        let mut data = Vec::new();
        let mut oversized = false;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| GraderError::validation(format!("读取数据失败: {e}")))?;
            if oversized {
                continue;
            }
            if max_file_size.is_some_and(|max| data.len() + chunk.len() > max) && file_name.is_some() {
                oversized = true;
                data = Vec::new();
                continue;
            }
            data.extend_from_slice(&chunk);
        }

        match file_name {
            Some(file_name) => form.files.push(UploadedFile {
                file_name,
                data,
                oversized,
            }),
            None => {
                let value = String::from_utf8(data)
                    .map_err(|_| GraderError::validation(format!("字段 '{name}' 不是有效的 UTF-8 文本")))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}
