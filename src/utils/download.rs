//! 下载响应

use actix_web::HttpResponse;
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 附件形式的 Content-Disposition，非 ASCII 文件名使用 RFC 5987 编码
pub fn attachment(file_name: &str) -> ContentDisposition {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' { c } else { '_' })
        .collect();

    let mut parameters = vec![DispositionParam::Filename(fallback)];
    if !file_name.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext(String::from("UTF-8")),
            language_tag: None,
            value: file_name.as_bytes().to_vec(),
        }));
    }

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

/// 以附件形式返回二进制内容
pub fn file_response(file_name: &str, content_type: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type.to_string())
        .insert_header(attachment(file_name))
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_for_non_ascii_name() {
        let cd = attachment("题目详情.csv");
        assert_eq!(cd.get_filename(), Some("____.csv"));
        assert!(
            cd.parameters
                .iter()
                .any(|p| matches!(p, DispositionParam::FilenameExt(_)))
        );
    }

    #[test]
    fn test_attachment_for_ascii_name() {
        let cd = attachment("questions.csv");
        assert_eq!(cd.get_filename(), Some("questions.csv"));
        assert_eq!(cd.parameters.len(), 1);
    }
}
