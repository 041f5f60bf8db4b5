//! 文件名处理

use crate::errors::{GraderError, Result};

/// 拆分主名与扩展名（扩展名含 `.`）
///
/// 取最后一个 `.` 之前的部分为主名；名称开头的连续 `.` 不视为扩展名分隔符。
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading_dots..].rfind('.') {
        Some(pos) => file_name.split_at(leading_dots + pos),
        None => (file_name, ""),
    }
}

/// 小写扩展名，如 `.xlsx`
pub fn lowercase_extension(file_name: &str) -> String {
    split_extension(file_name).1.to_lowercase()
}

/// 答题卡文件名中的班级与提交者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadName {
    pub class_name: String,
    pub submitter: String,
}

/// 解析 `班别_姓名.xlsx` 形式的文件名
///
/// 取第一个 `.` 之前的部分按 `_` 切分，倒数第二段为班级、最后一段为提交者。
pub fn parse_upload_name(file_name: &str) -> Result<UploadName> {
    let invalid = || {
        GraderError::validation(format!(
            "文件 '{file_name}' 命名格式不正确，请按照'班别_姓名.xlsx'格式命名"
        ))
    };

    let stem = file_name.split('.').next().unwrap_or_default();
    let segments: Vec<&str> = stem.split('_').collect();
    if segments.len() < 2 {
        return Err(invalid());
    }

    let class_name = segments[segments.len() - 2].trim();
    let submitter = segments[segments.len() - 1].trim();
    if class_name.is_empty() || submitter.is_empty() {
        return Err(invalid());
    }

    Ok(UploadName {
        class_name: class_name.to_string(),
        submitter: submitter.to_string(),
    })
}

/// 可读的文件大小（B / KB / MB / GB，保留两位小数）
pub fn format_file_size(size: u64) -> String {
    if size == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.xlsx"), ("a", ".xlsx"));
        assert_eq!(split_extension("a.b.c"), ("a.b", ".c"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("..x"), ("..x", ""));
        assert_eq!(split_extension(".a.txt"), (".a", ".txt"));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
        assert_eq!(lowercase_extension("A.XLSX"), ".xlsx");
    }

    #[test]
    fn test_parse_upload_name() {
        let parsed = parse_upload_name("2401_张三.xlsx").unwrap();
        assert_eq!(parsed.class_name, "2401");
        assert_eq!(parsed.submitter, "张三");

        let parsed = parse_upload_name("期中_2401_admin.xlsx").unwrap();
        assert_eq!(parsed.class_name, "2401");
        assert_eq!(parsed.submitter, "admin");

        // 段两侧的空格不计入班级和姓名
        let parsed = parse_upload_name("2401 _ 张三.xlsx").unwrap();
        assert_eq!(parsed.class_name, "2401");
        assert_eq!(parsed.submitter, "张三");
    }

    #[test]
    fn test_parse_upload_name_rejects_malformed() {
        for name in ["noclasslabel.xlsx", "_张三.xlsx", "2401_.xlsx", ""] {
            let err = parse_upload_name(name).unwrap_err();
            assert!(matches!(err, GraderError::Validation(_)), "{name}");
            assert!(err.message().contains("命名格式不正确"));
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
