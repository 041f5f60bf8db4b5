use std::path::{Component, Path, PathBuf};

use crate::errors::{GraderError, Result};

const MAX_FILE_NAME_BYTES: usize = 255;

/// 单个文件名校验：不能包含路径分隔符，不能是 `.` / `..`
pub fn validate_file_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("File name must not be empty");
    }
    if name.len() > MAX_FILE_NAME_BYTES {
        return Err("File name is too long");
    }
    if name == "." || name == ".." {
        return Err("File name must not be a relative directory");
    }
    if name.contains(['/', '\\', '\0']) {
        return Err("File name must not contain path separators");
    }
    Ok(())
}

/// 分类必须是配置中的一项
pub fn validate_category(category: &str, allowed: &[String]) -> std::result::Result<(), &'static str> {
    validate_file_name(category)?;
    if !allowed.iter().any(|c| c == category) {
        return Err("Unknown storage category");
    }
    Ok(())
}

/// 取上传文件名的最后一段（浏览器可能带上客户端路径）
pub fn upload_base_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    validate_file_name(name).ok().map(|_| name.to_string())
}

/// 把相对路径限定在根目录之内
///
/// 只接受普通路径段，绝对路径和 `..` 一律拒绝。
pub fn resolve_within(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative = relative.trim();
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => {
                return Err(GraderError::validation(format!(
                    "路径 '{relative}' 不合法，只能使用工作目录下的相对路径"
                )));
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("2401_张三.xlsx").is_ok());
        assert!(validate_file_name(".hidden").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("../etc/passwd").is_err());
        assert!(validate_file_name("a\\b").is_err());
        assert!(validate_file_name(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category() {
        let allowed = vec!["文档".to_string(), "图片".to_string()];
        assert!(validate_category("文档", &allowed).is_ok());
        assert!(validate_category("其他", &allowed).is_err());
        assert!(validate_category("../文档", &allowed).is_err());
    }

    #[test]
    fn test_upload_base_name() {
        assert_eq!(
            upload_base_name("C:\\Users\\t\\2401_张三.xlsx").as_deref(),
            Some("2401_张三.xlsx")
        );
        assert_eq!(upload_base_name("dir/a.txt").as_deref(), Some("a.txt"));
        assert_eq!(upload_base_name("dir/"), None);
        assert_eq!(upload_base_name(".."), None);
    }

    #[test]
    fn test_resolve_within() {
        let root = Path::new("/work");
        assert_eq!(
            resolve_within(root, "batch/一班").unwrap(),
            PathBuf::from("/work/batch/一班")
        );
        assert_eq!(resolve_within(root, "./a").unwrap(), PathBuf::from("/work/a"));
        assert_eq!(resolve_within(root, "").unwrap(), PathBuf::from("/work"));
        assert!(resolve_within(root, "../outside").is_err());
        assert!(resolve_within(root, "a/../../b").is_err());
        assert!(resolve_within(root, "/etc").is_err());
    }
}
