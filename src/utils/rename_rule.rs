//! 批量重命名规则
//!
//! 三种模式互斥，同时配置时按 名称列表 > 自定义模板 > 分隔符规则 的顺序生效。
//! 所有规则只改主名，扩展名原样保留。

use std::str::FromStr;

use crate::errors::{GraderError, Result};
use crate::models::renames::requests::RenameRuleOptions;

use super::file_name::split_extension;

/// 模板中代表原主名的占位符
pub const FILENAME_PLACEHOLDER: &str = "{filename}";

/// 分隔符规则中保留哪些段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepParts {
    /// 前 N 段
    First(usize),
    /// 后 N 段，不足 N 段时全部保留
    Last(usize),
    /// 第 A 到第 B 段（从 1 开始，含两端）
    Range(usize, usize),
    /// 指定下标（从 0 开始），按给出的顺序，越界的下标忽略
    Custom(Vec<i64>),
    All,
}

impl FromStr for KeepParts {
    type Err = GraderError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |detail: &str| GraderError::rename_rule(format!("保留规则 '{s}' 无效: {detail}"));
        let count = |value: &str| -> Result<usize> {
            match value.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(invalid("N 必须是不小于 1 的整数")),
            }
        };

        if s == "all" {
            return Ok(KeepParts::All);
        }
        let Some((kind, value)) = s.split_once(':') else {
            return Err(invalid("格式应为 first:N / last:N / range:A-B / custom:i,j / all"));
        };

        match kind {
            "first" => Ok(KeepParts::First(count(value)?)),
            "last" => Ok(KeepParts::Last(count(value)?)),
            "range" => {
                let (start, end) = value
                    .split_once('-')
                    .ok_or_else(|| invalid("范围格式应为 A-B"))?;
                let start = start.trim().parse::<usize>();
                let end = end.trim().parse::<usize>();
                match (start, end) {
                    (Ok(start), Ok(end)) => Ok(KeepParts::Range(start, end)),
                    _ => Err(invalid("范围两端必须是整数")),
                }
            }
            "custom" => value
                .split(',')
                .map(|i| i.trim().parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(KeepParts::Custom)
                .map_err(|_| invalid("下标必须是逗号分隔的整数")),
            _ => Err(invalid("未知的规则类型")),
        }
    }
}

impl KeepParts {
    /// 从切分后的各段中选取
    pub fn select<'a>(&self, parts: &[&'a str]) -> Vec<&'a str> {
        match self {
            KeepParts::First(n) => parts.iter().take(*n).copied().collect(),
            KeepParts::Last(n) => parts[parts.len().saturating_sub(*n)..].to_vec(),
            KeepParts::Range(start, end) => {
                let start = start.saturating_sub(1);
                let end = (*end).min(parts.len());
                if start >= end {
                    Vec::new()
                } else {
                    parts[start..end].to_vec()
                }
            }
            KeepParts::Custom(indices) => indices
                .iter()
                .filter_map(|&i| usize::try_from(i).ok())
                .filter_map(|i| parts.get(i).copied())
                .collect(),
            KeepParts::All => parts.to_vec(),
        }
    }
}

/// 按分隔符切分主名并保留部分段
///
/// 未选中任何段时返回原文件名。
pub fn extract_name(
    file_name: &str,
    delimiter: &str,
    keep: &KeepParts,
    replacement: Option<&str>,
) -> String {
    let (stem, ext) = split_extension(file_name);
    let parts: Vec<&str> = stem.split(delimiter).collect();
    let selected = keep.select(&parts);
    if selected.is_empty() {
        return file_name.to_string();
    }

    let joiner = replacement.filter(|r| !r.is_empty()).unwrap_or(delimiter);
    format!("{}{ext}", selected.join(joiner))
}

/// 解析名称列表文本：每行一个，去掉首尾空白，跳过空行
pub fn parse_rename_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 重命名规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameRule {
    /// 第 i 个文件（排序后）改名为列表第 i 项，超出列表的文件保持原名
    OrderedList(Vec<String>),
    /// 用原主名替换模板中的 `{filename}`
    Template(String),
    Delimiter {
        delimiter: String,
        keep: KeepParts,
        replacement: Option<String>,
    },
}

impl RenameRule {
    /// 从请求选项中确定生效的规则
    pub fn from_options(options: &RenameRuleOptions) -> Result<Self> {
        if let Some(text) = options.rename_list.as_deref() {
            let names = parse_rename_list(text);
            if !names.is_empty() {
                return Ok(RenameRule::OrderedList(names));
            }
        }

        if let Some(template) = options.custom_rule.as_deref()
            && !template.is_empty()
        {
            return Ok(RenameRule::Template(template.to_string()));
        }

        if options.delimiter.is_empty() {
            return Err(GraderError::rename_rule("分隔符不能为空"));
        }

        Ok(RenameRule::Delimiter {
            delimiter: options.delimiter.clone(),
            keep: options.keep_parts.parse()?,
            replacement: options.replacement.clone().filter(|r| !r.is_empty()),
        })
    }

    /// 计算排序后第 `index` 个文件的新名称
    pub fn rename(&self, index: usize, file_name: &str) -> String {
        match self {
            RenameRule::OrderedList(names) => match names.get(index) {
                Some(name) => format!("{name}{}", split_extension(file_name).1),
                None => file_name.to_string(),
            },
            RenameRule::Template(template) => {
                let (stem, ext) = split_extension(file_name);
                format!("{}{ext}", template.replace(FILENAME_PLACEHOLDER, stem))
            }
            RenameRule::Delimiter {
                delimiter,
                keep,
                replacement,
            } => extract_name(file_name, delimiter, keep, replacement.as_deref()),
        }
    }
}

/// 原名与新名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub original: String,
    pub renamed: String,
}

impl RenamePair {
    pub fn is_changed(&self) -> bool {
        self.original != self.renamed
    }
}

/// 为已排序的文件列表生成重命名计划
pub fn plan<S: AsRef<str>>(sorted_files: &[S], rule: &RenameRule) -> Vec<RenamePair> {
    sorted_files
        .iter()
        .enumerate()
        .map(|(i, name)| RenamePair {
            original: name.as_ref().to_string(),
            renamed: rule.rename(i, name.as_ref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keep(s: &str) -> KeepParts {
        s.parse().unwrap()
    }

    #[test]
    fn test_last_parts() {
        assert_eq!(
            extract_name("2506106_dengzhizhong_练习1_张三.xlsx", "_", &keep("last:2"), None),
            "练习1_张三.xlsx"
        );
        // 段数不足时全部保留
        assert_eq!(extract_name("a_b.txt", "_", &keep("last:5"), None), "a_b.txt");
    }

    #[test]
    fn test_range_parts() {
        assert_eq!(
            extract_name("2506106-dengzhizhong-练习1-张三.xlsx", "-", &keep("range:3-4"), None),
            "练习1-张三.xlsx"
        );
        assert_eq!(
            extract_name("a-b-c.txt", "-", &keep("range:2-9"), Some("_")),
            "b_c.txt"
        );
        // 空范围返回原名
        assert_eq!(extract_name("a-b-c.txt", "-", &keep("range:3-2"), None), "a-b-c.txt");
    }

    #[test]
    fn test_first_and_custom_parts() {
        assert_eq!(extract_name("a_b_c_d.py", "_", &keep("first:2"), None), "a_b.py");
        assert_eq!(
            extract_name("a_b_c_d.py", "_", &keep("custom:3, 0,9,-1"), Some("-")),
            "d-a.py"
        );
        assert_eq!(extract_name("a_b_c_d.py", "_", &keep("custom:7"), None), "a_b_c_d.py");
        assert_eq!(extract_name("a_b.py", "_", &keep("all"), Some("+")), "a+b.py");
    }

    #[test]
    fn test_invalid_selectors() {
        for s in ["first:0", "last:x", "range:3", "range:a-b", "custom:", "middle:2", "last"] {
            let err = s.parse::<KeepParts>().unwrap_err();
            assert!(matches!(err, GraderError::RenameRule(_)), "{s}");
        }
    }

    #[test]
    fn test_ordered_list_rule() {
        let rule = RenameRule::OrderedList(vec!["张三".to_string(), "李四".to_string()]);
        let pairs = plan(&["a.xlsx", "b.xlsx", "c.xlsx"], &rule);
        assert_eq!(pairs[0].renamed, "张三.xlsx");
        assert_eq!(pairs[1].renamed, "李四.xlsx");
        // 超出列表的文件保持原名
        assert_eq!(pairs[2].renamed, "c.xlsx");
        assert!(!pairs[2].is_changed());
    }

    #[test]
    fn test_template_rule() {
        let rule = RenameRule::Template("新文件_{filename}_2024".to_string());
        assert_eq!(rule.rename(0, "报告.pdf"), "新文件_报告_2024.pdf");
    }

    #[test]
    fn test_rule_precedence() {
        let mut options = RenameRuleOptions {
            rename_list: Some("\n 张三 \n\n李四\n".to_string()),
            custom_rule: Some("x_{filename}".to_string()),
            delimiter: "_".to_string(),
            keep_parts: "last:2".to_string(),
            replacement: None,
        };
        assert_eq!(
            RenameRule::from_options(&options).unwrap(),
            RenameRule::OrderedList(vec!["张三".to_string(), "李四".to_string()])
        );

        options.rename_list = Some("   \n".to_string());
        assert_eq!(
            RenameRule::from_options(&options).unwrap(),
            RenameRule::Template("x_{filename}".to_string())
        );

        options.custom_rule = None;
        options.replacement = Some(String::new());
        assert_eq!(
            RenameRule::from_options(&options).unwrap(),
            RenameRule::Delimiter {
                delimiter: "_".to_string(),
                keep: KeepParts::Last(2),
                replacement: None,
            }
        );

        options.delimiter = String::new();
        assert!(RenameRule::from_options(&options).is_err());
    }
}
