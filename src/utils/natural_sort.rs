//! 文件名自然排序
//!
//! 数字段按数值比较（`2 < 10`），文字段按小写拼音比较，
//! 非汉字字符按小写原样参与比较。

use once_cell::sync::Lazy;
use pinyin::ToPinyin;
use regex::Regex;
use std::cmp::Ordering;

use super::file_name::split_extension;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("Invalid digits regex"));

/// 排序键中的一段
#[derive(Debug, Clone)]
pub enum SortToken {
    /// 文字段（已转为小写拼音）
    Text(String),
    /// 数字段（原始数字串，可任意长）
    Number(String),
}

impl Ord for SortToken {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortToken::Number(a), SortToken::Number(b)) => compare_digit_runs(a, b),
            (SortToken::Text(a), SortToken::Text(b)) => a.cmp(b),
            // 文字段与数字段交替出现，同一位置不会混合，这里仅为全序
            (SortToken::Number(_), SortToken::Text(_)) => Ordering::Less,
            (SortToken::Text(_), SortToken::Number(_)) => Ordering::Greater,
        }
    }
}

// 相等性与排序一致：`01` 与 `1` 视为相同
impl PartialEq for SortToken {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortToken {}

impl PartialOrd for SortToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 按数值比较两个十进制数字串，不做整数转换因此不会溢出
pub fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn to_pinyin_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c.to_pinyin() {
            Some(p) => out.push_str(p.plain()),
            None => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// 生成排序键：去掉扩展名后按数字 / 非数字切分
///
/// 键总是以文字段开头并交替出现，首尾的文字段可能为空，
/// 因此任意两个键在同一位置上的段类型一致。
pub fn sort_key(file_name: &str) -> Vec<SortToken> {
    let (stem, _) = split_extension(file_name);
    let mut key = Vec::new();
    let mut last = 0;
    for m in DIGITS_RE.find_iter(stem) {
        key.push(SortToken::Text(to_pinyin_lowercase(&stem[last..m.start()])));
        key.push(SortToken::Number(m.as_str().to_string()));
        last = m.end();
    }
    key.push(SortToken::Text(to_pinyin_lowercase(&stem[last..])));
    key
}

/// 比较两个文件名，键相同时按原始名称决定先后
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// 原地自然排序
pub fn sort_names<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| {
        let name = name.as_ref();
        (sort_key(name), name.to_string())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_by_value() {
        let mut names = vec!["file10.txt", "file2.txt", "file1.txt"];
        sort_names(&mut names);
        assert_eq!(names, vec!["file1.txt", "file2.txt", "file10.txt"]);
    }

    #[test]
    fn test_pinyin_ordering() {
        let mut names = vec!["张三.xlsx", "王五.xlsx", "李四.xlsx"];
        sort_names(&mut names);
        assert_eq!(names, vec!["李四.xlsx", "王五.xlsx", "张三.xlsx"]);

        assert_eq!(
            sort_key("练习10_张三.xlsx"),
            vec![
                SortToken::Text("lianxi".to_string()),
                SortToken::Number("10".to_string()),
                SortToken::Text("_zhangsan".to_string()),
            ]
        );
    }

    #[test]
    fn test_mixed_chinese_and_numbers() {
        let mut names = vec!["练习10_张三.xlsx", "练习2_李四.xlsx", "练习2_Alice.xlsx"];
        sort_names(&mut names);
        assert_eq!(
            names,
            vec!["练习2_Alice.xlsx", "练习2_李四.xlsx", "练习10_张三.xlsx"]
        );
    }

    #[test]
    fn test_large_numbers_do_not_overflow() {
        let huge = "report99999999999999999999999999.pdf";
        let small = "report100.pdf";
        assert_eq!(natural_cmp(small, huge), Ordering::Less);
        assert_eq!(compare_digit_runs("007", "7"), Ordering::Equal);
        assert_eq!(compare_digit_runs("0", "00"), Ordering::Equal);
    }

    #[test]
    fn test_ties_broken_by_raw_name() {
        // 键相同（前导零、大小写、扩展名不同）时仍然有确定顺序
        assert_eq!(sort_key("a01.txt"), sort_key("A1.pdf"));
        assert_eq!(natural_cmp("A1.pdf", "a01.txt"), Ordering::Less);
        assert_eq!(natural_cmp("a01.txt", "a01.txt"), Ordering::Equal);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let mut names = vec![
            "第3组.png".to_string(),
            "第10组.png".to_string(),
            "第1组.png".to_string(),
            "readme.txt".to_string(),
            "10.txt".to_string(),
        ];
        sort_names(&mut names);
        let once = names.clone();
        sort_names(&mut names);
        assert_eq!(names, once);
        assert_eq!(names[0], "10.txt");
    }
}
