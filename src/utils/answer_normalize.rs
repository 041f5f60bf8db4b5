//! 答案归一化
//!
//! 答案按命令行的形式归一化后再比较：重定向符号两侧补空格，
//! 选项按固定顺序重排，引号内的内容保持原样。

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

use super::natural_sort::compare_digit_runs;

const REDIRECTION: &str = r"\||[0-9]*&?>[&|]?|[0-9]*<[<]?|[0-9]*>>|<<-|<>|[0-9]*>\(";

static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'[^']*'|"[^"]*""#).expect("Invalid quote regex"));

static REDIRECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("({REDIRECTION})")).expect("Invalid redirection regex"));

static REDIRECTION_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{REDIRECTION})$")).expect("Invalid redirection token regex")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// 重定向符号两侧补空格并压缩空白，引号内的内容不受影响
fn space_redirections(command: &str) -> String {
    let mut protected: Vec<(String, String)> = Vec::new();
    let masked = QUOTED_RE.replace_all(command, |caps: &regex::Captures| {
        let key = format!("__PROTECTED_{}__", protected.len());
        protected.push((key.clone(), caps[0].to_string()));
        key
    });

    let spaced = REDIRECTION_RE.replace_all(&masked, " $1 ");
    let mut cleaned = WHITESPACE_RE.replace_all(&spaced, " ").trim().to_string();

    for (key, token) in &protected {
        cleaned = cleaned.replace(key.as_str(), token);
    }
    cleaned
}

#[derive(Default)]
struct CommandParts<'a> {
    plus: Vec<&'a str>,
    letters: Vec<String>,
    numbers: Vec<String>,
    long: Vec<&'a str>,
    arguments: Vec<&'a str>,
    redirections: Vec<&'a str>,
}

impl<'a> CommandParts<'a> {
    fn classify(&mut self, token: &'a str) {
        if token.starts_with('+') && token.len() > 1 {
            self.plus.push(token);
        } else if token.starts_with("--") && token.len() > 2 {
            self.long.push(token);
        } else if let Some(body) = token.strip_prefix('-').filter(|b| !b.is_empty()) {
            let has_alpha = body.chars().any(char::is_alphabetic);
            let has_digit = body.chars().any(|c| c.is_ascii_digit());

            if body.chars().all(|c| c.is_ascii_digit()) {
                self.numbers.push(token.to_string());
            } else if has_alpha && has_digit {
                // -6v => -v -6，其余字符丢弃
                self.letters.extend(
                    body.chars()
                        .filter(|c| c.is_alphabetic())
                        .map(|c| format!("-{c}")),
                );
                let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
                self.numbers.push(format!("-{digits}"));
            } else if body.chars().all(char::is_alphabetic) {
                self.letters.extend(body.chars().map(|c| format!("-{c}")));
            } else {
                self.arguments.push(token);
            }
        } else {
            self.arguments.push(token);
        }
    }

    fn sort(&mut self) {
        self.plus.sort_by(|a, b| compare_plus(&a[1..], &b[1..]));
        self.letters.sort_by_key(|opt| {
            let c = opt.chars().nth(1).unwrap_or_default();
            (!c.is_lowercase(), c)
        });
        self.numbers
            .sort_by(|a, b| compare_digit_runs(&a[1..], &b[1..]));
    }
}

// 数字在前按数值，其余按小写字母序
fn compare_plus(a: &str, b: &str) -> Ordering {
    let a_num = !a.is_empty() && a.chars().all(|c| c.is_ascii_digit());
    let b_num = !b.is_empty() && b.chars().all(|c| c.is_ascii_digit());
    match (a_num, b_num) {
        (true, true) => compare_digit_runs(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// 命令归一化
///
/// 输出顺序：命令名、`+` 选项、单字母选项、数字选项、长选项、其他参数、重定向。
pub fn normalize_command(command: &str) -> String {
    let cleaned = space_redirections(command.trim());
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let Some((name, rest)) = tokens.split_first() else {
        return cleaned;
    };

    let mut parts = CommandParts::default();
    let mut i = 0;
    while i < rest.len() {
        let token = rest[i];
        // 重定向符号连同目标一起移到末尾
        if REDIRECTION_TOKEN_RE.is_match(token) && i + 1 < rest.len() {
            parts.redirections.push(token);
            parts.redirections.push(rest[i + 1]);
            i += 2;
            continue;
        }
        parts.classify(token);
        i += 1;
    }
    parts.sort();

    let mut normalized: Vec<&str> = vec![name];
    normalized.extend(parts.plus.iter().copied());
    normalized.extend(parts.letters.iter().map(String::as_str));
    normalized.extend(parts.numbers.iter().map(String::as_str));
    normalized.extend(parts.long.iter().copied());
    normalized.extend(parts.arguments.iter().copied());
    normalized.extend(parts.redirections.iter().copied());
    normalized.join(" ")
}

/// 两个答案在归一化后是否一致
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    normalize_command(submitted) == normalize_command(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ordering() {
        assert_eq!(normalize_command("ls -al"), "ls -a -l");
        assert_eq!(normalize_command("ls -la"), "ls -a -l");
        assert_eq!(normalize_command("ls -Ba"), "ls -a -B");
        assert_eq!(normalize_command("tail -6v +3"), "tail +3 -v -6");
        assert_eq!(
            normalize_command("tail +10 +a +B -100 -5"),
            "tail +10 +a +B -5 -100"
        );
        assert_eq!(normalize_command("head -n 5 -v"), "head -n -v 5");
    }

    #[test]
    fn test_redirections() {
        assert_eq!(
            normalize_command("echo hello>/tmp/test.txt"),
            "echo hello > /tmp/test.txt"
        );
        assert_eq!(normalize_command("cat<file.txt"), "cat < file.txt");
        assert_eq!(
            normalize_command("grep error 2>/dev/null"),
            "grep error 2> /dev/null"
        );
        assert_eq!(normalize_command("sort | uniq -c"), "sort -c | uniq");
        assert_eq!(normalize_command("cmd1 2>&1"), "cmd1 2>& 1");
        assert_eq!(
            normalize_command("cmd >>log.txt 2>errors.txt"),
            "cmd log.txt > > 2> errors.txt"
        );
        assert_eq!(
            normalize_command("tail -f -n20 access.log 2>errors.log"),
            "tail -f -n -20 access.log 2> errors.log"
        );
        assert_eq!(
            normalize_command("more +5 -10 /etc/passwd >output.txt"),
            "more +5 -10 /etc/passwd > output.txt"
        );
    }

    #[test]
    fn test_quoted_text_is_protected() {
        assert_eq!(
            normalize_command(r#"echo "hello>world" > output.txt"#),
            r#"echo "hello>world" > output.txt"#
        );
        assert_eq!(
            normalize_command("echo 'Hello>' world"),
            "echo 'Hello>' world"
        );
        assert_eq!(
            normalize_command("echo 'hello world' >>log.txt"),
            "echo 'hello world' log.txt > >"
        );
        assert_eq!(
            normalize_command("find . -name '*.py' | grep import >results.txt"),
            "find -a -e -m -n . '*.py' import | grep > results.txt"
        );
    }

    #[test]
    fn test_edge_inputs() {
        assert_eq!(normalize_command(""), "");
        assert_eq!(normalize_command("   "), "");
        assert_eq!(normalize_command("  ls   -la  "), "ls -a -l");
        // 末尾的重定向符号没有目标时按普通参数处理
        assert_eq!(normalize_command("ls |"), "ls |");
        assert_eq!(
            normalize_command("curl -o - https://example.com > output.bin"),
            "curl -o - https://example.com > output.bin"
        );
    }

    #[test]
    fn test_answers_match() {
        assert!(answers_match("ls -la", "ls -al"));
        assert!(answers_match("ls  -l  -a", "ls -al"));
        assert!(!answers_match("ls -l", "ls -al"));
        assert!(answers_match("B", "B"));
        assert!(!answers_match("A", "B"));
    }
}
