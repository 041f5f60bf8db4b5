use serde::Deserialize;
use ts_rs::TS;

// 重命名规则选项，三种模式按 名称列表 > 自定义规则 > 分隔符规则 的优先级生效
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "rename.ts")]
pub struct RenameRuleOptions {
    // 每行一个名称
    #[serde(default)]
    pub rename_list: Option<String>,
    // 使用 {filename} 代表原文件名（不含扩展名）
    #[serde(default)]
    pub custom_rule: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    // first:N / last:N / range:A-B / custom:i,j / all
    #[serde(default = "default_keep_parts")]
    pub keep_parts: String,
    #[serde(default)]
    pub replacement: Option<String>,
}

fn default_delimiter() -> String {
    "_".to_string()
}

fn default_keep_parts() -> String {
    "last:2".to_string()
}

// 目录重命名请求，路径相对于重命名工作目录
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "rename.ts")]
pub struct DirectoryRenameRequest {
    pub source_dir: String,
    // 为空时在源目录内原地重命名
    #[serde(default)]
    pub target_dir: Option<String>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub rule: RenameRuleOptions,
}
