use serde::Serialize;
use ts_rs::TS;

// 单个文件的处理状态
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "rename.ts")]
pub enum RenameStatus {
    WillRename, // 预览：将被重命名
    Unchanged,  // 无需更改
    Renamed,    // 已在原目录重命名
    Copied,     // 已复制到目标目录
    Failed,     // 处理失败
}

// 单个文件的重命名结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "rename.ts")]
pub struct RenameEntry {
    pub original: String,
    pub renamed: String,
    pub status: RenameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// 重命名响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "rename.ts")]
pub struct RenameResponse {
    pub total: usize,
    pub changed: usize,
    pub failed: usize,
    pub entries: Vec<RenameEntry>,
}

impl RenameResponse {
    pub fn from_entries(entries: Vec<RenameEntry>) -> Self {
        let changed = entries
            .iter()
            .filter(|e| {
                matches!(
                    e.status,
                    RenameStatus::WillRename | RenameStatus::Renamed | RenameStatus::Copied
                )
            })
            .count();
        let failed = entries
            .iter()
            .filter(|e| e.status == RenameStatus::Failed)
            .count();
        Self {
            total: entries.len(),
            changed,
            failed,
            entries,
        }
    }
}
