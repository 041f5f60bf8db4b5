use serde::Serialize;
use ts_rs::TS;

// 存储目录中的文件
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
    pub size_display: String,
    pub modified_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 文件列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct StoredFileListResponse {
    pub category: String,
    pub items: Vec<StoredFile>,
}

// 分类列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

// 单文件操作结果（上传 / 删除）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct FileOperationResult {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// 批量操作响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct FileBatchResponse {
    pub category: String,
    pub succeeded: usize,
    pub results: Vec<FileOperationResult>,
}

impl FileBatchResponse {
    pub fn new(category: String, results: Vec<FileOperationResult>) -> Self {
        Self {
            category,
            succeeded: results.iter().filter(|r| r.success).count(),
            results,
        }
    }
}

// 存储统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct StorageStatsResponse {
    pub file_count: usize,
    pub total_size: u64,
    pub total_size_display: String,
    pub category_count: usize,
}

// 文件预览内容
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "storage.ts")]
pub enum FilePreview {
    Text {
        content: String,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        truncated: bool,
    },
    Unsupported {
        message: String,
    },
}

// 文件预览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct FilePreviewResponse {
    pub category: String,
    pub name: String,
    pub supported: bool,
    pub preview: FilePreview,
}
