use serde::Deserialize;
use ts_rs::TS;

// 文件列表查询
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct StoredFileListParams {
    pub category: String,
}

// 批量删除请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "storage.ts")]
pub struct DeleteStoredFilesRequest {
    pub category: String,
    pub files: Vec<String>,
}
