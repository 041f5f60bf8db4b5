use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,                           // 系统名称
    pub version: String,                               // 服务版本
    pub environment: String,                           // 运行环境
    pub admin_identity: String,                        // 标准答案提交者
    pub max_file_size: u64,                            // 单文件最大字节数
    pub storage_categories: Vec<String>,               // 外部存储分类
    pub started_at: chrono::DateTime<chrono::Utc>,     // 启动时间
    pub uptime_seconds: i64,                           // 已运行秒数
}
