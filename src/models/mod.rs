//! 数据模型定义
//!
//! - `entities`: 业务实体
//! - `requests`: 请求参数
//! - `responses`: 响应结构

pub mod common;
pub mod questions;
pub mod renames;
pub mod storage_files;
pub mod students;
pub mod system;

pub use common::{ApiResponse, DeleteResponse, PaginationInfo, PaginationQuery};

use crate::errors::GraderError;

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,

    // 文件
    FileUploadFailed = 3000,
    FileNotFound = 3001,
    FileTypeNotAllowed = 3002,
    FileSizeExceeded = 3003,
    FileDeleteFailed = 3004,
    StorageCategoryInvalid = 3005,

    // 答题卡导入
    ImportFileParseFailed = 4000,
    ImportFileMissingColumn = 4001,
    ImportFileDataInvalid = 4002,
    ImportFileNameInvalid = 4003,
    ImportFailed = 4004,

    // 重命名
    RenameRuleInvalid = 4100,
    RenameFailed = 4101,

    // 服务端
    InternalServerError = 5000,
    ExportFailed = 5001,
}

impl ErrorCode {
    /// 将内部错误映射为业务错误码
    pub fn from_error(err: &GraderError) -> Self {
        match err {
            GraderError::Validation(_) => ErrorCode::ValidationFailed,
            GraderError::NotFound(_) => ErrorCode::NotFound,
            GraderError::Spreadsheet(_) => ErrorCode::ImportFileParseFailed,
            GraderError::RenameRule(_) => ErrorCode::RenameRuleInvalid,
            GraderError::Archive(_) => ErrorCode::ExportFailed,
            _ => ErrorCode::InternalServerError,
        }
    }
}
