use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 答题记录查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct QuestionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_name: Option<String>,
    pub creator: Option<String>,
}

// 答题记录列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct QuestionListQuery {
    pub page: u64,
    pub size: u64,
    pub class_name: Option<String>,
    pub creator: Option<String>,
}

impl From<QuestionListParams> for QuestionListQuery {
    fn from(params: QuestionListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            class_name: params.class_name.filter(|s| !s.trim().is_empty()),
            creator: params.creator.filter(|s| !s.trim().is_empty()),
        }
    }
}

// 从外部存储目录批量导入
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct StorageImportRequest {
    // 为空时导入目录下全部 .xlsx
    #[serde(default)]
    pub files: Vec<String>,
}
