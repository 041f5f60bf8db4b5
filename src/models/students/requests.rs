use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 学生总分查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_name: Option<String>,
}

// 学生总分列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: u64,
    pub size: u64,
    pub class_name: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            class_name: params.class_name.filter(|s| !s.trim().is_empty()),
        }
    }
}
