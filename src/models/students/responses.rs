use super::entities::AggregateScore;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生总分列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub items: Vec<AggregateScore>,
    pub pagination: PaginationInfo,
}
