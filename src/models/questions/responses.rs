use super::entities::AnswerRecord;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答题记录列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<AnswerRecord>,
    pub pagination: PaginationInfo,
}

// 单个答题卡的导入结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct SheetImportResult {
    pub file_name: String,
    pub success: bool,
    pub message: String,
    pub class_name: Option<String>,
    pub creator: Option<String>,
    pub imported_rows: usize,
    pub matched_rows: usize,
    // 仅学生答题卡有总分
    pub aggregate_score: Option<i64>,
}

// 批量导入响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct BatchImportResponse {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub results: Vec<SheetImportResult>,
}

impl BatchImportResponse {
    pub fn from_results(results: Vec<SheetImportResult>) -> Self {
        let success = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            success,
            failed: results.len() - success,
            results,
        }
    }
}
