use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生单次导入的总分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct AggregateScore {
    pub id: i64,
    pub name: String,
    pub class_name: String,
    pub score: i64,
}
