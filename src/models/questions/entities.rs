use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答题记录（标准答案与学生答案共用一张表）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct AnswerRecord {
    pub id: i64,
    pub question: String,
    pub answer: String,
    // 原样保存的分值文本，标准答案中可能出现非数字内容
    pub score: String,
    pub creator: String,
    pub class_name: String,
    pub add_time: chrono::DateTime<chrono::Utc>,
}

/// 标准答案中的一行，按行号与答题卡对齐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardAnswer {
    pub answer: String,
    pub score: String,
}

impl From<AnswerRecord> for StandardAnswer {
    fn from(record: AnswerRecord) -> Self {
        Self {
            answer: record.answer,
            score: record.score,
        }
    }
}

/// 待写入的答题记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnswerRecord {
    pub question: String,
    pub answer: String,
    pub score: String,
}

/// 待写入的学生总分
#[derive(Debug, Clone, PartialEq)]
pub struct NewAggregateScore {
    pub name: String,
    pub class_name: String,
    pub score: i64,
}

/// 一次导入暂存的全部写入，作为单个事务提交
#[derive(Debug, Clone, PartialEq)]
pub struct GradedBatch {
    pub creator: String,
    pub class_name: String,
    pub records: Vec<NewAnswerRecord>,
    pub aggregate: Option<NewAggregateScore>,
    pub matched_rows: usize,
}
