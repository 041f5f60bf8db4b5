//! 答题卡评分
//!
//! 提交者为管理员时，答题卡本身就是标准答案，分值列原样保存；
//! 否则逐行与同一行号的标准答案比较，归一化后一致即得该行分值。

use tracing::warn;

use crate::errors::{GraderError, Result};
use crate::models::questions::entities::{
    GradedBatch, NewAggregateScore, NewAnswerRecord, StandardAnswer,
};
use crate::utils::answers_match;
use crate::utils::spreadsheet::AnswerSheet;

const QUESTION_COLUMN: usize = 1;
const ANSWER_COLUMN: usize = 2;
const SCORE_COLUMN: usize = 3;
const MIN_COLUMNS: usize = 3;
const DEFAULT_SCORE: &str = "0";

/// 标准答案分值计入总分的数值，非纯数字记 0
fn score_points(score: &str, row: usize) -> i64 {
    if !score.is_empty() && score.bytes().all(|b| b.is_ascii_digit()) {
        match score.parse::<i64>() {
            Ok(points) => return points,
            Err(_) => warn!("第{}行标准答案分值 '{}' 超出范围，按 0 分计", row, score),
        }
    } else {
        warn!("第{}行标准答案分值 '{}' 不是整数，按 0 分计", row, score);
    }
    0
}

/// 评分并生成待写入的记录，不做任何 I/O
pub fn grade_sheet(
    sheet: &AnswerSheet,
    submitter: &str,
    class_name: &str,
    admin_identity: &str,
    key: &[StandardAnswer],
) -> Result<GradedBatch> {
    if sheet.is_empty() {
        return Err(GraderError::validation("Excel文件为空或格式不正确"));
    }
    if sheet.column_count < MIN_COLUMNS {
        return Err(GraderError::validation(format!(
            "Excel文件列数不足，需要至少3列，当前有{}列",
            sheet.column_count
        )));
    }

    let is_admin = submitter == admin_identity;
    let mut records = Vec::with_capacity(sheet.rows.len());
    let mut total: i64 = 0;
    let mut matched_rows = 0;

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_num = index + 1;
        let answer = row.get(ANSWER_COLUMN).ok_or_else(|| {
            GraderError::validation(format!(
                "第{row_num}行数据格式错误：缺少答案列（第{}列）",
                ANSWER_COLUMN + 1
            ))
        })?;
        let question = row.get(QUESTION_COLUMN).cloned().unwrap_or_default();

        let score = if is_admin {
            row.get(SCORE_COLUMN)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SCORE)
                .to_string()
        } else {
            match key.get(index) {
                Some(expected) if answers_match(answer, &expected.answer) => {
                    matched_rows += 1;
                    total = total.saturating_add(score_points(&expected.score, row_num));
                    expected.score.clone()
                }
                _ => DEFAULT_SCORE.to_string(),
            }
        };

        records.push(NewAnswerRecord {
            question,
            answer: answer.clone(),
            score,
        });
    }

    let aggregate = (!is_admin).then(|| NewAggregateScore {
        name: submitter.to_string(),
        class_name: class_name.to_string(),
        score: total,
    });

    Ok(GradedBatch {
        creator: submitter.to_string(),
        class_name: class_name.to_string(),
        records,
        aggregate,
        matched_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> AnswerSheet {
        AnswerSheet {
            header: Vec::new(),
            column_count: rows.iter().map(|r| r.len()).max().unwrap_or(0),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn key(items: &[(&str, &str)]) -> Vec<StandardAnswer> {
        items
            .iter()
            .map(|(answer, score)| StandardAnswer {
                answer: answer.to_string(),
                score: score.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_admin_scores_are_taken_verbatim() {
        let s = sheet(&[
            &["1", "列目录", "ls -l", "5"],
            &["2", "当前路径", "pwd", ""],
            &["3", "附加题", "who", "A"],
        ]);
        let batch = grade_sheet(&s, "admin", "2401", "admin", &[]).unwrap();
        let scores: Vec<&str> = batch.records.iter().map(|r| r.score.as_str()).collect();
        assert_eq!(scores, vec!["5", "0", "A"]);
        assert!(batch.aggregate.is_none());
        assert_eq!(batch.records[0].question, "列目录");
    }

    #[test]
    fn test_admin_without_score_column_defaults_to_zero() {
        let s = sheet(&[&["1", "列目录", "ls -l"]]);
        let batch = grade_sheet(&s, "admin", "2401", "admin", &[]).unwrap();
        assert_eq!(batch.records[0].score, "0");
    }

    #[test]
    fn test_student_scored_against_key_by_position() {
        let s = sheet(&[
            &["1", "列目录", "ls  -la"],
            &["2", "当前路径", "cd"],
            &["3", "查看文件", "cat<a.txt"],
        ]);
        let k = key(&[("ls -al", "5"), ("pwd", "3"), ("cat < a.txt", "2")]);
        let batch = grade_sheet(&s, "张三", "2401", "admin", &k).unwrap();

        let scores: Vec<&str> = batch.records.iter().map(|r| r.score.as_str()).collect();
        assert_eq!(scores, vec!["5", "0", "2"]);
        assert_eq!(batch.matched_rows, 2);
        let aggregate = batch.aggregate.unwrap();
        assert_eq!(aggregate.score, 7);
        assert_eq!(aggregate.name, "张三");
        assert_eq!(aggregate.class_name, "2401");
    }

    #[test]
    fn test_non_numeric_key_score_contributes_zero() {
        let s = sheet(&[&["1", "q", "a"], &["2", "q", "b"]]);
        let k = key(&[("a", "五分"), ("b", "4")]);
        let batch = grade_sheet(&s, "李四", "2401", "admin", &k).unwrap();
        // 行分值仍记录标准答案中的原值
        assert_eq!(batch.records[0].score, "五分");
        assert_eq!(batch.aggregate.unwrap().score, 4);
    }

    #[test]
    fn test_missing_key_degrades_to_zero() {
        let s = sheet(&[&["1", "q", "a"], &["2", "q", "b"]]);
        let batch = grade_sheet(&s, "王五", "2401", "admin", &[]).unwrap();
        assert!(batch.records.iter().all(|r| r.score == "0"));
        assert_eq!(batch.aggregate.unwrap().score, 0);
        assert_eq!(batch.matched_rows, 0);
    }

    #[test]
    fn test_rows_beyond_key_score_zero() {
        let s = sheet(&[&["1", "q", "a"], &["2", "q", "b"]]);
        let k = key(&[("a", "1")]);
        let batch = grade_sheet(&s, "王五", "2401", "admin", &k).unwrap();
        assert_eq!(batch.records[1].score, "0");
        assert_eq!(batch.aggregate.unwrap().score, 1);
    }

    #[test]
    fn test_configured_admin_identity() {
        let s = sheet(&[&["1", "q", "a", "9"]]);
        let batch = grade_sheet(&s, "teacher", "2401", "teacher", &[]).unwrap();
        assert!(batch.aggregate.is_none());
        assert_eq!(batch.records[0].score, "9");

        let batch = grade_sheet(&s, "admin", "2401", "teacher", &[]).unwrap();
        assert!(batch.aggregate.is_some());
    }

    #[test]
    fn test_empty_and_narrow_sheets_rejected() {
        let err = grade_sheet(&AnswerSheet::default(), "张三", "2401", "admin", &[]).unwrap_err();
        assert_eq!(err.message(), "Excel文件为空或格式不正确");

        let narrow = sheet(&[&["1", "q"]]);
        let err = grade_sheet(&narrow, "张三", "2401", "admin", &[]).unwrap_err();
        assert_eq!(err.message(), "Excel文件列数不足，需要至少3列，当前有2列");
    }
}
