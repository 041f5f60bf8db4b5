use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    questions::{
        entities::{AnswerRecord, GradedBatch, StandardAnswer},
        requests::QuestionListQuery,
        responses::QuestionListResponse,
    },
    students::{
        entities::AggregateScore, requests::StudentListQuery, responses::StudentListResponse,
    },
};

pub mod sea_orm_storage;

/// 一次导入事务提交后的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SavedBatch {
    pub imported_rows: usize,
    pub aggregate_id: Option<i64>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 答题记录管理方法
    // 在单个事务中写入一张答题卡的全部记录及学生总分
    async fn save_graded_batch(&self, batch: GradedBatch) -> Result<SavedBatch>;
    // 读取某班的标准答案（按 id 升序）
    async fn list_standard_answers(
        &self,
        admin: &str,
        class_name: &str,
    ) -> Result<Vec<StandardAnswer>>;
    // 分页列出答题记录
    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse>;
    // 列出全部答题记录（导出）
    async fn list_all_questions(&self) -> Result<Vec<AnswerRecord>>;
    // 删除一条，id 为空时删除全部
    async fn delete_questions(&self, id: Option<i64>) -> Result<u64>;
    async fn count_questions(&self) -> Result<u64>;

    /// 学生总分管理方法
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn list_all_students(&self) -> Result<Vec<AggregateScore>>;
    async fn delete_students(&self, id: Option<i64>) -> Result<u64>;
    async fn count_students(&self) -> Result<u64>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
