use super::SeaOrmStorage;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::entity::students::ActiveModel as StudentActiveModel;
use crate::errors::{GraderError, Result};
use crate::models::{
    PaginationInfo,
    questions::{
        entities::{AnswerRecord, GradedBatch, StandardAnswer},
        requests::QuestionListQuery,
        responses::QuestionListResponse,
    },
};
use crate::storage::SavedBatch;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::error;

impl SeaOrmStorage {
    /// 在单个事务中写入答题记录与学生总分
    pub async fn save_graded_batch_impl(&self, batch: GradedBatch) -> Result<SavedBatch> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderError::database_operation(format!("开启事务失败: {e}")))?;

        match Self::stage_batch(&txn, batch).await {
            Ok(saved) => {
                txn.commit()
                    .await
                    .map_err(|e| GraderError::database_operation(format!("提交事务失败: {e}")))?;
                Ok(saved)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    error!("回滚事务失败: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn stage_batch(txn: &DatabaseTransaction, batch: GradedBatch) -> Result<SavedBatch> {
        let now = chrono::Utc::now().timestamp();
        let imported_rows = batch.records.len();

        for (index, record) in batch.records.into_iter().enumerate() {
            let model = ActiveModel {
                question: Set(record.question),
                answer: Set(record.answer),
                score: Set(record.score),
                creator: Set(batch.creator.clone()),
                class_name: Set(batch.class_name.clone()),
                add_time: Set(now),
                ..Default::default()
            };
            model.insert(txn).await.map_err(|e| {
                GraderError::database_operation(format!("第{}行写入失败: {e}", index + 1))
            })?;
        }

        let aggregate_id = match batch.aggregate {
            Some(aggregate) => {
                let model = StudentActiveModel {
                    name: Set(aggregate.name),
                    class_name: Set(aggregate.class_name),
                    score: Set(aggregate.score),
                    ..Default::default()
                };
                let inserted = model.insert(txn).await.map_err(|e| {
                    GraderError::database_operation(format!("写入学生总分失败: {e}"))
                })?;
                Some(inserted.id)
            }
            None => None,
        };

        Ok(SavedBatch {
            imported_rows,
            aggregate_id,
        })
    }

    /// 标准答案：管理员为该班级导入的全部记录，按 id 升序
    pub async fn list_standard_answers_impl(
        &self,
        admin: &str,
        class_name: &str,
    ) -> Result<Vec<StandardAnswer>> {
        let rows = Questions::find()
            .filter(Column::Creator.eq(admin))
            .filter(Column::ClassName.eq(class_name))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GraderError::database_operation(format!("查询标准答案失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| StandardAnswer {
                answer: m.answer,
                score: m.score,
            })
            .collect())
    }

    /// 分页列出答题记录
    pub async fn list_questions_with_pagination_impl(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Questions::find();

        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.trim()));
        }

        if let Some(ref creator) = query.creator {
            select = select.filter(Column::Creator.eq(creator.trim()));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GraderError::database_operation(format!("查询答题记录总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GraderError::database_operation(format!("查询答题记录页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GraderError::database_operation(format!("查询答题记录失败: {e}")))?;

        Ok(QuestionListResponse {
            items: rows.into_iter().map(|m| m.into_answer_record()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出全部答题记录
    pub async fn list_all_questions_impl(&self) -> Result<Vec<AnswerRecord>> {
        let rows = Questions::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GraderError::database_operation(format!("查询答题记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_answer_record()).collect())
    }

    /// 删除答题记录
    pub async fn delete_questions_impl(&self, id: Option<i64>) -> Result<u64> {
        let result = match id {
            Some(id) => Questions::delete_by_id(id).exec(&self.db).await,
            None => Questions::delete_many().exec(&self.db).await,
        }
        .map_err(|e| GraderError::database_operation(format!("删除答题记录失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 统计答题记录数量
    pub async fn count_questions_impl(&self) -> Result<u64> {
        Questions::find()
            .count(&self.db)
            .await
            .map_err(|e| GraderError::database_operation(format!("统计答题记录数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::GraderError;
    use crate::models::questions::entities::{GradedBatch, NewAggregateScore, NewAnswerRecord};
    use crate::models::questions::requests::QuestionListQuery;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use sea_orm::ConnectionTrait;

    fn record(answer: &str, score: &str) -> NewAnswerRecord {
        NewAnswerRecord {
            question: format!("Q {answer}"),
            answer: answer.to_string(),
            score: score.to_string(),
        }
    }

    fn admin_batch(class_name: &str, answers: &[(&str, &str)]) -> GradedBatch {
        GradedBatch {
            creator: "admin".to_string(),
            class_name: class_name.to_string(),
            records: answers.iter().map(|(a, s)| record(a, s)).collect(),
            aggregate: None,
            matched_rows: 0,
        }
    }

    #[tokio::test]
    async fn test_save_batch_with_aggregate() {
        let storage = memory_storage().await;
        let batch = GradedBatch {
            creator: "张三".to_string(),
            class_name: "2401".to_string(),
            records: vec![record("ls -l", "5"), record("pwd", "0")],
            aggregate: Some(NewAggregateScore {
                name: "张三".to_string(),
                class_name: "2401".to_string(),
                score: 5,
            }),
            matched_rows: 1,
        };

        let saved = storage.save_graded_batch(batch).await.unwrap();
        assert_eq!(saved.imported_rows, 2);
        assert!(saved.aggregate_id.is_some());
        assert_eq!(storage.count_questions().await.unwrap(), 2);
        assert_eq!(storage.count_students().await.unwrap(), 1);

        let students = storage.list_all_students().await.unwrap();
        assert_eq!(students[0].score, 5);
        assert_eq!(students[0].class_name, "2401");
    }

    #[tokio::test]
    async fn test_failed_aggregate_rolls_back_records() {
        let storage = memory_storage().await;
        storage
            .db
            .execute_unprepared("DROP TABLE students")
            .await
            .unwrap();

        let batch = GradedBatch {
            creator: "张三".to_string(),
            class_name: "2401".to_string(),
            records: vec![record("ls -l", "5")],
            aggregate: Some(NewAggregateScore {
                name: "张三".to_string(),
                class_name: "2401".to_string(),
                score: 5,
            }),
            matched_rows: 1,
        };

        let err = storage.save_graded_batch(batch).await.err();
        assert!(matches!(err, Some(GraderError::DatabaseOperation(_))));
        assert_eq!(storage.count_questions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_standard_answers_are_scoped_and_ordered() {
        let storage = memory_storage().await;
        storage
            .save_graded_batch(admin_batch("2401", &[("a", "1"), ("b", "2")]))
            .await
            .unwrap();
        storage
            .save_graded_batch(admin_batch("2402", &[("x", "9")]))
            .await
            .unwrap();

        let key = storage.list_standard_answers("admin", "2401").await.unwrap();
        let answers: Vec<&str> = key.iter().map(|k| k.answer.as_str()).collect();
        assert_eq!(answers, vec!["a", "b"]);
        assert_eq!(key[1].score, "2");

        assert!(
            storage
                .list_standard_answers("admin", "9999")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_pagination_and_filters() {
        let storage = memory_storage().await;
        storage
            .save_graded_batch(admin_batch(
                "2401",
                &[("a", "1"), ("b", "1"), ("c", "1")],
            ))
            .await
            .unwrap();
        storage
            .save_graded_batch(admin_batch("2402", &[("d", "1")]))
            .await
            .unwrap();

        let page = storage
            .list_questions_with_pagination(QuestionListQuery {
                page: 2,
                size: 2,
                class_name: Some("2401".to_string()),
                creator: None,
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].answer, "c");
    }

    #[tokio::test]
    async fn test_delete_one_and_all() {
        let storage = memory_storage().await;
        storage
            .save_graded_batch(admin_batch("2401", &[("a", "1"), ("b", "1")]))
            .await
            .unwrap();
        let first = storage.list_all_questions().await.unwrap()[0].id;

        assert_eq!(storage.delete_questions(Some(first)).await.unwrap(), 1);
        assert_eq!(storage.delete_questions(Some(first)).await.unwrap(), 0);
        assert_eq!(storage.delete_questions(None).await.unwrap(), 1);
        assert_eq!(storage.count_questions().await.unwrap(), 0);
    }
}
