use super::SeaOrmStorage;
use crate::entity::students::{Column, Entity as Students};
use crate::errors::{GraderError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::AggregateScore, requests::StudentListQuery, responses::StudentListResponse,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 分页列出学生总分
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Students::find();

        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.trim()));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GraderError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GraderError::database_operation(format!("查询学生页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GraderError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: rows.into_iter().map(|m| m.into_aggregate_score()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出全部学生总分
    pub async fn list_all_students_impl(&self) -> Result<Vec<AggregateScore>> {
        let rows = Students::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GraderError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_aggregate_score()).collect())
    }

    /// 删除学生总分，id 为空时删除全部
    pub async fn delete_students_impl(&self, id: Option<i64>) -> Result<u64> {
        let result = match id {
            Some(id) => Students::delete_by_id(id).exec(&self.db).await,
            None => Students::delete_many().exec(&self.db).await,
        }
        .map_err(|e| GraderError::database_operation(format!("删除学生总分失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 统计学生总分数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| GraderError::database_operation(format!("统计学生数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::questions::entities::{GradedBatch, NewAggregateScore};
    use crate::models::students::requests::StudentListQuery;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    async fn seed(storage: &dyn Storage, name: &str, class_name: &str, score: i64) {
        storage
            .save_graded_batch(GradedBatch {
                creator: name.to_string(),
                class_name: class_name.to_string(),
                records: Vec::new(),
                aggregate: Some(NewAggregateScore {
                    name: name.to_string(),
                    class_name: class_name.to_string(),
                    score,
                }),
                matched_rows: 0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_students_by_class() {
        let storage = memory_storage().await;
        seed(&storage, "张三", "2401", 10).await;
        seed(&storage, "李四", "2401", 7).await;
        seed(&storage, "王五", "2402", 3).await;

        let page = storage
            .list_students_with_pagination(StudentListQuery {
                page: 1,
                size: 20,
                class_name: Some("2401".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["张三", "李四"]);
    }

    #[tokio::test]
    async fn test_delete_students() {
        let storage = memory_storage().await;
        seed(&storage, "张三", "2401", 10).await;
        seed(&storage, "李四", "2401", 7).await;

        let id = storage.list_all_students().await.unwrap()[0].id;
        assert_eq!(storage.delete_students(Some(id)).await.unwrap(), 1);
        assert_eq!(storage.count_students().await.unwrap(), 1);
        assert_eq!(storage.delete_students(None).await.unwrap(), 1);
        assert_eq!(storage.count_students().await.unwrap(), 0);
    }
}
