//! 答题记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    pub score: String,
    pub creator: String,
    pub class_name: String,
    pub add_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer_record(self) -> crate::models::questions::entities::AnswerRecord {
        use crate::models::questions::entities::AnswerRecord;
        use chrono::{DateTime, Utc};

        AnswerRecord {
            id: self.id,
            question: self.question,
            answer: self.answer,
            score: self.score,
            creator: self.creator,
            class_name: self.class_name,
            add_time: DateTime::<Utc>::from_timestamp(self.add_time, 0).unwrap_or_default(),
        }
    }
}
