//! 学生总分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub class_name: String,
    pub score: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_aggregate_score(self) -> crate::models::students::entities::AggregateScore {
        crate::models::students::entities::AggregateScore {
            id: self.id,
            name: self.name,
            class_name: self.class_name,
            score: self.score,
        }
    }
}
