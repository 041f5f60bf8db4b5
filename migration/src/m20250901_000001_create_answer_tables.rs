use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建答题记录表（标准答案与学生答题卡共用）
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::Question).text().not_null())
                    .col(ColumnDef::new(Questions::Answer).text().not_null())
                    .col(
                        ColumnDef::new(Questions::Score)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(ColumnDef::new(Questions::Creator).string().not_null())
                    .col(ColumnDef::new(Questions::ClassName).string().not_null())
                    .col(ColumnDef::new(Questions::AddTime).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生总分表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::ClassName).string().not_null())
                    .col(
                        ColumnDef::new(Students::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 标准答案按 (creator, class_name) 查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_creator_class")
                    .table(Questions::Table)
                    .col(Questions::Creator)
                    .col(Questions::ClassName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class")
                    .table(Students::Table)
                    .col(Students::ClassName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    Question,
    Answer,
    Score,
    Creator,
    ClassName,
    AddTime,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Name,
    ClassName,
    Score,
}
