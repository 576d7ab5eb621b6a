//! Migration: Create furniture table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Furniture::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Furniture::Id)
                            .char_len(24)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Furniture::Name).string().not_null())
                    .col(ColumnDef::new(Furniture::Description).text().null())
                    .col(ColumnDef::new(Furniture::Category).string().not_null())
                    .col(ColumnDef::new(Furniture::Cost).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Furniture::Stock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Furniture::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Furniture::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(Furniture::Cost).gte(0))
                    .check(Expr::col(Furniture::Stock).gte(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_furniture_category")
                    .table(Furniture::Table)
                    .col(Furniture::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Furniture::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Furniture {
    Table,
    Id,
    Name,
    Description,
    Category,
    Cost,
    Stock,
    CreatedAt,
    UpdatedAt,
}
