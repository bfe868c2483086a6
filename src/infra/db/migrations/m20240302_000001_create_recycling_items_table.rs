//! Migration: Create the recycling-item catalog table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecyclingItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecyclingItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecyclingItems::ItemId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RecyclingItems::Name).string().not_null())
                    .col(ColumnDef::new(RecyclingItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(RecyclingItems::PriceDisplay)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecyclingItems::PricePerUnit)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecyclingItems::Unit).string().not_null())
                    .col(ColumnDef::new(RecyclingItems::Description).text().null())
                    .col(
                        ColumnDef::new(RecyclingItems::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RecyclingItems::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RecyclingItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecyclingItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recycling_items_category")
                    .table(RecyclingItems::Table)
                    .col(RecyclingItems::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecyclingItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RecyclingItems {
    Table,
    Id,
    ItemId,
    Name,
    Category,
    PriceDisplay,
    PricePerUnit,
    Unit,
    Description,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
