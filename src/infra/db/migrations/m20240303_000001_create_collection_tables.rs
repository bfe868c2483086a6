//! Migration: Create posted_items, collection_requests and
//! collection_request_items.

use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_users_table::Users;
use super::m20240302_000001_create_recycling_items_table::RecyclingItems;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostedItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostedItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostedItems::UserId).uuid().not_null())
                    .col(ColumnDef::new(PostedItems::ItemName).string().not_null())
                    .col(ColumnDef::new(PostedItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(PostedItems::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PostedItems::Unit).string().not_null())
                    .col(ColumnDef::new(PostedItems::Condition).string().null())
                    .col(ColumnDef::new(PostedItems::Location).string().not_null())
                    .col(ColumnDef::new(PostedItems::Description).text().null())
                    .col(
                        ColumnDef::new(PostedItems::EstimatedValue)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PostedItems::Status).string().not_null())
                    .col(
                        ColumnDef::new(PostedItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostedItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posted_items_user")
                            .from(PostedItems::Table, PostedItems::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectionRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CollectionRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(CollectionRequests::RequestType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollectionRequests::Status).string().not_null())
                    .col(
                        ColumnDef::new(CollectionRequests::TotalEstimatedValue)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::ActualValue)
                            .decimal_len(14, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::PaymentStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::PaymentAmount)
                            .decimal_len(14, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::PaymentDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(CollectionRequests::CollectorId).uuid().null())
                    .col(
                        ColumnDef::new(CollectionRequests::CollectorName)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::CollectorPhone)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::CollectorRating)
                            .decimal_len(4, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::PickupLocation)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::EstimatedCollectionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::ActualCollectionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::CollectionNotes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::StatusHistory)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::RequestDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_requests_user")
                            .from(CollectionRequests::Table, CollectionRequests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_requests_collector")
                            .from(CollectionRequests::Table, CollectionRequests::CollectorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collection_requests_user")
                    .table(CollectionRequests::Table)
                    .col(CollectionRequests::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collection_requests_collector_status")
                    .table(CollectionRequests::Table)
                    .col(CollectionRequests::CollectorId)
                    .col(CollectionRequests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionRequestItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectionRequestItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::CollectionRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::PostedItemId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::RecyclingItemId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::ItemName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::Quantity)
                            .decimal_len(12, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::PricePerUnit)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::EstimatedValue)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::ActualValue)
                            .decimal_len(12, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CollectionRequestItems::Condition)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(CollectionRequestItems::Notes).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_items_request")
                            .from(
                                CollectionRequestItems::Table,
                                CollectionRequestItems::CollectionRequestId,
                            )
                            .to(CollectionRequests::Table, CollectionRequests::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_items_posted_item")
                            .from(
                                CollectionRequestItems::Table,
                                CollectionRequestItems::PostedItemId,
                            )
                            .to(PostedItems::Table, PostedItems::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_items_recycling_item")
                            .from(
                                CollectionRequestItems::Table,
                                CollectionRequestItems::RecyclingItemId,
                            )
                            .to(RecyclingItems::Table, RecyclingItems::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_request_items_request")
                    .table(CollectionRequestItems::Table)
                    .col(CollectionRequestItems::CollectionRequestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectionRequestItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CollectionRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostedItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PostedItems {
    Table,
    Id,
    UserId,
    ItemName,
    Category,
    Quantity,
    Unit,
    Condition,
    Location,
    Description,
    EstimatedValue,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum CollectionRequests {
    Table,
    Id,
    UserId,
    RequestType,
    Status,
    TotalEstimatedValue,
    ActualValue,
    PaymentStatus,
    PaymentAmount,
    PaymentDate,
    CollectorId,
    CollectorName,
    CollectorPhone,
    CollectorRating,
    PickupLocation,
    EstimatedCollectionDate,
    ActualCollectionDate,
    CollectionNotes,
    StatusHistory,
    RequestDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum CollectionRequestItems {
    Table,
    Id,
    CollectionRequestId,
    PostedItemId,
    RecyclingItemId,
    ItemName,
    Quantity,
    PricePerUnit,
    EstimatedValue,
    ActualValue,
    Condition,
    Notes,
}
