//! Posted-item repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use super::entities::posted_item::{self, Entity as PostedEntity};
use crate::domain::{CollectionStatus, PostedItem, UpdatePostedItem};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostedItemRepository: Send + Sync {
    /// Find posted item by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PostedItem>>;

    /// List posted items, newest first.
    ///
    /// `user_id = None` lists across all users (admin).
    async fn list(
        &self,
        params: &PaginationParams,
        user_id: Option<Uuid>,
        status: Option<CollectionStatus>,
    ) -> AppResult<(Vec<PostedItem>, u64)>;

    /// Update item details; allowed only while still Pending
    async fn update(&self, id: Uuid, payload: UpdatePostedItem) -> AppResult<PostedItem>;
}

pub struct PostedItemStore {
    db: DatabaseConnection,
}

impl PostedItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostedItemRepository for PostedItemStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PostedItem>> {
        let result = PostedEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(PostedItem::from))
    }

    async fn list(
        &self,
        params: &PaginationParams,
        user_id: Option<Uuid>,
        status: Option<CollectionStatus>,
    ) -> AppResult<(Vec<PostedItem>, u64)> {
        let mut query = PostedEntity::find().order_by_desc(posted_item::Column::CreatedAt);
        if let Some(user_id) = user_id {
            query = query.filter(posted_item::Column::UserId.eq(user_id));
        }
        if let Some(status) = status {
            query = query.filter(posted_item::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(PostedItem::from).collect(), total))
    }

    async fn update(&self, id: Uuid, payload: UpdatePostedItem) -> AppResult<PostedItem> {
        let model = PostedEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if model.status != CollectionStatus::Pending.as_str() {
            return Err(AppError::validation(
                "Posted items can only be edited while the request is pending",
            ));
        }

        let mut active: posted_item::ActiveModel = model.into();
        if let Some(item_name) = payload.item_name {
            active.item_name = Set(item_name);
        }
        if let Some(quantity) = payload.quantity {
            active.quantity = Set(quantity);
        }
        if payload.condition.is_some() {
            active.condition = Set(payload.condition);
        }
        if let Some(location) = payload.location {
            active.location = Set(location);
        }
        if payload.description.is_some() {
            active.description = Set(payload.description);
        }
        active.updated_at = Set(Utc::now());

        Ok(PostedItem::from(active.update(&self.db).await?))
    }
}

/// Transaction-scoped posted-item writes.
pub struct TxPostedItemRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPostedItemRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a posted item within the fan-out transaction
    pub async fn create(&self, item: PostedItem) -> AppResult<PostedItem> {
        let model = posted_item::ActiveModel {
            id: Set(item.id),
            user_id: Set(item.user_id),
            item_name: Set(item.item_name),
            category: Set(item.category.as_str().to_string()),
            quantity: Set(item.quantity),
            unit: Set(item.unit),
            condition: Set(item.condition),
            location: Set(item.location),
            description: Set(item.description),
            estimated_value: Set(item.estimated_value),
            status: Set(item.status.as_str().to_string()),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        }
        .insert(self.txn)
        .await?;

        Ok(PostedItem::from(model))
    }

    /// Sync posted-item status with the owning request's lifecycle
    pub async fn set_status(&self, ids: Vec<Uuid>, status: CollectionStatus) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        PostedEntity::update_many()
            .col_expr(posted_item::Column::Status, Expr::value(status.as_str()))
            .col_expr(posted_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(posted_item::Column::Id.is_in(ids))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}
