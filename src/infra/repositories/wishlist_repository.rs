//! Wishlist repository.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use super::entities::wishlist_item::{self, Entity as WishlistEntity};
use crate::domain::WishlistItem;
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Active wishlist entries for a user, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<WishlistItem>>;

    /// Active entry by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WishlistItem>>;

    /// The user's active entry for a catalog item, if any
    async fn find_active_pair(
        &self,
        user_id: Uuid,
        recycling_item_id: Uuid,
    ) -> AppResult<Option<WishlistItem>>;

    /// Add an entry
    async fn create(
        &self,
        user_id: Uuid,
        recycling_item_id: Uuid,
        quantity: Decimal,
        notes: Option<String>,
    ) -> AppResult<WishlistItem>;

    /// Update quantity/notes of an active entry
    async fn update(
        &self,
        id: Uuid,
        quantity: Option<Decimal>,
        notes: Option<String>,
    ) -> AppResult<WishlistItem>;

    /// Soft-delete an entry
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct WishlistStore {
    db: DatabaseConnection,
}

impl WishlistStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WishlistRepository for WishlistStore {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<WishlistItem>> {
        let models = WishlistEntity::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .filter(wishlist_item::Column::IsActive.eq(true))
            .order_by_desc(wishlist_item::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(WishlistItem::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WishlistItem>> {
        let result = WishlistEntity::find_by_id(id)
            .filter(wishlist_item::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(result.map(WishlistItem::from))
    }

    async fn find_active_pair(
        &self,
        user_id: Uuid,
        recycling_item_id: Uuid,
    ) -> AppResult<Option<WishlistItem>> {
        let result = WishlistEntity::find()
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .filter(wishlist_item::Column::RecyclingItemId.eq(recycling_item_id))
            .filter(wishlist_item::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(result.map(WishlistItem::from))
    }

    async fn create(
        &self,
        user_id: Uuid,
        recycling_item_id: Uuid,
        quantity: Decimal,
        notes: Option<String>,
    ) -> AppResult<WishlistItem> {
        let now = Utc::now();
        let model = wishlist_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            recycling_item_id: Set(recycling_item_id),
            quantity: Set(quantity),
            notes: Set(notes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(WishlistItem::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        quantity: Option<Decimal>,
        notes: Option<String>,
    ) -> AppResult<WishlistItem> {
        let model = WishlistEntity::find_by_id(id)
            .filter(wishlist_item::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: wishlist_item::ActiveModel = model.into();
        if let Some(quantity) = quantity {
            active.quantity = Set(quantity);
        }
        if notes.is_some() {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now());

        Ok(WishlistItem::from(active.update(&self.db).await?))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let model = WishlistEntity::find_by_id(id)
            .filter(wishlist_item::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: wishlist_item::ActiveModel = model.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }
}

/// Transaction-scoped wishlist operations used by the checkout flow.
pub struct TxWishlistRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxWishlistRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Active entries owned by the user among the given ids
    pub async fn find_active_for_user(
        &self,
        ids: Vec<Uuid>,
        user_id: Uuid,
    ) -> AppResult<Vec<WishlistItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = WishlistEntity::find()
            .filter(wishlist_item::Column::Id.is_in(ids))
            .filter(wishlist_item::Column::UserId.eq(user_id))
            .filter(wishlist_item::Column::IsActive.eq(true))
            .all(self.txn)
            .await?;
        Ok(models.into_iter().map(WishlistItem::from).collect())
    }

    /// Soft-delete converted entries once their request is created
    pub async fn soft_delete_many(&self, ids: Vec<Uuid>) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        WishlistEntity::update_many()
            .col_expr(wishlist_item::Column::IsActive, Expr::value(false))
            .col_expr(wishlist_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(wishlist_item::Column::Id.is_in(ids))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}
