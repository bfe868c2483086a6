//! Catalog repository: the admin-curated recycling-item price list.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::recycling_item::{self, Entity as ItemEntity};
use crate::domain::{CreateRecyclingItem, ItemCategory, RecyclingItem, UpdateRecyclingItem};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Browse catalog entries ordered by sort order.
    ///
    /// `include_inactive` is reserved for admin listings.
    async fn list(
        &self,
        params: &PaginationParams,
        category: Option<ItemCategory>,
        include_inactive: bool,
    ) -> AppResult<(Vec<RecyclingItem>, u64)>;

    /// Find catalog entry by ID (active or not)
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RecyclingItem>>;

    /// Whether the business key is already taken
    async fn item_id_taken(&self, item_id: &str) -> AppResult<bool>;

    /// Create a catalog entry
    async fn create(&self, payload: CreateRecyclingItem) -> AppResult<RecyclingItem>;

    /// Update a catalog entry
    async fn update(&self, id: Uuid, payload: UpdateRecyclingItem) -> AppResult<RecyclingItem>;

    /// Soft-delete a catalog entry
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;

    /// Restore a soft-deleted catalog entry
    async fn restore(&self, id: Uuid) -> AppResult<RecyclingItem>;
}

pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list(
        &self,
        params: &PaginationParams,
        category: Option<ItemCategory>,
        include_inactive: bool,
    ) -> AppResult<(Vec<RecyclingItem>, u64)> {
        let mut query = ItemEntity::find()
            .order_by_asc(recycling_item::Column::SortOrder)
            .order_by_asc(recycling_item::Column::Name);

        if !include_inactive {
            query = query.filter(recycling_item::Column::IsActive.eq(true));
        }
        if let Some(category) = category {
            query = query.filter(recycling_item::Column::Category.eq(category.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(RecyclingItem::from).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RecyclingItem>> {
        let result = ItemEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(RecyclingItem::from))
    }

    async fn item_id_taken(&self, item_id: &str) -> AppResult<bool> {
        let count = ItemEntity::find()
            .filter(recycling_item::Column::ItemId.eq(item_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, payload: CreateRecyclingItem) -> AppResult<RecyclingItem> {
        let now = Utc::now();
        let model = recycling_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_id: Set(payload.item_id),
            name: Set(payload.name),
            category: Set(payload.category.as_str().to_string()),
            price_display: Set(payload.price_display),
            price_per_unit: Set(payload.price_per_unit),
            unit: Set(payload.unit),
            description: Set(payload.description),
            is_active: Set(true),
            sort_order: Set(payload.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(RecyclingItem::from(model))
    }

    async fn update(&self, id: Uuid, payload: UpdateRecyclingItem) -> AppResult<RecyclingItem> {
        let model = ItemEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: recycling_item::ActiveModel = model.into();
        if let Some(name) = payload.name {
            active.name = Set(name);
        }
        if let Some(category) = payload.category {
            active.category = Set(category.as_str().to_string());
        }
        if let Some(price_display) = payload.price_display {
            active.price_display = Set(price_display);
        }
        if let Some(price_per_unit) = payload.price_per_unit {
            active.price_per_unit = Set(price_per_unit);
        }
        if let Some(unit) = payload.unit {
            active.unit = Set(unit);
        }
        if payload.description.is_some() {
            active.description = Set(payload.description);
        }
        if let Some(sort_order) = payload.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(Utc::now());

        Ok(RecyclingItem::from(active.update(&self.db).await?))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let model = ItemEntity::find_by_id(id)
            .filter(recycling_item::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: recycling_item::ActiveModel = model.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn restore(&self, id: Uuid) -> AppResult<RecyclingItem> {
        let model = ItemEntity::find_by_id(id)
            .filter(recycling_item::Column::IsActive.eq(false))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::validation("Item is not deleted or does not exist"))?;

        let mut active: recycling_item::ActiveModel = model.into();
        active.is_active = Set(true);
        active.updated_at = Set(Utc::now());

        Ok(RecyclingItem::from(active.update(&self.db).await?))
    }
}

/// Transaction-scoped catalog reads used by the wishlist checkout flow.
pub struct TxCatalogRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCatalogRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Active catalog entries for a set of ids
    pub async fn find_active_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<RecyclingItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ItemEntity::find()
            .filter(recycling_item::Column::Id.is_in(ids))
            .filter(recycling_item::Column::IsActive.eq(true))
            .all(self.txn)
            .await?;
        Ok(models.into_iter().map(RecyclingItem::from).collect())
    }
}
