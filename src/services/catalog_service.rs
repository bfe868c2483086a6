//! Catalog service - the admin-curated price list.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CreateRecyclingItem, ItemCategory, RecyclingItem, UpdateRecyclingItem,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Public browse: active entries ordered by sort order
    async fn browse(
        &self,
        params: &PaginationParams,
        category: Option<ItemCategory>,
        include_inactive: bool,
    ) -> AppResult<(Vec<RecyclingItem>, u64)>;

    /// Get entry by ID
    async fn get(&self, id: Uuid) -> AppResult<RecyclingItem>;

    /// The closed category taxonomy
    fn categories(&self) -> Vec<&'static str>;

    /// Admin: create entry
    async fn create(&self, payload: CreateRecyclingItem) -> AppResult<RecyclingItem>;

    /// Admin: update entry
    async fn update(&self, id: Uuid, payload: UpdateRecyclingItem) -> AppResult<RecyclingItem>;

    /// Admin: soft-delete entry
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;

    /// Admin: restore entry
    async fn restore(&self, id: Uuid) -> AppResult<RecyclingItem>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn browse(
        &self,
        params: &PaginationParams,
        category: Option<ItemCategory>,
        include_inactive: bool,
    ) -> AppResult<(Vec<RecyclingItem>, u64)> {
        self.uow.catalog().list(params, category, include_inactive).await
    }

    async fn get(&self, id: Uuid) -> AppResult<RecyclingItem> {
        self.uow.catalog().find_by_id(id).await?.ok_or_not_found()
    }

    fn categories(&self) -> Vec<&'static str> {
        ItemCategory::ALL.iter().map(|c| c.as_str()).collect()
    }

    async fn create(&self, payload: CreateRecyclingItem) -> AppResult<RecyclingItem> {
        if self.uow.catalog().item_id_taken(&payload.item_id).await? {
            return Err(AppError::conflict("Recycling item"));
        }
        self.uow.catalog().create(payload).await
    }

    async fn update(&self, id: Uuid, payload: UpdateRecyclingItem) -> AppResult<RecyclingItem> {
        self.uow.catalog().update(id, payload).await
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.catalog().soft_delete(id).await
    }

    async fn restore(&self, id: Uuid) -> AppResult<RecyclingItem> {
        self.uow.catalog().restore(id).await
    }
}
