//! Wishlist service.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AddWishlistItem, RecyclingItem, UpdateWishlistItem, WishlistItem};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Add a catalog item to the wishlist.
    ///
    /// Rejects a second active entry for the same catalog item.
    async fn add(&self, user_id: Uuid, payload: AddWishlistItem) -> AppResult<WishlistItem>;

    /// List own wishlist joined with catalog data
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<(WishlistItem, RecyclingItem)>>;

    /// Update quantity/notes of an own entry
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateWishlistItem,
    ) -> AppResult<WishlistItem>;

    /// Remove an own entry (soft delete)
    async fn remove(&self, user_id: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct WishlistManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> WishlistManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> WishlistService for WishlistManager<U> {
    async fn add(&self, user_id: Uuid, payload: AddWishlistItem) -> AppResult<WishlistItem> {
        if payload.quantity <= Decimal::ZERO {
            return Err(AppError::validation("Quantity must be positive"));
        }

        let item = self
            .uow
            .catalog()
            .find_by_id(payload.recycling_item_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !item.is_active {
            return Err(AppError::NotFound);
        }

        if self
            .uow
            .wishlist()
            .find_active_pair(user_id, item.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Wishlist item"));
        }

        self.uow
            .wishlist()
            .create(user_id, item.id, payload.quantity, payload.notes)
            .await
    }

    async fn list(&self, user_id: Uuid) -> AppResult<Vec<(WishlistItem, RecyclingItem)>> {
        let entries = self.uow.wishlist().list_for_user(user_id).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut catalog: HashMap<Uuid, RecyclingItem> = HashMap::new();
        for entry in &entries {
            if !catalog.contains_key(&entry.recycling_item_id) {
                if let Some(item) = self.uow.catalog().find_by_id(entry.recycling_item_id).await? {
                    catalog.insert(item.id, item);
                }
            }
        }

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                catalog
                    .get(&entry.recycling_item_id)
                    .cloned()
                    .map(|item| (entry, item))
            })
            .collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateWishlistItem,
    ) -> AppResult<WishlistItem> {
        if let Some(quantity) = payload.quantity {
            if quantity <= Decimal::ZERO {
                return Err(AppError::validation("Quantity must be positive"));
            }
        }

        let entry = self
            .uow
            .wishlist()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        if entry.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        self.uow
            .wishlist()
            .update(id, payload.quantity, payload.notes)
            .await
    }

    async fn remove(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let entry = self
            .uow
            .wishlist()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        if entry.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        self.uow.wishlist().soft_delete(id).await
    }
}
