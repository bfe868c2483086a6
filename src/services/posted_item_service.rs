//! Posted-item service.
//!
//! Posting an item spawns its collection request and line item in the
//! same database transaction, so there is never a posted item without
//! an originating request.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CollectionRequest, CollectionRequestItem, CollectionStatus, CreatePostedItem, PostedItem,
    RequestType, UpdatePostedItem,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

use super::Actor;

#[async_trait]
pub trait PostedItemService: Send + Sync {
    /// Post an item and spawn its collection request atomically.
    ///
    /// Returns the posted item together with the spawned request.
    async fn create(
        &self,
        user_id: Uuid,
        payload: CreatePostedItem,
    ) -> AppResult<(PostedItem, CollectionRequest)>;

    /// List posted items: owners see their own, admins see all
    async fn list(
        &self,
        actor: Actor,
        params: &PaginationParams,
        status: Option<CollectionStatus>,
    ) -> AppResult<(Vec<PostedItem>, u64)>;

    /// Get posted item by ID (owner or admin)
    async fn get(&self, actor: Actor, id: Uuid) -> AppResult<PostedItem>;

    /// Update a posted item while its request is still pending (owner)
    async fn update(&self, actor: Actor, id: Uuid, payload: UpdatePostedItem)
        -> AppResult<PostedItem>;
}

pub struct PostedItemManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PostedItemManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PostedItemService for PostedItemManager<U> {
    async fn create(
        &self,
        user_id: Uuid,
        payload: CreatePostedItem,
    ) -> AppResult<(PostedItem, CollectionRequest)> {
        if payload.quantity <= Decimal::ZERO {
            return Err(AppError::validation("Quantity must be positive"));
        }
        if payload.estimated_value < Decimal::ZERO {
            return Err(AppError::validation("Estimated value cannot be negative"));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let user = ctx
                        .users()
                        .find_by_id(user_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let now = chrono::Utc::now();
                    let posted = PostedItem {
                        id: Uuid::new_v4(),
                        user_id,
                        item_name: payload.item_name.clone(),
                        category: payload.category,
                        quantity: payload.quantity,
                        unit: payload.unit.clone(),
                        condition: payload.condition.clone(),
                        location: payload.location.clone(),
                        description: payload.description.clone(),
                        estimated_value: payload.estimated_value,
                        status: CollectionStatus::Pending,
                        created_at: now,
                        updated_at: now,
                    };
                    let posted = ctx.posted_items().create(posted).await?;

                    let request = CollectionRequest::new(
                        user_id,
                        RequestType::UserPosted,
                        payload.estimated_value,
                        Some(payload.location.clone()),
                        &user.name,
                    );

                    // Back-computed rate so the single line item carries
                    // the same estimate as the posting
                    let price_per_unit = payload.estimated_value / payload.quantity;
                    let item = CollectionRequestItem::for_posted_item(
                        request.id,
                        posted.id,
                        payload.item_name,
                        payload.quantity,
                        price_per_unit,
                        payload.condition,
                    );

                    ctx.collections().create(&request, &[item]).await?;

                    Ok((posted, request))
                })
            })
            .await
    }

    async fn list(
        &self,
        actor: Actor,
        params: &PaginationParams,
        status: Option<CollectionStatus>,
    ) -> AppResult<(Vec<PostedItem>, u64)> {
        let user_filter = if actor.role.is_admin() {
            None
        } else {
            Some(actor.id)
        };
        self.uow.posted_items().list(params, user_filter, status).await
    }

    async fn get(&self, actor: Actor, id: Uuid) -> AppResult<PostedItem> {
        let item = self
            .uow
            .posted_items()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if item.user_id != actor.id && !actor.role.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(item)
    }

    async fn update(
        &self,
        actor: Actor,
        id: Uuid,
        payload: UpdatePostedItem,
    ) -> AppResult<PostedItem> {
        let item = self
            .uow
            .posted_items()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if item.user_id != actor.id && !actor.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.uow.posted_items().update(id, payload).await
    }
}
