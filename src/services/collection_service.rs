//! Collection-request service: the pickup lifecycle from creation
//! through payment settlement.
//!
//! Every mutation runs in a single transaction spanning the request,
//! its line items, the counter credits and the notification fan-out.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CancelRequest, CollectionRequest, CollectionRequestItem, CollectionStatus, CollectorSnapshot,
    CompleteRequest, CreateFromWishlist, Notification, RequestStats, RequestType,
    UpdateStatusRequest,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{RequestFilter, RequestScope, UnitOfWork};
use crate::types::PaginationParams;

use super::Actor;

#[async_trait]
pub trait CollectionService: Send + Sync {
    /// Convert wishlist entries into a `browsed_items` request.
    ///
    /// Line items are priced from the catalog; consumed wishlist
    /// entries are soft-deleted in the same transaction.
    async fn create_from_wishlist(
        &self,
        actor: Actor,
        payload: CreateFromWishlist,
    ) -> AppResult<(CollectionRequest, Vec<CollectionRequestItem>)>;

    /// Move a request along the lifecycle (collector or admin).
    async fn update_status(
        &self,
        id: Uuid,
        actor: Actor,
        payload: UpdateStatusRequest,
    ) -> AppResult<CollectionRequest>;

    /// Complete a request and settle payment (assigned collector or admin).
    async fn complete(
        &self,
        id: Uuid,
        actor: Actor,
        payload: CompleteRequest,
    ) -> AppResult<CollectionRequest>;

    /// Cancel a request (owner or admin).
    async fn cancel(
        &self,
        id: Uuid,
        actor: Actor,
        payload: CancelRequest,
    ) -> AppResult<CollectionRequest>;

    /// List requests visible to the actor, newest first.
    async fn list(
        &self,
        actor: Actor,
        params: &PaginationParams,
        status: Option<CollectionStatus>,
        request_type: Option<RequestType>,
    ) -> AppResult<(Vec<CollectionRequest>, u64)>;

    /// Get a request with its line items.
    async fn get(
        &self,
        actor: Actor,
        id: Uuid,
    ) -> AppResult<(CollectionRequest, Vec<CollectionRequestItem>)>;

    /// Per-status counters scoped to the actor.
    async fn stats(&self, actor: Actor) -> AppResult<RequestStats>;
}

fn scope_for(actor: &Actor) -> RequestScope {
    if actor.role.is_admin() {
        RequestScope::All
    } else if actor.role.is_collector() {
        RequestScope::Collector(actor.id)
    } else {
        RequestScope::Owner(actor.id)
    }
}

pub struct CollectionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CollectionManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CollectionService for CollectionManager<U> {
    async fn create_from_wishlist(
        &self,
        actor: Actor,
        payload: CreateFromWishlist,
    ) -> AppResult<(CollectionRequest, Vec<CollectionRequestItem>)> {
        let requested: HashSet<Uuid> = payload.wishlist_item_ids.iter().copied().collect();
        if requested.is_empty() {
            return Err(AppError::validation("At least one wishlist item is required"));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let entry_ids: Vec<Uuid> = requested.iter().copied().collect();
                    let entries = ctx
                        .wishlist()
                        .find_active_for_user(entry_ids.clone(), actor.id)
                        .await?;

                    if entries.len() != requested.len() {
                        return Err(AppError::NotFound);
                    }

                    let catalog_ids: Vec<Uuid> =
                        entries.iter().map(|e| e.recycling_item_id).collect();
                    let catalog: HashMap<Uuid, _> = ctx
                        .catalog()
                        .find_active_by_ids(catalog_ids)
                        .await?
                        .into_iter()
                        .map(|item| (item.id, item))
                        .collect();

                    let mut request = CollectionRequest::new(
                        actor.id,
                        RequestType::BrowsedItems,
                        Decimal::ZERO,
                        payload.pickup_location.clone(),
                        &actor.name,
                    );

                    let mut line_items = Vec::with_capacity(entries.len());
                    let mut total = Decimal::ZERO;
                    for entry in &entries {
                        let item = catalog.get(&entry.recycling_item_id).ok_or_else(|| {
                            AppError::validation(
                                "A wishlisted item is no longer available in the catalog",
                            )
                        })?;
                        let line = CollectionRequestItem::for_catalog_item(
                            request.id,
                            item.id,
                            item.name.clone(),
                            entry.quantity,
                            item.price_per_unit,
                        );
                        total += line.estimated_value;
                        line_items.push(line);
                    }

                    request.total_estimated_value = total;

                    ctx.collections().create(&request, &line_items).await?;
                    ctx.wishlist().soft_delete_many(entry_ids).await?;

                    Ok((request, line_items))
                })
            })
            .await
    }

    async fn update_status(
        &self,
        id: Uuid,
        actor: Actor,
        payload: UpdateStatusRequest,
    ) -> AppResult<CollectionRequest> {
        let next = CollectionStatus::parse(&payload.status)
            .ok_or_else(|| AppError::validation(format!("Unknown status: {}", payload.status)))?;

        if !actor.role.is_collector() && !actor.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut request = ctx
                        .collections()
                        .find_by_id(id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if next == CollectionStatus::Accepted {
                        let collector = ctx
                            .users()
                            .find_by_id(actor.id)
                            .await?
                            .ok_or(AppError::NotFound)?;
                        request.accept(
                            CollectorSnapshot {
                                collector_id: collector.id,
                                name: collector.name.clone(),
                                phone: collector.phone.clone(),
                                rating: collector.rating,
                            },
                            payload.estimated_collection_date,
                            payload.notes.clone(),
                            &actor.name,
                        )?;
                    } else {
                        // Once assigned, only the assigned collector or an
                        // admin may move the request further
                        if let Some(snapshot) = &request.collector {
                            if snapshot.collector_id != actor.id && !actor.role.is_admin() {
                                return Err(AppError::Forbidden);
                            }
                        }
                        request.transition_to(next, payload.notes.clone(), &actor.name)?;
                    }

                    ctx.collections().save(&request).await?;

                    // Keep user-posted items in step with their request;
                    // cancellation intentionally leaves them untouched
                    if request.request_type == RequestType::UserPosted
                        && next != CollectionStatus::Cancelled
                    {
                        let posted_ids = ctx.collections().posted_item_ids(id).await?;
                        ctx.posted_items().set_status(posted_ids, next).await?;
                    }

                    let message = request
                        .last_history_entry()
                        .map(|e| e.message.clone())
                        .unwrap_or_else(|| next.default_message().to_string());
                    ctx.notifications()
                        .create(Notification::for_status_change(
                            request.user_id,
                            request.id,
                            next,
                            message,
                        ))
                        .await?;

                    Ok(request)
                })
            })
            .await
    }

    async fn complete(
        &self,
        id: Uuid,
        actor: Actor,
        payload: CompleteRequest,
    ) -> AppResult<CollectionRequest> {
        if payload.actual_value < Decimal::ZERO {
            return Err(AppError::validation("Actual value cannot be negative"));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut request = ctx
                        .collections()
                        .find_by_id(id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let snapshot = request.collector.clone().ok_or_else(|| {
                        AppError::validation("Request has no assigned collector")
                    })?;
                    if snapshot.collector_id != actor.id && !actor.role.is_admin() {
                        return Err(AppError::Forbidden);
                    }

                    request.transition_to(
                        CollectionStatus::Completed,
                        payload.collection_notes.clone(),
                        &actor.name,
                    )?;
                    request.settle_payment(payload.actual_value, payload.collection_notes.clone());

                    ctx.collections().save(&request).await?;
                    ctx.collections()
                        .update_item_actuals(id, &payload.items)
                        .await?;

                    // Atomic counter credits on both sides of the settlement
                    ctx.users()
                        .credit_recycler(request.user_id, payload.actual_value)
                        .await?;
                    ctx.users()
                        .credit_collector(snapshot.collector_id, payload.actual_value)
                        .await?;

                    if request.request_type == RequestType::UserPosted {
                        let posted_ids = ctx.collections().posted_item_ids(id).await?;
                        ctx.posted_items()
                            .set_status(posted_ids, CollectionStatus::Completed)
                            .await?;
                    }

                    ctx.notifications()
                        .create(Notification::for_payment(
                            request.user_id,
                            request.id,
                            format!(
                                "Payment of {} recorded for your completed collection",
                                payload.actual_value
                            ),
                        ))
                        .await?;

                    Ok(request)
                })
            })
            .await
    }

    async fn cancel(
        &self,
        id: Uuid,
        actor: Actor,
        payload: CancelRequest,
    ) -> AppResult<CollectionRequest> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut request = ctx
                        .collections()
                        .find_by_id(id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if request.user_id != actor.id && !actor.role.is_admin() {
                        return Err(AppError::Forbidden);
                    }

                    request.transition_to(
                        CollectionStatus::Cancelled,
                        payload.reason.clone(),
                        &actor.name,
                    )?;
                    ctx.collections().save(&request).await?;

                    let message = request
                        .last_history_entry()
                        .map(|e| e.message.clone())
                        .unwrap_or_default();
                    ctx.notifications()
                        .create(Notification::for_status_change(
                            request.user_id,
                            request.id,
                            CollectionStatus::Cancelled,
                            message,
                        ))
                        .await?;

                    Ok(request)
                })
            })
            .await
    }

    async fn list(
        &self,
        actor: Actor,
        params: &PaginationParams,
        status: Option<CollectionStatus>,
        request_type: Option<RequestType>,
    ) -> AppResult<(Vec<CollectionRequest>, u64)> {
        let filter = RequestFilter {
            scope: scope_for(&actor),
            status,
            request_type,
        };
        self.uow.collections().list(filter, params).await
    }

    async fn get(
        &self,
        actor: Actor,
        id: Uuid,
    ) -> AppResult<(CollectionRequest, Vec<CollectionRequestItem>)> {
        let request = self
            .uow
            .collections()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let is_owner = request.user_id == actor.id;
        let is_assigned = request
            .collector
            .as_ref()
            .map(|c| c.collector_id == actor.id)
            .unwrap_or(false);
        // Collectors may inspect open pending requests before accepting
        let is_browsable = actor.role.is_collector()
            && request.status == CollectionStatus::Pending;

        if !(actor.role.is_admin() || is_owner || is_assigned || is_browsable) {
            return Err(AppError::Forbidden);
        }

        let items = self.uow.collections().items_for(id).await?;
        Ok((request, items))
    }

    async fn stats(&self, actor: Actor) -> AppResult<RequestStats> {
        self.uow.collections().stats(scope_for(&actor)).await
    }
}
