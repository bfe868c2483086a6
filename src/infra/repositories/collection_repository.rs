//! Collection-request repository: the aggregate root of the pickup
//! workflow, its line items, and the per-status stats query.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use super::entities::collection_request::{self, Entity as RequestEntity};
use super::entities::collection_request_item::{self, Entity as RequestItemEntity};
use crate::domain::{
    CollectionRequest, CollectionRequestItem, CollectionStatus, CompleteItemInput, RequestStats,
    RequestType,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Whose requests a query may see
#[derive(Debug, Clone, Copy)]
pub enum RequestScope {
    /// Admin: everything
    All,
    /// Requests owned by this user
    Owner(Uuid),
    /// Requests assigned to this collector, plus open Pending ones
    Collector(Uuid),
}

impl RequestScope {
    fn condition(&self) -> Condition {
        match self {
            RequestScope::All => Condition::all(),
            RequestScope::Owner(id) => {
                Condition::all().add(collection_request::Column::UserId.eq(*id))
            }
            RequestScope::Collector(id) => Condition::any()
                .add(collection_request::Column::CollectorId.eq(*id))
                .add(
                    collection_request::Column::Status.eq(CollectionStatus::Pending.as_str()),
                ),
        }
    }
}

/// List filter for collection requests
#[derive(Debug, Clone)]
pub struct RequestFilter {
    pub scope: RequestScope,
    pub status: Option<CollectionStatus>,
    pub request_type: Option<RequestType>,
}

impl RequestFilter {
    fn condition(&self) -> Condition {
        let mut cond = Condition::all().add(self.scope.condition());
        if let Some(status) = self.status {
            cond = cond.add(collection_request::Column::Status.eq(status.as_str()));
        }
        if let Some(request_type) = self.request_type {
            cond = cond.add(collection_request::Column::RequestType.eq(request_type.as_str()));
        }
        cond
    }
}

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Find request by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CollectionRequest>>;

    /// Line items of a request
    async fn items_for(&self, request_id: Uuid) -> AppResult<Vec<CollectionRequestItem>>;

    /// List requests, newest first
    async fn list(
        &self,
        filter: RequestFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<CollectionRequest>, u64)>;

    /// Per-status counters and value totals
    async fn stats(&self, scope: RequestScope) -> AppResult<RequestStats>;
}

pub struct CollectionStore {
    db: DatabaseConnection,
}

impl CollectionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectionRepository for CollectionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CollectionRequest>> {
        let result = RequestEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(CollectionRequest::from))
    }

    async fn items_for(&self, request_id: Uuid) -> AppResult<Vec<CollectionRequestItem>> {
        let models = RequestItemEntity::find()
            .filter(collection_request_item::Column::CollectionRequestId.eq(request_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(CollectionRequestItem::from).collect())
    }

    async fn list(
        &self,
        filter: RequestFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<CollectionRequest>, u64)> {
        let paginator = RequestEntity::find()
            .filter(filter.condition())
            .order_by_desc(collection_request::Column::RequestDate)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(CollectionRequest::from).collect(), total))
    }

    async fn stats(&self, scope: RequestScope) -> AppResult<RequestStats> {
        let counts: Vec<(String, i64)> = RequestEntity::find()
            .select_only()
            .column(collection_request::Column::Status)
            .column_as(Expr::col(collection_request::Column::Id).count(), "count")
            .filter(scope.condition())
            .group_by(collection_request::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await?;

        let sums: Option<(Option<Decimal>, Option<Decimal>)> = RequestEntity::find()
            .select_only()
            .column_as(
                Expr::col(collection_request::Column::TotalEstimatedValue).sum(),
                "estimated",
            )
            .column_as(
                Expr::col(collection_request::Column::PaymentAmount).sum(),
                "paid",
            )
            .filter(scope.condition())
            .into_tuple()
            .one(&self.db)
            .await?;

        let mut stats = RequestStats {
            total: 0,
            pending: 0,
            accepted: 0,
            in_progress: 0,
            completed: 0,
            rejected: 0,
            cancelled: 0,
            total_estimated_value: Decimal::ZERO,
            total_paid: Decimal::ZERO,
        };

        for (status, count) in counts {
            let count = count as u64;
            stats.total += count;
            match CollectionStatus::parse(&status) {
                Some(CollectionStatus::Pending) => stats.pending = count,
                Some(CollectionStatus::Accepted) => stats.accepted = count,
                Some(CollectionStatus::InProgress) => stats.in_progress = count,
                Some(CollectionStatus::Completed) => stats.completed = count,
                Some(CollectionStatus::Rejected) => stats.rejected = count,
                Some(CollectionStatus::Cancelled) => stats.cancelled = count,
                None => {}
            }
        }

        if let Some((estimated, paid)) = sums {
            stats.total_estimated_value = estimated.unwrap_or_default();
            stats.total_paid = paid.unwrap_or_default();
        }

        Ok(stats)
    }
}

fn request_active_model(request: &CollectionRequest) -> AppResult<collection_request::ActiveModel> {
    let history = serde_json::to_value(&request.status_history)
        .map_err(|e| AppError::internal(format!("Status history serialization failed: {}", e)))?;

    Ok(collection_request::ActiveModel {
        id: Set(request.id),
        user_id: Set(request.user_id),
        request_type: Set(request.request_type.as_str().to_string()),
        status: Set(request.status.as_str().to_string()),
        total_estimated_value: Set(request.total_estimated_value),
        actual_value: Set(request.actual_value),
        payment_status: Set(request.payment_status.as_str().to_string()),
        payment_amount: Set(request.payment_amount),
        payment_date: Set(request.payment_date),
        collector_id: Set(request.collector.as_ref().map(|c| c.collector_id)),
        collector_name: Set(request.collector.as_ref().map(|c| c.name.clone())),
        collector_phone: Set(request.collector.as_ref().and_then(|c| c.phone.clone())),
        collector_rating: Set(request.collector.as_ref().map(|c| c.rating)),
        pickup_location: Set(request.pickup_location.clone()),
        estimated_collection_date: Set(request.estimated_collection_date),
        actual_collection_date: Set(request.actual_collection_date),
        collection_notes: Set(request.collection_notes.clone()),
        status_history: Set(history),
        request_date: Set(request.request_date),
        created_at: Set(request.created_at),
        updated_at: Set(request.updated_at),
    })
}

/// Transaction-scoped request writes.
///
/// All multi-entity mutations of the lifecycle run through here so the
/// request, its line items, counters and notifications commit or roll
/// back together.
pub struct TxCollectionRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCollectionRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find request by ID within the transaction
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CollectionRequest>> {
        let result = RequestEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(CollectionRequest::from))
    }

    /// Insert a request together with its line items
    pub async fn create(
        &self,
        request: &CollectionRequest,
        items: &[CollectionRequestItem],
    ) -> AppResult<()> {
        request_active_model(request)?.insert(self.txn).await?;

        if !items.is_empty() {
            let models = items.iter().map(|item| collection_request_item::ActiveModel {
                id: Set(item.id),
                collection_request_id: Set(item.collection_request_id),
                posted_item_id: Set(item.posted_item_id),
                recycling_item_id: Set(item.recycling_item_id),
                item_name: Set(item.item_name.clone()),
                quantity: Set(item.quantity),
                price_per_unit: Set(item.price_per_unit),
                estimated_value: Set(item.estimated_value),
                actual_value: Set(item.actual_value),
                condition: Set(item.condition.clone()),
                notes: Set(item.notes.clone()),
            });
            RequestItemEntity::insert_many(models).exec(self.txn).await?;
        }

        Ok(())
    }

    /// Write back the aggregate after a lifecycle mutation
    pub async fn save(&self, request: &CollectionRequest) -> AppResult<()> {
        request_active_model(request)?.update(self.txn).await?;
        Ok(())
    }

    /// Line items of a request within the transaction
    pub async fn items_for(&self, request_id: Uuid) -> AppResult<Vec<CollectionRequestItem>> {
        let models = RequestItemEntity::find()
            .filter(collection_request_item::Column::CollectionRequestId.eq(request_id))
            .all(self.txn)
            .await?;
        Ok(models.into_iter().map(CollectionRequestItem::from).collect())
    }

    /// Record per-item actuals at completion.
    ///
    /// Every update is filtered by the parent request id as well, so a
    /// line item belonging to a different request is rejected rather
    /// than silently updated.
    pub async fn update_item_actuals(
        &self,
        request_id: Uuid,
        items: &[CompleteItemInput],
    ) -> AppResult<()> {
        for input in items {
            let mut update = RequestItemEntity::update_many()
                .filter(collection_request_item::Column::Id.eq(input.id))
                .filter(
                    collection_request_item::Column::CollectionRequestId.eq(request_id),
                );

            if let Some(actual_value) = input.actual_value {
                update = update.col_expr(
                    collection_request_item::Column::ActualValue,
                    Expr::value(actual_value),
                );
            }
            if let Some(notes) = &input.notes {
                update = update.col_expr(
                    collection_request_item::Column::Notes,
                    Expr::value(notes.clone()),
                );
            }

            let result = update.exec(self.txn).await?;
            if result.rows_affected == 0 {
                return Err(AppError::validation(format!(
                    "Item {} does not belong to this request",
                    input.id
                )));
            }
        }
        Ok(())
    }

    /// Posted items referenced by this request's line items
    pub async fn posted_item_ids(&self, request_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Option<Uuid>> = RequestItemEntity::find()
            .select_only()
            .column(collection_request_item::Column::PostedItemId)
            .filter(collection_request_item::Column::CollectionRequestId.eq(request_id))
            .into_tuple()
            .all(self.txn)
            .await?;
        Ok(ids.into_iter().flatten().collect())
    }

    /// Whether the user has a completed request fulfilled by this collector
    pub async fn has_completed_with(&self, user_id: Uuid, collector_id: Uuid) -> AppResult<bool> {
        let count = RequestEntity::find()
            .filter(collection_request::Column::UserId.eq(user_id))
            .filter(collection_request::Column::CollectorId.eq(collector_id))
            .filter(collection_request::Column::Status.eq(CollectionStatus::Completed.as_str()))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }
}
