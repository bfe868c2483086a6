//! Notification repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use super::entities::notification::{self, Entity as NotificationEntity};
use crate::domain::Notification;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Active notifications for a user, newest first
    async fn list_for_user(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        unread_only: bool,
    ) -> AppResult<(Vec<Notification>, u64)>;

    /// Count of unread active notifications
    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;

    /// Mark one notification read; the row must belong to the user
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Notification>;

    /// Mark all unread notifications read; returns the number updated.
    ///
    /// Idempotent: a second call affects zero rows and succeeds.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Retention sweep: soft-delete read notifications older than the
    /// cutoff. Returns the number swept.
    async fn clear_old(&self, user_id: Uuid, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn list_for_user(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        unread_only: bool,
    ) -> AppResult<(Vec<Notification>, u64)> {
        let mut query = NotificationEntity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsActive.eq(true))
            .order_by_desc(notification::Column::CreatedAt);

        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(Notification::from).collect(), total))
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64> {
        let count = NotificationEntity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsActive.eq(true))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Notification> {
        let model = NotificationEntity::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: notification::ActiveModel = model.into();
        active.is_read = Set(true);

        Ok(Notification::from(active.update(&self.db).await?))
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsActive.eq(true))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn clear_old(&self, user_id: Uuid, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::IsActive, Expr::value(false))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsActive.eq(true))
            .filter(notification::Column::IsRead.eq(true))
            .filter(notification::Column::CreatedAt.lt(cutoff))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Transaction-scoped notification writes.
pub struct TxNotificationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxNotificationRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a notification as part of a lifecycle transaction
    pub async fn create(&self, n: Notification) -> AppResult<Notification> {
        let model = notification::ActiveModel {
            id: Set(n.id),
            user_id: Set(n.user_id),
            title: Set(n.title),
            message: Set(n.message),
            notification_type: Set(n.notification_type.as_str().to_string()),
            is_read: Set(n.is_read),
            is_active: Set(n.is_active),
            collection_request_id: Set(n.collection_request_id),
            review_id: Set(n.review_id),
            created_at: Set(n.created_at),
        }
        .insert(self.txn)
        .await?;

        Ok(Notification::from(model))
    }
}
