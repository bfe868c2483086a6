//! Notification service.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::DEFAULT_NOTIFICATION_RETENTION_DAYS;
use crate::domain::Notification;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// List own notifications, newest first
    async fn list(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        unread_only: bool,
    ) -> AppResult<(Vec<Notification>, u64)>;

    /// Count of unread notifications
    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;

    /// Mark one notification read
    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification>;

    /// Mark all notifications read; idempotent
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Soft-delete read notifications older than `days` (default 30)
    async fn clear_old(&self, user_id: Uuid, days: Option<i64>) -> AppResult<u64>;
}

pub struct NotificationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NotificationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for NotificationManager<U> {
    async fn list(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        unread_only: bool,
    ) -> AppResult<(Vec<Notification>, u64)> {
        self.uow
            .notifications()
            .list_for_user(user_id, params, unread_only)
            .await
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64> {
        self.uow.notifications().unread_count(user_id).await
    }

    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification> {
        self.uow.notifications().mark_read(id, user_id).await
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        self.uow.notifications().mark_all_read(user_id).await
    }

    async fn clear_old(&self, user_id: Uuid, days: Option<i64>) -> AppResult<u64> {
        let days = days.unwrap_or(DEFAULT_NOTIFICATION_RETENTION_DAYS);
        if days < 1 {
            return Err(AppError::validation("Retention window must be at least one day"));
        }
        let cutoff = Utc::now() - Duration::days(days);
        self.uow.notifications().clear_old(user_id, cutoff).await
    }
}
