//! User service - account profile and admin user management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::is_valid_role;
use crate::domain::{AdminUpdateUser, UpdateProfile, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get active user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by ID including deactivated accounts (admin)
    async fn get_user_any(&self, id: Uuid) -> AppResult<User>;

    /// Self-service profile update
    async fn update_profile(&self, id: Uuid, payload: UpdateProfile) -> AppResult<User>;

    /// Admin update of name and/or role
    async fn admin_update(&self, id: Uuid, payload: AdminUpdateUser) -> AppResult<User>;

    /// Soft-deactivate an account (admin)
    async fn deactivate(&self, id: Uuid) -> AppResult<()>;

    /// Reactivate a deactivated account (admin)
    async fn reactivate(&self, id: Uuid) -> AppResult<User>;

    /// List accounts, optionally filtered by role (admin)
    async fn list(
        &self,
        params: &PaginationParams,
        role: Option<String>,
    ) -> AppResult<(Vec<User>, u64)>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_any(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id_any(id).await?.ok_or_not_found()
    }

    async fn update_profile(&self, id: Uuid, payload: UpdateProfile) -> AppResult<User> {
        self.uow
            .users()
            .update_profile(id, payload.name, payload.phone)
            .await
    }

    async fn admin_update(&self, id: Uuid, payload: AdminUpdateUser) -> AppResult<User> {
        if let Some(role) = &payload.role {
            if !is_valid_role(role) {
                return Err(AppError::validation(format!("Unknown role: {}", role)));
            }
        }
        self.uow
            .users()
            .admin_update(id, payload.name, payload.role)
            .await
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().deactivate(id).await
    }

    async fn reactivate(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().reactivate(id).await
    }

    async fn list(
        &self,
        params: &PaginationParams,
        role: Option<String>,
    ) -> AppResult<(Vec<User>, u64)> {
        if let Some(role) = &role {
            if !is_valid_role(role) {
                return Err(AppError::validation(format!("Unknown role: {}", role)));
            }
        }
        self.uow.users().list(params, role).await
    }
}
