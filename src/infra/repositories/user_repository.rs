//! User repository: account lookups, profile writes, and the derived
//! counter columns mutated by the completion and review flows.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// User repository trait for dependency injection.
///
/// Query methods exclude deactivated accounts unless stated otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by ID including deactivated accounts
    async fn find_by_id_any(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find active user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether any account, active or not, holds this email
    async fn email_taken(&self, email: &str) -> AppResult<bool>;

    /// Create a new account
    async fn create(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
        role: String,
    ) -> AppResult<User>;

    /// Self-service profile update
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
    ) -> AppResult<User>;

    /// Admin update (name and/or role)
    async fn admin_update(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<String>,
    ) -> AppResult<User>;

    /// Soft-deactivate an account
    async fn deactivate(&self, id: Uuid) -> AppResult<()>;

    /// Reactivate a deactivated account
    async fn reactivate(&self, id: Uuid) -> AppResult<User>;

    /// List accounts, optionally filtered by role
    async fn list(
        &self,
        params: &PaginationParams,
        role: Option<String>,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Display names for a set of user ids
    async fn display_names(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>>;
}

/// Concrete repository backed by the shared connection pool.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn find_by_id_any(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn email_taken(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
        role: String,
    ) -> AppResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            phone: Set(phone),
            password_hash: Set(password_hash),
            role: Set(role),
            rating: Set(Decimal::ZERO),
            total_collections: Set(0),
            total_earnings: Set(Decimal::ZERO),
            total_recycled_items: Set(0),
            total_recycled_value: Set(Decimal::ZERO),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(User::from(model))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if phone.is_some() {
            active.phone = Set(phone);
        }
        active.updated_at = Set(Utc::now());

        Ok(User::from(active.update(&self.db).await?))
    }

    async fn admin_update(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<String>,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(role) = role {
            active.role = Set(role);
        }
        active.updated_at = Set(Utc::now());

        Ok(User::from(active.update(&self.db).await?))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn reactivate(&self, id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::IsActive.eq(false))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::validation("User is not deactivated or does not exist"))?;

        let mut active: user::ActiveModel = model.into();
        active.is_active = Set(true);
        active.updated_at = Set(Utc::now());

        Ok(User::from(active.update(&self.db).await?))
    }

    async fn list(
        &self,
        params: &PaginationParams,
        role: Option<String>,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut query = UserEntity::find().order_by_desc(user::Column::CreatedAt);
        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn display_names(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(Uuid, String)> = UserEntity::find()
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Name)
            .filter(user::Column::Id.is_in(ids))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().collect())
    }
}

/// Transaction-scoped user operations.
///
/// Counter columns are incremented with SQL-level expressions so that
/// concurrent completions against the same account cannot lose updates.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find active user by ID within the transaction
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(self.txn)
            .await?;
        Ok(result.map(User::from))
    }

    /// Credit a completed collection to the requesting user's totals.
    pub async fn credit_recycler(&self, user_id: Uuid, value: Decimal) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(
                user::Column::TotalRecycledItems,
                Expr::col(user::Column::TotalRecycledItems).add(1),
            )
            .col_expr(
                user::Column::TotalRecycledValue,
                Expr::col(user::Column::TotalRecycledValue).add(Expr::val(value)),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(user_id))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Credit a completed collection to the collector's totals.
    pub async fn credit_collector(&self, collector_id: Uuid, earnings: Decimal) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(
                user::Column::TotalCollections,
                Expr::col(user::Column::TotalCollections).add(1),
            )
            .col_expr(
                user::Column::TotalEarnings,
                Expr::col(user::Column::TotalEarnings).add(Expr::val(earnings)),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(collector_id))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Store the recomputed mean rating for a collector.
    pub async fn set_rating(&self, collector_id: Uuid, rating: Decimal) -> AppResult<()> {
        UserEntity::update_many()
            .col_expr(user::Column::Rating, Expr::value(rating))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(collector_id))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}
