//! Review repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::review::{self, Entity as ReviewEntity};
use crate::domain::Review;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find active review by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;

    /// Active reviews for a collector, newest first
    async fn list_for_collector(
        &self,
        collector_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Review>, u64)>;
}

pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id)
            .filter(review::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(result.map(Review::from))
    }

    async fn list_for_collector(
        &self,
        collector_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Review>, u64)> {
        let paginator = ReviewEntity::find()
            .filter(review::Column::CollectorId.eq(collector_id))
            .filter(review::Column::IsActive.eq(true))
            .order_by_desc(review::Column::CreatedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(Review::from).collect(), total))
    }
}

/// Transaction-scoped review operations.
///
/// Review mutations and the rating recompute they trigger share one
/// transaction, so the stored mean never drifts from the active set.
pub struct TxReviewRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxReviewRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Active review by ID within the transaction
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id)
            .filter(review::Column::IsActive.eq(true))
            .one(self.txn)
            .await?;
        Ok(result.map(Review::from))
    }

    /// The reviewer's existing active review of this collector, if any
    pub async fn find_active_by_pair(
        &self,
        user_id: Uuid,
        collector_id: Uuid,
    ) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::CollectorId.eq(collector_id))
            .filter(review::Column::IsActive.eq(true))
            .one(self.txn)
            .await?;
        Ok(result.map(Review::from))
    }

    /// Insert a review
    pub async fn create(&self, review: Review) -> AppResult<Review> {
        let model = review::ActiveModel {
            id: Set(review.id),
            user_id: Set(review.user_id),
            collector_id: Set(review.collector_id),
            rating: Set(review.rating),
            comment: Set(review.comment),
            is_anonymous: Set(review.is_anonymous),
            is_verified: Set(review.is_verified),
            is_active: Set(review.is_active),
            created_at: Set(review.created_at),
            updated_at: Set(review.updated_at),
        }
        .insert(self.txn)
        .await?;

        Ok(Review::from(model))
    }

    /// Update rating/comment/anonymity of an active review
    pub async fn update(
        &self,
        id: Uuid,
        rating: Option<i32>,
        comment: Option<String>,
        is_anonymous: Option<bool>,
    ) -> AppResult<Review> {
        let model = ReviewEntity::find_by_id(id)
            .filter(review::Column::IsActive.eq(true))
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: review::ActiveModel = model.into();
        if let Some(rating) = rating {
            active.rating = Set(rating);
        }
        if comment.is_some() {
            active.comment = Set(comment);
        }
        if let Some(is_anonymous) = is_anonymous {
            active.is_anonymous = Set(is_anonymous);
        }
        active.updated_at = Set(Utc::now());

        Ok(Review::from(active.update(self.txn).await?))
    }

    /// Soft-delete a review
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let model = ReviewEntity::find_by_id(id)
            .filter(review::Column::IsActive.eq(true))
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: review::ActiveModel = model.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(self.txn).await?;
        Ok(())
    }

    /// All active ratings for a collector, for the mean recompute
    pub async fn active_ratings(&self, collector_id: Uuid) -> AppResult<Vec<i32>> {
        let ratings: Vec<i32> = ReviewEntity::find()
            .select_only()
            .column(review::Column::Rating)
            .filter(review::Column::CollectorId.eq(collector_id))
            .filter(review::Column::IsActive.eq(true))
            .into_tuple()
            .all(self.txn)
            .await?;
        Ok(ratings)
    }
}
