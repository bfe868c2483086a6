//! Review service.
//!
//! Each mutation recomputes the collector's stored rating from the
//! full active review set inside the same transaction, so the mean can
//! never drift.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    mean_rating, validate_rating, CreateReview, Notification, Review, UpdateReview, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

use super::Actor;

#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Create a review for a collector.
    async fn create(&self, actor: Actor, payload: CreateReview) -> AppResult<Review>;

    /// Update own review (or any, as admin).
    async fn update(&self, actor: Actor, id: Uuid, payload: UpdateReview) -> AppResult<Review>;

    /// Soft-delete own review (or any, as admin).
    async fn delete(&self, actor: Actor, id: Uuid) -> AppResult<()>;

    /// Active reviews for a collector with reviewer display names.
    async fn list_for_collector(
        &self,
        collector_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<(Review, Option<String>)>, u64)>;
}

pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn create(&self, actor: Actor, payload: CreateReview) -> AppResult<Review> {
        validate_rating(payload.rating)?;
        if payload.collector_id == actor.id {
            return Err(AppError::validation("You cannot review yourself"));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let collector = ctx
                        .users()
                        .find_by_id(payload.collector_id)
                        .await?
                        .ok_or(AppError::NotFound)?;
                    if collector.role != UserRole::Collector {
                        return Err(AppError::NotFound);
                    }

                    if ctx
                        .reviews()
                        .find_active_by_pair(actor.id, collector.id)
                        .await?
                        .is_some()
                    {
                        return Err(AppError::conflict("Review"));
                    }

                    let is_verified = ctx
                        .collections()
                        .has_completed_with(actor.id, collector.id)
                        .await?;

                    let now = Utc::now();
                    let review = ctx
                        .reviews()
                        .create(Review {
                            id: Uuid::new_v4(),
                            user_id: actor.id,
                            collector_id: collector.id,
                            rating: payload.rating,
                            comment: payload.comment.clone(),
                            is_anonymous: payload.is_anonymous,
                            is_verified,
                            is_active: true,
                            created_at: now,
                            updated_at: now,
                        })
                        .await?;

                    let ratings = ctx.reviews().active_ratings(collector.id).await?;
                    ctx.users()
                        .set_rating(collector.id, mean_rating(&ratings))
                        .await?;

                    ctx.notifications()
                        .create(Notification::for_review(
                            collector.id,
                            review.id,
                            format!("You received a {}-star review", review.rating),
                        ))
                        .await?;

                    Ok(review)
                })
            })
            .await
    }

    async fn update(&self, actor: Actor, id: Uuid, payload: UpdateReview) -> AppResult<Review> {
        if let Some(rating) = payload.rating {
            validate_rating(rating)?;
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .reviews()
                        .find_by_id(id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if existing.user_id != actor.id && !actor.role.is_admin() {
                        return Err(AppError::Forbidden);
                    }

                    let review = ctx
                        .reviews()
                        .update(id, payload.rating, payload.comment.clone(), payload.is_anonymous)
                        .await?;

                    let ratings = ctx.reviews().active_ratings(review.collector_id).await?;
                    ctx.users()
                        .set_rating(review.collector_id, mean_rating(&ratings))
                        .await?;

                    Ok(review)
                })
            })
            .await
    }

    async fn delete(&self, actor: Actor, id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .reviews()
                        .find_by_id(id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if existing.user_id != actor.id && !actor.role.is_admin() {
                        return Err(AppError::Forbidden);
                    }

                    ctx.reviews().soft_delete(id).await?;

                    // mean_rating falls back to 0 when no reviews remain
                    let ratings = ctx.reviews().active_ratings(existing.collector_id).await?;
                    ctx.users()
                        .set_rating(existing.collector_id, mean_rating(&ratings))
                        .await?;

                    Ok(())
                })
            })
            .await
    }

    async fn list_for_collector(
        &self,
        collector_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<(Review, Option<String>)>, u64)> {
        let (reviews, total) = self
            .uow
            .reviews()
            .list_for_collector(collector_id, params)
            .await?;

        let reviewer_ids: Vec<Uuid> = reviews
            .iter()
            .filter(|r| !r.is_anonymous)
            .map(|r| r.user_id)
            .collect();
        let names = self.uow.users().display_names(reviewer_ids).await?;

        let rows = reviews
            .into_iter()
            .map(|review| {
                let name = names.get(&review.user_id).cloned();
                (review, name)
            })
            .collect();

        Ok((rows, total))
    }
}
