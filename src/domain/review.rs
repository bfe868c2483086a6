//! Reviews and the collector rating aggregate.
//!
//! A collector's stored rating is always the arithmetic mean over that
//! collector's currently-active reviews, recomputed in full on every
//! review mutation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use crate::errors::{AppError, AppResult};

/// Review domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub collector_id: Uuid,
    /// Integer rating in [1, 5]
    pub rating: i32,
    pub comment: Option<String>,
    pub is_anonymous: bool,
    /// Set when the reviewer has a completed request with the collector
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validate a rating value against the accepted range.
pub fn validate_rating(rating: i32) -> AppResult<()> {
    if (MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Rating must be between {} and {}",
            MIN_REVIEW_RATING, MAX_REVIEW_RATING
        )))
    }
}

/// Arithmetic mean over active review ratings, 0 when none remain.
///
/// Rounded to two decimal places for storage.
pub fn mean_rating(ratings: &[i32]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let mean = Decimal::from(sum) / Decimal::from(ratings.len() as i64);
    mean.round_dp(2)
}

/// Review creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub collector_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4)]
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Review update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub is_anonymous: Option<bool>,
}

/// Review response; the reviewer is hidden for anonymous reviews
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub reviewer_name: Option<String>,
    pub collector_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_anonymous: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn new(review: Review, reviewer_name: Option<String>) -> Self {
        let (user_id, reviewer_name) = if review.is_anonymous {
            (None, None)
        } else {
            (Some(review.user_id), reviewer_name)
        };
        Self {
            id: review.id,
            user_id,
            reviewer_name,
            collector_id: review.collector_id,
            rating: review.rating,
            comment: review.comment,
            is_anonymous: review.is_anonymous,
            is_verified: review.is_verified,
            created_at: review.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_mean_rating_is_exact() {
        assert_eq!(mean_rating(&[4, 5]), dec!(4.5));
        assert_eq!(mean_rating(&[1, 2, 3, 4, 5]), dec!(3));
        assert_eq!(mean_rating(&[5]), dec!(5));
    }

    #[test]
    fn test_mean_rating_rounds_to_two_places() {
        // 1 + 2 + 5 = 8 / 3 = 2.666... -> 2.67
        assert_eq!(mean_rating(&[1, 2, 5]), dec!(2.67));
    }

    #[test]
    fn test_mean_rating_empty_is_zero() {
        assert_eq!(mean_rating(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_anonymous_review_hides_reviewer() {
        let review = Review {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            collector_id: Uuid::new_v4(),
            rating: 4,
            comment: None,
            is_anonymous: true,
            is_verified: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let resp = ReviewResponse::new(review, Some("Nimal".into()));
        assert!(resp.user_id.is_none());
        assert!(resp.reviewer_name.is_none());
    }
}
