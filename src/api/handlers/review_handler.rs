//! Review handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateReview, ReviewResponse, UpdateReview};
use crate::errors::AppResult;
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// Review routes (all behind auth middleware)
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/collector/:id", get(list_collector_reviews))
        .route("/:id", axum::routing::put(update_review).delete(delete_review))
}

/// Review a collector
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Collector not found"),
        (status = 409, description = "Already reviewed this collector")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReview>,
) -> AppResult<(StatusCode, Json<ApiResponse<ReviewResponse>>)> {
    let review = state
        .services
        .reviews()
        .create(current.actor(), payload)
        .await?;

    let reviewer_name = Some(current.name.clone());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReviewResponse::new(review, reviewer_name))),
    ))
}

/// Active reviews for a collector
#[utoipa::path(
    get,
    path = "/api/reviews/collector/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Collector id"), PaginationParams),
    responses((status = 200, description = "Paginated reviews"))
)]
pub async fn list_collector_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<ReviewResponse>>>> {
    let (rows, total) = state
        .services
        .reviews()
        .list_for_collector(id, &pagination)
        .await?;

    let meta = PaginationMeta::new(&pagination, total);
    let data = rows
        .into_iter()
        .map(|(review, name)| ReviewResponse::new(review, name))
        .collect();
    Ok(Json(ApiResponse::paginated(data, meta)))
}

/// Update own review
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Review id")),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 403, description = "Not the reviewer"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateReview>,
) -> AppResult<Json<ApiResponse<ReviewResponse>>> {
    let review = state
        .services
        .reviews()
        .update(current.actor(), id, payload)
        .await?;

    let reviewer_name = Some(current.name.clone());
    Ok(Json(ApiResponse::success(ReviewResponse::new(review, reviewer_name))))
}

/// Soft-delete own review
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review removed"),
        (status = 403, description = "Not the reviewer"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.reviews().delete(current.actor(), id).await?;
    Ok(Json(ApiResponse::message("Review removed")))
}
