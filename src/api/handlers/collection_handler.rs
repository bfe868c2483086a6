//! Collection-request handlers.
//!
//! Listing responses are cached per actor and invalidated on any
//! lifecycle mutation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_collector, CurrentUser};
use crate::api::AppState;
use crate::config::CACHE_ENTITY_REQUESTS;
use crate::domain::{
    CancelRequest, CollectionRequestResponse, CollectionStatus, CompleteRequest,
    CreateFromWishlist, RequestStats, RequestType, UpdateStatusRequest,
};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// Filters for request listings
#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    pub status: Option<String>,
    pub request_type: Option<String>,
}

/// Cached page shape for the list endpoint
#[derive(Debug, Serialize, Deserialize)]
struct CachedRequestPage {
    requests: Vec<CollectionRequestResponse>,
    meta: PaginationMeta,
}

/// Collection-request routes (all behind auth middleware)
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests))
        .route("/stats", get(request_stats))
        .route("/from-wishlist", post(create_from_wishlist))
        .route("/:id", get(get_request))
        .route("/:id/status", put(update_request_status))
        .route("/:id/complete", post(complete_request))
        .route("/:id/cancel", post(cancel_request))
}

/// List collection requests visible to the caller
#[utoipa::path(
    get,
    path = "/api/collection-requests",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    params(
        PaginationParams,
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("request_type" = Option<String>, Query, description = "Filter by request type")
    ),
    responses((status = 200, description = "Paginated requests"))
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<RequestListQuery>,
) -> AppResult<Json<ApiResponse<Vec<CollectionRequestResponse>>>> {
    let status = match &filter.status {
        Some(raw) => Some(
            CollectionStatus::parse(raw)
                .ok_or_else(|| AppError::validation(format!("Unknown status: {}", raw)))?,
        ),
        None => None,
    };
    let request_type = match &filter.request_type {
        Some(raw) => Some(
            RequestType::parse(raw)
                .ok_or_else(|| AppError::validation(format!("Unknown request type: {}", raw)))?,
        ),
        None => None,
    };

    let cache_params = format!(
        "u:{}:s:{}:t:{}:{}",
        current.id,
        status.map(|s| s.as_str()).unwrap_or("all"),
        request_type.map(|t| t.as_str()).unwrap_or("all"),
        pagination.cache_fragment()
    );
    if let Ok(Some(cached)) = state
        .cache
        .get_response::<CachedRequestPage>(CACHE_ENTITY_REQUESTS, &cache_params)
        .await
    {
        return Ok(Json(ApiResponse::paginated(cached.requests, cached.meta)));
    }

    let (requests, total) = state
        .services
        .collections()
        .list(current.actor(), &pagination, status, request_type)
        .await?;

    let meta = PaginationMeta::new(&pagination, total);
    let requests: Vec<CollectionRequestResponse> = requests
        .into_iter()
        .map(|r| CollectionRequestResponse::from_parts(r, Vec::new()))
        .collect();

    let page = CachedRequestPage {
        requests,
        meta: meta.clone(),
    };
    if let Err(e) = state
        .cache
        .set_response(CACHE_ENTITY_REQUESTS, &cache_params, &page)
        .await
    {
        tracing::warn!(error = %e, "Failed to cache request page");
    }

    Ok(Json(ApiResponse::paginated(page.requests, page.meta)))
}

/// Per-status stats scoped to the caller
#[utoipa::path(
    get,
    path = "/api/collection-requests/stats",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Request stats", body = RequestStats))
)]
pub async fn request_stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<RequestStats>>> {
    let stats = state.services.collections().stats(current.actor()).await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// Convert wishlist entries into a batch collection request
#[utoipa::path(
    post,
    path = "/api/collection-requests/from-wishlist",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    request_body = CreateFromWishlist,
    responses(
        (status = 201, description = "Request created", body = CollectionRequestResponse),
        (status = 404, description = "Wishlist entry not found")
    )
)]
pub async fn create_from_wishlist(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateFromWishlist>,
) -> AppResult<(StatusCode, Json<ApiResponse<CollectionRequestResponse>>)> {
    let (request, items) = state
        .services
        .collections()
        .create_from_wishlist(current.actor(), payload)
        .await?;

    let _ = state.cache.invalidate_entity(CACHE_ENTITY_REQUESTS).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CollectionRequestResponse::from_parts(
            request, items,
        ))),
    ))
}

/// Get a request with its line items
#[utoipa::path(
    get,
    path = "/api/collection-requests/{id}",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request found", body = CollectionRequestResponse),
        (status = 403, description = "Not visible to this user"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CollectionRequestResponse>>> {
    let (request, items) = state.services.collections().get(current.actor(), id).await?;
    Ok(Json(ApiResponse::success(CollectionRequestResponse::from_parts(
        request, items,
    ))))
}

/// Move a request along the lifecycle (collector or admin)
#[utoipa::path(
    put,
    path = "/api/collection-requests/{id}/status",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Request id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = CollectionRequestResponse),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Collector role required")
    )
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<CollectionRequestResponse>>> {
    require_collector(&current)?;

    let request = state
        .services
        .collections()
        .update_status(id, current.actor(), payload)
        .await?;

    let _ = state.cache.invalidate_entity(CACHE_ENTITY_REQUESTS).await;

    Ok(Json(ApiResponse::success(CollectionRequestResponse::from_parts(
        request,
        Vec::new(),
    ))))
}

/// Complete a request and settle payment
#[utoipa::path(
    post,
    path = "/api/collection-requests/{id}/complete",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Request id")),
    request_body = CompleteRequest,
    responses(
        (status = 200, description = "Request completed", body = CollectionRequestResponse),
        (status = 400, description = "Illegal transition or foreign line item"),
        (status = 403, description = "Assigned collector or admin required")
    )
)]
pub async fn complete_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CompleteRequest>,
) -> AppResult<Json<ApiResponse<CollectionRequestResponse>>> {
    require_collector(&current)?;

    let request = state
        .services
        .collections()
        .complete(id, current.actor(), payload)
        .await?;

    let _ = state.cache.invalidate_entity(CACHE_ENTITY_REQUESTS).await;

    Ok(Json(ApiResponse::with_message(
        CollectionRequestResponse::from_parts(request, Vec::new()),
        "Collection completed and payment settled",
    )))
}

/// Cancel a request (owner or admin)
#[utoipa::path(
    post,
    path = "/api/collection-requests/{id}/cancel",
    tag = "Collection Requests",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Request id")),
    request_body = CancelRequest,
    responses(
        (status = 200, description = "Request cancelled", body = CollectionRequestResponse),
        (status = 400, description = "Request already in progress or terminal"),
        (status = 403, description = "Owner or admin required")
    )
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<ApiResponse<CollectionRequestResponse>>> {
    let request = state
        .services
        .collections()
        .cancel(id, current.actor(), payload)
        .await?;

    let _ = state.cache.invalidate_entity(CACHE_ENTITY_REQUESTS).await;

    Ok(Json(ApiResponse::success(CollectionRequestResponse::from_parts(
        request,
        Vec::new(),
    ))))
}
