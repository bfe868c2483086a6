//! Posted-item handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::CACHE_ENTITY_REQUESTS;
use crate::domain::{
    CollectionRequestResponse, CollectionStatus, CreatePostedItem, PostedItemResponse,
    UpdatePostedItem,
};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// Status filter for posted-item listings
#[derive(Debug, Deserialize)]
pub struct PostedItemQuery {
    pub status: Option<String>,
}

/// Posting result: the item plus its spawned request
#[derive(Debug, Serialize, ToSchema)]
pub struct PostedItemCreated {
    pub posted_item: PostedItemResponse,
    pub collection_request: CollectionRequestResponse,
}

/// Posted-item routes (all behind auth middleware)
pub fn posted_item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posted_items).post(create_posted_item))
        .route("/:id", get(get_posted_item).put(update_posted_item))
}

/// Post an item for collection
#[utoipa::path(
    post,
    path = "/api/posted-items",
    tag = "Posted Items",
    security(("bearer_auth" = [])),
    request_body = CreatePostedItem,
    responses(
        (status = 201, description = "Item posted and request spawned", body = PostedItemCreated),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_posted_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePostedItem>,
) -> AppResult<(StatusCode, Json<ApiResponse<PostedItemCreated>>)> {
    let (posted, request) = state
        .services
        .posted_items()
        .create(current.id, payload)
        .await?;

    let _ = state.cache.invalidate_entity(CACHE_ENTITY_REQUESTS).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            PostedItemCreated {
                posted_item: PostedItemResponse::from(posted),
                collection_request: CollectionRequestResponse::from_parts(request, Vec::new()),
            },
            "Item posted; a collection request was created",
        )),
    ))
}

/// List posted items (own, or all as admin)
#[utoipa::path(
    get,
    path = "/api/posted-items",
    tag = "Posted Items",
    security(("bearer_auth" = [])),
    params(PaginationParams, ("status" = Option<String>, Query, description = "Filter by status")),
    responses((status = 200, description = "Paginated posted items"))
)]
pub async fn list_posted_items(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<PostedItemQuery>,
) -> AppResult<Json<ApiResponse<Vec<PostedItemResponse>>>> {
    let status = match &filter.status {
        Some(raw) => Some(
            CollectionStatus::parse(raw)
                .ok_or_else(|| AppError::validation(format!("Unknown status: {}", raw)))?,
        ),
        None => None,
    };

    let (items, total) = state
        .services
        .posted_items()
        .list(current.actor(), &pagination, status)
        .await?;

    let meta = PaginationMeta::new(&pagination, total);
    let data = items.into_iter().map(PostedItemResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, meta)))
}

/// Get a posted item (owner or admin)
#[utoipa::path(
    get,
    path = "/api/posted-items/{id}",
    tag = "Posted Items",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Posted item id")),
    responses(
        (status = 200, description = "Posted item", body = PostedItemResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_posted_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PostedItemResponse>>> {
    let item = state.services.posted_items().get(current.actor(), id).await?;
    Ok(Json(ApiResponse::success(PostedItemResponse::from(item))))
}

/// Update a posted item while its request is still pending
#[utoipa::path(
    put,
    path = "/api/posted-items/{id}",
    tag = "Posted Items",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Posted item id")),
    request_body = UpdatePostedItem,
    responses(
        (status = 200, description = "Posted item updated", body = PostedItemResponse),
        (status = 400, description = "Request already in progress"),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn update_posted_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePostedItem>,
) -> AppResult<Json<ApiResponse<PostedItemResponse>>> {
    let item = state
        .services
        .posted_items()
        .update(current.actor(), id, payload)
        .await?;
    Ok(Json(ApiResponse::success(PostedItemResponse::from(item))))
}
