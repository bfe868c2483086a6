//! Recycling-item catalog handlers.
//!
//! Browse responses are served from the entity-keyed response cache;
//! every admin mutation invalidates the whole catalog entity.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::CACHE_ENTITY_CATALOG;
use crate::domain::{
    CreateRecyclingItem, ItemCategory, RecyclingItemResponse, UpdateRecyclingItem,
};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// Category filter for catalog browsing
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Cached page shape for the browse endpoint
#[derive(Debug, Serialize, Deserialize)]
struct CachedCatalogPage {
    items: Vec<RecyclingItemResponse>,
    meta: PaginationMeta,
}

/// Public catalog routes
pub fn catalog_public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(browse_items))
        .route("/categories", get(list_categories))
        .route("/:id", get(get_item))
}

/// Admin catalog routes
pub fn catalog_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/:id", axum::routing::put(update_item).delete(delete_item))
        .route("/:id/restore", post(restore_item))
}

/// Browse the catalog
#[utoipa::path(
    get,
    path = "/api/recycling-items",
    tag = "Catalog",
    params(PaginationParams, ("category" = Option<String>, Query, description = "Filter by category")),
    responses((status = 200, description = "Paginated catalog entries"))
)]
pub async fn browse_items(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<Vec<RecyclingItemResponse>>>> {
    let category = match &filter.category {
        Some(raw) => Some(
            ItemCategory::parse(raw)
                .ok_or_else(|| AppError::validation(format!("Unknown category: {}", raw)))?,
        ),
        None => None,
    };

    let cache_params = format!(
        "cat:{}:{}",
        category.map(|c| c.as_str()).unwrap_or("all"),
        pagination.cache_fragment()
    );
    if let Ok(Some(cached)) = state
        .cache
        .get_response::<CachedCatalogPage>(CACHE_ENTITY_CATALOG, &cache_params)
        .await
    {
        return Ok(Json(ApiResponse::paginated(cached.items, cached.meta)));
    }

    let (items, total) = state
        .services
        .catalog()
        .browse(&pagination, category, false)
        .await?;

    let meta = PaginationMeta::new(&pagination, total);
    let items: Vec<RecyclingItemResponse> =
        items.into_iter().map(RecyclingItemResponse::from).collect();

    // Best effort write-through; a cache failure must not fail the read
    let page = CachedCatalogPage {
        items,
        meta: meta.clone(),
    };
    if let Err(e) = state
        .cache
        .set_response(CACHE_ENTITY_CATALOG, &cache_params, &page)
        .await
    {
        tracing::warn!(error = %e, "Failed to cache catalog page");
    }

    Ok(Json(ApiResponse::paginated(page.items, page.meta)))
}

/// The category taxonomy
#[utoipa::path(
    get,
    path = "/api/recycling-items/categories",
    tag = "Catalog",
    responses((status = 200, description = "Available categories"))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(state.services.catalog().categories()))
}

/// Get catalog entry by id
#[utoipa::path(
    get,
    path = "/api/recycling-items/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Catalog entry id")),
    responses(
        (status = 200, description = "Catalog entry", body = RecyclingItemResponse),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecyclingItemResponse>>> {
    let item = state.services.catalog().get(id).await?;
    Ok(Json(ApiResponse::success(RecyclingItemResponse::from(item))))
}

/// Create a catalog entry (admin)
#[utoipa::path(
    post,
    path = "/api/recycling-items",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateRecyclingItem,
    responses(
        (status = 201, description = "Entry created", body = RecyclingItemResponse),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Business key already exists")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateRecyclingItem>,
) -> AppResult<(StatusCode, Json<ApiResponse<RecyclingItemResponse>>)> {
    require_admin(&current)?;
    let item = state.services.catalog().create(payload).await?;
    let _ = state.cache.invalidate_entity(CACHE_ENTITY_CATALOG).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RecyclingItemResponse::from(item))),
    ))
}

/// Update a catalog entry (admin)
#[utoipa::path(
    put,
    path = "/api/recycling-items/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Catalog entry id")),
    request_body = UpdateRecyclingItem,
    responses(
        (status = 200, description = "Entry updated", body = RecyclingItemResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRecyclingItem>,
) -> AppResult<Json<ApiResponse<RecyclingItemResponse>>> {
    require_admin(&current)?;
    let item = state.services.catalog().update(id, payload).await?;
    let _ = state.cache.invalidate_entity(CACHE_ENTITY_CATALOG).await;
    Ok(Json(ApiResponse::success(RecyclingItemResponse::from(item))))
}

/// Soft-delete a catalog entry (admin)
#[utoipa::path(
    delete,
    path = "/api/recycling-items/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Catalog entry id")),
    responses(
        (status = 200, description = "Entry removed"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current)?;
    state.services.catalog().soft_delete(id).await?;
    let _ = state.cache.invalidate_entity(CACHE_ENTITY_CATALOG).await;
    Ok(Json(ApiResponse::message("Recycling item removed")))
}

/// Restore a soft-deleted entry (admin)
#[utoipa::path(
    post,
    path = "/api/recycling-items/{id}/restore",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Catalog entry id")),
    responses(
        (status = 200, description = "Entry restored", body = RecyclingItemResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn restore_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecyclingItemResponse>>> {
    require_admin(&current)?;
    let item = state.services.catalog().restore(id).await?;
    let _ = state.cache.invalidate_entity(CACHE_ENTITY_CATALOG).await;
    Ok(Json(ApiResponse::success(RecyclingItemResponse::from(item))))
}
