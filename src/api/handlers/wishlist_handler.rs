//! Wishlist handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AddWishlistItem, UpdateWishlistItem, WishlistItemResponse};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Wishlist routes (all behind auth middleware)
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_wishlist_item))
        .route(
            "/:id",
            axum::routing::put(update_wishlist_item).delete(remove_wishlist_item),
        )
}

/// List own wishlist
#[utoipa::path(
    get,
    path = "/api/wishlist",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Wishlist entries"))
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<WishlistItemResponse>>>> {
    let rows = state.services.wishlist().list(current.id).await?;
    let data = rows
        .into_iter()
        .map(|(entry, item)| WishlistItemResponse::from_parts(entry, &item))
        .collect();
    Ok(Json(ApiResponse::success(data)))
}

/// Add a catalog item to the wishlist
#[utoipa::path(
    post,
    path = "/api/wishlist",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    request_body = AddWishlistItem,
    responses(
        (status = 201, description = "Entry added"),
        (status = 404, description = "Catalog item not found"),
        (status = 409, description = "Already wishlisted")
    )
)]
pub async fn add_wishlist_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<AddWishlistItem>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    state.services.wishlist().add(current.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Item added to wishlist")),
    ))
}

/// Update quantity/notes of a wishlist entry
#[utoipa::path(
    put,
    path = "/api/wishlist/{id}",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Wishlist entry id")),
    request_body = UpdateWishlistItem,
    responses(
        (status = 200, description = "Entry updated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_wishlist_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateWishlistItem>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .services
        .wishlist()
        .update(current.id, id, payload)
        .await?;
    Ok(Json(ApiResponse::message("Wishlist entry updated")))
}

/// Remove a wishlist entry
#[utoipa::path(
    delete,
    path = "/api/wishlist/{id}",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Wishlist entry id")),
    responses(
        (status = 200, description = "Entry removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn remove_wishlist_item(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.wishlist().remove(current.id, id).await?;
    Ok(Json(ApiResponse::message("Wishlist entry removed")))
}
