//! User handlers: self-service profile plus admin user management.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{AdminUpdateUser, UpdateProfile, UserResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// Role filter for the admin list endpoint
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
}

/// Create user routes (all behind auth middleware)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user).put(update_current_user))
        .route("/", get(list_users))
        .route(
            "/:id",
            get(get_user).put(admin_update_user).delete(deactivate_user),
        )
        .route("/:id/reactivate", post(reactivate_user))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.services.users().get_user(current.id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_current_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfile>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .services
        .users()
        .update_profile(current.id, payload)
        .await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// List accounts (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated accounts"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<UserListQuery>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    require_admin(&current)?;

    let pagination = pagination.for_admin();
    let (users, total) = state
        .services
        .users()
        .list(&pagination, filter.role)
        .await?;

    let meta = PaginationMeta::new(&pagination, total);
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, meta)))
}

/// Get any account by id (admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&current)?;
    let user = state.services.users().get_user_any(id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Update name/role of an account (admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = AdminUpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn admin_update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AdminUpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&current)?;
    let user = state.services.users().admin_update(id, payload).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Soft-deactivate an account (admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deactivated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_admin(&current)?;
    state.services.users().deactivate(id).await?;
    Ok(Json(ApiResponse::message("User deactivated")))
}

/// Reactivate a deactivated account (admin)
#[utoipa::path(
    post,
    path = "/api/users/{id}/reactivate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User reactivated", body = UserResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn reactivate_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&current)?;
    let user = state.services.users().reactivate(id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}
