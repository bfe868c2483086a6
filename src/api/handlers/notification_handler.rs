//! Notification handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::NotificationResponse;
use crate::errors::AppResult;
use crate::types::{ApiResponse, PaginationMeta, PaginationParams};

/// Filters for the notification listing
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// Only unread notifications when true
    #[serde(default)]
    pub unread: bool,
}

/// Retention-sweep parameters
#[derive(Debug, Deserialize)]
pub struct ClearOldQuery {
    pub days: Option<i64>,
}

/// Unread counter payload
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCount {
    pub unread: u64,
}

/// Notification routes (all behind auth middleware)
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/:id/read", put(mark_read))
        .route("/read-all", put(mark_all_read))
        .route("/clear-old", delete(clear_old))
}

/// List own notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(PaginationParams, ("unread" = Option<bool>, Query, description = "Only unread")),
    responses((status = 200, description = "Paginated notifications"))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<NotificationQuery>,
) -> AppResult<Json<ApiResponse<Vec<NotificationResponse>>>> {
    let (notifications, total) = state
        .services
        .notifications()
        .list(current.id, &pagination, filter.unread)
        .await?;

    let meta = PaginationMeta::new(&pagination, total);
    let data = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();
    Ok(Json(ApiResponse::paginated(data, meta)))
}

/// Unread notification count
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Unread count", body = UnreadCount))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UnreadCount>>> {
    let unread = state.services.notifications().unread_count(current.id).await?;
    Ok(Json(ApiResponse::success(UnreadCount { unread })))
}

/// Mark one notification read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked read", body = NotificationResponse),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<NotificationResponse>>> {
    let notification = state
        .services
        .notifications()
        .mark_read(current.id, id)
        .await?;
    Ok(Json(ApiResponse::success(NotificationResponse::from(notification))))
}

/// Mark all notifications read (idempotent)
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All marked read"))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<()>>> {
    let updated = state
        .services
        .notifications()
        .mark_all_read(current.id)
        .await?;
    Ok(Json(ApiResponse::message(format!(
        "{} notifications marked as read",
        updated
    ))))
}

/// Retention sweep: drop read notifications older than the cutoff
#[utoipa::path(
    delete,
    path = "/api/notifications/clear-old",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("days" = Option<i64>, Query, description = "Retention window in days (default 30)")),
    responses((status = 200, description = "Old notifications cleared"))
)]
pub async fn clear_old(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ClearOldQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    let swept = state
        .services
        .notifications()
        .clear_old(current.id, query.days)
        .await?;
    Ok(Json(ApiResponse::message(format!(
        "{} old notifications cleared",
        swept
    ))))
}
