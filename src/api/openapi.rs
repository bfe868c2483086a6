//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, catalog_handler, collection_handler, notification_handler, posted_item_handler,
    review_handler, user_handler,
};
use crate::api::handlers::wishlist_handler;
use crate::domain::{
    AddWishlistItem, AdminUpdateUser, CancelRequest, CollectionRequestItemResponse,
    CollectionRequestResponse, CollectionStatus, CollectorSnapshot, CompleteItemInput,
    CompleteRequest, CreateFromWishlist, CreatePostedItem, CreateRecyclingItem, CreateReview,
    ItemCategory, NotificationResponse, NotificationType, PaymentStatus, PostedItemResponse,
    RecyclingItemResponse, RequestStats, RequestType, ReviewResponse, StatusHistoryEntry,
    UpdatePostedItem, UpdateProfile, UpdateRecyclingItem, UpdateReview, UpdateStatusRequest,
    UpdateWishlistItem, UserResponse, UserRole, WishlistItemResponse,
};
use crate::services::TokenResponse;
use crate::types::PaginationMeta;

/// OpenAPI documentation for the EcoCollect API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EcoCollect API",
        version = "0.1.0",
        description = "Recycling marketplace: post recyclables, schedule collections, settle payments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        // Users
        user_handler::get_current_user,
        user_handler::update_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::admin_update_user,
        user_handler::deactivate_user,
        user_handler::reactivate_user,
        // Catalog
        catalog_handler::browse_items,
        catalog_handler::list_categories,
        catalog_handler::get_item,
        catalog_handler::create_item,
        catalog_handler::update_item,
        catalog_handler::delete_item,
        catalog_handler::restore_item,
        // Posted items
        posted_item_handler::create_posted_item,
        posted_item_handler::list_posted_items,
        posted_item_handler::get_posted_item,
        posted_item_handler::update_posted_item,
        // Collection requests
        collection_handler::list_requests,
        collection_handler::request_stats,
        collection_handler::create_from_wishlist,
        collection_handler::get_request,
        collection_handler::update_request_status,
        collection_handler::complete_request,
        collection_handler::cancel_request,
        // Reviews
        review_handler::create_review,
        review_handler::list_collector_reviews,
        review_handler::update_review,
        review_handler::delete_review,
        // Notifications
        notification_handler::list_notifications,
        notification_handler::unread_count,
        notification_handler::mark_read,
        notification_handler::mark_all_read,
        notification_handler::clear_old,
        // Wishlist
        wishlist_handler::list_wishlist,
        wishlist_handler::add_wishlist_item,
        wishlist_handler::update_wishlist_item,
        wishlist_handler::remove_wishlist_item,
    ),
    components(
        schemas(
            // Domain enums
            UserRole,
            ItemCategory,
            CollectionStatus,
            RequestType,
            PaymentStatus,
            NotificationType,
            // Responses
            UserResponse,
            RecyclingItemResponse,
            PostedItemResponse,
            CollectionRequestResponse,
            CollectionRequestItemResponse,
            CollectorSnapshot,
            StatusHistoryEntry,
            RequestStats,
            ReviewResponse,
            NotificationResponse,
            WishlistItemResponse,
            PaginationMeta,
            TokenResponse,
            // Requests
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            UpdateProfile,
            AdminUpdateUser,
            CreateRecyclingItem,
            UpdateRecyclingItem,
            CreatePostedItem,
            UpdatePostedItem,
            CreateFromWishlist,
            UpdateStatusRequest,
            CompleteRequest,
            CompleteItemInput,
            CancelRequest,
            CreateReview,
            UpdateReview,
            AddWishlistItem,
            UpdateWishlistItem,
            posted_item_handler::PostedItemCreated,
            notification_handler::UnreadCount,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profile and admin user management"),
        (name = "Catalog", description = "Recycling-item price list"),
        (name = "Posted Items", description = "User-submitted recyclables"),
        (name = "Collection Requests", description = "Pickup lifecycle and settlement"),
        (name = "Reviews", description = "Collector reviews and ratings"),
        (name = "Notifications", description = "Lifecycle notifications"),
        (name = "Wishlist", description = "Saved catalog items")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
