//! HTTP request handlers.

pub mod auth_handler;
pub mod catalog_handler;
pub mod collection_handler;
pub mod notification_handler;
pub mod posted_item_handler;
pub mod review_handler;
pub mod user_handler;
pub mod wishlist_handler;

pub use auth_handler::auth_routes;
pub use catalog_handler::{catalog_admin_routes, catalog_public_routes};
pub use collection_handler::collection_routes;
pub use notification_handler::notification_routes;
pub use posted_item_handler::posted_item_routes;
pub use review_handler::review_routes;
pub use user_handler::user_routes;
pub use wishlist_handler::wishlist_routes;
