//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. Multi-entity writes run through the Unit of
//! Work's transactional context.

mod auth_service;
mod catalog_service;
mod collection_service;
pub mod container;
mod notification_service;
mod posted_item_service;
mod review_service;
mod user_service;
mod wishlist_service;

use uuid::Uuid;

use crate::domain::UserRole;

pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use catalog_service::{CatalogManager, CatalogService};
pub use collection_service::{CollectionManager, CollectionService};
pub use container::Services;
pub use notification_service::{NotificationManager, NotificationService};
pub use posted_item_service::{PostedItemManager, PostedItemService};
pub use review_service::{ReviewManager, ReviewService};
pub use user_service::{UserManager, UserService};
pub use wishlist_service::{WishlistManager, WishlistService};

/// The authenticated principal a service call acts on behalf of.
///
/// Carries the display name so status-history entries and snapshots can
/// record who made each change.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }
}
