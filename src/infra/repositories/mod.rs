//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence. Stores
//! run against the shared connection pool; the `Tx*` variants run
//! inside a transaction handed out by the Unit of Work.

pub(crate) mod entities;

mod catalog_repository;
mod collection_repository;
mod notification_repository;
mod posted_item_repository;
mod review_repository;
mod user_repository;
mod wishlist_repository;

pub use catalog_repository::{CatalogRepository, CatalogStore, TxCatalogRepository};
pub use collection_repository::{
    CollectionRepository, CollectionStore, RequestFilter, RequestScope, TxCollectionRepository,
};
pub use notification_repository::{
    NotificationRepository, NotificationStore, TxNotificationRepository,
};
pub use posted_item_repository::{PostedItemRepository, PostedItemStore, TxPostedItemRepository};
pub use review_repository::{ReviewRepository, ReviewStore, TxReviewRepository};
pub use user_repository::{TxUserRepository, UserRepository, UserStore};
pub use wishlist_repository::{TxWishlistRepository, WishlistRepository, WishlistStore};

#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
#[cfg(test)]
pub use posted_item_repository::MockPostedItemRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use wishlist_repository::MockWishlistRepository;
