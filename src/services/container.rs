//! Service container - centralized service access.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CatalogManager, CatalogService, CollectionManager,
    CollectionService, NotificationManager, NotificationService, PostedItemManager,
    PostedItemService, ReviewManager, ReviewService, UserManager, UserService, WishlistManager,
    WishlistService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Concrete service container wired against the shared Unit of Work.
pub struct Services {
    auth: Arc<dyn AuthService>,
    users: Arc<dyn UserService>,
    catalog: Arc<dyn CatalogService>,
    posted_items: Arc<dyn PostedItemService>,
    collections: Arc<dyn CollectionService>,
    reviews: Arc<dyn ReviewService>,
    notifications: Arc<dyn NotificationService>,
    wishlist: Arc<dyn WishlistService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            users: Arc::new(UserManager::new(uow.clone())),
            catalog: Arc::new(CatalogManager::new(uow.clone())),
            posted_items: Arc::new(PostedItemManager::new(uow.clone())),
            collections: Arc::new(CollectionManager::new(uow.clone())),
            reviews: Arc::new(ReviewManager::new(uow.clone())),
            notifications: Arc::new(NotificationManager::new(uow.clone())),
            wishlist: Arc::new(WishlistManager::new(uow)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    pub fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog.clone()
    }

    pub fn posted_items(&self) -> Arc<dyn PostedItemService> {
        self.posted_items.clone()
    }

    pub fn collections(&self) -> Arc<dyn CollectionService> {
        self.collections.clone()
    }

    pub fn reviews(&self) -> Arc<dyn ReviewService> {
        self.reviews.clone()
    }

    pub fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notifications.clone()
    }

    pub fn wishlist(&self) -> Arc<dyn WishlistService> {
        self.wishlist.clone()
    }
}
