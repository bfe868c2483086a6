//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching and rate-limit counters (Redis)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    CatalogRepository, CollectionRepository, NotificationRepository, PostedItemRepository,
    RequestFilter, RequestScope, ReviewRepository, UserRepository, WishlistRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
