//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages transaction lifecycle
//! (begin, commit, rollback). The multi-entity lifecycle flows — the
//! posted-item fan-out, request completion with its counter credits,
//! and review mutations with their rating recompute — all run through
//! [`UnitOfWork::transaction`] so partial failure never leaves the
//! aggregate half-written.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    CatalogRepository, CatalogStore, CollectionRepository, CollectionStore,
    NotificationRepository, NotificationStore, PostedItemRepository, PostedItemStore,
    ReviewRepository, ReviewStore, TxCatalogRepository, TxCollectionRepository,
    TxNotificationRepository, TxPostedItemRepository, TxReviewRepository, TxUserRepository,
    TxWishlistRepository, UserRepository, UserStore, WishlistRepository, WishlistStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the transaction methods are generic, so this trait is not
/// mockable directly. For testing, mock at the repository level or use
/// integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn catalog(&self) -> Arc<dyn CatalogRepository>;
    fn posted_items(&self) -> Arc<dyn PostedItemRepository>;
    fn collections(&self) -> Arc<dyn CollectionRepository>;
    fn reviews(&self) -> Arc<dyn ReviewRepository>;
    fn notifications(&self) -> Arc<dyn NotificationRepository>;
    fn wishlist(&self) -> Arc<dyn WishlistRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    /// Uses ReadCommitted isolation by default.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a serializable transaction.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access within a transaction.
///
/// Every repository handed out here runs against the same borrowed
/// transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    pub fn catalog(&self) -> TxCatalogRepository<'_> {
        TxCatalogRepository::new(self.txn)
    }

    pub fn posted_items(&self) -> TxPostedItemRepository<'_> {
        TxPostedItemRepository::new(self.txn)
    }

    pub fn collections(&self) -> TxCollectionRepository<'_> {
        TxCollectionRepository::new(self.txn)
    }

    pub fn reviews(&self) -> TxReviewRepository<'_> {
        TxReviewRepository::new(self.txn)
    }

    pub fn notifications(&self) -> TxNotificationRepository<'_> {
        TxNotificationRepository::new(self.txn)
    }

    pub fn wishlist(&self) -> TxWishlistRepository<'_> {
        TxWishlistRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    catalog: Arc<CatalogStore>,
    posted_items: Arc<PostedItemStore>,
    collections: Arc<CollectionStore>,
    reviews: Arc<ReviewStore>,
    notifications: Arc<NotificationStore>,
    wishlist: Arc<WishlistStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            catalog: Arc::new(CatalogStore::new(db.clone())),
            posted_items: Arc::new(PostedItemStore::new(db.clone())),
            collections: Arc::new(CollectionStore::new(db.clone())),
            reviews: Arc::new(ReviewStore::new(db.clone())),
            notifications: Arc::new(NotificationStore::new(db.clone())),
            wishlist: Arc::new(WishlistStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    fn posted_items(&self) -> Arc<dyn PostedItemRepository> {
        self.posted_items.clone()
    }

    fn collections(&self) -> Arc<dyn CollectionRepository> {
        self.collections.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    fn wishlist(&self) -> Arc<dyn WishlistRepository> {
        self.wishlist.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}
