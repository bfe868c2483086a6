//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{ADMIN_PAGE_SIZE, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, reusable across all list endpoints.
///
/// `page` is 1-indexed; `limit` is the number of items per page.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-indexed page number, as expected by the ORM paginator.
    pub fn zero_indexed_page(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Admin listing endpoints default to a larger page size when the
    /// client did not ask for one.
    pub fn for_admin(mut self) -> Self {
        if self.limit == DEFAULT_PAGE_SIZE {
            self.limit = ADMIN_PAGE_SIZE;
        }
        self
    }

    /// Stable cache-key fragment for this page selection.
    pub fn cache_fragment(&self) -> String {
        format!("p{}:l{}", self.page, self.limit())
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata, serialized with the field names the front end
/// expects (`currentPage`, `totalPages`, `totalItems`, `itemsPerPage`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

impl PaginationMeta {
    /// Build metadata from the requested page and the total row count.
    pub fn new(params: &PaginationParams, total_items: u64) -> Self {
        let items_per_page = params.limit();
        let total_pages = if items_per_page > 0 {
            total_items.div_ceil(items_per_page)
        } else {
            0
        };

        Self {
            current_page: params.page,
            total_pages,
            total_items,
            items_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_offset_is_zero_based() {
        let params = PaginationParams { page: 3, limit: 10 };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.zero_indexed_page(), 2);
    }

    #[test]
    fn test_limit_is_capped() {
        let params = PaginationParams { page: 1, limit: 5000 };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let params = PaginationParams { page: 1, limit: 10 };
        let meta = PaginationMeta::new(&params, 41);
        assert_eq!(meta.total_pages, 5);
        assert_eq!(meta.total_items, 41);
        assert_eq!(meta.items_per_page, 10);
    }

    #[test]
    fn test_admin_default_page_size() {
        let params = PaginationParams::default().for_admin();
        assert_eq!(params.limit(), ADMIN_PAGE_SIZE);

        // An explicit client choice wins over the admin default
        let explicit = PaginationParams { page: 1, limit: 5 }.for_admin();
        assert_eq!(explicit.limit(), 5);
    }
}
