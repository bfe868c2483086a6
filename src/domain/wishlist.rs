//! Wishlist: a user's saved subset of the catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::catalog::RecyclingItem;

/// Wishlist entry domain entity.
///
/// Unique per (user, recycling item) while active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recycling_item_id: Uuid,
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wishlist add payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddWishlistItem {
    pub recycling_item_id: Uuid,
    #[schema(example = 2)]
    pub quantity: Decimal,
    pub notes: Option<String>,
}

/// Wishlist update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateWishlistItem {
    pub quantity: Option<Decimal>,
    pub notes: Option<String>,
}

/// Wishlist entry response joined with its catalog data
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WishlistItemResponse {
    pub id: Uuid,
    pub recycling_item_id: Uuid,
    pub item_name: String,
    pub category: String,
    pub price_display: String,
    pub price_per_unit: Decimal,
    pub unit: String,
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WishlistItemResponse {
    pub fn from_parts(entry: WishlistItem, item: &RecyclingItem) -> Self {
        Self {
            id: entry.id,
            recycling_item_id: entry.recycling_item_id,
            item_name: item.name.clone(),
            category: item.category.to_string(),
            price_display: item.price_display.clone(),
            price_per_unit: item.price_per_unit,
            unit: item.unit.clone(),
            quantity: entry.quantity,
            notes: entry.notes,
            created_at: entry.created_at,
        }
    }
}
