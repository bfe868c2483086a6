//! Recycling-item catalog entities.
//!
//! The catalog is admin-curated and publicly browsable. `price_display`
//! is free text for the storefront ("Est. Rs.5/Kg"); `price_per_unit`
//! is the numeric rate used for line-item math.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Catalog categories (closed enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ItemCategory {
    Paper,
    Plastic,
    Metal,
    Glass,
    Electronics,
    Organic,
}

impl ItemCategory {
    pub const ALL: &'static [ItemCategory] = &[
        ItemCategory::Paper,
        ItemCategory::Plastic,
        ItemCategory::Metal,
        ItemCategory::Glass,
        ItemCategory::Electronics,
        ItemCategory::Organic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Paper => "Paper",
            ItemCategory::Plastic => "Plastic",
            ItemCategory::Metal => "Metal",
            ItemCategory::Glass => "Glass",
            ItemCategory::Electronics => "Electronics",
            ItemCategory::Organic => "Organic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog entry domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecyclingItem {
    pub id: Uuid,
    /// Business key shown to clients (e.g. "PAPER-001")
    pub item_id: String,
    pub name: String,
    pub category: ItemCategory,
    /// Storefront price text, not used for computation
    pub price_display: String,
    /// Numeric rate per unit, used for estimates
    pub price_per_unit: Decimal,
    pub unit: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin catalog creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRecyclingItem {
    #[validate(length(min = 1, message = "Item id is required"))]
    #[schema(example = "PAPER-001")]
    pub item_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Newspaper")]
    pub name: String,
    #[schema(example = "Paper")]
    pub category: ItemCategory,
    #[validate(length(min = 1, message = "Price display is required"))]
    #[schema(example = "Est. Rs.5/Kg")]
    pub price_display: String,
    pub price_per_unit: Decimal,
    #[schema(example = "Kg")]
    pub unit: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Admin catalog update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRecyclingItem {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
    pub price_display: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// Catalog entry response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecyclingItemResponse {
    pub id: Uuid,
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub price_display: String,
    pub price_per_unit: Decimal,
    pub unit: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<RecyclingItem> for RecyclingItemResponse {
    fn from(item: RecyclingItem) -> Self {
        Self {
            id: item.id,
            item_id: item.item_id,
            name: item.name,
            category: item.category.to_string(),
            price_display: item.price_display,
            price_per_unit: item.price_per_unit,
            unit: item.unit,
            description: item.description,
            is_active: item.is_active,
            sort_order: item.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_round_trip() {
        for c in ItemCategory::ALL {
            assert_eq!(ItemCategory::parse(c.as_str()), Some(*c));
        }
        assert_eq!(ItemCategory::parse("Vibranium"), None);
    }
}
