//! Posted-item ledger: user-submitted recyclables awaiting collection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::catalog::ItemCategory;
use super::collection::CollectionStatus;

/// Posted item domain entity.
///
/// Shares the request status vocabulary; the status starts at Pending
/// because the originating collection request is created in the same
/// transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub category: ItemCategory,
    pub quantity: Decimal,
    pub unit: String,
    pub condition: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub estimated_value: Decimal,
    pub status: CollectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Posted-item submission payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePostedItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    #[schema(example = "Newspaper bundle")]
    pub item_name: String,
    pub category: ItemCategory,
    #[schema(example = 5)]
    pub quantity: Decimal,
    #[serde(default = "default_unit")]
    #[schema(example = "Kg")]
    pub unit: String,
    pub condition: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub description: Option<String>,
    #[schema(example = 45)]
    pub estimated_value: Decimal,
}

fn default_unit() -> String {
    "Kg".to_string()
}

/// Posted-item update payload (only while the request is still Pending)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePostedItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub item_name: Option<String>,
    pub quantity: Option<Decimal>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Posted-item response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostedItemResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
    pub condition: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub estimated_value: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostedItem> for PostedItemResponse {
    fn from(item: PostedItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            item_name: item.item_name,
            category: item.category.to_string(),
            quantity: item.quantity,
            unit: item.unit,
            condition: item.condition,
            location: item.location,
            description: item.description,
            estimated_value: item.estimated_value,
            status: item.status.to_string(),
            created_at: item.created_at,
        }
    }
}
