//! SeaORM entity for the `recycling_items` catalog table.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recycling_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub price_display: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price_per_unit: Decimal,
    pub unit: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItems,
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::RecyclingItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            item_id: m.item_id,
            name: m.name,
            category: crate::domain::ItemCategory::parse(&m.category)
                .unwrap_or(crate::domain::ItemCategory::Paper),
            price_display: m.price_display,
            price_per_unit: m.price_per_unit,
            unit: m.unit,
            description: m.description,
            is_active: m.is_active,
            sort_order: m.sort_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
