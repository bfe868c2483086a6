//! SeaORM entity for the `wishlist_items` table.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub recycling_item_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recycling_item::Entity",
        from = "Column::RecyclingItemId",
        to = "super::recycling_item::Column::Id"
    )]
    RecyclingItem,
}

impl Related<super::recycling_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecyclingItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::WishlistItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            recycling_item_id: m.recycling_item_id,
            quantity: m.quantity,
            notes: m.notes,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
