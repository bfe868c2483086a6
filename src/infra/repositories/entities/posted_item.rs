//! SeaORM entity for the `posted_items` table.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posted_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_name: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    pub unit: String,
    pub condition: Option<String>,
    pub location: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub estimated_value: Decimal,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::PostedItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            item_name: m.item_name,
            category: crate::domain::ItemCategory::parse(&m.category)
                .unwrap_or(crate::domain::ItemCategory::Paper),
            quantity: m.quantity,
            unit: m.unit,
            condition: m.condition,
            location: m.location,
            description: m.description,
            estimated_value: m.estimated_value,
            status: crate::domain::CollectionStatus::parse(&m.status)
                .unwrap_or(crate::domain::CollectionStatus::Pending),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
