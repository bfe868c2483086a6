//! SeaORM entity for the `users` table.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: String,
    #[sea_orm(column_type = "Decimal(Some((4, 2)))")]
    pub rating: Decimal,
    pub total_collections: i64,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub total_earnings: Decimal,
    pub total_recycled_items: i64,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub total_recycled_value: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::posted_item::Entity")]
    PostedItems,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::posted_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostedItems.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            password_hash: m.password_hash,
            role: crate::domain::UserRole::from(m.role.as_str()),
            rating: m.rating,
            total_collections: m.total_collections,
            total_earnings: m.total_earnings,
            total_recycled_items: m.total_recycled_items,
            total_recycled_value: m.total_recycled_value,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
