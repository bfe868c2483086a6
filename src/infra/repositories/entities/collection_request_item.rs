//! SeaORM entity for the `collection_request_items` table.
//!
//! Each row references exactly one of a posted item or a catalog entry.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "collection_request_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub collection_request_id: Uuid,
    pub posted_item_id: Option<Uuid>,
    pub recycling_item_id: Option<Uuid>,
    pub item_name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price_per_unit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub estimated_value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub actual_value: Option<Decimal>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::collection_request::Entity",
        from = "Column::CollectionRequestId",
        to = "super::collection_request::Column::Id"
    )]
    CollectionRequest,
}

impl Related<super::collection_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::CollectionRequestItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            collection_request_id: m.collection_request_id,
            posted_item_id: m.posted_item_id,
            recycling_item_id: m.recycling_item_id,
            item_name: m.item_name,
            quantity: m.quantity,
            price_per_unit: m.price_per_unit,
            estimated_value: m.estimated_value,
            actual_value: m.actual_value,
            condition: m.condition,
            notes: m.notes,
        }
    }
}
