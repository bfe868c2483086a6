//! SeaORM entity for the `collection_requests` table.
//!
//! `status_history` is stored as a JSONB array of
//! `{status, timestamp, message, changed_by}` entries. The collector
//! snapshot columns are point-in-time copies taken at accept time.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::domain::{
    CollectionRequest, CollectionStatus, CollectorSnapshot, PaymentStatus, RequestType,
    StatusHistoryEntry,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "collection_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_type: String,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub total_estimated_value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub actual_value: Option<Decimal>,
    pub payment_status: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<DateTimeUtc>,
    pub collector_id: Option<Uuid>,
    pub collector_name: Option<String>,
    pub collector_phone: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((4, 2)))", nullable)]
    pub collector_rating: Option<Decimal>,
    pub pickup_location: Option<String>,
    pub estimated_collection_date: Option<DateTimeUtc>,
    pub actual_collection_date: Option<DateTimeUtc>,
    pub collection_notes: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub status_history: Json,
    pub request_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::collection_request_item::Entity")]
    Items,
}

impl Related<super::collection_request_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CollectionRequest {
    fn from(m: Model) -> Self {
        let collector = m.collector_id.map(|collector_id| CollectorSnapshot {
            collector_id,
            name: m.collector_name.clone().unwrap_or_default(),
            phone: m.collector_phone.clone(),
            rating: m.collector_rating.unwrap_or_default(),
        });
        let status_history: Vec<StatusHistoryEntry> =
            serde_json::from_value(m.status_history.clone()).unwrap_or_default();

        Self {
            id: m.id,
            user_id: m.user_id,
            request_type: RequestType::parse(&m.request_type).unwrap_or(RequestType::UserPosted),
            status: CollectionStatus::parse(&m.status).unwrap_or(CollectionStatus::Pending),
            total_estimated_value: m.total_estimated_value,
            actual_value: m.actual_value,
            payment_status: PaymentStatus::parse(&m.payment_status)
                .unwrap_or(PaymentStatus::Pending),
            payment_amount: m.payment_amount,
            payment_date: m.payment_date,
            collector,
            pickup_location: m.pickup_location,
            estimated_collection_date: m.estimated_collection_date,
            actual_collection_date: m.actual_collection_date,
            collection_notes: m.collection_notes,
            status_history,
            request_date: m.request_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
