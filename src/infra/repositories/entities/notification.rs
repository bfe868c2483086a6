//! SeaORM entity for the `notifications` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub is_active: bool,
    pub collection_request_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
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

impl From<Model> for crate::domain::Notification {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            message: m.message,
            notification_type: crate::domain::NotificationType::parse(&m.notification_type)
                .unwrap_or(crate::domain::NotificationType::System),
            is_read: m.is_read,
            is_active: m.is_active,
            collection_request_id: m.collection_request_id,
            review_id: m.review_id,
            created_at: m.created_at,
        }
    }
}
