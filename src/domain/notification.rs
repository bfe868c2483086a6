//! Notifications created as side effects of lifecycle transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::collection::CollectionStatus;

/// Notification categories (closed enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Status,
    Payment,
    Review,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Status => "status",
            NotificationType::Payment => "payment",
            NotificationType::Review => "review",
            NotificationType::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "status" => Some(NotificationType::Status),
            "payment" => Some(NotificationType::Payment),
            "review" => Some(NotificationType::Review),
            "system" => Some(NotificationType::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification domain entity.
///
/// Immutable after creation apart from the `is_read`/`is_active` flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub is_active: bool,
    pub collection_request_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Notification for a request status change, targeted at the owner.
    pub fn for_status_change(
        user_id: Uuid,
        request_id: Uuid,
        status: CollectionStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: format!("Collection request {}", status.as_str().to_lowercase()),
            message: message.into(),
            notification_type: NotificationType::Status,
            is_read: false,
            is_active: true,
            collection_request_id: Some(request_id),
            review_id: None,
            created_at: Utc::now(),
        }
    }

    /// Payment notification emitted on completion.
    pub fn for_payment(user_id: Uuid, request_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: "Payment received".to_string(),
            message: message.into(),
            notification_type: NotificationType::Payment,
            is_read: false,
            is_active: true,
            collection_request_id: Some(request_id),
            review_id: None,
            created_at: Utc::now(),
        }
    }

    /// Notification to a collector about a new review.
    pub fn for_review(user_id: Uuid, review_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: "New review".to_string(),
            message: message.into(),
            notification_type: NotificationType::Review,
            is_read: false,
            is_active: true,
            collection_request_id: None,
            review_id: Some(review_id),
            created_at: Utc::now(),
        }
    }
}

/// Notification response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[schema(example = "payment")]
    pub notification_type: String,
    pub is_read: bool,
    pub collection_request_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            notification_type: n.notification_type.to_string(),
            is_read: n.is_read,
            collection_request_id: n.collection_request_id,
            review_id: n.review_id,
            created_at: n.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_notification_targets_request() {
        let user = Uuid::new_v4();
        let request = Uuid::new_v4();
        let n = Notification::for_status_change(
            user,
            request,
            CollectionStatus::Accepted,
            "A collector accepted your request",
        );
        assert_eq!(n.user_id, user);
        assert_eq!(n.collection_request_id, Some(request));
        assert_eq!(n.notification_type, NotificationType::Status);
        assert!(!n.is_read);
    }

    #[test]
    fn test_type_round_trip() {
        for t in [
            NotificationType::Status,
            NotificationType::Payment,
            NotificationType::Review,
            NotificationType::System,
        ] {
            assert_eq!(NotificationType::parse(t.as_str()), Some(t));
        }
    }
}
