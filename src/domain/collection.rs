//! Collection-request aggregate: the pickup workflow from creation
//! through payment settlement.
//!
//! Status changes go through [`CollectionRequest::transition_to`], which
//! consults an explicit transition table. Terminal states have no
//! outgoing edges. Every transition appends exactly one entry to the
//! append-only status history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// Lifecycle states of a collection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CollectionStatus {
    Pending,
    Accepted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

impl CollectionStatus {
    /// Legal outgoing edges for each state.
    ///
    /// Completed, Rejected and Cancelled are terminal.
    pub fn allowed_transitions(&self) -> &'static [CollectionStatus] {
        use CollectionStatus::*;
        match self {
            Pending => &[Accepted, Rejected, Cancelled],
            Accepted => &[InProgress, Cancelled],
            InProgress => &[Completed],
            Completed | Rejected | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: CollectionStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionStatus::Pending => "Pending",
            CollectionStatus::Accepted => "Accepted",
            CollectionStatus::InProgress => "In Progress",
            CollectionStatus::Completed => "Completed",
            CollectionStatus::Rejected => "Rejected",
            CollectionStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(CollectionStatus::Pending),
            "Accepted" => Some(CollectionStatus::Accepted),
            "In Progress" => Some(CollectionStatus::InProgress),
            "Completed" => Some(CollectionStatus::Completed),
            "Rejected" => Some(CollectionStatus::Rejected),
            "Cancelled" => Some(CollectionStatus::Cancelled),
            _ => None,
        }
    }

    /// Message recorded in the status history when the caller gives none.
    pub fn default_message(&self) -> &'static str {
        match self {
            CollectionStatus::Pending => "Collection request created",
            CollectionStatus::Accepted => "Request accepted by collector",
            CollectionStatus::InProgress => "Collection is in progress",
            CollectionStatus::Completed => "Collection completed",
            CollectionStatus::Rejected => "Request rejected",
            CollectionStatus::Cancelled => "Request cancelled",
        }
    }
}

impl std::fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the request was originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    UserPosted,
    BrowsedItems,
    Scheduled,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::UserPosted => "user_posted",
            RequestType::BrowsedItems => "browsed_items",
            RequestType::Scheduled => "scheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user_posted" => Some(RequestType::UserPosted),
            "browsed_items" => Some(RequestType::BrowsedItems),
            "scheduled" => Some(RequestType::Scheduled),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment settlement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(PaymentStatus::Pending),
            "Paid" => Some(PaymentStatus::Paid),
            "Failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the append-only status log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusHistoryEntry {
    pub status: CollectionStatus,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Display name of the actor who made the change
    pub changed_by: String,
}

/// Point-in-time copy of collector identity taken when a request is
/// accepted. Distinct from the live collector FK; never rehydrated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectorSnapshot {
    pub collector_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub rating: Decimal,
}

/// Collection-request aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_type: RequestType,
    pub status: CollectionStatus,
    pub total_estimated_value: Decimal,
    /// Set only on completion
    pub actual_value: Option<Decimal>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub collector: Option<CollectorSnapshot>,
    pub pickup_location: Option<String>,
    pub estimated_collection_date: Option<DateTime<Utc>>,
    pub actual_collection_date: Option<DateTime<Utc>>,
    pub collection_notes: Option<String>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub request_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionRequest {
    /// Build a fresh Pending request with its initial history entry.
    pub fn new(
        user_id: Uuid,
        request_type: RequestType,
        total_estimated_value: Decimal,
        pickup_location: Option<String>,
        changed_by: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            request_type,
            status: CollectionStatus::Pending,
            total_estimated_value,
            actual_value: None,
            payment_status: PaymentStatus::Pending,
            payment_amount: None,
            payment_date: None,
            collector: None,
            pickup_location,
            estimated_collection_date: None,
            actual_collection_date: None,
            collection_notes: None,
            status_history: vec![StatusHistoryEntry {
                status: CollectionStatus::Pending,
                timestamp: now,
                message: CollectionStatus::Pending.default_message().to_string(),
                changed_by: changed_by.to_string(),
            }],
            request_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, appending a history entry.
    ///
    /// Rejects any edge not present in the transition table; terminal
    /// states never transition further.
    pub fn transition_to(
        &mut self,
        next: CollectionStatus,
        message: Option<String>,
        changed_by: &str,
    ) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(
                self.status.as_str(),
                next.as_str(),
            ));
        }

        let now = Utc::now();
        self.status = next;
        self.updated_at = now;
        self.status_history.push(StatusHistoryEntry {
            status: next,
            timestamp: now,
            message: message.unwrap_or_else(|| next.default_message().to_string()),
            changed_by: changed_by.to_string(),
        });

        if next == CollectionStatus::Completed {
            self.actual_collection_date = Some(now);
        }

        Ok(())
    }

    /// Accept the request, snapshotting the collector for display.
    pub fn accept(
        &mut self,
        collector: CollectorSnapshot,
        estimated_collection_date: Option<DateTime<Utc>>,
        message: Option<String>,
        changed_by: &str,
    ) -> AppResult<()> {
        self.transition_to(CollectionStatus::Accepted, message, changed_by)?;
        self.collector = Some(collector);
        self.estimated_collection_date = estimated_collection_date;
        Ok(())
    }

    /// Settle payment as part of completion.
    ///
    /// Must be called after a successful transition to Completed.
    pub fn settle_payment(&mut self, actual_value: Decimal, notes: Option<String>) {
        let now = Utc::now();
        self.actual_value = Some(actual_value);
        self.payment_status = PaymentStatus::Paid;
        self.payment_amount = Some(actual_value);
        self.payment_date = Some(now);
        if notes.is_some() {
            self.collection_notes = notes;
        }
        self.updated_at = now;
    }

    /// The last history entry, if any. Its status always matches the
    /// request's current status.
    pub fn last_history_entry(&self) -> Option<&StatusHistoryEntry> {
        self.status_history.last()
    }
}

/// One line item of a request, sourced from exactly one of a posted
/// item or a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRequestItem {
    pub id: Uuid,
    pub collection_request_id: Uuid,
    pub posted_item_id: Option<Uuid>,
    pub recycling_item_id: Option<Uuid>,
    /// Denormalized for display
    pub item_name: String,
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    /// quantity x price_per_unit, computed at creation
    pub estimated_value: Decimal,
    /// Set at completion
    pub actual_value: Option<Decimal>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

/// Line-item estimate: quantity x price_per_unit.
pub fn line_estimate(quantity: Decimal, price_per_unit: Decimal) -> Decimal {
    quantity * price_per_unit
}

impl CollectionRequestItem {
    /// Line item sourced from a user-posted item.
    pub fn for_posted_item(
        request_id: Uuid,
        posted_item_id: Uuid,
        item_name: String,
        quantity: Decimal,
        price_per_unit: Decimal,
        condition: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            collection_request_id: request_id,
            posted_item_id: Some(posted_item_id),
            recycling_item_id: None,
            item_name,
            quantity,
            price_per_unit,
            estimated_value: line_estimate(quantity, price_per_unit),
            actual_value: None,
            condition,
            notes: None,
        }
    }

    /// Line item sourced from a catalog entry.
    pub fn for_catalog_item(
        request_id: Uuid,
        recycling_item_id: Uuid,
        item_name: String,
        quantity: Decimal,
        price_per_unit: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            collection_request_id: request_id,
            posted_item_id: None,
            recycling_item_id: Some(recycling_item_id),
            item_name,
            quantity,
            price_per_unit,
            estimated_value: line_estimate(quantity, price_per_unit),
            actual_value: None,
            condition: None,
            notes: None,
        }
    }
}

// =============================================================================
// Request/response DTOs
// =============================================================================

/// Payload for converting wishlist entries into a batch request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFromWishlist {
    /// Wishlist entry ids to convert; all must belong to the caller
    #[validate(length(min = 1, message = "At least one wishlist item is required"))]
    pub wishlist_item_ids: Vec<Uuid>,
    pub pickup_location: Option<String>,
}

/// Status update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status (e.g. "Accepted", "In Progress")
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "Accepted")]
    pub status: String,
    pub notes: Option<String>,
    pub estimated_collection_date: Option<DateTime<Utc>>,
}

/// Per-line-item actuals supplied at completion
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompleteItemInput {
    pub id: Uuid,
    pub actual_value: Option<Decimal>,
    pub notes: Option<String>,
}

/// Completion payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CompleteRequest {
    #[serde(default)]
    pub items: Vec<CompleteItemInput>,
    pub actual_value: Decimal,
    pub collection_notes: Option<String>,
}

/// Cancellation payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Line item response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionRequestItemResponse {
    pub id: Uuid,
    pub posted_item_id: Option<Uuid>,
    pub recycling_item_id: Option<Uuid>,
    pub item_name: String,
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub estimated_value: Decimal,
    pub actual_value: Option<Decimal>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

impl From<CollectionRequestItem> for CollectionRequestItemResponse {
    fn from(item: CollectionRequestItem) -> Self {
        Self {
            id: item.id,
            posted_item_id: item.posted_item_id,
            recycling_item_id: item.recycling_item_id,
            item_name: item.item_name,
            quantity: item.quantity,
            price_per_unit: item.price_per_unit,
            estimated_value: item.estimated_value,
            actual_value: item.actual_value,
            condition: item.condition,
            notes: item.notes,
        }
    }
}

/// Full request response including line items and history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionRequestResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_type: String,
    pub status: String,
    pub total_estimated_value: Decimal,
    pub actual_value: Option<Decimal>,
    pub payment_status: String,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub collector: Option<CollectorSnapshot>,
    pub pickup_location: Option<String>,
    pub estimated_collection_date: Option<DateTime<Utc>>,
    pub actual_collection_date: Option<DateTime<Utc>>,
    pub collection_notes: Option<String>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub request_date: DateTime<Utc>,
    pub items: Vec<CollectionRequestItemResponse>,
}

impl CollectionRequestResponse {
    pub fn from_parts(request: CollectionRequest, items: Vec<CollectionRequestItem>) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            request_type: request.request_type.to_string(),
            status: request.status.to_string(),
            total_estimated_value: request.total_estimated_value,
            actual_value: request.actual_value,
            payment_status: request.payment_status.to_string(),
            payment_amount: request.payment_amount,
            payment_date: request.payment_date,
            collector: request.collector,
            pickup_location: request.pickup_location,
            estimated_collection_date: request.estimated_collection_date,
            actual_collection_date: request.actual_collection_date,
            collection_notes: request.collection_notes,
            status_history: request.status_history,
            request_date: request.request_date,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-status counters for the stats endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestStats {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub rejected: u64,
    pub cancelled: u64,
    pub total_estimated_value: Decimal,
    pub total_paid: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> CollectionRequest {
        CollectionRequest::new(
            Uuid::new_v4(),
            RequestType::UserPosted,
            dec!(45),
            None,
            "System",
        )
    }

    #[test]
    fn test_new_request_starts_pending_with_one_history_entry() {
        let req = request();
        assert_eq!(req.status, CollectionStatus::Pending);
        assert_eq!(req.status_history.len(), 1);
        assert_eq!(req.status_history[0].status, CollectionStatus::Pending);
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut req = request();
        req.transition_to(CollectionStatus::Accepted, None, "Sara").unwrap();
        req.transition_to(CollectionStatus::InProgress, None, "Sara").unwrap();
        req.transition_to(CollectionStatus::Completed, None, "Sara").unwrap();

        assert_eq!(req.status, CollectionStatus::Completed);
        assert_eq!(req.status_history.len(), 4);
        assert!(req.actual_collection_date.is_some());
    }

    #[test]
    fn test_each_transition_appends_exactly_one_entry() {
        let mut req = request();
        let before = req.status_history.len();
        req.transition_to(CollectionStatus::Accepted, None, "Sara").unwrap();
        assert_eq!(req.status_history.len(), before + 1);
        assert_eq!(
            req.last_history_entry().unwrap().status,
            req.status
        );
    }

    #[test]
    fn test_terminal_states_reject_all_transitions() {
        for terminal in [
            CollectionStatus::Completed,
            CollectionStatus::Rejected,
            CollectionStatus::Cancelled,
        ] {
            assert!(terminal.is_terminal());
            for next in [
                CollectionStatus::Pending,
                CollectionStatus::Accepted,
                CollectionStatus::InProgress,
                CollectionStatus::Completed,
                CollectionStatus::Rejected,
                CollectionStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_illegal_edges_are_rejected() {
        let mut req = request();
        // Pending cannot jump straight to In Progress or Completed
        assert!(req
            .transition_to(CollectionStatus::InProgress, None, "Sara")
            .is_err());
        assert!(req
            .transition_to(CollectionStatus::Completed, None, "Sara")
            .is_err());
        // Failed transition must not touch the history
        assert_eq!(req.status_history.len(), 1);
        assert_eq!(req.status, CollectionStatus::Pending);
    }

    #[test]
    fn test_cancel_only_before_work_starts() {
        let mut req = request();
        assert!(CollectionStatus::Pending.can_transition_to(CollectionStatus::Cancelled));
        req.transition_to(CollectionStatus::Accepted, None, "Sara").unwrap();
        assert!(CollectionStatus::Accepted.can_transition_to(CollectionStatus::Cancelled));
        req.transition_to(CollectionStatus::InProgress, None, "Sara").unwrap();
        assert!(!CollectionStatus::InProgress.can_transition_to(CollectionStatus::Cancelled));
    }

    #[test]
    fn test_accept_snapshots_collector() {
        let mut req = request();
        let collector_id = Uuid::new_v4();
        req.accept(
            CollectorSnapshot {
                collector_id,
                name: "Sara".into(),
                phone: Some("0771234567".into()),
                rating: dec!(4.5),
            },
            None,
            None,
            "Sara",
        )
        .unwrap();

        let snap = req.collector.as_ref().unwrap();
        assert_eq!(snap.collector_id, collector_id);
        assert_eq!(snap.rating, dec!(4.5));
        assert_eq!(req.status, CollectionStatus::Accepted);
    }

    #[test]
    fn test_settle_payment() {
        let mut req = request();
        req.transition_to(CollectionStatus::Accepted, None, "Sara").unwrap();
        req.transition_to(CollectionStatus::InProgress, None, "Sara").unwrap();
        req.transition_to(CollectionStatus::Completed, None, "Sara").unwrap();
        req.settle_payment(dec!(120), Some("weighed on site".into()));

        assert_eq!(req.payment_status, PaymentStatus::Paid);
        assert_eq!(req.payment_amount, Some(dec!(120)));
        assert_eq!(req.actual_value, Some(dec!(120)));
        assert!(req.payment_date.is_some());
    }

    #[test]
    fn test_default_history_message_is_templated() {
        let mut req = request();
        req.transition_to(CollectionStatus::Accepted, None, "Sara").unwrap();
        assert_eq!(
            req.last_history_entry().unwrap().message,
            "Request accepted by collector"
        );

        req.transition_to(
            CollectionStatus::InProgress,
            Some("driver en route".into()),
            "Sara",
        )
        .unwrap();
        assert_eq!(req.last_history_entry().unwrap().message, "driver en route");
    }

    #[test]
    fn test_line_estimate() {
        assert_eq!(line_estimate(dec!(5), dec!(9)), dec!(45));
        let item = CollectionRequestItem::for_catalog_item(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Newspaper".into(),
            dec!(2.5),
            dec!(10),
        );
        assert_eq!(item.estimated_value, dec!(25.0));
        assert!(item.posted_item_id.is_none());
        assert!(item.recycling_item_id.is_some());
    }

    #[test]
    fn test_posted_item_fan_out_values_agree() {
        // Posting {quantity: 5, estimatedValue: 45} spawns a Pending
        // request whose total and single line item both carry 45
        let user = Uuid::new_v4();
        let request = CollectionRequest::new(
            user,
            RequestType::UserPosted,
            dec!(45),
            Some("12 Temple Road".into()),
            "Nimal",
        );
        let item = CollectionRequestItem::for_posted_item(
            request.id,
            Uuid::new_v4(),
            "Newspaper bundle".into(),
            dec!(5),
            dec!(45) / dec!(5),
            None,
        );

        assert_eq!(request.status, CollectionStatus::Pending);
        assert_eq!(request.total_estimated_value, dec!(45));
        assert_eq!(item.estimated_value, dec!(45));
        assert_eq!(item.collection_request_id, request.id);
    }

    #[test]
    fn test_status_string_round_trip() {
        for s in [
            CollectionStatus::Pending,
            CollectionStatus::Accepted,
            CollectionStatus::InProgress,
            CollectionStatus::Completed,
            CollectionStatus::Rejected,
            CollectionStatus::Cancelled,
        ] {
            assert_eq!(CollectionStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(CollectionStatus::parse("Unknown"), None);
    }
}
