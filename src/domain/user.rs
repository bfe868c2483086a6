//! User domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_COLLECTOR, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Collector,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role may accept and fulfil collection requests
    pub fn is_collector(&self) -> bool {
        matches!(self, UserRole::Collector)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_COLLECTOR => UserRole::Collector,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Collector => ROLE_COLLECTOR,
            UserRole::User => ROLE_USER,
        };
        write!(f, "{}", s)
    }
}

/// User domain entity.
///
/// `rating`, `total_collections` and `total_earnings` are derived fields:
/// the review aggregator and the completion flow are the only writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    /// Mean rating over the collector's active reviews (0 when none)
    pub rating: Decimal,
    pub total_collections: i64,
    pub total_earnings: Decimal,
    pub total_recycled_items: i64,
    pub total_recycled_value: Decimal,
    /// Accounts are soft-deactivated, never hard-deleted
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_collector(&self) -> bool {
        self.role.is_collector()
    }
}

/// Profile update payload (self-service)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Admin user update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    /// New role (one of "user", "collector", "admin")
    #[schema(example = "collector")]
    pub role: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// User role
    #[schema(example = "collector")]
    pub role: String,
    pub rating: Decimal,
    pub total_collections: i64,
    pub total_earnings: Decimal,
    pub total_recycled_items: i64,
    pub total_recycled_value: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.to_string(),
            rating: user.rating,
            total_collections: user.total_collections,
            total_earnings: user.total_earnings,
            total_recycled_items: user.total_recycled_items,
            total_recycled_value: user.total_recycled_value,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::User, UserRole::Collector, UserRole::Admin] {
            assert_eq!(UserRole::from(role.to_string().as_str()), role);
        }
    }

    #[test]
    fn test_unknown_role_defaults_to_user() {
        assert_eq!(UserRole::from("weird"), UserRole::User);
    }
}
