//! The remote data gateway: opaque async CRUD over the Users collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use caja_core::UserId;
use caja_users::{User, UserRole};

/// Wire representation of a user row.
///
/// Field names follow the remote store's schema (`is_active`, `created_at`);
/// translation to the application's [`User`] happens only here, exhaustively,
/// so no field can be silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Translate an application user into its wire form.
    pub fn from_user(user: User) -> Self {
        // Destructure so a new field on either side breaks the build here.
        let User {
            id,
            username,
            email,
            role,
            active,
            password_hash,
            created_at,
        } = user;
        Self {
            id,
            username,
            email,
            role,
            is_active: active,
            password_hash,
            created_at,
        }
    }

    /// Translate a wire row into the application representation.
    pub fn into_user(self) -> User {
        let UserRecord {
            id,
            username,
            email,
            role,
            is_active,
            password_hash,
            created_at,
        } = self;
        User {
            id,
            username,
            email,
            role,
            active: is_active,
            password_hash,
            created_at,
        }
    }
}

/// Equality filter for `find_one`.
///
/// Only populated fields participate in the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    /// Filter on username only (any active state).
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            is_active: None,
        }
    }

    /// Filter on username and `is_active = true` (the login lookup).
    pub fn active_by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            is_active: Some(true),
        }
    }

    pub fn matches(&self, record: &UserRecord) -> bool {
        if let Some(username) = &self.username {
            // Case-sensitive by contract.
            if record.username != *username {
                return false;
            }
        }
        if let Some(active) = self.is_active {
            if record.is_active != active {
                return false;
            }
        }
        true
    }
}

/// Store-level failure.
///
/// `NoRows` is distinguishable from every other failure so callers can treat
/// "legitimately found nothing" differently from a fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("no matching row")]
    NoRows,
    #[error("store error: {0}")]
    Store(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Async CRUD interface over the Users collection.
///
/// Implementations are remote-store adapters; the rest of the system never
/// sees their wire errors directly (the directory wraps them).
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// All rows, ordered by creation time descending.
    async fn list_all(&self) -> Result<Vec<UserRecord>, GatewayError>;

    /// Insert one row; returns the stored row.
    async fn insert_one(&self, record: UserRecord) -> Result<UserRecord, GatewayError>;

    /// Full-field update keyed by id; returns the stored row.
    /// Fails with [`GatewayError::NoRows`] when the id is unknown.
    async fn update_by_id(
        &self,
        id: UserId,
        record: UserRecord,
    ) -> Result<UserRecord, GatewayError>;

    /// Delete the row with this id. Deleting an unknown id is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), GatewayError>;

    /// Find exactly one row matching the equality filter.
    /// Fails with [`GatewayError::NoRows`] when zero rows match.
    async fn find_one(&self, filter: UserFilter) -> Result<UserRecord, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, active: bool) -> UserRecord {
        UserRecord {
            id: UserId::new(),
            username: username.to_string(),
            email: format!("{username}@empresa.com"),
            role: UserRole::Cashier,
            is_active: active,
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn translation_round_trips_every_field() {
        let wire = record("ana", true);
        let user = wire.clone().into_user();

        assert_eq!(user.username, wire.username);
        assert!(user.active);
        assert_eq!(user.created_at, wire.created_at);
        assert_eq!(UserRecord::from_user(user), wire);
    }

    #[test]
    fn wire_field_names_follow_store_schema() {
        let json = serde_json::to_value(record("ana", true)).unwrap();
        assert!(json.get("is_active").is_some());
        assert!(json.get("created_at").is_some());
        assert!(json.get("active").is_none());
    }

    #[test]
    fn filter_username_match_is_case_sensitive() {
        let row = record("Ana", true);
        assert!(UserFilter::by_username("Ana").matches(&row));
        assert!(!UserFilter::by_username("ana").matches(&row));
    }

    #[test]
    fn active_filter_excludes_suspended_rows() {
        let row = record("ana", false);
        assert!(!UserFilter::active_by_username("ana").matches(&row));
        assert!(UserFilter::by_username("ana").matches(&row));
    }
}
