//! User entity for identity and login.
//!
//! # Invariants
//! - Usernames are unique and case-sensitive; uniqueness is enforced by the
//!   remote store, not locally.
//! - Credentials are stored as a salted one-way hash (PHC string), never as
//!   the plaintext secret.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caja_core::{Entity, UserId};

/// Role a user plays at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Supervisor,
    Cashier,
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Supervisor => write!(f, "supervisor"),
            UserRole::Cashier => write!(f, "cashier"),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    /// Argon2id hash of the user's password, PHC string format.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Input for creating a user.
///
/// The directory mints the id and stamps the creation time; callers supply
/// everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub password_hash: String,
}
