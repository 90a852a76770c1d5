//! The session/user directory: gateway wrapper + best-effort cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::time::timeout;

use caja_core::UserId;
use caja_users::{NewUser, User};

use crate::gateway::{GatewayError, UserFilter, UserGateway, UserRecord};

/// Default deadline for a single gateway call.
///
/// A stalled remote call must not leave callers (notably the auth flow)
/// waiting forever.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Directory-level error.
///
/// Deliberately opaque: the original gateway cause is logged, never carried,
/// so raw store errors cannot leak into the auth flow or the UI.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("could not load users")]
    List,
    #[error("could not create user")]
    Create,
    #[error("could not update user")]
    Update,
    #[error("could not delete user")]
    Delete,
    #[error("user lookup failed")]
    Lookup,
    #[error("directory call timed out")]
    Timeout,
}

/// Mediates all user CRUD and lookup.
///
/// Owns an in-memory mirror of the user collection. The mirror is best-effort
/// and may diverge from the remote store between calls; callers needing
/// freshness must call [`UserDirectory::list`].
pub struct UserDirectory {
    gateway: Arc<dyn UserGateway>,
    users: Vec<User>,
    loading: bool,
    last_error: Option<DirectoryError>,
    call_timeout: Duration,
}

impl UserDirectory {
    pub fn new(gateway: Arc<dyn UserGateway>) -> Self {
        Self::with_timeout(gateway, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_timeout(gateway: Arc<dyn UserGateway>, call_timeout: Duration) -> Self {
        Self {
            gateway,
            users: Vec::new(),
            loading: false,
            last_error: None,
            call_timeout,
        }
    }

    /// The cached mirror, ordered as the last successful `list` returned it.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<DirectoryError> {
        self.last_error
    }

    /// Fetch all users (creation time descending) and replace the cache.
    ///
    /// On failure the cache is left unchanged, the error indicator is set,
    /// and the loading flag returns to false on every path.
    pub async fn list(&mut self) -> Result<&[User], DirectoryError> {
        self.loading = true;
        let outcome = self
            .call("list", DirectoryError::List, self.gateway.list_all())
            .await;
        self.loading = false;

        match outcome {
            Ok(records) => {
                self.users = records.into_iter().map(UserRecord::into_user).collect();
                self.last_error = None;
                Ok(&self.users)
            }
            Err(err) => {
                self.last_error = Some(err);
                Err(err)
            }
        }
    }

    /// Create a user. The directory mints the identifier locally and stamps
    /// the creation time; the stored row is prepended to the cache.
    pub async fn add(&mut self, new_user: NewUser) -> Result<User, DirectoryError> {
        let NewUser {
            username,
            email,
            role,
            active,
            password_hash,
        } = new_user;

        let record = UserRecord {
            id: UserId::new(),
            username,
            email,
            role,
            is_active: active,
            password_hash,
            created_at: Utc::now(),
        };

        let stored = self
            .call("add", DirectoryError::Create, self.gateway.insert_one(record))
            .await?;
        let user = stored.into_user();
        self.users.insert(0, user.clone());
        Ok(user)
    }

    /// Full-field update keyed by id; replaces the matching cache entry.
    pub async fn update(&mut self, user: User) -> Result<User, DirectoryError> {
        let id = user.id;
        let stored = self
            .call(
                "update",
                DirectoryError::Update,
                self.gateway.update_by_id(id, UserRecord::from_user(user)),
            )
            .await?;
        let updated = stored.into_user();
        for slot in self.users.iter_mut() {
            if slot.id == id {
                *slot = updated.clone();
            }
        }
        Ok(updated)
    }

    /// Delete by id; removes the entry from the cache on success.
    pub async fn delete(&mut self, id: UserId) -> Result<(), DirectoryError> {
        self.call("delete", DirectoryError::Delete, self.gateway.delete_by_id(id))
            .await?;
        self.users.retain(|u| u.id != id);
        Ok(())
    }

    /// Look a user up by exact username.
    ///
    /// Returns `Ok(None)` when no row matches — a legitimate outcome, not an
    /// error. Gateway faults and timeouts surface as `Err`, so callers can
    /// tell "not found" from "lookup failed". The row is returned regardless
    /// of its active flag; rejecting inactive users is the caller's decision.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        let outcome = timeout(
            self.call_timeout,
            self.gateway.find_one(UserFilter::by_username(username)),
        )
        .await;

        match outcome {
            Err(_elapsed) => {
                tracing::error!(op = "find_by_username", "directory call timed out");
                Err(DirectoryError::Timeout)
            }
            Ok(Err(GatewayError::NoRows)) => Ok(None),
            Ok(Err(err)) => {
                tracing::error!(op = "find_by_username", cause = %err, "gateway failure");
                Err(DirectoryError::Lookup)
            }
            Ok(Ok(record)) => Ok(Some(record.into_user())),
        }
    }

    /// Run one gateway call under the deadline, logging the real cause and
    /// returning the opaque directory error.
    async fn call<T, F>(&self, op: &'static str, err: DirectoryError, fut: F) -> Result<T, DirectoryError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        match timeout(self.call_timeout, fut).await {
            Err(_elapsed) => {
                tracing::error!(op, "directory call timed out");
                Err(DirectoryError::Timeout)
            }
            Ok(Err(cause)) => {
                tracing::error!(op, %cause, "gateway failure");
                Err(err)
            }
            Ok(Ok(value)) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use caja_users::UserRole;

    use crate::in_memory::InMemoryUserGateway;

    fn new_user(username: &str, active: bool) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@empresa.com"),
            role: UserRole::Cashier,
            active,
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    fn directory_with(gateway: Arc<InMemoryUserGateway>) -> UserDirectory {
        UserDirectory::new(gateway)
    }

    #[tokio::test]
    async fn add_mints_id_and_prepends_to_cache() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway);

        let first = dir.add(new_user("ana", true)).await.unwrap();
        let second = dir.add(new_user("benito", true)).await.unwrap();

        assert_ne!(first.id, second.id);
        let names: Vec<_> = dir.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["benito", "ana"]);
    }

    #[tokio::test]
    async fn add_duplicate_username_is_an_opaque_create_error() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway);
        dir.add(new_user("ana", true)).await.unwrap();

        let err = dir.add(new_user("ana", true)).await.unwrap_err();
        assert_eq!(err, DirectoryError::Create);
        // The failed add must not touch the cache.
        assert_eq!(dir.users().len(), 1);
    }

    #[tokio::test]
    async fn list_failure_leaves_cache_and_resets_loading() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway.clone());
        dir.add(new_user("ana", true)).await.unwrap();

        gateway.set_failing(true);
        let err = dir.list().await.unwrap_err();

        assert_eq!(err, DirectoryError::List);
        assert_eq!(dir.users().len(), 1);
        assert!(!dir.is_loading());
        assert_eq!(dir.last_error(), Some(DirectoryError::List));
    }

    #[tokio::test]
    async fn list_success_replaces_cache_and_clears_error() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway.clone());
        dir.add(new_user("ana", true)).await.unwrap();

        gateway.set_failing(true);
        let _ = dir.list().await;
        gateway.set_failing(false);

        let users = dir.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(dir.last_error().is_none());
    }

    #[tokio::test]
    async fn update_replaces_matching_cache_entry() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway);
        let mut user = dir.add(new_user("ana", true)).await.unwrap();

        user.active = false;
        user.email = "ana.new@empresa.com".to_string();
        let updated = dir.update(user.clone()).await.unwrap();

        assert!(!updated.active);
        assert_eq!(dir.users()[0].email, "ana.new@empresa.com");
    }

    #[tokio::test]
    async fn delete_removes_from_cache() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway);
        let user = dir.add(new_user("ana", true)).await.unwrap();

        dir.delete(user.id).await.unwrap();
        assert!(dir.users().is_empty());
    }

    #[tokio::test]
    async fn find_by_username_splits_not_found_from_fault() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway.clone());
        dir.add(new_user("ana", true)).await.unwrap();

        assert!(dir.find_by_username("ghost").await.unwrap().is_none());

        gateway.set_failing(true);
        let err = dir.find_by_username("ana").await.unwrap_err();
        assert_eq!(err, DirectoryError::Lookup);
    }

    #[tokio::test]
    async fn find_by_username_returns_inactive_rows_too() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut dir = directory_with(gateway);
        dir.add(new_user("ana", false)).await.unwrap();

        let found = dir.find_by_username("ana").await.unwrap().unwrap();
        assert!(!found.active);
    }

    /// Gateway whose calls never complete; used to exercise the deadline.
    struct StalledGateway;

    #[async_trait]
    impl UserGateway for StalledGateway {
        async fn list_all(&self) -> Result<Vec<UserRecord>, GatewayError> {
            std::future::pending().await
        }
        async fn insert_one(&self, _: UserRecord) -> Result<UserRecord, GatewayError> {
            std::future::pending().await
        }
        async fn update_by_id(
            &self,
            _: UserId,
            _: UserRecord,
        ) -> Result<UserRecord, GatewayError> {
            std::future::pending().await
        }
        async fn delete_by_id(&self, _: UserId) -> Result<(), GatewayError> {
            std::future::pending().await
        }
        async fn find_one(&self, _: UserFilter) -> Result<UserRecord, GatewayError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn stalled_gateway_surfaces_as_timeout() {
        let dir = UserDirectory::with_timeout(Arc::new(StalledGateway), Duration::from_millis(20));

        let err = dir.find_by_username("ana").await.unwrap_err();
        assert_eq!(err, DirectoryError::Timeout);
    }
}
