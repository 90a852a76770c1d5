//! In-memory user gateway.
//!
//! Intended for tests/dev. Enforces the store-side invariants the remote
//! store would (unique usernames, `NoRows` on empty lookups) and offers a
//! fault-injection switch for exercising error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use caja_core::UserId;

use crate::gateway::{GatewayError, UserFilter, UserGateway, UserRecord};

#[derive(Debug, Default)]
pub struct InMemoryUserGateway {
    rows: RwLock<Vec<UserRecord>>,
    failing: AtomicBool,
}

impl InMemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway pre-seeded with rows (test/demo fixture).
    pub fn seeded(rows: Vec<UserRecord>) -> Self {
        Self {
            rows: RwLock::new(rows),
            failing: AtomicBool::new(false),
        }
    }

    /// When set, every operation fails with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_fault(&self) -> Result<(), GatewayError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(GatewayError::Transport("injected fault".to_string()))
        } else {
            Ok(())
        }
    }

    fn read_rows(&self) -> Result<Vec<UserRecord>, GatewayError> {
        self.rows
            .read()
            .map(|rows| rows.clone())
            .map_err(|_| GatewayError::Store("lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserGateway for InMemoryUserGateway {
    async fn list_all(&self) -> Result<Vec<UserRecord>, GatewayError> {
        self.check_fault()?;
        let mut rows = self.read_rows()?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_one(&self, record: UserRecord) -> Result<UserRecord, GatewayError> {
        self.check_fault()?;
        let mut rows = self
            .rows
            .write()
            .map_err(|_| GatewayError::Store("lock poisoned".to_string()))?;

        // Unique username, enforced store-side.
        if rows.iter().any(|r| r.username == record.username) {
            return Err(GatewayError::Store(format!(
                "duplicate username '{}'",
                record.username
            )));
        }
        if rows.iter().any(|r| r.id == record.id) {
            return Err(GatewayError::Store(format!("duplicate id '{}'", record.id)));
        }

        rows.push(record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        id: UserId,
        record: UserRecord,
    ) -> Result<UserRecord, GatewayError> {
        self.check_fault()?;
        let mut rows = self
            .rows
            .write()
            .map_err(|_| GatewayError::Store("lock poisoned".to_string()))?;

        let slot = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(GatewayError::NoRows)?;

        // Identity and creation time are immutable store-side.
        let stored = UserRecord {
            id: slot.id,
            created_at: slot.created_at,
            ..record
        };
        *slot = stored.clone();
        Ok(stored)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), GatewayError> {
        self.check_fault()?;
        let mut rows = self
            .rows
            .write()
            .map_err(|_| GatewayError::Store("lock poisoned".to_string()))?;
        rows.retain(|r| r.id != id);
        Ok(())
    }

    async fn find_one(&self, filter: UserFilter) -> Result<UserRecord, GatewayError> {
        self.check_fault()?;
        let rows = self.read_rows()?;
        let mut matches = rows.into_iter().filter(|r| filter.matches(r));

        let first = matches.next().ok_or(GatewayError::NoRows)?;
        if matches.next().is_some() {
            return Err(GatewayError::Store("more than one matching row".to_string()));
        }
        Ok(first)
    }
}
