//! Wires the state store, persistence, directory and auth flow together.

use std::sync::Arc;

use anyhow::Context;

use caja_auth::{Argon2Verifier, AuthFlow, AuthPhase, CredentialVerifier, DEMO_PASSWORD};
use caja_core::SystemClock;
use caja_directory::{UserDirectory, UserGateway};
use caja_persistence::{PersistentStore, SnapshotStore};
use caja_state::AppState;
use caja_users::{NewUser, UserRole};

/// The stock demo accounts and their roles.
pub const DEMO_USERNAMES: [(&str, UserRole); 3] = [
    ("admin", UserRole::Admin),
    ("supervisor", UserRole::Supervisor),
    ("vendedor", UserRole::Cashier),
];

/// Everything a UI layer needs a handle to.
pub struct App {
    pub store: PersistentStore,
    pub directory: UserDirectory,
    pub auth: AuthFlow,
    pub verifier: Argon2Verifier,
}

impl App {
    /// Build the application core: open the persistent store (restoring the
    /// durable snapshot) and attach the user directory and auth flow.
    pub fn open(
        snapshot_store: Box<dyn SnapshotStore + Send>,
        gateway: Arc<dyn UserGateway>,
    ) -> Self {
        Self {
            store: PersistentStore::open(snapshot_store, Arc::new(SystemClock)),
            directory: UserDirectory::new(gateway),
            auth: AuthFlow::new(),
            verifier: Argon2Verifier,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Run the quick demo login for one of the provisioned accounts.
    pub async fn demo_login(&mut self, username: &str) -> AuthPhase {
        self.auth
            .submit_demo(username, &self.directory, &self.verifier, &mut self.store)
            .await
            .clone()
    }
}

/// Provision the demo accounts in the remote store, skipping ones that
/// already exist.
pub async fn seed_demo_users(directory: &mut UserDirectory) -> anyhow::Result<()> {
    let verifier = Argon2Verifier;
    for (username, role) in DEMO_USERNAMES {
        if directory
            .find_by_username(username)
            .await
            .map(|found| found.is_some())
            .unwrap_or(false)
        {
            continue;
        }

        let password_hash = verifier
            .hash(DEMO_PASSWORD)
            .with_context(|| format!("hashing demo password for '{username}'"))?;
        directory
            .add(NewUser {
                username: username.to_string(),
                email: format!("{username}@empresa.com"),
                role,
                active: true,
                password_hash,
            })
            .await
            .with_context(|| format!("seeding demo user '{username}'"))?;
        tracing::info!(username, %role, "seeded demo user");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use caja_core::CashSessionId;
    use caja_directory::InMemoryUserGateway;
    use caja_persistence::FileSnapshotStore;
    use caja_state::{Action, CashSession, CashSessionStatus, Dispatcher};

    #[tokio::test]
    async fn full_session_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("snapshot.json");
        let gateway = Arc::new(InMemoryUserGateway::new());

        {
            let mut app = App::open(
                Box::new(FileSnapshotStore::new(&snapshot_path)),
                gateway.clone(),
            );
            seed_demo_users(&mut app.directory).await.unwrap();

            let phase = app.demo_login("admin").await;
            assert!(matches!(phase, AuthPhase::Authenticated(_)));

            let cashier = app.state().current_user.as_ref().unwrap().id;
            let session =
                CashSession::open(CashSessionId::new(), cashier, 10_000, Utc::now());
            app.store.dispatch(Action::StartCashSession(session));
            app.store.dispatch(Action::EndCashSession);
        }

        // A fresh process sees the closed shift but no logged-in user.
        let reopened = App::open(
            Box::new(FileSnapshotStore::new(&snapshot_path)),
            gateway,
        );
        assert_eq!(reopened.state().cash_sessions.len(), 1);
        assert_eq!(
            reopened.state().cash_sessions[0].status,
            CashSessionStatus::Closed
        );
        assert!(reopened.state().current_user.is_none());
        assert!(reopened.state().current_cash_session.is_none());
    }

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate_accounts() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut directory = UserDirectory::new(gateway);

        seed_demo_users(&mut directory).await.unwrap();
        seed_demo_users(&mut directory).await.unwrap();

        directory.list().await.unwrap();
        assert_eq!(directory.users().len(), DEMO_USERNAMES.len());
    }

    #[tokio::test]
    async fn demo_login_rejects_unseeded_accounts() {
        let gateway = Arc::new(InMemoryUserGateway::new());
        let mut app = App::open(
            Box::new(FileSnapshotStore::new(
                tempfile::tempdir().unwrap().path().join("snapshot.json"),
            )),
            gateway,
        );

        let phase = app.demo_login("ghost").await;
        assert!(matches!(
            phase,
            AuthPhase::Failed(caja_auth::AuthFailure::UserNotFound)
        ));
    }
}
