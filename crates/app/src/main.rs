//! POS client core entry point.
//!
//! Boots the state core, restores the durable snapshot, seeds the demo
//! accounts in the (in-memory) remote store and walks through a register
//! shift so the pieces can be observed end to end.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use caja_app::{seed_demo_users, App};
use caja_auth::AuthPhase;
use caja_core::{AlertId, CashSessionId};
use caja_directory::InMemoryUserGateway;
use caja_persistence::FileSnapshotStore;
use caja_state::{Action, Alert, CashSession, Dispatcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    caja_observability::init();

    let snapshot_store = match std::env::var("CAJA_SNAPSHOT_PATH") {
        Ok(path) => FileSnapshotStore::new(path),
        Err(_) => FileSnapshotStore::at_default_location()
            .context("resolving default snapshot location")?,
    };
    tracing::info!(path = %snapshot_store.path().display(), "using snapshot");

    let gateway = Arc::new(InMemoryUserGateway::new());
    let mut app = App::open(Box::new(snapshot_store), gateway);
    tracing::info!(
        sales = app.state().sales.len(),
        cash_sessions = app.state().cash_sessions.len(),
        alerts = app.state().unread_alerts(),
        "restored state"
    );

    seed_demo_users(&mut app.directory)
        .await
        .context("seeding demo users")?;

    match app.demo_login("admin").await {
        AuthPhase::Authenticated(user) => {
            tracing::info!(username = %user.username, role = %user.role, "logged in");
        }
        AuthPhase::Failed(reason) => {
            tracing::warn!(%reason, "demo login failed");
            return Ok(());
        }
        // submit() always settles in Authenticated or Failed.
        other => anyhow::bail!("login did not settle: {other:?}"),
    }

    let cashier = app
        .state()
        .current_user
        .as_ref()
        .map(|u| u.id)
        .context("no user after login")?;

    let session = CashSession::open(CashSessionId::new(), cashier, 10_000, Utc::now());
    app.store.dispatch(Action::StartCashSession(session));
    app.store.dispatch(Action::AddAlert(Alert::new(
        AlertId::new(),
        "shift opened with default float",
        Utc::now(),
    )));
    app.store.dispatch(Action::EndCashSession);
    app.store.dispatch(Action::Logout);

    tracing::info!(
        cash_sessions = app.state().cash_sessions.len(),
        unread_alerts = app.state().unread_alerts(),
        "shift complete; snapshot written"
    );

    Ok(())
}
