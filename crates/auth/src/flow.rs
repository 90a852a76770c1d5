//! The authentication flow state machine.

use caja_directory::UserDirectory;
use caja_state::{Action, Dispatcher};
use caja_users::User;

use crate::credentials::CredentialVerifier;

/// Password the demo accounts are provisioned with.
pub const DEMO_PASSWORD: &str = "demo123";

/// Why a submission was rejected.
///
/// The three credential reasons are mutually exclusive; `Unavailable` covers
/// every directory fault (network, malformed response, timeout) without
/// leaking its cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UserNotFound,
    Inactive,
    BadCredential,
    Unavailable,
}

impl core::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Short, human-readable; never a raw error object.
        match self {
            AuthFailure::UserNotFound => write!(f, "user not found"),
            AuthFailure::Inactive => write!(f, "user is inactive, contact an administrator"),
            AuthFailure::BadCredential => write!(f, "incorrect password"),
            AuthFailure::Unavailable => write!(f, "could not sign in, try again"),
        }
    }
}

/// Where the flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    Idle,
    Checking,
    Authenticated(User),
    Failed(AuthFailure),
}

/// The username/password pair being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Drives {Idle, Checking, Authenticated, Failed} over submitted credentials.
///
/// On success the flow emits `Action::Login` into the state store it is
/// handed; it never mutates state any other way.
#[derive(Debug, Default)]
pub struct AuthFlow {
    phase: AuthPhase,
    credentials: Credentials,
}

impl Default for AuthPhase {
    fn default() -> Self {
        AuthPhase::Idle
    }
}

impl AuthFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    /// Pre-fill the credential fields (what the login form edits).
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
    }

    /// Submit the current credentials.
    ///
    /// A submission from `Failed` starts over; the flow passes through
    /// `Checking` and lands in `Authenticated` or `Failed`.
    pub async fn submit(
        &mut self,
        directory: &UserDirectory,
        verifier: &dyn CredentialVerifier,
        dispatcher: &mut dyn Dispatcher,
    ) -> &AuthPhase {
        self.phase = AuthPhase::Checking;
        let Credentials { username, password } = self.credentials.clone();

        self.phase = match directory.find_by_username(&username).await {
            Ok(None) => AuthPhase::Failed(AuthFailure::UserNotFound),
            Ok(Some(user)) if !user.active => AuthPhase::Failed(AuthFailure::Inactive),
            Ok(Some(user)) => {
                if verifier.verify(&password, &user.password_hash) {
                    dispatcher.dispatch(Action::Login(user.clone()));
                    AuthPhase::Authenticated(user)
                } else {
                    AuthPhase::Failed(AuthFailure::BadCredential)
                }
            }
            Err(err) => {
                tracing::warn!(%err, "directory unavailable during login");
                AuthPhase::Failed(AuthFailure::Unavailable)
            }
        };

        &self.phase
    }

    /// Quick demo login: pre-fill the fixed demo credentials and synthesize a
    /// submission. Behaviorally identical to the manual path once submitted.
    pub async fn submit_demo(
        &mut self,
        username: impl Into<String>,
        directory: &UserDirectory,
        verifier: &dyn CredentialVerifier,
        dispatcher: &mut dyn Dispatcher,
    ) -> &AuthPhase {
        self.set_credentials(username, DEMO_PASSWORD);
        self.submit(directory, verifier, dispatcher).await
    }
}
