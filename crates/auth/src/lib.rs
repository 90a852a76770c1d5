//! `caja-auth` — credential verification and the login flow.

pub mod credentials;
pub mod flow;

pub use credentials::{Argon2Verifier, CredentialError, CredentialVerifier};
pub use flow::{AuthFailure, AuthFlow, AuthPhase, Credentials, DEMO_PASSWORD};
