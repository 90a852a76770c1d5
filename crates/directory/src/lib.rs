//! `caja-directory` — user lookup and CRUD against the remote store.
//!
//! The [`gateway`] module is the opaque remote access layer: five async CRUD
//! operations over wire-format [`gateway::UserRecord`]s. The [`directory`]
//! module wraps it with an in-memory cache and converts every gateway fault
//! into an opaque [`directory::DirectoryError`] before it can reach the
//! authentication flow or the UI.

pub mod directory;
pub mod gateway;
pub mod in_memory;

pub use directory::{DirectoryError, UserDirectory};
pub use gateway::{GatewayError, UserFilter, UserGateway, UserRecord};
pub use in_memory::InMemoryUserGateway;
