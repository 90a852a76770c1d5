//! `caja-app` — composition root for the POS client core.

pub mod bootstrap;

pub use bootstrap::{seed_demo_users, App, DEMO_USERNAMES};
