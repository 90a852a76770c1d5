//! User accounts for the POS front end.

pub mod user;

pub use user::{NewUser, User, UserRole};
