//! `caja-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the domain error model, the entity marker trait and the
//! injectable clock that keeps time-dependent logic deterministic.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AlertId, CashSessionId, KardexEntryId, ProductId, SaleId, UserId};
