//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records held in the application state tree (sales, kardex movements, cash
/// sessions, alerts) implement this so generic code can match them by id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
