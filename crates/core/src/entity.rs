//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities with the same id are the same record, even when their other
/// attributes differ (e.g. before and after an update).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether `other` denotes the same entity (identity comparison).
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
