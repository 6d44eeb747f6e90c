//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Which store table the entity lives in.
    const KIND: crate::EntityKind;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
