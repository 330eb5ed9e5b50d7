//! World construction settings.

/// Settings applied when a [`World`](crate::World) creates archetypes.
///
/// ## Fields
/// - `row_capacity`: rows reserved up front in every new archetype's columns
///   and entity array. `0` allocates lazily on the first insert.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldConfig {
    /// Initial rows reserved per archetype.
    pub row_capacity: usize,
}

impl WorldConfig {
    /// Returns a copy with `row_capacity` set.
    #[inline]
    pub fn with_row_capacity(mut self, row_capacity: usize) -> Self {
        self.row_capacity = row_capacity;
        self
    }
}
