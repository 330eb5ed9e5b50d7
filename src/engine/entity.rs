//! Entity handles and the entity → location map.
//!
//! An [`Entity`] carries no data of its own; it is a key into
//! [`EntityLocations`], which records the archetype and row currently holding
//! the entity's components. Identifiers come from a per-world monotonic
//! counter and are never reused.

use std::collections::HashMap;
use std::fmt;

use crate::engine::types::{ArchetypeID, EntityID, RowID};


/// Opaque entity handle.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Entity(pub EntityID);

impl Entity {
    /// Raw identifier.
    #[inline]
    pub fn id(self) -> EntityID {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a live entity's row lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityLocation {
    /// Archetype holding the row.
    pub archetype: ArchetypeID,
    /// Row index inside that archetype.
    pub row: RowID,
}

/// Location records for every live entity.
///
/// ## Invariants
/// - Every record points at a row whose entity slot holds the same entity.
/// - A record exists iff the entity is live.
#[derive(Default)]
pub struct EntityLocations {
    locations: HashMap<Entity, EntityLocation>,
}

impl EntityLocations {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new entity. Panics if the entity already had a record.
    pub fn insert(&mut self, entity: Entity, location: EntityLocation) {
        let previous = self.locations.insert(entity, location);
        assert!(previous.is_none(), "entity {entity} recorded twice");
    }

    /// Current location, if the entity is live.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<EntityLocation> {
        self.locations.get(&entity).copied()
    }

    /// Overwrites the location of a live entity.
    #[inline]
    pub fn set(&mut self, entity: Entity, location: EntityLocation) {
        match self.locations.get_mut(&entity) {
            Some(slot) => *slot = location,
            None => panic!("cannot relocate unknown entity {entity}"),
        }
    }

    /// Refreshes only the row of a live entity, after a swap-remove moved it.
    #[inline]
    pub fn set_row(&mut self, entity: Entity, row: RowID) {
        match self.locations.get_mut(&entity) {
            Some(slot) => slot.row = row,
            None => panic!("swap-remove moved unknown entity {entity}"),
        }
    }

    /// Drops the record, returning where the entity was.
    #[inline]
    pub fn remove(&mut self, entity: Entity) -> Option<EntityLocation> {
        self.locations.remove(&entity)
    }

    /// Returns `true` if the entity is live.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.locations.contains_key(&entity)
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` when no entity is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_relocate_remove() {
        let mut locations = EntityLocations::new();
        let e = Entity(3);
        locations.insert(e, EntityLocation { archetype: 0, row: 0 });
        locations.set(e, EntityLocation { archetype: 2, row: 5 });
        locations.set_row(e, 1);
        assert_eq!(locations.get(e), Some(EntityLocation { archetype: 2, row: 1 }));
        assert_eq!(locations.remove(e), Some(EntityLocation { archetype: 2, row: 1 }));
        assert!(!locations.contains(e));
        assert!(locations.is_empty());
    }

    #[test]
    #[should_panic(expected = "unknown entity 9")]
    fn relocating_unknown_entity_panics() {
        let mut locations = EntityLocations::new();
        locations.set_row(Entity(9), 0);
    }
}
