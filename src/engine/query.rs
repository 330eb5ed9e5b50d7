//! Archetype membership index and query results.
//!
//! The world keeps one bitset per component id, where bit *k* is set iff
//! archetype *k* stores that component, plus one bitset of all existing
//! archetypes:
//!
//! ```text
//!              archetype  0 1 2 3
//! Position (0)            0 1 1 0
//! Velocity (1)            0 0 1 1
//! existing                1 1 1 1
//!
//! query (Position, Velocity) = existing & Position & Velocity = {2}
//! ```
//!
//! Answering a query is a word-wise AND over these bitsets, so its cost grows
//! with the number of archetypes, never with the number of entities.
//!
//! ## Invariants
//! - a bit is set in a component's bitset iff that archetype's signature
//!   contains the component
//! - bits are only ever set; archetypes are never destroyed

use fixedbitset::FixedBitSet;

use crate::engine::types::{ArchetypeID, ComponentID, Signature};


/// Per-component archetype membership bitsets.
#[derive(Default, Debug)]
pub struct ArchetypeIndex {
    by_component: Vec<FixedBitSet>,
    existing: FixedBitSet,
}

impl ArchetypeIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly created archetype.
    ///
    /// ## Panics
    /// Panics if `archetype_id` was already registered.

    pub fn register(&mut self, archetype_id: ArchetypeID, signature: &Signature) {
        let bit = archetype_id as usize;
        if self.existing.len() <= bit {
            self.existing.grow(bit + 1);
        }
        assert!(!self.existing.contains(bit), "archetype {archetype_id} indexed twice");
        self.existing.insert(bit);

        for &component_id in signature.ids() {
            let slot = component_id as usize;
            if self.by_component.len() <= slot {
                self.by_component.resize_with(slot + 1, FixedBitSet::new);
            }
            let members = &mut self.by_component[slot];
            if members.len() <= bit {
                members.grow(bit + 1);
            }
            members.insert(bit);
        }
    }

    /// Archetypes whose signature contains every listed component.
    ///
    /// A `None` entry stands for a component type the world has never seen;
    /// no archetype can hold it, so the result is empty. An empty list
    /// matches every archetype.

    pub fn matching(&self, required: &[Option<ComponentID>]) -> ArchetypeSet {
        let mut bits = self.existing.clone();
        for component_id in required {
            let members = component_id.and_then(|id| self.by_component.get(id as usize));
            match members {
                Some(members) => bits.intersect_with(members),
                None => return ArchetypeSet::default(),
            }
        }
        ArchetypeSet { bits }
    }
}

/// Set of archetype ids returned by a query.
///
/// Two sets are equal when they hold the same archetype ids, whatever the
/// length of their backing bitsets.
#[derive(Clone, Default, Debug)]
pub struct ArchetypeSet {
    bits: FixedBitSet,
}

impl PartialEq for ArchetypeSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for ArchetypeSet {}

impl ArchetypeSet {
    /// Returns `true` if `archetype_id` is in the set.
    #[inline]
    pub fn contains(&self, archetype_id: ArchetypeID) -> bool {
        self.bits.contains(archetype_id as usize)
    }

    /// Archetype ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ArchetypeID> + '_ {
        self.bits.ones().map(|bit| bit as ArchetypeID)
    }

    /// Number of archetypes in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Returns `true` if no archetype matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.ones().next().is_none()
    }
}
