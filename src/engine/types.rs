//! Core identifiers, capacities and the component [`Signature`].
//!
//! This module defines the small numeric identifiers shared by every layer of
//! the store, and the bitset signature that acts as the schema of an
//! archetype.
//!
//! ## Signatures
//!
//! A [`Signature`] is a fixed-width bit vector (`COMPONENT_CAP` bits) plus a
//! cached, ascending list of the component ids it contains:
//!
//! ```text
//! bits:  ..0000 1010 0110
//! ids:   [1, 2, 5, 7]
//! ```
//!
//! Two signatures are equal, and hash identically, iff their bit vectors are
//! equal, so the order in which components were added never matters. The
//! physical column order inside an archetype is ascending component id, which
//! makes the column index of an id the number of set bits below it
//! ([`Signature::index_of`]).
//!
//! ## Invariants
//!
//! - `popcount(bits) == ids.len()`
//! - `ids` is strictly ascending
//! - every id is `< COMPONENT_CAP`

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use crate::engine::error::SchemaError;


/// Raw entity identifier.
pub type EntityID = u64;

/// Identifier for a component type within one world.
pub type ComponentID = u16;

/// Identifier for an archetype within one world. Also its index in the world's table.
pub type ArchetypeID = u32;

/// Row index inside an archetype.
pub type RowID = usize;

/// Maximum number of distinct component types per world.
pub const COMPONENT_CAP: usize = 128;

/// Number of `u64` words backing a [`Signature`].
pub const SIGNATURE_SIZE: usize = (COMPONENT_CAP + 63) / 64;

const _: [(); 1] = [(); (COMPONENT_CAP <= ComponentID::MAX as usize) as usize];

#[inline]
const fn split(component_id: ComponentID) -> (usize, u64) {
    let index = component_id as usize;
    (index / 64, 1u64 << (index % 64))
}

/// Set of component types, stored as a fixed-width bitset.
#[derive(Clone, Default)]
pub struct Signature {
    components: [u64; SIGNATURE_SIZE],
    ids: Vec<ComponentID>,
}

impl Signature {
    /// The empty signature.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a signature from component ids.
    ///
    /// ## Panics
    /// Panics if an id is `>= COMPONENT_CAP` or appears more than once.

    pub fn new(component_ids: &[ComponentID]) -> Self {
        match Self::try_new(component_ids) {
            Ok(signature) => signature,
            Err(e) => panic!("invalid signature: {e}"),
        }
    }

    /// Builds a signature from component ids, reporting schema violations.
    ///
    /// ## Errors
    /// - [`SchemaError::ComponentOutOfRange`] if an id does not fit the bitset.
    /// - [`SchemaError::DuplicateComponent`] if an id is listed twice.

    pub fn try_new(component_ids: &[ComponentID]) -> Result<Self, SchemaError> {
        let mut components = [0u64; SIGNATURE_SIZE];
        for &component_id in component_ids {
            if component_id as usize >= COMPONENT_CAP {
                return Err(SchemaError::ComponentOutOfRange {
                    component_id,
                    capacity: COMPONENT_CAP,
                });
            }
            let (word, mask) = split(component_id);
            if components[word] & mask != 0 {
                return Err(SchemaError::DuplicateComponent { component_id });
            }
            components[word] |= mask;
        }

        let signature = Self::from_words(components);
        debug_assert_eq!(signature.ids.len(), component_ids.len());
        Ok(signature)
    }

    /// Builds a signature directly from its bit words.
    pub fn from_words(components: [u64; SIGNATURE_SIZE]) -> Self {
        let ids = iter_bits_from_words(&components).collect();
        Self { components, ids }
    }

    /// Raw bit words.
    #[inline]
    pub fn words(&self) -> &[u64; SIGNATURE_SIZE] {
        &self.components
    }

    /// Component ids in ascending order, which is also the column order.
    #[inline]
    pub fn ids(&self) -> &[ComponentID] {
        &self.ids
    }

    /// Number of component types in the signature.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` for the empty signature.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if `component_id` is present.
    #[inline]
    pub fn has(&self, component_id: ComponentID) -> bool {
        if component_id as usize >= COMPONENT_CAP {
            return false;
        }
        let (word, mask) = split(component_id);
        self.components[word] & mask != 0
    }

    /// Returns `true` if every component of `other` is present in `self`.
    #[inline]
    pub fn contains_all(&self, other: &Signature) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a & b == *b)
    }

    /// Returns `true` if the two signatures share no component.
    #[inline]
    pub fn is_disjoint(&self, other: &Signature) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a & b == 0)
    }

    /// Components present in both signatures.
    pub fn common_bits(&self, other: &Signature) -> Signature {
        self.zip_words(other, |a, b| a & b)
    }

    /// Components present in either signature.
    ///
    /// The add-components path only ever unions disjoint signatures; that
    /// precondition is checked by the caller via [`Signature::common_bits`].
    pub fn union(&self, other: &Signature) -> Signature {
        self.zip_words(other, |a, b| a | b)
    }

    /// Components of `self` that are not in `other`.
    pub fn difference(&self, other: &Signature) -> Signature {
        self.zip_words(other, |a, b| a & !b)
    }

    /// Column index of `component_id`: the number of set bits below it.
    ///
    /// Returns `None` if the component is not part of the signature.
    pub fn index_of(&self, component_id: ComponentID) -> Option<usize> {
        if !self.has(component_id) {
            return None;
        }
        let (word, mask) = split(component_id);
        let below: u32 = self.components[..word].iter().map(|w| w.count_ones()).sum();
        let partial = (self.components[word] & (mask - 1)).count_ones();
        Some((below + partial) as usize)
    }

    #[inline]
    fn zip_words(&self, other: &Signature, op: impl Fn(u64, u64) -> u64) -> Signature {
        let mut words = [0u64; SIGNATURE_SIZE];
        for (i, word) in words.iter_mut().enumerate() {
            *word = op(self.components[i], other.components[i]);
        }
        Signature::from_words(words)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl Add for &Signature {
    type Output = Signature;

    fn add(self, other: &Signature) -> Signature {
        self.union(other)
    }
}

impl Add for Signature {
    type Output = Signature;

    fn add(self, other: Signature) -> Signature {
        self.union(&other)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.ids).finish()
    }
}

/// Iterates over component ids set in a raw signature word array.
#[inline]
pub fn iter_bits_from_words(
    words: &[u64; SIGNATURE_SIZE],
) -> impl Iterator<Item = ComponentID> + '_ {
    words
        .iter()
        .enumerate()
        .flat_map(|(word_index, &word)| {
            let base = word_index * 64;
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some((base + tz) as ComponentID)
            })
        })
}
