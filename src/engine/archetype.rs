//! # Archetype tables
//!
//! An [`Archetype`] stores every entity that shares one exact [`Signature`]:
//!
//! ```text
//! signature {Position(0), Velocity(3)}
//!
//!            column 0     column 1
//! row 0  e7  Position     Velocity
//! row 1  e2  Position     Velocity
//! row 2  e9  Position     Velocity
//! ```
//!
//! Columns are sorted by ascending component id, so the column holding a
//! component is `signature.index_of(id)`. The entity array runs parallel to
//! the columns.
//!
//! ## Row lifecycle
//! Rows are only ever appended ([`Archetype::add_entity`]) or swap-removed
//! ([`Archetype::remove_entity`]). A swap-remove relocates exactly one other
//! entity (the previous last row) and reports it, so the world can refresh
//! that entity's location. Nothing else in the store keeps row indices.
//!
//! ## Invariants
//! - every column and the entity array have identical length
//! - `columns.len() == signature.len()`, column `i` holds `signature.ids()[i]`
//! - archetypes are never destroyed, even when empty

use crate::engine::component::ComponentDesc;
use crate::engine::entity::Entity;
use crate::engine::storage::ColumnStorage;
use crate::engine::types::{ArchetypeID, ComponentID, RowID, Signature};


/// Columnar storage for all entities of one signature.
pub struct Archetype {
    archetype_id: ArchetypeID,
    signature: Signature,
    columns: Vec<ColumnStorage>,
    entities: Vec<Entity>,
}

impl Archetype {
    /// Creates an empty archetype for `signature`.
    ///
    /// `components` must describe exactly the signature's components, in any
    /// order; they are sorted here to establish the physical column order.
    ///
    /// ## Panics
    /// Panics if `components` does not match `signature`.

    pub fn new(
        archetype_id: ArchetypeID,
        signature: Signature,
        components: &[(ComponentID, ComponentDesc)],
        row_capacity: usize,
    ) -> Self {
        let mut sorted: Vec<(ComponentID, ComponentDesc)> = components.to_vec();
        sorted.sort_unstable_by_key(|(id, _)| *id);

        let ids: Vec<ComponentID> = sorted.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids.as_slice(),
            signature.ids(),
            "column descriptors do not match archetype signature"
        );

        let columns = sorted
            .iter()
            .map(|(_, desc)| ColumnStorage::with_capacity(desc.size, desc.align, row_capacity))
            .collect();

        Self {
            archetype_id,
            signature,
            columns,
            entities: Vec::with_capacity(row_capacity),
        }
    }

    /// Identifier of this archetype.
    #[inline]
    pub fn id(&self) -> ArchetypeID {
        self.archetype_id
    }

    /// Component set stored here.
    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of rows (entities).
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity lives here.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in row order.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Column at physical index `column`.
    ///
    /// ## Panics
    /// Panics if `column >= signature().len()`.
    #[inline]
    pub fn column(&self, column: usize) -> &ColumnStorage {
        &self.columns[column]
    }

    /// All columns, in ascending component id order.
    #[inline]
    pub fn columns(&self) -> &[ColumnStorage] {
        &self.columns
    }

    /// Column holding `component_id`, if part of this archetype.
    #[inline]
    pub fn column_for(&self, component_id: ComponentID) -> Option<&ColumnStorage> {
        self.signature.index_of(component_id).map(|i| &self.columns[i])
    }

    /// Splits the archetype into its entity list and mutable columns.
    #[inline]
    pub fn entities_and_columns_mut(&mut self) -> (&[Entity], &mut [ColumnStorage]) {
        (&self.entities, &mut self.columns)
    }

    /// Appends a row and returns its index.
    ///
    /// `components` pairs each component id with the raw bytes of its value.
    /// The set of ids must equal this archetype's signature exactly.
    ///
    /// ## Panics
    /// - the provided ids do not form this archetype's signature;
    /// - a payload's length differs from its column width.

    pub fn add_entity(&mut self, components: &[(ComponentID, &[u8])], entity: Entity) -> RowID {
        let provided: Vec<ComponentID> = components.iter().map(|(id, _)| *id).collect();
        assert!(
            Signature::new(&provided) == self.signature,
            "row components {:?} do not match archetype {} signature {:?}",
            provided,
            self.archetype_id,
            self.signature
        );

        for &(component_id, bytes) in components {
            let column = self
                .signature
                .index_of(component_id)
                .unwrap_or_else(|| unreachable!("component {component_id} checked against signature"));
            self.columns[column].push_bytes(bytes);
        }

        let row = self.entities.len();
        self.entities.push(entity);
        debug_assert!(self.columns.iter().all(|c| c.len() == self.entities.len()));
        row
    }

    /// Swap-removes row `row` from every column and the entity array.
    ///
    /// Returns the entity that now occupies `row`, or `None` if `row` was the
    /// last row and nothing moved. The caller must refresh the returned
    /// entity's stored row index.
    ///
    /// ## Panics
    /// Panics if `row >= len()`.

    pub fn remove_entity(&mut self, row: RowID) -> Option<Entity> {
        assert!(
            row < self.entities.len(),
            "row {row} out of bounds for archetype {} with {} rows",
            self.archetype_id,
            self.entities.len()
        );

        for column in &mut self.columns {
            column.swap_remove(row);
        }
        self.entities.swap_remove(row);

        self.entities.get(row).copied()
    }

    /// Bytes of one component of one row.
    ///
    /// ## Panics
    /// Panics if `row` or `column` is out of bounds.
    #[inline]
    pub fn component_bytes(&self, row: RowID, column: usize) -> &[u8] {
        self.columns[column].row(row)
    }

    /// Mutable bytes of one component of one row.
    #[inline]
    pub fn component_bytes_mut(&mut self, row: RowID, column: usize) -> &mut [u8] {
        self.columns[column].row_mut(row)
    }
}

impl std::fmt::Debug for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archetype")
            .field("id", &self.archetype_id)
            .field("signature", &self.signature)
            .field("rows", &self.entities.len())
            .finish()
    }
}

/// Picks disjoint mutable columns by physical index.
///
/// ## Panics
/// Panics if an index is out of range or repeated.

pub fn pick_columns_mut<const N: usize>(
    columns: &mut [ColumnStorage],
    indices: [usize; N],
) -> [&mut ColumnStorage; N] {
    let mut picked: [Option<&mut ColumnStorage>; N] = std::array::from_fn(|_| None);
    for (index, column) in columns.iter_mut().enumerate() {
        if let Some(slot) = indices.iter().position(|&i| i == index) {
            picked[slot] = Some(column);
        }
    }
    picked.map(|column| match column {
        Some(column) => column,
        None => panic!("column indices {indices:?} are out of range or repeated"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::bytes_of;

    #[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Position {
        x: f32,
        y: f32,
    }

    const POSITION: ComponentID = 4;
    const TAG: ComponentID = 1;

    fn table() -> Archetype {
        let signature = Signature::new(&[POSITION, TAG]);
        // deliberately unsorted
        let components = [
            (POSITION, ComponentDesc::of::<Position>().with_id(POSITION)),
            (TAG, ComponentDesc::of::<u8>().with_id(TAG)),
        ];
        Archetype::new(0, signature, &components, 0)
    }

    fn push(archetype: &mut Archetype, entity: u64, x: f32) -> RowID {
        let position = Position { x, y: 0.0 };
        let tag = entity as u8;
        archetype.add_entity(&[(POSITION, bytes_of(&position)), (TAG, bytes_of(&tag))], Entity(entity))
    }

    #[test]
    fn columns_follow_signature_order() {
        let archetype = table();
        assert_eq!(archetype.signature().index_of(TAG), Some(0));
        assert_eq!(archetype.column(0).width(), 1);
        assert_eq!(archetype.column(1).width(), 8);
    }

    #[test]
    fn add_entity_returns_sequential_rows() {
        let mut archetype = table();
        assert_eq!(push(&mut archetype, 10, 1.0), 0);
        assert_eq!(push(&mut archetype, 11, 2.0), 1);
        assert_eq!(archetype.entities(), &[Entity(10), Entity(11)]);
        assert_eq!(archetype.column(1).get::<Position>(1).x, 2.0);
    }

    #[test]
    fn remove_reports_swapped_entity() {
        let mut archetype = table();
        push(&mut archetype, 1, 1.0);
        push(&mut archetype, 2, 2.0);
        push(&mut archetype, 3, 3.0);

        assert_eq!(archetype.remove_entity(0), Some(Entity(3)));
        assert_eq!(archetype.column(1).get::<Position>(0).x, 3.0);
        assert_eq!(*archetype.column(0).get::<u8>(0), 3);

        // last row: nothing moves
        assert_eq!(archetype.remove_entity(1), None);
        assert_eq!(archetype.entities(), &[Entity(3)]);
        assert!(archetype.columns().iter().all(|c| c.len() == 1));
    }

    #[test]
    #[should_panic(expected = "do not match archetype")]
    fn add_entity_rejects_wrong_signature() {
        let mut archetype = table();
        let position = Position { x: 0.0, y: 0.0 };
        archetype.add_entity(&[(POSITION, bytes_of(&position))], Entity(1));
    }

    #[test]
    fn pick_columns_mut_returns_requested_order() {
        let mut archetype = table();
        push(&mut archetype, 5, 5.0);
        let (_, columns) = archetype.entities_and_columns_mut();
        let [position, tag] = pick_columns_mut(columns, [1, 0]);
        position.get_mut::<Position>(0).y = 7.0;
        *tag.get_mut::<u8>(0) = 9;
        assert_eq!(archetype.column(1).get::<Position>(0).y, 7.0);
        assert_eq!(*archetype.column(0).get::<u8>(0), 9);
    }
}
