//! # Type Registry
//!
//! Assigns stable `ComponentID` values to Rust component types and sequential
//! instance ids to everything else a world creates (entities, archetypes).
//!
//! ## Purpose
//! Archetypes store components as raw bytes, so they need each type's size
//! and alignment before any value of that type is handed to them. The
//! registry records a [`ComponentDesc`] the first time a type is used, and
//! archetypes created later for any signature look their column layouts up
//! here.
//!
//! ## Design
//! - One registry per [`World`](crate::World). There is no process-wide
//!   state, so independent worlds (e.g. in tests) never share ids.
//! - Component ids are handed out sequentially in `[0, COMPONENT_CAP)`.
//! - Instance counters are keyed by a marker type, one counter per kind.
//!
//! ## Invariants
//! - `ComponentID` values are unique and stable for the registry's lifetime.
//! - Every entry in `by_type` has a matching `by_id[id]`.
//! - Instance ids are never reused.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::mem::{align_of, size_of};

use crate::engine::bundle::Component;
use crate::engine::error::SchemaError;
use crate::engine::types::{ComponentID, COMPONENT_CAP};


/// Describes a registered component type.
///
/// ## Fields
/// - `component_id`: identifier assigned by the registry.
/// - `name`: Rust type name, for diagnostics.
/// - `type_id`: runtime `TypeId`.
/// - `size`: `size_of::<T>()`, the column width.
/// - `align`: `align_of::<T>()`, the column alignment.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentDesc {
    /// Runtime identifier assigned to this component type.
    pub component_id: ComponentID,

    /// Rust type name for diagnostics.
    pub name: &'static str,

    /// Runtime `TypeId` of the component.
    pub type_id: TypeId,

    /// Size of the component type in bytes.
    pub size: usize,

    /// Alignment of the component type in bytes.
    pub align: usize,
}

impl ComponentDesc {
    /// Descriptor for `T` with `component_id = 0`; finalize with [`with_id`](Self::with_id).
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self {
            component_id: 0,
            name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }

    /// Returns a copy with `component_id` set.
    #[inline]
    pub fn with_id(mut self, component_id: ComponentID) -> Self {
        self.component_id = component_id;
        self
    }

    /// Returns `true` if this descriptor refers to `T`.
    #[inline]
    pub fn matches_type<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Display for ComponentDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComponentDesc {{ id: {}, name: {}, size: {}, align: {} }}",
            self.component_id, self.name, self.size, self.align
        )
    }
}

/// Per-world registry of component types and instance counters.
#[derive(Default)]
pub struct TypeRegistry {
    by_type: HashMap<TypeId, ComponentID>,
    by_id: Vec<ComponentDesc>,
    instance_counters: HashMap<TypeId, u64>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` and returns its id. Idempotent.
    ///
    /// ## Panics
    /// Panics if `COMPONENT_CAP` types are already registered.

    pub fn register<T: Component>(&mut self) -> ComponentID {
        match self.try_register::<T>() {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Registers `T`, reporting a full registry as an error.
    pub fn try_register<T: Component>(&mut self) -> Result<ComponentID, SchemaError> {
        let type_id = TypeId::of::<T>();
        if let Some(&existing) = self.by_type.get(&type_id) {
            return Ok(existing);
        }

        if self.by_id.len() >= COMPONENT_CAP {
            return Err(SchemaError::CapacityExceeded {
                name: type_name::<T>(),
                capacity: COMPONENT_CAP,
            });
        }

        let id = self.by_id.len() as ComponentID;
        let desc = ComponentDesc::of::<T>().with_id(id);
        self.by_type.insert(type_id, id);
        self.by_id.push(desc);

        tracing::debug!(component_id = id, name = desc.name, size = desc.size, "registered component type");
        Ok(id)
    }

    /// Id of `T`, if registered.
    #[inline]
    pub fn id_of<T: 'static>(&self) -> Option<ComponentID> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Descriptor for `component_id`, if registered.
    #[inline]
    pub fn description(&self, component_id: ComponentID) -> Option<&ComponentDesc> {
        self.by_id.get(component_id as usize)
    }

    /// Number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if no component type is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Allocates the next sequential id for instances of kind `K`.
    ///
    /// Each kind has its own counter starting at 0. Ids are never reclaimed.
    pub fn next_instance_id<K: 'static>(&mut self) -> u64 {
        let counter = self.instance_counters.entry(TypeId::of::<K>()).or_insert(0);
        let id = *counter;
        *counter += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Health(u32);

    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Mass(f64);

    struct EntityKind;
    struct ArchetypeKind;

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::new();
        let health = registry.register::<Health>();
        let mass = registry.register::<Mass>();
        assert_eq!(registry.register::<Health>(), health);
        assert_ne!(health, mass);
        assert_eq!(registry.id_of::<Mass>(), Some(mass));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn descriptor_records_layout() {
        let mut registry = TypeRegistry::new();
        let id = registry.register::<Mass>();
        let desc = registry.description(id).copied().unwrap();
        assert_eq!(desc.size, 8);
        assert_eq!(desc.align, align_of::<f64>());
        assert!(desc.matches_type::<Mass>());
        assert!(desc.name.ends_with("Mass"));
    }

    #[test]
    fn registries_are_isolated() {
        let mut a = TypeRegistry::new();
        let mut b = TypeRegistry::new();
        a.register::<Health>();
        assert_eq!(b.register::<Mass>(), 0);
        assert_eq!(b.id_of::<Health>(), None);
    }

    #[test]
    fn instance_counters_are_per_kind() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.next_instance_id::<EntityKind>(), 0);
        assert_eq!(registry.next_instance_id::<EntityKind>(), 1);
        assert_eq!(registry.next_instance_id::<ArchetypeKind>(), 0);
        assert_eq!(registry.next_instance_id::<EntityKind>(), 2);
    }
}
