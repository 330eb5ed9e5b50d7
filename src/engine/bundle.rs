//! Components and statically typed component sets.
//!
//! A [`Component`] is any plain-data type: `Pod` (so its bytes can be copied
//! into a column and read back in place) and `Send + Sync` (so read-only
//! iteration can fan out across threads).
//!
//! A [`ComponentSet`] is a tuple of distinct component types. The same trait
//! serves two roles:
//!
//! - as a **bundle** of values passed to `World::add_components` / `spawn`,
//!   exposing each value's raw bytes;
//! - as a **type list** for `World::query` and `World::remove_components`.
//!
//! Implemented for tuples of 1 to 8 components.

use bytemuck::Pod;

use crate::engine::component::TypeRegistry;
use crate::engine::error::{fail_fast, SchemaError};
use crate::engine::types::ComponentID;


/// Marker trait for types that can be stored as components.
pub trait Component: Pod + Send + Sync {}

impl<T: Pod + Send + Sync> Component for T {}

/// A tuple of component types, usable as a bundle of values or a type list.
pub trait ComponentSet: Send + Sync + 'static {
    /// Number of component types in the set.
    const LEN: usize;

    /// Registers every type, returning ids in declaration order.
    ///
    /// ## Errors
    /// [`SchemaError::CapacityExceeded`] once the registry is full.
    fn try_register(registry: &mut TypeRegistry) -> Result<Vec<ComponentID>, SchemaError>;

    /// Registers every type, panicking once the registry is full.
    fn register(registry: &mut TypeRegistry) -> Vec<ComponentID> {
        fail_fast(Self::try_register(registry))
    }

    /// Ids of every type in declaration order, `None` for types never registered.
    fn lookup(registry: &TypeRegistry) -> Vec<Option<ComponentID>>;

    /// Type names in declaration order.
    fn type_names() -> Vec<&'static str>;

    /// Raw bytes of each value, in declaration order.
    fn component_bytes(&self) -> Vec<&[u8]>;
}

macro_rules! impl_component_set {
    ($($name:ident $index:tt),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            const LEN: usize = [$($index),+].len();

            fn try_register(registry: &mut TypeRegistry) -> Result<Vec<ComponentID>, SchemaError> {
                Ok(vec![$(registry.try_register::<$name>()?),+])
            }

            fn lookup(registry: &TypeRegistry) -> Vec<Option<ComponentID>> {
                vec![$(registry.id_of::<$name>()),+]
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(std::any::type_name::<$name>()),+]
            }

            fn component_bytes(&self) -> Vec<&[u8]> {
                vec![$(bytemuck::bytes_of(&self.$index)),+]
            }
        }
    };
}

impl_component_set!(A 0);
impl_component_set!(A 0, B 1);
impl_component_set!(A 0, B 1, C 2);
impl_component_set!(A 0, B 1, C 2, D 3);
impl_component_set!(A 0, B 1, C 2, D 3, E 4);
impl_component_set!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_component_set!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_component_set!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Speed(f32);

    #[test]
    fn bundle_exposes_bytes_in_order() {
        let bundle = (7u32, Speed(1.5));
        let bytes = bundle.component_bytes();
        assert_eq!(<(u32, Speed) as ComponentSet>::LEN, 2);
        assert_eq!(bytes[0], &7u32.to_ne_bytes());
        assert_eq!(bytes[1], &1.5f32.to_ne_bytes());
    }

    #[test]
    fn lookup_reports_unregistered_types() {
        let mut registry = TypeRegistry::new();
        registry.register::<Speed>();
        let ids = <(u32, Speed)>::lookup(&registry);
        assert_eq!(ids, vec![None, Some(0)]);

        assert_eq!(<(Speed, u32)>::register(&mut registry), vec![0, 1]);
    }
}
