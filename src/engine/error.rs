//! Error types for schema and lookup violations.
//!
//! The store treats malformed calls as defects in calling code. The primary
//! API therefore panics, using the `Display` text of these errors as the
//! diagnostic. Every panicking operation has a `try_*` twin that returns the
//! same condition as a value, which is what tooling and tests match on.
//!
//! ## Taxonomy
//! * [`SchemaError`]: a signature cannot be formed or changed as requested
//!   (id out of range, duplicate type in one call, re-adding a present
//!   component, registry full).
//! * [`LookupError`]: the target entity or component does not exist.
//! * [`StoreError`]: aggregate of both, returned by world-level operations.
//!
//! Bounds violations inside column storage are not represented here; they
//! panic at the indexing site.

use thiserror::Error;

use crate::engine::entity::Entity;
use crate::engine::types::ComponentID;


/// A signature could not be built or extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A component id does not fit the fixed-width signature.
    #[error("component id {component_id} exceeds signature width {capacity}")]
    ComponentOutOfRange {
        /// Offending id.
        component_id: ComponentID,
        /// Signature width in bits.
        capacity: usize,
    },

    /// The same component type appears twice in one call.
    #[error("component {component_id} listed more than once")]
    DuplicateComponent {
        /// Repeated id.
        component_id: ComponentID,
    },

    /// A component being added is already attached to the entity.
    #[error("entity {entity} already has component `{name}`")]
    AlreadyPresent {
        /// Target entity.
        entity: Entity,
        /// Type name of the component.
        name: &'static str,
    },

    /// The registry cannot hand out another component id.
    #[error("component registry full ({capacity} types); cannot register `{name}`")]
    CapacityExceeded {
        /// Type that failed to register.
        name: &'static str,
        /// Maximum number of component types.
        capacity: usize,
    },
}

/// A requested entity or component does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The entity was never created or has been removed.
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),

    /// The entity exists but does not carry the component.
    #[error("entity {entity} has no component `{name}`")]
    MissingComponent {
        /// Target entity.
        entity: Entity,
        /// Type name of the component.
        name: &'static str,
    },

    /// The component type has never been registered in this world.
    #[error("component `{name}` is not registered")]
    Unregistered {
        /// Type name of the component.
        name: &'static str,
    },
}

/// Aggregate error for world-level operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Schema violation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Lookup violation.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result alias for world-level operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Unwraps a store result, turning an error into an invariant panic.
#[inline]
#[track_caller]
pub(crate) fn fail_fast<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violation() {
        let e = StoreError::from(LookupError::MissingComponent { entity: Entity(7), name: "Velocity" });
        assert_eq!(e.to_string(), "entity 7 has no component `Velocity`");

        let e = StoreError::from(SchemaError::DuplicateComponent { component_id: 3 });
        assert_eq!(e.to_string(), "component 3 listed more than once");
    }

    #[test]
    #[should_panic(expected = "unknown entity 42")]
    fn fail_fast_panics_with_display_text() {
        let result: StoreResult<()> = Err(LookupError::UnknownEntity(Entity(42)).into());
        fail_fast(result);
    }
}
