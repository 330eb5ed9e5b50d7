//! # Archetype Store
//!
//! Archetype-based entity/component storage for simulations that touch large
//! numbers of entities every frame.
//!
//! ## Design Goals
//! - One dense table per distinct component set, with columns laid out for
//!   linear scans
//! - Queries answered by bitset intersection over archetypes, never by
//!   visiting entities
//! - Fail-fast API with `try_*` twins for tooling
//! - Read-only parallel iteration via rayon
//!
//! ## Example
//! ```rust
//! use archetype_store::prelude::*;
//!
//! #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
//! #[repr(C)]
//! struct Position { x: f32, y: f32 }
//!
//! #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
//! #[repr(C)]
//! struct Velocity { dx: f32, dy: f32 }
//!
//! let mut world = World::new();
//! let e = world.spawn((Position { x: 0.0, y: 0.0 }, Velocity { dx: 1.0, dy: 0.5 }));
//!
//! world.for_each2_mut::<Position, Velocity, _>(|_, p, v| {
//!     p.x += v.dx;
//!     p.y += v.dy;
//! });
//!
//! assert_eq!(world.get::<Position>(e).x, 1.0);
//! ```

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use engine::world::{World, EMPTY_ARCHETYPE};

pub use engine::config::WorldConfig;

pub use engine::entity::{
    Entity,
    EntityLocation,
};

pub use engine::component::{
    ComponentDesc,
    TypeRegistry,
};

pub use engine::bundle::{
    Component,
    ComponentSet,
};

pub use engine::archetype::Archetype;
pub use engine::storage::ColumnStorage;
pub use engine::query::ArchetypeSet;

pub use engine::commands::{
    Command,
    CommandBuffer,
};

pub use engine::error::{
    StoreResult,
    StoreError,
    SchemaError,
    LookupError,
};

pub use engine::types::{
    Signature,
    EntityID,
    ComponentID,
    ArchetypeID,
    RowID,
    COMPONENT_CAP,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used store types.
///
/// Import with:
/// ```rust
/// use archetype_store::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        World,
        WorldConfig,
        Entity,
        Component,
        ComponentSet,
        CommandBuffer,
        Signature,
        StoreError,
        StoreResult,
    };
}
