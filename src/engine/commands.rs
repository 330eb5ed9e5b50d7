//! # Commands
//!
//! Deferred structural changes to a [`World`].
//!
//! ## Purpose
//! Iteration borrows the world, so entities cannot be created, destroyed or
//! migrated from inside a `for_each*` callback. Callbacks record [`Command`]s
//! in a [`CommandBuffer`] instead, and [`World::apply_commands`] replays them
//! once iteration has finished.
//!
//! ## Design
//! - Commands carry typed bundles behind boxed closures, so one buffer can
//!   hold any mix of component sets.
//! - The buffer is a FIFO: commands apply in the order they were recorded.
//! - A command whose target no longer exists (for example despawned by an
//!   earlier command) is skipped with a `warn` event; it never aborts the
//!   remaining commands.

use std::fmt;

use crate::engine::bundle::ComponentSet;
use crate::engine::entity::Entity;
use crate::engine::error::StoreResult;
use crate::engine::world::World;


type SpawnFn = Box<dyn FnOnce(&mut World) -> StoreResult<Entity> + Send>;
type EntityFn = Box<dyn FnOnce(&mut World, Entity) -> StoreResult<()> + Send>;

/// A deferred world mutation.
pub enum Command {
    /// Creates an entity carrying a bundle.
    Spawn {
        /// Inserts the recorded bundle into a fresh entity.
        apply: SpawnFn,
    },

    /// Adds a bundle to an existing entity.
    Insert {
        /// Target entity.
        entity: Entity,
        /// Migrates the entity, adding the recorded bundle.
        apply: EntityFn,
    },

    /// Removes a set of component types from an existing entity.
    Remove {
        /// Target entity.
        entity: Entity,
        /// Migrates the entity, dropping the recorded types.
        apply: EntityFn,
    },

    /// Destroys an entity.
    Despawn {
        /// Entity to remove.
        entity: Entity,
    },
}

impl Command {
    /// Short name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Spawn { .. } => "spawn",
            Command::Insert { .. } => "insert",
            Command::Remove { .. } => "remove",
            Command::Despawn { .. } => "despawn",
        }
    }

    /// Target entity, if the command has one.
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Command::Spawn { .. } => None,
            Command::Insert { entity, .. }
            | Command::Remove { entity, .. }
            | Command::Despawn { entity } => Some(*entity),
        }
    }

    /// Applies the command.
    ///
    /// Returns the spawned entity for [`Command::Spawn`].
    pub fn apply(self, world: &mut World) -> StoreResult<Option<Entity>> {
        match self {
            Command::Spawn { apply } => apply(world).map(Some),
            Command::Insert { entity, apply } | Command::Remove { entity, apply } => {
                apply(world, entity).map(|_| None)
            }
            Command::Despawn { entity } => {
                world.try_remove_entity(entity)?;
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Command");
        out.field("kind", &self.kind());
        if let Some(entity) = self.entity() {
            out.field("entity", &entity);
        }
        out.finish()
    }
}

/// Ordered queue of deferred commands.
#[derive(Default, Debug)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records creation of an entity carrying `bundle`.
    pub fn spawn<B: ComponentSet>(&mut self, bundle: B) {
        self.commands.push(Command::Spawn {
            apply: Box::new(move |world: &mut World| world.try_spawn(bundle)),
        });
    }

    /// Records adding `bundle` to `entity`.
    pub fn insert<B: ComponentSet>(&mut self, entity: Entity, bundle: B) {
        self.commands.push(Command::Insert {
            entity,
            apply: Box::new(move |world: &mut World, entity: Entity| world.try_add_components(entity, bundle)),
        });
    }

    /// Records removing the component types of `B` from `entity`.
    pub fn remove<B: ComponentSet>(&mut self, entity: Entity) {
        self.commands.push(Command::Remove {
            entity,
            apply: Box::new(|world: &mut World, entity: Entity| world.try_remove_components::<B>(entity)),
        });
    }

    /// Records destruction of `entity`.
    pub fn despawn(&mut self, entity: Entity) {
        self.commands.push(Command::Despawn { entity });
    }

    /// Number of pending commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Removes every pending command in recording order.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.commands.drain(..)
    }
}
