//! World management: entity lifecycle, migration, queries and iteration.
//!
//! The [`World`] owns every piece of store state:
//!
//! * the per-world [`TypeRegistry`] (component ids and layouts, id counters),
//! * all archetypes, in a `Vec` indexed by [`ArchetypeID`], plus a
//!   signature → archetype map,
//! * the entity → location records,
//! * the archetype membership index that answers queries,
//! * the single entity-removal hook.
//!
//! ## Migration
//!
//! Adding or removing components changes an entity's signature, so its row
//! moves to another archetype:
//!
//! ```text
//! {Position}                 {Position, Velocity}
//! row 0  e1  P  ---------->  row 3  e1  P  V(new)
//! row 1  e4  P
//! row 2  e6  P  (swapped into row 0)
//! ```
//!
//! Surviving component bytes are copied into the destination row, the source
//! row is swap-removed, and the records of both the moved entity and the
//! entity swapped into the vacated row are refreshed.
//!
//! ## Borrowing model
//!
//! Structural changes need `&mut World`; every iteration adapter borrows the
//! world for its whole duration, so mutation during iteration is rejected at
//! compile time. Changes discovered while iterating are recorded in a
//! [`CommandBuffer`] and applied afterwards with [`World::apply_commands`].
//!
//! ## Failure model
//!
//! Calls that violate the schema or name a missing entity/component are
//! defects in the caller: the primary methods panic with a descriptive
//! message. Each has a `try_*` form returning [`StoreError`](crate::StoreError).

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use rayon::prelude::*;

use crate::engine::archetype::{pick_columns_mut, Archetype};
use crate::engine::bundle::{Component, ComponentSet};
use crate::engine::commands::CommandBuffer;
use crate::engine::component::{ComponentDesc, TypeRegistry};
use crate::engine::config::WorldConfig;
use crate::engine::entity::{Entity, EntityLocation, EntityLocations};
use crate::engine::error::{fail_fast, LookupError, SchemaError, StoreResult};
use crate::engine::query::{ArchetypeIndex, ArchetypeSet};
use crate::engine::types::{ArchetypeID, ComponentID, Signature};


/// Archetype holding entities without components. Created with the world.
pub const EMPTY_ARCHETYPE: ArchetypeID = 0;

type RemovalHook = Box<dyn FnMut(Entity) + Send + Sync>;

macro_rules! profile_span {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _g = tracing::info_span!($name).entered();
    };
}

/// Container of all entities, archetypes and component data.
pub struct World {
    registry: TypeRegistry,
    archetypes: Vec<Archetype>,
    signature_to_archetype: HashMap<Signature, ArchetypeID>,
    locations: EntityLocations,
    index: ArchetypeIndex,
    config: WorldConfig,
    on_removed: Option<RemovalHook>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with default settings.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world.
    ///
    /// The empty-signature archetype is created eagerly as
    /// [`EMPTY_ARCHETYPE`].

    pub fn with_config(config: WorldConfig) -> Self {
        let mut world = Self {
            registry: TypeRegistry::new(),
            archetypes: Vec::new(),
            signature_to_archetype: HashMap::new(),
            locations: EntityLocations::new(),
            index: ArchetypeIndex::new(),
            config,
            on_removed: None,
        };
        let empty = world.get_or_create_archetype(Signature::empty());
        debug_assert_eq!(empty, EMPTY_ARCHETYPE);
        world
    }

    /// Settings this world was created with.
    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Component type registry of this world.
    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Registers `T` ahead of first use and returns its id.
    pub fn register<T: Component>(&mut self) -> ComponentID {
        self.registry.register::<T>()
    }

    /// Number of live entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` when no entity is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of archetypes ever created, including empty ones.
    #[inline]
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    /// Archetype with the given id.
    #[inline]
    pub fn archetype(&self, archetype_id: ArchetypeID) -> Option<&Archetype> {
        self.archetypes.get(archetype_id as usize)
    }

    /// All archetypes in id order.
    #[inline]
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Archetype whose signature is exactly `signature`, if one exists.
    pub fn archetype_for(&self, signature: &Signature) -> Option<ArchetypeID> {
        self.signature_to_archetype.get(signature).copied()
    }

    /// Returns `true` if `entity` is live.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.locations.contains(entity)
    }

    /// Current archetype and row of `entity`.
    #[inline]
    pub fn location(&self, entity: Entity) -> Option<EntityLocation> {
        self.locations.get(entity)
    }

    /// Signature of `entity`'s archetype.
    pub fn signature_of(&self, entity: Entity) -> Option<&Signature> {
        self.locations
            .get(entity)
            .map(|location| self.archetypes[location.archetype as usize].signature())
    }

    /// Returns `true` if `entity` is live and carries `T`.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        match (self.locations.get(entity), self.registry.id_of::<T>()) {
            (Some(location), Some(component_id)) => {
                self.archetypes[location.archetype as usize].signature().has(component_id)
            }
            _ => false,
        }
    }

    /// Creates an entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.registry.next_instance_id::<Entity>());
        let row = self.archetypes[EMPTY_ARCHETYPE as usize].add_entity(&[], entity);
        self.locations.insert(entity, EntityLocation { archetype: EMPTY_ARCHETYPE, row });
        tracing::trace!(entity = entity.id(), "created entity");
        entity
    }

    /// Creates an entity carrying `bundle`.
    ///
    /// ## Panics
    /// Panics if the bundle repeats a type or the registry is full.

    pub fn spawn<B: ComponentSet>(&mut self, bundle: B) -> Entity {
        fail_fast(self.try_spawn(bundle))
    }

    /// Creates an entity carrying `bundle`, reporting schema violations.
    ///
    /// The bundle is validated before the entity exists, so a failed call
    /// leaves no trace.

    pub fn try_spawn<B: ComponentSet>(&mut self, bundle: B) -> StoreResult<Entity> {
        let (ids, added) = self.bundle_signature::<B>()?;
        let entity = self.create_entity();
        let location = self.locations.get(entity).ok_or(LookupError::UnknownEntity(entity))?;
        let destination = self.get_or_create_archetype(added);
        let payloads: Vec<(ComponentID, &[u8])> = ids.into_iter().zip(bundle.component_bytes()).collect();
        self.move_entity(entity, location, destination, &payloads);
        Ok(entity)
    }

    /// Shared reference to `entity`'s `T`.
    ///
    /// ## Panics
    /// Panics if the entity is unknown or has no `T`.

    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        fail_fast(self.try_get(entity))
    }

    /// Mutable reference to `entity`'s `T`.
    ///
    /// ## Panics
    /// Panics if the entity is unknown or has no `T`.

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        fail_fast(self.try_get_mut(entity))
    }

    /// Shared reference to `entity`'s `T`, or why it is unavailable.
    pub fn try_get<T: Component>(&self, entity: Entity) -> Result<&T, LookupError> {
        let (location, column) = self.component_slot::<T>(entity)?;
        Ok(self.archetypes[location.archetype as usize].column(column).get::<T>(location.row))
    }

    /// Mutable reference to `entity`'s `T`, or why it is unavailable.
    pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, LookupError> {
        let (location, column) = self.component_slot::<T>(entity)?;
        let archetype = &mut self.archetypes[location.archetype as usize];
        let (_, columns) = archetype.entities_and_columns_mut();
        Ok(columns[column].get_mut::<T>(location.row))
    }

    /// Adds a single component to `entity`.
    ///
    /// ## Panics
    /// As [`add_components`](Self::add_components).

    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) {
        self.add_components(entity, (value,));
    }

    /// Adds every component of `bundle` to `entity`, moving it to the
    /// archetype of its extended signature.
    ///
    /// ## Panics
    /// - the entity is unknown;
    /// - the bundle repeats a type;
    /// - the entity already carries one of the bundle's types.

    pub fn add_components<B: ComponentSet>(&mut self, entity: Entity, bundle: B) {
        fail_fast(self.try_add_components(entity, bundle))
    }

    /// Adds every component of `bundle` to `entity`, reporting violations.
    ///
    /// On error the world is unchanged, apart from newly registered types.

    pub fn try_add_components<B: ComponentSet>(&mut self, entity: Entity, bundle: B) -> StoreResult<()> {
        profile_span!("World::add_components");

        let location = self.locations.get(entity).ok_or(LookupError::UnknownEntity(entity))?;
        let (ids, added) = self.bundle_signature::<B>()?;

        let current = self.archetypes[location.archetype as usize].signature();
        if let Some(position) = ids.iter().position(|&id| current.has(id)) {
            return Err(SchemaError::AlreadyPresent { entity, name: B::type_names()[position] }.into());
        }

        let target = current + &added;
        let destination = self.get_or_create_archetype(target);
        let payloads: Vec<(ComponentID, &[u8])> = ids.into_iter().zip(bundle.component_bytes()).collect();
        self.move_entity(entity, location, destination, &payloads);
        Ok(())
    }

    /// Removes the component types of `B` from `entity`, dropping their values.
    ///
    /// ## Panics
    /// Panics if the entity is unknown, `B` repeats a type, or the entity
    /// lacks one of `B`'s types.

    pub fn remove_components<B: ComponentSet>(&mut self, entity: Entity) {
        fail_fast(self.try_remove_components::<B>(entity))
    }

    /// Removes the component types of `B` from `entity`, reporting violations.
    pub fn try_remove_components<B: ComponentSet>(&mut self, entity: Entity) -> StoreResult<()> {
        profile_span!("World::remove_components");

        let location = self.locations.get(entity).ok_or(LookupError::UnknownEntity(entity))?;
        let current = self.archetypes[location.archetype as usize].signature();

        let mut ids = Vec::with_capacity(B::LEN);
        for (position, id) in B::lookup(&self.registry).into_iter().enumerate() {
            let name = B::type_names()[position];
            match id {
                Some(id) if current.has(id) => ids.push(id),
                Some(_) => return Err(LookupError::MissingComponent { entity, name }.into()),
                None => return Err(LookupError::Unregistered { name }.into()),
            }
        }
        let removed = Signature::try_new(&ids)?;

        let target = current.difference(&removed);
        let destination = self.get_or_create_archetype(target);
        self.move_entity(entity, location, destination, &[]);
        Ok(())
    }

    /// Destroys `entity` and all its components, then runs the removal hook.
    ///
    /// ## Panics
    /// Panics if the entity is unknown.

    pub fn remove_entity(&mut self, entity: Entity) {
        fail_fast(self.try_remove_entity(entity))
    }

    /// Destroys `entity`, or reports that it does not exist.
    pub fn try_remove_entity(&mut self, entity: Entity) -> Result<(), LookupError> {
        let location = self.locations.remove(entity).ok_or(LookupError::UnknownEntity(entity))?;
        if let Some(swapped) = self.archetypes[location.archetype as usize].remove_entity(location.row) {
            self.locations.set_row(swapped, location.row);
        }
        tracing::trace!(
            entity = entity.id(),
            archetype = location.archetype,
            row = location.row,
            "removed entity"
        );

        if let Some(hook) = self.on_removed.as_mut() {
            hook(entity);
        }
        Ok(())
    }

    /// Installs the callback invoked after an entity is removed.
    ///
    /// Replaces any previous callback.
    pub fn on_entity_removed<F>(&mut self, callback: F)
    where
        F: FnMut(Entity) + Send + Sync + 'static,
    {
        self.on_removed = Some(Box::new(callback));
    }

    /// Archetypes whose signature contains every type of `Q`.
    ///
    /// Types never registered in this world match nothing.
    pub fn query<Q: ComponentSet>(&self) -> ArchetypeSet {
        profile_span!("World::query");
        self.index.matching(&Q::lookup(&self.registry))
    }

    /// Calls `f` for every entity carrying `A`.
    pub fn for_each1<A, F>(&self, mut f: F)
    where
        A: Component,
        F: FnMut(Entity, &A),
    {
        profile_span!("World::for_each1");
        let Some([a]) = self.query_ids::<(A,), 1>() else { return };
        for archetype in self.matching_archetypes(&[a]) {
            let a = column_slice::<A>(archetype, a);
            for (entity, a) in archetype.entities().iter().zip(a) {
                f(*entity, a);
            }
        }
    }

    /// Calls `f` for every entity carrying `A` and `B`.
    pub fn for_each2<A, B, F>(&self, mut f: F)
    where
        A: Component,
        B: Component,
        F: FnMut(Entity, &A, &B),
    {
        profile_span!("World::for_each2");
        let Some([a, b]) = self.query_ids::<(A, B), 2>() else { return };
        for archetype in self.matching_archetypes(&[a, b]) {
            let a = column_slice::<A>(archetype, a);
            let b = column_slice::<B>(archetype, b);
            for ((entity, a), b) in archetype.entities().iter().zip(a).zip(b) {
                f(*entity, a, b);
            }
        }
    }

    /// Calls `f` for every entity carrying `A`, `B` and `C`.
    pub fn for_each3<A, B, C, F>(&self, mut f: F)
    where
        A: Component,
        B: Component,
        C: Component,
        F: FnMut(Entity, &A, &B, &C),
    {
        profile_span!("World::for_each3");
        let Some([a, b, c]) = self.query_ids::<(A, B, C), 3>() else { return };
        for archetype in self.matching_archetypes(&[a, b, c]) {
            let a = column_slice::<A>(archetype, a);
            let b = column_slice::<B>(archetype, b);
            let c = column_slice::<C>(archetype, c);
            for (((entity, a), b), c) in archetype.entities().iter().zip(a).zip(b).zip(c) {
                f(*entity, a, b, c);
            }
        }
    }

    /// Calls `f` with mutable access to every entity's `A`.
    pub fn for_each1_mut<A, F>(&mut self, mut f: F)
    where
        A: Component,
        F: FnMut(Entity, &mut A),
    {
        profile_span!("World::for_each1_mut");
        let Some([a]) = self.query_ids::<(A,), 1>() else { return };
        let matched = self.index.matching(&[Some(a)]);
        for archetype_id in matched.iter() {
            let archetype = &mut self.archetypes[archetype_id as usize];
            let [ia] = column_indices(archetype, [a]);
            let (entities, columns) = archetype.entities_and_columns_mut();
            let [ca] = pick_columns_mut(columns, [ia]);
            for (entity, a) in entities.iter().zip(ca.as_slice_mut::<A>()) {
                f(*entity, a);
            }
        }
    }

    /// Calls `f` with mutable access to every entity's `A` and `B`.
    ///
    /// ## Panics
    /// Panics if `A` and `B` are the same type.

    pub fn for_each2_mut<A, B, F>(&mut self, mut f: F)
    where
        A: Component,
        B: Component,
        F: FnMut(Entity, &mut A, &mut B),
    {
        profile_span!("World::for_each2_mut");
        assert_distinct(&[TypeId::of::<A>(), TypeId::of::<B>()]);
        let Some([a, b]) = self.query_ids::<(A, B), 2>() else { return };
        let matched = self.index.matching(&[Some(a), Some(b)]);
        for archetype_id in matched.iter() {
            let archetype = &mut self.archetypes[archetype_id as usize];
            let indices = column_indices(archetype, [a, b]);
            let (entities, columns) = archetype.entities_and_columns_mut();
            let [ca, cb] = pick_columns_mut(columns, indices);
            let rows = entities.iter().zip(ca.as_slice_mut::<A>()).zip(cb.as_slice_mut::<B>());
            for ((entity, a), b) in rows {
                f(*entity, a, b);
            }
        }
    }

    /// Calls `f` with mutable access to every entity's `A`, `B` and `C`.
    ///
    /// ## Panics
    /// Panics if any two of the types are the same.

    pub fn for_each3_mut<A, B, C, F>(&mut self, mut f: F)
    where
        A: Component,
        B: Component,
        C: Component,
        F: FnMut(Entity, &mut A, &mut B, &mut C),
    {
        profile_span!("World::for_each3_mut");
        assert_distinct(&[TypeId::of::<A>(), TypeId::of::<B>(), TypeId::of::<C>()]);
        let Some([a, b, c]) = self.query_ids::<(A, B, C), 3>() else { return };
        let matched = self.index.matching(&[Some(a), Some(b), Some(c)]);
        for archetype_id in matched.iter() {
            let archetype = &mut self.archetypes[archetype_id as usize];
            let indices = column_indices(archetype, [a, b, c]);
            let (entities, columns) = archetype.entities_and_columns_mut();
            let [ca, cb, cc] = pick_columns_mut(columns, indices);
            let rows = entities
                .iter()
                .zip(ca.as_slice_mut::<A>())
                .zip(cb.as_slice_mut::<B>())
                .zip(cc.as_slice_mut::<C>());
            for (((entity, a), b), c) in rows {
                f(*entity, a, b, c);
            }
        }
    }

    /// Parallel read-only iteration over every entity carrying `A`.
    ///
    /// One rayon task per matching archetype; rows within an archetype run
    /// sequentially.

    pub fn par_for_each1<A, F>(&self, f: F)
    where
        A: Component,
        F: Fn(Entity, &A) + Send + Sync,
    {
        profile_span!("World::par_for_each1");
        let Some([a]) = self.query_ids::<(A,), 1>() else { return };
        let matched: Vec<&Archetype> = self.matching_archetypes(&[a]).collect();
        matched.par_iter().for_each(|archetype| {
            let values = column_slice::<A>(archetype, a);
            for (entity, value) in archetype.entities().iter().zip(values) {
                f(*entity, value);
            }
        });
    }

    /// Parallel read-only iteration over every entity carrying `A` and `B`.
    pub fn par_for_each2<A, B, F>(&self, f: F)
    where
        A: Component,
        B: Component,
        F: Fn(Entity, &A, &B) + Send + Sync,
    {
        profile_span!("World::par_for_each2");
        let Some([a, b]) = self.query_ids::<(A, B), 2>() else { return };
        let matched: Vec<&Archetype> = self.matching_archetypes(&[a, b]).collect();
        matched.par_iter().for_each(|archetype| {
            let first = column_slice::<A>(archetype, a);
            let second = column_slice::<B>(archetype, b);
            for ((entity, a), b) in archetype.entities().iter().zip(first).zip(second) {
                f(*entity, a, b);
            }
        });
    }

    /// Applies and drains every command in `commands`, in recording order.
    ///
    /// Commands that fail (typically because their entity was already
    /// removed) are skipped with a warning. Returns the number applied.

    pub fn apply_commands(&mut self, commands: &mut CommandBuffer) -> usize {
        profile_span!("World::apply_commands");
        let mut applied = 0;
        for command in commands.drain() {
            let kind = command.kind();
            let target = command.entity();
            match command.apply(self) {
                Ok(_) => applied += 1,
                Err(error) => {
                    tracing::warn!(command = kind, entity = ?target, %error, "skipped deferred command");
                }
            }
        }
        applied
    }

    /// Returns the archetype for `signature`, creating it on first use.
    ///
    /// ## Panics
    /// Panics if a component of `signature` is not registered in this world.

    fn get_or_create_archetype(&mut self, signature: Signature) -> ArchetypeID {
        if let Some(&archetype_id) = self.signature_to_archetype.get(&signature) {
            return archetype_id;
        }

        let components: Vec<(ComponentID, ComponentDesc)> = signature
            .ids()
            .iter()
            .map(|&id| match self.registry.description(id) {
                Some(desc) => (id, *desc),
                None => panic!("component {id} is not registered in this world"),
            })
            .collect();

        let archetype_id = archetype_id_from(self.registry.next_instance_id::<Archetype>());
        assert_eq!(
            archetype_id as usize,
            self.archetypes.len(),
            "archetype ids must index the archetype table"
        );

        let archetype = Archetype::new(archetype_id, signature.clone(), &components, self.config.row_capacity);
        self.index.register(archetype_id, &signature);
        self.archetypes.push(archetype);

        tracing::debug!(
            archetype = archetype_id,
            components = ?components.iter().map(|(_, desc)| desc.name).collect::<Vec<_>>(),
            "created archetype"
        );

        self.signature_to_archetype.insert(signature, archetype_id);
        archetype_id
    }

    /// Moves `entity` from `location` to a new row of `destination`.
    ///
    /// `added` supplies the bytes of components the source does not have.
    /// Every source component also present in the destination is copied;
    /// the rest are dropped.

    fn move_entity(
        &mut self,
        entity: Entity,
        location: EntityLocation,
        destination: ArchetypeID,
        added: &[(ComponentID, &[u8])],
    ) {
        let (source, target) = get_archetype_pair_mut(&mut self.archetypes, location.archetype, destination);

        let mut transfer: Vec<(ComponentID, &[u8])> = Vec::with_capacity(target.signature().len());
        transfer.extend_from_slice(added);
        for (column, &component_id) in source.signature().ids().iter().enumerate() {
            if target.signature().has(component_id) {
                transfer.push((component_id, source.component_bytes(location.row, column)));
            }
        }

        let row = target.add_entity(&transfer, entity);

        if let Some(swapped) = source.remove_entity(location.row) {
            self.locations.set_row(swapped, location.row);
        }
        self.locations.set(entity, EntityLocation { archetype: destination, row });

        tracing::trace!(
            entity = entity.id(),
            from = location.archetype,
            to = destination,
            row,
            "migrated entity"
        );
    }

    /// Registers every type of `B` and builds their signature.
    fn bundle_signature<B: ComponentSet>(&mut self) -> Result<(Vec<ComponentID>, Signature), SchemaError> {
        let ids = B::try_register(&mut self.registry)?;
        let signature = Signature::try_new(&ids)?;
        Ok((ids, signature))
    }

    fn component_slot<T: Component>(&self, entity: Entity) -> Result<(EntityLocation, usize), LookupError> {
        let location = self.locations.get(entity).ok_or(LookupError::UnknownEntity(entity))?;
        let name = type_name::<T>();
        let component_id = self.registry.id_of::<T>().ok_or(LookupError::Unregistered { name })?;
        let column = self.archetypes[location.archetype as usize]
            .signature()
            .index_of(component_id)
            .ok_or(LookupError::MissingComponent { entity, name })?;
        Ok((location, column))
    }

    /// Ids of every type in `Q`, or `None` if any was never registered.
    fn query_ids<Q: ComponentSet, const N: usize>(&self) -> Option<[ComponentID; N]> {
        let ids: Option<Vec<ComponentID>> = Q::lookup(&self.registry).into_iter().collect();
        ids?.try_into().ok()
    }

    fn matching_archetypes<'w>(&'w self, ids: &[ComponentID]) -> impl Iterator<Item = &'w Archetype> + 'w {
        let required: Vec<Option<ComponentID>> = ids.iter().copied().map(Some).collect();
        let matched = self.index.matching(&required);
        let ids: Vec<ArchetypeID> = matched.iter().collect();
        ids.into_iter().map(move |id| &self.archetypes[id as usize])
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.locations.len())
            .field("archetypes", &self.archetypes.len())
            .field("components", &self.registry.len())
            .finish()
    }
}

/// Splits the archetype table into two distinct mutable archetypes.
///
/// ## Panics
/// Panics if `first == second` or either id is out of range.

fn get_archetype_pair_mut(
    archetypes: &mut [Archetype],
    first: ArchetypeID,
    second: ArchetypeID,
) -> (&mut Archetype, &mut Archetype) {
    let (first, second) = (first as usize, second as usize);
    assert_ne!(first, second, "source and destination archetype must differ");

    if first < second {
        let (low, high) = archetypes.split_at_mut(second);
        (&mut low[first], &mut high[0])
    } else {
        let (low, high) = archetypes.split_at_mut(first);
        (&mut high[0], &mut low[second])
    }
}

fn archetype_id_from(raw: u64) -> ArchetypeID {
    ArchetypeID::try_from(raw).unwrap_or_else(|_| panic!("archetype id {raw} exceeds the ArchetypeID range"))
}

fn column_indices<const N: usize>(archetype: &Archetype, ids: [ComponentID; N]) -> [usize; N] {
    ids.map(|id| match archetype.signature().index_of(id) {
        Some(column) => column,
        None => panic!("archetype {} matched a query but lacks component {id}", archetype.id()),
    })
}

fn column_slice<T: Component>(archetype: &Archetype, component_id: ComponentID) -> &[T] {
    let [column] = column_indices(archetype, [component_id]);
    archetype.column(column).as_slice::<T>()
}

fn assert_distinct(types: &[TypeId]) {
    for (i, a) in types.iter().enumerate() {
        assert!(
            !types[i + 1..].contains(a),
            "mutable iteration requires distinct component types"
        );
    }
}
