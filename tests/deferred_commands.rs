use archetype_store::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Health(i32);

#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Poisoned(u32);

#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Corpse(u32);

#[test]
fn despawn_during_iteration_is_deferred() {
    let mut world = World::new();
    let alive = world.spawn((Health(10),));
    let dead = world.spawn((Health(0),));

    let mut commands = CommandBuffer::new();
    world.for_each1::<Health, _>(|e, h| {
        if h.0 <= 0 {
            commands.despawn(e);
            commands.spawn((Corpse(e.id() as u32),));
        }
    });

    assert_eq!(world.entity_count(), 2);
    assert_eq!(world.apply_commands(&mut commands), 2);
    assert!(commands.is_empty());

    assert!(world.contains(alive));
    assert!(!world.contains(dead));
    assert_eq!(world.query::<(Corpse,)>().len(), 1);

    let mut corpses = Vec::new();
    world.for_each1::<Corpse, _>(|_, c| corpses.push(c.0));
    assert_eq!(corpses, vec![dead.id() as u32]);
}

#[test]
fn insert_and_remove_apply_in_order() {
    let mut world = World::new();
    let e = world.spawn((Health(5),));

    let mut commands = CommandBuffer::new();
    commands.insert(e, (Poisoned(3),));
    commands.remove::<(Health,)>(e);
    world.apply_commands(&mut commands);

    assert!(!world.has::<Health>(e));
    assert_eq!(*world.get::<Poisoned>(e), Poisoned(3));
}

#[test]
fn commands_for_missing_entities_are_skipped() {
    let mut world = World::new();
    let e = world.spawn((Health(1),));

    let mut commands = CommandBuffer::new();
    commands.despawn(e);
    commands.insert(e, (Poisoned(1),));
    commands.despawn(e);
    commands.spawn((Health(2),));

    // despawn and spawn apply; the later insert and despawn find nothing
    assert_eq!(world.apply_commands(&mut commands), 2);
    assert!(!world.contains(e));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn invalid_structural_commands_do_not_abort_the_batch() {
    let mut world = World::new();
    let e = world.spawn((Health(1),));

    let mut commands = CommandBuffer::new();
    commands.insert(e, (Health(2),));
    commands.remove::<(Poisoned,)>(e);
    commands.insert(e, (Poisoned(9),));

    assert_eq!(world.apply_commands(&mut commands), 1);
    assert_eq!(*world.get::<Health>(e), Health(1));
    assert_eq!(*world.get::<Poisoned>(e), Poisoned(9));
}

#[test]
fn poison_tick_with_deferred_cleanup() {
    let mut world = World::new();
    let victims: Vec<_> = (0..5).map(|i| world.spawn((Health(i * 2), Poisoned(3)))).collect();
    let bystander = world.spawn((Health(1),));

    let mut commands = CommandBuffer::new();
    for _ in 0..2 {
        world.for_each2_mut::<Health, Poisoned, _>(|_, h, p| h.0 -= p.0 as i32);
        world.for_each2::<Health, Poisoned, _>(|e, h, _| {
            if h.0 <= 0 {
                commands.despawn(e);
            }
        });
        world.apply_commands(&mut commands);
    }

    // 0 and 2 die in the first tick, 4 and 6 in the second (6 → 3 → 0)
    let survivors: Vec<_> = victims.iter().filter(|&&e| world.contains(e)).copied().collect();
    assert_eq!(survivors, vec![victims[4]]);
    assert_eq!(*world.get::<Health>(victims[4]), Health(2));
    assert_eq!(*world.get::<Health>(bystander), Health(1));
}
