#![allow(dead_code)]

use archetype_store::{Entity, World, WorldConfig};

pub const AGENTS_SMALL: usize = 10_000;
pub const AGENTS_MED: usize = 100_000;
pub const AGENTS_LARGE: usize = 1_000_000;

#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Wealth {
    pub value: f32,
}

#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Productivity {
    pub rate: f32,
}

pub fn make_world(row_capacity: usize) -> World {
    World::with_config(WorldConfig::default().with_row_capacity(row_capacity))
}

/// Spawns `agent_count` agents; every fourth one also moves.
pub fn populate(world: &mut World, agent_count: usize) -> Vec<Entity> {
    (0..agent_count)
        .map(|i| {
            let e = world.spawn((
                Position { x: i as f32, y: 0.0 },
                Wealth { value: 100.0 },
                Productivity { rate: 1.0 },
            ));
            if i % 4 == 0 {
                world.add_component(e, Velocity { dx: 1.0, dy: 0.5 });
            }
            e
        })
        .collect()
}
