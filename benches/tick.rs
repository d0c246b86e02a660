//! Benchmarks for core world operations
//!
//! Run with: cargo bench
//!
//! Measures entity creation, attach/detach churn, and full ticks over a
//! populated world.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use signature_ecs::{Entity, Signature, System, World};

#[derive(Debug, Copy, Clone)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Copy, Clone)]
struct Velocity {
    x: f32,
    y: f32,
}

#[derive(Debug, Copy, Clone)]
struct Health(u32);

#[derive(Default)]
struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, world: &mut World, subscribers: &[Entity], dt: f32) {
        for &entity in subscribers {
            let velocity = *world.get::<Velocity>(entity);
            let position = world.get_mut::<Position>(entity);
            position.x += velocity.x * dt;
            position.y += velocity.y * dt;
        }
    }
}

fn populated_world(count: u32) -> World {
    let mut world = World::new();
    let mut required = Signature::default();
    required.set(world.component_type_id::<Position>());
    required.set(world.component_type_id::<Velocity>());
    world.register_system::<MovementSystem>(required);

    for i in 0..count {
        let entity = world.create_entity();
        world.attach(entity, Position { x: i as f32, y: 0.0 });
        world.attach(entity, Velocity { x: 1.0, y: 1.0 });
        if i % 2 == 0 {
            world.attach(entity, Health(100));
        }
    }
    world
}

fn bench_create(c: &mut Criterion) {
    c.bench_function("create_500_entities_two_components", |b| {
        b.iter(|| {
            let mut world = World::new();
            for i in 0..500 {
                let entity = world.create_entity();
                world.attach(entity, Position { x: i as f32, y: 0.0 });
                world.attach(entity, Velocity { x: 1.0, y: 1.0 });
            }
            black_box(world.live_entity_count())
        });
    });
}

fn bench_attach_detach_churn(c: &mut Criterion) {
    c.bench_function("attach_detach_churn_500", |b| {
        let mut world = populated_world(500);
        b.iter(|| {
            for i in 0..500u32 {
                let entity = world.create_entity();
                world.attach(entity, Health(i));
                world.detach::<Health>(entity);
                world.destroy_entity(entity);
            }
        });
    });
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_500_subscribers", |b| {
        let mut world = populated_world(500);
        b.iter(|| world.update(black_box(0.016)));
    });
}

criterion_group!(benches, bench_create, bench_attach_detach_churn, bench_tick);
criterion_main!(benches);
