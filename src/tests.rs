// Copyright 2025 The signature_ecs developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! World-level integration tests.

use std::collections::BTreeSet;

use crate::entity::Entity;
use crate::signature::Signature;
use crate::system::System;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy)]
struct Tag;

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

fn movement_signature(world: &mut World) -> Signature {
    let mut required = Signature::default();
    required.set(world.component_type_id::<Position>());
    required.set(world.component_type_id::<Velocity>());
    required
}

#[test]
fn test_attach_detach_scenario() {
    let mut world = World::new();
    let e1 = world.create_entity();

    world.attach(e1, Position { x: 0.0, y: 0.0 });
    world.attach(e1, Velocity { x: 1.0, y: 1.0 });

    // First-use order assigns CTID 0 to Position, CTID 1 to Velocity.
    let mut both = Signature::default();
    both.set(world.component_type_id::<Position>());
    both.set(world.component_type_id::<Velocity>());
    assert_eq!(world.signature(e1), both);
    assert_eq!(
        world.entities_with_signature(both),
        [e1].into_iter().collect::<BTreeSet<Entity>>()
    );

    world.detach::<Position>(e1);
    let mut velocity_only = Signature::default();
    velocity_only.set(world.component_type_id::<Velocity>());
    assert_eq!(world.signature(e1), velocity_only);
    assert!(world.entities_with_signature(both).is_empty());
    assert!(world.entities_with_signature(velocity_only).contains(&e1));
    assert!(!world.has::<Position>(e1));
    assert!(world.has::<Velocity>(e1));
}

#[test]
fn test_attach_round_trip_and_idempotence() {
    let mut world = World::new();
    let entity = world.create_entity();

    world.attach(entity, Position { x: 3.0, y: 4.0 });
    assert_eq!(*world.get::<Position>(entity), Position { x: 3.0, y: 4.0 });

    // Re-attach keeps the first value.
    let stored = world.attach(entity, Position { x: 9.0, y: 9.0 });
    assert_eq!(*stored, Position { x: 3.0, y: 4.0 });

    world.detach::<Position>(entity);
    assert!(!world.has::<Position>(entity));
}

#[test]
fn test_subscription_follows_signature_changes() {
    let mut world = World::new();
    let required = movement_signature(&mut world);
    world.register_system::<MovementSystem>(required);
    assert!(world.subscribers::<MovementSystem>().unwrap().is_empty());

    let e1 = world.create_entity();
    world.attach(e1, Position { x: 0.0, y: 0.0 });
    assert!(world.subscribers::<MovementSystem>().unwrap().is_empty());

    world.attach(e1, Velocity { x: 1.0, y: 0.0 });
    assert_eq!(
        world.subscribers::<MovementSystem>().unwrap(),
        &[e1].into_iter().collect::<BTreeSet<Entity>>()
    );

    world.detach::<Velocity>(e1);
    assert!(world.subscribers::<MovementSystem>().unwrap().is_empty());
}

#[test]
fn test_superset_signature_still_subscribes() {
    let mut world = World::new();
    let required = movement_signature(&mut world);
    world.register_system::<MovementSystem>(required);

    let entity = world.create_entity();
    world.attach(entity, Position { x: 0.0, y: 0.0 });
    world.attach(entity, Velocity { x: 0.0, y: 0.0 });
    world.attach(entity, Tag);

    // Signature is a strict superset of the requirement.
    assert_ne!(world.signature(entity), required);
    assert!(world.subscribers::<MovementSystem>().unwrap().contains(&entity));
}

#[test]
fn test_destroy_removes_from_subscribers() {
    let mut world = World::new();
    let required = movement_signature(&mut world);
    world.register_system::<MovementSystem>(required);

    let entity = world.create_entity();
    world.attach(entity, Position { x: 0.0, y: 0.0 });
    world.attach(entity, Velocity { x: 0.0, y: 0.0 });
    assert!(!world.subscribers::<MovementSystem>().unwrap().is_empty());

    world.destroy_entity(entity);
    assert!(world.subscribers::<MovementSystem>().unwrap().is_empty());
    assert!(!world.is_alive(entity));

    // Destroying again stays a no-op.
    world.destroy_entity(entity);
    assert_eq!(world.live_entity_count(), 0);
}

#[test]
fn test_update_moves_only_subscribers() {
    let mut world = World::new();
    let required = movement_signature(&mut world);
    world.register_system::<MovementSystem>(required);

    let moving = world.create_entity();
    world.attach(moving, Position { x: 0.0, y: 0.0 });
    world.attach(moving, Velocity { x: 2.0, y: -1.0 });

    let parked = world.create_entity();
    world.attach(parked, Position { x: 5.0, y: 5.0 });

    world.update(0.5);
    world.update(0.5);

    assert_eq!(*world.get::<Position>(moving), Position { x: 2.0, y: -1.0 });
    assert_eq!(*world.get::<Position>(parked), Position { x: 5.0, y: 5.0 });
}

#[test]
fn test_bucket_union_covers_live_entities_once() {
    let mut world = World::new();
    let mut entities = Vec::new();
    for i in 0..6u32 {
        let entity = world.create_entity();
        if i % 2 == 0 {
            world.attach(entity, Position { x: 0.0, y: 0.0 });
        }
        if i % 3 == 0 {
            world.attach(entity, Velocity { x: 0.0, y: 0.0 });
        }
        entities.push(entity);
    }
    world.destroy_entity(entities[4]);

    let patterns: BTreeSet<Signature> = entities
        .iter()
        .filter(|&&entity| world.is_alive(entity))
        .map(|&entity| world.signature(entity))
        .collect();

    let mut seen = BTreeSet::new();
    let mut total = 0;
    for pattern in patterns {
        let bucket = world.entities_with_signature(pattern);
        for &entity in &bucket {
            assert_eq!(world.signature(entity), pattern);
            assert!(seen.insert(entity), "{entity} appears in two buckets");
        }
        total += bucket.len();
    }
    assert_eq!(total, world.live_entity_count());
}

// Attaching during a tick must reach the membership tables immediately:
// a system running later in the same tick snapshots its subscribers just
// before its own update and therefore sees the change.
#[derive(Default)]
struct TaggingSystem;

impl System for TaggingSystem {
    fn name(&self) -> &'static str {
        "tagging"
    }

    fn update(&mut self, world: &mut World, subscribers: &[Entity], _dt: f32) {
        for &entity in subscribers {
            if !world.has::<Tag>(entity) {
                world.attach(entity, Tag);
            }
        }
    }
}

#[derive(Default)]
struct TagEraser;

impl System for TagEraser {
    fn name(&self) -> &'static str {
        "tag_eraser"
    }

    fn update(&mut self, world: &mut World, subscribers: &[Entity], _dt: f32) {
        for &entity in subscribers {
            world.detach::<Tag>(entity);
        }
    }
}

#[test]
fn test_attach_during_update_notifies_memberships() {
    let mut world = World::new();

    let mut tag_only = Signature::default();
    tag_only.set(world.component_type_id::<Tag>());
    let mut position_only = Signature::default();
    position_only.set(world.component_type_id::<Position>());

    // The tagger runs first each tick, the eraser second.
    world.register_system::<TaggingSystem>(position_only);
    world.register_system::<TagEraser>(tag_only);

    let entity = world.create_entity();
    world.attach(entity, Position { x: 0.0, y: 0.0 });

    // Within one tick: the tagger attaches Tag, which must subscribe the
    // entity to the eraser immediately; the eraser then strips it again.
    // If the mid-tick notification were lost, the Tag would survive.
    world.update(0.0);
    assert!(!world.has::<Tag>(entity));
    assert!(world.subscribers::<TagEraser>().unwrap().is_empty());
}

#[derive(Default)]
struct DespawnSystem;

impl System for DespawnSystem {
    fn name(&self) -> &'static str {
        "despawn"
    }

    fn update(&mut self, world: &mut World, subscribers: &[Entity], _dt: f32) {
        for &entity in subscribers {
            world.destroy_entity(entity);
        }
    }
}

#[test]
fn test_destroy_during_update() {
    let mut world = World::new();
    let mut tag_only = Signature::default();
    tag_only.set(world.component_type_id::<Tag>());
    world.register_system::<DespawnSystem>(tag_only);

    let doomed = world.create_entity();
    world.attach(doomed, Tag);
    let survivor = world.create_entity();
    world.attach(survivor, Position { x: 0.0, y: 0.0 });

    world.update(0.0);
    assert!(!world.is_alive(doomed));
    assert!(world.is_alive(survivor));
    assert!(world.subscribers::<DespawnSystem>().unwrap().is_empty());
}

#[test]
fn test_empty_required_signature_matches_any_change() {
    let mut world = World::new();
    world.register_system::<TaggingSystem>(Signature::EMPTY);

    // Seeding uses the exact empty bucket, so fresh entities qualify.
    let fresh = world.create_entity();
    assert!(world
        .entities_with_signature(Signature::EMPTY)
        .contains(&fresh));

    world.register_system::<TagEraser>(Signature::EMPTY);
    assert!(world.subscribers::<TagEraser>().unwrap().contains(&fresh));

    // Any later signature satisfies the empty requirement.
    world.attach(fresh, Position { x: 0.0, y: 0.0 });
    assert!(world.subscribers::<TagEraser>().unwrap().contains(&fresh));
}
