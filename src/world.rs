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

//! World: the composition layer over entity and system registries.
//!
//! The world forwards every call to the owning registry and keeps the two
//! in sync: after each attach/detach it re-reads the affected entity's
//! signature and pushes a membership notification into the system
//! registry, and on destroy it pushes the unconditional removal. The
//! registries never talk to each other directly.

use std::collections::BTreeSet;

use crate::component::Component;
use crate::entity::Entity;
use crate::registry::EntityRegistry;
use crate::signature::{ComponentTypeId, Signature};
use crate::system::{MembershipChange, System, SystemRegistry};

/// Central ECS world owning all entities, components, and systems.
#[derive(Default)]
pub struct World {
    entities: EntityRegistry,
    systems: SystemRegistry,
}

impl World {
    /// Create a new, empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityRegistry::new(),
            systems: SystemRegistry::new(),
        }
    }

    /// Create an entity with an all-zero signature.
    ///
    /// A fresh entity matches no system (except one requiring nothing), so
    /// no membership notification is needed here.
    ///
    /// # Panics
    /// Panics when all [`MAX_ENTITIES`](crate::limits::MAX_ENTITIES) IDs
    /// are live.
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Destroy an entity and drop it from every subscriber set.
    /// No-op on the registry side when `entity` is not live.
    pub fn destroy_entity(&mut self, entity: Entity) {
        self.entities.destroy(entity);
        self.systems
            .apply(MembershipChange::Destroyed, entity, Signature::EMPTY);
    }

    /// Whether `entity` is currently live.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of live entities.
    pub fn live_entity_count(&self) -> usize {
        self.entities.live_count()
    }

    /// Signature of `entity`; all-zero for IDs that are not live.
    pub fn signature(&self, entity: Entity) -> Signature {
        self.entities.signature(entity)
    }

    /// Entities whose signature equals `signature` exactly (not the
    /// superset match systems use).
    pub fn entities_with_signature(&self, signature: Signature) -> BTreeSet<Entity> {
        self.entities.entities_with_signature(signature)
    }

    /// Type ID for `T`, assigning one on first use.
    ///
    /// Useful for building a required [`Signature`] before any entity owns
    /// the types in question.
    pub fn component_type_id<T: Component>(&mut self) -> ComponentTypeId {
        self.entities.component_type_id::<T>()
    }

    /// Attach `value` to `entity` and re-derive its system memberships.
    ///
    /// Returns the stored component; on re-attach that is the previously
    /// stored value, unchanged.
    ///
    /// # Panics
    /// Panics when `entity` is not live.
    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        self.entities.attach(entity, value);
        let signature = self.entities.signature(entity);
        self.systems
            .apply(MembershipChange::SignatureUpdated, entity, signature);
        self.entities.get_mut::<T>(entity)
    }

    /// Detach `entity`'s `T` and re-derive its system memberships.
    ///
    /// # Panics
    /// Panics when `entity` is not live.
    pub fn detach<T: Component>(&mut self, entity: Entity) {
        self.entities.detach::<T>(entity);
        let signature = self.entities.signature(entity);
        self.systems
            .apply(MembershipChange::SignatureUpdated, entity, signature);
    }

    /// Whether `entity` owns a `T`.
    ///
    /// # Panics
    /// Panics when `entity` is not live.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.entities.has::<T>(entity)
    }

    /// Get `entity`'s `T`.
    ///
    /// # Panics
    /// Panics when `entity` is not live or owns no `T`.
    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        self.entities.get::<T>(entity)
    }

    /// Mutable variant of [`get`](Self::get), same preconditions.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        self.entities.get_mut::<T>(entity)
    }

    /// Register system `S` with a required signature, then seed its
    /// subscribers from the entities whose signature currently equals
    /// `required` exactly.
    ///
    /// Seeding is the only exact-pattern step in the subscription life
    /// cycle; every later membership change uses the superset test.
    /// Entities already carrying a strict superset of `required` join on
    /// their next signature change. Re-registering re-seeds but keeps the
    /// existing instance and signature.
    pub fn register_system<S: System + Default>(&mut self, required: Signature) {
        self.systems.register::<S>(required);
        let seeded = self.entities.entities_with_signature(required);
        self.systems.seed::<S>(seeded);
    }

    /// Current subscribers of `S`, or `None` when unregistered.
    pub fn subscribers<S: System>(&self) -> Option<&BTreeSet<Entity>> {
        self.systems.subscribers::<S>()
    }

    /// Run one tick: invoke every registered system with the elapsed time.
    ///
    /// Each instance is lent out of the registry for the duration of its
    /// update so it can freely mutate the world through `&mut self`,
    /// including attach/detach calls whose membership notifications land
    /// in the registry as usual. The subscriber slice each system sees is
    /// a sorted snapshot taken just before its update; membership edits
    /// made during the tick are visible to the systems that run after.
    pub fn update(&mut self, dt: f32) {
        for key in self.systems.keys_in_order() {
            let Some(mut instance) = self.systems.take_instance(key) else {
                continue;
            };
            let subscribers = self.systems.subscriber_snapshot(key);
            instance.update(self, &subscribers, dt);
            self.systems.restore_instance(key, instance);
        }
    }
}
