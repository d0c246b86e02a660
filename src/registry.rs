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

//! Entity registry: ID lifecycle, signatures, and component containers.

use std::any::TypeId;
use std::collections::{BTreeSet, VecDeque};

use ahash::AHashMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::component::{AnyContainer, Component, ComponentContainer};
use crate::entity::Entity;
use crate::limits::{MAX_COMPONENT_TYPES, MAX_ENTITIES};
use crate::signature::{ComponentTypeId, Signature};

/// Central entity and component storage.
///
/// Owns the entity free list, every entity's [`Signature`], the
/// exact-pattern signature buckets, the per-instance component-type-ID
/// table, and one type-erased [`ComponentContainer`] per component type
/// ever attached. Signature map and bucket membership are always updated
/// together, so the reverse index never drifts from the forward one.
pub struct EntityRegistry {
    /// Number of live entities.
    live: usize,

    /// Recyclable IDs, seeded with the full range at construction.
    free_ids: VecDeque<Entity>,

    /// Signature of every live entity.
    signatures: FxHashMap<Entity, Signature>,

    /// Exact bit pattern -> entities currently carrying it.
    buckets: AHashMap<Signature, BTreeSet<Entity>>,

    /// Type-ID table: assigned once per type, monotonically from 0.
    type_ids: FxHashMap<TypeId, ComponentTypeId>,

    /// One container per component type, created lazily on first attach.
    containers: FxHashMap<TypeId, Box<dyn AnyContainer>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            live: 0,
            free_ids: (0..MAX_ENTITIES as u32).map(Entity::from_index).collect(),
            signatures: FxHashMap::default(),
            buckets: AHashMap::new(),
            type_ids: FxHashMap::default(),
            containers: FxHashMap::default(),
        }
    }

    /// Create a new entity with an all-zero signature.
    ///
    /// # Panics
    /// Panics when all [`MAX_ENTITIES`] IDs are live.
    pub fn create(&mut self) -> Entity {
        let Some(entity) = self.free_ids.pop_front() else {
            panic!("entity capacity exhausted: max is {MAX_ENTITIES}");
        };

        self.signatures.insert(entity, Signature::EMPTY);
        self.buckets
            .entry(Signature::EMPTY)
            .or_default()
            .insert(entity);
        self.live += 1;
        trace!(%entity, "entity created");

        entity
    }

    /// Destroy an entity, recycling its ID. No-op when `entity` is not live.
    ///
    /// Every container is asked to drop the entity's component, regardless
    /// of which types it actually held.
    pub fn destroy(&mut self, entity: Entity) {
        let Some(signature) = self.signatures.remove(&entity) else {
            return;
        };

        if let Some(bucket) = self.buckets.get_mut(&signature) {
            bucket.remove(&entity);
        }
        for container in self.containers.values_mut() {
            container.remove(entity);
        }
        self.free_ids.push_back(entity);
        self.live -= 1;
        trace!(%entity, "entity destroyed");
    }

    /// Whether `entity` is currently live.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.signatures.contains_key(&entity)
    }

    /// Number of live entities.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Entities whose signature equals `signature` exactly.
    ///
    /// This is the exact-pattern bucket lookup, not the superset test
    /// systems subscribe with: an entity owning a strict superset of
    /// `signature` is not returned. Unused patterns yield an empty set.
    pub fn entities_with_signature(&self, signature: Signature) -> BTreeSet<Entity> {
        self.buckets.get(&signature).cloned().unwrap_or_default()
    }

    /// Signature of `entity`; all-zero for IDs that are not live.
    pub fn signature(&self, entity: Entity) -> Signature {
        self.signatures.get(&entity).copied().unwrap_or_default()
    }

    /// Type ID for `T`, assigned on first use by this registry.
    ///
    /// # Panics
    /// Panics when a new type would exceed [`MAX_COMPONENT_TYPES`].
    pub fn component_type_id<T: Component>(&mut self) -> ComponentTypeId {
        let key = TypeId::of::<T>();
        if let Some(&id) = self.type_ids.get(&key) {
            return id;
        }

        let next = self.type_ids.len();
        assert!(
            next < MAX_COMPONENT_TYPES,
            "component type limit reached: max is {MAX_COMPONENT_TYPES}"
        );
        let id = ComponentTypeId::new(next as u32);
        self.type_ids.insert(key, id);
        debug!(
            component = std::any::type_name::<T>(),
            id = next,
            "component type registered"
        );

        id
    }

    /// Attach `value` to `entity`, flipping its signature bit for `T` and
    /// relocating it to the bucket for the new pattern.
    ///
    /// When the entity already owns a `T` this is a no-op on container and
    /// signature alike; the returned reference points at the value stored
    /// first.
    ///
    /// # Panics
    /// Panics when `entity` is not live.
    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        let signature = self.expect_live(entity);
        let id = self.component_type_id::<T>();

        if signature.contains(id) {
            return self.container_mut::<T>().get_mut(entity);
        }

        self.container_mut::<T>().attach(entity, value);
        self.update_signature(entity, id, true);
        trace!(%entity, component = std::any::type_name::<T>(), "component attached");

        self.container_mut::<T>().get_mut(entity)
    }

    /// Detach `entity`'s `T`, clearing its signature bit and relocating it
    /// between buckets. No-op when the entity does not own a `T`.
    ///
    /// # Panics
    /// Panics when `entity` is not live.
    pub fn detach<T: Component>(&mut self, entity: Entity) {
        let signature = self.expect_live(entity);
        let id = self.component_type_id::<T>();

        if !signature.contains(id) {
            return;
        }

        self.container_mut::<T>().detach(entity);
        self.update_signature(entity, id, false);
        trace!(%entity, component = std::any::type_name::<T>(), "component detached");
    }

    /// Whether `entity` owns a `T`.
    ///
    /// # Panics
    /// Panics when `entity` is not live.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        let signature = self.expect_live(entity);
        match self.type_ids.get(&TypeId::of::<T>()) {
            Some(&id) => signature.contains(id),
            None => false,
        }
    }

    /// Get `entity`'s `T`.
    ///
    /// # Panics
    /// Panics when `entity` is not live or owns no `T`.
    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        self.expect_live(entity);
        match self.container_ref::<T>() {
            Some(container) => container.get(entity),
            None => panic!(
                "{entity} does not own a component of type {}",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Mutable variant of [`get`](Self::get), same preconditions.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        self.expect_live(entity);
        match self.containers.get_mut(&TypeId::of::<T>()) {
            Some(container) => container
                .as_any_mut()
                .downcast_mut::<ComponentContainer<T>>()
                .expect("container type mismatch")
                .get_mut(entity),
            None => panic!(
                "{entity} does not own a component of type {}",
                std::any::type_name::<T>()
            ),
        }
    }

    /// The dense container for `T`, if any component of that type was ever
    /// attached.
    pub fn container<T: Component>(&self) -> Option<&ComponentContainer<T>> {
        self.container_ref::<T>()
    }

    fn container_ref<T: Component>(&self) -> Option<&ComponentContainer<T>> {
        self.containers
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref()
    }

    fn container_mut<T: Component>(&mut self) -> &mut ComponentContainer<T> {
        self.containers
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::<ComponentContainer<T>>::default())
            .as_any_mut()
            .downcast_mut()
            .expect("container type mismatch")
    }

    fn expect_live(&self, entity: Entity) -> Signature {
        match self.signatures.get(&entity) {
            Some(&signature) => signature,
            None => panic!("{entity} is not live"),
        }
    }

    /// Move `entity` between buckets after one signature bit changes.
    /// Signature entry and bucket membership change in the same step.
    fn update_signature(&mut self, entity: Entity, id: ComponentTypeId, owned: bool) {
        let signature = self.signatures.get_mut(&entity).expect("entity is live");
        let old = *signature;
        if owned {
            signature.set(id);
        } else {
            signature.clear(id);
        }
        let new = *signature;

        if let Some(bucket) = self.buckets.get_mut(&old) {
            bucket.remove(&entity);
        }
        self.buckets.entry(new).or_default().insert(entity);
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
