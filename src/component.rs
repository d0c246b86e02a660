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

//! Component trait and dense per-type storage.
//!
//! Components are plain data attached to entities. Each concrete type gets
//! one [`ComponentContainer`], a packed array with no gaps: removal
//! swap-fills the freed slot from the back, so a bulk pass over one type
//! always walks a contiguous range.

use std::any::Any;

use rustc_hash::FxHashMap;

use crate::entity::Entity;
use crate::limits::MAX_COMPONENTS;

/// Marker trait for components
///
/// Components must be 'static (no borrowed data)
pub trait Component: 'static + Send + Sync {}

/// Automatically implement Component for all valid types
impl<T: 'static + Send + Sync> Component for T {}

/// Type-erased view of a [`ComponentContainer`].
///
/// Lets the entity registry hold one container per type behind a single
/// map and clean up a destroyed entity's components without knowing any
/// concrete type. Typed access goes through [`Any`] downcasting at the
/// registry's typed entry points.
pub trait AnyContainer: Send + Sync {
    /// Remove the component owned by `entity`, if any.
    fn remove(&mut self, entity: Entity);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for components of a single type.
///
/// Occupied slots are exactly `0..len()`. A bidirectional index keeps
/// entity and slot in sync: `slot_owner` maps slot to owning entity and
/// `owner_slot` maps entity back to slot, which is what makes swap-removal
/// O(1) while preserving density.
pub struct ComponentContainer<T: Component> {
    values: Vec<T>,
    // slot -> owning entity, parallel to `values`
    slot_owner: Vec<Entity>,
    // owning entity -> slot
    owner_slot: FxHashMap<Entity, usize>,
}

impl<T: Component> ComponentContainer<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::with_capacity(MAX_COMPONENTS),
            slot_owner: Vec::with_capacity(MAX_COMPONENTS),
            owner_slot: FxHashMap::default(),
        }
    }

    /// Attach `value` to `entity` at the next free dense slot.
    ///
    /// No-op when the entity already owns a component of this type: the
    /// first stored value wins and the container size is unchanged.
    ///
    /// # Panics
    /// Panics when the container is already at [`MAX_COMPONENTS`].
    pub fn attach(&mut self, entity: Entity, value: T) {
        if self.owner_slot.contains_key(&entity) {
            return;
        }
        if self.values.len() >= MAX_COMPONENTS {
            panic!(
                "component capacity exhausted for {}: max is {MAX_COMPONENTS}",
                std::any::type_name::<T>()
            );
        }

        let slot = self.values.len();
        self.owner_slot.insert(entity, slot);
        self.slot_owner.push(entity);
        self.values.push(value);
    }

    /// Detach the component owned by `entity`, keeping storage dense.
    ///
    /// No-op when the entity owns nothing here. Otherwise the last slot's
    /// value is moved into the freed slot and the moved owner's index is
    /// re-pointed. Removing the last slot itself is the degenerate
    /// self-move and needs no index fixup.
    pub fn detach(&mut self, entity: Entity) {
        let Some(slot) = self.owner_slot.remove(&entity) else {
            return;
        };

        let last = self.values.len() - 1;
        self.values.swap_remove(slot);
        self.slot_owner.swap_remove(slot);
        if slot != last {
            let moved = self.slot_owner[slot];
            self.owner_slot.insert(moved, slot);
        }
    }

    /// Get the component owned by `entity`.
    ///
    /// # Panics
    /// Panics when the entity owns no component of this type; ownership is
    /// the caller's precondition, checked with [`has`](Self::has).
    pub fn get(&self, entity: Entity) -> &T {
        match self.owner_slot.get(&entity) {
            Some(&slot) => &self.values[slot],
            None => panic!(
                "{entity} does not own a component of type {}",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Mutable variant of [`get`](Self::get), same precondition.
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        match self.owner_slot.get(&entity) {
            Some(&slot) => &mut self.values[slot],
            None => panic!(
                "{entity} does not own a component of type {}",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Membership test; total, never panics.
    #[inline]
    pub fn has(&self, entity: Entity) -> bool {
        self.owner_slot.contains_key(&entity)
    }

    /// Slot currently holding `entity`'s component, if any.
    #[inline]
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.owner_slot.get(&entity).copied()
    }

    /// Number of stored components.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The packed component values, in slot order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Owning entities, parallel to [`values`](Self::values).
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.slot_owner
    }
}

impl<T: Component> Default for ComponentContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> AnyContainer for ComponentContainer<T> {
    fn remove(&mut self, entity: Entity) {
        self.detach(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
