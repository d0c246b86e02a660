//! System trait and subscriber-set maintenance.
//!
//! A system declares a required [`Signature`] at registration and is kept
//! subscribed to exactly the live entities whose signature contains at
//! least those bits. Membership is maintained incrementally from the
//! per-change notifications the [`World`](crate::world::World) pushes in;
//! it is never recomputed wholesale after the one-time seed at
//! registration.

use std::any::TypeId;
use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::entity::Entity;
use crate::signature::Signature;
use crate::world::World;

/// A per-tick logic unit.
///
/// Registered instances are constructed via [`Default`] and owned by the
/// [`SystemRegistry`] until world teardown. `update` receives the world by
/// `&mut` plus a sorted snapshot of the system's current subscribers; the
/// snapshot stays stable even if the update attaches or detaches
/// components and thereby edits the live subscriber sets.
pub trait System: 'static {
    /// Get system name
    fn name(&self) -> &'static str;

    /// Run one tick of system logic over the subscribed entities.
    fn update(&mut self, world: &mut World, subscribers: &[Entity], dt: f32);
}

/// Boxed system
pub type BoxedSystem = Box<dyn System>;

/// How an entity changed, for subscriber maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    /// The entity was destroyed: drop it from every subscriber set.
    Destroyed,
    /// The entity's signature changed: re-test it against every system.
    SignatureUpdated,
}

/// Required signature and current subscribers of one registered system.
struct Membership {
    required: Signature,
    subscribers: BTreeSet<Entity>,
}

/// Registry of system instances and their subscriber sets.
///
/// Instances live in a separate map from the membership tables so the
/// world can lend one instance out for its update while membership
/// notifications keep landing here.
#[derive(Default)]
pub struct SystemRegistry {
    memberships: FxHashMap<TypeId, Membership>,
    instances: FxHashMap<TypeId, BoxedSystem>,
    /// Registration order, used by the tick loop. Not part of the
    /// contract: callers must not assume any cross-system ordering.
    order: Vec<TypeId>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `S` with its required signature.
    ///
    /// Idempotent per type: a second registration leaves the stored
    /// instance, required signature, and subscribers untouched.
    /// Registration does not populate the subscriber set; the caller seeds
    /// it from the current entity population via [`seed`](Self::seed).
    pub fn register<S: System + Default>(&mut self, required: Signature) {
        let key = TypeId::of::<S>();
        if self.memberships.contains_key(&key) {
            return;
        }

        self.memberships.insert(
            key,
            Membership {
                required,
                subscribers: BTreeSet::new(),
            },
        );
        self.instances.insert(key, Box::new(S::default()));
        self.order.push(key);
        debug!(
            system = std::any::type_name::<S>(),
            ?required,
            "system registered"
        );
    }

    /// Overwrite `S`'s subscriber set with `entities`.
    ///
    /// One-time seeding path used at registration; later maintenance is
    /// incremental through [`apply`](Self::apply).
    ///
    /// # Panics
    /// Panics when `S` was never registered.
    pub fn seed<S: System>(&mut self, entities: BTreeSet<Entity>) {
        let membership = self
            .memberships
            .get_mut(&TypeId::of::<S>())
            .unwrap_or_else(|| {
                panic!("system {} is not registered", std::any::type_name::<S>())
            });
        membership.subscribers = entities;
    }

    /// Incrementally update every subscriber set for one entity change.
    ///
    /// For [`MembershipChange::SignatureUpdated`] the superset test
    /// `signature & required == required` is re-evaluated against all
    /// systems, not only those interested in the changed bit; system
    /// counts are small next to entity counts, so the simpler full pass
    /// wins over a bit-to-systems reverse index.
    pub fn apply(&mut self, change: MembershipChange, entity: Entity, signature: Signature) {
        match change {
            MembershipChange::Destroyed => {
                for membership in self.memberships.values_mut() {
                    membership.subscribers.remove(&entity);
                }
            }
            MembershipChange::SignatureUpdated => {
                for membership in self.memberships.values_mut() {
                    if signature.contains_all(&membership.required) {
                        membership.subscribers.insert(entity);
                    } else {
                        membership.subscribers.remove(&entity);
                    }
                }
            }
        }
    }

    /// Current subscribers of `S`, or `None` when unregistered.
    pub fn subscribers<S: System>(&self) -> Option<&BTreeSet<Entity>> {
        self.memberships
            .get(&TypeId::of::<S>())
            .map(|membership| &membership.subscribers)
    }

    /// Whether `S` is registered.
    pub fn is_registered<S: System>(&self) -> bool {
        self.memberships.contains_key(&TypeId::of::<S>())
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn keys_in_order(&self) -> Vec<TypeId> {
        self.order.clone()
    }

    pub(crate) fn subscriber_snapshot(&self, key: TypeId) -> Vec<Entity> {
        self.memberships
            .get(&key)
            .map(|membership| membership.subscribers.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn take_instance(&mut self, key: TypeId) -> Option<BoxedSystem> {
        self.instances.remove(&key)
    }

    pub(crate) fn restore_instance(&mut self, key: TypeId, instance: BoxedSystem) {
        self.instances.insert(key, instance);
    }
}
