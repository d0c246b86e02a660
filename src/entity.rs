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

//! Entity identifiers.

use std::fmt;

/// Unique entity identifier.
///
/// An entity carries no data of its own: it is a plain index under which
/// components are grouped. IDs are handed out by the
/// [`EntityRegistry`](crate::registry::EntityRegistry) and recycled through
/// its free list after destruction, so a destroyed entity's ID may be seen
/// again on a later create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    pub(crate) const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Raw index of this entity, usable for entity-indexed side tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.0)
    }
}
