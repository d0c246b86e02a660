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

//! Signature ECS - dense component storage with bitset-indexed systems
//!
//! A single-threaded ECS core for simulation loops: per-type packed
//! component containers, fixed-width signature bitsets with an
//! exact-pattern reverse index, and incrementally maintained system
//! subscriber sets, composed behind a [`World`](world::World) façade.

pub mod component;
pub mod entity;
pub mod limits;
pub mod prelude;
pub mod registry;
pub mod signature;
pub mod system;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::*;
pub use entity::*;
pub use limits::*;
pub use registry::*;
pub use signature::*;
pub use system::*;
pub use world::*;
