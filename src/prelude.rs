//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use signature_ecs::prelude::*;
//! ```

pub use crate::component::Component;
pub use crate::entity::Entity;
pub use crate::signature::{ComponentTypeId, Signature};
pub use crate::system::System;
pub use crate::world::World;
