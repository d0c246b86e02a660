//! Build-time capacity limits.
//!
//! All three limits are hard caps: exceeding any of them is a caller
//! contract violation and panics rather than returning an error.

/// Maximum number of live entities at any one time.
pub const MAX_ENTITIES: usize = 1000;

/// Maximum number of component instances a single container can hold.
pub const MAX_COMPONENTS: usize = 1000;

/// Maximum number of distinct component types, which is also the
/// signature bit width.
pub const MAX_COMPONENT_TYPES: usize = 64;
