//! ECS systems that drive the synthetic world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They keep no state of their own; everything lives in components.

pub mod cleanup;
pub mod movement;
pub mod sensor;
pub mod snapshot;
