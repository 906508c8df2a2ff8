//! Core types and definitions for LEADLINE.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity snapshots, the engine configuration snapshot, enums, errors,
//! per-tick reports and default constants. It has no dependency on any
//! runtime or scheduling framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod state;
pub mod types;

pub use types::Vec2;

#[cfg(test)]
mod tests;
