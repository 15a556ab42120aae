//! Core primitives.
//!
//! Geometry shared by the simulation and the relay.

pub mod rect;
pub mod vec2;

// Re-export core types
pub use rect::{overlaps, Rect};
pub use vec2::Vec2;
