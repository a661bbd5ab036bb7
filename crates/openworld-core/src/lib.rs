//! OpenWorld Core - Core types and utilities shared by the controller crates
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform component for character position and facing
//! - Simulation clock with a fixed timestep, injected into the controller

pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use time::{FixedStep, GameTime, TimeConfig};
pub use types::{Color, EntityId, Transform};
