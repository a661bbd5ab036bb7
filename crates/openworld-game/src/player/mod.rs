//! Player controller module
//!
//! Locomotion, stamina and health for a single character, driven one fixed
//! tick at a time through a host-supplied mover.

mod controller;
pub mod dash;
pub mod kinematics;
pub mod locomotion;
mod movement;
pub mod mover;
pub mod stamina;
mod state;
pub mod vitals;

pub use controller::{Frame, PlayerController, TickReport};
pub use locomotion::LocomotionMode;
pub use movement::MovementConfig;
pub use mover::{CharacterMover, KinematicMover, MoveResult};
pub use state::LocomotionState;
