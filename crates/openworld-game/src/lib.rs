//! OpenWorld Game - player controller core
//!
//! Provides the player controller, input edge tracking, the camera basis
//! used for camera-relative movement, and the collaborator traits a host
//! implements (mover, presentation sink, deferred event scheduler).

pub mod camera;
pub mod error;
pub mod events;
pub mod input;
pub mod player;
pub mod presentation;

pub use camera::CameraBasis;
pub use error::ConfigError;
pub use events::{DeferredEvent, DeferredEvents, Scheduler};
pub use input::{InputAction, InputBindings, InputHandler, InputState};
pub use player::{
    CharacterMover, Frame, KinematicMover, LocomotionMode, LocomotionState, MoveResult,
    MovementConfig, PlayerController, TickReport,
};
pub use presentation::{HudBars, LifeState, PresentationSink};
