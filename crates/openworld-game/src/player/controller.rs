//! Player controller: the per-tick locomotion and vitals state machine

use glam::Vec3;
use openworld_core::{EntityId, FixedStep, Transform};
use tracing::{debug, info, warn};

use crate::camera::CameraBasis;
use crate::error::ConfigError;
use crate::events::{DeferredEvent, Scheduler};
use crate::input::{InputAction, InputState};
use crate::presentation::{LifeState, PresentationSink};

use super::dash::TapOutcome;
use super::locomotion::{dash_direction, ground_velocity, LocomotionMode};
use super::mover::CharacterMover;
use super::state::LocomotionState;
use super::vitals::fall_damage;
use super::MovementConfig;

/// Inputs the host hands the controller for one tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Held keys and press edges for this tick
    pub input: &'a InputState,
    /// Viewing camera, if any; world axes are used otherwise
    pub camera: Option<CameraBasis>,
    /// Monotonic host clock in seconds
    pub now: f64,
    /// Tick length in seconds
    pub dt: f32,
}

impl<'a> Frame<'a> {
    pub fn new(input: &'a InputState, now: f64, dt: f32) -> Self {
        Self {
            input,
            camera: None,
            now,
            dt,
        }
    }

    /// Frame for a fixed step of the host clock
    pub fn from_step(input: &'a InputState, step: FixedStep) -> Self {
        Self::new(input, step.now, step.dt)
    }

    pub fn with_camera(mut self, camera: CameraBasis) -> Self {
        self.camera = Some(camera);
        self
    }

    /// A tick is usable when `dt` is positive and both times are finite
    pub fn is_valid(&self) -> bool {
        self.dt.is_finite() && self.dt > 0.0 && self.now.is_finite()
    }
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Displacement the mover actually applied
    pub displacement: Vec3,
    /// Grounded state after the move
    pub grounded: bool,
    /// Horizontal locomotion branch taken
    pub mode: LocomotionMode,
    /// A buffered jump launched this tick
    pub jumped: bool,
    /// Fall damage dealt on landing, if any
    pub fall_damage: Option<f32>,
    /// This tick killed the character
    pub died: bool,
    pub stamina_ratio: f32,
    pub health_ratio: f32,
}

/// Player controller handling input, locomotion, stamina and health
pub struct PlayerController {
    /// Identifies this character in logs
    pub id: EntityId,
    config: MovementConfig,
    state: LocomotionState,
    transform: Transform,
}

impl PlayerController {
    /// Create a controller with the default tuning
    pub fn new() -> Self {
        let config = MovementConfig::default();
        Self {
            id: EntityId::new(),
            state: LocomotionState::new(&config),
            config,
            transform: Transform::default(),
        }
    }

    /// Create a controller with custom tuning
    pub fn with_config(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            id: EntityId::new(),
            state: LocomotionState::new(&config),
            config,
            transform: Transform::default(),
        })
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Position and facing as tracked from applied displacements
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Place the character (e.g. at spawn); does not move the host's collider
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn health(&self) -> f32 {
        self.state.vitals.health()
    }

    pub fn stamina(&self) -> f32 {
        self.state.stamina.current()
    }

    pub fn is_dead(&self) -> bool {
        self.state.vitals.is_dead()
    }

    pub fn is_dashing(&self) -> bool {
        self.state.dash.active
    }

    /// Publish the activation state: alive visuals and both bars
    pub fn announce(&self, sink: &mut dyn PresentationSink) {
        sink.life_state(self.state.vitals.life());
        sink.stamina_ratio(self.state.stamina.ratio());
        sink.health_ratio(self.state.vitals.ratio());
    }

    /// Advance one simulation tick
    ///
    /// Stages run in a fixed order: input sampling, vertical kinematics,
    /// horizontal locomotion with stamina gating, the move itself, then
    /// vitals. A dead controller, or a tick with an unusable clock, changes
    /// nothing and never calls the mover.
    pub fn fixed_update(
        &mut self,
        frame: &Frame<'_>,
        mover: &mut dyn CharacterMover,
        mut sink: Option<&mut dyn PresentationSink>,
        scheduler: &mut dyn Scheduler,
    ) -> TickReport {
        if self.is_dead() {
            return self.idle_report(mover.is_grounded());
        }
        if !frame.is_valid() {
            if frame.dt == 0.0 && frame.now.is_finite() {
                debug!(id = %self.id, "skipping zero-length tick");
            } else {
                warn!(id = %self.id, dt = frame.dt, now = frame.now, "rejected tick with invalid clock");
            }
            return self.idle_report(mover.is_grounded());
        }

        let Self {
            id,
            config,
            state,
            transform,
        } = self;
        let (input, now, dt) = (frame.input, frame.now, frame.dt);

        // Input sampling
        state.gesture.expire(now, config.double_tap_threshold);
        state.vertical.buffer_jump(
            input.is_just_pressed(InputAction::Jump),
            config.jump_buffer_duration,
            dt,
        );
        let intent = frame
            .camera
            .unwrap_or(CameraBasis::WORLD)
            .intent(input.axes());
        let sprint_held = input.is_held(InputAction::Sprint);

        // Vertical kinematics
        let grounded = mover.is_grounded();
        let jumped = state.vertical.integrate(grounded, config, dt);
        if jumped {
            debug!(id = %id, velocity = state.vertical.velocity, "jump");
        }

        // Dash gesture, only on the ground
        let dash_tap = grounded && input.is_just_pressed(InputAction::Sprint);
        if dash_tap
            && state.gesture.press(now, config.double_tap_threshold) == TapOutcome::DoubleTap
        {
            if state.stamina.try_spend(config.dash_stamina_cost) {
                let direction = dash_direction(intent, transform);
                state.dash.start(direction, config.dash_duration);
                // Spending dash stamina also restarts the heal delay
                state.vitals.last_damage_time = now;
                debug!(id = %id, ?direction, stamina = state.stamina.current(), "dash");
            } else {
                debug!(id = %id, stamina = state.stamina.current(), "dash denied, not enough stamina");
            }
        }

        // Horizontal locomotion and stamina
        let (horizontal, mode) = if state.dash.active {
            (
                state.dash.advance(config.dash_speed, dt),
                LocomotionMode::Dash,
            )
        } else {
            ground_velocity(intent, sprint_held, &mut state.stamina, transform, config, dt)
        };
        // Sprinting blocks regeneration, a dash does not
        if !sprint_held || state.dash.active {
            state.stamina.regenerate(config.stamina_recovery_rate, dt);
        }
        let stamina_ratio = state.stamina.ratio();
        if let Some(sink) = sink.as_deref_mut() {
            sink.stamina_ratio(stamina_ratio);
        }

        // Move
        let velocity = horizontal + Vec3::Y * state.vertical.velocity;
        let moved = mover.move_by(velocity * dt, dt);
        transform.translate(moved.applied);

        // Vitals
        let mut damage_taken = None;
        let mut died = false;
        if let Some(peak) = state.vertical.track_landing(moved.grounded) {
            let damage = fall_damage(peak, config);
            debug!(id = %id, peak, damage, "landed");
            if damage > 0.0 {
                damage_taken = Some(damage);
                died = state.vitals.take_damage(damage, now);
            }
        }

        if died {
            state.dash = Default::default();
            info!(id = %id, fall_damage = damage_taken.unwrap_or_default(), "player died");
            if let Some(sink) = sink.as_deref_mut() {
                sink.life_state(LifeState::Dead);
            }
            scheduler.schedule(DeferredEvent::ResetScene, config.reset_delay_seconds);
        } else {
            state.vitals.heal(config, now, dt);
        }

        let health_ratio = state.vitals.ratio();
        if let Some(sink) = sink.as_deref_mut() {
            sink.health_ratio(health_ratio);
        }

        TickReport {
            displacement: moved.applied,
            grounded: moved.grounded,
            mode,
            jumped,
            fall_damage: damage_taken,
            died,
            stamina_ratio,
            health_ratio,
        }
    }

    fn idle_report(&self, grounded: bool) -> TickReport {
        TickReport {
            displacement: Vec3::ZERO,
            grounded,
            mode: LocomotionMode::Idle,
            jumped: false,
            fall_damage: None,
            died: false,
            stamina_ratio: self.state.stamina.ratio(),
            health_ratio: self.state.vitals.ratio(),
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}
