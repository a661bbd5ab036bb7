//! OpenWorld - headless player controller harness
//!
//! Drives one character through a scripted session on a small rapier scene:
//! walk, sprint, a double-tap dash, a jump off a ledge, then a lethal drop
//! that ends with the scene reset request firing.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use openworld_core::{FixedStep, GameTime};
use openworld_game::{
    CameraBasis, DeferredEvent, DeferredEvents, Frame, HudBars, InputAction, InputState,
    KinematicMover, LocomotionMode, PlayerController,
};
use openworld_physics::{CharacterController, PhysicsWorld};

use settings::Settings;

/// Where the character starts, feet on the ledge
const SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);
/// Height the character is dropped from near the end of the script
const DROP_HEIGHT: f32 = 60.0;
/// Give up if the reset never arrives
const MAX_STEPS: u64 = 60 * 60;

/// Scripted input for one fixed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Walk,
    Sprint,
    Tap,
    Release,
    Jump,
    Drop,
    Idle,
}

/// Which cue applies at `step`
fn cue_for(step: u64) -> Cue {
    match step {
        0..=59 => Cue::Walk,
        60..=119 => Cue::Sprint,
        120..=129 => Cue::Release,
        130 | 138 => Cue::Tap,
        131..=137 | 139..=179 => Cue::Release,
        180 => Cue::Jump,
        181..=299 => Cue::Walk,
        300 => Cue::Drop,
        _ => Cue::Idle,
    }
}

fn held_for(cue: Cue) -> Vec<InputAction> {
    match cue {
        Cue::Walk => vec![InputAction::MoveForward],
        Cue::Sprint => vec![InputAction::MoveForward, InputAction::Sprint],
        Cue::Tap => vec![InputAction::MoveForward, InputAction::Sprint],
        Cue::Release => vec![InputAction::MoveForward],
        Cue::Jump => vec![InputAction::MoveForward, InputAction::Jump],
        Cue::Drop | Cue::Idle => Vec::new(),
    }
}

/// Scene and character state of one session
struct Session {
    physics: PhysicsWorld,
    character: CharacterController,
    player: PlayerController,
    input: InputState,
    hud: HudBars,
    events: DeferredEvents,
    camera_yaw: f32,
    steps: u64,
}

impl Session {
    fn new(settings: &Settings) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        // Raised ledge the character starts on
        physics.create_static_box(Vec3::new(4.0, 1.0, 4.0), Vec3::new(0.0, 1.0, 0.0));

        let mut character = CharacterController::new();
        character.spawn(&mut physics, SPAWN);
        physics.refresh_queries();

        let mut player = PlayerController::with_config(settings.controller.clone())
            .context("invalid controller settings")?;
        player.set_position(SPAWN);

        let mut hud = HudBars::default();
        player.announce(&mut hud);
        info!(id = %player.id, "player spawned at {:?}", SPAWN);

        Ok(Self {
            physics,
            character,
            player,
            input: InputState::new(),
            hud,
            events: DeferredEvents::new(),
            camera_yaw: 0.0,
            steps: 0,
        })
    }

    /// Run one fixed step; returns the events that became due
    fn fixed_update(&mut self, step: FixedStep) -> Vec<DeferredEvent> {
        let cue = cue_for(self.steps);
        if cue == Cue::Drop {
            let mut drop = self.player.transform().position;
            drop.y = DROP_HEIGHT;
            self.character.set_position(&mut self.physics, drop);
            self.physics.refresh_queries();
            self.player.set_position(drop);
            info!(height = DROP_HEIGHT, "dropping player");
        }
        self.input.apply_poll(held_for(cue));

        // Slow orbit so movement stays camera relative
        self.camera_yaw += 0.2 * step.dt;
        let frame = Frame::from_step(&self.input, step)
            .with_camera(CameraBasis::from_yaw_pitch(self.camera_yaw, -0.35));

        let report = {
            let mut mover = KinematicMover::new(&mut self.character, &mut self.physics);
            self.player
                .fixed_update(&frame, &mut mover, Some(&mut self.hud), &mut self.events)
        };

        if report.mode == LocomotionMode::Dash && cue == Cue::Tap {
            info!(step = self.steps, "dash started");
        }
        if let Some(damage) = report.fall_damage {
            info!(damage, health = self.player.health(), "fall damage");
        }
        if self.steps % 60 == 0 {
            debug!(
                step = self.steps,
                position = ?self.player.transform().position,
                grounded = report.grounded,
                mode = ?report.mode,
                stamina = self.hud.stamina_fill,
                health = self.hud.health_fill,
                "status"
            );
        }

        self.steps += 1;
        self.events.advance(step.dt)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting OpenWorld controller harness...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());

    let mut time = GameTime::new(settings.time.clone());
    let mut session = Session::new(&settings)?;
    let frame_delta = time.config.fixed_timestep.max(1.0 / 240.0);

    'frames: loop {
        time.update(frame_delta);
        while let Some(step) = time.next_fixed_step() {
            for event in session.fixed_update(step) {
                match event {
                    DeferredEvent::ResetScene => {
                        info!(
                            at = time.fixed_time(),
                            life = ?session.hud.life,
                            "scene reset requested"
                        );
                        break 'frames;
                    }
                }
            }
        }
        if session.steps >= MAX_STEPS || time.frame_count >= 4 * MAX_STEPS {
            anyhow::bail!("scene reset never fired after {} steps", session.steps);
        }
    }

    info!(
        steps = session.steps,
        stamina = session.player.stamina(),
        health = session.player.health(),
        "session finished"
    );
    Ok(())
}
