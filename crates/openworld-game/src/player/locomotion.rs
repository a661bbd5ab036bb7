//! Horizontal locomotion with sprint gating and heading rotation

use glam::Vec3;
use openworld_core::Transform;

use super::stamina::Stamina;
use super::MovementConfig;

/// Intent below this magnitude counts as no input
pub const INTENT_DEADZONE: f32 = 0.1;

/// Which locomotion branch produced this tick's horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionMode {
    #[default]
    Idle,
    Walk,
    Sprint,
    Dash,
}

/// Camera-relative walk or sprint velocity for one tick
///
/// Holding the sprint key costs stamina every tick it is affordable, moving
/// or not. When the tick's cost cannot be paid, the character walks at base
/// speed and nothing is deducted. With intent above the deadzone the facing
/// turns toward it at the configured rate; otherwise there is no movement
/// and no rotation.
pub fn ground_velocity(
    intent: Vec3,
    sprint_held: bool,
    stamina: &mut Stamina,
    facing: &mut Transform,
    config: &MovementConfig,
    dt: f32,
) -> (Vec3, LocomotionMode) {
    let sprinting = sprint_held && stamina.try_spend(config.sprint_cost(dt));
    let speed = config.max_speed(sprinting);

    if intent.length() <= INTENT_DEADZONE {
        return (Vec3::ZERO, LocomotionMode::Idle);
    }

    facing.turn_towards(intent, config.max_turn(dt));
    let mode = if sprinting {
        LocomotionMode::Sprint
    } else {
        LocomotionMode::Walk
    };
    (intent.normalize() * speed, mode)
}

/// Direction a dash started now would travel
pub fn dash_direction(intent: Vec3, facing: &Transform) -> Vec3 {
    if intent.length() > INTENT_DEADZONE {
        intent.normalize()
    } else {
        facing.forward()
    }
}
