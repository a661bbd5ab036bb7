//! Capsule sweep-and-resolve using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::trace;

/// Capsule shape and sweep tuning
#[derive(Debug, Clone)]
pub struct CapsuleConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum walkable slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.3m)
    pub step_height: f32,
    /// Skin width kept between the capsule and the world (default: 0.02m)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            max_slope_angle: 45.0,
            step_height: 0.3,
            skin_width: 0.02,
            snap_to_ground: true,
            ground_snap_distance: 0.2,
        }
    }
}

/// Outcome of one capsule sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Translation actually applied after collision resolution
    pub applied: Vec3,
    /// Whether the capsule rests on walkable ground after the move
    pub grounded: bool,
}

/// Capsule body moved through the world by sweeps
pub struct CharacterController {
    /// Configuration
    pub config: CapsuleConfig,
    /// Feet position (bottom of the capsule)
    pub position: Vec3,
    /// Whether the capsule touched walkable ground on the last sweep
    pub grounded: bool,
    /// The collider handle for this capsule
    pub collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterController {
    /// Create a new capsule with default config
    pub fn new() -> Self {
        Self::with_config(CapsuleConfig::default())
    }

    /// Create a new capsule with custom config
    pub fn with_config(config: CapsuleConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: false,
        });
        controller.snap_to_ground = config
            .snap_to_ground
            .then_some(CharacterLength::Absolute(config.ground_snap_distance));
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Insert the capsule collider into the world with its feet at `position`
    pub fn spawn(&mut self, physics: &mut crate::PhysicsWorld, position: Vec3) -> ColliderHandle {
        if let Some(previous) = self.collider_handle.take() {
            physics.remove_collider(previous);
        }
        self.position = position;
        self.grounded = false;

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Sweep the capsule by `desired_translation`, resolving collisions
    ///
    /// An unspawned capsule does not move and reports its previous grounded state.
    pub fn sweep(
        &mut self,
        physics: &mut crate::PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> SweepResult {
        let unchanged = SweepResult {
            applied: Vec3::ZERO,
            grounded: self.grounded,
        };
        let Some(collider_handle) = self.collider_handle else {
            return unchanged;
        };
        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return unchanged;
        };

        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        // A capsule resting on the ground is handed zero vertical motion, and
        // rapier only reports contact it sweeps into. Probe down instead.
        let probing = self.grounded && desired_translation.y.abs() <= f32::EPSILON;
        let request = if probing {
            desired_translation - Vec3::Y * self.config.ground_snap_distance
        } else {
            desired_translation
        };

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            collider.shape(),
            &current_pos,
            vector![request.x, request.y, request.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        let applied = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.grounded = movement.grounded;
        self.position += applied;
        self.sync_collider(physics);

        trace!(?desired_translation, ?applied, probing, grounded = self.grounded, "capsule sweep");

        SweepResult {
            applied,
            grounded: self.grounded,
        }
    }

    /// Set the capsule's feet position directly (teleport)
    pub fn set_position(&mut self, physics: &mut crate::PhysicsWorld, position: Vec3) {
        self.position = position;
        self.grounded = false;
        self.sync_collider(physics);
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.height / 2.0)
    }

    /// Check if standing on ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn sync_collider(&self, physics: &mut crate::PhysicsWorld) {
        let center = self.center_position();
        if let Some(collider) = self
            .collider_handle
            .and_then(|handle| physics.collider_set.get_mut(handle))
        {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsWorld;

    #[test]
    fn test_capsule_config() {
        let config = CapsuleConfig::default();
        assert_eq!(config.height, 2.0);
        assert_eq!(config.radius, 0.5);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_center_position() {
        let mut capsule = CharacterController::new();
        capsule.position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(capsule.center_position(), Vec3::new(1.0, 3.0, 3.0));
    }

    #[test]
    fn test_unspawned_capsule_does_not_move() {
        let mut world = PhysicsWorld::new();
        let mut capsule = CharacterController::new();
        let result = capsule.sweep(&mut world, Vec3::new(1.0, 0.0, 0.0), 1.0 / 60.0);
        assert_eq!(result.applied, Vec3::ZERO);
        assert_eq!(capsule.position, Vec3::ZERO);
    }

    #[test]
    fn test_capsule_lands_on_floor() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(50.0, 0.5, 50.0), Vec3::new(0.0, -0.5, 0.0));

        let mut capsule = CharacterController::new();
        capsule.spawn(&mut world, Vec3::new(0.0, 1.0, 0.0));
        world.refresh_queries();

        for _ in 0..40 {
            capsule.sweep(&mut world, Vec3::new(0.0, -0.1, 0.0), 1.0 / 60.0);
        }

        assert!(capsule.is_grounded());
        assert!(capsule.position.y > -0.05);
        assert!(capsule.position.y < 0.1);
    }

    #[test]
    fn test_resting_capsule_stays_grounded_without_vertical_motion() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);

        let mut capsule = CharacterController::new();
        capsule.spawn(&mut world, Vec3::new(0.0, 0.05, 0.0));
        world.refresh_queries();

        for _ in 0..10 {
            capsule.sweep(&mut world, Vec3::new(0.0, -0.1, 0.0), 1.0 / 60.0);
        }
        assert!(capsule.is_grounded());
        let rest = capsule.position.y;

        // Standing still and walking both ask for zero vertical motion
        for i in 0..60 {
            let step = if i % 2 == 0 { Vec3::ZERO } else { Vec3::new(0.05, 0.0, 0.0) };
            let result = capsule.sweep(&mut world, step, 1.0 / 60.0);
            assert!(result.grounded, "lost ground contact on sweep {i}");
            assert!(result.applied.y.abs() < 0.01);
        }
        assert!((capsule.position.y - rest).abs() < 0.01);
    }

    #[test]
    fn test_upward_motion_leaves_the_ground() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);

        let mut capsule = CharacterController::new();
        capsule.spawn(&mut world, Vec3::new(0.0, 0.05, 0.0));
        world.refresh_queries();
        for _ in 0..10 {
            capsule.sweep(&mut world, Vec3::new(0.0, -0.1, 0.0), 1.0 / 60.0);
        }

        let result = capsule.sweep(&mut world, Vec3::new(0.0, 0.25, 0.0), 1.0 / 60.0);
        assert!(!result.grounded);
        assert!(result.applied.y > 0.2);
    }
}
