//! Contract with the host's movement-resolution primitive

use glam::Vec3;
use openworld_physics::{CharacterController, PhysicsWorld};

/// What the mover actually did with a requested displacement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Displacement applied after collision resolution
    pub applied: Vec3,
    /// Grounded state after the move
    pub grounded: bool,
}

/// Capsule-vs-world sweep-and-resolve supplied by the host
pub trait CharacterMover {
    /// Grounded state as of the last move
    fn is_grounded(&self) -> bool;

    /// Sweep by `displacement` and report the outcome
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoveResult;
}

/// Adapter moving a rapier-backed capsule through a physics world
pub struct KinematicMover<'a> {
    pub character: &'a mut CharacterController,
    pub physics: &'a mut PhysicsWorld,
}

impl<'a> KinematicMover<'a> {
    pub fn new(character: &'a mut CharacterController, physics: &'a mut PhysicsWorld) -> Self {
        Self { character, physics }
    }
}

impl CharacterMover for KinematicMover<'_> {
    fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoveResult {
        let sweep = self.character.sweep(self.physics, displacement, dt);
        MoveResult {
            applied: sweep.applied,
            grounded: sweep.grounded,
        }
    }
}

/// Infinite flat floor at y = 0 for deterministic tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct FlatGround {
    pub position: Vec3,
    pub grounded: bool,
    pub moves: usize,
}

#[cfg(test)]
impl FlatGround {
    pub fn standing() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    pub fn at_height(height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, height, 0.0),
            grounded: height <= 0.0,
            moves: 0,
        }
    }
}

#[cfg(test)]
impl CharacterMover for FlatGround {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, displacement: Vec3, _dt: f32) -> MoveResult {
        self.moves += 1;
        let before = self.position;
        let mut target = before + displacement;
        if target.y <= 0.0 {
            target.y = 0.0;
        }
        self.position = target;
        self.grounded = target.y <= 0.0;
        MoveResult {
            applied: target - before,
            grounded: self.grounded,
        }
    }
}
