//! Camera reference used to map directional input into world space
//!
//! The controller only needs the camera's horizontal basis. Orbiting,
//! zoom and collision of the camera itself belong to the host.

use glam::{Vec2, Vec3};

/// Forward/right basis vectors of the viewing camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Camera forward direction (may include pitch)
    pub forward: Vec3,
    /// Camera right direction
    pub right: Vec3,
}

impl CameraBasis {
    /// World-axis mapping used when no camera is available
    pub const WORLD: CameraBasis = CameraBasis {
        forward: Vec3::NEG_Z,
        right: Vec3::X,
    };

    /// Create a basis from explicit vectors
    pub fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }

    /// Basis of an orbit camera with the given yaw and pitch (radians)
    pub fn from_yaw_pitch(yaw: f32, pitch: f32) -> Self {
        let cos_pitch = pitch.cos();
        Self {
            forward: Vec3::new(yaw.sin() * cos_pitch, pitch.sin(), -yaw.cos() * cos_pitch),
            right: Vec3::new(yaw.cos(), 0.0, yaw.sin()),
        }
    }

    /// The basis with its Y components removed and each vector renormalized
    ///
    /// A vector that has no horizontal component (camera looking straight
    /// down) collapses to zero rather than producing NaN.
    pub fn flattened(&self) -> CameraBasis {
        let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
        CameraBasis {
            forward: flatten(self.forward),
            right: flatten(self.right),
        }
    }

    /// Map raw axes (x = right, y = forward) to a horizontal world intent
    ///
    /// The result is not normalized; diagonals have magnitude above one.
    pub fn intent(&self, axes: Vec2) -> Vec3 {
        let flat = self.flattened();
        flat.forward * axes.y + flat.right * axes.x
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::WORLD
    }
}
