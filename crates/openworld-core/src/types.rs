//! Core types used throughout the workspace

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a controlled character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transform component representing position and facing
///
/// Forward is negative Z in local space, right is positive X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Yaw-only rotation whose forward points along `direction`'s horizontal part
    ///
    /// Returns `None` when the direction has no horizontal component.
    pub fn heading_rotation(direction: Vec3) -> Option<Quat> {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() <= f32::EPSILON {
            return None;
        }
        let flat = flat.normalize();
        Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
    }

    /// Rotate toward facing `direction`, turning at most `max_radians`
    pub fn turn_towards(&mut self, direction: Vec3, max_radians: f32) {
        let Some(target) = Self::heading_rotation(direction) else {
            return;
        };
        let angle = self.rotation.angle_between(target);
        if angle <= max_radians || angle <= f32::EPSILON {
            self.rotation = target;
        } else {
            self.rotation = self.rotation.slerp(target, max_radians / angle).normalize();
        }
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from a hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_facing() {
        let transform = Transform::default();
        assert!((transform.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((transform.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_heading_rotation_points_forward_along_direction() {
        let rotation = Transform::heading_rotation(Vec3::new(1.0, 3.0, 0.0)).unwrap();
        let transform = Transform::from_position_rotation(Vec3::ZERO, rotation);
        assert!((transform.forward() - Vec3::X).length() < 1e-5);
        assert!(Transform::heading_rotation(Vec3::Y).is_none());
    }

    #[test]
    fn test_turn_towards_is_bounded() {
        let mut transform = Transform::default();
        // Target is 90 degrees to the right, allow 30 degrees this step
        transform.turn_towards(Vec3::X, 30f32.to_radians());
        let turned = transform.forward().angle_between(Vec3::NEG_Z);
        assert!((turned - 30f32.to_radians()).abs() < 1e-3);

        transform.turn_towards(Vec3::X, 180f32.to_radians());
        assert!((transform.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex(0xFF8000);
        assert!((color.r - 1.0).abs() < 0.01);
        assert!((color.g - 0.5).abs() < 0.01);
        assert!((color.b - 0.0).abs() < 0.01);
    }
}
