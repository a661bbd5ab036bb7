//! Movement configuration and constants

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Controller tuning, immutable for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Base walking speed in meters per second
    pub speed: f32,
    /// Speed multiplier while sprinting
    pub sprint_multiplier: f32,
    /// Turn rate toward the movement heading, degrees per second
    pub rotation_speed: f32,
    /// Target jump apex height in meters
    pub jump_force: f32,
    /// Vertical acceleration, must be negative
    pub gravity: f32,
    /// How long a jump press is remembered before landing
    pub jump_buffer_duration: f32,

    /// Horizontal speed during a dash
    pub dash_speed: f32,
    /// Dash length in seconds
    pub dash_duration: f32,
    /// Maximum seconds between the two taps of a dash
    pub double_tap_threshold: f32,

    /// Stamina capacity
    pub max_stamina: f32,
    /// Stamina regained per second
    pub stamina_recovery_rate: f32,
    /// Stamina spent per second of sprinting
    pub sprint_stamina_cost_per_second: f32,
    /// Fixed stamina spent when a dash starts
    pub dash_stamina_cost: f32,

    /// Health capacity
    pub max_health: f32,
    /// Downward landing speed above which fall damage is considered
    pub fall_damage_threshold: f32,
    /// Scale applied to the fall damage curve
    pub fall_damage_multiplier: f32,
    /// Fall height absorbed without damage
    pub min_fall_height: f32,
    /// Seconds without damage before healing starts
    pub heal_delay: f32,
    /// Health regained per second once healing
    pub heal_rate: f32,

    /// Seconds between death and the scene reset request
    pub reset_delay_seconds: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            sprint_multiplier: 1.5,
            rotation_speed: 720.0,
            jump_force: 5.0,
            gravity: -20.0,
            jump_buffer_duration: 0.2,
            dash_speed: 20.0,
            dash_duration: 0.2,
            double_tap_threshold: 0.3,
            max_stamina: 100.0,
            stamina_recovery_rate: 10.0,
            sprint_stamina_cost_per_second: 15.0,
            dash_stamina_cost: 30.0,
            max_health: 100.0,
            fall_damage_threshold: 10.0,
            fall_damage_multiplier: 2.0,
            min_fall_height: 2.0,
            heal_delay: 5.0,
            heal_rate: 2.0,
            reset_delay_seconds: 2.0,
        }
    }
}

impl MovementConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("speed", self.speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("rotation_speed", self.rotation_speed),
            ("jump_force", self.jump_force),
            ("jump_buffer_duration", self.jump_buffer_duration),
            ("dash_speed", self.dash_speed),
            ("dash_duration", self.dash_duration),
            ("double_tap_threshold", self.double_tap_threshold),
            ("max_stamina", self.max_stamina),
            ("stamina_recovery_rate", self.stamina_recovery_rate),
            ("sprint_stamina_cost_per_second", self.sprint_stamina_cost_per_second),
            ("dash_stamina_cost", self.dash_stamina_cost),
            ("max_health", self.max_health),
            ("fall_damage_threshold", self.fall_damage_threshold),
            ("fall_damage_multiplier", self.fall_damage_multiplier),
            ("min_fall_height", self.min_fall_height),
            ("heal_delay", self.heal_delay),
            ("heal_rate", self.heal_rate),
            ("reset_delay_seconds", self.reset_delay_seconds),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite { field: "gravity" });
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotNegative(self.gravity));
        }
        if self.max_stamina == 0.0 {
            return Err(ConfigError::ZeroCapacity { field: "max_stamina" });
        }
        if self.max_health == 0.0 {
            return Err(ConfigError::ZeroCapacity { field: "max_health" });
        }

        Ok(())
    }

    /// Launch speed that reaches `jump_force` meters at the apex
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_force * -2.0 * self.gravity).sqrt()
    }

    /// Get the current max speed based on sprint state
    pub fn max_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.speed * self.sprint_multiplier
        } else {
            self.speed
        }
    }

    /// Stamina a sprint costs over `dt` seconds
    pub fn sprint_cost(&self, dt: f32) -> f32 {
        self.sprint_stamina_cost_per_second * dt
    }

    /// Rotation budget in radians for a tick of `dt` seconds
    pub fn max_turn(&self, dt: f32) -> f32 {
        (self.rotation_speed * dt).to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(MovementConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_jump_velocity_reaches_apex() {
        let config = MovementConfig::default();
        let v = config.jump_velocity();
        // v^2 = 2 g h
        let apex = v * v / (2.0 * config.gravity.abs());
        assert!((apex - config.jump_force).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_positive_gravity() {
        let config = MovementConfig {
            gravity: 9.81,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::GravityNotNegative(9.81)));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let config = MovementConfig {
            heal_rate: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "heal_rate",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_nan_and_zero_capacity() {
        let config = MovementConfig {
            dash_speed: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "dash_speed" })
        );

        let config = MovementConfig {
            max_health: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCapacity { field: "max_health" })
        );
    }

    #[test]
    fn test_max_speed() {
        let config = MovementConfig::default();
        assert_eq!(config.max_speed(false), 5.0);
        assert_eq!(config.max_speed(true), 7.5);
    }
}
