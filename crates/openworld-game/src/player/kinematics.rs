//! Vertical kinematics: jump buffering, gravity and fall tracking

use super::MovementConfig;

/// Vertical motion state of one character
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalMotion {
    /// Signed vertical speed (positive is up)
    pub velocity: f32,
    /// Remaining time a buffered jump stays valid
    pub jump_buffer_timer: f32,
    /// Grounded state at the end of the previous tick
    pub grounded_prev: bool,
    /// Most negative vertical speed of the current airborne phase
    pub max_fall_velocity: f32,
}

impl Default for VerticalMotion {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            jump_buffer_timer: 0.0,
            grounded_prev: true,
            max_fall_velocity: 0.0,
        }
    }
}

impl VerticalMotion {
    /// Arm the jump buffer on a press edge, otherwise let it run down
    pub fn buffer_jump(&mut self, pressed: bool, buffer_duration: f32, dt: f32) {
        if pressed {
            self.jump_buffer_timer = buffer_duration;
        } else {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }
    }

    /// Apply ground contact or gravity for this tick
    ///
    /// Returns true when a buffered jump launched.
    pub fn integrate(&mut self, grounded: bool, config: &MovementConfig, dt: f32) -> bool {
        if !grounded {
            self.velocity += config.gravity * dt;
            return false;
        }

        if self.velocity < 0.0 {
            self.velocity = 0.0;
        }
        if self.jump_buffer_timer > 0.0 {
            self.velocity = config.jump_velocity();
            self.jump_buffer_timer = 0.0;
            return true;
        }
        false
    }

    /// Record the grounded state reported after the move
    ///
    /// On the airborne-to-grounded edge the peak fall speed is handed back
    /// and the tracker resets, whatever the caller does with it.
    pub fn track_landing(&mut self, grounded_now: bool) -> Option<f32> {
        let landed = if !grounded_now {
            self.max_fall_velocity = self.max_fall_velocity.min(self.velocity);
            None
        } else if !self.grounded_prev {
            Some(std::mem::take(&mut self.max_fall_velocity))
        } else {
            None
        };
        self.grounded_prev = grounded_now;
        landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    #[test]
    fn test_buffer_decays_to_zero() {
        let mut motion = VerticalMotion::default();
        motion.buffer_jump(true, 0.2, DT);
        assert_eq!(motion.jump_buffer_timer, 0.2);

        for _ in 0..20 {
            motion.buffer_jump(false, 0.2, DT);
        }
        assert_eq!(motion.jump_buffer_timer, 0.0);
    }

    #[test]
    fn test_grounded_cancels_fall_speed_but_keeps_upward_speed() {
        let config = MovementConfig::default();
        let mut motion = VerticalMotion {
            velocity: -7.0,
            ..Default::default()
        };
        motion.integrate(true, &config, DT);
        assert_eq!(motion.velocity, 0.0);

        motion.velocity = 3.0;
        motion.integrate(true, &config, DT);
        assert_eq!(motion.velocity, 3.0);
    }

    #[test]
    fn test_buffered_jump_launches_once() {
        let config = MovementConfig::default();
        let mut motion = VerticalMotion::default();
        motion.buffer_jump(true, config.jump_buffer_duration, DT);

        assert!(motion.integrate(true, &config, DT));
        assert_eq!(motion.velocity, config.jump_velocity());
        assert_eq!(motion.jump_buffer_timer, 0.0);
        assert!(!motion.integrate(true, &config, DT));
    }

    #[test]
    fn test_gravity_integrates_while_airborne() {
        let config = MovementConfig::default();
        let mut motion = VerticalMotion::default();
        motion.integrate(false, &config, 0.5);
        assert_eq!(motion.velocity, -10.0);
    }

    #[test]
    fn test_landing_hands_back_peak_fall_speed() {
        let mut motion = VerticalMotion::default();
        motion.velocity = -4.0;
        assert_eq!(motion.track_landing(false), None);
        motion.velocity = -9.0;
        assert_eq!(motion.track_landing(false), None);
        motion.velocity = -6.0;
        assert_eq!(motion.track_landing(false), None);

        assert_eq!(motion.track_landing(true), Some(-9.0));
        assert_eq!(motion.max_fall_velocity, 0.0);
        assert_eq!(motion.track_landing(true), None);
    }
}
