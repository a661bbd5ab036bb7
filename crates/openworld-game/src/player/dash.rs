//! Double-tap dash gesture and the active dash

use glam::Vec3;

/// How a press of the dash trigger was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Started a new double-tap window
    FirstTap,
    /// Second press inside the window
    DoubleTap,
}

/// Rolling-window double-tap detector for the dash trigger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoubleTapDetector {
    /// A first tap is waiting for its second
    pub pending: bool,
    /// Clock time of the pending first tap
    pub first_tap_time: f64,
}

impl DoubleTapDetector {
    /// Forget a first tap whose window has elapsed
    ///
    /// The window is compared at the config's f32 precision, so a second
    /// press exactly `threshold` later still confirms.
    pub fn expire(&mut self, now: f64, threshold: f32) {
        if self.pending && ((now - self.first_tap_time) as f32) > threshold {
            self.pending = false;
        }
    }

    /// Classify a press edge at `now`
    pub fn press(&mut self, now: f64, threshold: f32) -> TapOutcome {
        self.expire(now, threshold);
        if self.pending {
            self.pending = false;
            TapOutcome::DoubleTap
        } else {
            self.pending = true;
            self.first_tap_time = now;
            TapOutcome::FirstTap
        }
    }
}

/// Active dash override
#[derive(Debug, Clone, PartialEq)]
pub struct DashState {
    pub active: bool,
    /// Seconds left in the dash
    pub timer: f32,
    /// Unit direction the dash travels in
    pub direction: Vec3,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            active: false,
            timer: 0.0,
            direction: Vec3::ZERO,
        }
    }
}

impl DashState {
    /// Begin a dash along `direction` (normalized here)
    pub fn start(&mut self, direction: Vec3, duration: f32) {
        self.active = true;
        self.timer = duration;
        self.direction = direction.normalize_or_zero();
    }

    /// Velocity for this tick; counts the timer down and ends the dash at zero
    pub fn advance(&mut self, dash_speed: f32, dt: f32) -> Vec3 {
        if !self.active {
            return Vec3::ZERO;
        }
        let velocity = self.direction * dash_speed;
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.active = false;
            self.timer = 0.0;
        }
        velocity
    }
}
