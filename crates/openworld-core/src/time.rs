//! Simulation clock
//!
//! The host owns time. Controllers never read a wall clock; they receive the
//! monotonic `now` and the step length from a [`GameTime`] each tick.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for controller and physics ticks (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// One fixed simulation step handed to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    /// Monotonic simulation time at the end of this step, in seconds
    pub now: f64,
    /// Length of the step in seconds
    pub dt: f32,
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds (advances with every frame update)
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether the simulation is paused
    pub paused: bool,
    /// Time consumed by fixed steps so far
    fixed_time: f64,
    /// Accumulated time not yet consumed by fixed steps
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            config: TimeConfig::default(),
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            paused: false,
            fixed_time: 0.0,
            fixed_accumulator: 0.0,
        }
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta from the previous frame
    ///
    /// Negative and non-finite deltas count as zero so a misbehaving host
    /// clock can never move time backwards.
    pub fn update(&mut self, raw_delta: f32) {
        let raw_delta = if raw_delta.is_finite() {
            raw_delta.max(0.0)
        } else {
            0.0
        };
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Consume one fixed step from the accumulator, if a full one is available
    pub fn next_fixed_step(&mut self) -> Option<FixedStep> {
        let dt = self.config.fixed_timestep;
        if dt <= 0.0 || self.fixed_accumulator < dt {
            return None;
        }
        self.fixed_accumulator -= dt;
        self.fixed_time += dt as f64;
        Some(FixedStep {
            now: self.fixed_time,
            dt,
        })
    }

    /// Simulation time consumed by fixed steps
    pub fn fixed_time(&self) -> f64 {
        self.fixed_time
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(0.016);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps_advance_monotonic_clock() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.1,
            ..Default::default()
        });
        time.update(0.25);

        let first = time.next_fixed_step().unwrap();
        let second = time.next_fixed_step().unwrap();
        assert!(time.next_fixed_step().is_none());

        assert!((first.now - 0.1).abs() < 1e-6);
        assert!((second.now - 0.2).abs() < 1e-6);
        assert!(second.now > first.now);
    }

    #[test]
    fn test_bad_deltas_do_not_advance_time() {
        let mut time = GameTime::default();
        time.update(f32::NAN);
        time.update(-1.0);
        time.update(f32::INFINITY);
        assert_eq!(time.total_time, 0.0);
        assert!(time.next_fixed_step().is_none());
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(10.0);
        assert_eq!(time.unscaled_delta_time, time.config.max_delta_time);
    }
}
