//! Health, fall damage, passive healing and the death transition

use crate::presentation::LifeState;

use super::MovementConfig;

/// Fall height equivalent to landing at `fall_velocity` under `gravity`
///
/// Inverts `v^2 = 2 g h`.
pub fn fall_height(fall_velocity: f32, gravity: f32) -> f32 {
    let g = gravity.abs();
    if g <= 0.0 {
        return 0.0;
    }
    fall_velocity * fall_velocity / (2.0 * g)
}

/// Damage for a landing whose peak downward speed was `max_fall_velocity`
///
/// Nothing happens at or below the speed threshold. Above it, the first
/// `min_fall_height` meters of the equivalent fall are free and the rest
/// scales with a 1.5 exponent.
pub fn fall_damage(max_fall_velocity: f32, config: &MovementConfig) -> f32 {
    if max_fall_velocity >= -config.fall_damage_threshold {
        return 0.0;
    }

    let height = fall_height(max_fall_velocity, config.gravity);
    if height < config.min_fall_height {
        return 0.0;
    }

    let effective_height = height - config.min_fall_height;
    if effective_height <= 0.0 {
        return 0.0;
    }
    effective_height.powf(1.5) * config.fall_damage_multiplier
}

/// Health state of one character
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    health: f32,
    max_health: f32,
    /// Clock time of the last health loss (or dash spend)
    pub last_damage_time: f64,
    life: LifeState,
}

impl Vitals {
    /// Full health, alive
    pub fn full(max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            health: max_health,
            max_health,
            last_damage_time: 0.0,
            life: LifeState::Alive,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }

    /// Health as a 0.0-1.0 fraction
    pub fn ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Lose `amount` health at `now`
    ///
    /// Returns true exactly once: on the hit that empties the pool.
    pub fn take_damage(&mut self, amount: f32, now: f64) -> bool {
        if self.is_dead() || amount.is_nan() || amount <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        self.last_damage_time = now;

        if self.health <= 0.0 {
            self.life = LifeState::Dead;
            return true;
        }
        false
    }

    /// Passive regeneration once `heal_delay` has passed since the last damage
    ///
    /// Returns true when health changed.
    pub fn heal(&mut self, config: &MovementConfig, now: f64, dt: f32) -> bool {
        if self.is_dead() || self.health >= self.max_health {
            return false;
        }
        if ((now - self.last_damage_time) as f32) < config.heal_delay {
            return false;
        }
        self.health = (self.health + config.heal_rate * dt).clamp(0.0, self.max_health);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> MovementConfig {
        MovementConfig {
            gravity: -20.0,
            fall_damage_threshold: 10.0,
            min_fall_height: 2.0,
            fall_damage_multiplier: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fall_damage_scenario() {
        let config = scenario_config();
        assert!((fall_height(-15.0, config.gravity) - 5.625).abs() < 1e-5);

        let damage = fall_damage(-15.0, &config);
        let expected = 3.625f32.powf(1.5) * 2.0;
        assert!((damage - expected).abs() < 1e-4);
        assert!((damage - 13.8).abs() < 0.05);
    }

    #[test]
    fn test_no_damage_at_or_below_threshold() {
        let config = scenario_config();
        assert_eq!(fall_damage(-10.0, &config), 0.0);
        assert_eq!(fall_damage(-3.0, &config), 0.0);
        assert_eq!(fall_damage(0.0, &config), 0.0);
    }

    #[test]
    fn test_short_fall_is_absorbed_by_min_height() {
        // 10.5 m/s is above the speed threshold but only ~2.76m of fall
        let config = MovementConfig {
            min_fall_height: 3.0,
            ..scenario_config()
        };
        assert_eq!(fall_damage(-10.5, &config), 0.0);
    }

    #[test]
    fn test_fall_damage_is_monotonic() {
        let config = scenario_config();
        let mut previous = 0.0;
        for speed in [11.0, 12.5, 15.0, 20.0, 30.0] {
            let damage = fall_damage(-speed, &config);
            assert!(damage > previous, "damage at {speed} should exceed {previous}");
            previous = damage;
        }
    }

    #[test]
    fn test_lethal_damage_kills_once() {
        let mut vitals = Vitals::full(100.0);
        assert!(!vitals.take_damage(40.0, 1.0));
        assert!(vitals.take_damage(500.0, 2.0));
        assert_eq!(vitals.health(), 0.0);
        assert!(vitals.is_dead());
        assert!(!vitals.take_damage(10.0, 3.0));
    }

    #[test]
    fn test_healing_waits_for_delay() {
        let config = MovementConfig {
            heal_delay: 5.0,
            heal_rate: 2.0,
            ..Default::default()
        };
        let mut vitals = Vitals::full(100.0);
        vitals.take_damage(10.0, 10.0);

        assert!(!vitals.heal(&config, 14.9, 1.0));
        assert_eq!(vitals.health(), 90.0);

        assert!(vitals.heal(&config, 15.0, 1.0));
        assert_eq!(vitals.health(), 92.0);
    }

    #[test]
    fn test_healing_starts_exactly_at_delay() {
        let config = MovementConfig {
            heal_delay: 0.7,
            heal_rate: 2.0,
            ..Default::default()
        };
        let mut vitals = Vitals::full(100.0);
        vitals.take_damage(10.0, 1.0);

        assert!(!vitals.heal(&config, 1.69, 0.5));
        assert!(vitals.heal(&config, 1.7, 0.5));
        assert_eq!(vitals.health(), 91.0);
    }

    #[test]
    fn test_healing_stops_at_max() {
        let config = MovementConfig::default();
        let mut vitals = Vitals::full(100.0);
        vitals.take_damage(1.0, 0.0);
        vitals.heal(&config, 100.0, 10.0);
        assert_eq!(vitals.health(), 100.0);
        assert!(!vitals.heal(&config, 200.0, 1.0));
    }

    #[test]
    fn test_dead_never_heals() {
        let config = MovementConfig::default();
        let mut vitals = Vitals::full(100.0);
        vitals.take_damage(100.0, 0.0);
        assert!(!vitals.heal(&config, 1000.0, 1.0));
        assert_eq!(vitals.health(), 0.0);
    }
}
