//! Stamina pool gating sprint and dash

/// Stamina balance, always within `[0, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct Stamina {
    current: f32,
    max: f32,
}

impl Stamina {
    /// A full pool
    pub fn full(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Spend `cost` if the whole amount is available. Returns false and
    /// leaves the pool untouched otherwise.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if self.current >= cost {
            self.current = (self.current - cost).clamp(0.0, self.max);
            true
        } else {
            false
        }
    }

    /// Regenerate at `rate` per second
    pub fn regenerate(&mut self, rate: f32, dt: f32) {
        self.current = (self.current + rate * dt).clamp(0.0, self.max);
    }

    /// Stamina as a 0.0-1.0 fraction
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }
}
