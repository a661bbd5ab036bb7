//! Mutable per-character locomotion state

use super::dash::{DashState, DoubleTapDetector};
use super::kinematics::VerticalMotion;
use super::stamina::Stamina;
use super::vitals::Vitals;
use super::MovementConfig;

/// Everything the per-tick update mutates, owned by one controller
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    pub vertical: VerticalMotion,
    pub gesture: DoubleTapDetector,
    pub dash: DashState,
    pub stamina: Stamina,
    pub vitals: Vitals,
}

impl LocomotionState {
    /// Fresh state at activation: full stamina and health, grounded, timers at zero
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            vertical: VerticalMotion::default(),
            gesture: DoubleTapDetector::default(),
            dash: DashState::default(),
            stamina: Stamina::full(config.max_stamina),
            vitals: Vitals::full(config.max_health),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let config = MovementConfig::default();
        let state = LocomotionState::new(&config);

        assert_eq!(state.stamina.current(), config.max_stamina);
        assert_eq!(state.vitals.health(), config.max_health);
        assert!(state.vertical.grounded_prev);
        assert_eq!(state.vertical.jump_buffer_timer, 0.0);
        assert_eq!(state.dash.timer, 0.0);
        assert!(!state.dash.active);
        assert!(!state.gesture.pending);
        assert!(state.vitals.life().is_alive());
    }
}
