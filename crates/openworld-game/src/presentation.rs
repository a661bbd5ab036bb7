//! Presentation sinks for HUD bars and the alive/dead visual state

use openworld_core::Color;

/// Whether the character is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    /// Terminal; the controller is inert from here on
    Dead,
}

impl LifeState {
    /// Material tint the character should be drawn with
    pub fn tint(self) -> Color {
        match self {
            LifeState::Alive => Color::WHITE,
            LifeState::Dead => Color::from_hex(0x4A1010),
        }
    }

    pub fn is_alive(self) -> bool {
        self == LifeState::Alive
    }
}

/// Receives the values the UI and renderer display
///
/// Every method defaults to a no-op so sinks only implement what they draw.
pub trait PresentationSink {
    /// Stamina fill amount, `current / max`
    fn stamina_ratio(&mut self, _ratio: f32) {}

    /// Health fill amount, `current / max`
    fn health_ratio(&mut self, _ratio: f32) {}

    /// Alive/dead visual swap
    fn life_state(&mut self, _state: LifeState) {}
}

/// Fill amounts and tint as last published
#[derive(Debug, Clone, PartialEq)]
pub struct HudBars {
    pub stamina_fill: f32,
    pub health_fill: f32,
    pub life: LifeState,
    pub tint: Color,
}

impl Default for HudBars {
    fn default() -> Self {
        Self {
            stamina_fill: 1.0,
            health_fill: 1.0,
            life: LifeState::Alive,
            tint: LifeState::Alive.tint(),
        }
    }
}

impl PresentationSink for HudBars {
    fn stamina_ratio(&mut self, ratio: f32) {
        self.stamina_fill = ratio;
    }

    fn health_ratio(&mut self, ratio: f32) {
        self.health_fill = ratio;
    }

    fn life_state(&mut self, state: LifeState) {
        self.life = state;
        self.tint = state.tint();
    }
}
