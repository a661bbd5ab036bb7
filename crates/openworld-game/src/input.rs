//! Input system with action-based mapping
//!
//! Provides an abstraction layer between raw key events and controller actions.
//! Press edges are derived here, once per physical press, so the controller
//! never has to compare frames itself.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Controller actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Sprint while held, dash on double tap (Shift by default)
    Sprint,
}

/// Current state of all inputs for a tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this tick
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this tick
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this tick
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Raw directional axes: x is right (+1) / left (-1), y is forward (+1) / backward (-1)
    ///
    /// When both keys of an axis are held, right wins over left and forward
    /// wins over backward.
    pub fn axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.is_held(InputAction::MoveLeft) {
            axes.x = -1.0;
        }
        if self.is_held(InputAction::MoveRight) {
            axes.x = 1.0;
        }
        if self.is_held(InputAction::MoveBackward) {
            axes.y = -1.0;
        }
        if self.is_held(InputAction::MoveForward) {
            axes.y = 1.0;
        }
        axes
    }

    /// Replace the held set with a freshly polled one, deriving edges by
    /// comparing against the previous poll
    pub fn apply_poll(&mut self, held_now: impl IntoIterator<Item = InputAction>) {
        let held_now: HashSet<InputAction> = held_now.into_iter().collect();
        self.just_pressed = held_now.difference(&self.held).copied().collect();
        self.just_released = self.held.difference(&held_now).copied().collect();
        self.held = held_now;
    }

    /// Clear tick-specific data (call after the controller consumed the tick)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Maps physical keys to controller actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ShiftRight, InputAction::Sprint);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys currently bound to `action`
    pub fn keys_for(&self, action: InputAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, bound)| **bound == action)
            .map(|(key, _)| *key)
    }
}

/// Input handler that processes raw key events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Physical keys currently down
    keys_down: HashSet<KeyCode>,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event
    ///
    /// Auto-repeat and a second key bound to an already held action do not
    /// produce another press edge. The action is released only once every
    /// key bound to it is up.
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                self.keys_down.insert(key_code);
                if self.state.held.insert(action) {
                    self.state.just_pressed.insert(action);
                }
            }
            ElementState::Released => {
                self.keys_down.remove(&key_code);
                let still_down = self
                    .bindings
                    .keys_for(action)
                    .any(|key| self.keys_down.contains(&key));
                if !still_down && self.state.held.remove(&action) {
                    self.state.just_released.insert(action);
                }
            }
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Space),
            Some(InputAction::Jump)
        );
        assert_eq!(bindings.keys_for(InputAction::Sprint).count(), 2);
    }

    #[test]
    fn test_input_state() {
        let mut state = InputState::new();
        state.held.insert(InputAction::MoveForward);
        state.just_pressed.insert(InputAction::Jump);

        assert!(state.is_held(InputAction::MoveForward));
        assert!(state.is_just_pressed(InputAction::Jump));
        assert!(!state.is_held(InputAction::Sprint));

        state.clear_frame();
        assert!(state.is_held(InputAction::MoveForward));
        assert!(!state.is_just_pressed(InputAction::Jump));
    }

    #[test]
    fn test_axes_priority() {
        let mut state = InputState::new();
        state.held.extend([
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::MoveForward,
            InputAction::MoveBackward,
        ]);
        assert_eq!(state.axes(), Vec2::new(1.0, 1.0));

        state.held.clear();
        state.held.insert(InputAction::MoveBackward);
        assert_eq!(state.axes(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_auto_repeat_is_not_a_new_press() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::ShiftLeft);
        assert!(handler.state.is_just_pressed(InputAction::Sprint));
        handler.end_frame();

        press(&mut handler, KeyCode::ShiftLeft);
        assert!(!handler.state.is_just_pressed(InputAction::Sprint));
        assert!(handler.state.is_held(InputAction::Sprint));
    }

    #[test]
    fn test_action_held_until_all_keys_released() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::ShiftLeft);
        press(&mut handler, KeyCode::ShiftRight);
        handler.end_frame();

        release(&mut handler, KeyCode::ShiftLeft);
        assert!(handler.state.is_held(InputAction::Sprint));
        assert!(!handler.state.is_just_released(InputAction::Sprint));

        release(&mut handler, KeyCode::ShiftRight);
        assert!(!handler.state.is_held(InputAction::Sprint));
        assert!(handler.state.is_just_released(InputAction::Sprint));
    }

    #[test]
    fn test_polled_edges() {
        let mut state = InputState::new();
        state.apply_poll([InputAction::Jump]);
        assert!(state.is_just_pressed(InputAction::Jump));

        state.apply_poll([InputAction::Jump]);
        assert!(!state.is_just_pressed(InputAction::Jump));
        assert!(state.is_held(InputAction::Jump));

        state.apply_poll(Vec::<InputAction>::new());
        assert!(state.is_just_released(InputAction::Jump));
        assert!(!state.is_held(InputAction::Jump));
    }
}
