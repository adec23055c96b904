//! Keyboard input: held-key state for continuous controls and a queue of
//! discrete events drained once per tick.

use std::collections::{HashSet, VecDeque};

/// Discrete input event, drained at the top of each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or quit requested.
    Quit,
    /// Key went down this frame (auto-repeat excluded).
    KeyDown(KeyCode),
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Pending discrete events.
    events: VecDeque<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_held.insert(key) {
                    self.events.push_back(InputEvent::KeyDown(key));
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Queue a quit request.
    pub fn request_quit(&mut self) {
        self.events.push_back(InputEvent::Quit);
    }

    /// Take every pending event, oldest first. Never blocks.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        if !self.keys_held.is_empty() {
            log::debug!("Releasing {} held keys", self.keys_held.len());
        }
        self.keys_held.clear();
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Lateral thruster toward -x (Left arrow).
    pub fn is_thrust_left_held(&self) -> bool {
        self.is_key_held(KeyCode::ArrowLeft)
    }

    /// Lateral thruster toward +x (Right arrow).
    pub fn is_thrust_right_held(&self) -> bool {
        self.is_key_held(KeyCode::ArrowRight)
    }

    /// Longitudinal thruster toward -y (Up arrow).
    pub fn is_thrust_forward_held(&self) -> bool {
        self.is_key_held(KeyCode::ArrowUp)
    }

    /// Longitudinal thruster toward +y (Down arrow).
    pub fn is_thrust_back_held(&self) -> bool {
        self.is_key_held(KeyCode::ArrowDown)
    }

    /// Main engine (Space).
    pub fn is_main_engine_held(&self) -> bool {
        self.is_key_held(KeyCode::Space)
    }
}

/// Key that restarts from the win screen.
pub const RESTART_KEY: KeyCode = KeyCode::KeyR;

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
