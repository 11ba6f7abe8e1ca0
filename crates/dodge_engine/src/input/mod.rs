//! Polled keyboard state
//!
//! There is no event queue: the embedding layer records which keys are down
//! and the game reads the state once per frame, the same raw polling model
//! the native window layer uses.

use std::collections::HashSet;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Walk forward (AZERTY layout)
    Z,
    /// Strafe left (AZERTY layout)
    Q,
    /// Walk backward
    S,
    /// Strafe right
    D,
    /// Double movement speed while held
    Shift,
    /// Pitch up
    ArrowUp,
    /// Pitch down
    ArrowDown,
    /// Yaw left
    ArrowLeft,
    /// Yaw right
    ArrowRight,
    /// Fire a projectile
    Space,
    /// Quit
    Escape,
}

/// Snapshot-style keyboard state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Create a state with no keys down
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down
    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    /// Record a key coming up
    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    /// Whether a key is currently down
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_cycle() {
        let mut input = InputState::new();
        assert!(!input.is_down(KeyCode::Space));

        input.press(KeyCode::Space);
        input.press(KeyCode::Shift);
        assert!(input.is_down(KeyCode::Space));
        assert!(input.is_down(KeyCode::Shift));

        input.release(KeyCode::Space);
        assert!(!input.is_down(KeyCode::Space));
        assert!(input.is_down(KeyCode::Shift));

        input.clear();
        assert!(!input.is_down(KeyCode::Shift));
    }
}
