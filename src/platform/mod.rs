//! Platform abstraction layer
//!
//! The host owns the keyboard. The core only asks which logical keys went down
//! this frame and folds the answer into a [`TickInput`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical keys the game listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Accept,
    Reject,
    TogglePause,
    Cancel,
    Confirm,
}

/// Host capability: edge-triggered key state for the current frame
pub trait InputSource {
    fn was_just_pressed(&self, key: Key) -> bool;
}

impl TickInput {
    /// Sample this frame's input
    pub fn sample(source: &impl InputSource) -> Self {
        Self {
            accept: source.was_just_pressed(Key::Accept),
            reject: source.was_just_pressed(Key::Reject),
            toggle_pause: source.was_just_pressed(Key::TogglePause),
            cancel: source.was_just_pressed(Key::Cancel),
            confirm: source.was_just_pressed(Key::Confirm),
        }
    }
}

/// Keys pressed this frame, filled in by a host or a scripted driver
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    keys: HashSet<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    /// Forget this frame's presses
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl InputSource for PressedKeys {
    fn was_just_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample() {
        let mut keys = PressedKeys::new();
        assert_eq!(TickInput::sample(&keys), TickInput::default());

        keys.press(Key::Reject);
        keys.press(Key::TogglePause);
        let input = TickInput::sample(&keys);
        assert!(input.reject && input.toggle_pause);
        assert!(!input.accept && !input.cancel && !input.confirm);

        keys.clear();
        assert_eq!(TickInput::sample(&keys), TickInput::default());
    }
}
