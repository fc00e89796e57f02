use std::collections::HashMap;

use crate::constants::KEY_COUNT;
use crate::keymap::{keymap, Key};

/// A key transition reported by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

/// # Keypad
/// Tracks which of the 16 hexadecimal keys are held down.
///
/// The mapping from physical keys to keypad indices is fixed when the keypad is built;
/// physical keys missing from it are ignored.
#[derive(Debug, Clone)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    mapping: HashMap<Key, u8>,
}

impl Keypad {
    /// Build a keypad with a custom mapping.
    ///
    /// # Arguments
    /// * `mapping` physical key to keypad index; indices must be below 16
    pub fn new(mapping: HashMap<Key, u8>) -> Self {
        debug_assert!(mapping.values().all(|&index| (index as usize) < KEY_COUNT));
        Keypad {
            pressed: [false; KEY_COUNT],
            mapping,
        }
    }

    /// Record a key transition; unmapped keys are a no-op.
    pub fn update(&mut self, key: Key, pressed: bool) {
        if let Some(&index) = self.mapping.get(&key) {
            self.pressed[index as usize] = pressed;
        }
    }

    pub fn is_pressed(&self, index: u8) -> bool {
        self.pressed[index as usize]
    }

    /// The lowest-indexed key that is currently down.
    pub fn lowest_pressed(&self) -> Option<u8> {
        self.pressed
            .iter()
            .position(|&down| down)
            .map(|index| index as u8)
    }

    /// Release every key. The mapping is kept.
    pub fn reset(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(keymap())
    }
}
