use sdl2::keyboard::Keycode;

use emu8_core::Key;

/// Translates an SDL2 keycode into the physical key the keypad mapping understands.
/// Keys outside the 4x4 block on the left of the keyboard are not part of the keypad.
pub fn physical_key(key: Keycode) -> Option<Key> {
    match key {
        Keycode::Num1 => Some(Key::Num1),
        Keycode::Num2 => Some(Key::Num2),
        Keycode::Num3 => Some(Key::Num3),
        Keycode::Num4 => Some(Key::Num4),
        Keycode::Q => Some(Key::Q),
        Keycode::W => Some(Key::W),
        Keycode::E => Some(Key::E),
        Keycode::R => Some(Key::R),
        Keycode::A => Some(Key::A),
        Keycode::S => Some(Key::S),
        Keycode::D => Some(Key::D),
        Keycode::F => Some(Key::F),
        Keycode::Z => Some(Key::Z),
        Keycode::X => Some(Key::X),
        Keycode::C => Some(Key::C),
        Keycode::V => Some(Key::V),
        _ => None,
    }
}
