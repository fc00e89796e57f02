use std::collections::HashMap;

/// Physical keys a host can report to the keypad.
///
/// Hosts translate their own key codes into these before handing them to the interpreter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Num1,
    Num2,
    Num3,
    Num4,
    Q,
    W,
    E,
    R,
    A,
    S,
    D,
    F,
    Z,
    X,
    C,
    V,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap() -> HashMap<Key, u8> {
    HashMap::from([
        (Key::X, 0x0),
        (Key::Num1, 0x1),
        (Key::Num2, 0x2),
        (Key::Num3, 0x3),
        (Key::Q, 0x4),
        (Key::W, 0x5),
        (Key::E, 0x6),
        (Key::A, 0x7),
        (Key::S, 0x8),
        (Key::D, 0x9),
        (Key::Z, 0xA),
        (Key::C, 0xB),
        (Key::Num4, 0xC),
        (Key::R, 0xD),
        (Key::F, 0xE),
        (Key::V, 0xF),
    ])
}
