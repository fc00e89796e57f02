/// # Opcodes
///
/// A Chip-8 opcode is one big-endian 16-bit word, `(high << 8) | low`.
/// Which instruction it encodes depends on:
/// - `(n, _, _, _)` the family; every opcode is cased on this
/// - `(_, _, _, n)` the operation within the 0x8 (ALU) family
/// - `(_, _, n, n)` the operation within the 0x0, 0xE and 0xF families
///
/// The remaining nibbles carry operands:
/// - `(_, n, n, n)` a 12-bit address (`nnn`)
/// - `(_, _, n, n)` an immediate byte (`kk`)
/// - `(_, n, _, _)` the register Vx, or the last register of the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a sprite height
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[x___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins the two bytes of an instruction fetched from memory.
pub fn join(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
