use crate::constants::{
    ADDRESS_MASK, FLAG_REGISTER, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
};
use crate::framebuffer::FrameBuffer;

/// Whether the interpreter is executing or parked on a wait-for-key instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// `Fx0A` found no key down; the instruction is retried on the next step.
    WaitingForKey { register: u8 },
}

/// The Chip8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - return addresses pushed by calls, popped by returns; grows as needed
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per frame
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200.. holds the program
/// - a 64x32 frame buffer
#[derive(Debug, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Vec::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: FrameBuffer::new(),
            mode: Mode::Running,
        }
    }

    /// Reads a byte, wrapping the address into the 12-bit address space.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    /// Writes a byte, wrapping the address into the 12-bit address space.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr & ADDRESS_MASK)] = value;
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Advances past the next instruction as well when `condition` holds.
    pub fn skip_if(&mut self, condition: bool) {
        self.advance();
        if condition {
            self.advance();
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
