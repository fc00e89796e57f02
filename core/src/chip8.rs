use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::Chip8Error;
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keymap::Key;
use crate::keypad::{KeyEvent, Keypad};
use crate::opcode;
use crate::state::{Mode, State};

/// What happened during one call to `Chip8::update`
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    /// The frame buffer changed and should be presented
    pub redraw: bool,
    /// The sound timer ran out on this tick
    pub tone: bool,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad` with public interfaces for pressing and releasing keys
///  - the random source used by `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction, or one frame (instruction plus timers)
/// - resetting the machine
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    rng: StdRng,
    seed: Option<u64>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_keypad(Keypad::default())
    }

    /// A Chip8 whose random numbers are reproducible; `reset` re-seeds it with the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Keypad::default(), StdRng::seed_from_u64(seed), Some(seed))
    }

    /// A Chip8 reading input through a custom keypad mapping.
    pub fn with_keypad(keypad: Keypad) -> Self {
        Self::build(keypad, StdRng::from_entropy(), None)
    }

    fn build(keypad: Keypad, rng: StdRng, seed: Option<u64>) -> Self {
        let mut chip8 = Chip8 {
            state: State::new(),
            keypad,
            rng,
            seed,
        };
        chip8.state.frame_buffer.mark_dirty();
        chip8
    }

    /// Load a rom from a source
    /// - the source is read completely before memory is touched, so a failed read leaves
    ///   the machine as it was
    ///
    /// # Arguments
    /// * `reader` a reader that yields a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_program(&rom);
        Ok(())
    }

    /// Copy a program to 0x200 and point the program counter at it
    /// - programs longer than the remaining memory are truncated
    pub fn load_program(&mut self, program: &[u8]) {
        if program.len() > MAX_PROGRAM_SIZE {
            warn!(
                "program is {} bytes; truncating to {}",
                program.len(),
                MAX_PROGRAM_SIZE
            );
        }
        let len = program.len().min(MAX_PROGRAM_SIZE);
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + len].copy_from_slice(&program[..len]);
        self.state.pc = PROGRAM_START;
        self.state.mode = Mode::Running;
        debug!("loaded {} byte program", len);
    }

    /// Restore the machine to its freshly constructed state
    /// - memory, registers, timers, stack and keys are cleared; the program must be reloaded
    /// - the random source is re-seeded
    pub fn reset(&mut self) {
        self.state = State::new();
        self.state.frame_buffer.mark_dirty();
        self.keypad.reset();
        self.rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!("reset");
    }

    /// Set the pressed status of a physical key
    pub fn update_key(&mut self, key: Key, pressed: bool) {
        self.keypad.update(key, pressed);
    }

    /// Apply a batch of key transitions in the order they happened
    pub fn apply_key_events<I: IntoIterator<Item = KeyEvent>>(&mut self, events: I) {
        for event in events {
            self.update_key(event.key, event.pressed);
        }
    }

    /// Advances the CPU by a single instruction
    /// - gets, decodes and executes the opcode at the pc
    /// - a pending wait-for-key simply re-executes until a key is down
    /// - only a wait-for-key that finds no key down leaves the machine parked
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let op = self.get_op();
        if let Mode::WaitingForKey { register } = self.state.mode {
            trace!("waiting for a key to store in V{:X}", register);
        }
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state.mode = Mode::Running;
        Instruction::decode(op).execute(&mut self.state, &self.keypad, &mut self.rng)
    }

    /// Runs one frame: a single instruction followed by a timer tick
    /// - `redraw` is reported when the frame buffer changed; the dirty flag is cleared either way
    /// - `tone` is reported when the sound timer goes from 1 to 0
    pub fn update(&mut self) -> Result<Tick, Chip8Error> {
        self.step()?;
        let tone = self.advance_timers();
        let redraw = self.state.frame_buffer.is_dirty();
        self.state.frame_buffer.clear_dirty();
        Ok(Tick { redraw, tone })
    }

    /// Decrements both timers towards zero, returning whether the sound timer just expired
    fn advance_timers(&mut self) -> bool {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        let mut tone = false;
        if self.state.sound_timer > 0 {
            tone = self.state.sound_timer == 1;
            self.state.sound_timer -= 1;
        }
        tone
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        let pc = self.state.pc;
        opcode::join(self.state.read(pc), self.state.read(pc.wrapping_add(1)))
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.len()
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    pub fn is_waiting_for_key(&self) -> bool {
        matches!(self.state.mode, Mode::WaitingForKey { .. })
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
