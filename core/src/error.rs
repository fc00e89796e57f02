use thiserror::Error;

/// Failures surfaced by the interpreter.
///
/// Unknown opcodes are not errors; they execute as no-ops.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unable to read ROM: {0}")]
    RomUnreadable(#[from] std::io::Error),

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}
