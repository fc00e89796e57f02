pub use chip8::{Chip8, Tick};
pub use constants::FRAME_RATE;
pub use error::Chip8Error;
pub use framebuffer::{FrameBuffer, Pixel};
pub use keymap::{keymap, Key};
pub use keypad::{KeyEvent, Keypad};

mod chip8;
pub mod constants;
pub mod error;
mod framebuffer;
pub mod instruction;
mod keymap;
mod keypad;
mod opcode;
mod operations;
pub mod state;
