use std::path::PathBuf;

use clap::Parser;
use log::error;

use emu8_core::FRAME_RATE;

mod keymap;
mod run;

#[derive(Parser)]
#[command(name = "chip8")]
#[command(about = "Runs a Chip-8 program in an SDL2 window")]
pub struct Config {
    /// Program to load at 0x200
    pub rom: PathBuf,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Frames (one instruction plus a timer tick) per second
    #[arg(long, default_value_t = FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = run::run(&config) {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}
