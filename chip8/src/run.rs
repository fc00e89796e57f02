use std::collections::VecDeque;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::{Display, DisplayError};
use emu8_core::{Chip8, KeyEvent};

use crate::keymap::physical_key;
use crate::Config;

fn load(chip8: &mut Chip8, rom: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::open(rom)?;
    chip8.load_rom(&mut BufReader::new(file))?;
    info!("loaded {}", rom.display());
    Ok(())
}

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::new();
    load(&mut chip8, &config.rom)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(DisplayError::Sdl)?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump().map_err(DisplayError::Sdl)?;

    // Set initial timing
    let frame_time = Duration::from_secs(1) / config.hz;
    let mut last_frame = Instant::now();

    // Whether or not the frame rate should be respected
    let mut fast_forward = false;
    let mut key_events: VecDeque<KeyEvent> = VecDeque::new();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (key, physical_key(key)) {
                    (_, Some(key)) => key_events.push_back(KeyEvent { key, pressed: true }),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => {
                        chip8.reset();
                        key_events.clear();
                        load(&mut chip8, &config.rom)?;
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, physical_key(key)) {
                    (_, Some(key)) => key_events.push_back(KeyEvent { key, pressed: false }),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }
        chip8.apply_key_events(key_events.drain(..));

        // Update state
        let tick = chip8.update()?;
        if tick.redraw {
            display.render(chip8.frame())?;
        }
        if tick.tone {
            info!("beep");
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_frame_time = current_time - last_frame;
        if !fast_forward && frame_time > elapsed_frame_time {
            std::thread::sleep(frame_time - elapsed_frame_time);
        }
        last_frame = Instant::now();
    }

    Ok(())
}
