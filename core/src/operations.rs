use crate::constants::{ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, GLYPH_HEIGHT};
use crate::error::Chip8Error;
use crate::framebuffer::Pixel;
use crate::keypad::Keypad;
use crate::state::{Mode, State};

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.clear();
    state.frame_buffer.mark_dirty();
    state.advance();
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), Chip8Error> {
    let addr = state
        .stack
        .pop()
        .ok_or(Chip8Error::StackUnderflow { pc: state.pc })?;
    state.pc = addr;
    state.advance();
    Ok(())
}

/// PC = nnn
pub fn jump(state: &mut State, nnn: u16) {
    state.pc = nnn;
}

/// STACK.push(PC); PC = nnn
pub fn call(state: &mut State, nnn: u16) {
    state.stack.push(state.pc);
    state.pc = nnn;
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    let equal = state.v[x as usize] == kk;
    state.skip_if(equal);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    let different = state.v[x as usize] != kk;
    state.skip_if(different);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let equal = state.v[x as usize] == state.v[y as usize];
    state.skip_if(equal);
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let different = state.v[x as usize] != state.v[y as usize];
    state.skip_if(different);
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
    state.advance();
}

/// Vx += kk
/// Overflow wraps and leaves VF untouched
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    state.advance();
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
    state.advance();
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
    state.advance();
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
    state.advance();
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
    state.advance();
}

// The flag-setting ALU ops below write VF before touching Vx, so with x or y = F the
// register op sees the new flag.

/// VF = carry; Vx += Vy
pub fn addr(state: &mut State, x: u8, y: u8) {
    let carry = state.v[y as usize] > 0xFF - state.v[x as usize];
    state.set_flag(carry);
    state.v[x as usize] = state.v[x as usize].wrapping_add(state.v[y as usize]);
    state.advance();
}

/// VF = !borrow; Vx -= Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let borrow = state.v[y as usize] > state.v[x as usize];
    state.set_flag(!borrow);
    state.v[x as usize] = state.v[x as usize].wrapping_sub(state.v[y as usize]);
    state.advance();
}

/// VF = lsb; Vx >>= 1
pub fn shr(state: &mut State, x: u8) {
    state.v[FLAG_REGISTER] = state.v[x as usize] & 0x1;
    state.v[x as usize] >>= 1;
    state.advance();
}

/// VF = !borrow; Vx = Vy - Vx
pub fn subn(state: &mut State, x: u8, y: u8) {
    let borrow = state.v[x as usize] > state.v[y as usize];
    state.set_flag(!borrow);
    state.v[x as usize] = state.v[y as usize].wrapping_sub(state.v[x as usize]);
    state.advance();
}

/// VF = msb; Vx <<= 1
pub fn shl(state: &mut State, x: u8) {
    state.v[FLAG_REGISTER] = state.v[x as usize] >> 7;
    state.v[x as usize] <<= 1;
    state.advance();
}

/// I = nnn
pub fn loadi(state: &mut State, nnn: u16) {
    state.i = nnn;
    state.advance();
}

/// PC = V0 + nnn
pub fn jumpi(state: &mut State, nnn: u16) {
    state.pc = nnn + u16::from(state.v[0x0]);
}

/// Vx = random_byte & kk
pub fn rnd(state: &mut State, x: u8, kk: u8, random_byte: u8) {
    state.v[x as usize] = random_byte & kk;
    state.advance();
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at memory I..I+n onto the FrameBuffer at Vx, Vy.
/// Pixels falling off the right or bottom edge are clipped, not wrapped.
/// VF is set if any white pixel is turned black.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) {
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;
    state.set_flag(false);

    for row in 0..n {
        let py = origin_y + row as usize;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        let sprite_byte = state.read(state.i.wrapping_add(u16::from(row)));
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if sprite_byte & (0x80 >> bit) == 0 {
                continue;
            }
            if state.frame_buffer.get(px, py).is_white() {
                state.v[FLAG_REGISTER] = 1;
                state.frame_buffer.set(px, py, Pixel::Black);
            } else {
                state.frame_buffer.set(px, py, Pixel::White);
            }
        }
    }

    state.frame_buffer.mark_dirty();
    state.advance();
}

/// if key[Vx] is down then pc += 2
pub fn skpr(state: &mut State, keypad: &Keypad, x: u8) {
    let down = keypad.is_pressed(state.v[x as usize] & 0xF);
    state.skip_if(down);
}

/// if key[Vx] is up then pc += 2
pub fn skup(state: &mut State, keypad: &Keypad, x: u8) {
    let up = !keypad.is_pressed(state.v[x as usize] & 0xF);
    state.skip_if(up);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
    state.advance();
}

/// Vx = await keypress
/// Parks on this instruction until some key is down, then stores the lowest one.
pub fn keyd(state: &mut State, keypad: &Keypad, x: u8) {
    match keypad.lowest_pressed() {
        Some(key) => {
            state.v[x as usize] = key;
            state.mode = Mode::Running;
            state.advance();
        }
        None => state.mode = Mode::WaitingForKey { register: x },
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.delay_timer = state.v[x as usize];
    state.advance();
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.sound_timer = state.v[x as usize];
    state.advance();
}

/// VF = I + Vx overflows 12 bits; I += Vx
pub fn addi(state: &mut State, x: u8) {
    let overflow = u32::from(state.i) + u32::from(state.v[x as usize]) > u32::from(ADDRESS_MASK);
    state.set_flag(overflow);
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    state.advance();
}

/// I = Vx * 5
/// Points I at the glyph for the digit in Vx; see constants::SPRITE_SHEET
pub fn ldspr(state: &mut State, x: u8) {
    state.i = u16::from(state.v[x as usize]) * GLYPH_HEIGHT;
    state.advance();
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(state: &mut State, x: u8) {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in (0u16..).zip(digits) {
        state.write(state.i.wrapping_add(offset), digit);
    }
    state.advance();
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(state: &mut State, x: u8) {
    for reg in 0..=x {
        state.write(state.i.wrapping_add(u16::from(reg)), state.v[reg as usize]);
    }
    state.i = state.i.wrapping_add(u16::from(x) + 1);
    state.advance();
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(state: &mut State, x: u8) {
    for reg in 0..=x {
        state.v[reg as usize] = state.read(state.i.wrapping_add(u16::from(reg)));
    }
    state.i = state.i.wrapping_add(u16::from(x) + 1);
    state.advance();
}
