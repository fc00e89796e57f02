use rand::Rng;

use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::state::State;

/// A decoded Chip-8 instruction carrying its operands.
///
/// Every 16-bit word decodes to exactly one variant; words that match no documented
/// instruction become `Unknown` and execute as a no-op.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1nnn
    Jump { nnn: u16 },
    /// 2nnn
    Call { nnn: u16 },
    /// 3xkk
    SkipEqByte { x: u8, kk: u8 },
    /// 4xkk
    SkipNeByte { x: u8, kk: u8 },
    /// 5xy0
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk
    LoadByte { x: u8, kk: u8 },
    /// 7xkk
    AddByte { x: u8, kk: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    ShiftRight { x: u8 },
    /// 8xy7
    SubReverse { x: u8, y: u8 },
    /// 8xyE
    ShiftLeft { x: u8 },
    /// 9xy0
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    LoadIndex { nnn: u16 },
    /// Bnnn
    JumpOffset { nnn: u16 },
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    SkipKeyDown { x: u8 },
    /// ExA1
    SkipKeyUp { x: u8 },
    /// Fx07
    LoadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    LoadGlyph { x: u8 },
    /// Fx33
    StoreBcd { x: u8 },
    /// Fx55
    StoreRegisters { x: u8 },
    /// Fx65
    LoadRegisters { x: u8 },
    Unknown(u16),
}

impl Instruction {
    /// Selects the Instruction for a given opcode
    pub fn decode(op: u16) -> Self {
        use Instruction::*;

        let (x, y, kk, nnn) = (op.x(), op.y(), op.kk(), op.nnn());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { nnn },
            (0x2, ..) => Call { nnn },
            (0x3, ..) => SkipEqByte { x, kk },
            (0x4, ..) => SkipNeByte { x, kk },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadByte { x, kk },
            (0x7, ..) => AddByte { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubReverse { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex { nnn },
            (0xB, ..) => JumpOffset { nnn },
            (0xC, ..) => Random { x, kk },
            (0xD, ..) => Draw { x, y, n: op.n() },
            (0xE, _, 0x9, 0xE) => SkipKeyDown { x },
            (0xE, _, 0xA, 0x1) => SkipKeyUp { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => Unknown(op),
        }
    }

    /// Applies the instruction to `state`, including its effect on the program counter.
    ///
    /// Only a return with an empty call stack can fail; `state` is untouched in that case.
    pub fn execute<R: Rng + ?Sized>(
        self,
        state: &mut State,
        keypad: &Keypad,
        rng: &mut R,
    ) -> Result<(), Chip8Error> {
        use Instruction::*;

        match self {
            Clear => ops::clr(state),
            Return => ops::rts(state)?,
            Jump { nnn } => ops::jump(state, nnn),
            Call { nnn } => ops::call(state, nnn),
            SkipEqByte { x, kk } => ops::ske(state, x, kk),
            SkipNeByte { x, kk } => ops::skne(state, x, kk),
            SkipEqReg { x, y } => ops::skre(state, x, y),
            LoadByte { x, kk } => ops::load(state, x, kk),
            AddByte { x, kk } => ops::add(state, x, kk),
            Move { x, y } => ops::mv(state, x, y),
            Or { x, y } => ops::or(state, x, y),
            And { x, y } => ops::and(state, x, y),
            Xor { x, y } => ops::xor(state, x, y),
            AddReg { x, y } => ops::addr(state, x, y),
            Sub { x, y } => ops::sub(state, x, y),
            ShiftRight { x } => ops::shr(state, x),
            SubReverse { x, y } => ops::subn(state, x, y),
            ShiftLeft { x } => ops::shl(state, x),
            SkipNeReg { x, y } => ops::skrne(state, x, y),
            LoadIndex { nnn } => ops::loadi(state, nnn),
            JumpOffset { nnn } => ops::jumpi(state, nnn),
            Random { x, kk } => ops::rnd(state, x, kk, rng.gen()),
            Draw { x, y, n } => ops::draw(state, x, y, n),
            SkipKeyDown { x } => ops::skpr(state, keypad, x),
            SkipKeyUp { x } => ops::skup(state, keypad, x),
            LoadDelay { x } => ops::moved(state, x),
            WaitKey { x } => ops::keyd(state, keypad, x),
            SetDelay { x } => ops::loads(state, x),
            SetSound { x } => ops::ld(state, x),
            AddIndex { x } => ops::addi(state, x),
            LoadGlyph { x } => ops::ldspr(state, x),
            StoreBcd { x } => ops::bcd(state, x),
            StoreRegisters { x } => ops::stor(state, x),
            LoadRegisters { x } => ops::read(state, x),
            Unknown(_) => state.advance(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::framebuffer::Pixel;
    use crate::keymap::Key;
    use crate::state::Mode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn exec(op: u16, state: &mut State) -> Result<(), Chip8Error> {
        exec_with_keys(op, state, &Keypad::default())
    }

    fn exec_with_keys(op: u16, state: &mut State, keypad: &Keypad) -> Result<(), Chip8Error> {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        Instruction::decode(op).execute(state, keypad, &mut rng)
    }

    fn keypad_with(key: Key) -> Keypad {
        let mut keypad = Keypad::default();
        keypad.update(key, true);
        keypad
    }

    #[test]
    #[rustfmt::skip]
    fn test_decodes_every_documented_opcode() {
        use Instruction::*;
        let table = [
            (0x00E0, Clear),
            (0x00EE, Return),
            (0x1ABC, Jump { nnn: 0xABC }),
            (0x2ABC, Call { nnn: 0xABC }),
            (0x3ABC, SkipEqByte { x: 0xA, kk: 0xBC }),
            (0x4ABC, SkipNeByte { x: 0xA, kk: 0xBC }),
            (0x5AB0, SkipEqReg { x: 0xA, y: 0xB }),
            (0x6ABC, LoadByte { x: 0xA, kk: 0xBC }),
            (0x7ABC, AddByte { x: 0xA, kk: 0xBC }),
            (0x8AB0, Move { x: 0xA, y: 0xB }),
            (0x8AB1, Or { x: 0xA, y: 0xB }),
            (0x8AB2, And { x: 0xA, y: 0xB }),
            (0x8AB3, Xor { x: 0xA, y: 0xB }),
            (0x8AB4, AddReg { x: 0xA, y: 0xB }),
            (0x8AB5, Sub { x: 0xA, y: 0xB }),
            (0x8AB6, ShiftRight { x: 0xA }),
            (0x8AB7, SubReverse { x: 0xA, y: 0xB }),
            (0x8ABE, ShiftLeft { x: 0xA }),
            (0x9AB0, SkipNeReg { x: 0xA, y: 0xB }),
            (0xAABC, LoadIndex { nnn: 0xABC }),
            (0xBABC, JumpOffset { nnn: 0xABC }),
            (0xCABC, Random { x: 0xA, kk: 0xBC }),
            (0xDABC, Draw { x: 0xA, y: 0xB, n: 0xC }),
            (0xEA9E, SkipKeyDown { x: 0xA }),
            (0xEAA1, SkipKeyUp { x: 0xA }),
            (0xFA07, LoadDelay { x: 0xA }),
            (0xFA0A, WaitKey { x: 0xA }),
            (0xFA15, SetDelay { x: 0xA }),
            (0xFA18, SetSound { x: 0xA }),
            (0xFA1E, AddIndex { x: 0xA }),
            (0xFA29, LoadGlyph { x: 0xA }),
            (0xFA33, StoreBcd { x: 0xA }),
            (0xFA55, StoreRegisters { x: 0xA }),
            (0xFA65, LoadRegisters { x: 0xA }),
        ];
        for &(op, expected) in &table {
            assert_eq!(Instruction::decode(op), expected, "opcode {:04X}", op);
        }
    }

    #[test]
    fn test_undocumented_opcodes_decode_to_unknown() {
        for &op in &[0x0123, 0x5AB1, 0x8AB8, 0x9AB3, 0xEA00, 0xFAFF] {
            assert_eq!(Instruction::decode(op), Instruction::Unknown(op));
        }
    }

    #[test]
    fn test_unknown_opcode_only_advances_pc() {
        let mut state = State::new();
        state.v[0x3] = 0x42;
        exec(0x8AB8, &mut state).unwrap();
        assert_eq!(state.pc, 0x202);
        assert_eq!(state.v[0x3], 0x42);
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer.set(0, 0, Pixel::White);
        exec(0x00E0, &mut state).unwrap();
        assert_eq!(state.frame_buffer.get(0, 0), Pixel::Black);
        assert!(state.frame_buffer.is_dirty());
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.stack.push(0x0ABC);
        exec(0x00EE, &mut state).unwrap();
        assert!(state.stack.is_empty());
        // Returns to the instruction after the call
        assert_eq!(state.pc, 0x0ABE);
    }

    #[test]
    fn test_00ee_ret_with_empty_stack_fails() {
        let mut state = State::new();
        let err = exec(0x00EE, &mut state).unwrap_err();
        assert!(matches!(err, Chip8Error::StackUnderflow { pc: 0x200 }));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        exec(0x1ABC, &mut state).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call_then_ret() {
        let mut state = State::new();
        state.pc = 0x0208;
        exec(0x2300, &mut state).unwrap();
        assert_eq!(state.stack, vec![0x0208]);
        assert_eq!(state.pc, 0x0300);
        exec(0x00EE, &mut state).unwrap();
        assert_eq!(state.pc, 0x020A);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = State::new();
        exec(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = State::new();
        exec(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        exec(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::new();
        exec(0x6122, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xF0;
        state.v[0xF] = 0x7;
        exec(0x7120, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x10);
        assert_eq!(state.v[0xF], 0x7);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x1;
        exec(0x8120, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        exec(0x8121, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x7);

        state.v[0x1] = 0x6;
        exec(0x8122, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);

        state.v[0x1] = 0x6;
        exec(0x8123, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x5);
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        exec(0x8124, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.v[0x2] = 0x11;
        exec(0x8124, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x10);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        exec(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x12;
        exec(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_equal_operands_do_not_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x40;
        state.v[0x2] = 0x40;
        exec(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x0);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        exec(0x8106, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_ignores_vy() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        state.v[0x2] = 0xFF;
        exec(0x8126, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0x2], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        exec(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        exec(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        exec(0x810E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        exec(0x810E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_flag_register_as_destination_sees_new_flag() {
        let mut state = State::new();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x02;
        // carry is set first, then VF += V1
        exec(0x8F14, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x03);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        exec(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        exec(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        exec(0xAABC, &mut state).unwrap();
        assert_eq!(state.i, 0xABC);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        exec(0xBABC, &mut state).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_cxkk_rnd_is_masked() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        exec(0xC10F, &mut state).unwrap();
        assert_eq!(state.v[0x1] & 0xF0, 0x0);
        exec(0xC100, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x0);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // Draw the 0 glyph with a 1x 1y offset
        exec(0xD005, &mut state).unwrap();
        let glyph = [
            [1, 1, 1, 1],
            [1, 0, 0, 1],
            [1, 0, 0, 1],
            [1, 0, 0, 1],
            [1, 1, 1, 1],
        ];
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                let expected =
                    (1..6).contains(&y) && (1..5).contains(&x) && glyph[y - 1][x - 1] == 1;
                assert_eq!(
                    state.frame_buffer.get(x, y).is_white(),
                    expected,
                    "pixel ({}, {})",
                    x,
                    y
                );
            }
        }
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.frame_buffer.is_dirty());
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.frame_buffer.set(0, 0, Pixel::White);
        exec(0xD001, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x1);
        assert_eq!(state.frame_buffer.get(0, 0), Pixel::Black);
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = State::new();
        // 0 1 0 1 -> Set
        state.frame_buffer.set(1, 0, Pixel::White);
        state.frame_buffer.set(3, 0, Pixel::White);
        // 1 1 1 1 -> First row of the 0 glyph
        exec(0xD001, &mut state).unwrap();
        let row: Vec<bool> = (0..4).map(|x| state.frame_buffer.get(x, 0).is_white()).collect();
        assert_eq!(row, vec![true, false, true, false]);
    }

    #[test]
    fn test_dxyn_drw_clips_at_the_edges() {
        let mut state = State::new();
        state.v[0x0] = 62;
        state.v[0x1] = 30;
        // 0 glyph is 4 wide and 5 tall; only its top-left 2x2 corner is visible
        exec(0xD015, &mut state).unwrap();
        assert_eq!(state.frame_buffer.lit_pixels(), 3);
        assert!(state.frame_buffer.get(62, 30).is_white());
        assert!(state.frame_buffer.get(63, 30).is_white());
        assert!(state.frame_buffer.get(62, 31).is_white());
        assert!(!state.frame_buffer.get(0, 30).is_white());
        assert!(!state.frame_buffer.get(62, 0).is_white());
    }

    #[test]
    fn test_dxyn_drw_fully_offscreen_is_harmless() {
        let mut state = State::new();
        state.v[0x0] = 0xC8;
        state.v[0x1] = 0xC8;
        state.v[0xF] = 0x1;
        exec(0xD01F, &mut state).unwrap();
        assert_eq!(state.frame_buffer.lit_pixels(), 0);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        exec_with_keys(0xE19E, &mut state, &keypad_with(Key::F)).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        exec(0xE19E, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_ex9e_skp_uses_low_nibble() {
        let mut state = State::new();
        state.v[0x1] = 0xFE;
        exec_with_keys(0xE19E, &mut state, &keypad_with(Key::F)).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        exec(0xE1A1, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        exec_with_keys(0xE1A1, &mut state, &keypad_with(Key::F)).unwrap();
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.delay_timer = 0xF;
        exec(0xF107, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_waits_without_key() {
        let mut state = State::new();
        exec(0xF10A, &mut state).unwrap();
        assert_eq!(state.mode, Mode::WaitingForKey { register: 0x1 });
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_fx0a_stores_lowest_key() {
        let mut state = State::new();
        let mut keypad = keypad_with(Key::V);
        keypad.update(Key::S, true);
        state.mode = Mode::WaitingForKey { register: 0x1 };
        exec_with_keys(0xF10A, &mut state, &keypad).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.mode, Mode::Running);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        exec(0xF115, &mut state).unwrap();
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        exec(0xF118, &mut state).unwrap();
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        exec(0xF11E, &mut state).unwrap();
        assert_eq!(state.i, 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx1e_add_past_address_space_sets_flag() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.v[0x1] = 0x3;
        exec(0xF11E, &mut state).unwrap();
        assert_eq!(state.i, 0x1001);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        exec(0xF129, &mut state).unwrap();
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        // 0x7B -> 123
        state.v[0x1] = 0x7B;
        state.i = 0x300;
        exec(0xF133, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_fx33_ld_at_end_of_memory_wraps() {
        let mut state = State::new();
        state.v[0x1] = 255;
        state.i = 0xFFF;
        exec(0xF133, &mut state).unwrap();
        assert_eq!(state.memory[0xFFF], 0x2);
        assert_eq!(state.memory[0x000..0x002], [0x5, 0x5]);
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        exec(0xF455, &mut state).unwrap();
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x305);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x305].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        state.v[0x5] = 0xAA;
        exec(0xF465, &mut state).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0xAA]);
        assert_eq!(state.i, 0x305);
    }
}
