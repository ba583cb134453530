use super::{AluOp, Cpu, Flags, ShiftOp};

/// Carry out of bit 3, recovered from the operands and the result.
///
/// Works for addition and subtraction, with or without a carry-in, because
/// bit 4 of `a ^ b` is what bit 4 of the result would be without a carry
/// from the low nibble.
#[inline]
pub(super) fn half_carry(a: u8, b: u8, result: u8) -> bool {
    (a ^ b ^ result) & 0x10 != 0
}

impl Cpu {
    /// Dispatch one of the eight accumulator operations.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.regs.a = self.alu_sub(value, false),
            AluOp::Sbc => self.regs.a = self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            // CP is SUB with the result thrown away.
            AluOp::Cp => {
                self.alu_sub(value, false);
            }
        }
    }

    /// 8-bit ADD/ADC on A.
    fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u16::from(use_carry && self.regs.flag(Flags::C));
        let full = u16::from(a) + u16::from(value) + carry_in;
        let result = full as u8;

        self.regs.a = result;
        self.regs.f = Flags::empty();
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::H, half_carry(a, value, result));
        self.regs.set_flag(Flags::C, full > 0xFF);
    }

    /// 8-bit SUB/SBC/CP on A. Returns the result without storing it.
    fn alu_sub(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.regs.flag(Flags::C));
        let full = i16::from(a) - i16::from(value) - carry_in;
        let result = full as u8;

        self.regs.f = Flags::N;
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::H, half_carry(a, value, result));
        self.regs.set_flag(Flags::C, full < 0);
        result
    }

    #[inline]
    fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.regs.f = Flags::H;
        self.regs.set_flag(Flags::Z, self.regs.a == 0);
    }

    #[inline]
    fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.regs.f = Flags::empty();
        self.regs.set_flag(Flags::Z, self.regs.a == 0);
    }

    #[inline]
    fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.regs.f = Flags::empty();
        self.regs.set_flag(Flags::Z, self.regs.a == 0);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// The correction (0x06 for the low digit, 0x60 for the high digit) is
    /// chosen from N, H and C. Updates A, Z, H (always cleared) and C;
    /// leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.regs.flag(Flags::C) { 0x60 } else { 0x00 };
        if self.regs.flag(Flags::H) {
            adjust |= 0x06;
        }

        if !self.regs.flag(Flags::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.set_flag(Flags::C, adjust >= 0x60);
        self.regs.set_flag(Flags::H, false);
        self.regs.set_flag(Flags::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL). Updates Z, N, H; C is untouched.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, half_carry(value, 1, result));
        result
    }

    /// DEC r / DEC (HL). Updates Z, N, H; C is untouched.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::N, true);
        self.regs.set_flag(Flags::H, half_carry(value, 1, result));
        result
    }

    /// `ADD HL,rr`. Z is unaffected; H is the carry out of bit 11 and C the
    /// carry out of bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);

        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, (hl ^ value ^ result) & 0x1000 != 0);
        self.regs.set_flag(Flags::C, carry);

        self.regs.set_hl(result);
    }

    /// `ADD SP,r8` and `LD HL,SP+r8`: signed 8-bit offset added to a 16-bit
    /// base. Z and N are cleared; H and C come from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = signed_offset(imm8);
        let result = base.wrapping_add(offset);
        self.regs.f = Flags::empty();
        self.regs.set_flag(Flags::H, (base ^ offset ^ result) & 0x0010 != 0);
        self.regs.set_flag(Flags::C, (base ^ offset ^ result) & 0x0100 != 0);
        result
    }

    /// CB rotate/shift group. Z from the result, C from the evicted bit,
    /// N and H cleared.
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_in = self.regs.flag(Flags::C);
        let (result, carry) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.regs.f = Flags::empty();
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::C, carry);
        result
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotate on A, except Z is always cleared.
    pub(super) fn alu_rotate_a(&mut self, op: ShiftOp) {
        self.regs.a = self.alu_shift(op, self.regs.a);
        self.regs.set_flag(Flags::Z, false);
    }
}

/// Reconstruct a two's-complement displacement from its unsigned byte and
/// sign-extend it to 16 bits.
#[inline]
pub(super) fn signed_offset(imm8: u8) -> u16 {
    let value = if imm8 > 127 {
        i16::from(imm8) - 256
    } else {
        i16::from(imm8)
    };
    value as u16
}
