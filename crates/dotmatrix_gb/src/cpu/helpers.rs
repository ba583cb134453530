use super::{Bus, Condition, Cpu, Flags, Operand, Reg16, Reg16Stack};

impl Cpu {
    /// Read an 8-bit register or (HL).
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::B => self.regs.b,
            Operand::C => self.regs.c,
            Operand::D => self.regs.d,
            Operand::E => self.regs.e,
            Operand::H => self.regs.h,
            Operand::L => self.regs.l,
            Operand::HlIndirect => bus.read8(self.regs.hl()),
            Operand::A => self.regs.a,
        }
    }

    /// Write an 8-bit register or (HL).
    #[inline]
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::B => self.regs.b = value,
            Operand::C => self.regs.c = value,
            Operand::D => self.regs.d = value,
            Operand::E => self.regs.e = value,
            Operand::H => self.regs.h = value,
            Operand::L => self.regs.l = value,
            Operand::HlIndirect => bus.write8(self.regs.hl(), value),
            Operand::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn read_r16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::Bc => self.regs.bc(),
            Reg16::De => self.regs.de(),
            Reg16::Hl => self.regs.hl(),
            Reg16::Sp => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_r16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::Bc => self.regs.set_bc(value),
            Reg16::De => self.regs.set_de(value),
            Reg16::Hl => self.regs.set_hl(value),
            Reg16::Sp => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn read_r16_stack(&self, reg: Reg16Stack) -> u16 {
        match reg {
            Reg16Stack::Bc => self.regs.bc(),
            Reg16Stack::De => self.regs.de(),
            Reg16Stack::Hl => self.regs.hl(),
            Reg16Stack::Af => self.regs.af(),
        }
    }

    #[inline]
    pub(super) fn write_r16_stack(&mut self, reg: Reg16Stack, value: u16) {
        match reg {
            Reg16Stack::Bc => self.regs.set_bc(value),
            Reg16Stack::De => self.regs.set_de(value),
            Reg16Stack::Hl => self.regs.set_hl(value),
            Reg16Stack::Af => self.regs.set_af(value),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cond: Option<Condition>) -> bool {
        match cond {
            None => true,
            Some(Condition::Nz) => !self.regs.flag(Flags::Z),
            Some(Condition::Z) => self.regs.flag(Flags::Z),
            Some(Condition::Nc) => !self.regs.flag(Flags::C),
            Some(Condition::C) => self.regs.flag(Flags::C),
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The first fetch after the HALT bug reads the byte but leaves
            // PC where it was, so the byte is executed twice.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward; memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}
