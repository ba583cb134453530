use crate::cpu::{Bus, Cpu, Indirect, Operand, Reg16};

impl Cpu {
    pub(super) fn exec_ld_r16_imm<B: Bus>(&mut self, bus: &mut B, reg: Reg16) -> u32 {
        let value = self.fetch16(bus);
        self.write_r16(reg, value);
        12
    }

    /// Resolve an indirect operand to its address, applying HL+/HL- after
    /// the address has been taken.
    fn indirect_address(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::Bc => self.regs.bc(),
            Indirect::De => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_address(ind);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_address(ind);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_imm16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
        20
    }

    pub(super) fn exec_ld_imm8<B: Bus>(&mut self, bus: &mut B, dst: Operand) -> u32 {
        let value = self.fetch8(bus);
        self.write_operand(bus, dst, value);
        if dst == Operand::HlIndirect {
            12
        } else {
            8
        }
    }

    /// LD r1,r2 (0x40-0x7F without 0x76).
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Operand, src: Operand) -> u32 {
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
        if dst == Operand::HlIndirect || src == Operand::HlIndirect {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_ldh_imm_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        bus.write8(0xFF00 | u16::from(offset), self.regs.a);
        12
    }

    pub(super) fn exec_ldh_a_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        self.regs.a = bus.read8(0xFF00 | u16::from(offset));
        12
    }

    pub(super) fn exec_ldh_c_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        bus.write8(0xFF00 | u16::from(self.regs.c), self.regs.a);
        8
    }

    pub(super) fn exec_ldh_a_c<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.a = bus.read8(0xFF00 | u16::from(self.regs.c));
        8
    }

    pub(super) fn exec_ld_imm16_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a);
        16
    }

    pub(super) fn exec_ld_a_imm16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        self.regs.a = bus.read8(addr);
        16
    }

    pub(super) fn exec_ld_hl_sp_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let value = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(value);
        12
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }
}
