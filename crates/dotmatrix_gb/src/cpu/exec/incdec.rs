use crate::cpu::{Bus, Cpu, Operand, Reg16};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u32 {
        let value = self.read_operand(bus, operand);
        let result = self.alu_inc8(value);
        self.write_operand(bus, operand, result);
        if operand == Operand::HlIndirect {
            12
        } else {
            4
        }
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u32 {
        let value = self.read_operand(bus, operand);
        let result = self.alu_dec8(value);
        self.write_operand(bus, operand, result);
        if operand == Operand::HlIndirect {
            12
        } else {
            4
        }
    }

    // 16-bit INC/DEC never touch the flags.
    pub(super) fn exec_inc16(&mut self, reg: Reg16) -> u32 {
        let value = self.read_r16(reg).wrapping_add(1);
        self.write_r16(reg, value);
        8
    }

    pub(super) fn exec_dec16(&mut self, reg: Reg16) -> u32 {
        let value = self.read_r16(reg).wrapping_sub(1);
        self.write_r16(reg, value);
        8
    }
}
