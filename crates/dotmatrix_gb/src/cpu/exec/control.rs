use crate::cpu::alu::signed_offset;
use crate::cpu::{Bus, Condition, Cpu};

impl Cpu {
    /// JR / JR cc. The displacement is relative to the address following
    /// the operand byte.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Option<Condition>) -> u32 {
        let offset = self.fetch8(bus);
        if self.condition(cond) {
            self.regs.pc = self.regs.pc.wrapping_add(signed_offset(offset));
            12
        } else {
            8
        }
    }

    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Option<Condition>) -> u32 {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }
}
