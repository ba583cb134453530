use crate::cpu::{Bus, Condition, Cpu, Reg16Stack};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: Reg16Stack) -> u32 {
        let value = self.read_r16_stack(reg);
        self.push_u16(bus, value);
        16
    }

    /// POP AF drops the low nibble of F through `set_af`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: Reg16Stack) -> u32 {
        let value = self.pop_u16(bus);
        self.write_r16_stack(reg, value);
        12
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Option<Condition>) -> u32 {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Option<Condition>) -> u32 {
        match cond {
            None => {
                self.regs.pc = self.pop_u16(bus);
                16
            }
            Some(_) if self.condition(cond) => {
                self.regs.pc = self.pop_u16(bus);
                20
            }
            Some(_) => 8,
        }
    }

    /// RETI enables IME immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        self.ime_enable_delay = 0;
        self.ime_disable_delay = 0;
        16
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = u16::from(vector);
        16
    }
}
