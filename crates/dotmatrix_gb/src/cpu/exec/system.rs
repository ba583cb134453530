use crate::cpu::{Bus, Cpu, CpuMode};

/// Steps before a staged IME change lands: the EI/DI step itself plus the
/// instruction that follows it.
const IME_DELAY_STEPS: u8 = 2;

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        // STOP is a 2-byte instruction; the second byte is padding.
        let _padding = self.fetch8(bus);
        self.mode = CpuMode::Stopped;
        4
    }

    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.ime && self.pending_interrupts(bus) != 0 {
            // HALT bug: the CPU does not halt and the next opcode byte is
            // read twice.
            self.halt_bug = true;
        } else {
            self.mode = CpuMode::Halted;
        }
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime_enable_delay = 0;
        self.ime_disable_delay = IME_DELAY_STEPS;
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_disable_delay = 0;
        self.ime_enable_delay = IME_DELAY_STEPS;
        4
    }
}
