use super::super::Cpu;

impl Cpu {
    /// Advance the staged IME changes requested by EI / DI.
    ///
    /// Called once per step after the instruction has executed, before the
    /// interrupt check. A counter that reaches zero in this call applies
    /// its change.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay > 0 {
            self.ime_enable_delay -= 1;
            if self.ime_enable_delay == 0 {
                self.ime = true;
            }
        }
        if self.ime_disable_delay > 0 {
            self.ime_disable_delay -= 1;
            if self.ime_disable_delay == 0 {
                self.ime = false;
            }
        }
    }
}
