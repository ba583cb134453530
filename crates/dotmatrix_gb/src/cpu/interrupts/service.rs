use super::super::{Bus, Cpu, CpuMode};
use super::Interrupt;

/// Interrupt entry costs five M-cycles.
const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Pending and enabled interrupt lines (`IE & IF`, five bits).
    #[inline]
    pub(in crate::cpu) fn pending_interrupts<B: Bus>(&mut self, bus: &mut B) -> u8 {
        bus.read8(0xFFFF) & bus.read8(0xFF0F) & 0x1F
    }

    /// Leave HALT as soon as any enabled interrupt is requested, whether or
    /// not IME is set.
    pub(in crate::cpu) fn wake_from_halt<B: Bus>(&mut self, bus: &mut B) {
        if self.mode == CpuMode::Halted && self.pending_interrupts(bus) != 0 {
            self.mode = CpuMode::Running;
        }
    }

    /// Dispatch the highest-priority pending interrupt if IME is set.
    ///
    /// Clears IME and the IF bit of the interrupt being serviced, pushes the
    /// return address and jumps to the vector. Returns the cycles spent, or `None` when
    /// nothing was dispatched.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime {
            return None;
        }

        let iflags = bus.read8(0xFF0F);
        let pending = bus.read8(0xFFFF) & iflags & 0x1F;
        let interrupt = Interrupt::highest_priority(pending)?;

        self.ime = false;
        self.mode = CpuMode::Running;
        bus.write8(0xFF0F, iflags & !interrupt.mask());

        // A HALT-bug fetch still owed at dispatch returns to the HALT byte.
        let pc = if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            interrupt.vector(),
            pc,
            self.regs.sp,
        );

        Some(DISPATCH_CYCLES)
    }
}
