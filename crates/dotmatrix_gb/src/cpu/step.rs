use crate::error::{EmuError, Result};

use super::{decode, Bus, Cpu, CpuMode, Instruction};

/// Cycles spent per step while HALT or STOP keeps the core idle.
const IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Execute one instruction (or one idle quantum while halted/stopped),
    /// advance the bus by its cost and service at most one interrupt.
    ///
    /// Returns the T-cycles consumed, including interrupt dispatch. A decode
    /// failure or a fault latched by the bus is fatal: the error is returned
    /// and every later call returns it again until the CPU is reset.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some(err) = &self.locked {
            return Err(err.clone());
        }

        let mut cycles = match self.mode {
            CpuMode::Stopped => {
                if bus.stop_wake_requested() {
                    log::trace!("GB CPU leaving STOP at pc=0x{:04X}", self.regs.pc);
                    self.mode = CpuMode::Running;
                }
                bus.tick(IDLE_CYCLES);
                IDLE_CYCLES
            }
            CpuMode::Halted => {
                bus.tick(IDLE_CYCLES);
                self.wake_from_halt(bus);
                IDLE_CYCLES
            }
            CpuMode::Running => {
                let pc = self.regs.pc;
                let opcode = self.fetch8(bus);
                let Some(instr) = decode(opcode) else {
                    return Err(self.lock(EmuError::Decode {
                        pc,
                        opcode,
                        prefixed: false,
                    }));
                };
                let cycles = self.execute(bus, instr);
                bus.tick(cycles);
                if instr == Instruction::Halt && self.mode == CpuMode::Halted {
                    log::trace!("GB CPU halted at pc=0x{:04X}", pc);
                }
                cycles
            }
        };

        self.apply_ime_delay();

        if let Some(dispatch) = self.handle_interrupts(bus) {
            bus.tick(dispatch);
            cycles += dispatch;
        }

        self.cycles += u64::from(cycles);

        if let Some(err) = bus.take_fault() {
            return Err(self.lock(err));
        }

        Ok(cycles)
    }

    fn lock(&mut self, err: EmuError) -> EmuError {
        log::error!(
            "GB CPU fatal: {} (pc=0x{:04X} sp=0x{:04X} cycles={})",
            err,
            self.regs.pc,
            self.regs.sp,
            self.cycles,
        );
        self.locked = Some(err.clone());
        err
    }
}
