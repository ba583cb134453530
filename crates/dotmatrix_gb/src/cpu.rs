mod alu;
mod bus;
mod cb;
mod decode;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use decode::{
    decode, decode_cb, AluOp, CbInstruction, Condition, Indirect, Instruction, Operand, Reg16,
    Reg16Stack, ShiftOp,
};
pub use interrupts::Interrupt;
pub use regs::{Flags, Registers};

use crate::error::EmuError;

/// Execution state of the core.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CpuMode {
    #[default]
    Running,
    /// Entered by HALT; left when `IE & IF` becomes non-zero.
    Halted,
    /// Entered by STOP; left on a joypad press.
    Stopped,
}

/// Sharp LR35902 core.
///
/// The CPU owns only architectural state. Every memory access goes through a
/// [`Bus`], which also receives the cycle count of each instruction so that
/// the display controller and timer advance in lock-step.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    mode: CpuMode,
    /// Set when HALT is executed with IME clear and an interrupt already
    /// pending: the next opcode fetch does not advance PC.
    halt_bug: bool,
    /// Steps remaining before EI / DI take effect. Zero means idle.
    ime_enable_delay: u8,
    ime_disable_delay: u8,
    /// Total T-cycles consumed since power-on.
    cycles: u64,
    /// Set once a fatal error has been reported; the core refuses to run
    /// until `reset`.
    locked: Option<EmuError>,
}

impl Cpu {
    pub fn mode(&self) -> CpuMode {
        self.mode
    }

    pub fn is_halted(&self) -> bool {
        self.mode == CpuMode::Halted
    }

    pub fn is_stopped(&self) -> bool {
        self.mode == CpuMode::Stopped
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Total T-cycles executed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

#[cfg(test)]
mod tests;
