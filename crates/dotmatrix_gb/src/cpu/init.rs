use crate::machine::GameBoyModel;

use super::{Cpu, CpuMode, Flags, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A DMG CPU in the state the boot ROM leaves it in.
    pub fn new() -> Self {
        Self::with_model(GameBoyModel::Dmg)
    }

    pub fn with_model(model: GameBoyModel) -> Self {
        let mut cpu = Self::zeroed();
        cpu.apply_boot_state(model);
        cpu
    }

    /// A CPU with every register cleared and PC at 0x0000.
    pub fn zeroed() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            mode: CpuMode::Running,
            halt_bug: false,
            ime_enable_delay: 0,
            ime_disable_delay: 0,
            cycles: 0,
            locked: None,
        }
    }

    /// Reset the CPU to its post-boot state for `model`.
    pub fn reset(&mut self, model: GameBoyModel) {
        *self = Self::with_model(model);
    }

    /// Initialize registers to match the boot ROM's state after it hands
    /// control to cartridge code at 0x0100.
    ///
    /// These values are the ones documented in Pan Docs ("Power Up
    /// Sequence"). IME is clear; the cartridge enables interrupts itself.
    fn apply_boot_state(&mut self, model: GameBoyModel) {
        match model {
            GameBoyModel::Dmg => {
                self.regs.a = 0x01;
                self.regs.f = Flags::Z | Flags::H | Flags::C;
                self.regs.b = 0x00;
                self.regs.c = 0x13;
                self.regs.d = 0x00;
                self.regs.e = 0xD8;
                self.regs.h = 0x01;
                self.regs.l = 0x4D;
            }
            GameBoyModel::Cgb => {
                // A=0x11 is how cartridges detect colour hardware.
                self.regs.a = 0x11;
                self.regs.f = Flags::Z;
                self.regs.b = 0x00;
                self.regs.c = 0x00;
                self.regs.d = 0xFF;
                self.regs.e = 0x56;
                self.regs.h = 0x00;
                self.regs.l = 0x0D;
            }
        }
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
    }
}
