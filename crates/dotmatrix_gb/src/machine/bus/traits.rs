use crate::cpu::Bus;
use crate::error::EmuError;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn tick(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.timer.tick(&mut self.if_reg);
        }

        if self.ppu.tick(cycles, &mut self.if_reg) {
            self.on_hblank();
        }

        self.tick_oam_dma(cycles);
    }

    fn stop_wake_requested(&mut self) -> bool {
        self.joypad.take_wake()
    }

    fn take_fault(&mut self) -> Option<EmuError> {
        self.fault.take()
    }
}
