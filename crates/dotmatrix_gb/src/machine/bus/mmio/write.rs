use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in crate::machine::bus) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // Writes to the ROM area program the bank controller. A bad
            // bank number is latched and surfaces after the instruction.
            0x0000..=0x7FFF => {
                if let Err(err) = self.cartridge.write_rom(addr, value) {
                    log::error!("GB bus: {} (write 0x{:02X} to 0x{:04X})", err, value, addr);
                    self.fault.get_or_insert(err);
                }
            }

            // VRAM: writes are ignored while the display controller owns it.
            0x8000..=0x9FFF => self.ppu.write_vram(addr, value),

            0xA000..=0xBFFF => self.cartridge.write_ram(addr, value),

            0xC000..=0xDFFF => {
                let offset = self.wram_offset(addr);
                self.wram[offset] = value;
            }

            0xE000..=0xFDFF => {
                let offset = self.wram_offset(addr - 0x2000);
                self.wram[offset] = value;
            }

            0xFE00..=0xFE9F => self.ppu.write_oam(addr, value),

            // Writes to the unusable area 0xFEA0..0xFEFF are ignored.
            0xFEA0..=0xFEFF => {}

            0xFF00..=0xFF7F => self.write_io(addr, value),

            0xFF80..=0xFFFE => self.hram[usize::from(addr - 0xFF80)] = value,

            0xFFFF => self.ie_reg = value,
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.joypad.write(value),
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value, &mut self.if_reg),
            0xFF04..=0xFF07 => self.timer.write(addr, value),

            0xFF0F => self.if_reg = value & 0x1F,

            0xFF10..=0xFF3F => self.apu.write(addr, value),

            // OAM DMA runs over the next 640 cycles, see `tick_oam_dma`.
            0xFF46 => {
                self.oam_dma.start(value);
                self.ppu.oam_dma_active = true;
            }
            0xFF40..=0xFF4B | 0xFF4F | 0xFF68..=0xFF6B => {
                self.ppu.write_register(addr, value, &mut self.if_reg)
            }

            // --- CGB-only registers ---
            0xFF51..=0xFF54 if self.is_cgb() => self.vram_dma.write_address(addr, value),
            0xFF55 if self.is_cgb() => self.write_hdma5(value),
            0xFF70 if self.is_cgb() => {
                // Bank 0 cannot be mapped at 0xD000.
                self.wram_bank = usize::from(value & 0x07).max(1);
            }

            _ => log::trace!("GB bus: write 0x{:02X} to unmapped IO 0x{:04X}", value, addr),
        }
    }
}
