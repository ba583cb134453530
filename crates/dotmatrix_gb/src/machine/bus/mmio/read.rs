use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in crate::machine::bus) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.read_rom(addr),

            // VRAM reads 0xFF while the display controller owns it.
            0x8000..=0x9FFF => self.ppu.read_vram(addr),

            0xA000..=0xBFFF => self.cartridge.read_ram(addr),

            0xC000..=0xDFFF => self.wram[self.wram_offset(addr)],

            // Echo RAM: 0xE000..0xFDFF mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.wram[self.wram_offset(addr - 0x2000)],

            0xFE00..=0xFE9F => self.ppu.read_oam(addr),

            // Unusable area 0xFEA0..0xFEFF reads as 0xFF.
            0xFEA0..=0xFEFF => 0xFF,

            0xFF00..=0xFF7F => self.read_io(addr),

            0xFF80..=0xFFFE => self.hram[usize::from(addr - 0xFF80)],

            0xFFFF => self.ie_reg,
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01 => self.serial.read_sb(),
            0xFF02 => self.serial.read_sc(),
            0xFF04..=0xFF07 => self.timer.read(addr),

            // Only the lower 5 bits exist; the rest read as 1.
            0xFF0F => self.if_reg | 0xE0,

            0xFF10..=0xFF3F => self.apu.read(addr),

            0xFF46 => self.oam_dma.source_page(),
            0xFF40..=0xFF4B | 0xFF4F | 0xFF68..=0xFF6B => self.ppu.read_register(addr),

            // --- CGB-only registers ---
            0xFF51..=0xFF55 if self.is_cgb() => self.vram_dma.read(addr),
            0xFF70 if self.is_cgb() => 0xF8 | self.wram_bank as u8,

            _ => 0xFF,
        }
    }
}
