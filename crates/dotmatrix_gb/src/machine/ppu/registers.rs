use super::{Ppu, LCDC_LCD_ENABLE, STAT_WRITABLE};

impl Ppu {
    /// LCD register read (0xFF40-0xFF4B except DMA, plus the CGB VBK and
    /// palette ports).
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc,
            0xFF41 => self.read_stat(),
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            0xFF4F if self.cgb => 0xFE | self.vram_bank as u8,
            0xFF68 if self.cgb => self.bg_palettes.read_index(),
            0xFF69 if self.cgb => self.bg_palettes.read_data(),
            0xFF6A if self.cgb => self.obj_palettes.read_index(),
            0xFF6B if self.cgb => self.obj_palettes.read_data(),
            _ => 0xFF,
        }
    }

    fn read_stat(&self) -> u8 {
        let mut stat = 0x80 | (self.stat & STAT_WRITABLE);
        if self.lcd_enabled() {
            stat |= self.mode as u8;
            if self.ly == self.lyc {
                stat |= 0x04;
            }
        }
        stat
    }

    pub(crate) fn write_register(&mut self, addr: u16, value: u8, if_reg: &mut u8) {
        match addr {
            0xFF40 => self.write_lcdc(value, if_reg),
            0xFF41 => self.stat = value & STAT_WRITABLE,
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                if self.lcd_enabled() {
                    self.compare_lyc(if_reg);
                }
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            0xFF4F if self.cgb => self.vram_bank = usize::from(value & 0x01),
            0xFF68 if self.cgb => self.bg_palettes.write_index(value),
            0xFF69 if self.cgb => self.bg_palettes.write_data(value),
            0xFF6A if self.cgb => self.obj_palettes.write_index(value),
            0xFF6B if self.cgb => self.obj_palettes.write_data(value),
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8, if_reg: &mut u8) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = value;
        let now_enabled = value & LCDC_LCD_ENABLE != 0;

        if was_enabled && !now_enabled {
            self.lcd_off();
        } else if !was_enabled && now_enabled {
            self.lcd_on(if_reg);
        }
    }
}
