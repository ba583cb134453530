/// CGB colour palette memory: eight palettes of four RGB555 colours,
/// reached through an index port (BCPS/OCPS) and a data port (BCPD/OCPD).
pub(super) struct PaletteRam {
    data: [u8; 64],
    index: u8,
    auto_increment: bool,
}

impl PaletteRam {
    pub(super) fn new() -> Self {
        Self {
            // Power-on contents are undefined; white keeps unset palettes
            // visible as a blank screen.
            data: [0xFF; 64],
            index: 0,
            auto_increment: false,
        }
    }

    pub(super) fn read_index(&self) -> u8 {
        0x40 | self.index | if self.auto_increment { 0x80 } else { 0 }
    }

    pub(super) fn write_index(&mut self, value: u8) {
        self.index = value & 0x3F;
        self.auto_increment = value & 0x80 != 0;
    }

    pub(super) fn read_data(&self) -> u8 {
        self.data[usize::from(self.index)]
    }

    pub(super) fn write_data(&mut self, value: u8) {
        self.data[usize::from(self.index)] = value;
        if self.auto_increment {
            self.index = (self.index + 1) & 0x3F;
        }
    }

    /// RGB888 for colour `color` (0-3) of palette `palette` (0-7).
    pub(super) fn rgb(&self, palette: u8, color: u8) -> [u8; 3] {
        let i = usize::from(palette & 0x07) * 8 + usize::from(color & 0x03) * 2;
        let raw = u16::from_le_bytes([self.data[i], self.data[i + 1]]);
        let expand = |c: u16| {
            let c = (c & 0x1F) as u8;
            (c << 3) | (c >> 2)
        };
        [expand(raw), expand(raw >> 5), expand(raw >> 10)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_increment_walks_the_table() {
        let mut ram = PaletteRam::new();
        ram.write_index(0x80 | 0x3E);
        ram.write_data(0x11);
        ram.write_data(0x22);
        assert_eq!(ram.read_index(), 0xC0);

        ram.write_index(0x3E);
        assert_eq!(ram.read_data(), 0x11);
        ram.write_index(0x3F);
        assert_eq!(ram.read_data(), 0x22);
    }

    #[test]
    fn rgb555_expands_to_full_range() {
        let mut ram = PaletteRam::new();
        // Palette 1, colour 2: pure red.
        ram.write_index(0x80 | 12);
        ram.write_data(0x1F);
        ram.write_data(0x00);
        assert_eq!(ram.rgb(1, 2), [0xFF, 0x00, 0x00]);
        assert_eq!(ram.rgb(0, 0), [0xFF, 0xFF, 0xFF]);
    }
}
