/// MBC1 register file.
///
/// A 5-bit ROM bank register plus a 2-bit secondary register. The mode
/// register decides whether the secondary bits extend the ROM bank
/// (mode 0) or select the RAM bank (mode 1).
#[derive(Clone, Debug)]
pub(super) struct Mbc1 {
    bank_low5: u8,
    bank_high2: u8,
    ram_enabled: bool,
    mode: u8,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            bank_low5: 1,
            bank_high2: 0,
            ram_enabled: false,
            mode: 0,
        }
    }

    /// Bank mapped at 0x4000-0x7FFF.
    pub(super) fn rom_bank(&self) -> u16 {
        let low = u16::from(self.bank_low5);
        if self.mode == 0 {
            low | (u16::from(self.bank_high2) << 5)
        } else {
            low
        }
    }

    pub(super) fn ram_bank(&self) -> u8 {
        if self.mode == 1 {
            self.bank_high2
        } else {
            0
        }
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value == 0x0A,
            0x2000..=0x3FFF => {
                // Bank 0 cannot be mapped into the switchable window.
                self.bank_low5 = match value & 0x1F {
                    0 => 1,
                    bank => bank,
                };
            }
            0x4000..=0x5FFF => self.bank_high2 = value & 0x03,
            0x6000..=0x7FFF => self.mode = value & 0x01,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_zero_selects_bank_one() {
        let mut mbc = Mbc1::new();
        mbc.write_register(0x2000, 0x00);
        assert_eq!(mbc.rom_bank(), 1);
    }

    #[test]
    fn bank_number_is_masked_to_five_bits() {
        let mut mbc = Mbc1::new();
        mbc.write_register(0x2000, 0x1F);
        assert_eq!(mbc.rom_bank(), 0x1F);
        // 0x20 masks to 0, which is then coerced to 1.
        mbc.write_register(0x3FFF, 0x20);
        assert_eq!(mbc.rom_bank(), 1);
        mbc.write_register(0x2000, 0x25);
        assert_eq!(mbc.rom_bank(), 0x05);
    }

    #[test]
    fn mode_selects_meaning_of_secondary_bits() {
        let mut mbc = Mbc1::new();
        mbc.write_register(0x2000, 0x02);
        mbc.write_register(0x4000, 0x03);

        assert_eq!(mbc.rom_bank(), 0x62);
        assert_eq!(mbc.ram_bank(), 0);

        mbc.write_register(0x6000, 0x01);
        assert_eq!(mbc.rom_bank(), 0x02);
        assert_eq!(mbc.ram_bank(), 3);
    }

    #[test]
    fn ram_enable_requires_exact_value() {
        let mut mbc = Mbc1::new();
        mbc.write_register(0x0000, 0x0A);
        assert!(mbc.ram_enabled());
        mbc.write_register(0x1FFF, 0x1A);
        assert!(!mbc.ram_enabled());
        mbc.write_register(0x0000, 0x0A);
        mbc.write_register(0x0000, 0x00);
        assert!(!mbc.ram_enabled());
    }
}
