/// MBC5 register file.
///
/// The 9-bit ROM bank is split across two registers; bank 0 is a legal
/// selection for the switchable window. RAM banking is always active.
#[derive(Clone, Debug)]
pub(super) struct Mbc5 {
    rom_bank_low8: u8,
    rom_bank_high1: u8,
    ram_bank: u8,
    ram_enabled: bool,
}

impl Mbc5 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank_low8: 1,
            rom_bank_high1: 0,
            ram_bank: 0,
            ram_enabled: false,
        }
    }

    #[inline]
    pub(super) fn rom_bank(&self) -> u16 {
        (u16::from(self.rom_bank_high1) << 8) | u16::from(self.rom_bank_low8)
    }

    pub(super) fn ram_bank(&self) -> u8 {
        self.ram_bank
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value == 0x0A,
            0x2000..=0x2FFF => self.rom_bank_low8 = value,
            0x3000..=0x3FFF => self.rom_bank_high1 = value & 0x01,
            0x4000..=0x5FFF => self.ram_bank = value & 0x0F,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_bit_bank_from_two_registers() {
        let mut mbc = Mbc5::new();
        mbc.write_register(0x2000, 0x34);
        mbc.write_register(0x3000, 0x01);
        assert_eq!(mbc.rom_bank(), 0x134);

        mbc.write_register(0x3000, 0xFE);
        assert_eq!(mbc.rom_bank(), 0x034);
    }

    #[test]
    fn bank_zero_is_allowed() {
        let mut mbc = Mbc5::new();
        mbc.write_register(0x2000, 0x00);
        assert_eq!(mbc.rom_bank(), 0);
    }

    #[test]
    fn ram_bank_is_four_bits() {
        let mut mbc = Mbc5::new();
        mbc.write_register(0x4000, 0x1F);
        assert_eq!(mbc.ram_bank(), 0x0F);
    }
}
