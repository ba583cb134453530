use super::rtc::Rtc;

/// What the 0xA000-0xBFFF window currently shows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Mbc3Window {
    Ram(u8),
    Clock(u8),
    Unmapped,
}

/// MBC3 register file: 7-bit ROM bank, RAM bank / clock register select,
/// and the optional real-time clock.
#[derive(Clone, Debug)]
pub(super) struct Mbc3 {
    rom_bank: u8,
    select: u8,
    ram_enabled: bool,
    pub(super) rtc: Option<Rtc>,
}

impl Mbc3 {
    pub(super) fn new(rtc: Option<Rtc>) -> Self {
        Self {
            rom_bank: 1,
            select: 0,
            ram_enabled: false,
            rtc,
        }
    }

    pub(super) fn rom_bank(&self) -> u16 {
        u16::from(self.rom_bank)
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub(super) fn window(&self) -> Mbc3Window {
        match self.select {
            bank @ 0x00..=0x03 => Mbc3Window::Ram(bank),
            register @ 0x08..=0x0C if self.rtc.is_some() => Mbc3Window::Clock(register),
            _ => Mbc3Window::Unmapped,
        }
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8, now: u64) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = match value & 0x7F {
                    0 => 1,
                    bank => bank,
                };
            }
            0x4000..=0x5FFF => self.select = value,
            0x6000..=0x7FFF => {
                if let Some(rtc) = self.rtc.as_mut() {
                    rtc.write_latch(value, now);
                }
            }
            _ => {}
        }
    }

    pub(super) fn read_clock(&self, register: u8) -> u8 {
        self.rtc.as_ref().map_or(0xFF, |rtc| rtc.read(register))
    }

    pub(super) fn write_clock(&mut self, register: u8, value: u8, now: u64) {
        if let Some(rtc) = self.rtc.as_mut() {
            rtc.write(register, value, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rom_bank_is_seven_bits_and_never_zero() {
        let mut mbc = Mbc3::new(None);
        mbc.write_register(0x2000, 0x00, 0);
        assert_eq!(mbc.rom_bank(), 1);
        mbc.write_register(0x2000, 0xFF, 0);
        assert_eq!(mbc.rom_bank(), 0x7F);
        mbc.write_register(0x2000, 0x80, 0);
        assert_eq!(mbc.rom_bank(), 1);
    }

    #[test]
    fn select_register_maps_ram_or_clock() {
        let mut mbc = Mbc3::new(Some(Rtc::new(0)));
        mbc.write_register(0x4000, 0x02, 0);
        assert_eq!(mbc.window(), Mbc3Window::Ram(2));
        mbc.write_register(0x4000, 0x0B, 0);
        assert_eq!(mbc.window(), Mbc3Window::Clock(0x0B));
        mbc.write_register(0x4000, 0x05, 0);
        assert_eq!(mbc.window(), Mbc3Window::Unmapped);
    }

    #[test]
    fn clock_registers_unmapped_without_timer() {
        let mut mbc = Mbc3::new(None);
        mbc.write_register(0x4000, 0x08, 0);
        assert_eq!(mbc.window(), Mbc3Window::Unmapped);
    }
}
