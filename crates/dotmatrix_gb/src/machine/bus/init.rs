use super::GameBoyBus;

impl GameBoyBus {
    /// Put IO registers in the state the boot ROM leaves behind.
    pub(crate) fn apply_boot_state(&mut self) {
        self.randomize_internal_ram();

        self.serial.apply_boot_state();
        self.timer.apply_boot_state();
        self.apu.apply_boot_state();
        self.ppu.apply_boot_state();

        // The boot ROM returns with a V-blank request still pending.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;
    }

    /// Fill WRAM and HRAM with pseudo-random bytes.
    ///
    /// Both power up holding garbage. A fixed-seed xorshift keeps runs
    /// reproducible while software still cannot rely on zeroed memory.
    fn randomize_internal_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };

        for byte in self.wram.iter_mut() {
            *byte = next_byte();
        }
        for byte in self.hram.iter_mut() {
            *byte = next_byte();
        }
    }
}
