/// Audio register file (0xFF10-0xFF3F). Values are stored so software can
/// read back what it wrote; no sound is produced.
pub(super) struct ApuRegisters {
    regs: [u8; 0x30],
}

const NR52: u16 = 0xFF26;
const WAVE_RAM: u16 = 0xFF30;

impl ApuRegisters {
    pub(super) fn new() -> Self {
        Self { regs: [0; 0x30] }
    }

    #[inline]
    fn index(addr: u16) -> usize {
        usize::from(addr - 0xFF10)
    }

    /// NR52 bit 7 ("Audio on/off").
    fn powered(&self) -> bool {
        self.regs[Self::index(NR52)] & 0x80 != 0
    }

    pub(super) fn apply_boot_state(&mut self) {
        const BOOT: [(u16, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        for (addr, value) in BOOT {
            self.regs[Self::index(addr)] = value;
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        self.regs[Self::index(addr)]
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            NR52 => self.write_nr52(value),
            // Wave RAM stays writable with the APU off.
            WAVE_RAM..=0xFF3F => self.regs[Self::index(addr)] = value,
            _ if self.powered() => self.regs[Self::index(addr)] = value,
            _ => log::trace!("GB APU: write 0x{:04X} ignored while powered off", addr),
        }
    }

    fn write_nr52(&mut self, value: u8) {
        let powering_off = self.powered() && value & 0x80 == 0;
        if powering_off {
            self.regs[..Self::index(NR52)].fill(0);
            self.regs[Self::index(NR52)] = 0;
        }
        // Only bit 7 is writable; the channel status bits are read-only.
        let nr52 = &mut self.regs[Self::index(NR52)];
        *nr52 = (*nr52 & 0x7F) | (value & 0x80);
    }
}
