use crate::cpu::Interrupt;

/// Timer / divider unit (DIV, TIMA, TMA, TAC).
///
/// DIV is the upper byte of a 16-bit counter that advances every T-cycle.
/// TIMA increments on the falling edge of the counter bit selected by TAC,
/// ANDed with the enable bit. An overflow leaves TIMA at zero for one cycle,
/// then reloads it from TMA and requests the timer interrupt.
pub(super) struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    tac: u8,
    overflow: bool,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            overflow: false,
        }
    }

    /// Seed the counter so that DIV reads 0xAB when cartridge code starts.
    pub(super) fn apply_boot_state(&mut self) {
        self.counter = 0xAB00;
    }

    /// Counter bit watched by TIMA, per TAC[1:0]:
    /// 00 → bit 9 (4096 Hz), 01 → bit 3, 10 → bit 5, 11 → bit 7.
    #[inline]
    fn input(&self) -> bool {
        let bit = match self.tac & 0x03 {
            0x00 => 9,
            0x01 => 3,
            0x02 => 5,
            _ => 7,
        };
        self.tac & 0x04 != 0 && self.counter & (1 << bit) != 0
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        self.overflow = overflow;
    }

    /// Advance by one T-cycle.
    pub(super) fn tick(&mut self, if_reg: &mut u8) {
        if self.overflow {
            self.overflow = false;
            self.tima = self.tma;
            *if_reg |= Interrupt::Timer.mask();
        }
        let before = self.input();
        self.counter = self.counter.wrapping_add(1);
        if before && !self.input() {
            self.increment_tima();
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => (self.counter >> 8) as u8,
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        let before = self.input();
        match addr {
            0xFF04 => self.counter = 0,
            0xFF05 => {
                // A write during the reload cycle cancels the reload.
                self.tima = value;
                self.overflow = false;
            }
            0xFF06 => self.tma = value,
            0xFF07 => self.tac = value & 0x07,
            _ => return,
        }
        // Resetting DIV or changing TAC can produce a falling edge.
        if before && !self.input() {
            self.increment_tima();
        }
    }
}
