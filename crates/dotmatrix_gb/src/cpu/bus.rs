use crate::error::EmuError;

/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU only ever talks to memory through this trait. System buses route
/// each address to its backing device; test buses can be a flat array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read: low byte at `addr`, high byte at `addr + 1`.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Advance bus-side peripherals by a given number of CPU T-cycles.
    ///
    /// Default implementation does nothing; system buses override this to
    /// drive the display controller, timer and DMA engines.
    fn tick(&mut self, _cycles: u32) {}

    /// Whether the STOP state should be left (a joypad line went low).
    ///
    /// Buses without input hardware never wake the CPU from STOP.
    fn stop_wake_requested(&mut self) -> bool {
        false
    }

    /// Take a fatal error raised by a bus side effect during the last
    /// instruction, such as an out-of-range ROM bank selection.
    fn take_fault(&mut self) -> Option<EmuError> {
        None
    }
}
