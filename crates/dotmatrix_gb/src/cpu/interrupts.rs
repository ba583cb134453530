mod ime;
mod service;

/// Interrupt sources, in dispatch priority order (lowest id wins).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit in IE/IF.
    #[inline]
    pub fn mask(self) -> u8 {
        1 << self as u8
    }

    /// Fixed entry vector: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    /// Highest-priority source among the set bits of `pending`.
    pub fn highest_priority(pending: u8) -> Option<Interrupt> {
        Self::ALL
            .into_iter()
            .find(|interrupt| pending & interrupt.mask() != 0)
    }
}
