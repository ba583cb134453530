mod bus;
mod cartridge;
mod gameboy;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use bus::Button;
pub use cartridge::{CartridgeHeader, ControllerKind, RtcClock, SystemClock};
pub use gameboy::GameBoy;
pub use ppu::PpuMode;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum GameBoyModel {
    #[default]
    Dmg,
    /// Colour hardware: two VRAM banks, eight WRAM banks, palette RAM and
    /// VRAM DMA.
    Cgb,
}

/// T-cycles in one full frame (154 lines of 456 dots).
pub const CYCLES_PER_FRAME: u64 = 70_224;
