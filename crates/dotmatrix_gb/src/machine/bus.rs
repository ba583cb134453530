use crate::error::EmuError;

use super::{
    cartridge::Cartridge, ppu::Ppu, serial::Serial, timer::Timer, GameBoyModel,
};

mod apu;
mod dma;
mod init;
mod joypad;
mod mmio;
mod traits;

use apu::ApuRegisters;
use dma::{OamDma, VramDma};
use joypad::Joypad;

pub use joypad::Button;

const WRAM_BANK_SIZE: usize = 0x1000;
const WRAM_BANKS: usize = 8;
const HRAM_SIZE: usize = 0x7F;

/// The system bus: routes every CPU address to the cartridge, work RAM,
/// high RAM, the display controller or an IO block, and drives the
/// peripherals forward as the CPU consumes cycles.
pub(crate) struct GameBoyBus {
    model: GameBoyModel,
    pub(crate) cartridge: Cartridge,
    wram: Box<[u8; WRAM_BANK_SIZE * WRAM_BANKS]>,
    /// Bank mapped at 0xD000-0xDFFF, always 1..=7.
    wram_bank: usize,
    hram: [u8; HRAM_SIZE],
    pub(crate) if_reg: u8,
    pub(crate) ie_reg: u8,
    pub(crate) ppu: Ppu,
    timer: Timer,
    pub(crate) serial: Serial,
    joypad: Joypad,
    apu: ApuRegisters,
    oam_dma: OamDma,
    vram_dma: VramDma,
    /// Fatal error raised by a write side effect, reported by `take_fault`.
    fault: Option<EmuError>,
}

impl GameBoyBus {
    pub(crate) fn new(model: GameBoyModel, cartridge: Cartridge, dmg_palette: [[u8; 3]; 4]) -> Self {
        Self {
            model,
            cartridge,
            wram: Box::new([0; WRAM_BANK_SIZE * WRAM_BANKS]),
            wram_bank: 1,
            hram: [0; HRAM_SIZE],
            if_reg: 0,
            ie_reg: 0,
            ppu: Ppu::new(model == GameBoyModel::Cgb, dmg_palette),
            timer: Timer::new(),
            serial: Serial::default(),
            joypad: Joypad::new(),
            apu: ApuRegisters::new(),
            oam_dma: OamDma::default(),
            vram_dma: VramDma::default(),
            fault: None,
        }
    }

    #[inline]
    fn is_cgb(&self) -> bool {
        self.model == GameBoyModel::Cgb
    }

    /// Offset into `wram` for an address in 0xC000-0xDFFF.
    #[inline]
    fn wram_offset(&self, addr: u16) -> usize {
        let addr = usize::from(addr);
        if addr < 0xD000 {
            addr - 0xC000
        } else {
            self.wram_bank * WRAM_BANK_SIZE + (addr - 0xD000)
        }
    }

    pub(crate) fn set_button(&mut self, button: Button, pressed: bool) {
        self.joypad.set(button, pressed, &mut self.if_reg);
    }

    /// Side-effect-free read for host inspection and the OAM DMA engine:
    /// honours banking but not the display controller's access locks.
    pub(crate) fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF => self.ppu.read_vram_direct(addr),
            0xFE00..=0xFE9F => self.ppu.read_oam_direct(addr),
            _ => self.read8_mmio(addr),
        }
    }
}
