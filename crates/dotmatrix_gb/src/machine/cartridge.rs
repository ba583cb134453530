mod header;
mod mbc1;
mod mbc3;
mod mbc5;
mod rtc;

pub use header::{CartridgeHeader, ControllerKind};
pub use rtc::{RtcClock, SystemClock};

use crate::error::{EmuError, Result};

use header::header_checksum_matches;
use mbc1::Mbc1;
use mbc3::{Mbc3, Mbc3Window};
use mbc5::Mbc5;
use rtc::Rtc;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// Bank controller variants.
#[derive(Clone, Debug)]
enum BankController {
    RomOnly,
    Mbc1(Mbc1),
    Mbc3(Mbc3),
    Mbc5(Mbc5),
}

impl BankController {
    fn rom_bank(&self) -> u16 {
        match self {
            BankController::RomOnly => 1,
            BankController::Mbc1(m) => m.rom_bank(),
            BankController::Mbc3(m) => m.rom_bank(),
            BankController::Mbc5(m) => m.rom_bank(),
        }
    }
}

/// ROM image, external RAM and the bank controller that maps them.
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    controller: BankController,
    clock: Box<dyn RtcClock>,
    /// Battery-backed state changed since the last `take_dirty`.
    dirty: bool,
}

impl Cartridge {
    pub(crate) fn new(
        rom: Vec<u8>,
        verify_header_checksum: bool,
        clock: Box<dyn RtcClock>,
    ) -> Result<Self> {
        let header = CartridgeHeader::parse(&rom)?;

        if verify_header_checksum && !header_checksum_matches(&rom) {
            log::warn!(
                "GB cartridge: header checksum mismatch (stored 0x{:02X}), continuing",
                header.header_checksum
            );
        }
        if rom.len() < usize::from(header.rom_banks) * ROM_BANK_SIZE {
            log::warn!(
                "GB cartridge: image is {} bytes but header declares {} banks",
                rom.len(),
                header.rom_banks
            );
        }

        let controller = match header.controller {
            ControllerKind::RomOnly => BankController::RomOnly,
            ControllerKind::Mbc1 => BankController::Mbc1(Mbc1::new()),
            ControllerKind::Mbc3 => {
                let rtc = header.has_rtc.then(|| Rtc::new(clock.now()));
                BankController::Mbc3(Mbc3::new(rtc))
            }
            ControllerKind::Mbc5 => BankController::Mbc5(Mbc5::new()),
        };

        log::info!(
            "GB cartridge: \"{}\" type=0x{:02X} ({:?}) rom_banks={} ram={}B battery={} rtc={}",
            header.title,
            header.cartridge_type,
            header.controller,
            header.rom_banks,
            header.ram_size,
            header.has_battery,
            header.has_rtc,
        );

        Ok(Self {
            ram: vec![0xFF; header.ram_size],
            header,
            rom,
            controller,
            clock,
            dirty: false,
        })
    }

    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub(crate) fn read_rom(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            0
        } else {
            self.controller.rom_bank()
        };
        let index = usize::from(bank) * ROM_BANK_SIZE + usize::from(addr & 0x3FFF);
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    /// Controller register write in 0x0000-0x7FFF. Fails when the write
    /// leaves a ROM bank selected that the cartridge does not have.
    pub(crate) fn write_rom(&mut self, addr: u16, value: u8) -> Result<()> {
        let before = self.controller.rom_bank();
        match &mut self.controller {
            BankController::RomOnly => return Ok(()),
            BankController::Mbc1(m) => m.write_register(addr, value),
            BankController::Mbc3(m) => m.write_register(addr, value, self.clock.now()),
            BankController::Mbc5(m) => m.write_register(addr, value),
        }

        let bank = self.controller.rom_bank();
        if bank >= self.header.rom_banks {
            return Err(EmuError::InvalidBankSelection {
                bank,
                banks: self.header.rom_banks,
            });
        }
        if bank != before {
            log::debug!("GB cartridge: ROM bank {} -> {}", before, bank);
        }
        Ok(())
    }

    /// Offset into `ram` for a 0xA000-0xBFFF access, or `None` when RAM is
    /// disabled or absent.
    fn ram_offset(&self, addr: u16, bank: u8) -> Option<usize> {
        if self.ram.is_empty() {
            return None;
        }
        let offset = usize::from(bank) * RAM_BANK_SIZE + usize::from(addr - 0xA000);
        // Chips smaller than the window (2 KiB) mirror.
        Some(offset % self.ram.len())
    }

    fn ram_target(&self) -> Option<RamTarget> {
        match &self.controller {
            BankController::RomOnly => Some(RamTarget::Bank(0)),
            BankController::Mbc1(m) => m.ram_enabled().then(|| RamTarget::Bank(m.ram_bank())),
            BankController::Mbc5(m) => m.ram_enabled().then(|| RamTarget::Bank(m.ram_bank())),
            BankController::Mbc3(m) if m.ram_enabled() => match m.window() {
                Mbc3Window::Ram(bank) => Some(RamTarget::Bank(bank)),
                Mbc3Window::Clock(register) => Some(RamTarget::Clock(register)),
                Mbc3Window::Unmapped => None,
            },
            BankController::Mbc3(_) => None,
        }
    }

    pub(crate) fn read_ram(&self, addr: u16) -> u8 {
        match self.ram_target() {
            Some(RamTarget::Bank(bank)) => self
                .ram_offset(addr, bank)
                .map_or(0xFF, |offset| self.ram[offset]),
            Some(RamTarget::Clock(register)) => match &self.controller {
                BankController::Mbc3(m) => m.read_clock(register),
                _ => 0xFF,
            },
            None => {
                log::trace!("GB cartridge: read 0x{:04X} with RAM disabled", addr);
                0xFF
            }
        }
    }

    pub(crate) fn write_ram(&mut self, addr: u16, value: u8) {
        match self.ram_target() {
            Some(RamTarget::Bank(bank)) => {
                if let Some(offset) = self.ram_offset(addr, bank) {
                    self.ram[offset] = value;
                    if self.header.has_battery {
                        self.dirty = true;
                    }
                }
            }
            Some(RamTarget::Clock(register)) => {
                let now = self.clock.now();
                if let BankController::Mbc3(m) = &mut self.controller {
                    m.write_clock(register, value, now);
                    self.dirty = true;
                }
            }
            None => {
                log::trace!("GB cartridge: write 0x{:04X} with RAM disabled", addr);
            }
        }
    }

    /// External RAM contents, if the cartridge has any.
    pub(crate) fn ram(&self) -> Option<&[u8]> {
        (!self.ram.is_empty()).then_some(self.ram.as_slice())
    }

    /// Restore persisted external RAM. The size must match the header.
    pub(crate) fn load_ram(&mut self, data: &[u8]) -> Result<()> {
        if data.len() != self.ram.len() {
            return Err(EmuError::RamSizeMismatch {
                expected: self.ram.len(),
                actual: data.len(),
            });
        }
        self.ram.copy_from_slice(data);
        Ok(())
    }

    /// Return and clear the dirty flag.
    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn rtc_epoch(&self) -> Option<u64> {
        match &self.controller {
            BankController::Mbc3(m) => m.rtc.as_ref().map(|rtc| rtc.epoch()),
            _ => None,
        }
    }

    pub(crate) fn set_rtc_epoch(&mut self, epoch: u64) {
        if let BankController::Mbc3(m) = &mut self.controller {
            if let Some(rtc) = m.rtc.as_mut() {
                rtc.set_epoch(epoch);
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum RamTarget {
    Bank(u8),
    Clock(u8),
}
