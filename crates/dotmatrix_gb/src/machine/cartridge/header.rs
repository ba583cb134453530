use crate::error::{EmuError, Result};

const TITLE_START: usize = 0x134;
const TITLE_END: usize = 0x142;
const CGB_FLAG: usize = 0x143;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
const HEADER_CHECKSUM: usize = 0x14D;
const GLOBAL_CHECKSUM: usize = 0x14E;
/// First byte past the header; anything shorter cannot be a cartridge.
const HEADER_END: usize = 0x150;

/// Bank controller family declared by header byte 0x147.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControllerKind {
    RomOnly,
    Mbc1,
    Mbc3,
    Mbc5,
}

/// Fields decoded from the cartridge header (0x0100-0x014F).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cgb_flag: u8,
    pub cartridge_type: u8,
    pub controller: ControllerKind,
    pub has_ram: bool,
    pub has_battery: bool,
    pub has_rtc: bool,
    /// Total 16 KiB ROM banks.
    pub rom_banks: u16,
    /// External RAM size in bytes (0, 2 KiB, 8 KiB, 32 KiB, 64 KiB or 128 KiB).
    pub ram_size: usize,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(EmuError::RomTooSmall { len: rom.len() });
        }

        let cartridge_type = rom[CARTRIDGE_TYPE];
        let (controller, has_ram, has_battery, has_rtc) = match cartridge_type {
            0x00 => (ControllerKind::RomOnly, false, false, false),
            0x08 => (ControllerKind::RomOnly, true, false, false),
            0x09 => (ControllerKind::RomOnly, true, true, false),
            0x01 => (ControllerKind::Mbc1, false, false, false),
            0x02 => (ControllerKind::Mbc1, true, false, false),
            0x03 => (ControllerKind::Mbc1, true, true, false),
            0x0F => (ControllerKind::Mbc3, false, true, true),
            0x10 => (ControllerKind::Mbc3, true, true, true),
            0x11 => (ControllerKind::Mbc3, false, false, false),
            0x12 => (ControllerKind::Mbc3, true, false, false),
            0x13 => (ControllerKind::Mbc3, true, true, false),
            // 0x1C-0x1E carry a rumble motor, which has no observable effect
            // on the bus.
            0x19 | 0x1C => (ControllerKind::Mbc5, false, false, false),
            0x1A | 0x1D => (ControllerKind::Mbc5, true, false, false),
            0x1B | 0x1E => (ControllerKind::Mbc5, true, true, false),
            code => return Err(EmuError::UnsupportedCartridge { code }),
        };

        let rom_banks = match rom[ROM_SIZE] {
            code @ 0x00..=0x08 => 2u16 << code,
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            code => {
                let banks = (rom.len() / 0x4000).max(2) as u16;
                log::warn!(
                    "GB cartridge: unknown ROM size code 0x{:02X}, using image size ({} banks)",
                    code,
                    banks
                );
                banks
            }
        };

        let ram_size = if has_ram {
            match rom[RAM_SIZE] {
                0x00 => 0,
                0x01 => 0x800,
                0x02 => 0x2000,
                0x03 => 0x8000,
                0x04 => 0x2_0000,
                0x05 => 0x1_0000,
                code => {
                    log::warn!("GB cartridge: unknown RAM size code 0x{:02X}", code);
                    0
                }
            }
        } else {
            0
        };

        Ok(Self {
            title: parse_title(&rom[TITLE_START..=TITLE_END]),
            cgb_flag: rom[CGB_FLAG],
            cartridge_type,
            controller,
            has_ram: has_ram && ram_size > 0,
            has_battery,
            has_rtc,
            rom_banks,
            ram_size,
            header_checksum: rom[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([rom[GLOBAL_CHECKSUM], rom[GLOBAL_CHECKSUM + 1]]),
        })
    }

    /// Whether the cartridge advertises colour support (0x80 or 0xC0).
    pub fn supports_cgb(&self) -> bool {
        self.cgb_flag & 0x80 != 0
    }

    /// Number of 8 KiB RAM banks; a 2 KiB chip counts as one bank.
    pub fn ram_banks(&self) -> u8 {
        self.ram_size.div_ceil(0x2000) as u8
    }

    /// Persistence key: title plus global checksum.
    pub fn save_key(&self) -> String {
        let title: String = self
            .title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}-{:04X}", title, self.global_checksum)
    }
}

/// Check the header checksum at 0x14D against bytes 0x134-0x14C.
pub fn header_checksum_matches(rom: &[u8]) -> bool {
    let computed = rom[TITLE_START..HEADER_CHECKSUM]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
    rom.get(HEADER_CHECKSUM) == Some(&computed)
}

fn parse_title(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            }
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}
