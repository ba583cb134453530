use std::fmt;

/// Unrecoverable emulation faults.
///
/// Every variant aborts the run: the core has no notion of resuming after a
/// partially executed instruction. Benign guest behaviour (unmapped IO,
/// disabled cartridge RAM, off-screen sprites) never produces an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmuError {
    /// The fetched opcode has no decoding. `prefixed` is set for the
    /// CB-prefixed table (which is total, so this only happens for the
    /// primary table in practice).
    Decode { pc: u16, opcode: u8, prefixed: bool },
    /// An address outside the 16-bit bus was requested by the host.
    AddressOutOfRange { address: usize },
    /// The header declares a bank controller we do not implement.
    UnsupportedCartridge { code: u8 },
    /// The guest selected a ROM bank past the end of the cartridge.
    InvalidBankSelection { bank: u16, banks: u16 },
    /// The ROM image is too small to contain a header.
    RomTooSmall { len: usize },
    /// Persisted battery RAM does not match the size declared by the header.
    RamSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, EmuError>;

impl fmt::Display for EmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmuError::Decode {
                pc,
                opcode,
                prefixed,
            } => {
                let prefix = if *prefixed { "CB " } else { "" };
                write!(f, "undecodable opcode {prefix}0x{opcode:02X} at PC=0x{pc:04X}")
            }
            EmuError::AddressOutOfRange { address } => {
                write!(f, "address 0x{address:X} is outside the 16-bit bus")
            }
            EmuError::UnsupportedCartridge { code } => {
                write!(f, "unsupported cartridge type 0x{code:02X}")
            }
            EmuError::InvalidBankSelection { bank, banks } => {
                write!(f, "ROM bank {bank} selected but cartridge only has {banks} banks")
            }
            EmuError::RomTooSmall { len } => {
                write!(f, "ROM image of {len} bytes is too small to hold a header")
            }
            EmuError::RamSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "battery RAM is {actual} bytes but the cartridge expects {expected}"
                )
            }
        }
    }
}

impl std::error::Error for EmuError {}
