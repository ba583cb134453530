//! Game Boy / Game Boy Color emulation core: the SM83 CPU, the memory bus,
//! the display controller and the MBC1/MBC3/MBC5 cartridge controllers.
//!
//! ```no_run
//! use dotmatrix_gb::{GameBoy, GameBoyConfig};
//!
//! let rom = std::fs::read("game.gb").unwrap();
//! let mut gb = GameBoy::new(rom, GameBoyConfig::default()).unwrap();
//! gb.step_frame().unwrap();
//! let rgb = gb.frame_rgb();
//! # let _ = rgb;
//! ```

pub mod config;
pub mod cpu;
mod error;
pub mod machine;
pub mod persistence;

pub use config::GameBoyConfig;
pub use error::{EmuError, Result};
pub use machine::{
    Button, CartridgeHeader, ControllerKind, GameBoy, GameBoyModel, PpuMode, RtcClock,
    SystemClock,
};

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
