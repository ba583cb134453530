use crate::config::GameBoyConfig;
use crate::cpu::{Cpu, CpuMode};
use crate::error::{EmuError, Result};

use super::cartridge::{Cartridge, CartridgeHeader, RtcClock, SystemClock};
use super::{Button, GameBoyBus, GameBoyModel, PpuMode, CYCLES_PER_FRAME};

/// `LD B,B`, used by test ROMs as a software breakpoint.
const SOFTWARE_BREAKPOINT: u8 = 0x40;

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus with everything attached to it. Hosts
/// drive it with [`GameBoy::step`] or [`GameBoy::step_frame`] and read the
/// picture back with [`GameBoy::frame_rgb`].
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    model: GameBoyModel,
}

impl GameBoy {
    /// Build a machine around a ROM image, using the wall clock for MBC3
    /// cartridges with a real-time clock.
    pub fn new(rom: Vec<u8>, config: GameBoyConfig) -> Result<Self> {
        Self::with_clock(rom, config, Box::new(SystemClock))
    }

    pub fn with_clock(
        rom: Vec<u8>,
        config: GameBoyConfig,
        clock: Box<dyn RtcClock>,
    ) -> Result<Self> {
        let cartridge = Cartridge::new(rom, config.verify_header_checksum, clock)?;

        let header = cartridge.header();
        let model = match config.model {
            Some(model) => {
                if model == GameBoyModel::Cgb && !header.supports_cgb() {
                    log::warn!("GB: running DMG-only cartridge \"{}\" as CGB", header.title);
                }
                model
            }
            None if header.supports_cgb() => GameBoyModel::Cgb,
            None => GameBoyModel::Dmg,
        };
        log::info!("GB: starting \"{}\" as {:?}", header.title, model);

        let mut bus = GameBoyBus::new(model, cartridge, config.dmg_palette);
        let cpu = if config.skip_boot_state {
            Cpu::zeroed()
        } else {
            bus.apply_boot_state();
            Cpu::with_model(model)
        };

        Ok(Self { cpu, bus, model })
    }

    pub fn model(&self) -> GameBoyModel {
        self.model
    }

    pub fn header(&self) -> &CartridgeHeader {
        self.bus.cartridge.header()
    }

    /// Execute one CPU step and return the T-cycles it took.
    pub fn step(&mut self) -> Result<u32> {
        self.cpu.step(&mut self.bus)
    }

    /// Run until the display controller finishes a frame, or for one
    /// frame's worth of cycles when the LCD is off. Returns the T-cycles
    /// executed.
    pub fn step_frame(&mut self) -> Result<u64> {
        let mut cycles = 0u64;
        while cycles < CYCLES_PER_FRAME {
            cycles += u64::from(self.step()?);
            if self.bus.ppu.take_frame_ready() {
                break;
            }
        }
        Ok(cycles)
    }

    /// Run until the software breakpoint `LD B,B` (`0x40`) is about to
    /// execute, then execute it and stop.
    ///
    /// Returns `true` if the breakpoint was hit within `max_steps` steps.
    pub fn step_until_software_breakpoint(&mut self, max_steps: u64) -> Result<bool> {
        for _ in 0..max_steps {
            let at_breakpoint = self.cpu.mode() == CpuMode::Running
                && self.bus.peek(self.cpu.regs.pc) == SOFTWARE_BREAKPOINT;
            self.step()?;
            if at_breakpoint {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether a full frame was completed since the last call.
    pub fn take_frame_ready(&mut self) -> bool {
        self.bus.ppu.take_frame_ready()
    }

    /// Current frame as RGB24, row-major, `SCREEN_WIDTH * SCREEN_HEIGHT * 3`
    /// bytes.
    pub fn frame_rgb(&self) -> &[u8] {
        self.bus.ppu.frame()
    }

    pub fn ppu_mode(&self) -> PpuMode {
        self.bus.ppu.mode()
    }

    pub fn ly(&self) -> u8 {
        self.bus.ppu.ly()
    }

    /// Position of the dot clock within the current line.
    pub fn dot(&self) -> u16 {
        self.bus.ppu.dot()
    }

    /// Every byte the guest has sent over the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial.output()
    }

    pub fn press(&mut self, button: Button) {
        self.bus.set_button(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.bus.set_button(button, false);
    }

    /// Read a byte as the CPU would see it, without side effects.
    pub fn peek(&self, address: usize) -> Result<u8> {
        let addr = u16::try_from(address).map_err(|_| EmuError::AddressOutOfRange { address })?;
        Ok(self.bus.peek(addr))
    }

    /// Key under which battery-backed state is persisted.
    pub fn save_key(&self) -> String {
        self.header().save_key()
    }

    /// External RAM contents if the cartridge keeps them on a battery.
    pub fn battery_ram(&self) -> Option<&[u8]> {
        if self.header().has_battery {
            self.bus.cartridge.ram()
        } else {
            None
        }
    }

    pub fn load_battery_ram(&mut self, data: &[u8]) -> Result<()> {
        self.bus.cartridge.load_ram(data)
    }

    /// Whether battery RAM or the clock changed since the last call.
    pub fn take_ram_dirty(&mut self) -> bool {
        self.bus.cartridge.take_dirty()
    }

    /// Unix time at which the cartridge clock read zero, for MBC3 carts with
    /// an RTC.
    pub fn rtc_epoch(&self) -> Option<u64> {
        self.bus.cartridge.rtc_epoch()
    }

    pub fn set_rtc_epoch(&mut self, epoch: u64) {
        self.bus.cartridge.set_rtc_epoch(epoch);
    }
}
