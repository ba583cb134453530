use crate::cpu::Interrupt;

use super::{
    Ppu, PpuMode, STAT_HBLANK_SELECT, STAT_LYC_SELECT, STAT_OAM_SELECT, STAT_VBLANK_SELECT,
};

pub(crate) const DOTS_PER_LINE: u16 = 456;
pub(crate) const LINES_PER_FRAME: u8 = 154;
const VISIBLE_LINES: u8 = 144;
const OAM_SCAN_DOTS: u16 = 80;
const TRANSFER_END_DOT: u16 = 252;

impl Ppu {
    /// Advance the dot clock by `cycles`. Returns true if an H-blank
    /// period started during this call (H-blank VRAM DMA uses this).
    pub(crate) fn tick(&mut self, cycles: u32, if_reg: &mut u8) -> bool {
        if !self.lcd_enabled() {
            return false;
        }

        let mut hblank_started = false;
        for _ in 0..cycles {
            hblank_started |= self.tick_dot(if_reg);
        }
        hblank_started
    }

    fn tick_dot(&mut self, if_reg: &mut u8) -> bool {
        self.dot += 1;
        if self.dot == DOTS_PER_LINE {
            self.dot = 0;
            self.ly += 1;
            if self.ly == LINES_PER_FRAME {
                self.ly = 0;
                self.window_line = 0;
                self.frame_ready = true;
                log::trace!("GB PPU: frame complete");
            }
            self.compare_lyc(if_reg);
        }

        let mode = mode_at(self.ly, self.dot);
        if mode == self.mode {
            return false;
        }
        self.enter_mode(mode, if_reg);
        mode == PpuMode::HBlank
    }

    fn enter_mode(&mut self, mode: PpuMode, if_reg: &mut u8) {
        // The line is composited once pixel transfer ends, so H-blank
        // register writes take effect from the next line on.
        if self.mode == PpuMode::Transfer && mode == PpuMode::HBlank {
            self.render_line();
        }
        self.mode = mode;

        let select = match mode {
            PpuMode::HBlank => STAT_HBLANK_SELECT,
            PpuMode::VBlank => STAT_VBLANK_SELECT,
            PpuMode::OamScan => STAT_OAM_SELECT,
            PpuMode::Transfer => 0,
        };
        if self.stat & select != 0 {
            *if_reg |= Interrupt::LcdStat.mask();
        }

        if mode == PpuMode::VBlank {
            *if_reg |= Interrupt::VBlank.mask();
            log::debug!(
                "GB PPU: VBlank (LY={} STAT=0x{:02X} IF=0x{:02X})",
                self.ly,
                self.stat,
                *if_reg
            );
        }
    }

    /// Request the STAT interrupt if LY now equals LYC and the source is
    /// selected.
    pub(super) fn compare_lyc(&mut self, if_reg: &mut u8) {
        if self.ly == self.lyc && self.stat & STAT_LYC_SELECT != 0 {
            *if_reg |= Interrupt::LcdStat.mask();
            log::trace!("GB PPU: LYC match at LY={}", self.ly);
        }
    }

    pub(super) fn lcd_off(&mut self) {
        self.ly = 0;
        self.dot = 0;
        self.window_line = 0;
        self.mode = PpuMode::VBlank;
        log::debug!("GB PPU: LCD off");
    }

    pub(super) fn lcd_on(&mut self, if_reg: &mut u8) {
        self.ly = 0;
        self.dot = 0;
        self.window_line = 0;
        self.mode = PpuMode::OamScan;
        self.compare_lyc(if_reg);
        log::debug!("GB PPU: LCD on");
    }
}

/// Mode for a position in the frame.
fn mode_at(ly: u8, dot: u16) -> PpuMode {
    if ly >= VISIBLE_LINES {
        PpuMode::VBlank
    } else if dot < OAM_SCAN_DOTS {
        PpuMode::OamScan
    } else if dot < TRANSFER_END_DOT {
        PpuMode::Transfer
    } else {
        PpuMode::HBlank
    }
}
