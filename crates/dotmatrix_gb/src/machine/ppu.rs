mod palette;
mod registers;
mod render;
mod timing;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use palette::PaletteRam;
use render::LinePixel;

const VRAM_BANK_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;

const LCDC_BG_ENABLE: u8 = 0x01;
const LCDC_OBJ_ENABLE: u8 = 0x02;
const LCDC_OBJ_SIZE: u8 = 0x04;
const LCDC_BG_MAP: u8 = 0x08;
const LCDC_TILE_DATA: u8 = 0x10;
const LCDC_WINDOW_ENABLE: u8 = 0x20;
const LCDC_WINDOW_MAP: u8 = 0x40;
const LCDC_LCD_ENABLE: u8 = 0x80;

const STAT_HBLANK_SELECT: u8 = 0x08;
const STAT_VBLANK_SELECT: u8 = 0x10;
const STAT_OAM_SELECT: u8 = 0x20;
const STAT_LYC_SELECT: u8 = 0x40;
const STAT_WRITABLE: u8 = 0x78;

/// Display controller mode, as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PpuMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// Display controller: VRAM, OAM, LCD registers, the dot-clock state
/// machine and the scanline renderer.
pub(crate) struct Ppu {
    cgb: bool,
    vram: Box<[[u8; VRAM_BANK_SIZE]; 2]>,
    vram_bank: usize,
    oam: [u8; OAM_SIZE],
    /// OAM DMA owns the object table; CPU accesses see 0xFF.
    pub(super) oam_dma_active: bool,

    lcdc: u8,
    stat: u8,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    dot: u16,
    mode: PpuMode,
    /// Internal line counter of the window, which only advances on lines
    /// where the window was drawn.
    window_line: u8,
    frame_ready: bool,

    bg_palettes: PaletteRam,
    obj_palettes: PaletteRam,
    dmg_palette: [[u8; 3]; 4],

    line: [LinePixel; SCREEN_WIDTH],
    frame: Vec<u8>,
}

impl Ppu {
    pub(crate) fn new(cgb: bool, dmg_palette: [[u8; 3]; 4]) -> Self {
        Self {
            cgb,
            vram: Box::new([[0; VRAM_BANK_SIZE]; 2]),
            vram_bank: 0,
            oam: [0; OAM_SIZE],
            oam_dma_active: false,
            lcdc: 0,
            stat: 0,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            dot: 0,
            mode: PpuMode::VBlank,
            window_line: 0,
            frame_ready: false,
            bg_palettes: PaletteRam::new(),
            obj_palettes: PaletteRam::new(),
            dmg_palette,
            line: [LinePixel::default(); SCREEN_WIDTH],
            frame: vec![0xFF; SCREEN_WIDTH * SCREEN_HEIGHT * 3],
        }
    }

    /// Register values left behind by the boot ROM: LCD on, BG on, tile
    /// data at 0x8000, BGP = 0xFC.
    pub(crate) fn apply_boot_state(&mut self) {
        self.lcdc = 0x91;
        self.stat = 0x00;
        self.bgp = 0xFC;
        self.ly = 0;
        self.dot = 0;
        self.mode = PpuMode::OamScan;
    }

    #[inline]
    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcdc & LCDC_LCD_ENABLE != 0
    }

    pub(crate) fn mode(&self) -> PpuMode {
        self.mode
    }

    pub(crate) fn ly(&self) -> u8 {
        self.ly
    }

    /// Position within the current line, 0..=455.
    pub(crate) fn dot(&self) -> u16 {
        self.dot
    }

    /// RGB24 frame, row-major, 160x144.
    pub(crate) fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Return and clear the "frame finished" signal raised when LY wraps.
    pub(crate) fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    /// VRAM is closed to the CPU during pixel transfer.
    pub(crate) fn vram_accessible(&self) -> bool {
        !self.lcd_enabled() || self.mode != PpuMode::Transfer
    }

    /// OAM is closed during OAM scan, pixel transfer and OAM DMA.
    pub(crate) fn oam_accessible(&self) -> bool {
        !self.oam_dma_active
            && (!self.lcd_enabled() || matches!(self.mode, PpuMode::HBlank | PpuMode::VBlank))
    }

    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        if !self.vram_accessible() {
            return 0xFF;
        }
        self.vram[self.vram_bank][usize::from(addr & 0x1FFF)]
    }

    /// VRAM read that ignores the mode lock (DMA source, host peek).
    pub(crate) fn read_vram_direct(&self, addr: u16) -> u8 {
        self.vram[self.vram_bank][usize::from(addr & 0x1FFF)]
    }

    pub(crate) fn write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_accessible() {
            self.write_vram_direct(addr, value);
        }
    }

    /// VRAM write that ignores the mode lock (VRAM DMA).
    pub(crate) fn write_vram_direct(&mut self, addr: u16, value: u8) {
        self.vram[self.vram_bank][usize::from(addr & 0x1FFF)] = value;
    }

    pub(crate) fn read_oam(&self, addr: u16) -> u8 {
        if !self.oam_accessible() {
            return 0xFF;
        }
        self.oam[usize::from(addr - 0xFE00)]
    }

    pub(crate) fn write_oam(&mut self, addr: u16, value: u8) {
        if self.oam_accessible() {
            self.oam[usize::from(addr - 0xFE00)] = value;
        }
    }

    pub(crate) fn read_oam_direct(&self, addr: u16) -> u8 {
        self.oam[usize::from(addr - 0xFE00)]
    }

    /// OAM write performed by the DMA engine.
    pub(crate) fn write_oam_direct(&mut self, index: usize, value: u8) {
        self.oam[index] = value;
    }
}
