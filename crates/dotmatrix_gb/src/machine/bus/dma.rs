use super::GameBoyBus;

const OAM_DMA_LENGTH: u16 = 0xA0;
const OAM_DMA_CYCLES_PER_BYTE: u32 = 4;
const VRAM_DMA_BLOCK: u16 = 0x10;

/// OAM DMA (0xFF46): 160 bytes copied from `page << 8` into OAM, one byte
/// per machine cycle.
pub(super) struct OamDma {
    page: u8,
    active: bool,
    index: u16,
    /// T-cycles not yet spent on a byte.
    cycles: u32,
}

impl Default for OamDma {
    fn default() -> Self {
        Self {
            page: 0xFF,
            active: false,
            index: 0,
            cycles: 0,
        }
    }
}

impl OamDma {
    pub(super) fn start(&mut self, page: u8) {
        self.page = page;
        self.active = true;
        self.index = 0;
        self.cycles = 0;
    }

    /// Last value written to 0xFF46.
    pub(super) fn source_page(&self) -> u8 {
        self.page
    }
}

/// CGB VRAM DMA (HDMA1-HDMA5), both general-purpose and H-blank mode.
pub(super) struct VramDma {
    source: u16,
    dest: u16,
    /// Blocks left minus one while an H-blank transfer runs.
    remaining: u8,
    hblank_active: bool,
    /// HDMA5 read value: 0xFF when idle or finished.
    status: u8,
}

impl Default for VramDma {
    fn default() -> Self {
        Self {
            source: 0,
            dest: 0x8000,
            remaining: 0,
            hblank_active: false,
            status: 0xFF,
        }
    }
}

impl VramDma {
    pub(super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF55 => self.status,
            // The address registers are write-only.
            _ => 0xFF,
        }
    }

    pub(super) fn write_address(&mut self, addr: u16, value: u8) {
        let value = u16::from(value);
        match addr {
            0xFF51 => self.source = (self.source & 0x00FF) | (value << 8),
            0xFF52 => self.source = (self.source & 0xFF00) | (value & 0xF0),
            0xFF53 => self.dest = 0x8000 | (self.dest & 0x00FF) | ((value & 0x1F) << 8),
            0xFF54 => self.dest = (self.dest & 0xFF00) | (value & 0xF0),
            _ => {}
        }
    }
}

impl GameBoyBus {
    /// Advance OAM DMA by `cycles` T-cycles.
    pub(super) fn tick_oam_dma(&mut self, cycles: u32) {
        if !self.oam_dma.active {
            return;
        }

        self.oam_dma.cycles += cycles;
        while self.oam_dma.active && self.oam_dma.cycles >= OAM_DMA_CYCLES_PER_BYTE {
            self.oam_dma.cycles -= OAM_DMA_CYCLES_PER_BYTE;

            let index = self.oam_dma.index;
            let mut src = (u16::from(self.oam_dma.page) << 8) + index;
            // Sources past 0xDFFF read the work RAM underneath.
            if src >= 0xE000 {
                src -= 0x2000;
            }
            let byte = self.peek(src);
            self.ppu.write_oam_direct(usize::from(index), byte);

            self.oam_dma.index += 1;
            if self.oam_dma.index == OAM_DMA_LENGTH {
                self.oam_dma.active = false;
                self.ppu.oam_dma_active = false;
                log::trace!("GB DMA: OAM transfer from 0x{:02X}00 done", self.oam_dma.page);
            }
        }
    }

    pub(super) fn write_hdma5(&mut self, value: u8) {
        let blocks = value & 0x7F;

        if self.vram_dma.hblank_active && value & 0x80 == 0 {
            self.vram_dma.hblank_active = false;
            self.vram_dma.status = 0x80 | self.vram_dma.remaining;
            log::debug!("GB DMA: H-blank transfer cancelled");
            return;
        }

        if value & 0x80 == 0 {
            log::debug!(
                "GB DMA: general transfer 0x{:04X} -> 0x{:04X}, {} bytes",
                self.vram_dma.source,
                self.vram_dma.dest,
                (u16::from(blocks) + 1) * VRAM_DMA_BLOCK
            );
            for _ in 0..=blocks {
                self.copy_vram_dma_block();
            }
            self.vram_dma.status = 0xFF;
        } else {
            self.vram_dma.hblank_active = true;
            self.vram_dma.remaining = blocks;
            self.vram_dma.status = blocks;
        }
    }

    /// One 16-byte block of an H-blank transfer, called when mode 0 starts.
    pub(super) fn on_hblank(&mut self) {
        if !self.vram_dma.hblank_active {
            return;
        }

        self.copy_vram_dma_block();
        if self.vram_dma.remaining == 0 {
            self.vram_dma.hblank_active = false;
            self.vram_dma.status = 0xFF;
        } else {
            self.vram_dma.remaining -= 1;
            self.vram_dma.status = self.vram_dma.remaining;
        }
    }

    fn copy_vram_dma_block(&mut self) {
        for i in 0..VRAM_DMA_BLOCK {
            let byte = self.peek(self.vram_dma.source.wrapping_add(i));
            let dest = 0x8000 | (self.vram_dma.dest.wrapping_add(i) & 0x1FFF);
            self.ppu.write_vram_direct(dest, byte);
        }
        self.vram_dma.source = self.vram_dma.source.wrapping_add(VRAM_DMA_BLOCK);
        self.vram_dma.dest = 0x8000 | (self.vram_dma.dest.wrapping_add(VRAM_DMA_BLOCK) & 0x1FFF);
    }
}
