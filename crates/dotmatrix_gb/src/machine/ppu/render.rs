use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::{
    Ppu, LCDC_BG_ENABLE, LCDC_BG_MAP, LCDC_OBJ_ENABLE, LCDC_OBJ_SIZE, LCDC_TILE_DATA,
    LCDC_WINDOW_ENABLE, LCDC_WINDOW_MAP,
};

const MAX_SPRITES_PER_LINE: usize = 10;
const SPRITE_COUNT: usize = 40;

const MAP_LOW: usize = 0x1800;
const MAP_HIGH: usize = 0x1C00;

const ATTR_CGB_PALETTE: u8 = 0x07;
const ATTR_BANK: u8 = 0x08;
const ATTR_DMG_PALETTE: u8 = 0x10;
const ATTR_FLIP_X: u8 = 0x20;
const ATTR_FLIP_Y: u8 = 0x40;
const ATTR_PRIORITY: u8 = 0x80;

/// One composited pixel of the current line: the 2-bit colour code plus
/// which layer produced it and which palette it goes through.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct LinePixel {
    color: u8,
    palette: u8,
    sprite: bool,
    /// CGB map attribute bit 7: this background pixel is drawn over sprites.
    bg_priority: bool,
    /// DMG background switched off by LCDC bit 0; shows as shade 0.
    blank: bool,
}

impl Ppu {
    /// Composite the current line into the frame buffer.
    pub(super) fn render_line(&mut self) {
        let ly = self.ly;
        if usize::from(ly) >= SCREEN_HEIGHT {
            return;
        }

        self.render_background(ly);
        if self.lcdc & LCDC_OBJ_ENABLE != 0 {
            self.render_sprites(ly);
        }
        self.write_line(ly);
    }

    fn render_background(&mut self, ly: u8) {
        // On CGB LCDC bit 0 is a sprite priority switch, not a BG enable.
        if !self.cgb && self.lcdc & LCDC_BG_ENABLE == 0 {
            self.line = [LinePixel {
                blank: true,
                ..LinePixel::default()
            }; SCREEN_WIDTH];
            return;
        }

        let bg_map = if self.lcdc & LCDC_BG_MAP != 0 { MAP_HIGH } else { MAP_LOW };
        let window_map = if self.lcdc & LCDC_WINDOW_MAP != 0 { MAP_HIGH } else { MAP_LOW };
        let window_visible = self.lcdc & LCDC_WINDOW_ENABLE != 0 && ly >= self.wy;
        let window_x = i16::from(self.wx) - 7;
        let mut window_drawn = false;

        for x in 0..SCREEN_WIDTH {
            let in_window = window_visible && x as i16 >= window_x;
            let (map, px, py) = if in_window {
                window_drawn = true;
                (window_map, (x as i16 - window_x) as u8, self.window_line)
            } else {
                (bg_map, (x as u8).wrapping_add(self.scx), ly.wrapping_add(self.scy))
            };

            let entry = map + usize::from(py / 8) * 32 + usize::from(px / 8);
            let tile = self.vram[0][entry];
            let attrs = if self.cgb { self.vram[1][entry] } else { 0 };

            let mut row = py & 7;
            if attrs & ATTR_FLIP_Y != 0 {
                row = 7 - row;
            }
            let mut col = px & 7;
            if attrs & ATTR_FLIP_X != 0 {
                col = 7 - col;
            }

            let bank = usize::from(attrs & ATTR_BANK != 0);
            let row_offset = self.bg_tile_offset(tile) + usize::from(row) * 2;
            let color = self.tile_pixel(bank, row_offset, col);
            self.line[x] = LinePixel {
                color,
                palette: attrs & ATTR_CGB_PALETTE,
                sprite: false,
                bg_priority: attrs & ATTR_PRIORITY != 0,
                blank: false,
            };
        }

        if window_drawn {
            self.window_line = self.window_line.wrapping_add(1);
        }
    }

    /// Offset into a VRAM bank of a background tile, honouring the signed
    /// 0x8800 addressing mode.
    fn bg_tile_offset(&self, tile: u8) -> usize {
        if self.lcdc & LCDC_TILE_DATA != 0 {
            usize::from(tile) * 16
        } else {
            (0x1000 + i32::from(tile as i8) * 16) as usize
        }
    }

    /// 2-bit colour code of column `col` (0 = leftmost) of the tile row
    /// starting at `row_offset`.
    fn tile_pixel(&self, bank: usize, row_offset: usize, col: u8) -> u8 {
        let lo = self.vram[bank][row_offset];
        let hi = self.vram[bank][row_offset + 1];
        let bit = 7 - col;
        (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
    }

    fn render_sprites(&mut self, ly: u8) {
        let height: i16 = if self.lcdc & LCDC_OBJ_SIZE != 0 { 16 } else { 8 };
        let line = i16::from(ly);

        let mut selected = [0usize; MAX_SPRITES_PER_LINE];
        let mut count = 0;
        for index in 0..SPRITE_COUNT {
            let top = i16::from(self.oam[index * 4]) - 16;
            if line >= top && line < top + height {
                selected[count] = index;
                count += 1;
                if count == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }

        // Lower OAM index wins; an opaque pixel of a winning sprite hides
        // later sprites even when the background is drawn over it.
        let mut claimed = [false; SCREEN_WIDTH];
        for &index in &selected[..count] {
            let base = index * 4;
            let top = i16::from(self.oam[base]) - 16;
            let left = i16::from(self.oam[base + 1]) - 8;
            let mut tile = self.oam[base + 2];
            let attrs = self.oam[base + 3];

            if height == 16 {
                tile &= 0xFE;
            }
            let mut row = (line - top) as u8;
            if attrs & ATTR_FLIP_Y != 0 {
                row = (height as u8 - 1) - row;
            }
            let bank = usize::from(self.cgb && attrs & ATTR_BANK != 0);
            let row_offset = usize::from(tile) * 16 + usize::from(row) * 2;
            let palette = if self.cgb {
                attrs & ATTR_CGB_PALETTE
            } else {
                u8::from(attrs & ATTR_DMG_PALETTE != 0)
            };

            for col in 0..8u8 {
                let screen_x = left + i16::from(col);
                if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                    continue;
                }
                let screen_x = screen_x as usize;
                if claimed[screen_x] {
                    continue;
                }

                let src_col = if attrs & ATTR_FLIP_X != 0 { 7 - col } else { col };
                let color = self.tile_pixel(bank, row_offset, src_col);
                // Colour 0 is transparent.
                if color == 0 {
                    continue;
                }
                claimed[screen_x] = true;

                if self.background_wins(self.line[screen_x], attrs) {
                    continue;
                }
                self.line[screen_x] = LinePixel {
                    color,
                    palette,
                    sprite: true,
                    bg_priority: false,
                    blank: false,
                };
            }
        }
    }

    fn background_wins(&self, bg: LinePixel, attrs: u8) -> bool {
        if bg.color == 0 {
            return false;
        }
        if self.cgb {
            // LCDC bit 0 clear puts every sprite on top.
            self.lcdc & LCDC_BG_ENABLE != 0 && (attrs & ATTR_PRIORITY != 0 || bg.bg_priority)
        } else {
            attrs & ATTR_PRIORITY != 0
        }
    }

    fn write_line(&mut self, ly: u8) {
        let start = usize::from(ly) * SCREEN_WIDTH * 3;
        for x in 0..SCREEN_WIDTH {
            let rgb = self.pixel_rgb(self.line[x]);
            let i = start + x * 3;
            self.frame[i..i + 3].copy_from_slice(&rgb);
        }
    }

    fn pixel_rgb(&self, pixel: LinePixel) -> [u8; 3] {
        if self.cgb {
            return if pixel.sprite {
                self.obj_palettes.rgb(pixel.palette, pixel.color)
            } else {
                self.bg_palettes.rgb(pixel.palette, pixel.color)
            };
        }

        if pixel.blank {
            return self.dmg_palette[0];
        }
        let register = match (pixel.sprite, pixel.palette) {
            (false, _) => self.bgp,
            (true, 0) => self.obp0,
            (true, _) => self.obp1,
        };
        let shade = (register >> (pixel.color * 2)) & 0x03;
        self.dmg_palette[usize::from(shade)]
    }
}
