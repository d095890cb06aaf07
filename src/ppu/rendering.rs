// Background fetch pipeline and pixel compositing

use super::constants::*;
use super::palette::{color_to_rgb, emphasized_rgb};
use super::Ppu;
use crate::cartridge::Mapper;

impl Ppu {
    /// One step of the 8-dot background fetch cycle
    ///
    /// ```text
    /// dot % 8 == 1: nametable byte, previous tile moves into the shifters
    /// dot % 8 == 3: attribute byte
    /// dot % 8 == 5: pattern low plane
    /// dot % 8 == 7: pattern high plane
    /// ```
    pub(super) fn fetch_background(&mut self, memory: &mut dyn Mapper) {
        if !self.rendering {
            return;
        }

        match self.dot % 8 {
            1 => {
                let tile = memory.ppu_read(self.nametable_addr()) as u16;
                let table = if self.ctrl & CTRL_BACKGROUND_TABLE != 0 { 0x1000 } else { 0 };
                self.bg_tile_addr = (tile << 4) | (self.v >> 12) | table;

                self.bg_pattern[0] |= self.bg_tile[0] as u16;
                self.bg_pattern[1] |= self.bg_tile[1] as u16;
                self.bg_attr[0] = self.bg_attr[1];
                self.bg_attr[1] = self.bg_next_attr;
            }
            3 => {
                let shift = ((self.v >> 4) & 0x04) | (self.v & 0x02);
                let attribute = memory.ppu_read(self.attribute_addr());
                self.bg_next_attr = ((attribute >> shift) & 0x03) << 2;
            }
            5 => {
                self.bg_tile[0] = memory.ppu_read(self.bg_tile_addr);
                memory.check_a12(self.bg_tile_addr);
            }
            7 => {
                self.bg_tile[1] = memory.ppu_read(self.bg_tile_addr + 8);
                memory.check_a12(self.bg_tile_addr + 8);
            }
            _ => {}
        }
    }

    /// Produce the pixel at `(x, y)`
    pub(super) fn render_pixel(&mut self, x: usize, y: usize) {
        if !self.rendering {
            // With rendering off the PPU outputs the backdrop, or the palette
            // entry v points at when v is inside palette space
            let index = if self.v & 0x3FFF >= PALETTE_START {
                self.palette[(self.v & 0x1F) as usize]
            } else {
                self.palette[0]
            };
            self.frame.set_pixel(x, y, color_to_rgb(index));
            return;
        }

        let show_background =
            self.mask & MASK_BACKGROUND != 0 && (x >= 8 || self.mask & MASK_LEFT_BACKGROUND != 0);
        let show_sprites =
            self.mask & MASK_SPRITES != 0 && (x >= 8 || self.mask & MASK_LEFT_SPRITES != 0);

        let mut color = 0u8;

        if show_background {
            let offset = self.fine_x;
            let pixel = (((self.bg_pattern[0] << offset) & 0x8000) >> 15)
                | (((self.bg_pattern[1] << offset) & 0x8000) >> 14);
            let attribute = if offset as usize + x % 8 < 8 {
                self.bg_attr[0]
            } else {
                self.bg_attr[1]
            };
            color = attribute + pixel as u8;
            if color & 0x03 == 0 {
                color = 0;
            }
        }

        if show_sprites && self.has_sprite[x] {
            for i in 0..self.sprite_count as usize {
                let sprite = self.sprite_tiles[i];
                let shift = self.dot as i32 - sprite.x as i32 - 1;
                if !(0..8).contains(&shift) {
                    continue;
                }

                let pixel = sprite.pixel(shift as u32);
                if pixel == 0 {
                    continue;
                }

                if i == 0
                    && color != 0
                    && self.sprite0_visible
                    && self.status & STATUS_SPRITE0_HIT == 0
                    && x != 255
                {
                    self.status |= STATUS_SPRITE0_HIT;
                }

                if !sprite.behind_background || color == 0 {
                    color = sprite.palette_offset + pixel;
                    if color & 0x03 == 0 {
                        color = 0;
                    }
                }
                break;
            }
        }

        let mut index = self.palette[(color & 0x1F) as usize];
        if self.mask & MASK_GRAYSCALE != 0 {
            index &= 0x30;
        }

        let rgb = emphasized_rgb(
            index,
            self.mask & MASK_EMPHASIZE_RED != 0,
            self.mask & MASK_EMPHASIZE_GREEN != 0,
            self.mask & MASK_EMPHASIZE_BLUE != 0,
        );
        self.frame.set_pixel(x, y, rgb);
    }
}
