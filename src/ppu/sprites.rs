// Sprite evaluation and pattern loading
//
// Evaluation runs on dots 1-256 of visible rows and selects up to eight
// sprites for the next row into secondary OAM. Once eight are found the
// scan keeps going with a broken address increment, which is why the
// overflow flag gives false positives and false negatives on hardware.
// That behavior is reproduced here as-is.

use super::constants::*;
use super::Ppu;
use crate::cartridge::Mapper;

/// Pattern data of one sprite staged for the current row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct SpriteTile {
    pub(super) x: u8,
    /// Pattern planes (low, high)
    pub(super) pattern: [u8; 2],
    /// Palette RAM offset ($10 + 4 * palette)
    pub(super) palette_offset: u8,
    pub(super) behind_background: bool,
    pub(super) flip_horizontal: bool,
}

impl SpriteTile {
    /// 2-bit colour of the sprite column `shift` pixels from its left edge
    #[inline]
    pub(super) fn pixel(&self, shift: u32) -> u8 {
        let [low, high] = self.pattern;
        if self.flip_horizontal {
            ((low >> shift) & 0x01) | (((high >> shift) & 0x01) << 1)
        } else {
            (((low << shift) & 0x80) >> 7) | (((high << shift) & 0x80) >> 6)
        }
    }
}

impl Ppu {
    #[inline]
    fn sprite_height(&self) -> u16 {
        if self.ctrl & CTRL_LARGE_SPRITES != 0 {
            16
        } else {
            8
        }
    }

    /// One dot of sprite evaluation (dots 1-256 of a visible row)
    pub(super) fn evaluate_sprites(&mut self) {
        if !self.rendering {
            return;
        }

        if self.dot < 65 {
            // Secondary OAM clear
            self.oam_buffer = 0xFF;
            self.secondary_oam[((self.dot - 1) >> 1) as usize] = 0xFF;
            return;
        }

        if self.dot == 65 {
            self.sprite0_added = false;
            self.sprite_in_range = false;
            self.secondary_oam_addr = 0;
            self.overflow_count = 0;
            self.copy_finished = false;
            self.sprite_addr_h = (self.oam_addr >> 2) & 0x3F;
            self.sprite_addr_l = self.oam_addr & 0x03;
        } else if self.dot == 256 {
            self.sprite0_visible = self.sprite0_added;
            self.sprite_count = self.secondary_oam_addr >> 2;
        }

        // Odd dots read primary OAM, even dots write secondary OAM
        if self.dot & 1 == 1 {
            self.oam_buffer = self.oam[self.oam_addr as usize];
            return;
        }

        if self.copy_finished {
            self.sprite_addr_h = (self.sprite_addr_h + 1) & 0x3F;
            if self.secondary_oam_addr >= 0x20 {
                self.oam_buffer = self.secondary_oam[(self.secondary_oam_addr & 0x1F) as usize];
            }
        } else {
            let top = self.oam_buffer as u16;
            if !self.sprite_in_range && self.row >= top && self.row < top + self.sprite_height() {
                self.sprite_in_range = true;
            }

            if self.secondary_oam_addr < 0x20 {
                self.secondary_oam[self.secondary_oam_addr as usize] = self.oam_buffer;

                if self.sprite_in_range {
                    self.sprite_addr_l = self.sprite_addr_l.wrapping_add(1);
                    self.secondary_oam_addr += 1;
                    if self.sprite_addr_h == 0 {
                        self.sprite0_added = true;
                    }

                    if self.secondary_oam_addr & 0x03 == 0 {
                        self.sprite_in_range = false;
                        self.sprite_addr_l = 0;
                        self.sprite_addr_h = (self.sprite_addr_h + 1) & 0x3F;
                        if self.sprite_addr_h == 0 {
                            self.copy_finished = true;
                        }
                    }
                } else {
                    self.sprite_addr_h = (self.sprite_addr_h + 1) & 0x3F;
                    if self.sprite_addr_h == 0 {
                        self.copy_finished = true;
                    }
                }
            } else {
                // Secondary OAM is full: writes turn into reads and the
                // overflow search increments both address halves
                self.oam_buffer = self.secondary_oam[(self.secondary_oam_addr & 0x1F) as usize];

                if self.sprite_in_range {
                    self.status |= STATUS_OVERFLOW;
                    self.sprite_addr_l = self.sprite_addr_l.wrapping_add(1);
                    if self.sprite_addr_l == 4 {
                        self.sprite_addr_h = (self.sprite_addr_h + 1) & 0x3F;
                        self.sprite_addr_l = 0;
                    }

                    if self.overflow_count == 0 {
                        self.overflow_count = 3;
                    } else {
                        self.overflow_count -= 1;
                        if self.overflow_count == 0 {
                            self.copy_finished = true;
                            self.sprite_addr_l = 0;
                        }
                    }
                } else {
                    self.sprite_addr_h = (self.sprite_addr_h + 1) & 0x3F;
                    self.sprite_addr_l = (self.sprite_addr_l + 1) & 0x03;
                    if self.sprite_addr_h == 0 {
                        self.copy_finished = true;
                    }
                }
            }
        }

        self.oam_addr = (self.sprite_addr_l & 0x03) | (self.sprite_addr_h << 2);
    }

    /// Load the next secondary OAM entry's pattern (dots 261, 269, ... 317)
    pub(super) fn fetch_sprite(&mut self, memory: &mut dyn Mapper) {
        let base = self.sprite_index as usize * 4;
        let y = self.secondary_oam[base];
        let tile = self.secondary_oam[base + 1];
        let attributes = self.secondary_oam[base + 2];
        let x = self.secondary_oam[base + 3];

        if self.sprite_index < self.sprite_count && y < VISIBLE_ROWS as u8 {
            let large = self.ctrl & CTRL_LARGE_SPRITES != 0;
            let row = if self.row == self.region.prerender_row() {
                -1
            } else {
                self.row as i32
            };

            let line = ((row - y as i32) & 0xFF) as u16;
            let offset = if attributes & 0x80 != 0 {
                ((self.sprite_height() as i32 - 1 - line as i32) & 0xFF) as u16
            } else {
                line
            };

            let tile = tile as u16;
            let tile_addr = if large {
                let table = if tile & 0x01 != 0 { 0x1000 } else { 0 };
                (table | ((tile & !0x01) << 4)) + if offset >= 8 { offset + 8 } else { offset }
            } else {
                let table = if self.ctrl & CTRL_SPRITE_TABLE != 0 { 0x1000 } else { 0 };
                ((tile << 4) | table) + offset
            };

            let low = memory.ppu_read(tile_addr);
            memory.check_a12(tile_addr);
            let high = memory.ppu_read(tile_addr + 8);
            memory.check_a12(tile_addr + 8);

            self.sprite_tiles[self.sprite_index as usize] = SpriteTile {
                x,
                pattern: [low, high],
                palette_offset: ((attributes & 0x03) << 2) | 0x10,
                behind_background: attributes & 0x20 != 0,
                flip_horizontal: attributes & 0x40 != 0,
            };

            let start = x as usize;
            let end = (start + 8).min(SCREEN_WIDTH);
            self.has_sprite[start..end].fill(true);
        } else {
            // Empty slots still fetch tile $FF
            let tile_addr = if self.ctrl & CTRL_LARGE_SPRITES != 0 {
                0x1FE0
            } else if self.ctrl & CTRL_SPRITE_TABLE != 0 {
                0x1FF0
            } else {
                0x0FF0
            };
            memory.ppu_read(tile_addr);
            memory.check_a12(tile_addr);
            memory.ppu_read(tile_addr + 8);
            memory.check_a12(tile_addr + 8);
        }

        self.sprite_index = self.sprite_index.wrapping_add(1);
    }
}
