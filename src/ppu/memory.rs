// PPU memory access methods
//
// Pattern tables and nametables live on the cartridge side of the PPU bus and
// are reached through the mapper; palette RAM is internal.

use super::constants::*;
use super::Ppu;

impl Ppu {
    /// Nametable byte addressed by v
    #[inline]
    pub(super) fn nametable_addr(&self) -> u16 {
        0x2000 | (self.v & 0x0FFF)
    }

    /// Attribute byte covering the tile addressed by v
    #[inline]
    pub(super) fn attribute_addr(&self) -> u16 {
        0x23C0 | (self.v & 0x0C00) | ((self.v >> 4) & 0x38) | ((self.v >> 2) & 0x07)
    }

    /// Palette RAM index for a palette address
    ///
    /// $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C.
    #[inline]
    pub(super) fn palette_index(addr: u16) -> usize {
        let index = (addr & 0x1F) as usize;
        if index & 0x13 == 0x10 {
            index & !0x10
        } else {
            index
        }
    }

    pub(super) fn read_palette(&self, addr: u16) -> u8 {
        self.palette[Self::palette_index(addr)]
    }

    /// Store a palette entry, keeping both halves of a mirrored pair in sync
    pub(super) fn write_palette(&mut self, addr: u16, value: u8) {
        let index = Self::palette_index(addr);
        let value = value & 0x3F;
        self.palette[index] = value;
        if index & 0x03 == 0 {
            self.palette[index | 0x10] = value;
        }
    }

    /// Advance v after a PPUDATA access
    ///
    /// Outside rendering v moves by 1 or 32. While rendering the access
    /// collides with the fetch logic and both the coarse X and Y increments fire.
    pub(super) fn increment_addr(&mut self) {
        if self.rendering {
            self.increment_x();
            self.increment_y();
        } else {
            let step = if self.ctrl & CTRL_INCREMENT_32 != 0 { 0x20 } else { 0x01 };
            self.v = (self.v + step) & 0x7FFF;
        }
    }

    /// Coarse X increment, wrapping into the horizontally adjacent nametable
    pub(super) fn increment_x(&mut self) {
        if self.v & COARSE_X == COARSE_X {
            self.v = (self.v & !COARSE_X) ^ 0x0400;
        } else {
            self.v += 1;
        }
    }

    /// Fine Y increment, carrying into coarse Y
    ///
    /// Coarse Y wraps at 29 into the vertically adjacent nametable; rows 30
    /// and 31 (attribute memory) wrap to 0 without switching.
    pub(super) fn increment_y(&mut self) {
        if self.v & FINE_Y != FINE_Y {
            self.v += 0x1000;
            return;
        }

        self.v &= !FINE_Y;
        let mut coarse_y = (self.v & COARSE_Y) >> 5;
        if coarse_y == 29 {
            coarse_y = 0;
            self.v ^= 0x0800;
        } else if coarse_y == 31 {
            coarse_y = 0;
        } else {
            coarse_y += 1;
        }
        self.v = (self.v & !COARSE_Y) | (coarse_y << 5);
    }
}
