// PPU register handling
//
// # Register Map
//
// ```text
// $2000 PPUCTRL    write     $2004 OAMDATA    read/write
// $2001 PPUMASK    write     $2005 PPUSCROLL  write x2
// $2002 PPUSTATUS  read      $2006 PPUADDR    write x2
// $2003 OAMADDR    write     $2007 PPUDATA    read/write
// ```
//
// Every access leaves its value on the PPU's internal data bus; reads of
// write-only registers return that latched value.

use super::constants::*;
use super::Ppu;
use crate::cartridge::Mapper;
use crate::region::Region;

impl Ppu {
    /// Read from a PPU register ($2000-$3FFF, mirrored every 8 bytes)
    ///
    /// # Register Behaviors
    ///
    /// - PPUSTATUS ($2002): Returns flags over the latch's low bits, clears VBlank
    ///   and the write toggle
    /// - OAMDATA ($2004): Returns OAM at OAMADDR, or the secondary OAM byte the
    ///   sprite fetch is reading while rendering
    /// - PPUDATA ($2007): Returns buffered VRAM data (palette reads are immediate)
    /// - Write-only registers: Return the latch
    pub fn read_register(&mut self, addr: u16, memory: &mut dyn Mapper) -> u8 {
        match addr & 0x0007 {
            2 => {
                // A read one dot before vblank starts sees the flag, and the
                // flag and NMI for this frame never happen
                if self.row == self.region.vblank_row() && self.dot == 0 {
                    self.suppress_vblank = true;
                    self.status |= STATUS_VBLANK;
                }

                self.io_latch = (self.io_latch & 0x1F) | self.status;
                self.write_latch = false;
                self.status &= !STATUS_VBLANK;
            }
            4 => {
                if self.rendering && self.row != self.region.prerender_row() {
                    if (257..=320).contains(&self.dot) {
                        let step = ((self.dot - 257) % 8).min(3);
                        self.secondary_oam_addr = (((self.dot - 257) / 8) * 4 + step) as u8;
                        self.oam_buffer = self.secondary_oam[self.secondary_oam_addr as usize];
                    }
                    self.io_latch = self.oam_buffer;
                } else {
                    self.io_latch = self.oam[self.oam_addr as usize];
                }
            }
            7 => {
                let addr = self.v & 0x3FFF;
                if addr >= PALETTE_START {
                    self.io_latch = self.read_palette(addr) | (self.io_latch & 0xC0);
                    if self.mask & MASK_GRAYSCALE != 0 {
                        self.io_latch &= 0x30;
                    }
                } else {
                    self.io_latch = self.read_buffer;
                }

                // Palette reads still refill the buffer from the nametable underneath
                self.read_buffer = memory.ppu_read(addr);
                self.increment_addr();
            }
            _ => {}
        }

        self.io_latch
    }

    /// Write to a PPU register ($2000-$3FFF, mirrored every 8 bytes)
    ///
    /// PPUCTRL, PPUMASK, PPUSCROLL and PPUADDR ignore writes until the
    /// warm-up period after power-on or reset has elapsed.
    pub fn write_register(&mut self, addr: u16, data: u8, memory: &mut dyn Mapper) {
        self.io_latch = data;

        match addr & 0x0007 {
            0 => {
                if self.warming_up {
                    return;
                }

                let nmi_was_enabled = self.ctrl & CTRL_NMI != 0;
                self.ctrl = data;

                // Enabling NMI during vblank raises it immediately
                if self.status & STATUS_VBLANK != 0 && !nmi_was_enabled && data & CTRL_NMI != 0 {
                    self.nmi_requested = true;
                }

                // t: ...GH.. ........ <- d: ......GH
                self.t = (self.t & !0x0C00) | (((data as u16) & 0x03) << 10);
            }
            1 => {
                if self.warming_up {
                    return;
                }

                self.mask = match self.region {
                    Region::Ntsc => data,
                    // PAL wires bit 5 to green and bit 6 to red
                    Region::Pal => {
                        (data & !(MASK_EMPHASIZE_RED | MASK_EMPHASIZE_GREEN))
                            | ((data & MASK_EMPHASIZE_RED) << 1)
                            | ((data & MASK_EMPHASIZE_GREEN) >> 1)
                    }
                };
            }
            3 => {
                self.oam_addr = data;
            }
            4 => {
                if self.rendering {
                    // Writes during rendering only bump the high bits of OAMADDR
                    self.oam_addr = self.oam_addr.wrapping_add(4);
                } else {
                    // Attribute byte bits 2-4 do not exist
                    let value = if self.oam_addr & 0x03 == 0x02 { data & 0xE3 } else { data };
                    self.oam[self.oam_addr as usize] = value;
                    self.oam_addr = self.oam_addr.wrapping_add(1);
                }
            }
            5 => {
                if self.warming_up {
                    return;
                }

                if !self.write_latch {
                    // t: ....... ...ABCDE <- d: ABCDE...
                    // x:              FGH <- d: .....FGH
                    self.t = (self.t & !COARSE_X) | ((data as u16) >> 3);
                    self.fine_x = data & 0x07;
                    self.write_latch = true;
                } else {
                    // t: FGH..AB CDE..... <- d: ABCDEFGH
                    self.t = (self.t & !(FINE_Y | COARSE_Y))
                        | (((data as u16) & 0xF8) << 2)
                        | (((data as u16) & 0x07) << 12);
                    self.write_latch = false;
                }
            }
            6 => {
                if self.warming_up {
                    return;
                }

                if !self.write_latch {
                    // t: 0CDEFGH ........ <- d: ..CDEFGH (bit 14 is cleared)
                    self.t = (self.t & 0x00FF) | (((data as u16) & 0x3F) << 8);
                    self.write_latch = true;
                } else {
                    // t: ....... ABCDEFGH <- d: ABCDEFGH
                    // v: <...all bits...> <- t: <...all bits...>
                    self.t = (self.t & 0xFF00) | data as u16;
                    self.v = self.t;
                    self.write_latch = false;
                }
            }
            7 => {
                let addr = self.v & 0x3FFF;
                if addr >= PALETTE_START {
                    self.write_palette(addr, data);
                } else if self.rendering {
                    // The write collides with a rendering fetch and stores the low address byte
                    memory.ppu_write(addr, self.v as u8);
                } else {
                    memory.ppu_write(addr, data);
                }
                self.increment_addr();
            }
            _ => {}
        }
    }
}
