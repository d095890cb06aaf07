// PPU module - Picture Processing Unit (2C02) implementation
//
// The PPU is stepped one dot at a time. Each row has 341 dots; a frame has
// 262 rows on NTSC and 312 on PAL. Visible rows fetch background tiles and
// evaluate sprites for the next row while emitting one pixel per dot.
//
// # Row layout
//
// ```text
// 0-239            visible rows
// 240              post-render (idle)
// vblank row       vblank flag and NMI at dot 1 (241 NTSC, 291 PAL)
// prerender row    flags cleared, vertical scroll reloaded (261 NTSC, 311 PAL)
// ```
//
// # Dot layout of a rendering row
//
// ```text
// 1-256    tile fetches, pixel output, sprite evaluation
// 257-320  garbage nametable fetches, sprite pattern loads
// 321-336  first two tiles of the next row
// 337-340  dummy nametable fetches
// ```

mod constants;
mod frame;
mod memory;
mod palette;
mod registers;
mod rendering;
mod sprites;

#[cfg(test)]
mod tests;

pub use constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use frame::FrameBuffer;
pub use palette::{color_to_rgb, MASTER_PALETTE};

use crate::cartridge::Mapper;
use crate::region::Region;
use constants::*;
use log::debug;
use sprites::SpriteTile;

/// PPU structure representing the Picture Processing Unit state
#[derive(Debug, Clone)]
pub struct Ppu {
    region: Region,

    // ========================================
    // CPU-visible registers
    // ========================================
    /// PPUCTRL ($2000)
    ctrl: u8,
    /// PPUMASK ($2001), emphasis bits always in NTSC order
    mask: u8,
    /// PPUSTATUS ($2002) flag bits
    status: u8,
    /// OAMADDR ($2003)
    oam_addr: u8,
    /// Value left on the PPU data bus by the last register access
    io_latch: u8,
    /// PPUDATA read buffer
    read_buffer: u8,

    // ========================================
    // Scroll registers
    // ========================================
    /// Current VRAM address (15 bits)
    v: u16,
    /// Temporary VRAM address (15 bits)
    t: u16,
    /// Fine X scroll (3 bits)
    fine_x: u8,
    /// First/second write toggle shared by PPUSCROLL and PPUADDR
    write_latch: bool,

    // ========================================
    // Internal memories
    // ========================================
    oam: [u8; 256],
    secondary_oam: [u8; 32],
    palette: [u8; 32],

    // ========================================
    // Background pipeline
    // ========================================
    /// Pattern bytes of the tile being fetched (low, high)
    bg_tile: [u8; 2],
    /// Attribute bits of the current and next tile, pre-shifted into palette offsets
    bg_attr: [u8; 2],
    bg_next_attr: u8,
    /// Pattern shift registers (low plane, high plane)
    bg_pattern: [u16; 2],
    bg_tile_addr: u16,

    // ========================================
    // Sprites
    // ========================================
    secondary_oam_addr: u8,
    oam_buffer: u8,
    sprite_count: u8,
    sprite_index: u8,
    sprite0_visible: bool,
    sprite_tiles: [SpriteTile; 8],
    /// Columns of the current row covered by at least one sprite
    has_sprite: [bool; SCREEN_WIDTH],

    // Sprite evaluation
    sprite0_added: bool,
    sprite_in_range: bool,
    copy_finished: bool,
    overflow_count: u8,
    sprite_addr_h: u8,
    sprite_addr_l: u8,

    // ========================================
    // Timing
    // ========================================
    row: u16,
    /// Dot within the row; wraps from `u16::MAX` to 0 on the first tick
    dot: u16,
    odd_frame: bool,
    /// Background or sprites enabled on the last processed dot
    rendering: bool,
    /// Register writes are ignored until the warm-up period has elapsed
    warming_up: bool,
    warmup_counter: u32,
    /// Set by a PPUSTATUS read one dot before vblank starts
    suppress_vblank: bool,

    nmi_requested: bool,
    oam_dma: Option<u8>,

    frame: FrameBuffer,
}

impl Ppu {
    /// Create a PPU in its power-on state
    pub fn new(region: Region) -> Self {
        Ppu {
            region,
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            io_latch: 0,
            read_buffer: 0,
            v: 0,
            t: 0,
            fine_x: 0,
            write_latch: false,
            oam: [0; 256],
            secondary_oam: [0; 32],
            palette: [0; 32],
            bg_tile: [0; 2],
            bg_attr: [0; 2],
            bg_next_attr: 0,
            bg_pattern: [0; 2],
            bg_tile_addr: 0,
            secondary_oam_addr: 0,
            oam_buffer: 0,
            sprite_count: 0,
            sprite_index: 0,
            sprite0_visible: false,
            sprite_tiles: [SpriteTile::default(); 8],
            has_sprite: [false; SCREEN_WIDTH],
            sprite0_added: false,
            sprite_in_range: false,
            copy_finished: false,
            overflow_count: 0,
            sprite_addr_h: 0,
            sprite_addr_l: 0,
            row: 0,
            dot: u16::MAX,
            odd_frame: false,
            rendering: false,
            warming_up: true,
            warmup_counter: 0,
            suppress_vblank: false,
            nmi_requested: false,
            oam_dma: None,
            frame: FrameBuffer::new(),
        }
    }

    /// Return every register, OAM, VRAM, the frame buffer and the warm-up
    /// counter to their power-on values, keeping the region
    pub fn reset(&mut self) {
        *self = Ppu::new(self.region);
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Switch the row layout to another region
    ///
    /// The current position is kept; a row past the new pre-render row is
    /// clamped onto it.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
        self.row = self.row.min(region.prerender_row());
    }

    // ========================================
    // Stepping
    // ========================================

    /// Advance the PPU by one dot
    pub fn tick(&mut self, memory: &mut dyn Mapper) {
        let prerender = self.region.prerender_row();

        if self.region == Region::Ntsc
            && self.rendering
            && self.odd_frame
            && self.dot == LAST_DOT - 1
            && self.row == prerender
        {
            // Odd frames skip the last dot of the pre-render row
            self.dot = 0;
            self.row = 0;
            self.odd_frame = !self.odd_frame;
        } else if self.dot == LAST_DOT {
            self.dot = 0;
            if self.row == prerender {
                self.row = 0;
                self.odd_frame = !self.odd_frame;
            } else {
                self.row += 1;
            }
        } else {
            self.dot = self.dot.wrapping_add(1);
        }

        if self.warming_up {
            if self.warmup_counter == self.region.ppu_warmup_dots() {
                self.warming_up = false;
                self.warmup_counter = 0;
                debug!("PPU warm-up completed ({} region)", self.region);
            } else {
                self.warmup_counter += 1;
            }
            return;
        }

        if self.row == self.region.vblank_row() && self.dot == 1 {
            if self.suppress_vblank {
                self.suppress_vblank = false;
            } else {
                self.status |= STATUS_VBLANK;
                if self.ctrl & CTRL_NMI != 0 {
                    self.nmi_requested = true;
                }
            }
        }

        if self.dot == 0 && self.row == 0 {
            self.sprite_count = 0;
        }

        if self.dot != 0 && (self.row < VISIBLE_ROWS || self.row == prerender) {
            self.process(memory);
        } else {
            self.rendering = false;
        }
    }

    /// Work done on one dot of a visible or pre-render row
    fn process(&mut self, memory: &mut dyn Mapper) {
        self.rendering = self.mask & (MASK_BACKGROUND | MASK_SPRITES) != 0;
        let prerender = self.region.prerender_row();

        match self.dot {
            1..=256 => {
                self.fetch_background(memory);

                if self.rendering && self.dot & 0x07 == 0 {
                    self.increment_x();
                    if self.dot == 256 {
                        self.increment_y();
                    }
                }

                if self.row != prerender {
                    self.render_pixel((self.dot - 1) as usize, self.row as usize);
                    self.bg_pattern[0] <<= 1;
                    self.bg_pattern[1] <<= 1;
                    self.evaluate_sprites();
                } else if self.dot < 9 {
                    if self.dot == 1 {
                        self.status &= !(STATUS_VBLANK | STATUS_SPRITE0_HIT | STATUS_OVERFLOW);
                    }

                    // OAMADDR >= 8 at the start of the pre-render row copies
                    // the 8-byte row it points at over the first 8 bytes
                    if self.rendering && self.oam_addr >= 0x08 {
                        let offset = (self.dot - 1) as usize;
                        self.oam[offset] = self.oam[(self.oam_addr & 0xF8) as usize + offset];
                    }
                }
            }
            257..=320 => {
                if self.dot == 257 {
                    self.sprite_index = 0;
                    self.has_sprite.fill(false);
                    if self.rendering {
                        self.v = (self.v & !HORIZONTAL_BITS) | (self.t & HORIZONTAL_BITS);
                    }
                }

                if self.rendering {
                    self.oam_addr = 0;

                    match (self.dot - 257) % 8 {
                        0 => {
                            memory.ppu_read(self.nametable_addr());
                        }
                        2 => {
                            memory.ppu_read(self.attribute_addr());
                        }
                        4 => self.fetch_sprite(memory),
                        _ => {}
                    }

                    if self.row == prerender && (280..=304).contains(&self.dot) {
                        self.v = (self.v & !VERTICAL_BITS) | (self.t & VERTICAL_BITS);
                    }
                }
            }
            321..=336 => {
                self.fetch_background(memory);

                if self.rendering {
                    if self.dot == 321 {
                        self.oam_buffer = self.secondary_oam[0];
                    } else if self.dot == 328 || self.dot == 336 {
                        self.bg_pattern[0] <<= 8;
                        self.bg_pattern[1] <<= 8;
                        self.increment_x();
                    }
                }
            }
            337 | 339 => {
                if self.rendering {
                    self.bg_tile_addr = memory.ppu_read(self.nametable_addr()) as u16;
                }
            }
            _ => {}
        }
    }

    // ========================================
    // Driver interface
    // ========================================

    /// Take a pending NMI request
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_requested)
    }

    /// Record a write to $4014
    pub fn request_oam_dma(&mut self, page: u8) {
        self.oam_dma = Some(page);
    }

    /// Take a pending OAM DMA request, returning the source page
    pub fn take_oam_dma(&mut self) -> Option<u8> {
        self.oam_dma.take()
    }

    /// Whether this dot is the one on which the vblank flag is raised
    ///
    /// Front-ends treat this as the end of a video frame.
    pub fn entered_vblank(&self) -> bool {
        self.row == self.region.vblank_row() && self.dot == 1
    }

    /// Pixels produced so far
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn dot(&self) -> u16 {
        self.dot
    }

    pub fn is_warming_up(&self) -> bool {
        self.warming_up
    }

    /// Primary object attribute memory
    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new(Region::Ntsc)
    }
}
