//! PPU unit tests
//!
//! Organized by functionality. Every test drives the PPU against an NROM
//! board with CHR-RAM so pattern data can be written directly.

use super::*;
use crate::cartridge::mappers::Mapper0;
use crate::cartridge::Mirroring;

// ========================================
// Test Constants (PPU Register Addresses)
// ========================================

/// PPU Control Register ($2000) - Write only
pub(crate) const PPUCTRL: u16 = 0x2000;
/// PPU Mask Register ($2001) - Write only
pub(crate) const PPUMASK: u16 = 0x2001;
/// PPU Status Register ($2002) - Read only
pub(crate) const PPUSTATUS: u16 = 0x2002;
/// OAM Address Port ($2003) - Write only
pub(crate) const OAMADDR: u16 = 0x2003;
/// OAM Data Port ($2004) - Read/Write
pub(crate) const OAMDATA: u16 = 0x2004;
/// Scroll Position Register ($2005) - Write×2
pub(crate) const PPUSCROLL: u16 = 0x2005;
/// PPU Address Register ($2006) - Write×2
pub(crate) const PPUADDR: u16 = 0x2006;
/// PPU Data Port ($2007) - Read/Write
pub(crate) const PPUDATA: u16 = 0x2007;

/// Dots in one row
pub(crate) const DOTS_PER_ROW: u32 = 341;

// ========================================
// Test Helper Functions
// ========================================

/// NROM board with CHR-RAM and horizontal mirroring
pub(crate) fn create_memory() -> Mapper0 {
    Mapper0::new(vec![0; 16 * 1024], vec![], Mirroring::Horizontal).unwrap()
}

/// NTSC PPU with the warm-up period already elapsed
pub(crate) fn create_ppu() -> Ppu {
    let mut ppu = Ppu::new(Region::Ntsc);
    ppu.warming_up = false;
    ppu
}

pub(crate) fn tick_n(ppu: &mut Ppu, memory: &mut Mapper0, count: u32) {
    for _ in 0..count {
        ppu.tick(memory);
    }
}

/// Tick until the vblank dot has been reached `frames` times
pub(crate) fn run_frames(ppu: &mut Ppu, memory: &mut Mapper0, frames: u32) {
    let mut seen = 0;
    while seen < frames {
        ppu.tick(memory);
        if ppu.entered_vblank() {
            seen += 1;
        }
    }
}

/// Point v at `addr` through PPUADDR
pub(crate) fn set_vram_addr(ppu: &mut Ppu, memory: &mut Mapper0, addr: u16) {
    ppu.write_register(PPUADDR, (addr >> 8) as u8, memory);
    ppu.write_register(PPUADDR, addr as u8, memory);
}

/// Write one byte of PPU memory through PPUADDR/PPUDATA
pub(crate) fn write_vram(ppu: &mut Ppu, memory: &mut Mapper0, addr: u16, value: u8) {
    set_vram_addr(ppu, memory, addr);
    ppu.write_register(PPUDATA, value, memory);
}

// ========================================
// Test Modules
// ========================================

mod timing;
