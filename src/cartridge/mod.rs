// Cartridge module - Mapper contract seen by the CPU bus and the PPU
//
// The core never parses ROM files. A front-end builds a mapper from whatever
// container it loaded and hands it to the emulator as a `Box<dyn Mapper>`.
//
// # Address spaces
//
// ```text
// CPU $4020-$FFFF: PRG-ROM, PRG-RAM and mapper registers
// PPU $0000-$1FFF: pattern tables (CHR-ROM or CHR-RAM)
// PPU $2000-$3EFF: nametables, mirrored through the cartridge's VRAM wiring
// ```

pub mod mappers;

use crate::bus::CycleType;

/// Nametable mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// $2000 = $2400 and $2800 = $2C00 (vertical scrolling games)
    Horizontal,
    /// $2000 = $2800 and $2400 = $2C00 (horizontal scrolling games)
    Vertical,
}

impl Mirroring {
    /// Map a nametable address ($2000-$3EFF) onto 2KB of console VRAM
    #[inline]
    pub fn vram_index(self, addr: u16) -> usize {
        let index = match self {
            Mirroring::Horizontal => (addr & 0x03FF) | ((addr & 0x0800) >> 1),
            Mirroring::Vertical => addr & 0x07FF,
        };
        index as usize
    }
}

/// Cartridge mapper interface
///
/// Reads of unmapped CPU addresses return the low byte of the address, which
/// stands in for open bus.
pub trait Mapper {
    /// Read from CPU address space ($4000-$FFFF)
    fn cpu_read(&self, addr: u16) -> u8;

    /// Write to CPU address space ($4020-$FFFF)
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// Read from PPU address space ($0000-$3FFF)
    fn ppu_read(&self, addr: u16) -> u8;

    /// Write to PPU address space ($0000-$3FFF)
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// Notified with every pattern-table address the PPU fetches while rendering
    ///
    /// Mappers that count rising edges of PPU A12 to clock a scanline IRQ
    /// override this.
    fn check_a12(&mut self, _addr: u16) {}

    /// Observe the kind of every CPU bus cycle
    fn on_cpu_cycle(&mut self, _cycle: CycleType) {}

    /// Take the mapper's pending IRQ, if any
    fn take_irq(&mut self) -> bool {
        false
    }
}
