// Mapper 0 (NROM) - The simplest NES mapper with no bank switching
//
// Memory Layout:
// - CPU $6000-$7FFF: 8KB PRG-RAM
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB if only 16KB total)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
// - PPU $2000-$3FFF: 2KB console VRAM through fixed mirroring
//
// Variants:
// - NROM-128: 16KB PRG-ROM (mirrored to fill 32KB space)
// - NROM-256: 32KB PRG-ROM (no mirroring)

use super::MapperError;
use crate::cartridge::{Mapper, Mirroring};

const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_SIZE: usize = 8 * 1024;
const PRG_RAM_SIZE: usize = 8 * 1024;

/// Mapper 0 implementation (NROM)
#[derive(Debug, Clone)]
pub struct Mapper0 {
    /// PRG-ROM data (16KB or 32KB)
    prg_rom: Vec<u8>,
    /// PRG-RAM at $6000-$7FFF
    prg_ram: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is RAM (writable) or ROM (read-only)
    chr_is_ram: bool,
    /// Nametable RAM
    vram: [u8; 0x800],
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Create an NROM board from raw PRG and CHR data
    ///
    /// An empty `chr_rom` gives the board 8KB of CHR-RAM.
    ///
    /// # Errors
    ///
    /// Returns an error if PRG-ROM is not 16KB or 32KB, or CHR-ROM is not 8KB.
    pub fn new(
        prg_rom: Vec<u8>,
        chr_rom: Vec<u8>,
        mirroring: Mirroring,
    ) -> Result<Self, MapperError> {
        if prg_rom.len() != PRG_BANK_SIZE && prg_rom.len() != 2 * PRG_BANK_SIZE {
            return Err(MapperError::InvalidPrgRomSize(prg_rom.len()));
        }

        let chr_is_ram = chr_rom.is_empty();
        let chr_mem = if chr_is_ram {
            vec![0; CHR_SIZE]
        } else if chr_rom.len() == CHR_SIZE {
            chr_rom
        } else {
            return Err(MapperError::InvalidChrRomSize(chr_rom.len()));
        };

        Ok(Mapper0 {
            prg_rom,
            prg_ram: vec![0; PRG_RAM_SIZE],
            chr_mem,
            chr_is_ram,
            vram: [0; 0x800],
            mirroring,
        })
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    fn prg_index(&self, addr: u16) -> usize {
        let offset = (addr & 0x3FFF) as usize;
        if addr >= 0xC000 && self.prg_rom.len() > PRG_BANK_SIZE {
            PRG_BANK_SIZE + offset
        } else {
            offset
        }
    }
}

impl Mapper for Mapper0 {
    fn cpu_read(&self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => self.prg_ram[(addr & 0x1FFF) as usize],
            0x8000..=0xFFFF => self.prg_rom[self.prg_index(addr)],
            // Open bus
            _ => addr as u8,
        }
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        // NROM has no registers; only PRG-RAM is writable
        if let 0x6000..=0x7FFF = addr {
            self.prg_ram[(addr & 0x1FFF) as usize] = value;
        }
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        match addr & 0x3FFF {
            addr @ 0x0000..=0x1FFF => self.chr_mem[addr as usize],
            addr => self.vram[self.mirroring.vram_index(addr)],
        }
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        match addr & 0x3FFF {
            addr @ 0x0000..=0x1FFF => {
                if self.chr_is_ram {
                    self.chr_mem[addr as usize] = value;
                }
            }
            addr => {
                let index = self.mirroring.vram_index(addr);
                self.vram[index] = value;
            }
        }
    }
}
