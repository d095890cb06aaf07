// Bus module - Memory bus implementation
//
// This module implements the main memory bus that connects the CPU to all memory-mapped
// components in the NES system. It handles address routing and memory mirroring.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4017: APU and I/O Registers
// $4018-$401F: APU and I/O test functionality (open bus)
// $4020-$FFFF: Cartridge space (PRG-ROM, PRG-RAM, and mapper registers)
// ```

use crate::apu::Apu;
use crate::audio::BlipError;
use crate::cartridge::Mapper;
use crate::input::ControllerIO;
use crate::ppu::Ppu;

/// Kind of access the CPU performs on a bus cycle
///
/// Every CPU cycle is either a read or a write, including the dummy reads
/// and writes of indexed and read-modify-write instructions. Mappers that
/// react to specific accesses observe this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleType {
    Read,
    Write,
}

/// Trait for memory-mapped components
///
/// This trait defines the interface for components that can be mapped into the
/// CPU's address space. The CPU itself talks to any implementor, which lets
/// tests drive it against a flat 64KB memory.
///
/// # Examples
///
/// `Bus`, `Apu` and `ControllerIO` implement this trait.
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    ///
    /// Some devices have side effects on read (e.g., PPU PPUSTATUS clears flags),
    /// so this method takes &mut self.
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    fn write(&mut self, addr: u16, data: u8);
}

/// Main memory bus structure
///
/// Owns every device on the CPU bus and routes reads and writes by address.
/// Unmapped reads fall through to the mapper, which returns open bus.
pub struct Bus {
    /// Internal RAM: 2KB, mirrored 3 times at $0800-$1FFF
    ram: [u8; 2048],

    /// PPU (8 registers mirrored throughout $2000-$3FFF)
    ppu: Ppu,

    /// APU ($4000-$4013, $4015, $4017 writes; $4015 reads)
    apu: Apu,

    /// Controller ports ($4016 strobe, $4016/$4017 reads)
    ///
    /// $4017 is shared: writes go to the APU, reads come from controller 2.
    controller_io: ControllerIO,

    /// Cartridge ($4020-$FFFF and the PPU pattern/nametable space)
    mapper: Box<dyn Mapper>,
}

impl Bus {
    /// Create a bus with zeroed RAM around the given devices
    pub fn new(ppu: Ppu, apu: Apu, mapper: Box<dyn Mapper>) -> Self {
        Bus {
            ram: [0; 2048],
            ppu,
            apu,
            controller_io: ControllerIO::new(),
            mapper,
        }
    }

    /// Read a byte from the bus
    ///
    /// # Memory Regions
    ///
    /// - $0000-$1FFF: Internal RAM (2KB) with mirroring
    /// - $2000-$3FFF: PPU registers (8 bytes) with mirroring
    /// - $4015: APU status
    /// - $4016/$4017: Controller ports (bit 6 reads back set)
    /// - Everything else: Cartridge (open bus when unmapped)
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.read_register(addr, self.mapper.as_mut()),
            0x4015 => self.apu.read(addr),
            0x4016 | 0x4017 => 0x40 | self.controller_io.read(addr),
            _ => self.mapper.cpu_read(addr),
        }
    }

    /// Write a byte to the bus
    ///
    /// # Memory Regions
    ///
    /// - $0000-$1FFF: Internal RAM (2KB) with mirroring
    /// - $2000-$3FFF: PPU registers (8 bytes) with mirroring
    /// - $4014: OAM DMA request (high byte of the source page)
    /// - $4016: Controller strobe
    /// - $4000-$4013, $4015, $4017: APU
    /// - $4020-$FFFF: Cartridge (writes may affect mapper state)
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => self.ppu.write_register(addr, data, self.mapper.as_mut()),
            0x4014 => self.ppu.request_oam_dma(data),
            0x4016 => self.controller_io.write(addr, data),
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, data),
            0x4020..=0xFFFF => self.mapper.cpu_write(addr, data),
            _ => {}
        }
    }

    /// Return RAM, PPU, APU and controller ports to their power-on state
    ///
    /// The cartridge is left as inserted.
    pub fn reset(&mut self) -> Result<(), BlipError> {
        self.ram = [0; 2048];
        self.ppu.reset();
        self.controller_io = ControllerIO::new();
        self.apu.reset()
    }

    /// Advance the PPU by one dot against the cartridge's PPU memory
    pub fn tick_ppu(&mut self) {
        self.ppu.tick(self.mapper.as_mut());
    }

    // ========================================
    // Device access
    // ========================================

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    pub fn controllers(&self) -> &ControllerIO {
        &self.controller_io
    }

    pub fn controllers_mut(&mut self) -> &mut ControllerIO {
        &mut self.controller_io
    }

    pub fn mapper_mut(&mut self) -> &mut dyn Mapper {
        self.mapper.as_mut()
    }
}

impl MemoryMappedDevice for Bus {
    fn read(&mut self, addr: u16) -> u8 {
        Bus::read(self, addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        Bus::write(self, addr, data)
    }
}
