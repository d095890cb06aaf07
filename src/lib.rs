// NES emulation core
//
// Cycle-stepped 6502 CPU, PPU and APU driven by a master clock, with
// band-limited audio synthesis. Front-ends own the window, audio device and
// ROM loading; this crate turns a mapper plus controller input into frames
// and samples.

// Public modules
pub mod apu;
pub mod audio;
pub mod bus;
pub mod cartridge;
pub mod clock;
pub mod cpu;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod region;

// Re-export main types for convenience
pub use apu::Apu;
pub use audio::{BlipBuf, BlipError, Mixer, MixerSettings};
pub use bus::{Bus, CycleType, MemoryMappedDevice};
pub use cartridge::mappers::{Mapper0, MapperError};
pub use cartridge::{Mapper, Mirroring};
pub use clock::{Clock, ClockSink, RunMode};
pub use cpu::{Cpu, CpuState};
pub use emulator::{AudioConfig, ConfigError, Emulator, EmulatorConfig, EmulatorError};
pub use input::{Button, Controller, ControllerIO};
pub use ppu::{FrameBuffer, Ppu};
pub use region::Region;
