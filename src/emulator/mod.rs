// Emulator module - Main emulator coordinator
//
// This module provides the main emulator interface that coordinates all NES
// components (CPU, PPU, APU, Bus) under the master clock, and exposes the
// operations a front-end needs: run a frame, single-step, pause, reset,
// switch region and collect video and audio output.

mod config;
mod machine;

pub use config::{AudioConfig, ConfigError, EmulatorConfig};

use crate::apu::Apu;
use crate::audio::BlipError;
use crate::bus::Bus;
use crate::cartridge::Mapper;
use crate::clock::{Clock, RunMode};
use crate::cpu::Cpu;
use crate::input::Controller;
use crate::ppu::{FrameBuffer, Ppu};
use crate::region::Region;
use log::info;
use machine::Machine;
use thiserror::Error;

/// Error type for emulator operations
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// The resampler rejected its settings or overflowed
    #[error("audio error: {0}")]
    Audio(#[from] BlipError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Main emulator structure
///
/// Owns the clock and the machine it drives. Every stepping operation
/// returns `Result` because the audio path can reject work that would
/// overflow its buffers.
///
/// # Example
///
/// ```
/// use nes_core::{Emulator, EmulatorConfig, Mapper0, Mirroring};
///
/// // An infinite loop at $8000
/// let mut prg = vec![0; 16 * 1024];
/// prg[0..3].copy_from_slice(&[0x4C, 0x00, 0x80]);
/// prg[0x3FFC] = 0x00;
/// prg[0x3FFD] = 0x80;
///
/// let mapper = Mapper0::new(prg, vec![], Mirroring::Vertical).unwrap();
/// let mut emulator = Emulator::new(EmulatorConfig::default(), Box::new(mapper)).unwrap();
/// emulator.run_frame().unwrap();
///
/// assert_eq!(emulator.frame().width(), 256);
/// let _samples = emulator.take_samples();
/// ```
pub struct Emulator {
    clock: Clock,
    machine: Machine,
    config: EmulatorConfig,
    paused: bool,
}

impl Emulator {
    /// Create an emulator around a cartridge
    ///
    /// Validates the configuration, powers on every component and raises
    /// the CPU reset latch so the first cycles run the reset sequence.
    pub fn new(config: EmulatorConfig, mapper: Box<dyn Mapper>) -> Result<Self, EmulatorError> {
        config.validate()?;

        let region = config.region;
        let apu = Apu::new(region, config.audio.mixer_settings())?;
        let bus = Bus::new(Ppu::new(region), apu, mapper);

        let mut cpu = Cpu::new();
        cpu.request_reset();

        info!(
            "Emulator created ({} region, {} Hz audio)",
            region, config.audio.sample_rate
        );

        Ok(Emulator {
            clock: Clock::new(region),
            machine: Machine::new(cpu, bus),
            config,
            paused: false,
        })
    }

    // ========================================
    // Stepping
    // ========================================

    /// Run one video frame worth of master cycles and flush its audio
    ///
    /// The mixer's output buffer holds a little more than one frame of
    /// samples, so callers must drain it with [`take_samples`](Self::take_samples)
    /// after every frame. Running on without draining fails with
    /// [`BlipError::BufferOverflow`] once the resampler fills up.
    pub fn run_frame(&mut self) -> Result<(), EmulatorError> {
        self.paused = false;
        self.clock.run(RunMode::Frame, &mut self.machine)?;
        self.machine.bus.apu_mut().end_frame()?;
        Ok(())
    }

    /// Advance until the next CPU cycle has been executed
    pub fn step_cpu_cycle(&mut self) -> Result<(), EmulatorError> {
        self.clock.run(RunMode::CpuCycle, &mut self.machine)?;
        Ok(())
    }

    /// Advance until the next PPU dot has been rendered
    pub fn step_ppu_cycle(&mut self) -> Result<(), EmulatorError> {
        self.clock.run(RunMode::PpuCycle, &mut self.machine)?;
        Ok(())
    }

    /// Run CPU cycles until the current instruction (or interrupt sequence) finishes
    pub fn step_instruction(&mut self) -> Result<(), EmulatorError> {
        self.step_cpu_cycle()?;
        self.drain_to_boundary()
    }

    fn drain_to_boundary(&mut self) -> Result<(), EmulatorError> {
        while !self.is_quiescent() {
            self.step_cpu_cycle()?;
        }
        Ok(())
    }

    fn is_quiescent(&self) -> bool {
        self.machine.cpu.at_instruction_boundary() && !self.machine.dma_active()
    }

    // ========================================
    // Control
    // ========================================

    /// Stop at the next CPU instruction boundary
    ///
    /// Single CPU cycles are drained until no instruction or OAM DMA is in
    /// flight; the machine state is then safe to inspect or reconfigure.
    pub fn pause(&mut self) -> Result<(), EmulatorError> {
        self.drain_to_boundary()?;
        if !self.paused {
            info!("Emulation paused at ${:04X}", self.machine.cpu.pc);
        }
        self.paused = true;
        Ok(())
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Return the whole machine to its power-on state
    ///
    /// Takes effect immediately, whatever instruction or DMA is in flight:
    /// the CPU, RAM, PPU, APU, mixer, controller ports and clock are
    /// reinitialized before the next cycle, and the CPU's first cycles run
    /// the reset sequence. The cartridge and configuration are kept.
    pub fn reset(&mut self) -> Result<(), EmulatorError> {
        self.machine.reset()?;
        self.clock = Clock::new(self.config.region);
        self.paused = false;
        info!("Emulator reset");
        Ok(())
    }

    /// Switch television standard
    ///
    /// Pauses at an instruction boundary first, then reconfigures the clock,
    /// PPU and APU together.
    pub fn set_region(&mut self, region: Region) -> Result<(), EmulatorError> {
        self.pause()?;

        self.clock.set_region(region);
        self.machine.bus.ppu_mut().set_region(region);
        self.machine.bus.apu_mut().set_region(region)?;
        self.config.region = region;

        info!("Region switched to {}", region);
        Ok(())
    }

    pub fn region(&self) -> Region {
        self.clock.region()
    }

    // ========================================
    // Output and input
    // ========================================

    /// Pixels rendered so far
    pub fn frame(&self) -> &FrameBuffer {
        self.machine.bus.ppu().frame()
    }

    /// Number of times the PPU has entered vblank
    pub fn frame_count(&self) -> u64 {
        self.machine.frames()
    }

    /// Audio samples produced since the last call
    pub fn take_samples(&mut self) -> Vec<f32> {
        self.machine.bus.apu_mut().take_samples()
    }

    /// Controller plugged into `port` (0 or 1)
    ///
    /// # Panics
    /// Panics if `port` is greater than 1
    pub fn controller_mut(&mut self, port: usize) -> &mut Controller {
        self.machine.bus.controllers_mut().controller_mut(port)
    }

    // ========================================
    // Component access
    // ========================================

    pub fn cpu(&self) -> &Cpu {
        &self.machine.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.machine.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.machine.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.machine.bus
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }
}
