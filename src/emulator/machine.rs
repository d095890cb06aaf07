// Machine - the clock sink wiring CPU, PPU, APU and cartridge together
//
// One CPU cycle services a pending DMC sample fetch, advances the APU, routes
// the APU interrupt line and then either ticks the CPU or performs one cycle
// of OAM DMA. One PPU cycle renders a dot and forwards the PPU NMI and the
// mapper IRQ to the CPU.

use crate::audio::BlipError;
use crate::bus::{Bus, CycleType};
use crate::clock::ClockSink;
use crate::cpu::Cpu;
use log::trace;

/// Bytes copied by one OAM DMA
const OAM_DMA_BYTES: u16 = 256;

/// OAM DMA in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OamDma {
    page: u8,
    /// Bus cycles performed so far; even cycles read, odd cycles write $2004
    cycle: u16,
    /// The DMA waits for the CPU's next read cycle before taking the bus
    started: bool,
    data: u8,
}

impl OamDma {
    fn new(page: u8) -> Self {
        OamDma {
            page,
            cycle: 0,
            started: false,
            data: 0,
        }
    }
}

/// CPU plus everything on its bus
pub(crate) struct Machine {
    pub cpu: Cpu,
    pub bus: Bus,
    oam_dma: Option<OamDma>,
    frames: u64,
}

impl Machine {
    pub fn new(cpu: Cpu, bus: Bus) -> Self {
        Machine {
            cpu,
            bus,
            oam_dma: None,
            frames: 0,
        }
    }

    /// Power-cycle the CPU and every device on the bus
    ///
    /// The CPU reset latch is raised so the next cycles run the reset
    /// sequence; any OAM DMA in flight is dropped.
    pub fn reset(&mut self) -> Result<(), BlipError> {
        self.cpu = Cpu::new();
        self.cpu.request_reset();
        self.oam_dma = None;
        self.frames = 0;
        self.bus.reset()
    }

    /// Video frames completed, counted at the start of vblank
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn dma_active(&self) -> bool {
        self.oam_dma.is_some()
    }

    /// Fetch the byte the DMC asked for, stalling the CPU for this cycle
    fn service_dmc(&mut self) -> bool {
        match self.bus.apu_mut().take_dmc_request() {
            Some(addr) => {
                let value = self.bus.read(addr);
                self.bus.apu_mut().set_dmc_read_buffer(value);
                true
            }
            None => false,
        }
    }

    fn step_oam_dma(&mut self, mut dma: OamDma) {
        let index = dma.cycle / 2;
        if dma.cycle % 2 == 0 {
            dma.data = self.bus.read(u16::from_be_bytes([dma.page, index as u8]));
        } else {
            self.bus.write(0x2004, dma.data);
        }

        dma.cycle += 1;
        self.oam_dma = (dma.cycle < OAM_DMA_BYTES * 2).then_some(dma);
    }

    fn tick_cpu(&mut self) {
        let cycle = self.cpu.tick(&mut self.bus);
        self.bus.mapper_mut().on_cpu_cycle(cycle);

        if cycle == CycleType::Read {
            if let Some(dma) = self.oam_dma.as_mut() {
                dma.started = true;
            }
        }
    }
}

impl ClockSink for Machine {
    type Error = BlipError;

    fn cpu_cycle(&mut self) -> Result<(), BlipError> {
        let stalled = self.service_dmc();

        self.bus.apu_mut().process()?;
        // Level triggered: stays asserted until the APU flags are acknowledged
        if self.bus.apu().irq_pending() {
            self.cpu.request_irq();
        }

        if stalled {
            return Ok(());
        }

        if self.oam_dma.is_none() {
            if let Some(page) = self.bus.ppu_mut().take_oam_dma() {
                trace!("OAM DMA from page ${:02X}", page);
                self.oam_dma = Some(OamDma::new(page));
            }
        }

        match self.oam_dma {
            Some(dma) if dma.started => self.step_oam_dma(dma),
            _ => self.tick_cpu(),
        }
        Ok(())
    }

    fn ppu_cycle(&mut self) -> Result<(), BlipError> {
        self.bus.tick_ppu();

        if self.bus.ppu().entered_vblank() {
            self.frames += 1;
        }
        if self.bus.ppu_mut().take_nmi() {
            self.cpu.request_nmi();
        }
        if self.bus.mapper_mut().take_irq() {
            self.cpu.request_irq();
        }
        Ok(())
    }
}
