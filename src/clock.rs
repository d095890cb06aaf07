// Clock module - Master clock divider
//
// The NES derives the CPU and PPU clocks from one master oscillator. The
// clock counts master cycles and fires a tick on the CPU or PPU whenever the
// matching sub-counter reaches its divider.
//
// ```text
// Region  Master cycles/frame  CPU divider  PPU divider
// NTSC    357368               12           4
// PAL     531960               16           5
// ```

use crate::region::Region;

/// How far a call to [`Clock::run`] advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// One video frame worth of master cycles
    Frame,
    /// Until the next CPU tick
    CpuCycle,
    /// Until the next PPU tick
    PpuCycle,
}

/// Receiver of the clock's ticks
///
/// The first error returned by a tick aborts the run.
pub trait ClockSink {
    type Error;

    fn cpu_cycle(&mut self) -> Result<(), Self::Error>;

    fn ppu_cycle(&mut self) -> Result<(), Self::Error>;
}

/// Master clock with independent CPU and PPU dividers
#[derive(Debug, Clone)]
pub struct Clock {
    region: Region,
    frame_cycles: u32,
    cpu_divider: u32,
    ppu_divider: u32,
    cpu_counter: u32,
    ppu_counter: u32,
}

impl Clock {
    pub fn new(region: Region) -> Self {
        Clock {
            region,
            frame_cycles: region.master_cycles_per_frame(),
            cpu_divider: region.cpu_divider(),
            ppu_divider: region.ppu_divider(),
            cpu_counter: 0,
            ppu_counter: 0,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Swap the timing constants
    ///
    /// Both sub-counters restart from zero; progress towards the next tick
    /// is not carried over.
    pub fn set_region(&mut self, region: Region) {
        *self = Clock::new(region);
    }

    /// Advance master cycles according to `mode`, delivering ticks to `sink`
    ///
    /// - `Frame`: CPU sub-counter then PPU sub-counter on every master cycle
    /// - `CpuCycle`: PPU then CPU, stopping after the CPU tick
    /// - `PpuCycle`: CPU then PPU, stopping after the PPU tick
    pub fn run<S: ClockSink>(&mut self, mode: RunMode, sink: &mut S) -> Result<(), S::Error> {
        match mode {
            RunMode::Frame => {
                for _ in 0..self.frame_cycles {
                    if self.advance_cpu() {
                        sink.cpu_cycle()?;
                    }
                    if self.advance_ppu() {
                        sink.ppu_cycle()?;
                    }
                }
            }
            RunMode::CpuCycle => loop {
                if self.advance_ppu() {
                    sink.ppu_cycle()?;
                }
                if self.advance_cpu() {
                    sink.cpu_cycle()?;
                    break;
                }
            },
            RunMode::PpuCycle => loop {
                if self.advance_cpu() {
                    sink.cpu_cycle()?;
                }
                if self.advance_ppu() {
                    sink.ppu_cycle()?;
                    break;
                }
            },
        }
        Ok(())
    }

    #[inline]
    fn advance_cpu(&mut self) -> bool {
        self.cpu_counter += 1;
        if self.cpu_counter == self.cpu_divider {
            self.cpu_counter = 0;
            true
        } else {
            false
        }
    }

    #[inline]
    fn advance_ppu(&mut self) -> bool {
        self.ppu_counter += 1;
        if self.ppu_counter == self.ppu_divider {
            self.ppu_counter = 0;
            true
        } else {
            false
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Region::Ntsc)
    }
}
