//! Frame counter for the APU
//!
//! The frame counter is a divider that generates low-frequency clock signals
//! to drive the APU's envelope, sweep, and length counter units.
//!
//! It operates in two modes:
//! - 4-step mode: Generates IRQs and runs at approximately 240 Hz
//! - 5-step mode: No IRQs and runs at approximately 192 Hz
//!
//! Both modes walk the same six-entry step table; the last entries carry no
//! clock and only exist to raise the IRQ on the right cycles in 4-step mode.

use crate::apu::constants::frame_step_cycles;
use crate::region::Region;

/// Clock signals the frame counter sends to the channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Quarter frame event - clock envelopes and linear counters
    QuarterFrame,
    /// Half frame event - quarter frame work plus length counters and sweep units
    HalfFrame,
}

/// Frame counter sequencer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// 4-step mode (default) - approximately 240 Hz
    FourStep = 0,
    /// 5-step mode - approximately 192 Hz
    FiveStep = 1,
}

/// Event produced on each step of the sequence (shared by both modes)
const STEP_EVENTS: [Option<FrameEvent>; 6] = [
    Some(FrameEvent::QuarterFrame),
    Some(FrameEvent::HalfFrame),
    Some(FrameEvent::QuarterFrame),
    None,
    Some(FrameEvent::HalfFrame),
    None,
];

/// Result of one frame counter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRun {
    /// Cycles the channels may be advanced by
    pub cycles: u32,
    /// Clock to deliver to the channels, if any
    pub event: Option<FrameEvent>,
}

/// Frame counter for clocking APU components
#[derive(Debug, Clone)]
pub struct FrameCounter {
    step_cycles: &'static [[u32; 6]; 2],
    /// Current mode (4-step or 5-step)
    mode: FrameMode,
    /// Cycles elapsed in the current sequence
    previous_cycle: u32,
    /// Next step of the sequence (0-5)
    step: usize,
    /// IRQ inhibit flag (bit 6 of $4017)
    pub(crate) irq_inhibit: bool,
    /// Frame interrupt flag
    pub(crate) irq: bool,
    /// Runs left during which further clocks are suppressed
    block_tick: u8,
    /// $4017 value waiting to take effect
    new_value: Option<u8>,
    /// Runs left before `new_value` is applied
    write_delay: u8,
}

impl FrameCounter {
    /// Create a frame counter in its power-on state
    ///
    /// Power-on behaves like a write of $00 to $4017.
    pub fn new(region: Region) -> Self {
        Self {
            step_cycles: frame_step_cycles(region),
            mode: FrameMode::FourStep,
            previous_cycle: 0,
            step: 0,
            irq_inhibit: false,
            irq: false,
            block_tick: 0,
            new_value: Some(0),
            write_delay: 3,
        }
    }

    /// Reset the frame counter to its power-on state, keeping the region tables
    pub fn reset(&mut self) {
        *self = Self {
            step_cycles: self.step_cycles,
            ..Self::new(Region::Ntsc)
        };
    }

    pub fn set_region(&mut self, region: Region) {
        self.step_cycles = frame_step_cycles(region);
    }

    /// Write to the frame counter control register ($4017)
    ///
    /// Bit 7: Mode (0 = 4-step, 1 = 5-step), applied 3 runs later
    /// Bit 6: IRQ inhibit flag, applied immediately
    pub fn write_control(&mut self, value: u8) {
        self.new_value = Some(value);
        self.write_delay = 3;
        self.irq_inhibit = (value & 0x40) != 0;
        if self.irq_inhibit {
            self.irq = false;
        }
    }

    /// Advance the sequencer by up to `cycles_to_run` cycles
    ///
    /// Stops at the next step boundary so the caller can bring the channels
    /// up to that cycle before delivering the clock. `cycles_to_run` is
    /// decreased by the number of cycles consumed.
    pub fn run(&mut self, cycles_to_run: &mut u32) -> FrameRun {
        let mut run = FrameRun {
            cycles: 0,
            event: None,
        };
        let step_cycle = self.step_cycles[self.mode as usize][self.step];

        if self.previous_cycle + *cycles_to_run >= step_cycle {
            if !self.irq_inhibit && self.mode == FrameMode::FourStep && self.step >= 3 {
                self.irq = true;
            }

            if let Some(event) = STEP_EVENTS[self.step] {
                if self.block_tick == 0 {
                    run.event = Some(event);
                    self.block_tick = 2;
                }
            }

            run.cycles = step_cycle.saturating_sub(self.previous_cycle);
            *cycles_to_run -= run.cycles;

            self.step += 1;
            if self.step == STEP_EVENTS.len() {
                self.step = 0;
                self.previous_cycle = 0;
            } else {
                self.previous_cycle += run.cycles;
            }
        } else {
            run.cycles = *cycles_to_run;
            *cycles_to_run = 0;
            self.previous_cycle += run.cycles;
        }

        if let Some(value) = self.new_value {
            self.write_delay -= 1;
            if self.write_delay == 0 {
                self.mode = if (value & 0x80) != 0 {
                    FrameMode::FiveStep
                } else {
                    FrameMode::FourStep
                };
                self.step = 0;
                self.previous_cycle = 0;
                self.new_value = None;

                // Entering 5-step mode clocks everything at once
                if self.mode == FrameMode::FiveStep && self.block_tick == 0 {
                    run.event = Some(FrameEvent::HalfFrame);
                    self.block_tick = 2;
                }
            }
        }

        if self.block_tick > 0 {
            self.block_tick -= 1;
        }

        run
    }

    /// Get the current mode
    pub fn mode(&self) -> FrameMode {
        self.mode
    }

    /// Check if the frame IRQ flag is set
    pub fn irq_pending(&self) -> bool {
        self.irq
    }

    /// Clear the IRQ flag (when $4015 is read)
    pub fn clear_irq(&mut self) {
        self.irq = false;
    }
}
