//! Triangle wave channel implementation

use crate::apu::components::{LengthCounter, LinearCounter, Timer};
use crate::apu::constants::TRIANGLE_SEQUENCE;
use crate::audio::{AudioChannel, Mixer};

/// Triangle wave channel
///
/// The sequencer only advances while both the length counter and the
/// linear counter are non-zero, so a gated triangle holds its last level
/// instead of dropping to zero.
#[derive(Debug, Clone)]
pub struct TriangleChannel {
    pub(crate) length_counter: LengthCounter,
    pub(crate) linear_counter: LinearCounter,
    pub(crate) timer: Timer,
    /// Sequence position (0-31)
    pub(crate) sequence_position: u8,
}

impl TriangleChannel {
    pub fn new() -> Self {
        Self {
            length_counter: LengthCounter::new(),
            linear_counter: LinearCounter::new(),
            timer: Timer::new(AudioChannel::Triangle),
            sequence_position: 0,
        }
    }

    /// $4008: linear counter control/reload, length counter halt
    pub fn write_register_0(&mut self, data: u8) {
        self.linear_counter.write_control(data);
        self.length_counter.set_halt(self.linear_counter.control_flag);
    }

    /// $400A: timer low byte
    pub fn write_register_2(&mut self, data: u8) {
        self.timer.period = (self.timer.period & 0xFF00) | data as u16;
    }

    /// $400B: length counter load, timer high bits, linear counter reload
    pub fn write_register_3(&mut self, data: u8) {
        self.length_counter.load(data >> 3);
        self.timer.period = (self.timer.period & 0x00FF) | ((data as u16 & 0x07) << 8);
        self.linear_counter.set_reload_flag();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.length_counter.set_enabled(enabled);
    }

    pub fn is_active(&self) -> bool {
        self.length_counter.is_active()
    }

    /// Run the channel up to `cycle`
    pub fn run(&mut self, cycle: u32, mixer: &mut Mixer) {
        while self.timer.run(cycle) {
            if self.length_counter.is_active() && self.linear_counter.is_active() {
                self.sequence_position = (self.sequence_position + 1) & 0x1F;

                // Ultrasonic periods are left at their current level
                if self.timer.period >= 2 {
                    let level = TRIANGLE_SEQUENCE[self.sequence_position as usize];
                    self.timer.add_output(mixer, level as i16);
                }
            }
        }
    }

    pub fn clock_linear_counter(&mut self) {
        self.linear_counter.clock();
    }

    pub fn clock_length_counter(&mut self) {
        self.length_counter.clock();
    }

    pub fn reload_length_counter(&mut self) {
        self.length_counter.reload();
    }

    pub fn end_frame(&mut self) {
        self.timer.end_frame();
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.length_counter.reset();
        self.linear_counter.reset();
        self.sequence_position = 0;
    }
}

impl Default for TriangleChannel {
    fn default() -> Self {
        Self::new()
    }
}
