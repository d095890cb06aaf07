//! Noise channel implementation

use crate::apu::components::{Envelope, Timer};
use crate::apu::constants::noise_period_table;
use crate::audio::{AudioChannel, Mixer};
use crate::region::Region;

/// Noise channel driven by a 15-bit linear feedback shift register
#[derive(Debug, Clone)]
pub struct NoiseChannel {
    pub(crate) envelope: Envelope,
    pub(crate) timer: Timer,
    /// LFSR state, never zero
    pub(crate) shift_register: u16,
    /// Short mode (bit 7 of $400E): feedback from bit 6 instead of bit 1
    pub(crate) mode_flag: bool,
    period_table: &'static [u16; 16],
}

impl NoiseChannel {
    pub fn new(region: Region) -> Self {
        let mut noise = Self {
            envelope: Envelope::new(),
            timer: Timer::new(AudioChannel::Noise),
            shift_register: 1,
            mode_flag: false,
            period_table: noise_period_table(region),
        };
        noise.reset();
        noise
    }

    pub fn set_region(&mut self, region: Region) {
        self.period_table = noise_period_table(region);
    }

    /// $400C: envelope control
    pub fn write_register_0(&mut self, data: u8) {
        self.envelope.write_control(data);
    }

    /// $400E: mode and period index
    pub fn write_register_2(&mut self, data: u8) {
        self.timer.period = self.period_table[(data & 0x0F) as usize] - 1;
        self.mode_flag = (data & 0x80) != 0;
    }

    /// $400F: length counter load, envelope restart
    pub fn write_register_3(&mut self, data: u8) {
        self.envelope.length_counter.load(data >> 3);
        self.envelope.restart();
    }

    /// Bit 0 of the shift register silences the channel
    #[inline]
    pub fn is_muted(&self) -> bool {
        (self.shift_register & 0x01) != 0
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.envelope.length_counter.set_enabled(enabled);
    }

    pub fn is_active(&self) -> bool {
        self.envelope.length_counter.is_active()
    }

    /// Run the channel up to `cycle`
    pub fn run(&mut self, cycle: u32, mixer: &mut Mixer) {
        while self.timer.run(cycle) {
            let tap = if self.mode_flag { 6 } else { 1 };
            let feedback = (self.shift_register ^ (self.shift_register >> tap)) & 0x01;
            self.shift_register = (self.shift_register >> 1) | (feedback << 14);

            let output = if self.is_muted() {
                0
            } else {
                self.envelope.volume()
            };
            self.timer.add_output(mixer, output as i16);
        }
    }

    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    pub fn clock_length_counter(&mut self) {
        self.envelope.length_counter.clock();
    }

    pub fn reload_length_counter(&mut self) {
        self.envelope.length_counter.reload();
    }

    pub fn end_frame(&mut self) {
        self.timer.end_frame();
    }

    pub fn reset(&mut self) {
        self.envelope.reset();
        self.timer.reset();
        self.timer.period = self.period_table[0] - 1;
        self.shift_register = 1;
        self.mode_flag = false;
    }
}
