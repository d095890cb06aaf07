//! Pulse wave channel implementation

use crate::apu::components::{Envelope, Sweep, Timer};
use crate::apu::constants::DUTY_PATTERNS;
use crate::audio::{AudioChannel, Mixer};

/// Pulse wave channel (used for both Pulse 1 and Pulse 2)
#[derive(Debug, Clone)]
pub struct PulseChannel {
    /// Envelope generator (owns the length counter)
    pub(crate) envelope: Envelope,
    /// Sweep unit
    pub(crate) sweep: Sweep,
    /// Timer, running at twice the raw period plus one
    pub(crate) timer: Timer,
    /// Duty cycle (0-3)
    pub(crate) duty: u8,
    /// Duty cycle sequence position (0-7), counts down
    pub(crate) duty_position: u8,
    /// Raw 11-bit period from $4002/$4003
    pub(crate) real_period: u16,
}

impl PulseChannel {
    /// Create a new pulse channel
    ///
    /// `channel` must be `Pulse1` or `Pulse2`; pulse 1's sweep negates with
    /// one's complement.
    pub fn new(channel: AudioChannel) -> Self {
        Self {
            envelope: Envelope::new(),
            sweep: Sweep::new(channel == AudioChannel::Pulse1),
            timer: Timer::new(channel),
            duty: 0,
            duty_position: 0,
            real_period: 0,
        }
    }

    /// Write to register 0 (duty cycle and envelope)
    pub fn write_register_0(&mut self, data: u8, mixer: &mut Mixer) {
        self.envelope.write_control(data);
        self.duty = (data >> 6) & 0x03;
        self.update_output(mixer);
    }

    /// Write to register 1 (sweep unit)
    pub fn write_register_1(&mut self, data: u8, mixer: &mut Mixer) {
        self.sweep.write_control(data);
        self.update_output(mixer);
    }

    /// Write to register 2 (timer low byte)
    pub fn write_register_2(&mut self, data: u8, mixer: &mut Mixer) {
        self.set_period((self.real_period & 0x0700) | data as u16);
        self.update_output(mixer);
    }

    /// Write to register 3 (length counter and timer high)
    pub fn write_register_3(&mut self, data: u8, mixer: &mut Mixer) {
        self.envelope.length_counter.load(data >> 3);
        self.set_period((self.real_period & 0x00FF) | ((data as u16 & 0x07) << 8));
        self.duty_position = 0;
        self.envelope.restart();
        self.update_output(mixer);
    }

    fn set_period(&mut self, period: u16) {
        self.real_period = period;
        self.timer.period = period * 2 + 1;
    }

    /// Whether the sweep unit currently silences the channel
    pub fn is_muted(&self) -> bool {
        self.sweep.is_muting(self.real_period)
    }

    fn update_output(&mut self, mixer: &mut Mixer) {
        let output = if self.is_muted() {
            0
        } else {
            DUTY_PATTERNS[self.duty as usize][self.duty_position as usize]
                * self.envelope.volume()
        };
        self.timer.add_output(mixer, output as i16);
    }

    /// Set the enabled flag (from $4015)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.envelope.length_counter.set_enabled(enabled);
    }

    /// Length counter status bit for $4015
    pub fn is_active(&self) -> bool {
        self.envelope.length_counter.is_active()
    }

    /// Run the channel up to `cycle`
    pub fn run(&mut self, cycle: u32, mixer: &mut Mixer) {
        while self.timer.run(cycle) {
            self.duty_position = self.duty_position.wrapping_sub(1) & 0x07;
            self.update_output(mixer);
        }
    }

    /// Clock the envelope (quarter-frame)
    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    /// Clock the length counter (half-frame)
    pub fn clock_length_counter(&mut self) {
        self.envelope.length_counter.clock();
    }

    /// Clock the sweep unit (half-frame)
    pub fn clock_sweep(&mut self) {
        if let Some(period) = self.sweep.clock(self.real_period) {
            self.set_period(period);
        }
    }

    pub fn reload_length_counter(&mut self) {
        self.envelope.length_counter.reload();
    }

    pub fn end_frame(&mut self) {
        self.timer.end_frame();
    }

    pub fn reset(&mut self) {
        self.envelope.reset();
        self.sweep.reset();
        self.timer.reset();
        self.duty = 0;
        self.duty_position = 0;
        self.real_period = 0;
    }
}
