//! Envelope generator for controlling volume over time

use super::LengthCounter;

/// Envelope generator
///
/// Owns the channel's length counter, since the envelope loop flag and the
/// length counter halt flag are the same register bit.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub(crate) length_counter: LengthCounter,
    /// Constant volume flag (bit 4)
    pub(crate) constant_volume: bool,
    /// Constant volume, or divider period in decay mode (bits 0-3)
    pub(crate) volume: u8,
    /// Start flag, handled on the next clock
    pub(crate) start: bool,
    divider: i8,
    /// Decay level (0-15)
    pub(crate) counter: u8,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            length_counter: LengthCounter::new(),
            constant_volume: false,
            volume: 0,
            start: false,
            divider: 0,
            counter: 0,
        }
    }

    /// Write the control byte (halt/loop, constant volume, volume/period)
    pub fn write_control(&mut self, data: u8) {
        self.length_counter.set_halt((data & 0x20) != 0);
        self.constant_volume = (data & 0x10) != 0;
        self.volume = data & 0x0F;
    }

    /// Restart the envelope on the next clock
    pub fn restart(&mut self) {
        self.start = true;
    }

    /// Current output volume (0-15); silent once the length counter runs out
    pub fn volume(&self) -> u8 {
        if !self.length_counter.is_active() {
            0
        } else if self.constant_volume {
            self.volume
        } else {
            self.counter
        }
    }

    /// Clock the envelope generator (quarter-frame)
    pub fn clock(&mut self) {
        if self.start {
            self.start = false;
            self.counter = 15;
            self.divider = self.volume as i8;
            return;
        }

        self.divider -= 1;
        if self.divider < 0 {
            self.divider = self.volume as i8;
            if self.counter > 0 {
                self.counter -= 1;
            } else if self.length_counter.halt {
                self.counter = 15;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sounding(control: u8) -> Envelope {
        let mut env = Envelope::new();
        env.length_counter.set_enabled(true);
        env.length_counter.load(1);
        env.write_control(control);
        env.length_counter.reload();
        env
    }

    #[test]
    fn test_constant_volume() {
        let env = sounding(0x1A);
        assert_eq!(env.volume(), 0x0A);
    }

    #[test]
    fn test_start_flag_applies_on_next_clock() {
        let mut env = sounding(0x02);
        env.restart();
        assert_eq!(env.volume(), 0);

        env.clock();
        assert_eq!(env.volume(), 15);
        assert!(!env.start);
    }

    #[test]
    fn test_decay_steps_every_period_plus_one_clocks() {
        let mut env = sounding(0x02);
        env.restart();
        env.clock();

        for _ in 0..3 {
            env.clock();
        }
        assert_eq!(env.volume(), 14);
        for _ in 0..3 {
            env.clock();
        }
        assert_eq!(env.volume(), 13);
    }

    #[test]
    fn test_decay_loops_when_halted() {
        let mut env = sounding(0x20);
        env.restart();
        env.clock();
        for _ in 0..15 {
            env.clock();
        }
        assert_eq!(env.counter, 0);
        env.clock();
        assert_eq!(env.counter, 15);
    }

    #[test]
    fn test_silent_without_length() {
        let mut env = Envelope::new();
        env.write_control(0x1F);
        assert_eq!(env.volume(), 0);
    }
}
