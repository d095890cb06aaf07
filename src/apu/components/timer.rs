//! Channel timer and output delta emitter

use crate::audio::{AudioChannel, Mixer};

/// Period divider shared by every APU channel
///
/// Besides counting down the channel period, the timer remembers the cycle
/// it last caught up to and the last level it reported, so output changes
/// reach the mixer as deltas stamped with the exact cycle they happened on.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Mixer slot this timer reports to
    channel: AudioChannel,
    /// Cycle (within the current audio frame) the timer has run up to
    pub(crate) previous_cycle: u32,
    /// Cycles left before the next expiry
    pub(crate) counter: u16,
    /// Reload value
    pub(crate) period: u16,
    /// Last level sent to the mixer
    pub(crate) last_output: i16,
}

impl Timer {
    pub fn new(channel: AudioChannel) -> Self {
        Self {
            channel,
            previous_cycle: 0,
            counter: 0,
            period: 0,
            last_output: 0,
        }
    }

    /// Report `output` to the mixer if it differs from the last level
    pub fn add_output(&mut self, mixer: &mut Mixer, output: i16) {
        if output != self.last_output {
            mixer.add_delta(self.channel, self.previous_cycle, output - self.last_output);
            self.last_output = output;
        }
    }

    /// Advance toward `target_cycle`
    ///
    /// Returns true if the timer expired on the way; `previous_cycle` then
    /// points at the expiry cycle and the caller should run again.
    pub fn run(&mut self, target_cycle: u32) -> bool {
        let cycles_to_run = target_cycle.saturating_sub(self.previous_cycle);

        if cycles_to_run > self.counter as u32 {
            self.previous_cycle += self.counter as u32 + 1;
            self.counter = self.period;
            true
        } else {
            self.counter -= cycles_to_run as u16;
            self.previous_cycle = target_cycle;
            false
        }
    }

    /// Start counting from cycle 0 of the next audio frame
    pub fn end_frame(&mut self) {
        self.previous_cycle = 0;
    }

    pub fn reset(&mut self) {
        self.counter = 0;
        self.period = 0;
        self.previous_cycle = 0;
        self.last_output = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MixerSettings;
    use crate::region::Region;

    #[test]
    fn test_timer_expires_after_period_plus_one() {
        let mut timer = Timer::new(AudioChannel::Pulse1);
        timer.period = 3;
        timer.counter = 3;

        assert!(!timer.run(3));
        assert_eq!(timer.counter, 0);
        assert!(timer.run(4));
        assert_eq!(timer.previous_cycle, 4);
        assert_eq!(timer.counter, 3);
    }

    #[test]
    fn test_timer_catches_up_in_several_expiries() {
        let mut timer = Timer::new(AudioChannel::Noise);
        timer.period = 1;

        let mut expiries = Vec::new();
        while timer.run(6) {
            expiries.push(timer.previous_cycle);
        }
        assert_eq!(expiries, vec![1, 3, 5]);
        assert_eq!(timer.previous_cycle, 6);
    }

    #[test]
    fn test_add_output_only_reports_changes() {
        let mut mixer = Mixer::new(Region::Ntsc, MixerSettings::default()).unwrap();
        let mut timer = Timer::new(AudioChannel::Triangle);

        timer.add_output(&mut mixer, 0);
        assert_eq!(timer.last_output, 0);

        timer.previous_cycle = 12;
        timer.add_output(&mut mixer, 9);
        timer.add_output(&mut mixer, 9);
        assert_eq!(timer.last_output, 9);

        mixer.end_frame(100).unwrap();
        // 3 * 9 on the triangle input of the tnd group
        assert_eq!(mixer.output_volume(), 817);
    }
}
