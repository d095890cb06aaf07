//! Length counter for controlling note duration

use crate::apu::constants::LENGTH_COUNTER_TABLE;

/// Length counter for controlling note duration
///
/// Loads are not applied immediately: the new value is held until the APU's
/// next catch-up step, and it is dropped if the counter was clocked in the
/// meantime. Halt flag changes are deferred the same way.
#[derive(Debug, Clone)]
pub struct LengthCounter {
    /// Channel enable bit from $4015
    pub(crate) enabled: bool,
    /// Halt flag in effect
    pub(crate) halt: bool,
    /// Halt flag to apply on the next reload step
    pub(crate) new_halt: bool,
    /// Counter value
    pub(crate) counter: u8,
    /// Pending load value (0 = none)
    pub(crate) reload_value: u8,
    /// Counter value at the time of the pending load
    pub(crate) previous_value: u8,
}

impl LengthCounter {
    pub fn new() -> Self {
        Self {
            enabled: false,
            halt: false,
            new_halt: false,
            counter: 0,
            reload_value: 0,
            previous_value: 0,
        }
    }

    /// Schedule a new halt flag
    pub fn set_halt(&mut self, halt: bool) {
        self.new_halt = halt;
    }

    /// Schedule a load from the length table; ignored while the channel is disabled
    pub fn load(&mut self, index: u8) {
        if self.enabled {
            self.reload_value = LENGTH_COUNTER_TABLE[(index & 0x1F) as usize];
            self.previous_value = self.counter;
        }
    }

    /// Apply a pending load and halt change
    pub fn reload(&mut self) {
        if self.reload_value > 0 {
            if self.counter == self.previous_value {
                self.counter = self.reload_value;
            }
            self.reload_value = 0;
        }
        self.halt = self.new_halt;
    }

    /// Clock the length counter (half-frame)
    pub fn clock(&mut self) {
        if self.counter > 0 && !self.halt {
            self.counter -= 1;
        }
    }

    /// Check if the length counter is non-zero
    #[inline]
    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.counter = 0;
        }
        self.enabled = enabled;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LengthCounter {
    fn default() -> Self {
        Self::new()
    }
}
