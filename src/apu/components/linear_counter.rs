//! Linear counter for the triangle channel

/// Linear counter for the triangle channel
///
/// Gates the triangle sequencer alongside the length counter, with a much
/// finer (quarter-frame) resolution.
#[derive(Debug, Clone)]
pub struct LinearCounter {
    /// Counter value
    pub(crate) counter: u8,
    /// Reload value (from $4008 bits 6-0)
    pub(crate) reload_value: u8,
    /// Control flag (from $4008 bit 7)
    pub(crate) control_flag: bool,
    /// Reload flag, set by a $400B write
    pub(crate) reload_flag: bool,
}

impl LinearCounter {
    pub fn new() -> Self {
        Self {
            counter: 0,
            reload_value: 0,
            control_flag: false,
            reload_flag: false,
        }
    }

    /// Clock the linear counter (quarter-frame)
    pub fn clock(&mut self) {
        if self.reload_flag {
            self.counter = self.reload_value;
        } else if self.counter > 0 {
            self.counter -= 1;
        }

        if !self.control_flag {
            self.reload_flag = false;
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    /// Write the control flag and reload value
    pub fn write_control(&mut self, data: u8) {
        self.control_flag = (data & 0x80) != 0;
        self.reload_value = data & 0x7F;
    }

    pub fn set_reload_flag(&mut self) {
        self.reload_flag = true;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LinearCounter {
    fn default() -> Self {
        Self::new()
    }
}
