//! Sweep unit for pitch bending

/// Sweep unit for pitch bending
///
/// The target period is derived from the channel's raw 11-bit period. Pulse 1
/// negates with one's complement, so its downward sweeps land one lower than
/// pulse 2's.
#[derive(Debug, Clone)]
pub struct Sweep {
    /// Enabled flag (bit 7)
    pub(crate) enabled: bool,
    /// Divider reload value, 1-8
    pub(crate) period: u8,
    /// Negate flag (bit 3)
    pub(crate) negate: bool,
    /// Shift amount (bits 0-2)
    pub(crate) shift: u8,
    /// Reload flag, set by a register write
    pub(crate) reload: bool,
    /// Divider; idle at 0 until the first reload
    divider: u8,
    /// Use one's complement negation (pulse 1)
    ones_complement: bool,
}

impl Sweep {
    pub fn new(ones_complement: bool) -> Self {
        Self {
            enabled: false,
            period: 0,
            negate: false,
            shift: 0,
            reload: false,
            divider: 0,
            ones_complement,
        }
    }

    /// Write to the sweep control register
    pub fn write_control(&mut self, data: u8) {
        self.enabled = (data & 0x80) != 0;
        self.negate = (data & 0x08) != 0;
        self.period = ((data >> 4) & 0x07) + 1;
        self.shift = data & 0x07;
        self.reload = true;
    }

    /// Target period for a channel currently at `period`
    pub fn target_period(&self, period: u16) -> i32 {
        let change = (period >> self.shift) as i32;
        let period = period as i32;
        if self.negate {
            period - change - i32::from(self.ones_complement)
        } else {
            period + change
        }
    }

    /// Whether the sweep silences a channel at `period`
    pub fn is_muting(&self, period: u16) -> bool {
        period < 8 || (!self.negate && self.target_period(period) > 0x7FF)
    }

    /// Clock the sweep unit (half-frame)
    ///
    /// Returns the new period when the divider expires and the target is in range.
    pub fn clock(&mut self, period: u16) -> Option<u16> {
        let mut update = None;

        if self.divider > 0 {
            self.divider -= 1;
            if self.divider == 0 {
                let target = self.target_period(period);
                if self.shift > 0 && self.enabled && period >= 8 && target <= 0x7FF {
                    update = Some(target as u16);
                }
                self.divider = self.period;
            }
        }

        if self.reload {
            self.divider = self.period;
            self.reload = false;
        }

        update
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.ones_complement);
    }
}
