//! APU constants and lookup tables

use crate::region::Region;

/// Length counter lookup table
/// Maps the 5-bit length counter load value to the actual counter value
pub const LENGTH_COUNTER_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Duty cycle patterns for pulse channels
///
/// The sequencer position counts down, so each row reads right to left.
pub const DUTY_PATTERNS: [[u8; 8]; 4] = [
    [0, 0, 0, 0, 0, 0, 0, 1], // 12.5%
    [0, 0, 0, 0, 0, 0, 1, 1], // 25%
    [0, 0, 0, 0, 1, 1, 1, 1], // 50%
    [1, 1, 1, 1, 1, 1, 0, 0], // 75% (inverted 25%)
];

/// Triangle wave sequence
/// 32-step sequence from 15 down to 0, then back up to 15
pub const TRIANGLE_SEQUENCE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12,
    13, 14, 15,
];

/// Noise channel periods in CPU cycles (NTSC)
pub const NOISE_PERIOD_TABLE_NTSC: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

/// Noise channel periods in CPU cycles (PAL)
pub const NOISE_PERIOD_TABLE_PAL: [u16; 16] = [
    4, 8, 14, 30, 60, 88, 118, 148, 188, 236, 354, 472, 708, 944, 1890, 3778,
];

/// DMC output bit periods in CPU cycles (NTSC)
pub const DMC_PERIOD_TABLE_NTSC: [u16; 16] = [
    428, 380, 340, 320, 286, 254, 226, 214, 190, 160, 142, 128, 106, 84, 72, 54,
];

/// DMC output bit periods in CPU cycles (PAL)
pub const DMC_PERIOD_TABLE_PAL: [u16; 16] = [
    398, 354, 316, 298, 276, 236, 210, 198, 176, 148, 132, 118, 98, 78, 66, 50,
];

/// Frame sequencer step boundaries (NTSC), indexed by [mode][step]
pub const FRAME_STEP_CYCLES_NTSC: [[u32; 6]; 2] = [
    [7457, 14913, 22371, 29828, 29829, 29830],
    [7457, 14913, 22371, 29829, 37281, 37282],
];

/// Frame sequencer step boundaries (PAL), indexed by [mode][step]
pub const FRAME_STEP_CYCLES_PAL: [[u32; 6]; 2] = [
    [8313, 16627, 24939, 33252, 33253, 33254],
    [8313, 16627, 24939, 33253, 41565, 41566],
];

pub fn noise_period_table(region: Region) -> &'static [u16; 16] {
    match region {
        Region::Ntsc => &NOISE_PERIOD_TABLE_NTSC,
        Region::Pal => &NOISE_PERIOD_TABLE_PAL,
    }
}

pub fn dmc_period_table(region: Region) -> &'static [u16; 16] {
    match region {
        Region::Ntsc => &DMC_PERIOD_TABLE_NTSC,
        Region::Pal => &DMC_PERIOD_TABLE_PAL,
    }
}

pub fn frame_step_cycles(region: Region) -> &'static [[u32; 6]; 2] {
    match region {
        Region::Ntsc => &FRAME_STEP_CYCLES_NTSC,
        Region::Pal => &FRAME_STEP_CYCLES_PAL,
    }
}
