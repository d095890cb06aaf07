//! Band-limited step synthesis buffer
//!
//! `BlipBuf` turns amplitude changes ("deltas") stamped with clock times into
//! a band-limited sample stream at a lower output rate. Each delta is spread
//! across a 16-tap windowed-sinc step kernel selected by the delta's
//! sub-sample phase, so hard square-wave edges do not alias when resampled.
//!
//! Time is tracked in 64-bit fixed point: the upper bits count whole output
//! samples and the low `TIME_BITS` bits hold the fraction. `set_rates` picks
//! the scale factor that maps one input clock onto that grid.
//!
//! # Usage
//!
//! ```
//! use nes_core::audio::BlipBuf;
//!
//! let mut blip = BlipBuf::new(1024).unwrap();
//! blip.set_rates(1_789_773, 48_000).unwrap();
//!
//! blip.add_delta(100, 8000).unwrap();
//! blip.end_frame(29_780).unwrap();
//!
//! let mut out = vec![0.0f32; 1024];
//! let read = blip.read_samples(&mut out, 0, 1024, false);
//! assert!(read <= 1024);
//! ```

use thiserror::Error;

/// Maximum clock_rate / sample_rate ratio
pub const MAX_RATIO: u32 = 1 << 20;

/// Extra clocks that may be added to a frame beyond the buffer's horizon
const END_FRAME_EXTRA: usize = 2;
const HALF_WIDTH: usize = 8;
const BUF_EXTRA: usize = HALF_WIDTH * 2 + END_FRAME_EXTRA;

const PRE_SHIFT: u32 = 32;
const TIME_BITS: u32 = PRE_SHIFT + 20;
const TIME_UNIT: u64 = 1 << TIME_BITS;

const BASS_SHIFT: u32 = 9;
const PHASE_BITS: u32 = 5;
const PHASE_COUNT: usize = 1 << PHASE_BITS;
const DELTA_BITS: u32 = 15;
const DELTA_UNIT: i32 = 1 << DELTA_BITS;
const FRAC_BITS: u32 = TIME_BITS - PRE_SHIFT;
const PHASE_SHIFT: u32 = FRAC_BITS - PHASE_BITS;

/// Step kernel, one row per sub-sample phase (plus one for interpolation)
#[rustfmt::skip]
static BL_STEP: [[i16; HALF_WIDTH]; PHASE_COUNT + 1] = [
    [43, -115, 350, -488, 1136, -914, 5861, 21022],
    [44, -118, 348, -473, 1076, -799, 5274, 21001],
    [45, -121, 344, -454, 1011, -677, 4706, 20936],
    [46, -122, 336, -431,  942, -549, 4156, 20829],
    [47, -123, 327, -404,  868, -418, 3629, 20679],
    [47, -122, 316, -375,  792, -285, 3124, 20488],
    [47, -120, 303, -344,  714, -151, 2644, 20256],
    [46, -117, 289, -310,  634,  -17, 2188, 19985],
    [46, -114, 273, -275,  553,  117, 1758, 19675],
    [44, -108, 255, -237,  471,  247, 1356, 19327],
    [43, -103, 237, -199,  390,  373,  981, 18944],
    [42,  -98, 218, -160,  310,  495,  633, 18527],
    [40,  -91, 198, -121,  231,  611,  314, 18078],
    [38,  -84, 178,  -81,  153,  722,   22, 17599],
    [36,  -76, 157,  -43,   80,  824, -241, 17092],
    [34,  -68, 135,   -3,    8,  919, -476, 16558],
    [32,  -61, 115,   34,  -60, 1006, -683, 16001],
    [29,  -52,  94,   70, -123, 1083, -862, 15422],
    [27,  -44,  73,  106, -184, 1152, -1015, 14824],
    [25,  -36,  53,  139, -239, 1211, -1142, 14210],
    [22,  -27,  34,  170, -290, 1261, -1244, 13582],
    [20,  -20,  16,  199, -335, 1301, -1322, 12942],
    [18,  -12,  -3,  226, -375, 1331, -1376, 12293],
    [15,   -4, -19,  250, -410, 1351, -1408, 11638],
    [13,    3, -35,  272, -439, 1361, -1419, 10979],
    [11,    9, -49,  292, -464, 1362, -1410, 10319],
    [ 9,   16, -63,  309, -483, 1354, -1383,  9660],
    [ 7,   22, -75,  322, -496, 1337, -1339,  9005],
    [ 6,   26, -85,  333, -504, 1312, -1280,  8355],
    [ 4,   31, -94,  341, -507, 1278, -1205,  7713],
    [ 3,   35, -102, 347, -506, 1238, -1119,  7082],
    [ 1,   40, -110, 350, -499, 1190, -1021,  6464],
    [ 0,   43, -115, 350, -488, 1136,  -914,  5861],
];

/// Contract violations reported by [`BlipBuf`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlipError {
    /// Buffer capacity must hold at least one sample
    #[error("blip buffer capacity must be greater than zero")]
    InvalidCapacity,

    /// Clock and sample rates must both be non-zero
    #[error("invalid resampling rates: clock rate {clock_rate}, sample rate {sample_rate}")]
    InvalidRate { clock_rate: u32, sample_rate: u32 },

    /// The sample rate is too high relative to the clock rate to be represented
    #[error("sample rate exceeds the representable ratio to the clock rate")]
    RatioTooLarge,

    /// More samples were requested than the buffer can hold
    #[error("requested {requested} samples but only {available} of {capacity} slots are free")]
    BufferFull {
        requested: usize,
        available: usize,
        capacity: usize,
    },

    /// Time was advanced past the buffer horizon without reading samples out
    #[error("blip buffer overflow: samples must be read before more time is added")]
    BufferOverflow,
}

/// Band-limited resampling buffer
#[derive(Debug, Clone)]
pub struct BlipBuf {
    factor: u64,
    offset: u64,
    avail: usize,
    size: usize,
    integrator: i32,
    samples: Vec<i32>,
}

impl BlipBuf {
    /// Create a buffer able to hold `size` output samples
    ///
    /// The initial rates map `MAX_RATIO` clocks onto one sample, so a
    /// freshly created buffer can be driven in oversampled time units
    /// without calling [`set_rates`](Self::set_rates).
    pub fn new(size: usize) -> Result<Self, BlipError> {
        if size == 0 {
            return Err(BlipError::InvalidCapacity);
        }

        let mut blip = Self {
            factor: TIME_UNIT / MAX_RATIO as u64,
            offset: 0,
            avail: 0,
            size,
            integrator: 0,
            samples: vec![0; size + BUF_EXTRA],
        };
        blip.clear();
        Ok(blip)
    }

    /// Set the input clock rate and output sample rate
    ///
    /// The fixed-point factor is rounded up so the buffer never produces
    /// fewer samples than the exact ratio would.
    pub fn set_rates(&mut self, clock_rate: u32, sample_rate: u32) -> Result<(), BlipError> {
        if clock_rate == 0 || sample_rate == 0 {
            return Err(BlipError::InvalidRate {
                clock_rate,
                sample_rate,
            });
        }

        let exact = TIME_UNIT as f64 * sample_rate as f64 / clock_rate as f64;
        if exact >= u64::MAX as f64 {
            return Err(BlipError::RatioTooLarge);
        }

        let factor = exact as u64;
        let error = exact - factor as f64;
        if !(0.0..1.0).contains(&error) {
            return Err(BlipError::RatioTooLarge);
        }

        self.factor = if (factor as f64) < exact {
            factor + 1
        } else {
            factor
        };
        Ok(())
    }

    /// Discard all buffered samples and reset the time offset
    pub fn clear(&mut self) {
        self.offset = self.factor / 2;
        self.avail = 0;
        self.integrator = 0;
        self.samples.fill(0);
    }

    /// Number of clocks that must be added with `end_frame` before
    /// `samples` extra samples become available
    pub fn clocks_needed(&self, samples: usize) -> Result<u32, BlipError> {
        if self.avail + samples > self.size {
            return Err(BlipError::BufferFull {
                requested: samples,
                available: self.size - self.avail,
                capacity: self.size,
            });
        }

        let needed = (samples as u64).wrapping_mul(TIME_UNIT);
        if needed < self.offset {
            return Ok(0);
        }

        let clocks = (needed - self.offset + self.factor - 1) / self.factor;
        Ok(u32::try_from(clocks).unwrap_or(u32::MAX))
    }

    /// Close the current frame at clock `time`, making its samples readable
    ///
    /// Deltas for the next frame are timed relative to the end of this one.
    pub fn end_frame(&mut self, time: u32) -> Result<(), BlipError> {
        let off = (time as u64)
            .wrapping_mul(self.factor)
            .wrapping_add(self.offset);
        let avail = self.avail + (off >> TIME_BITS) as usize;
        if avail > self.size {
            return Err(BlipError::BufferOverflow);
        }

        self.avail = avail;
        self.offset = off & (TIME_UNIT - 1);
        Ok(())
    }

    /// Number of samples ready to be read
    #[inline]
    pub fn samples_available(&self) -> usize {
        self.avail
    }

    /// Buffer capacity in samples
    #[inline]
    pub fn capacity(&self) -> usize {
        self.size
    }

    /// Read up to `count` samples into `out` starting at `offset`
    ///
    /// In stereo mode every other slot is written so two buffers can share
    /// one interleaved output. Returns the number of samples written, which
    /// is bounded by `count`, by `samples_available()` and by the room left
    /// in `out`.
    pub fn read_samples(
        &mut self,
        out: &mut [f32],
        offset: usize,
        count: usize,
        stereo: bool,
    ) -> usize {
        let step = if stereo { 2 } else { 1 };
        let room = out.len().saturating_sub(offset).div_ceil(step);
        let count = count.min(self.avail).min(room);

        if count > 0 {
            let mut sum = self.integrator;
            let mut pos = offset;
            for &sample in &self.samples[..count] {
                let s = (sum >> DELTA_BITS).clamp(i16::MIN as i32, i16::MAX as i32);
                sum = sum.wrapping_add(sample);
                out[pos] = s as f32 / 32768.0;
                pos += step;
                sum = sum.wrapping_sub(s << (DELTA_BITS - BASS_SHIFT));
            }
            self.integrator = sum;
            self.remove_samples(count);
        }

        count
    }

    /// Add a delta at clock `time` using full interpolation between phases
    ///
    /// Sample arithmetic wraps: deltas far outside the 16-bit output range
    /// alias instead of overflowing.
    pub fn add_delta(&mut self, time: u32, delta: i32) -> Result<(), BlipError> {
        let fixed = self.fixed_time(time);
        let i = self.sample_index(fixed)?;

        let phase = ((fixed >> PHASE_SHIFT) as usize) & (PHASE_COUNT - 1);
        let interp = ((fixed >> (PHASE_SHIFT - DELTA_BITS)) as i32) & (DELTA_UNIT - 1);
        let delta2 = delta.wrapping_mul(interp) >> DELTA_BITS;
        let delta = delta.wrapping_sub(delta2);

        let fwd = &BL_STEP[phase];
        let fwd_next = &BL_STEP[phase + 1];
        let rev = &BL_STEP[PHASE_COUNT - phase];
        let rev_prev = &BL_STEP[PHASE_COUNT - phase - 1];

        let out = &mut self.samples[i..i + HALF_WIDTH * 2];
        for k in 0..HALF_WIDTH {
            let front = (fwd[k] as i32)
                .wrapping_mul(delta)
                .wrapping_add((fwd_next[k] as i32).wrapping_mul(delta2));
            out[k] = out[k].wrapping_add(front);

            let back = (rev[HALF_WIDTH - 1 - k] as i32)
                .wrapping_mul(delta)
                .wrapping_add((rev_prev[HALF_WIDTH - 1 - k] as i32).wrapping_mul(delta2));
            out[HALF_WIDTH + k] = out[HALF_WIDTH + k].wrapping_add(back);
        }
        Ok(())
    }

    /// Add a delta at clock `time` using a two-tap linear step
    ///
    /// Cheaper than [`add_delta`](Self::add_delta) and exact when deltas
    /// land on whole samples.
    pub fn add_delta_fast(&mut self, time: u32, delta: i32) -> Result<(), BlipError> {
        let fixed = self.fixed_time(time);
        let i = self.sample_index(fixed)?;

        let interp = ((fixed >> (FRAC_BITS - DELTA_BITS)) as i32) & (DELTA_UNIT - 1);
        let delta2 = delta.wrapping_mul(interp);

        self.samples[i + 7] = self.samples[i + 7]
            .wrapping_add(delta.wrapping_mul(DELTA_UNIT).wrapping_sub(delta2));
        self.samples[i + 8] = self.samples[i + 8].wrapping_add(delta2);
        Ok(())
    }

    // ========================================
    // Internal helpers
    // ========================================

    #[inline]
    fn fixed_time(&self, time: u32) -> u32 {
        ((time as u64)
            .wrapping_mul(self.factor)
            .wrapping_add(self.offset)
            >> PRE_SHIFT) as u32
    }

    #[inline]
    fn sample_index(&self, fixed: u32) -> Result<usize, BlipError> {
        let i = self.avail + (fixed >> FRAC_BITS) as usize;
        if i > self.size + END_FRAME_EXTRA {
            return Err(BlipError::BufferOverflow);
        }
        Ok(i)
    }

    fn remove_samples(&mut self, count: usize) {
        let remain = self.avail + BUF_EXTRA - count;
        self.avail -= count;
        self.samples.copy_within(count..count + remain, 0);
        self.samples[remain..remain + count].fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERSAMPLE: u32 = MAX_RATIO;
    const BLIP_SIZE: usize = 2000;

    fn blip() -> BlipBuf {
        BlipBuf::new(BLIP_SIZE).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(BlipBuf::new(0).unwrap_err(), BlipError::InvalidCapacity);
    }

    #[test]
    fn test_end_frame_accumulates_available() {
        let mut blip = blip();
        blip.end_frame(OVERSAMPLE).unwrap();
        assert_eq!(blip.samples_available(), 1);

        blip.end_frame(OVERSAMPLE * 2).unwrap();
        assert_eq!(blip.samples_available(), 3);
    }

    #[test]
    fn test_end_frame_fractional() {
        let mut blip = blip();
        blip.end_frame(OVERSAMPLE * 2 - 1).unwrap();
        assert_eq!(blip.samples_available(), 1);

        blip.end_frame(1).unwrap();
        assert_eq!(blip.samples_available(), 2);
    }

    #[test]
    fn test_end_frame_limits() {
        let mut blip = blip();
        blip.end_frame(0).unwrap();
        assert_eq!(blip.samples_available(), 0);

        blip.end_frame(BLIP_SIZE as u32 * OVERSAMPLE + OVERSAMPLE - 1)
            .unwrap();
        assert_eq!(blip.end_frame(1), Err(BlipError::BufferOverflow));
        // A rejected frame leaves the buffer untouched
        assert_eq!(blip.samples_available(), BLIP_SIZE);
    }

    #[test]
    fn test_clocks_needed() {
        let mut blip = blip();
        assert_eq!(blip.clocks_needed(0).unwrap(), 0);
        assert_eq!(blip.clocks_needed(2).unwrap(), 2 * OVERSAMPLE);

        blip.end_frame(1).unwrap();
        assert_eq!(blip.clocks_needed(0).unwrap(), 0);
        assert_eq!(blip.clocks_needed(2).unwrap(), 2 * OVERSAMPLE - 1);
    }

    #[test]
    fn test_clocks_needed_limits() {
        let mut blip = blip();
        blip.end_frame(OVERSAMPLE * 2 - 1).unwrap();
        assert_eq!(
            blip.clocks_needed(BLIP_SIZE - 1).unwrap(),
            (BLIP_SIZE as u32 - 2) * OVERSAMPLE + 1
        );

        blip.end_frame(1).unwrap();
        assert!(matches!(
            blip.clocks_needed(BLIP_SIZE - 1),
            Err(BlipError::BufferFull { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut blip = blip();
        blip.end_frame(2 * OVERSAMPLE - 1).unwrap();
        blip.clear();
        assert_eq!(blip.samples_available(), 0);
        assert_eq!(blip.clocks_needed(1).unwrap(), OVERSAMPLE);
    }

    #[test]
    fn test_read_samples() {
        let mut blip = blip();
        let mut buf = [-1.0f32; 2];

        blip.end_frame(3 * OVERSAMPLE + OVERSAMPLE - 1).unwrap();
        assert_eq!(blip.read_samples(&mut buf, 0, 2, false), 2);
        assert_eq!(buf, [0.0, 0.0]);

        assert_eq!(blip.samples_available(), 1);
        assert_eq!(blip.clocks_needed(1).unwrap(), 1);
    }

    #[test]
    fn test_read_samples_stereo() {
        let mut blip = blip();
        let mut buf = [-1.0f32; 3];

        blip.end_frame(2 * OVERSAMPLE).unwrap();
        assert_eq!(blip.read_samples(&mut buf, 0, 2, true), 2);
        assert_eq!(buf, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_read_samples_limited_to_available() {
        let mut blip = blip();
        let mut buf = [-1.0f32; 3];

        blip.end_frame(OVERSAMPLE * 2).unwrap();
        assert_eq!(blip.read_samples(&mut buf, 0, 3, false), 2);
        assert_eq!(blip.samples_available(), 0);
        assert_eq!(buf, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_read_samples_limited_to_output_room() {
        let mut blip = blip();
        blip.end_frame(OVERSAMPLE * 4).unwrap();

        assert_eq!(blip.read_samples(&mut [], 0, 1, false), 0);

        let mut buf = [0.0f32; 4];
        assert_eq!(blip.read_samples(&mut buf, 3, 4, false), 1);
        assert_eq!(blip.samples_available(), 3);
    }

    #[test]
    fn test_set_rates() {
        let mut blip = blip();

        blip.set_rates(2, 2).unwrap();
        assert_eq!(blip.clocks_needed(10).unwrap(), 10);

        blip.set_rates(2, 4).unwrap();
        assert_eq!(blip.clocks_needed(10).unwrap(), 5);

        blip.set_rates(4, 2).unwrap();
        assert_eq!(blip.clocks_needed(10).unwrap(), 20);
    }

    #[test]
    fn test_set_rates_rejects_invalid() {
        let mut blip = blip();
        assert!(matches!(
            blip.set_rates(0, 44_100),
            Err(BlipError::InvalidRate { .. })
        ));
        assert!(matches!(
            blip.set_rates(1_789_773, 0),
            Err(BlipError::InvalidRate { .. })
        ));
        assert_eq!(blip.set_rates(1, 8192), Err(BlipError::RatioTooLarge));
    }

    #[test]
    fn test_set_rates_rounds_sample_rate_up() {
        let mut blip = blip();
        for r in 1..10_000 {
            blip.set_rates(r, 1).unwrap();
            assert!(blip.clocks_needed(1).unwrap() <= r);
        }
    }

    #[test]
    fn test_set_rates_accuracy() {
        let mut blip = blip();
        let max_error = 100;

        for r in (BLIP_SIZE as u32 / 2)..BLIP_SIZE as u32 {
            let mut c = r / 2;
            while c < 8_000_000 {
                blip.set_rates(c, r).unwrap();
                let error = (blip.clocks_needed(r as usize).unwrap() as i64 - c as i64).abs();
                assert!(error < (c / max_error) as i64 + 1, "c={} r={}", c, r);
                c += c / 32;
            }
        }
    }

    #[test]
    fn test_set_rates_long_term_accuracy() {
        let mut blip = blip();
        let clock_rate = 1_789_773u32;
        let sample_rate = 44_100u32;
        let secs = 100u64;

        blip.set_rates(clock_rate, sample_rate).unwrap();

        let buf_size = BLIP_SIZE / 2;
        let clock_size = blip.clocks_needed(buf_size).unwrap() - 1;
        let mut buf = vec![0.0f32; buf_size];
        let mut total = 0u64;
        let mut remain = clock_rate as u64 * secs;

        while remain > 0 {
            let n = remain.min(clock_size as u64) as u32;
            blip.end_frame(n).unwrap();
            total += blip.read_samples(&mut buf, 0, buf_size, false) as u64;
            remain -= n as u64;
        }

        assert_eq!(total, sample_rate as u64 * secs);
    }

    #[test]
    fn test_add_delta_limits() {
        let mut blip = blip();
        blip.add_delta(0, 1).unwrap();
        blip.add_delta((BLIP_SIZE as u32 + 3) * OVERSAMPLE - 1, 1)
            .unwrap();
        assert_eq!(
            blip.add_delta((BLIP_SIZE as u32 + 3) * OVERSAMPLE, 1),
            Err(BlipError::BufferOverflow)
        );
    }

    #[test]
    fn test_add_delta_fast_limits() {
        let mut blip = blip();
        blip.add_delta_fast(0, 1).unwrap();
        blip.add_delta_fast((BLIP_SIZE as u32 + 3) * OVERSAMPLE - 1, 1)
            .unwrap();
        assert_eq!(
            blip.add_delta_fast((BLIP_SIZE as u32 + 3) * OVERSAMPLE, 1),
            Err(BlipError::BufferOverflow)
        );
    }

    #[test]
    fn test_saturation() {
        for (delta, expected) in [(35_000, 1.0f32), (-35_000, -1.0f32)] {
            let mut blip = BlipBuf::new(32).unwrap();
            let mut buf = [0.0f32; 32];

            blip.add_delta_fast(0, delta).unwrap();
            blip.end_frame(OVERSAMPLE * 32).unwrap();
            blip.read_samples(&mut buf, 0, 32, false);

            assert!((buf[20] - expected).abs() < 0.001, "got {}", buf[20]);
        }
    }

    #[test]
    fn test_step_settles_and_decays() {
        let mut blip = BlipBuf::new(64).unwrap();
        let mut buf = [0.0f32; 64];

        blip.add_delta(0, 16_384).unwrap();
        blip.end_frame(OVERSAMPLE * 64).unwrap();
        assert_eq!(blip.read_samples(&mut buf, 0, 64, false), 64);

        // Rises to roughly half scale, then the high-pass integrator slowly pulls it back
        let peak = buf.iter().cloned().fold(f32::MIN, f32::max);
        assert!(peak > 0.45 && peak < 0.55, "peak {}", peak);
        assert!(buf[63] < peak);
        assert!(buf[63] > 0.0);
    }

    #[test]
    fn test_oversized_deltas_wrap() {
        let mut blip = BlipBuf::new(64).unwrap();
        let mut buf = [0.0f32; 64];

        blip.add_delta(OVERSAMPLE / 3, 1_000_000).unwrap();
        blip.add_delta(OVERSAMPLE * 8 + OVERSAMPLE / 2, -1_000_000).unwrap();
        blip.end_frame(OVERSAMPLE * 64).unwrap();

        assert_eq!(blip.read_samples(&mut buf, 0, 64, false), 64);
        assert!(buf.iter().all(|s| (-1.0..1.0).contains(s)));
    }

    const FRAME_LEN: u32 = 20 * OVERSAMPLE + OVERSAMPLE / 4;

    fn add_deltas(blip: &mut BlipBuf, offset: u32) {
        blip.add_delta(FRAME_LEN / 2 + offset, 1000).unwrap();
        blip.add_delta(FRAME_LEN + offset + 2 * OVERSAMPLE, 1000)
            .unwrap();
    }

    #[test]
    fn test_end_frame_invariance() {
        let size = (FRAME_LEN as u64 * 2 / OVERSAMPLE as u64) as usize;
        let mut one = vec![1.0f32; size];
        let mut two = vec![-1.0f32; size];

        let mut blip = BlipBuf::new(size).unwrap();
        add_deltas(&mut blip, 0);
        add_deltas(&mut blip, FRAME_LEN);
        blip.end_frame(FRAME_LEN * 2).unwrap();
        assert_eq!(blip.read_samples(&mut one, 0, size, false), size);

        let mut blip = BlipBuf::new(size).unwrap();
        add_deltas(&mut blip, 0);
        blip.end_frame(FRAME_LEN).unwrap();
        add_deltas(&mut blip, 0);
        blip.end_frame(FRAME_LEN).unwrap();
        assert_eq!(blip.read_samples(&mut two, 0, size, false), size);

        assert_eq!(one, two);
    }

    #[test]
    fn test_read_samples_invariance() {
        let size = (FRAME_LEN as u64 * 3 / OVERSAMPLE as u64) as usize;
        let mut one = vec![1.0f32; size];
        let mut two = vec![-1.0f32; size];

        let mut blip = BlipBuf::new(size).unwrap();
        add_deltas(&mut blip, 0);
        add_deltas(&mut blip, FRAME_LEN);
        add_deltas(&mut blip, 2 * FRAME_LEN);
        blip.end_frame(3 * FRAME_LEN).unwrap();
        assert_eq!(blip.read_samples(&mut one, 0, size, false), size);

        let mut blip = BlipBuf::new(size).unwrap();
        let mut count = 0;
        for _ in 0..3 {
            add_deltas(&mut blip, 0);
            blip.end_frame(FRAME_LEN).unwrap();
            count += blip.read_samples(&mut two, count, size - count, false);
        }
        assert_eq!(count, size);

        assert_eq!(one, two);
    }
}
