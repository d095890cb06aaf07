// Audio mixer - Combines APU channel deltas into one band-limited stream
//
// Channels report level *changes* stamped with the CPU cycle (relative to the
// start of the current audio frame) on which they happened. At the end of the
// frame the mixer walks every distinct timestamp in order, rebuilds each
// channel's level, applies the NES non-linear mixing formula and forwards the
// change of the composite level to the blip buffer.

use super::blip_buf::{BlipBuf, BlipError};
use crate::region::Region;
use log::warn;

/// Default output sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 96_000;

/// Default audio frame length in CPU cycles
pub const DEFAULT_CYCLE_LENGTH: u32 = 10_000;

/// Default capacity of the mixer's output buffer in samples
pub const DEFAULT_BUFFER_SAMPLES: usize = 2_048;

/// APU channel identifiers, used to index delta slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioChannel {
    Pulse1 = 0,
    Pulse2 = 1,
    Triangle = 2,
    Noise = 3,
    Dmc = 4,
}

const CHANNEL_COUNT: usize = 5;

/// Mixer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerSettings {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Length of one audio frame in CPU cycles
    pub cycle_length: u32,
    /// Capacity of the output sample buffer
    pub buffer_samples: usize,
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            buffer_samples: DEFAULT_BUFFER_SAMPLES,
        }
    }
}

/// APU mixer feeding a band-limited resampler
///
/// The non-linear formula, in integer units:
///
/// ```text
/// pulse = 477600 / (8128 / (pulse1 + pulse2) + 100)
/// tnd   = 818350 / (24329 / (3 * triangle + 2 * noise + dmc) + 100)
/// ```
///
/// Each group saturates on its own before the two are summed.
#[derive(Debug, Clone)]
pub struct Mixer {
    region: Region,
    settings: MixerSettings,
    /// Per-cycle delta slots for the current frame
    deltas: Vec<[i16; CHANNEL_COUNT]>,
    /// Cycles that received at least one delta (unsorted, may repeat)
    timestamps: Vec<u32>,
    /// Channel levels rebuilt while replaying a frame
    levels: [i16; CHANNEL_COUNT],
    previous_output: i32,
    blip: BlipBuf,
    output: Vec<f32>,
    sample_count: usize,
}

impl Mixer {
    /// Create a mixer for the given region
    pub fn new(region: Region, settings: MixerSettings) -> Result<Self, BlipError> {
        let mut blip = BlipBuf::new(settings.buffer_samples)?;
        blip.set_rates(region.cpu_clock_rate(), settings.sample_rate)?;

        Ok(Self {
            region,
            settings,
            deltas: vec![[0; CHANNEL_COUNT]; settings.cycle_length as usize],
            timestamps: Vec::with_capacity(1024),
            levels: [0; CHANNEL_COUNT],
            previous_output: 0,
            blip,
            output: vec![0.0; settings.buffer_samples],
            sample_count: 0,
        })
    }

    /// Audio frame length in CPU cycles
    #[inline]
    pub fn cycle_length(&self) -> u32 {
        self.settings.cycle_length
    }

    /// Output sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.settings.sample_rate
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Switch region and retune the resampler to the new CPU clock
    pub fn set_region(&mut self, region: Region) -> Result<(), BlipError> {
        self.region = region;
        self.blip
            .set_rates(region.cpu_clock_rate(), self.settings.sample_rate)
    }

    /// Record a level change of `delta` on `channel` at `cycle`
    ///
    /// `cycle` must lie inside the current audio frame (below
    /// [`cycle_length`](Self::cycle_length)). Debug builds panic on a later
    /// cycle; release builds log the delta and drop it.
    pub fn add_delta(&mut self, channel: AudioChannel, cycle: u32, delta: i16) {
        if delta == 0 {
            return;
        }
        debug_assert!(
            cycle < self.settings.cycle_length,
            "delta at cycle {} past the {}-cycle audio frame",
            cycle,
            self.settings.cycle_length
        );
        let Some(slot) = self.deltas.get_mut(cycle as usize) else {
            warn!(
                "Dropped {:?} delta at cycle {} past the {}-cycle audio frame",
                channel, cycle, self.settings.cycle_length
            );
            return;
        };
        slot[channel as usize] = slot[channel as usize].wrapping_add(delta);
        self.timestamps.push(cycle);
    }

    /// Current composite level computed from the rebuilt channel levels
    pub fn output_volume(&self) -> i16 {
        let level = |channel: AudioChannel| self.levels[channel as usize] as f64;

        let pulse = level(AudioChannel::Pulse1) + level(AudioChannel::Pulse2);
        let tnd = 3.0 * level(AudioChannel::Triangle)
            + 2.0 * level(AudioChannel::Noise)
            + level(AudioChannel::Dmc);

        let pulse_volume = group_volume(477_600.0, 8_128.0, pulse);
        let tnd_volume = group_volume(818_350.0, 24_329.0, tnd);

        (pulse_volume + tnd_volume) as i16
    }

    /// Replay the frame's deltas into the resampler and close the frame at `time`
    pub fn end_frame(&mut self, time: u32) -> Result<(), BlipError> {
        self.timestamps.sort_unstable();
        self.timestamps.dedup();

        for &stamp in &self.timestamps {
            let slot = &mut self.deltas[stamp as usize];
            for (level, delta) in self.levels.iter_mut().zip(slot.iter_mut()) {
                *level = level.wrapping_add(*delta);
                *delta = 0;
            }

            let output = self.output_volume() as i32 * 4;
            self.blip.add_delta(stamp, output - self.previous_output)?;
            self.previous_output = output;
        }
        self.timestamps.clear();

        self.blip.end_frame(time)
    }

    /// Close the frame at `time` and move the produced samples to the output buffer
    pub fn play_audio_buffer(&mut self, time: u32) -> Result<(), BlipError> {
        self.end_frame(time)?;
        let start = self.sample_count;
        let room = self.output.len() - start;
        let read = self.blip.read_samples(&mut self.output, start, room, false);
        self.sample_count += read;
        Ok(())
    }

    /// Samples produced since the last drain
    pub fn samples(&self) -> &[f32] {
        &self.output[..self.sample_count]
    }

    /// Take the produced samples, emptying the output buffer
    pub fn take_samples(&mut self) -> Vec<f32> {
        let samples = self.output[..self.sample_count].to_vec();
        self.sample_count = 0;
        samples
    }

    /// Samples still waiting in the resampler because the output buffer was full
    pub fn pending_samples(&self) -> usize {
        self.blip.samples_available()
    }

    /// Return to the silent power-on state
    pub fn reset(&mut self) -> Result<(), BlipError> {
        self.sample_count = 0;
        self.previous_output = 0;
        self.blip.clear();
        self.timestamps.clear();
        self.levels = [0; CHANNEL_COUNT];
        self.deltas.iter_mut().for_each(|slot| *slot = [0; CHANNEL_COUNT]);
        self.blip
            .set_rates(self.region.cpu_clock_rate(), self.settings.sample_rate)
    }
}

/// One group of the non-linear mixer; an empty group is silent
#[inline]
fn group_volume(scale: f64, divisor: f64, sum: f64) -> i32 {
    if sum == 0.0 {
        0
    } else {
        (scale / (divisor / sum + 100.0)).trunc() as i32
    }
}
