// APU module - Audio Processing Unit implementation
//
// The APU is stepped once per CPU cycle with `process`. Channels are not
// clocked one cycle at a time; instead each channel's timer catches up to the
// current cycle and reports level changes to the mixer stamped with the exact
// cycle they occurred on. Every register access first brings all channels up
// to date so its effect lands on the right cycle.
//
// # Register Map
//
// ```text
// $4000-$4003: Pulse 1       $4004-$4007: Pulse 2
// $4008-$400B: Triangle      $400C-$400F: Noise
// $4010-$4013: DMC           $4015: Status / channel enable
// $4017: Frame counter
// ```

pub mod channels;
pub mod components;
pub mod constants;

#[cfg(test)]
mod tests;

use crate::audio::{AudioChannel, BlipError, Mixer, MixerSettings};
use crate::bus::MemoryMappedDevice;
use crate::region::Region;
use channels::{DmcChannel, NoiseChannel, PulseChannel, TriangleChannel};
use components::{FrameCounter, FrameEvent};

/// APU structure representing the Audio Processing Unit state
#[derive(Debug, Clone)]
pub struct Apu {
    region: Region,

    pub(crate) pulse1: PulseChannel,
    pub(crate) pulse2: PulseChannel,
    pub(crate) triangle: TriangleChannel,
    pub(crate) noise: NoiseChannel,
    pub(crate) dmc: DmcChannel,
    pub(crate) frame_counter: FrameCounter,

    /// Mixer and resampler fed by the channels
    mixer: Mixer,

    /// CPU cycles elapsed in the current audio frame
    current_cycle: u32,
    /// Cycle the channels have been brought up to
    previous_cycle: u32,
}

impl Apu {
    /// Create an APU in its power-on state
    ///
    /// # Errors
    ///
    /// Fails if `settings` describe a resampler that cannot be built
    /// (zero buffer or zero sample rate).
    pub fn new(region: Region, settings: MixerSettings) -> Result<Self, BlipError> {
        Ok(Self {
            region,
            pulse1: PulseChannel::new(AudioChannel::Pulse1),
            pulse2: PulseChannel::new(AudioChannel::Pulse2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(region),
            dmc: DmcChannel::new(region),
            frame_counter: FrameCounter::new(region),
            mixer: Mixer::new(region, settings)?,
            current_cycle: 0,
            previous_cycle: 0,
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    // ========================================
    // Stepping
    // ========================================

    /// Advance the APU by one CPU cycle
    ///
    /// Closes the audio frame automatically when the mixer's frame length is
    /// reached. The samples of each closed frame must be drained with
    /// [`take_samples`](Self::take_samples) before the output buffer and
    /// resampler fill up; after that this returns [`BlipError::BufferOverflow`].
    pub fn process(&mut self) -> Result<(), BlipError> {
        self.current_cycle += 1;

        if self.current_cycle >= self.mixer.cycle_length().saturating_sub(1) {
            self.end_frame()
        } else {
            self.dmc.tick_start_delay();
            self.run();
            Ok(())
        }
    }

    /// Flush all channels and turn the elapsed cycles into output samples
    pub fn end_frame(&mut self) -> Result<(), BlipError> {
        self.run();

        self.pulse1.end_frame();
        self.pulse2.end_frame();
        self.triangle.end_frame();
        self.noise.end_frame();
        self.dmc.end_frame();

        self.mixer.play_audio_buffer(self.current_cycle)?;
        self.current_cycle = 0;
        self.previous_cycle = 0;
        Ok(())
    }

    /// Bring every channel up to the current cycle
    fn run(&mut self) {
        let mut cycles_to_run = self.current_cycle - self.previous_cycle;

        while cycles_to_run > 0 {
            let step = self.frame_counter.run(&mut cycles_to_run);
            self.previous_cycle += step.cycles;

            if let Some(event) = step.event {
                self.frame_counter_tick(event);
            }

            self.pulse1.reload_length_counter();
            self.pulse2.reload_length_counter();
            self.noise.reload_length_counter();
            self.triangle.reload_length_counter();

            let cycle = self.previous_cycle;
            self.pulse1.run(cycle, &mut self.mixer);
            self.pulse2.run(cycle, &mut self.mixer);
            self.noise.run(cycle, &mut self.mixer);
            self.triangle.run(cycle, &mut self.mixer);
            self.dmc.run(cycle, &mut self.mixer);
        }
    }

    /// Deliver a frame counter clock to the channels
    fn frame_counter_tick(&mut self, event: FrameEvent) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.triangle.clock_linear_counter();
        self.noise.clock_envelope();

        if event == FrameEvent::HalfFrame {
            self.pulse1.clock_length_counter();
            self.pulse2.clock_length_counter();
            self.triangle.clock_length_counter();
            self.noise.clock_length_counter();

            self.pulse1.clock_sweep();
            self.pulse2.clock_sweep();
        }
    }

    // ========================================
    // Interrupts and DMC transfers
    // ========================================

    /// Frame counter interrupt flag
    pub fn frame_irq(&self) -> bool {
        self.frame_counter.irq_pending()
    }

    /// DMC end-of-sample interrupt flag
    pub fn dmc_irq(&self) -> bool {
        self.dmc.irq
    }

    /// Whether the APU is asserting the CPU IRQ line
    pub fn irq_pending(&self) -> bool {
        self.frame_irq() || self.dmc_irq()
    }

    /// Take the DMC's pending sample fetch, returning the address to read
    pub fn take_dmc_request(&mut self) -> Option<u16> {
        self.dmc.take_transfer_request()
    }

    /// Deliver the byte fetched for a DMC request
    pub fn set_dmc_read_buffer(&mut self, value: u8) {
        self.dmc.set_read_buffer(value);
    }

    // ========================================
    // Output and configuration
    // ========================================

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    /// Samples produced since the last call
    pub fn take_samples(&mut self) -> Vec<f32> {
        self.mixer.take_samples()
    }

    /// Switch every region-dependent table and the resampler clock
    pub fn set_region(&mut self, region: Region) -> Result<(), BlipError> {
        self.region = region;
        self.mixer.set_region(region)?;
        self.dmc.set_region(region);
        self.noise.set_region(region);
        self.run();
        self.frame_counter.set_region(region);
        Ok(())
    }

    /// Return to the power-on state
    pub fn reset(&mut self) -> Result<(), BlipError> {
        self.current_cycle = 0;
        self.previous_cycle = 0;
        self.pulse1.reset();
        self.pulse2.reset();
        self.triangle.reset();
        self.noise.reset();
        self.dmc.reset();
        self.frame_counter.reset();
        self.mixer.reset()
    }

    fn read_status(&mut self) -> u8 {
        let mut status = 0;
        if self.pulse1.is_active() {
            status |= 0x01;
        }
        if self.pulse2.is_active() {
            status |= 0x02;
        }
        if self.triangle.is_active() {
            status |= 0x04;
        }
        if self.noise.is_active() {
            status |= 0x08;
        }
        if self.dmc.is_active() {
            status |= 0x10;
        }
        if self.frame_counter.irq_pending() {
            status |= 0x40;
        }
        if self.dmc.irq {
            status |= 0x80;
        }

        // Reading the status acknowledges the frame interrupt
        self.frame_counter.clear_irq();
        status
    }
}

impl MemoryMappedDevice for Apu {
    /// Read $4015; other addresses are not readable on the APU
    fn read(&mut self, addr: u16) -> u8 {
        self.run();
        match addr {
            0x4015 => self.read_status(),
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.run();

        match addr {
            0x4000 => self.pulse1.write_register_0(data, &mut self.mixer),
            0x4001 => self.pulse1.write_register_1(data, &mut self.mixer),
            0x4002 => self.pulse1.write_register_2(data, &mut self.mixer),
            0x4003 => self.pulse1.write_register_3(data, &mut self.mixer),
            0x4004 => self.pulse2.write_register_0(data, &mut self.mixer),
            0x4005 => self.pulse2.write_register_1(data, &mut self.mixer),
            0x4006 => self.pulse2.write_register_2(data, &mut self.mixer),
            0x4007 => self.pulse2.write_register_3(data, &mut self.mixer),
            0x4008 => self.triangle.write_register_0(data),
            0x400A => self.triangle.write_register_2(data),
            0x400B => self.triangle.write_register_3(data),
            0x400C => self.noise.write_register_0(data),
            0x400E => self.noise.write_register_2(data),
            0x400F => self.noise.write_register_3(data),
            0x4010 => self.dmc.write_register_0(data),
            0x4011 => self.dmc.write_register_1(data, &mut self.mixer),
            0x4012 => self.dmc.write_register_2(data),
            0x4013 => self.dmc.write_register_3(data),
            0x4015 => {
                self.dmc.irq = false;
                self.pulse1.set_enabled(data & 0x01 != 0);
                self.pulse2.set_enabled(data & 0x02 != 0);
                self.triangle.set_enabled(data & 0x04 != 0);
                self.noise.set_enabled(data & 0x08 != 0);
                self.dmc.set_enabled(data & 0x10 != 0);
            }
            0x4017 => self.frame_counter.write_control(data),
            _ => {}
        }
    }
}
