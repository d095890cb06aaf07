//! DMC (Delta Modulation Channel) implementation for sample playback

use crate::apu::components::Timer;
use crate::apu::constants::dmc_period_table;
use crate::audio::{AudioChannel, Mixer};
use crate::region::Region;

/// DMC channel for sample playback
///
/// Sample bytes are not read by the channel itself. When its one-byte buffer
/// runs empty it raises a transfer request; the CPU-side driver performs the
/// read (stalling the CPU) and hands the byte back with
/// [`set_read_buffer`](Self::set_read_buffer).
#[derive(Debug, Clone)]
pub struct DmcChannel {
    /// Output rate timer
    pub(crate) timer: Timer,

    /// IRQ enable flag ($4010 bit 7)
    pub(crate) irq_enabled: bool,

    /// Loop flag ($4010 bit 6)
    pub(crate) loop_flag: bool,

    /// IRQ pending flag
    pub(crate) irq: bool,

    /// Sample start address ($C000 + value * 64)
    pub(crate) sample_address: u16,

    /// Sample length in bytes (value * 16 + 1)
    pub(crate) sample_length: u16,

    /// Next byte to fetch
    pub(crate) current_address: u16,

    /// Bytes left to fetch in the current sample
    pub(crate) bytes_remaining: u16,

    /// One-byte read-ahead buffer
    pub(crate) read_buffer: u8,
    pub(crate) buffer_empty: bool,

    /// Output shift register and its bit counter
    pub(crate) shift_register: u8,
    pub(crate) bits_remaining: u8,

    /// Output level (7-bit counter, 0-127)
    pub(crate) output_level: u8,

    /// Silence flag, set when a shift cycle starts with an empty buffer
    pub(crate) silence_flag: bool,

    /// Cycles left before a sample started from $4015 requests its first byte
    start_delay: u8,

    /// Set when the buffer needs a byte from memory
    transfer_requested: bool,

    period_table: &'static [u16; 16],
}

impl DmcChannel {
    pub fn new(region: Region) -> Self {
        let mut dmc = Self {
            timer: Timer::new(AudioChannel::Dmc),
            irq_enabled: false,
            loop_flag: false,
            irq: false,
            sample_address: 0xC000,
            sample_length: 1,
            current_address: 0,
            bytes_remaining: 0,
            read_buffer: 0,
            buffer_empty: true,
            shift_register: 0,
            bits_remaining: 8,
            output_level: 0,
            silence_flag: true,
            start_delay: 0,
            transfer_requested: false,
            period_table: dmc_period_table(region),
        };
        dmc.reset();
        dmc
    }

    pub fn set_region(&mut self, region: Region) {
        self.period_table = dmc_period_table(region);
    }

    /// Write to register 0 ($4010 - IRQ enable, loop, and rate)
    pub fn write_register_0(&mut self, data: u8) {
        self.irq_enabled = (data & 0x80) != 0;
        self.loop_flag = (data & 0x40) != 0;
        self.timer.period = self.period_table[(data & 0x0F) as usize] - 1;

        if !self.irq_enabled {
            self.irq = false;
        }
    }

    /// Write to register 1 ($4011 - direct load)
    pub fn write_register_1(&mut self, data: u8, mixer: &mut Mixer) {
        self.output_level = data & 0x7F;
        self.timer.add_output(mixer, self.output_level as i16);
    }

    /// Write to register 2 ($4012 - sample address)
    pub fn write_register_2(&mut self, data: u8) {
        self.sample_address = 0xC000 | ((data as u16) << 6);
    }

    /// Write to register 3 ($4013 - sample length)
    pub fn write_register_3(&mut self, data: u8) {
        self.sample_length = ((data as u16) << 4) | 0x0001;
    }

    /// Set the enabled flag (from $4015)
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.bytes_remaining = 0;
        } else if self.bytes_remaining == 0 {
            self.init_sample();
            self.start_delay = 2;
        }
    }

    fn init_sample(&mut self) {
        self.current_address = self.sample_address;
        self.bytes_remaining = self.sample_length;
    }

    fn start_transfer(&mut self) {
        if self.buffer_empty && self.bytes_remaining > 0 {
            self.transfer_requested = true;
        }
    }

    /// Count down the start delay of a sample enabled through $4015
    pub fn tick_start_delay(&mut self) {
        if self.start_delay > 0 {
            self.start_delay -= 1;
            if self.start_delay == 0 {
                self.start_transfer();
            }
        }
    }

    /// Take a pending transfer request, returning the address to read
    pub fn take_transfer_request(&mut self) -> Option<u16> {
        if self.transfer_requested {
            self.transfer_requested = false;
            Some(self.current_address)
        } else {
            None
        }
    }

    /// Fill the read buffer with the byte fetched for a transfer request
    pub fn set_read_buffer(&mut self, value: u8) {
        if self.bytes_remaining == 0 {
            return;
        }

        self.read_buffer = value;
        self.buffer_empty = false;
        self.current_address = match self.current_address.wrapping_add(1) {
            0 => 0x8000,
            address => address,
        };
        self.bytes_remaining -= 1;

        if self.bytes_remaining == 0 {
            if self.loop_flag {
                self.init_sample();
            } else if self.irq_enabled {
                self.irq = true;
            }
        }
    }

    /// Status bit for $4015: sample bytes remain
    pub fn is_active(&self) -> bool {
        self.bytes_remaining > 0
    }

    /// Run the channel up to `cycle`
    pub fn run(&mut self, cycle: u32, mixer: &mut Mixer) {
        while self.timer.run(cycle) {
            if !self.silence_flag {
                if self.shift_register & 0x01 != 0 {
                    if self.output_level <= 125 {
                        self.output_level += 2;
                    }
                } else if self.output_level >= 2 {
                    self.output_level -= 2;
                }
                self.shift_register >>= 1;
            }

            self.bits_remaining -= 1;
            if self.bits_remaining == 0 {
                self.bits_remaining = 8;
                if self.buffer_empty {
                    self.silence_flag = true;
                } else {
                    self.silence_flag = false;
                    self.shift_register = self.read_buffer;
                    self.buffer_empty = true;
                    self.start_transfer();
                }
            }

            self.timer.add_output(mixer, self.output_level as i16);
        }
    }

    pub fn end_frame(&mut self) {
        self.timer.end_frame();
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.sample_address = 0xC000;
        self.sample_length = 1;
        self.output_level = 0;
        self.irq_enabled = false;
        self.irq = false;
        self.loop_flag = false;
        self.current_address = 0;
        self.bytes_remaining = 0;
        self.read_buffer = 0;
        self.buffer_empty = true;
        self.shift_register = 0;
        self.bits_remaining = 8;
        self.silence_flag = true;
        self.start_delay = 0;
        self.transfer_requested = false;
        self.timer.period = self.period_table[0] - 1;
        self.timer.counter = self.timer.period;
    }
}
