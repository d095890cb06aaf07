//! APU tests driven through the register interface

mod dmc_tests;
mod frame_counter_tests;

use crate::apu::Apu;
use crate::audio::MixerSettings;
use crate::region::Region;

pub(crate) fn apu() -> Apu {
    Apu::new(Region::Ntsc, MixerSettings::default()).unwrap()
}

/// Run `cycles` CPU cycles, keeping only the samples of the latest audio frame
pub(crate) fn process(apu: &mut Apu, cycles: u32) {
    for _ in 0..cycles {
        if apu.current_cycle == 0 {
            apu.take_samples();
        }
        apu.process().unwrap();
    }
}
