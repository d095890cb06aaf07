// Audio module - Band-limited synthesis of the APU output
//
// The APU never produces samples directly. Its channels emit level changes
// into the `Mixer`, which applies the non-linear NES mixing curve and hands
// the composite changes to a `BlipBuf` for band-limited resampling to the
// host output rate.
//
// # Usage
//
// ```
// use nes_core::audio::{AudioChannel, Mixer, MixerSettings};
// use nes_core::Region;
//
// let mut mixer = Mixer::new(Region::Ntsc, MixerSettings::default()).unwrap();
// mixer.add_delta(AudioChannel::Pulse1, 120, 15);
// mixer.play_audio_buffer(9_999).unwrap();
//
// let samples = mixer.take_samples();
// assert!(!samples.is_empty());
// ```

pub mod blip_buf;
pub mod mixer;

pub use blip_buf::{BlipBuf, BlipError};
pub use mixer::{AudioChannel, Mixer, MixerSettings};
