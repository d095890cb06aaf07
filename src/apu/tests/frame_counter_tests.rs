//! Frame counter integration tests

use super::{apu, process};
use crate::bus::MemoryMappedDevice;
use crate::region::Region;

#[test]
fn test_frame_irq_in_4_step_mode() {
    let mut apu = apu();

    process(&mut apu, 29_830);
    assert!(!apu.frame_irq());
    process(&mut apu, 1);
    assert!(apu.frame_irq());
    assert!(apu.irq_pending());
}

#[test]
fn test_status_read_acknowledges_frame_irq() {
    let mut apu = apu();
    process(&mut apu, 29_831);

    assert_eq!(apu.read(0x4015) & 0x40, 0x40);
    assert!(!apu.frame_irq());
    assert_eq!(apu.read(0x4015) & 0x40, 0);
}

#[test]
fn test_irq_inhibit() {
    let mut apu = apu();
    apu.write(0x4017, 0x40);
    process(&mut apu, 60_000);
    assert!(!apu.frame_irq());
}

#[test]
fn test_5_step_mode_never_raises_irq() {
    let mut apu = apu();
    apu.write(0x4017, 0x80);
    process(&mut apu, 80_000);
    assert!(!apu.frame_irq());
}

#[test]
fn test_quarter_frame_clocks_envelope_only() {
    let mut apu = apu();
    apu.write(0x4015, 0x01);
    apu.write(0x4000, 0x0F); // decay mode, period 15, no halt
    apu.write(0x4003, 0x18); // length 2, restart envelope

    process(&mut apu, 7_459);
    assert!(apu.pulse1.envelope.start);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 2);

    process(&mut apu, 1);
    assert!(!apu.pulse1.envelope.start);
    assert_eq!(apu.pulse1.envelope.counter, 15);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 2);
}

#[test]
fn test_half_frames_clock_length_counter() {
    let mut apu = apu();
    apu.write(0x4015, 0x01);
    apu.write(0x4000, 0x10);
    apu.write(0x4003, 0x18); // length 2

    process(&mut apu, 14_915);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 2);
    process(&mut apu, 1);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 1);

    process(&mut apu, 29_832 - 14_916);
    assert_eq!(apu.read(0x4015) & 0x01, 0);
}

#[test]
fn test_halt_flag_freezes_length() {
    let mut apu = apu();
    apu.write(0x4015, 0x01);
    apu.write(0x4000, 0x30);
    apu.write(0x4003, 0x18);

    process(&mut apu, 40_000);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 2);
}

#[test]
fn test_5_step_write_clocks_half_frame() {
    let mut apu = apu();
    apu.write(0x4015, 0x01);
    apu.write(0x4000, 0x10);
    apu.write(0x4003, 0x18);
    process(&mut apu, 100);

    apu.write(0x4017, 0x80);
    process(&mut apu, 2);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 2);
    process(&mut apu, 1);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 1);
}

#[test]
fn test_pal_step_timing() {
    let mut apu = apu();
    apu.set_region(Region::Pal).unwrap();
    apu.write(0x4015, 0x01);
    apu.write(0x4000, 0x10);
    apu.write(0x4003, 0x18);

    // PAL half frame lands on step cycle 16627
    process(&mut apu, 16_629);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 2);
    process(&mut apu, 1);
    assert_eq!(apu.pulse1.envelope.length_counter.counter, 1);
}
