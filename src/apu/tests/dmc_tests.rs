//! DMC channel tests

use super::{apu, process};
use crate::bus::MemoryMappedDevice;

#[test]
fn test_dmc_register_writes() {
    let mut apu = apu();
    apu.write(0x4010, 0xCF);
    assert!(apu.dmc.irq_enabled);
    assert!(apu.dmc.loop_flag);
    assert_eq!(apu.dmc.timer.period, 53);

    apu.write(0x4012, 0xFF);
    assert_eq!(apu.dmc.sample_address, 0xFFC0);
    apu.write(0x4013, 0xFF);
    assert_eq!(apu.dmc.sample_length, 0x0FF1);
}

#[test]
fn test_direct_load() {
    let mut apu = apu();
    apu.write(0x4011, 0xC0);
    assert_eq!(apu.dmc.output_level, 0x40);
    assert_eq!(apu.dmc.timer.last_output, 0x40);
}

#[test]
fn test_enable_requests_first_byte_after_delay() {
    let mut apu = apu();
    apu.write(0x4012, 0x01);
    apu.write(0x4013, 0x01);
    apu.write(0x4015, 0x10);
    assert_eq!(apu.read(0x4015) & 0x10, 0x10);

    process(&mut apu, 1);
    assert_eq!(apu.take_dmc_request(), None);
    process(&mut apu, 1);
    assert_eq!(apu.take_dmc_request(), Some(0xC040));
    assert_eq!(apu.take_dmc_request(), None);
}

#[test]
fn test_sample_end_raises_irq() {
    let mut apu = apu();
    apu.write(0x4010, 0x8F);
    apu.write(0x4015, 0x10);
    process(&mut apu, 2);

    assert_eq!(apu.take_dmc_request(), Some(0xC000));
    apu.set_dmc_read_buffer(0x55);

    assert!(apu.dmc_irq());
    assert!(apu.irq_pending());
    assert_eq!(apu.read(0x4015) & 0x90, 0x80);

    // Unlike the frame IRQ, reading $4015 leaves the DMC IRQ alone
    assert!(apu.dmc_irq());
    apu.write(0x4015, 0x00);
    assert!(!apu.dmc_irq());
}

#[test]
fn test_clearing_irq_enable_acknowledges() {
    let mut apu = apu();
    apu.write(0x4010, 0x8F);
    apu.write(0x4015, 0x10);
    process(&mut apu, 2);
    apu.take_dmc_request();
    apu.set_dmc_read_buffer(0x00);
    assert!(apu.dmc_irq());

    apu.write(0x4010, 0x0F);
    assert!(!apu.dmc_irq());
}

#[test]
fn test_loop_restarts_sample() {
    let mut apu = apu();
    apu.write(0x4010, 0xCF);
    apu.write(0x4015, 0x10);
    process(&mut apu, 2);
    apu.take_dmc_request();
    apu.set_dmc_read_buffer(0x00);

    assert!(!apu.dmc_irq());
    assert_eq!(apu.read(0x4015) & 0x10, 0x10);
    assert_eq!(apu.dmc.current_address, 0xC000);
}

#[test]
fn test_address_wraps_to_8000() {
    let mut apu = apu();
    apu.write(0x4012, 0xFF);
    apu.write(0x4013, 0x04); // 65 bytes from $FFC0
    apu.write(0x4015, 0x10);
    process(&mut apu, 2);

    for _ in 0..0x40 {
        apu.set_dmc_read_buffer(0x00);
    }
    assert_eq!(apu.dmc.current_address, 0x8000);
}

#[test]
fn test_shifter_moves_output_level() {
    let mut apu = apu();
    apu.write(0x4011, 0x40);
    apu.write(0x4010, 0x0F);
    apu.write(0x4015, 0x10);
    process(&mut apu, 2);
    assert_eq!(apu.take_dmc_request(), Some(0xC000));
    apu.set_dmc_read_buffer(0xFF);

    // Eight bit periods to load the shifter, eight more to play it
    process(&mut apu, 2_000);
    assert_eq!(apu.dmc.output_level, 0x40 + 16);
    assert_eq!(apu.take_dmc_request(), None);
}

#[test]
fn test_disable_stops_sample() {
    let mut apu = apu();
    apu.write(0x4015, 0x10);
    assert!(apu.dmc.is_active());
    apu.write(0x4015, 0x00);
    assert!(!apu.dmc.is_active());
}
