//! PPU Timing Tests
//!
//! Row/dot tracking, vblank flag and NMI timing, odd-frame dot skip and
//! the power-on warm-up period.

use super::*;

/// Ticks needed from power-on to land on `(row, dot)`
fn ticks_to(row: u16, dot: u16) -> u32 {
    row as u32 * DOTS_PER_ROW + dot as u32 + 1
}

#[test]
fn test_first_tick_lands_on_dot_zero() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();

    ppu.tick(&mut memory);
    assert_eq!(ppu.row(), 0);
    assert_eq!(ppu.dot(), 0);

    ppu.tick(&mut memory);
    assert_eq!(ppu.dot(), 1);
}

#[test]
fn test_row_advancement() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();

    tick_n(&mut ppu, &mut memory, DOTS_PER_ROW);
    assert_eq!((ppu.row(), ppu.dot()), (0, 340));

    ppu.tick(&mut memory);
    assert_eq!((ppu.row(), ppu.dot()), (1, 0));
}

#[test]
fn test_vblank_flag_set_at_dot_one() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();

    tick_n(&mut ppu, &mut memory, ticks_to(241, 0));
    assert_eq!(ppu.status & STATUS_VBLANK, 0, "VBlank not set on dot 0");
    assert!(!ppu.entered_vblank());

    ppu.tick(&mut memory);
    assert_ne!(ppu.status & STATUS_VBLANK, 0, "VBlank set on row 241, dot 1");
    assert!(ppu.entered_vblank());
}

#[test]
fn test_nmi_generated_when_enabled() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();
    ppu.write_register(PPUCTRL, 0x80, &mut memory);

    tick_n(&mut ppu, &mut memory, ticks_to(241, 0));
    assert!(!ppu.take_nmi());
    ppu.tick(&mut memory);
    assert!(ppu.take_nmi());
}

#[test]
fn test_no_nmi_when_disabled() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();

    tick_n(&mut ppu, &mut memory, ticks_to(241, 1));
    assert!(!ppu.take_nmi());
}

#[test]
fn test_prerender_clears_flags() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();

    tick_n(&mut ppu, &mut memory, ticks_to(261, 0));
    ppu.status |= STATUS_SPRITE0_HIT | STATUS_OVERFLOW;
    assert_ne!(ppu.status & STATUS_VBLANK, 0);

    ppu.tick(&mut memory);
    assert_eq!(ppu.status, 0, "All flags clear on pre-render dot 1");
}

#[test]
fn test_frame_length_without_rendering() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();
    ppu.tick(&mut memory);

    for _ in 0..2 {
        tick_n(&mut ppu, &mut memory, 262 * DOTS_PER_ROW);
        assert_eq!((ppu.row(), ppu.dot()), (0, 0), "Both frames are 89342 dots");
    }
}

#[test]
fn test_odd_frame_skips_a_dot_when_rendering() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();
    ppu.write_register(PPUMASK, 0x08, &mut memory);
    ppu.tick(&mut memory);

    tick_n(&mut ppu, &mut memory, 262 * DOTS_PER_ROW);
    assert_eq!((ppu.row(), ppu.dot()), (0, 0), "Even frame is full length");
    assert!(ppu.odd_frame);

    tick_n(&mut ppu, &mut memory, 262 * DOTS_PER_ROW - 1);
    assert_eq!((ppu.row(), ppu.dot()), (0, 0), "Odd frame is one dot shorter");
    assert!(!ppu.odd_frame);
}

#[test]
fn test_pal_frame_has_no_skip() {
    let mut ppu = Ppu::new(Region::Pal);
    ppu.warming_up = false;
    let mut memory = create_memory();
    ppu.write_register(PPUMASK, 0x08, &mut memory);
    ppu.tick(&mut memory);

    for _ in 0..2 {
        tick_n(&mut ppu, &mut memory, 312 * DOTS_PER_ROW);
        assert_eq!((ppu.row(), ppu.dot()), (0, 0));
    }
}

#[test]
fn test_pal_vblank_row() {
    let mut ppu = Ppu::new(Region::Pal);
    ppu.warming_up = false;
    let mut memory = create_memory();

    tick_n(&mut ppu, &mut memory, ticks_to(291, 1));
    assert!(ppu.entered_vblank());
    assert_ne!(ppu.status & STATUS_VBLANK, 0);
}

#[test]
fn test_warmup_period() {
    let mut ppu = Ppu::new(Region::Ntsc);
    let mut memory = create_memory();
    let warmup = Region::Ntsc.ppu_warmup_dots();

    tick_n(&mut ppu, &mut memory, warmup);
    assert!(ppu.is_warming_up());
    assert_eq!(ppu.status, 0, "No vblank during warm-up");

    ppu.tick(&mut memory);
    assert!(!ppu.is_warming_up());

    ppu.write_register(PPUCTRL, 0x04, &mut memory);
    assert_eq!(ppu.ctrl, 0x04, "Writes accepted after warm-up");
}

#[test]
fn test_reset_restarts_warmup() {
    let mut ppu = create_ppu();
    let mut memory = create_memory();
    ppu.write_register(PPUCTRL, 0x84, &mut memory);
    ppu.write_register(PPUMASK, 0x1E, &mut memory);
    ppu.write_register(PPUSCROLL, 0x10, &mut memory);

    ppu.reset();
    assert_eq!(ppu.ctrl, 0);
    assert_eq!(ppu.mask, 0);
    assert_eq!(ppu.t, 0);
    assert!(!ppu.write_latch);
    assert!(ppu.is_warming_up());

    ppu.write_register(PPUCTRL, 0x80, &mut memory);
    assert_eq!(ppu.ctrl, 0);
}

#[test]
fn test_set_region_clamps_row() {
    let mut ppu = Ppu::new(Region::Pal);
    ppu.row = 300;
    ppu.set_region(Region::Ntsc);
    assert_eq!(ppu.row(), 261);
    assert_eq!(ppu.region(), Region::Ntsc);

    ppu.row = 100;
    ppu.set_region(Region::Pal);
    assert_eq!(ppu.row(), 100);
}
