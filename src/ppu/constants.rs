// PPU constants

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Last dot of a row
pub(super) const LAST_DOT: u16 = 340;

/// Number of rows that produce pixels
pub(super) const VISIBLE_ROWS: u16 = 240;

// ========================================
// PPUCTRL ($2000) bits
// ========================================

/// VRAM address increment per PPUDATA access (0: +1, 1: +32)
pub(super) const CTRL_INCREMENT_32: u8 = 0x04;
/// Sprite pattern table for 8x8 sprites (0: $0000, 1: $1000)
pub(super) const CTRL_SPRITE_TABLE: u8 = 0x08;
/// Background pattern table (0: $0000, 1: $1000)
pub(super) const CTRL_BACKGROUND_TABLE: u8 = 0x10;
/// Sprite size (0: 8x8, 1: 8x16)
pub(super) const CTRL_LARGE_SPRITES: u8 = 0x20;
/// Generate an NMI at the start of vblank
pub(super) const CTRL_NMI: u8 = 0x80;

// ========================================
// PPUMASK ($2001) bits
// ========================================

pub(super) const MASK_GRAYSCALE: u8 = 0x01;
pub(super) const MASK_LEFT_BACKGROUND: u8 = 0x02;
pub(super) const MASK_LEFT_SPRITES: u8 = 0x04;
pub(super) const MASK_BACKGROUND: u8 = 0x08;
pub(super) const MASK_SPRITES: u8 = 0x10;
/// Red emphasis (stored as red on both regions; PAL writes are swapped on the way in)
pub(super) const MASK_EMPHASIZE_RED: u8 = 0x20;
pub(super) const MASK_EMPHASIZE_GREEN: u8 = 0x40;
pub(super) const MASK_EMPHASIZE_BLUE: u8 = 0x80;

// ========================================
// PPUSTATUS ($2002) bits
// ========================================

pub(super) const STATUS_OVERFLOW: u8 = 0x20;
pub(super) const STATUS_SPRITE0_HIT: u8 = 0x40;
pub(super) const STATUS_VBLANK: u8 = 0x80;

// ========================================
// VRAM address (v / t) fields
// ========================================
//
// yyy NN YYYYY XXXXX
// ||| || ||||| +++++-- coarse X scroll
// ||| || +++++-------- coarse Y scroll
// ||| ++-------------- nametable select
// +++----------------- fine Y scroll

pub(super) const COARSE_X: u16 = 0x001F;
pub(super) const COARSE_Y: u16 = 0x03E0;
pub(super) const FINE_Y: u16 = 0x7000;
/// Horizontal bits copied from t to v at dot 257
pub(super) const HORIZONTAL_BITS: u16 = 0x041F;
/// Vertical bits copied from t to v during dots 280-304 of the pre-render row
pub(super) const VERTICAL_BITS: u16 = 0x7BE0;

/// Start of palette space in the PPU address map
pub(super) const PALETTE_START: u16 = 0x3F00;
