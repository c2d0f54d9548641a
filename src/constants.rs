//! Container magic numbers, image limits and rANS/Kagari tuning constants.

pub const IMAGE_HEAD_MAGIC: u32 = 0x036F_6B41; // "Ako\x03"
pub const TILE_HEAD_MAGIC: u32 = 0x0354_6B41; // "AkT\x03"

pub const IMAGE_HEAD_SIZE: usize = 16;
pub const TILE_HEAD_SIZE: usize = 16;

pub const MAXIMUM_WIDTH: u32 = 1 << 25;
pub const MAXIMUM_HEIGHT: u32 = 1 << 25;
pub const MAXIMUM_CHANNELS: u32 = 16;
pub const MAXIMUM_DEPTH: u32 = 16;

pub const MINIMUM_WIDTH: u32 = 1;
pub const MINIMUM_HEIGHT: u32 = 1;
pub const MINIMUM_CHANNELS: u32 = 1;
pub const MINIMUM_DEPTH: u32 = 1;

pub const MAXIMUM_TILES_DIMENSION: u32 = 1 << 25;
pub const MINIMUM_TILES_DIMENSION: u32 = 8;

/// Kagari block length, in samples, between framing tuples.
pub const BLOCK_LENGTH: usize = 4096;

/// Number of identical consecutive values that close out a literal run.
pub const RLE_TRIGGER: usize = 4;

// rANS parameters, fixed by the container format.
pub const ANS_STATE_LEN: u32 = 32;
pub const ANS_B_LEN: u32 = 15;
pub const ANS_B: u32 = 1 << ANS_B_LEN;
pub const ANS_B_MASK: u32 = ANS_B - 1;
pub const ANS_L: u32 = 1 << 16;
pub const ANS_M_LEN: u32 = 16;
pub const ANS_M: u32 = 1 << ANS_M_LEN;
pub const ANS_M_MASK: u32 = ANS_M - 1;
pub const ANS_INITIAL_STATE: u32 = ANS_L + 123;

/// The 32-bit accumulator width of the bit I/O layer.
pub const ACCUMULATOR_LEN: u32 = 32;

pub const RATE_CONTROL_TRIES: u32 = 8;
pub const RATE_CONTROL_ITERATION_SCALE: f64 = 4.0;
