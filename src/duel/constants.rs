//! Duel Constants
//!
//! Timing limits, arena layout, and the dimensions of the procedural fighter
//! bodies. Fighter stats live with the fighters in `actors`.

// ============================================================================
// Timing
// ============================================================================

/// Longest frame delta the simulation will integrate, in seconds.
/// A stalled window resuming after a long pause advances by at most this.
pub const MAX_FRAME_DELTA: f32 = 0.1;

// ============================================================================
// Arena
// ============================================================================

/// Side length of the square ground plane
pub const ARENA_SIZE: f32 = 50.0;

pub const GROUND_COLOR: u32 = 0x7d5a3a;
pub const SKY_COLOR: u32 = 0x87ceeb;

// ============================================================================
// Fighter bodies
// ============================================================================

/// Uniform scale applied to every body part
pub const RIG_SCALE: f32 = 1.5;

pub const PLAYER_COLOR: u32 = 0x3366ff;
pub const PLAYER_TRIM_COLOR: u32 = 0x2244aa;
pub const BOT_COLOR: u32 = 0xff3333;
pub const BOT_TRIM_COLOR: u32 = 0xaa2222;
pub const SKIN_COLOR: u32 = 0xffcc99;
pub const BOOT_COLOR: u32 = 0x1a1a1a;
pub const BLADE_COLOR: u32 = 0xc0c0c0;

/// Height of the floating health bar above the fighter root
pub const HEALTH_BAR_HEIGHT: f32 = 3.0;
pub const HEALTH_BAR_WIDTH: f32 = 2.0;
pub const HEALTH_BAR_BACKGROUND: u32 = 0x333333;

/// Convert a packed 0xRRGGBB colour.
pub fn rgb(hex: u32) -> bevy::prelude::Color {
    bevy::prelude::Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}
