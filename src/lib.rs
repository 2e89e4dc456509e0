//! Wormwood - falling-glyph side-scroller simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, combat, entities, rounds)
//! - `settings`: Runtime settings loaded from JSON
//! - `view`: Render boundary (frame handle + integer position per entity)

pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{CharacterSet, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;
    /// Floor line; also the despawn line for falling actors
    pub const FLOOR_Y: f32 = 500.0;

    /// Player body (placeholder frames are 48x48)
    pub const PLAYER_SIZE: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const GRAVITY: f32 = 1.0;
    pub const JUMP_STRENGTH: f32 = -16.0;
    /// Wall jumps keep 90% of the vertical power
    pub const WALL_JUMP_FACTOR: f32 = 0.9;
    pub const WALL_JUMP_IMPULSE: f32 = 10.0;
    /// Cap on vertical velocity when wall contact is detected (gravity is added after)
    pub const WALL_SLIDE_MAX_VY: f32 = 3.0;
    /// Upward velocity while flying (Math character set, up held)
    pub const FLIGHT_LIFT: f32 = -6.0;
    pub const IMPULSE_DECAY: f32 = 0.85;
    /// Impulses slower than this snap to zero
    pub const IMPULSE_REST: f32 = 0.5;
    /// Mid-air jumps available after leaving the ground
    pub const MAX_JUMPS: u8 = 2;
    pub const MAX_HEALTH: i32 = 100;

    /// Depth axis (pseudo-3D)
    pub const DEPTH_SPEED: f32 = 3.0;
    pub const MAX_DEPTH: f32 = 100.0;
    /// Visual scale at maximum depth
    pub const DEPTH_MIN_SCALE: f32 = 0.5;

    /// Attack timing (ticks)
    pub const ATTACK_DURATION: u32 = 15;
    pub const ATTACK_COOLDOWN: u32 = 20;
    pub const PARRY_WINDOW: u32 = 3;
    /// Attack frames advance every N ticks
    pub const ATTACK_FRAME_TICKS: u32 = 2;
    pub const ATTACK_RANGE: f32 = 80.0;

    /// Animation cadence (ticks per frame)
    pub const MOVE_ANIM_TICKS: u32 = 7;
    pub const IDLE_ANIM_TICKS: u32 = 20;

    /// Knockback
    pub const PARRY_FORCE: f32 = 40.0;
    pub const MISSED_PARRY_FORCE: f32 = 30.0;
    pub const RANGED_HIT_FORCE: f32 = 35.0;
    pub const KNOCKBACK_DECAY: f32 = 0.95;
    /// Knocked-back enemies slower than this are considered spent
    pub const KNOCKBACK_REST_SPEED: f32 = 0.5;
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
    pub const MISSED_PARRY_DAMAGE: i32 = 10;

    /// Falling actors
    pub const COLLECTIBLE_WIDTH: f32 = 12.0;
    pub const COLLECTIBLE_HEIGHT: f32 = 20.0;
    pub const COLLECTIBLE_POINTS: u64 = 1;
    pub const ENEMY_WIDTH: f32 = 16.0;
    pub const ENEMY_HEIGHT: f32 = 24.0;
    pub const ENEMY_EXTRA_SPEED: f32 = 1.0;
    pub const ENEMY_REWARD: u64 = 10;
    pub const PILL_WIDTH: f32 = 30.0;
    pub const PILL_HEIGHT: f32 = 15.0;
    pub const PILL_SPEED_OFFSET: f32 = -0.5;
    pub const PILL_SPAWN_Y: f32 = -50.0;

    /// Round flow
    pub const SPAWN_INTERVAL: u32 = 20;
    pub const MAX_COLLECTIBLES_PER_SPAWN: u32 = 3;
    /// Enemy spawns when a uniform roll exceeds this
    pub const ENEMY_SPAWN_ROLL: f64 = 0.7;
    pub const ROUND_SCORE_TARGET: u64 = 200;
    pub const PILL_SCORE_THRESHOLD: u64 = 999;
    pub const FINAL_ROUND: u32 = 3;
    pub const BASE_DROP_SPEED: f32 = 2.0;
    pub const ROUND_SPEED_STEP: f32 = 1.0;
    pub const RAMP_INTERVAL: u64 = 300;
    pub const RAMP_STEP: f32 = 0.5;
    pub const MAX_DROP_SPEED: f32 = 10.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Visual scale for a depth value: 1.0 at the front, `DEPTH_MIN_SCALE` at the back
#[inline]
pub fn depth_scale(depth: f32) -> f32 {
    use consts::{DEPTH_MIN_SCALE, MAX_DEPTH};
    let t = depth.clamp(0.0, MAX_DEPTH) / MAX_DEPTH;
    lerp(1.0, DEPTH_MIN_SCALE, t)
}
