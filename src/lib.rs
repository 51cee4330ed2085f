//! Lane Runner - An endless three-lane runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, track streaming, collisions, game state)
//! - `audio`: Audio collaborator boundary (event to cue mapping, pluggable backend)
//! - `settings`: Player preferences persisted as JSON

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, LogBackend, SoundEffect};
pub use settings::{Settings, SettingsError};

/// Game tuning constants
///
/// World space: the player runs at `z = 0`, the track scrolls toward `+z`
/// (toward the camera), lanes spread along `x` and `y` is height above ground.
pub mod consts {
    /// Number of lanes (left, center, right)
    pub const LANE_COUNT: usize = 3;
    /// Lateral distance between lane centers
    pub const LANE_WIDTH: f32 = 2.5;
    /// Lane the player starts in (center)
    pub const START_LANE: usize = 1;

    /// Forward speed at run start (units/s)
    pub const START_SPEED: f32 = 15.0;
    /// Forward speed cap
    pub const MAX_SPEED: f32 = 40.0;
    /// Linear speed gain (units/s²)
    pub const SPEED_ACCEL: f32 = 0.5;

    /// Downward acceleration while airborne (units/s²)
    pub const GRAVITY: f32 = 30.0;
    /// Upward velocity applied on jump
    pub const JUMP_VELOCITY: f32 = 12.0;
    /// Extra downward velocity applied when ducking mid-air
    pub const FAST_FALL_BOOST: f32 = 20.0;
    /// Ground height
    pub const GROUND_Y: f32 = 0.0;

    /// Slide duration (seconds)
    pub const SLIDE_DURATION: f32 = 0.8;
    /// Shield duration (seconds)
    pub const SHIELD_DURATION: f32 = 5.0;
    /// Lateral smoothing rate toward the target lane (per second)
    pub const LANE_CHANGE_SPEED: f32 = 12.0;

    /// Largest delta time a single tick will integrate
    pub const MAX_DT: f32 = 0.05;

    /// Length of one track segment
    pub const SEGMENT_LENGTH: f32 = 20.0;
    /// The farthest segment must always sit beyond this distance ahead of the player
    pub const LOOKAHEAD_DISTANCE: f32 = 160.0;
    /// Segments whose position passes this are recycled
    pub const SEGMENT_RECYCLE_Z: f32 = 30.0;
    /// Newly created segments nearer than this stay empty
    pub const MIN_SPAWN_DISTANCE: f32 = 40.0;
    /// Objects past this (behind the camera) are culled
    pub const CULL_Z: f32 = 10.0;

    /// Far edge of the hit window (ahead of the player)
    pub const HIT_WINDOW_FAR: f32 = -1.0;
    /// Near edge of the hit window (behind the player)
    pub const HIT_WINDOW_NEAR: f32 = 1.0;
    /// Lateral distance under which an object counts as lane-aligned
    pub const LANE_HIT_DISTANCE: f32 = 1.2;
    /// Height the player must exceed to clear a Jump obstacle
    pub const JUMP_CLEARANCE: f32 = 1.0;

    /// Chaser distance behind the player while running
    pub const CHASER_FOLLOW_Z: f32 = 6.0;
    /// Where the chaser ends up once the run is over
    pub const CHASER_CATCH_Z: f32 = 0.0;
    /// Chaser closing rate (per second)
    pub const CHASER_SMOOTHING: f32 = 2.5;
    /// Chaser lateral tracking rate (per second)
    pub const CHASER_LATERAL_SMOOTHING: f32 = 4.0;
}

/// Lateral offset of a lane's center
#[inline]
pub fn lane_offset(lane: usize) -> f32 {
    (lane as f32 - (consts::LANE_COUNT as f32 - 1.0) / 2.0) * consts::LANE_WIDTH
}

/// Exponential smoothing step of `current` toward `target`
///
/// The blend factor is `rate * dt`, capped at 1 so large steps land on the
/// target instead of overshooting.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).clamp(0.0, 1.0)
}
