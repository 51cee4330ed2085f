//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame with clamped delta time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or audio dependencies; side effects leave as `GameEvent`s

pub mod autopilot;
pub mod collision;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod track;
pub mod world;

pub use collision::{Contact, detect};
pub use player::{DuckOutcome, Player};
pub use snapshot::{ObjectView, PlayerView, SegmentView, Snapshot};
pub use state::{
    Chaser, Command, GameEvent, GamePhase, GameState, ObjectKind, ObstacleKind, Segment,
    WorldObject,
};
pub use tick::{TickInput, apply_command, start_run, tick};
pub use track::{Layout, choose_layout, extend_if_needed};
pub use world::World;
