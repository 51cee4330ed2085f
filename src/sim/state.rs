//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::world::World;
use crate::consts::*;
use crate::{approach, lane_offset};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    Start,
    /// Active run
    Playing,
    /// Run ended, world frozen
    GameOver,
}

/// Obstacle subtypes, each with its own clearance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low log: clear it by being high enough in the air
    Jump,
    /// Overhead gate: clear it by sliding underneath
    Slide,
    /// Wall: only a lane change avoids it
    Full,
}

impl ObstacleKind {
    /// Whether the player's current pose gets past this obstacle
    pub fn is_cleared_by(self, player: &Player) -> bool {
        match self {
            ObstacleKind::Jump => player.y > JUMP_CLEARANCE,
            ObstacleKind::Slide => player.sliding,
            ObstacleKind::Full => false,
        }
    }

    /// Human-readable cause of death
    pub fn death_reason(self) -> &'static str {
        match self {
            ObstacleKind::Jump => "tripped on log",
            ObstacleKind::Slide => "hit head on gate",
            ObstacleKind::Full => "smashed into wall",
        }
    }
}

/// What a world object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Obstacle(ObstacleKind),
    Coin,
    Shield,
}

impl ObjectKind {
    pub fn is_obstacle(&self) -> bool {
        matches!(self, ObjectKind::Obstacle(_))
    }
}

/// An obstacle or pickup placed on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub lane: usize,
    /// Longitudinal position (grows as the object approaches the camera)
    pub z: f32,
    pub active: bool,
    /// Obstacle already ruled cleared while lined up inside the hit window
    #[serde(default)]
    pub judged: bool,
}

impl WorldObject {
    /// Lateral position of the object's lane
    #[inline]
    pub fn x(&self) -> f32 {
        lane_offset(self.lane)
    }
}

/// A fixed-length slice of track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub z: f32,
    /// Objects spawned on this segment
    pub object_ids: Vec<u32>,
}

/// The pursuer that closes in once the run ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chaser {
    /// (x, z) position
    pub pos: Vec2,
}

impl Default for Chaser {
    fn default() -> Self {
        Self {
            pos: Vec2::new(lane_offset(START_LANE), CHASER_FOLLOW_Z),
        }
    }
}

impl Chaser {
    /// Smoothly track the player's lateral position while holding `target_z`
    pub fn pursue(&mut self, player_x: f32, target_z: f32, dt: f32) {
        self.pos.x = approach(self.pos.x, player_x, CHASER_LATERAL_SMOOTHING, dt);
        self.pos.y = approach(self.pos.y, target_z, CHASER_SMOOTHING, dt);
    }
}

/// Discrete commands from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    LaneLeft,
    LaneRight,
    Jump,
    Duck,
    Start,
    Retry,
}

/// Notifications for the audio collaborator, drained after each tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    JumpStarted,
    SlideStarted,
    CoinCollected,
    ShieldCollected,
    ShieldBlocked,
    GameOver { reason: String },
    MusicStart,
    MusicStop,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Track generation RNG
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Distance score for the current run
    pub score: f32,
    /// Coins collected this run
    pub coins: u32,
    /// Seconds spent in Playing this run
    pub elapsed: f32,
    /// Set only on entering GameOver
    pub death_reason: Option<String>,
    pub player: Player,
    pub chaser: Chaser,
    /// Segments and objects
    pub world: World,
    /// Whether background music is running
    pub music_playing: bool,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, sitting on the title screen
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0.0,
            coins: 0,
            elapsed: 0.0,
            death_reason: None,
            player: Player::default(),
            chaser: Chaser::default(),
            world: World::default(),
            music_playing: false,
            events: Vec::new(),
        };

        // Stream an initial track so the title screen has something to show
        state.world.rebuild(&mut state.rng);

        state
    }

    /// Whether the shield currently absorbs hits
    #[inline]
    pub fn shield_active(&self) -> bool {
        self.player.shield_timer > 0.0
    }

    /// Queue an event for collaborators
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop music and release every spawned entity
    pub fn shutdown(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            self.emit(GameEvent::MusicStop);
        }
        self.world.clear();
        log::info!("Simulation shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearance_rules() {
        let mut player = Player::default();
        assert!(!ObstacleKind::Jump.is_cleared_by(&player));
        assert!(!ObstacleKind::Slide.is_cleared_by(&player));
        assert!(!ObstacleKind::Full.is_cleared_by(&player));

        player.y = JUMP_CLEARANCE + 0.1;
        player.jumping = true;
        assert!(ObstacleKind::Jump.is_cleared_by(&player));
        // Jumping never gets under a gate
        assert!(!ObstacleKind::Slide.is_cleared_by(&player));
        assert!(!ObstacleKind::Full.is_cleared_by(&player));

        // Exactly at the threshold is still a hit
        player.y = JUMP_CLEARANCE;
        assert!(!ObstacleKind::Jump.is_cleared_by(&player));

        let mut player = Player::default();
        player.sliding = true;
        assert!(ObstacleKind::Slide.is_cleared_by(&player));
        assert!(!ObstacleKind::Jump.is_cleared_by(&player));
        assert!(!ObstacleKind::Full.is_cleared_by(&player));
    }

    #[test]
    fn test_new_state_on_title_screen() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0.0);
        assert!(!state.world.segments.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_shutdown_releases_world() {
        let mut state = GameState::new(42);
        state.music_playing = true;
        state.shutdown();
        assert!(state.world.segments.is_empty());
        assert!(state.world.objects.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::MusicStop]);
        assert!(state.drain_events().is_empty());
    }
}
