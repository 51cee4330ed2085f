//! Read-only view of the simulation for presentation layers
//!
//! Built after a tick completes, so renderers and HUDs always see a
//! consistent frame.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, ObjectKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub lane: usize,
    /// (lateral, height, longitudinal)
    pub position: Vec3,
    pub jumping: bool,
    pub sliding: bool,
    pub shield_active: bool,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub kind: ObjectKind,
    pub lane: usize,
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub id: u32,
    pub z: f32,
}

/// Everything a renderer, HUD or audio mixer may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: f32,
    pub coins: u32,
    pub elapsed: f32,
    pub death_reason: Option<String>,
    pub player: PlayerView,
    /// Chaser (x, z)
    pub chaser: Vec2,
    /// Active objects, ascending id
    pub objects: Vec<ObjectView>,
    /// Segments, nearest first
    pub segments: Vec<SegmentView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        Snapshot {
            phase: self.phase,
            score: self.score,
            coins: self.coins,
            elapsed: self.elapsed,
            death_reason: self.death_reason.clone(),
            player: PlayerView {
                lane: player.lane,
                position: Vec3::new(player.x, player.y, 0.0),
                jumping: player.jumping,
                sliding: player.sliding,
                shield_active: self.shield_active(),
                speed: player.speed,
            },
            chaser: self.chaser.pos,
            objects: self
                .world
                .objects
                .iter()
                .filter(|o| o.active)
                .map(|o| ObjectView {
                    id: o.id,
                    kind: o.kind,
                    lane: o.lane,
                    z: o.z,
                })
                .collect(),
            segments: self
                .world
                .segments
                .iter()
                .map(|s| SegmentView { id: s.id, z: s.z })
                .collect(),
        }
    }
}
