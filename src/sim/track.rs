//! Track generation
//!
//! Streams fixed-length segments ahead of the player and populates each new
//! segment with obstacles and pickups. Every layout leaves at least one way
//! through: single obstacles leave two lanes open, walls always leave a safe
//! lane, and a full row is only ever jumpable logs.

use rand::Rng;

use super::state::{ObjectKind, ObstacleKind, Segment};
use super::world::World;
use crate::consts::*;

/// Obstacle arrangement for one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One obstacle of random subtype in a random lane
    Single,
    /// Walls in every lane but one
    SafeLane,
    /// Logs across all lanes
    JumpRow,
    /// Nothing
    Empty,
}

/// Chance a segment tries to place a pickup
pub const PICKUP_CHANCE: f32 = 0.5;
/// Chance a placed pickup is a shield rather than a coin
pub const SHIELD_CHANCE: f32 = 0.05;

/// Map a uniform roll in `[0, 1)` to a layout
pub fn choose_layout(roll: f32) -> Layout {
    if roll < 0.3 {
        Layout::Single
    } else if roll < 0.5 {
        Layout::SafeLane
    } else if roll < 0.6 {
        Layout::JumpRow
    } else {
        Layout::Empty
    }
}

/// Pick a subtype for a lone obstacle
///
/// The second roll is only drawn when the first one misses, which gives
/// Full 40% and splits the remaining 60% evenly between Jump and Slide.
pub fn roll_obstacle_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    if rng.random::<f32>() < 0.4 {
        ObstacleKind::Full
    } else if rng.random::<f32>() < 0.5 {
        ObstacleKind::Jump
    } else {
        ObstacleKind::Slide
    }
}

/// Keep appending far segments until the window reaches past the lookahead
pub fn extend_if_needed<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    loop {
        let z = match world.far_boundary() {
            None => 0.0,
            Some(far) if far > -LOOKAHEAD_DISTANCE => far - SEGMENT_LENGTH,
            Some(_) => break,
        };
        spawn_segment(world, z, rng);
    }
}

/// Create a segment at `z`, populating it if it is far enough away
pub fn spawn_segment<R: Rng + ?Sized>(world: &mut World, z: f32, rng: &mut R) -> u32 {
    let id = world.next_entity_id();
    let object_ids = if z < -MIN_SPAWN_DISTANCE {
        populate(world, z, rng)
    } else {
        Vec::new()
    };
    world.segments.push_back(Segment { id, z, object_ids });
    id
}

/// Place obstacles and maybe a pickup at `z`, returning the new object ids
fn populate<R: Rng + ?Sized>(world: &mut World, z: f32, rng: &mut R) -> Vec<u32> {
    let mut ids = Vec::new();

    let layout = choose_layout(rng.random::<f32>());
    match layout {
        Layout::Single => {
            let lane = rng.random_range(0..LANE_COUNT);
            let kind = roll_obstacle_kind(rng);
            ids.push(world.spawn(ObjectKind::Obstacle(kind), lane, z));
        }
        Layout::SafeLane => {
            let safe = rng.random_range(0..LANE_COUNT);
            for lane in (0..LANE_COUNT).filter(|&l| l != safe) {
                ids.push(world.spawn(ObjectKind::Obstacle(ObstacleKind::Full), lane, z));
            }
        }
        Layout::JumpRow => {
            for lane in 0..LANE_COUNT {
                ids.push(world.spawn(ObjectKind::Obstacle(ObstacleKind::Jump), lane, z));
            }
        }
        Layout::Empty => {}
    }

    if rng.random::<f32>() < PICKUP_CHANCE {
        let lane = rng.random_range(0..LANE_COUNT);
        if !world.is_occupied(lane, z) {
            let kind = if rng.random::<f32>() < SHIELD_CHANCE {
                ObjectKind::Shield
            } else {
                ObjectKind::Coin
            };
            ids.push(world.spawn(kind, lane, z));
        }
    }

    log::debug!("Segment at z={:.1}: {:?}, {} objects", z, layout, ids.len());
    ids
}
