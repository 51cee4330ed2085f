//! Collision detection against the player
//!
//! Forgiving zone test instead of geometry: an object collides when it is
//! inside the hit window along `z` and its lane center is within
//! `LANE_HIT_DISTANCE` of the player's continuous `x`. Detection only reads
//! the world; the game state decides what each contact does.
//!
//! An obstacle is ruled on once: the first tick it is lined up inside the
//! window decides between a hit and a clear. A cleared obstacle is marked
//! `judged` and ignored for the rest of its pass through the window.

use super::player::Player;
use super::state::{ObjectKind, ObstacleKind, WorldObject};
use crate::consts::*;

/// A contact found this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Coin touched
    Coin { id: u32 },
    /// Shield pickup touched
    Shield { id: u32 },
    /// Obstacle not cleared by the player's pose
    Obstacle { id: u32, kind: ObstacleKind },
    /// Obstacle cleared by the player's pose on its first aligned tick
    Cleared { id: u32 },
}

/// Whether `z` lies in the band that counts as passing through the player
#[inline]
pub fn in_hit_window(z: f32) -> bool {
    (HIT_WINDOW_FAR..=HIT_WINDOW_NEAR).contains(&z)
}

/// Whether the object's lane lines up with the player
#[inline]
pub fn is_aligned(player_x: f32, object: &WorldObject) -> bool {
    (player_x - object.x()).abs() < LANE_HIT_DISTANCE
}

/// Check a single object against the player
pub fn check_object(player: &Player, object: &WorldObject) -> Option<Contact> {
    if !object.active
        || object.judged
        || !in_hit_window(object.z)
        || !is_aligned(player.x, object)
    {
        return None;
    }

    match object.kind {
        ObjectKind::Coin => Some(Contact::Coin { id: object.id }),
        ObjectKind::Shield => Some(Contact::Shield { id: object.id }),
        ObjectKind::Obstacle(kind) => {
            if kind.is_cleared_by(player) {
                Some(Contact::Cleared { id: object.id })
            } else {
                Some(Contact::Obstacle { id: object.id, kind })
            }
        }
    }
}

/// All contacts for this tick, in object order
pub fn detect(player: &Player, objects: &[WorldObject]) -> Vec<Contact> {
    objects
        .iter()
        .filter_map(|object| check_object(player, object))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane_offset;

    fn object(kind: ObjectKind, lane: usize, z: f32) -> WorldObject {
        WorldObject {
            id: 1,
            kind,
            lane,
            z,
            active: true,
            judged: false,
        }
    }

    fn wall(lane: usize, z: f32) -> WorldObject {
        object(ObjectKind::Obstacle(ObstacleKind::Full), lane, z)
    }

    #[test]
    fn test_hit_window_bounds() {
        assert!(in_hit_window(0.0));
        assert!(in_hit_window(HIT_WINDOW_FAR));
        assert!(in_hit_window(HIT_WINDOW_NEAR));
        assert!(!in_hit_window(HIT_WINDOW_FAR - 0.01));
        assert!(!in_hit_window(HIT_WINDOW_NEAR + 0.01));
    }

    #[test]
    fn test_full_always_hits_when_aligned() {
        let mut player = Player::default();
        assert!(check_object(&player, &wall(1, 0.0)).is_some());

        player.jumping = true;
        player.y = 3.0;
        assert!(check_object(&player, &wall(1, 0.0)).is_some());

        let mut player = Player::default();
        player.sliding = true;
        assert!(check_object(&player, &wall(1, 0.0)).is_some());
    }

    #[test]
    fn test_misaligned_or_outside_window_misses() {
        let player = Player::default();
        assert!(check_object(&player, &wall(0, 0.0)).is_none());
        assert!(check_object(&player, &wall(2, 0.0)).is_none());
        assert!(check_object(&player, &wall(1, -5.0)).is_none());
        assert!(check_object(&player, &wall(1, 5.0)).is_none());

        let mut inactive = wall(1, 0.0);
        inactive.active = false;
        assert!(check_object(&player, &inactive).is_none());
    }

    #[test]
    fn test_alignment_is_forgiving_mid_lane_change() {
        let mut player = Player::default();
        // Most of the way to the right lane already
        player.x = lane_offset(2) - LANE_HIT_DISTANCE + 0.1;
        assert!(check_object(&player, &wall(2, 0.0)).is_some());
        assert!(check_object(&player, &wall(1, 0.0)).is_none());
    }

    #[test]
    fn test_jump_and_slide_clearance() {
        let log = object(ObjectKind::Obstacle(ObstacleKind::Jump), 1, 0.0);
        let gate = object(ObjectKind::Obstacle(ObstacleKind::Slide), 1, 0.0);

        let mut player = Player::default();
        assert!(check_object(&player, &log).is_some());
        assert!(check_object(&player, &gate).is_some());

        player.jumping = true;
        player.y = JUMP_CLEARANCE + 0.5;
        assert_eq!(check_object(&player, &log), Some(Contact::Cleared { id: 1 }));
        assert_eq!(
            check_object(&player, &gate),
            Some(Contact::Obstacle {
                id: 1,
                kind: ObstacleKind::Slide
            })
        );

        let mut player = Player::default();
        player.sliding = true;
        assert_eq!(check_object(&player, &gate), Some(Contact::Cleared { id: 1 }));
        assert!(matches!(
            check_object(&player, &log),
            Some(Contact::Obstacle { .. })
        ));
    }

    #[test]
    fn test_judged_obstacle_ignored() {
        // Lined up, grounded and not sliding: would be a hit if still open
        let player = Player::default();
        let mut log = object(ObjectKind::Obstacle(ObstacleKind::Jump), 1, 0.0);
        log.judged = true;
        assert!(check_object(&player, &log).is_none());

        let mut gate = object(ObjectKind::Obstacle(ObstacleKind::Slide), 1, 0.5);
        gate.judged = true;
        assert!(detect(&player, &[gate]).is_empty());
    }

    #[test]
    fn test_pickups_ignore_pose() {
        let mut player = Player::default();
        player.jumping = true;
        player.y = 2.0;
        let coin = object(ObjectKind::Coin, 1, 0.5);
        let shield = object(ObjectKind::Shield, 1, -0.5);
        assert_eq!(check_object(&player, &coin), Some(Contact::Coin { id: 1 }));
        assert_eq!(check_object(&player, &shield), Some(Contact::Shield { id: 1 }));
    }

    #[test]
    fn test_detect_preserves_order() {
        let player = Player::default();
        let mut coin = object(ObjectKind::Coin, 1, 0.0);
        coin.id = 2;
        let mut far = wall(1, -30.0);
        far.id = 3;
        let contacts = detect(&player, &[wall(1, 0.0), coin, far]);
        assert_eq!(contacts.len(), 2);
        assert!(matches!(contacts[0], Contact::Obstacle { id: 1, .. }));
        assert_eq!(contacts[1], Contact::Coin { id: 2 });
    }
}
