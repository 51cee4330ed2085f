//! Demo-mode input planner
//!
//! Looks at the nearest row of obstacles ahead and picks the command a
//! reasonable player would press: step out of a wall's lane, jump a log,
//! slide under a gate. With nothing threatening it drifts toward pickups.
//! It only produces commands; the simulation treats them like any other input.

use super::state::{Command, GamePhase, GameState, ObjectKind, ObstacleKind};
use crate::consts::*;

/// How far ahead (in seconds of travel) obstacles are considered
const THREAT_HORIZON: f32 = 0.6;
/// Jump when a log is this close (seconds)
const JUMP_LEAD: f32 = 0.25;
/// Duck when a gate is this close (seconds)
const SLIDE_LEAD: f32 = 0.2;
/// How far ahead pickups are chased (seconds)
const PICKUP_HORIZON: f32 = 1.0;

/// Obstacle in `lane` within `horizon` units ahead of the hit window, nearest first
fn obstacle_in_lane(state: &GameState, lane: usize, horizon: f32) -> Option<(ObstacleKind, f32)> {
    state
        .world
        .objects
        .iter()
        .filter(|o| o.active && o.lane == lane)
        .filter(|o| o.z <= HIT_WINDOW_NEAR && o.z >= HIT_WINDOW_FAR - horizon)
        .filter_map(|o| match o.kind {
            ObjectKind::Obstacle(kind) => Some((kind, o.z)),
            _ => None,
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// A lane is safe to step into if it has no wall coming up
fn lane_is_clear(state: &GameState, lane: usize, horizon: f32) -> bool {
    !matches!(
        obstacle_in_lane(state, lane, horizon),
        Some((ObstacleKind::Full, _))
    )
}

/// One step toward `target`, if that lane is clear
fn step_toward(state: &GameState, target: usize, horizon: f32) -> Option<Command> {
    let lane = state.player.lane;
    let (next, command) = if target < lane {
        (lane - 1, Command::LaneLeft)
    } else if target > lane {
        (lane + 1, Command::LaneRight)
    } else {
        return None;
    };
    lane_is_clear(state, next, horizon).then_some(command)
}

/// Plan this tick's commands
pub fn plan(state: &GameState) -> Vec<Command> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    let player = &state.player;
    let speed = player.speed.max(1.0);
    let horizon = speed * THREAT_HORIZON;
    let mut commands = Vec::new();

    match obstacle_in_lane(state, player.lane, horizon) {
        Some((ObstacleKind::Full, _)) => {
            // Nearest lane without a wall, preferring the closer side
            let escape = (0..LANE_COUNT)
                .filter(|&l| l != player.lane && lane_is_clear(state, l, horizon))
                .min_by_key(|&l| l.abs_diff(player.lane));
            if let Some(target) = escape {
                commands.push(if target < player.lane {
                    Command::LaneLeft
                } else {
                    Command::LaneRight
                });
            }
        }
        Some((ObstacleKind::Jump, z)) => {
            let time_to_hit = (HIT_WINDOW_FAR - z).max(0.0) / speed;
            if time_to_hit <= JUMP_LEAD && !player.jumping && !player.sliding {
                commands.push(Command::Jump);
            }
        }
        Some((ObstacleKind::Slide, z)) => {
            let time_to_hit = (HIT_WINDOW_FAR - z).max(0.0) / speed;
            if time_to_hit <= SLIDE_LEAD && !player.sliding {
                commands.push(Command::Duck);
            }
        }
        None => {
            let pickup = state
                .world
                .objects
                .iter()
                .filter(|o| o.active && !o.kind.is_obstacle())
                .filter(|o| o.z <= HIT_WINDOW_FAR && o.z >= HIT_WINDOW_FAR - speed * PICKUP_HORIZON)
                .max_by(|a, b| a.z.total_cmp(&b.z));
            if let Some(pickup) = pickup {
                commands.extend(step_toward(state, pickup.lane, horizon));
            }
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};

    const DT: f32 = 1.0 / 60.0;

    fn empty_run() -> GameState {
        let mut state = GameState::new(31);
        tick(&mut state, &TickInput::command(Command::Start), DT);
        state.world.objects.clear();
        state
    }

    #[test]
    fn test_idle_outside_playing() {
        let state = GameState::new(31);
        assert!(plan(&state).is_empty());
    }

    #[test]
    fn test_steps_out_of_wall() {
        let mut state = empty_run();
        state
            .world
            .spawn(ObjectKind::Obstacle(ObstacleKind::Full), 1, -5.0);
        state
            .world
            .spawn(ObjectKind::Obstacle(ObstacleKind::Full), 0, -5.0);
        assert_eq!(plan(&state), vec![Command::LaneRight]);
    }

    #[test]
    fn test_jumps_log_only_when_close() {
        let mut state = empty_run();
        state
            .world
            .spawn(ObjectKind::Obstacle(ObstacleKind::Jump), 1, -8.0);
        assert!(plan(&state).is_empty());

        state.world.objects[0].z = -2.0;
        assert_eq!(plan(&state), vec![Command::Jump]);
    }

    #[test]
    fn test_ducks_under_gate() {
        let mut state = empty_run();
        state
            .world
            .spawn(ObjectKind::Obstacle(ObstacleKind::Slide), 1, -2.0);
        assert_eq!(plan(&state), vec![Command::Duck]);
    }

    #[test]
    fn test_drifts_toward_coin() {
        let mut state = empty_run();
        state.world.spawn(ObjectKind::Coin, 2, -6.0);
        assert_eq!(plan(&state), vec![Command::LaneRight]);
    }

    #[test]
    fn test_autopilot_survives_mixed_rows() {
        let mut state = empty_run();
        let rows = [
            (ObstacleKind::Full, [0usize, 1].as_slice()),
            (ObstacleKind::Jump, [0, 1, 2].as_slice()),
            (ObstacleKind::Slide, [2].as_slice()),
            (ObstacleKind::Full, [1, 2].as_slice()),
        ];
        for (i, (kind, lanes)) in rows.iter().enumerate() {
            let z = -15.0 - 25.0 * i as f32;
            for &lane in *lanes {
                state.world.spawn(ObjectKind::Obstacle(*kind), lane, z);
            }
        }

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..(60 * 8) {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.phase, GamePhase::Playing, "{:?}", state.death_reason);
    }
}
