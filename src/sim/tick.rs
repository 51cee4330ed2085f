//! Simulation tick and game-state machine
//!
//! One call advances the game by one frame. Order within a tick is fixed:
//! input, player kinematics, world scroll and streaming, object culling,
//! collision resolution, state reaction.

use super::autopilot;
use super::collision::{self, Contact};
use super::player::{DuckOutcome, Player};
use super::state::{Chaser, Command, GameEvent, GamePhase, GameState, ObstacleKind};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands received since the last tick, applied in order
    pub commands: Vec<Command>,
    /// Demo mode: the simulation plans its own movement
    pub autopilot: bool,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }
}

/// Advance the game state by one frame of `dt` seconds (clamped to `MAX_DT`)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

    for &command in &input.commands {
        apply_command(state, command);
    }
    if input.autopilot && state.phase == GamePhase::Playing {
        for command in autopilot::plan(state) {
            apply_command(state, command);
        }
    }

    match state.phase {
        GamePhase::Start => {}

        GamePhase::Playing => {
            state.elapsed += dt;

            state.player.integrate(dt);
            let distance = state.player.speed * dt;
            state.score += distance;

            state.world.scroll(distance, &mut state.rng);

            resolve_contacts(state);

            if state.phase == GamePhase::Playing {
                state.chaser.pursue(state.player.x, CHASER_FOLLOW_Z, dt);
            }
        }

        GamePhase::GameOver => {
            // World stays frozen; only the chaser closes in
            state.chaser.pursue(state.player.x, CHASER_CATCH_Z, dt);
        }
    }
}

/// Apply one input command; commands the current phase does not accept are ignored
pub fn apply_command(state: &mut GameState, command: Command) {
    match (state.phase, command) {
        (GamePhase::Playing, Command::LaneLeft) => {
            state.player.move_left();
        }
        (GamePhase::Playing, Command::LaneRight) => {
            state.player.move_right();
        }
        (GamePhase::Playing, Command::Jump) => {
            if state.player.jump() {
                state.emit(GameEvent::JumpStarted);
            }
        }
        (GamePhase::Playing, Command::Duck) => {
            if state.player.duck() == DuckOutcome::Slide {
                state.emit(GameEvent::SlideStarted);
            }
        }
        (GamePhase::Start, Command::Start) | (GamePhase::GameOver, Command::Retry) => {
            start_run(state);
        }
        _ => {}
    }
}

/// Enter Playing with a fresh run
pub fn start_run(state: &mut GameState) {
    state.score = 0.0;
    state.coins = 0;
    state.elapsed = 0.0;
    state.death_reason = None;
    state.player = Player::default();
    state.chaser = Chaser::default();
    state.world.rebuild(&mut state.rng);
    state.phase = GamePhase::Playing;

    state.music_playing = true;
    state.emit(GameEvent::MusicStart);

    log::info!("Run started (seed {})", state.seed);
}

/// Apply this tick's contacts in object order
fn resolve_contacts(state: &mut GameState) {
    let contacts = collision::detect(&state.player, &state.world.objects);

    for contact in contacts {
        log::trace!("Contact: {:?}", contact);
        match contact {
            Contact::Coin { id } => {
                consume(state, id);
                state.coins += 1;
                state.emit(GameEvent::CoinCollected);
            }
            Contact::Shield { id } => {
                consume(state, id);
                state.player.activate_shield();
                state.emit(GameEvent::ShieldCollected);
            }
            Contact::Obstacle { id, kind } => {
                if state.shield_active() {
                    consume(state, id);
                    state.emit(GameEvent::ShieldBlocked);
                } else {
                    game_over(state, kind);
                    break;
                }
            }
            Contact::Cleared { id } => {
                if let Some(object) = state.world.find_mut(id) {
                    object.judged = true;
                }
            }
        }
    }

    state.world.release_inactive();
}

fn consume(state: &mut GameState, id: u32) {
    if let Some(object) = state.world.find_mut(id) {
        object.active = false;
    }
}

/// Enter GameOver after an unshielded hit
fn game_over(state: &mut GameState, kind: ObstacleKind) {
    let reason = kind.death_reason().to_string();

    state.phase = GamePhase::GameOver;
    if state.music_playing {
        state.music_playing = false;
        state.emit(GameEvent::MusicStop);
    }
    state.emit(GameEvent::GameOver {
        reason: reason.clone(),
    });

    log::info!(
        "Game over: {} (score {:.0}, coins {}, {:.1}s)",
        reason,
        state.score,
        state.coins,
        state.elapsed
    );
    state.death_reason = Some(reason);
}
