//! Lane Runner entry point
//!
//! Headless native driver: runs the simulation on a synthetic 60 Hz frame
//! clock with the autopilot at the controls, feeding events to the audio
//! collaborator and retrying after each game over.
//!
//! Usage: `lane-runner [settings.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lane_runner::sim::{Command, GamePhase, GameState, TickInput, tick};
use lane_runner::{AudioManager, LogBackend, Settings};

/// Frame period of the synthetic clock
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest run before the driver gives up waiting for a game over (seconds)
const MAX_RUN_SECONDS: f32 = 300.0;
/// Runs per session
const RUNS: u32 = 3;

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager,
    input: TickInput,
    last_phase: GamePhase,
}

impl Game {
    fn new(seed: u64, settings: &Settings) -> Self {
        let mut audio = AudioManager::new(Some(Box::new(LogBackend)));
        audio.apply_settings(settings);
        Self {
            state: GameState::new(seed),
            audio,
            input: TickInput {
                autopilot: settings.autopilot,
                ..Default::default()
            },
            last_phase: GamePhase::Start,
        }
    }

    fn press(&mut self, command: Command) {
        self.input.commands.push(command);
    }

    /// Run one frame and hand its events to collaborators
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        tick(&mut self.state, &self.input, dt);
        // One-shot commands are consumed by the tick
        self.input.commands.clear();

        for event in self.state.drain_events() {
            self.audio.handle_event(&event);
        }

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }
    }

    fn shutdown(&mut self) {
        self.state.shutdown();
        for event in self.state.drain_events() {
            self.audio.handle_event(&event);
        }
        self.audio.shutdown();
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn main() {
    env_logger::init();
    log::info!("Lane Runner (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(seed, &settings);
    let max_frames = (MAX_RUN_SECONDS / FRAME_DT) as u32;
    let mut best = 0.0f32;

    for run in 1..=RUNS {
        game.press(if run == 1 { Command::Start } else { Command::Retry });

        let mut frames = 0;
        loop {
            game.update(FRAME_DT);
            frames += 1;
            if game.state.phase != GamePhase::Playing || frames >= max_frames {
                break;
            }
        }

        let state = &game.state;
        best = best.max(state.score);
        println!(
            "Run {}: score {:.0}, coins {}, {:.1}s, {}",
            run,
            state.score,
            state.coins,
            state.elapsed,
            state.death_reason.as_deref().unwrap_or("still running")
        );

        // Let the chaser finish closing in before the next attempt
        for _ in 0..60 {
            game.update(FRAME_DT);
        }

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&game.state.snapshot()) {
                log::trace!("Final snapshot: {}", json);
            }
        }
    }

    println!("Best score: {:.0}", best);
    game.shutdown();
}
