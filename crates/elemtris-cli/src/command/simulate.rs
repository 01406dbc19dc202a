use std::{cmp::Ordering, path::PathBuf, time::Duration};

use anyhow::Context;
use elemtris_engine::{GameConfig, GameEvent, GameSession, GameSnapshot, GameStats, PieceSeed};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::util;

const DEFAULT_MAX_FRAMES: u64 = 36_000;
const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[arg(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Game config JSON file (defaults if omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this many frames even if the game is not over
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub(super) max_frames: u64,
    /// Simulated time per frame in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub(super) frame_ms: u64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            seed: None,
            config: None,
            max_frames: DEFAULT_MAX_FRAMES,
            frame_ms: DEFAULT_FRAME_MS,
            output: None,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = util::load_game_config(arg.config.as_deref())?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let report = simulate(
        config,
        seed,
        arg.max_frames,
        Duration::from_millis(arg.frame_ms),
    )?;
    util::save_json(&report, arg.output.as_deref())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    frames: u64,
    frame_ms: u64,
    play_time_ms: u64,
    stats: GameStats,
    events: EventCounts,
    snapshot: GameSnapshot,
}

/// Number of events of each kind seen during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
struct EventCounts {
    spawned: usize,
    locked: usize,
    line_clears: usize,
    level_ups: usize,
    holds: usize,
    game_over: bool,
}

impl EventCounts {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Spawned { .. } => self.spawned += 1,
            GameEvent::PieceLocked { .. } => self.locked += 1,
            GameEvent::LinesCleared { .. } => self.line_clears += 1,
            GameEvent::LevelUp { .. } => self.level_ups += 1,
            GameEvent::Held { .. } => self.holds += 1,
            GameEvent::GameOver => self.game_over = true,
        }
    }
}

fn simulate(
    config: GameConfig,
    seed: PieceSeed,
    max_frames: u64,
    frame: Duration,
) -> anyhow::Result<SimulationReport> {
    let mut session = GameSession::with_seed(config, seed).context("Invalid game config")?;
    let mut bot = RandomBot::new(seed);
    let mut events = EventCounts::default();

    let mut frames = 0;
    while frames < max_frames && !session.is_game_over() {
        frames += 1;
        match bot.next_input(&session) {
            BotInput::Hold => {
                // A rejected hold just leaves the bot planning again next frame.
                let _ = session.hold();
            }
            BotInput::Rotate => {
                session.try_rotate();
            }
            BotInput::Move(dx) => {
                if !session.try_move(dx, 0) {
                    bot.stop_at_current_column(&session);
                }
            }
            BotInput::HardDrop => {
                session.hard_drop();
                bot.forget_plan();
            }
        }
        if session.gravity_tick(frame).is_locked() {
            bot.forget_plan();
        }
        for event in session.drain_events() {
            events.record(event);
        }
    }

    Ok(SimulationReport {
        seed,
        frames,
        frame_ms: u64::try_from(frame.as_millis()).unwrap_or(u64::MAX),
        play_time_ms: u64::try_from(session.play_time().as_millis()).unwrap_or(u64::MAX),
        stats: session.stats().clone(),
        events,
        snapshot: session.snapshot(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BotInput {
    Hold,
    Rotate,
    Move(i32),
    HardDrop,
}

/// Where the bot wants the current piece to end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
    rotations: usize,
    target_x: i32,
}

/// Plays by picking a random orientation and column for every piece.
///
/// Issues one input per frame: rotations first, then single-column moves
/// toward the target, then a hard drop.
#[derive(Debug, Clone)]
struct RandomBot {
    rng: Pcg32,
    plan: Option<Plan>,
}

impl RandomBot {
    const HOLD_ONE_IN: u32 = 8;

    fn new(seed: PieceSeed) -> Self {
        // Reversed so the bot does not replay the piece generator's stream.
        let mut bytes = seed.to_bytes();
        bytes.reverse();
        Self {
            rng: Pcg32::from_seed(bytes),
            plan: None,
        }
    }

    fn next_input(&mut self, session: &GameSession) -> BotInput {
        let plan = match self.plan {
            Some(plan) => plan,
            None => {
                if !session.is_hold_used() && self.rng.random_ratio(1, Self::HOLD_ONE_IN) {
                    return BotInput::Hold;
                }
                let columns = i32::try_from(session.grid().width()).unwrap_or(i32::MAX);
                let plan = Plan {
                    rotations: self.rng.random_range(0..4),
                    target_x: self.rng.random_range(0..columns),
                };
                self.plan = Some(plan);
                plan
            }
        };

        if plan.rotations > 0 {
            self.plan = Some(Plan {
                rotations: plan.rotations - 1,
                ..plan
            });
            return BotInput::Rotate;
        }
        let x = session.active_piece().position().x;
        match plan.target_x.cmp(&x) {
            Ordering::Less => BotInput::Move(-1),
            Ordering::Greater => BotInput::Move(1),
            Ordering::Equal => BotInput::HardDrop,
        }
    }

    /// Gives up on the target column after a blocked move.
    fn stop_at_current_column(&mut self, session: &GameSession) {
        if let Some(plan) = &mut self.plan {
            plan.target_x = session.active_piece().position().x;
        }
    }

    fn forget_plan(&mut self) {
        self.plan = None;
    }
}
