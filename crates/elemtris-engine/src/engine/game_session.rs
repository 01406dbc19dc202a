use std::time::Duration;

use crate::{
    ConfigError, HoldError, PieceCollisionError,
    core::{
        collision::is_valid,
        grid::Grid,
        piece::{ActivePiece, PieceKind},
    },
};

use super::{
    GameConfig, GameEvent, GameSnapshot, GameStats, GravityStep, LockOutcome, PieceQueue,
    PieceSeed,
};

/// Column offsets tried, in order, when rotating: in place, then one step left, then right.
const WALL_KICKS: [i32; 3] = [0, -1, 1];

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// The rule engine of a single game.
///
/// Owns the grid, the falling piece, the next/hold queue and the statistics,
/// and applies every rule that ties them together. All commands run to
/// completion synchronously. Commands that depend on a legality check either
/// commit fully or leave the session untouched.
///
/// Once a spawned piece does not fit the session enters
/// [`SessionState::GameOver`]; from then on every command is a no-op until
/// [`Self::reset`].
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    active: ActivePiece,
    queue: PieceQueue,
    stats: GameStats,
    hold_used: bool,
    session_state: SessionState,
    fall_timer: Duration,
    play_time: Duration,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a game with a random piece sequence.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_queue(config, PieceQueue::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_queue(config, PieceQueue::with_seed(seed))
    }

    fn with_queue(config: GameConfig, queue: PieceQueue) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut this = Self {
            config,
            grid: Grid::new(config.columns(), config.rows()),
            active: ActivePiece::new(queue.peek_next(), config.spawn),
            queue,
            stats: GameStats::new(),
            hold_used: false,
            session_state: SessionState::Playing,
            fall_timer: Duration::ZERO,
            play_time: Duration::ZERO,
            events: Vec::new(),
        };
        this.spawn_next();
        Ok(this)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek_next()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.queue.held_piece()
    }

    /// Returns whether hold was already used since the last spawn.
    #[must_use]
    pub fn is_hold_used(&self) -> bool {
        self.hold_used
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.stats.fall_interval()
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    /// Total time passed to [`Self::gravity_tick`] while playing.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Returns the active piece moved down as far as it can go.
    #[must_use]
    pub fn simulate_drop_position(&self) -> ActivePiece {
        let mut dy = 0;
        while is_valid(&self.active, &self.grid, 0, dy + 1) {
            dy += 1;
        }
        self.active.translated(0, dy)
    }

    /// Removes and returns the events recorded since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            active: self.active,
            ghost: self.simulate_drop_position(),
            next: self.next_piece(),
            held: self.held_piece(),
            hold_used: self.hold_used,
            stats: self.stats.clone(),
            level: self.level(),
            fall_interval_ms: u64::try_from(self.fall_interval().as_millis())
                .unwrap_or(u64::MAX),
            game_over: self.is_game_over(),
        }
    }

    /// Replaces the falling piece if it fits on the grid.
    pub fn set_active_piece(&mut self, piece: ActivePiece) -> Result<(), PieceCollisionError> {
        if self.is_game_over() || !is_valid(&piece, &self.grid, 0, 0) {
            return Err(PieceCollisionError);
        }
        self.active = piece;
        Ok(())
    }

    /// Promotes the next piece to the falling piece at the spawn point.
    ///
    /// Draws a new next piece and re-enables hold. Returns `false`, and ends
    /// the game, when the spawned piece does not fit. Nothing else is touched
    /// in that case.
    pub fn spawn_next(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let kind = self.queue.pop_next();
        self.active = ActivePiece::new(kind, self.config.spawn);
        self.hold_used = false;
        self.events.push(GameEvent::Spawned { kind });

        if !is_valid(&self.active, &self.grid, 0, 0) {
            self.session_state = SessionState::GameOver;
            self.events.push(GameEvent::GameOver);
            return false;
        }
        true
    }

    /// Moves the falling piece by `(dx, dy)` if the destination is free.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_game_over() || !is_valid(&self.active, &self.grid, dx, dy) {
            return false;
        }
        self.active.translate(dx, dy);
        true
    }

    /// Rotates the falling piece clockwise, kicking one column left or right if needed.
    ///
    /// If neither the rotated shape in place nor either kick fits, the piece is
    /// left exactly as it was.
    pub fn try_rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let rotated = self.active.rotated_clockwise();
        let Some(dx) = WALL_KICKS
            .into_iter()
            .find(|&dx| is_valid(&rotated, &self.grid, dx, 0))
        else {
            return false;
        };
        self.active = rotated.translated(dx, 0);
        true
    }

    /// Drops the falling piece to the bottom and locks it.
    ///
    /// Returns `None` if the game is already over.
    pub fn hard_drop(&mut self) -> Option<LockOutcome> {
        if self.is_game_over() {
            return None;
        }
        while self.try_move(0, 1) {}
        self.lock()
    }

    /// Advances gravity by `elapsed`.
    ///
    /// Once the accumulated time exceeds the fall interval the piece moves one
    /// row down, or locks if it cannot. At most one row per call, however long
    /// `elapsed` is.
    pub fn gravity_tick(&mut self, elapsed: Duration) -> GravityStep {
        if self.is_game_over() {
            return GravityStep::Idle;
        }
        self.play_time = self.play_time.saturating_add(elapsed);
        self.fall_timer = self.fall_timer.saturating_add(elapsed);
        if self.fall_timer <= self.fall_interval() {
            return GravityStep::Idle;
        }
        self.fall_timer = Duration::ZERO;
        if self.try_move(0, 1) {
            return GravityStep::Fell;
        }
        self.lock().map_or(GravityStep::Idle, GravityStep::Locked)
    }

    /// Writes the falling piece into the grid, clears full rows, scores them
    /// and spawns the next piece.
    ///
    /// Returns `None` if the game is already over.
    pub fn lock(&mut self) -> Option<LockOutcome> {
        if self.is_game_over() {
            return None;
        }
        let kind = self.active.kind();
        let level_before = self.stats.level();

        self.grid.lock(self.active.occupied_cells(), self.active.element());
        self.events.push(GameEvent::PieceLocked { kind });

        let full_rows = self.grid.find_full_rows();
        let cleared_lines = self.grid.clear_rows(&full_rows);
        let score_gained = self.stats.complete_piece_drop(cleared_lines);
        if cleared_lines > 0 {
            self.events.push(GameEvent::LinesCleared {
                count: cleared_lines,
            });
        }
        let level_up = self.stats.level() > level_before;
        if level_up {
            self.events.push(GameEvent::LevelUp {
                level: self.stats.level(),
            });
        }

        self.spawn_next();
        Some(LockOutcome {
            kind,
            cleared_lines,
            score_gained,
            level_up,
        })
    }

    /// Moves the falling piece to the hold slot.
    ///
    /// With an empty hold slot the next piece spawns; otherwise the held piece
    /// comes back at the spawn point. Allowed once per spawned piece.
    pub fn hold(&mut self) -> Result<(), HoldError> {
        if self.is_game_over() {
            return Err(HoldError::GameOver);
        }
        if self.hold_used {
            return Err(HoldError::AlreadyUsed);
        }

        let current = self.active.kind();
        if let Some(held) = self.queue.held_piece() {
            let swapped = ActivePiece::new(held, self.config.spawn);
            if !is_valid(&swapped, &self.grid, 0, 0) {
                return Err(HoldError::PieceCollision(PieceCollisionError));
            }
            self.queue.swap_hold(current);
            self.active = swapped;
            self.events.push(GameEvent::Held { kind: current });
        } else {
            self.queue.swap_hold(current);
            self.events.push(GameEvent::Held { kind: current });
            self.spawn_next();
        }
        self.hold_used = true;
        Ok(())
    }

    /// Starts over with an empty grid, zeroed statistics and an empty hold slot.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.columns(), self.config.rows());
        self.queue.reset();
        self.stats = GameStats::new();
        self.hold_used = false;
        self.session_state = SessionState::Playing;
        self.fall_timer = Duration::ZERO;
        self.play_time = Duration::ZERO;
        self.events.clear();
        self.spawn_next();
    }
}
