use serde::Serialize;

use crate::PieceKind;

/// Something that happened during a session operation.
///
/// The session appends events as it runs; presentation layers drain them to
/// trigger sound effects and animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new piece entered the board.
    Spawned { kind: PieceKind },
    /// The falling piece was written into the grid.
    PieceLocked { kind: PieceKind },
    /// One or more full rows were removed.
    LinesCleared { count: usize },
    /// The level increased.
    LevelUp { level: usize },
    /// The falling piece was moved to the hold slot.
    Held { kind: PieceKind },
    /// A spawned piece did not fit.
    GameOver,
}

/// Result of locking a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockOutcome {
    pub kind: PieceKind,
    pub cleared_lines: usize,
    pub score_gained: usize,
    pub level_up: bool,
}

/// What a gravity tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityStep {
    /// The fall interval has not elapsed yet (or the game is over).
    Idle,
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down and was locked.
    Locked(LockOutcome),
}
