//! Game engine logic and state management.
//!
//! This module binds the core data structures into the rules of the game:
//!
//! - [`GameSession`] - The rule engine (falling piece, grid, gravity, hold, scoring)
//! - [`GameStats`] - Score, lines cleared, level and fall interval
//! - [`PieceQueue`] - Uniform random next piece and hold slot
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameConfig`] - Board layout and spawn point
//! - [`GameSnapshot`] - Owned copy of a session for rendering
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`GameConfig`]
//! 2. Call [`GameSession::gravity_tick`] every frame with the elapsed time
//! 3. Forward player input to the move, rotate, hard drop and hold commands
//! 4. Locks clear full rows, score them and spawn the next piece
//! 5. Repeat until a spawned piece does not fit (game over)
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use elemtris_engine::{GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::default()).unwrap();
//!
//! session.try_move(-1, 0);
//! session.try_rotate();
//! session.gravity_tick(Duration::from_millis(16));
//!
//! let outcome = session.hard_drop().unwrap();
//! assert_eq!(outcome.cleared_lines, 0);
//!
//! for event in session.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub use self::{
    game_config::*, game_event::*, game_session::*, game_stats::*, piece_queue::*, snapshot::*,
};

mod game_config;
mod game_event;
mod game_session;
mod game_stats;
mod piece_queue;
mod snapshot;
