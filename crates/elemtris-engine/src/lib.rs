pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum HoldError {
    #[display("piece colliding when holding piece")]
    PieceCollision(PieceCollisionError),
    #[display("hold already used in this turn")]
    AlreadyUsed,
    #[display("cannot hold after game over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("block size must be greater than zero")]
    ZeroBlockSize,
    #[display("layout yields an empty board ({columns}x{rows})")]
    EmptyBoard { columns: usize, rows: usize },
    #[display("spawn point ({x}, {y}) is outside the {columns}x{rows} board")]
    SpawnOutOfBounds {
        x: i32,
        y: i32,
        columns: usize,
        rows: usize,
    },
}
