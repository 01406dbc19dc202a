use serde::Serialize;

use crate::{ActivePiece, Element, GameStats, Grid, PieceKind};

/// What a renderer should draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, derive_more::IsVariant)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum RenderCell {
    #[default]
    Empty,
    /// Drop preview of the falling piece.
    Ghost,
    /// Cell of the falling piece.
    Active(Element),
    /// Cell locked into the grid.
    Locked(Element),
}

/// Owned, read-only copy of a session for presentation layers.
///
/// Taking a snapshot never borrows the session, so a renderer on another
/// thread can hold it while the simulation keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: ActivePiece,
    /// Where the active piece would land on a hard drop.
    pub ghost: ActivePiece,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub hold_used: bool,
    pub stats: GameStats,
    pub level: usize,
    pub fall_interval_ms: u64,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Composes the grid, the ghost and the active piece into one cell matrix.
    ///
    /// The active piece is drawn over the ghost, which is drawn over empty
    /// cells only. Piece cells outside the grid are skipped.
    #[must_use]
    pub fn render_cells(&self) -> Vec<Vec<RenderCell>> {
        let mut cells: Vec<Vec<RenderCell>> = self
            .grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(RenderCell::Empty, RenderCell::Locked))
                    .collect()
            })
            .collect();

        let mut paint = |piece: &ActivePiece, cell: RenderCell, only_empty: bool| {
            for (x, y) in piece.occupied_cells() {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                let Some(target) = cells.get_mut(y).and_then(|row| row.get_mut(x)) else {
                    continue;
                };
                if !only_empty || target.is_empty() {
                    *target = cell;
                }
            }
        };
        if !self.game_over {
            paint(&self.ghost, RenderCell::Ghost, true);
        }
        paint(&self.active, RenderCell::Active(self.active.element()), false);
        cells
    }
}
