use super::{grid::Grid, piece::ActivePiece};

/// Returns whether `piece`, moved by `(dx, dy)`, fits on `grid`.
///
/// A placement is valid when every filled cell lies inside the grid and none of
/// them lands on a locked cell. The check has no side effects, so it can be
/// probed speculatively (hard drops and wall kicks call it repeatedly).
///
/// # Example
///
/// ```
/// use elemtris_engine::{ActivePiece, Grid, PieceKind, PiecePosition, is_valid};
///
/// let grid = Grid::new(10, 20);
/// let piece = ActivePiece::new(PieceKind::O, PiecePosition::new(0, 0));
///
/// assert!(is_valid(&piece, &grid, 0, 0));
/// assert!(!is_valid(&piece, &grid, -1, 0));
/// assert!(is_valid(&piece, &grid, 8, 18));
/// assert!(!is_valid(&piece, &grid, 9, 18));
/// ```
#[must_use]
pub fn is_valid(piece: &ActivePiece, grid: &Grid, dx: i32, dy: i32) -> bool {
    piece
        .occupied_cells_offset(dx, dy)
        .into_iter()
        .all(|(x, y)| {
            grid.contains(x, y) && {
                #[expect(clippy::cast_sign_loss)]
                let (x, y) = (x as usize, y as usize);
                !grid.is_cell_occupied(x, y)
            }
        })
}

#[cfg(test)]
mod tests {
    use crate::core::{
        element::Element,
        piece::{PieceKind, PiecePosition},
    };

    use super::*;

    #[test]
    fn test_extreme_offsets_are_out_of_bounds() {
        let grid = Grid::new(10, 20);
        let piece = ActivePiece::new(PieceKind::I, PiecePosition::new(3, 0));
        for (dx, dy) in [(i32::MAX, 0), (i32::MIN, 0), (0, i32::MAX), (0, i32::MIN)] {
            assert!(!is_valid(&piece, &grid, dx, dy), "offset ({dx}, {dy})");
        }
        let far = ActivePiece::new(PieceKind::I, PiecePosition::new(i32::MAX, i32::MAX));
        assert!(!is_valid(&far, &grid, 0, 0));
    }

    #[test]
    fn test_empty_grid_spawn_is_valid() {
        let grid = Grid::new(10, 20);
        for kind in PieceKind::ALL {
            let piece = ActivePiece::new(kind, PiecePosition::new(3, 0));
            assert!(is_valid(&piece, &grid, 0, 0), "{kind:?} should fit");
        }
    }

    #[test]
    fn test_out_of_bounds_each_side() {
        let grid = Grid::new(10, 20);
        let line = ActivePiece::new(PieceKind::I, PiecePosition::new(0, 0));
        assert!(!is_valid(&line, &grid, -1, 0), "left");
        assert!(!is_valid(&line, &grid, 0, -1), "top");
        assert!(is_valid(&line, &grid, 6, 0));
        assert!(!is_valid(&line, &grid, 7, 0), "right");
        assert!(is_valid(&line, &grid, 0, 19));
        assert!(!is_valid(&line, &grid, 0, 20), "bottom");
    }

    #[test]
    fn test_empty_bounding_box_cells_may_overlap() {
        // The T's top corners are empty and may sit on locked cells.
        let mut grid = Grid::new(10, 20);
        grid.lock([(0, 0), (2, 0)], Element::Fire);
        let t = ActivePiece::new(PieceKind::T, PiecePosition::new(0, 0));
        assert!(is_valid(&t, &grid, 0, 0));
        assert!(!is_valid(&t, &grid, 1, 0));
    }

    #[test]
    fn test_collides_with_locked_cell() {
        let mut grid = Grid::new(10, 20);
        grid.lock([(4, 5)], Element::Earth);
        let block = ActivePiece::new(PieceKind::O, PiecePosition::new(3, 3));
        assert!(is_valid(&block, &grid, 0, 0));
        assert!(!is_valid(&block, &grid, 0, 1));
        assert!(!is_valid(&block, &grid, 1, 2));
        assert!(is_valid(&block, &grid, 2, 2));
    }

    #[test]
    fn test_is_pure() {
        let grid = Grid::new(10, 20);
        let piece = ActivePiece::new(PieceKind::S, PiecePosition::new(3, 0));
        let (grid_before, piece_before) = (grid.clone(), piece);
        let _ = is_valid(&piece, &grid, 0, 100);
        assert_eq!(grid, grid_before);
        assert_eq!(piece, piece_before);
    }
}
