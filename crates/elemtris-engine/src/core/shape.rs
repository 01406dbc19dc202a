use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq as _};

/// Largest bounding box side a shape may have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Occupancy matrix of a piece inside its dense bounding box.
///
/// The matrix is stored inline in a fixed 4×4 array so that it can be copied by
/// value; only the top-left `rows × cols` region is meaningful and everything
/// outside of it is always `false`.
///
/// # Example
///
/// ```
/// use elemtris_engine::ShapeMatrix;
///
/// let s = ShapeMatrix::from_bits([[1, 1, 0], [0, 1, 1]]);
/// let rotated = s.rotated_clockwise();
/// assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Builds a shape from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than [`MAX_SHAPE_SIZE`] on either side.
    #[must_use]
    pub const fn from_bits<const R: usize, const C: usize>(bits: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= MAX_SHAPE_SIZE);
        assert!(C > 0 && C <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < R {
            let mut x = 0;
            while x < C {
                cells[y][x] = bits[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let (rows, cols) = (R as u8, C as u8);
        Self { rows, cols, cells }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Returns whether the cell at column `x`, row `y` of the bounding box is filled.
    ///
    /// Cells outside the bounding box are reported as empty.
    #[must_use]
    pub const fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.cols() && y < self.rows() && self.cells[y][x]
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Iterates over the `(x, y)` offsets of every filled cell, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |y| {
            (0..self.cols()).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    /// Iterates over the rows of the bounding box.
    pub fn row_cells(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.rows()]
            .iter()
            .map(|row| &row[..self.cols()])
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// The bounding box is transposed and each resulting row is reversed, so an
    /// `r × c` matrix becomes `c × r`. The rotation is applied to the dense
    /// bounding box as-is; no pivot or re-centering is involved.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < cols {
            let mut x = 0;
            while x < rows {
                cells[y][x] = self.cells[rows - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

impl Serialize for ShapeMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: ["#.", "##", ".#"]
        let mut seq = serializer.serialize_seq(Some(self.rows()))?;
        for row in self.row_cells() {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            seq.serialize_element(&line)?;
        }
        seq.end()
    }
}

impl fmt::Display for ShapeMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.row_cells().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: ShapeMatrix = ShapeMatrix::from_bits([[0, 1, 0], [1, 1, 1]]);

    #[test]
    fn test_from_bits_dimensions() {
        let line = ShapeMatrix::from_bits([[1, 1, 1, 1]]);
        assert_eq!(line.rows(), 1);
        assert_eq!(line.cols(), 4);
        assert_eq!(line.filled_count(), 4);
        assert!(!line.is_filled(0, 1), "outside bounding box must be empty");
    }

    #[test]
    fn test_rotate_t_clockwise_points_right() {
        let rotated = T.rotated_clockwise();
        assert_eq!(rotated, ShapeMatrix::from_bits([[1, 0], [1, 1], [1, 0]]));
        assert_eq!(rotated.to_string(), "#.\n##\n#.");
    }

    #[test]
    fn test_rotate_line_becomes_column() {
        let line = ShapeMatrix::from_bits([[1, 1, 1, 1]]);
        let rotated = line.rotated_clockwise();
        assert_eq!(rotated, ShapeMatrix::from_bits([[1], [1], [1], [1]]));
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let mut shape = T;
        for _ in 0..4 {
            shape = shape.rotated_clockwise();
        }
        assert_eq!(shape, T);
    }

    #[test]
    fn test_rotation_preserves_filled_count() {
        let s = ShapeMatrix::from_bits([[1, 1, 0], [0, 1, 1]]);
        let mut shape = s;
        for _ in 0..4 {
            shape = shape.rotated_clockwise();
            assert_eq!(shape.filled_count(), s.filled_count());
        }
    }

    #[test]
    fn test_filled_cells_row_major() {
        let cells: Vec<_> = T.filled_cells().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_serialize_as_rows() {
        let json = serde_json::to_string(&T).unwrap();
        assert_eq!(json, "[\".#.\",\"###\"]");
    }
}
