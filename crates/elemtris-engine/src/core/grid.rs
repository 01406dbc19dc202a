use std::fmt;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeSeq as _};

use super::element::Element;

/// A single row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GridRow {
    cells: Box<[Option<Element>]>,
}

impl GridRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![None; width].into_boxed_slice(),
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

/// Matrix of locked cells.
///
/// Row 0 is the top of the board. Every cell is either empty or remembers the
/// [`Element`] of the piece that was locked into it.
///
/// The dimensions never change after construction: clearing rows removes them
/// and inserts the same number of empty rows at the top.
///
/// Coordinates passed to the cell accessors must lie inside the grid; callers
/// are expected to have checked them (see [`is_valid`](super::collision::is_valid)).
/// Out-of-bounds access panics.
///
/// # Example
///
/// ```
/// use elemtris_engine::{Element, Grid};
///
/// let mut grid = Grid::new(4, 3);
/// grid.lock([(0, 2), (1, 2), (2, 2), (3, 2)], Element::Fire);
///
/// assert_eq!(grid.find_full_rows(), vec![2]);
/// assert_eq!(grid.clear_rows(&[2]), 1);
/// assert!(grid.find_full_rows().is_empty());
/// assert_eq!(grid.height(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<GridRow>,
}

impl Grid {
    /// Creates a grid of `width` columns and `height` rows, all empty.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty");
        Self {
            width,
            rows: vec![GridRow::empty(width); height],
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the signed coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        usize::try_from(x).is_ok_and(|x| x < self.width)
            && usize::try_from(y).is_ok_and(|y| y < self.height())
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Element>]> + '_ {
        self.rows.iter().map(|row| &*row.cells)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Element> {
        assert!(
            x < self.width && y < self.height(),
            "cell ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height()
        );
        self.rows[y].cells[x]
    }

    #[must_use]
    pub fn is_cell_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some()
    }

    /// Writes `element` into every listed cell.
    ///
    /// # Panics
    ///
    /// Panics if any cell lies outside the grid.
    pub fn lock<I>(&mut self, cells: I, element: Element)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (x, y) in cells {
            assert!(
                self.contains(x, y),
                "cannot lock ({x}, {y}) outside {}x{} grid",
                self.width,
                self.height()
            );
            #[expect(clippy::cast_sign_loss)]
            let (x, y) = (x as usize, y as usize);
            self.rows[y].cells[x] = Some(element);
        }
    }

    /// Returns the indices of every completely filled row, ascending.
    #[must_use]
    pub fn find_full_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(y, row)| row.is_filled().then_some(y))
            .collect()
    }

    /// Removes the given rows and inserts as many empty rows at the top.
    ///
    /// Remaining rows keep their contents and relative order. Indices that
    /// are out of range or repeated are ignored.
    ///
    /// Returns the number of rows removed.
    pub fn clear_rows(&mut self, indices: &[usize]) -> usize {
        let height = self.height();
        let mut y = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&y);
            y += 1;
            keep
        });
        let cleared = height - self.rows.len();
        let mut rows = vec![GridRow::empty(self.width); cleared];
        rows.append(&mut self.rows);
        self.rows = rows;
        cleared
    }

    /// Number of occupied cells on the whole grid.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.iter().filter(|c| c.is_some()).count())
            .sum()
    }
}

fn row_to_string(cells: &[Option<Element>]) -> String {
    cells
        .iter()
        .map(|cell| cell.map_or('.', Element::as_char))
        .collect()
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: ["..........", "....EE....", "FFFF.AAWW."]
        let mut seq = serializer.serialize_seq(Some(self.height()))?;
        for row in self.rows() {
            seq.serialize_element(&row_to_string(row))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let Some(width) = lines.first().map(|l| l.chars().count()) else {
            return Err(serde::de::Error::custom("grid must have at least one row"));
        };
        if width == 0 {
            return Err(serde::de::Error::custom("grid rows must not be empty"));
        }

        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let cells = line
                .chars()
                .map(|c| match c {
                    '.' => Ok(None),
                    c => Element::from_char(c).map(Some).ok_or_else(|| {
                        <D::Error as serde::de::Error>::custom(format!(
                            "invalid cell '{c}' at row {y}"
                        ))
                    }),
                })
                .collect::<Result<Box<[_]>, D::Error>>()?;
            if cells.len() != width {
                return Err(serde::de::Error::custom(format!(
                    "row {y} has {} cells, expected {width}",
                    cells.len()
                )));
            }
            rows.push(GridRow { cells });
        }
        Ok(Grid { width, rows })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&row_to_string(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        serde_json::from_value(serde_json::json!(rows)).unwrap()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.find_full_rows().is_empty());
    }

    #[test]
    fn test_contains_edges() {
        let grid = Grid::new(10, 20);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(9, 19));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, -1));
        assert!(!grid.contains(10, 0));
        assert!(!grid.contains(0, 20));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_cell_out_of_bounds_panics() {
        let grid = Grid::new(4, 4);
        let _ = grid.is_cell_occupied(4, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_lock_out_of_bounds_panics() {
        let mut grid = Grid::new(4, 4);
        grid.lock([(0, -1)], Element::Air);
    }

    #[test]
    fn test_lock_writes_element() {
        let mut grid = Grid::new(4, 4);
        grid.lock([(1, 2), (2, 2)], Element::Water);
        assert_eq!(grid.cell(1, 2), Some(Element::Water));
        assert_eq!(grid.cell(2, 2), Some(Element::Water));
        assert!(!grid.is_cell_occupied(0, 2));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_find_full_rows_ascending() {
        let grid = grid(&["....", "FFFF", "F.FF", "WWEE", "AAAA"]);
        assert_eq!(grid.find_full_rows(), vec![1, 3, 4]);
    }

    #[test]
    fn test_clear_rows_shifts_down_and_preserves_order() {
        let mut g = grid(&["F...", "EEEE", ".W..", "AAAA", "..E."]);
        let cleared = g.clear_rows(&[1, 3]);
        assert_eq!(cleared, 2);
        assert_eq!(g, grid(&["....", "....", "F...", ".W..", "..E."]));
    }

    #[test]
    fn test_clear_rows_ignores_bad_indices() {
        let mut g = grid(&["....", "FFFF"]);
        assert_eq!(g.clear_rows(&[1, 1, 7]), 1);
        assert_eq!(g, grid(&["....", "...."]));
    }

    #[test]
    fn test_clear_no_rows_is_noop() {
        let mut g = grid(&["F...", ".W.."]);
        let before = g.clone();
        assert_eq!(g.clear_rows(&[]), 0);
        assert_eq!(g, before);
    }

    #[test]
    fn test_row_count_invariant_after_full_clear() {
        let mut g = grid(&["FFFF", "WWWW", "EEEE"]);
        let full = g.find_full_rows();
        assert_eq!(g.clear_rows(&full), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.occupied_count(), 0);
    }

    #[test]
    fn test_serialize_roundtrip_text() {
        let g = grid(&["..E.", "FWEA"]);
        assert_eq!(serde_json::to_string(&g).unwrap(), r#"["..E.","FWEA"]"#);
        assert_eq!(g.to_string(), "..E.\nFWEA");
    }

    #[test]
    fn test_deserialize_rejects_ragged_rows() {
        let result: Result<Grid, _> = serde_json::from_str(r#"["....", "..."]"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("row 1"), "unexpected error: {err}");
    }

    #[test]
    fn test_deserialize_rejects_unknown_cell() {
        let result: Result<Grid, _> = serde_json::from_str(r#"["..X."]"#);
        assert!(result.unwrap_err().to_string().contains("invalid cell"));
    }
}
