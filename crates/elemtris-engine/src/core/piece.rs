use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    element::Element,
    shape::{MAX_SHAPE_SIZE, ShapeMatrix},
};

/// Upper bound on the number of filled cells of any shape.
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Immutable definition of a playable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    kind: PieceKind,
    shape: ShapeMatrix,
    element: Element,
}

impl PieceDefinition {
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the spawn orientation of the shape.
    #[must_use]
    pub const fn shape(&self) -> ShapeMatrix {
        self.shape
    }

    #[must_use]
    pub const fn element(&self) -> Element {
        self.element
    }
}

static PIECE_CATALOG: [PieceDefinition; PieceKind::LEN] = [
    PieceDefinition {
        kind: PieceKind::I,
        shape: ShapeMatrix::from_bits([[1, 1, 1, 1]]),
        element: Element::Fire,
    },
    PieceDefinition {
        kind: PieceKind::O,
        shape: ShapeMatrix::from_bits([[1, 1], [1, 1]]),
        element: Element::Water,
    },
    PieceDefinition {
        kind: PieceKind::T,
        shape: ShapeMatrix::from_bits([[0, 1, 0], [1, 1, 1]]),
        element: Element::Earth,
    },
    PieceDefinition {
        kind: PieceKind::S,
        shape: ShapeMatrix::from_bits([[1, 1, 0], [0, 1, 1]]),
        element: Element::Air,
    },
];

/// Returns every playable piece definition, in catalog order.
///
/// Random piece selection is uniform over this slice.
#[must_use]
pub fn get_all_pieces() -> &'static [PieceDefinition; PieceKind::LEN] {
    &PIECE_CATALOG
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// Straight line of four cells.
    I = 0,
    /// 2×2 block.
    O = 1,
    /// T-shape, three cells wide.
    T = 2,
    /// S-shape.
    S = 3,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (4).
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::I, Self::O, Self::T, Self::S];

    #[must_use]
    pub fn definition(self) -> &'static PieceDefinition {
        &PIECE_CATALOG[self as usize]
    }

    #[must_use]
    pub fn shape(self) -> ShapeMatrix {
        self.definition().shape
    }

    #[must_use]
    pub fn element(self) -> Element {
        self.definition().element
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use elemtris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::S.as_char(), 'S');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            _ => None,
        }
    }
}

/// Board coordinates of a shape's top-left bounding box corner.
///
/// `x` is the column and `y` the row, with row 0 at the top. Coordinates are
/// signed because legality probes may step past the left or top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves the position by `(dx, dy)`, clamping at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// The piece currently under player control.
///
/// Holds a value copy of its definition's shape, since rotation replaces it.
/// None of the transforms here check legality; the session does that before
/// committing.
///
/// # Example
///
/// ```
/// use elemtris_engine::{ActivePiece, PieceKind, PiecePosition};
///
/// let piece = ActivePiece::new(PieceKind::T, PiecePosition::new(3, 0));
/// let cells: Vec<_> = piece.occupied_cells().into_iter().collect();
/// assert_eq!(cells, vec![(4, 0), (3, 1), (4, 1), (5, 1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivePiece {
    kind: PieceKind,
    element: Element,
    shape: ShapeMatrix,
    position: PiecePosition,
}

impl ActivePiece {
    #[must_use]
    pub fn new(kind: PieceKind, position: PiecePosition) -> Self {
        let def = kind.definition();
        Self {
            kind,
            element: def.element,
            shape: def.shape,
            position,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn element(&self) -> Element {
        self.element
    }

    #[must_use]
    pub const fn shape(&self) -> ShapeMatrix {
        self.shape
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the absolute board coordinates of every filled cell.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), MAX_PIECE_CELLS> {
        self.occupied_cells_offset(0, 0)
    }

    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub(crate) fn occupied_cells_offset(
        &self,
        dx: i32,
        dy: i32,
    ) -> ArrayVec<(i32, i32), MAX_PIECE_CELLS> {
        let origin = self.position.offset(dx, dy);
        self.shape
            .filled_cells()
            .map(|(cx, cy)| {
                (
                    origin.x.saturating_add(cx as i32),
                    origin.y.saturating_add(cy as i32),
                )
            })
            .collect()
    }

    /// Moves the origin by `(dx, dy)` without any legality check.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut piece = *self;
        piece.translate(dx, dy);
        piece
    }

    /// Returns the shape this piece would have after a clockwise rotation.
    #[must_use]
    pub const fn rotate_clockwise(&self) -> ShapeMatrix {
        self.shape.rotated_clockwise()
    }

    /// Returns a copy of this piece rotated clockwise around its origin.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.rotate_clockwise(),
            ..*self
        }
    }
}
