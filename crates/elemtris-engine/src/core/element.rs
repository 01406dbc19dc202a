use serde::{Deserialize, Serialize};

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The element a piece belongs to.
///
/// Every piece in the catalog is tagged with exactly one element, and locked
/// cells on the grid remember the element of the piece that filled them.
/// Presentation layers resolve the element to a color with [`Element::color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Element {
    /// Fire (red).
    Fire = 0,
    /// Water (blue).
    Water = 1,
    /// Earth (brown).
    Earth = 2,
    /// Air (white).
    Air = 3,
}

impl Element {
    /// Number of elements (4).
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::Fire, Self::Water, Self::Earth, Self::Air];

    /// Returns the display color of this element.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Element::Fire => Rgb(255, 0, 0),
            Element::Water => Rgb(0, 0, 255),
            Element::Earth => Rgb(139, 69, 19),
            Element::Air => Rgb(255, 255, 255),
        }
    }

    /// Returns the palette index of this element (0-3).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single character representation of this element.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Element::Fire => 'F',
            Element::Water => 'W',
            Element::Earth => 'E',
            Element::Air => 'A',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'F' => Some(Element::Fire),
            'W' => Some(Element::Water),
            'E' => Some(Element::Earth),
            'A' => Some(Element::Air),
            _ => None,
        }
    }

    /// Looks up an element by palette index.
    ///
    /// # Examples
    ///
    /// ```
    /// use elemtris_engine::Element;
    ///
    /// assert_eq!(Element::from_index(2), Some(Element::Earth));
    /// assert_eq!(Element::from_index(4), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Element::Fire),
            1 => Some(Element::Water),
            2 => Some(Element::Earth),
            3 => Some(Element::Air),
            _ => None,
        }
    }
}
