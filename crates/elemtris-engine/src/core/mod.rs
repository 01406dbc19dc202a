pub use self::{collision::*, element::*, grid::*, piece::*, shape::*};

pub(crate) mod collision;
pub(crate) mod element;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;
