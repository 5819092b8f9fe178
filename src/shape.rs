use strum::VariantArray;

use crate::location::{Dimension, Location};

/// The four edge directions of a square grid. Diagonals are never adjacent.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards higher rows.
    Up,
    /// Towards lower rows.
    Down,
    /// Towards lower columns.
    Left,
    /// Towards higher columns.
    Right,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// Stepping off the low edge wraps around to a huge coordinate, which no board contains.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, 1)),
            Self::Down => location.offset_by((0, -1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}

/// Edge neighbours of `location` that lie on a board of size `dims`.
pub(crate) fn neighbors_within(location: Location, dims: (Dimension, Dimension)) -> impl Iterator<Item = Location> {
    SquareStep::VARIANTS.iter()
        .map(move |dir| dir.attempt_from(location))
        .filter(move |neighbor| neighbor.within(dims))
}
