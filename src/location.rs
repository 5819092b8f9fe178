use std::num::NonZero;

use itertools::Itertools;
use ndarray::{Array2, Ix};

use crate::builder::BuilderInvalidReason;
use crate::error::BuildError;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board: column first, then row. Row 0 is the bottom row.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

/// Allocate a `height` × `width` grid, reserving storage fallibly so an oversized board is reported instead of aborting.
pub(crate) fn try_grid<T>(dims: (Dimension, Dimension), mut init: impl FnMut(Location) -> T) -> Result<Array2<T>, BuildError> {
    let (width, height) = (dims.0.get(), dims.1.get());
    let len = width.checked_mul(height).ok_or_else(|| BuildError::Invalid(vec![BuilderInvalidReason::BoardTooLarge]))?;

    let mut cells = Vec::new();
    cells.try_reserve_exact(len)?;
    cells.extend((0..height).cartesian_product(0..width).map(|(y, x)| init(Location(x, y))));

    Ok(Array2::from_shape_vec((height, width), cells)?)
}
