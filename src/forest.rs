use log::trace;
use ndarray::Array2;

use crate::error::BuildError;
use crate::location::{try_grid, Dimension, Location};

/// Disjoint-set forest over board cells, one tree per area.
///
/// Only merging is supported. When a cell is vacated the affected trees are rebuilt from scratch by
/// [`FloodFill`](crate::flood::FloodFill), which rewrites parents with [`Self::adopt`] and then calls [`Self::make_root`].
///
/// Entries for unowned cells carry no meaning. For owned cells, `sizes` is nonzero only at roots.
pub(crate) struct AreaForest {
    parents: Array2<Location>,
    sizes: Array2<u64>,
}

impl AreaForest {
    pub(crate) fn with_dims(dims: (Dimension, Dimension)) -> Result<Self, BuildError> {
        Ok(Self {
            parents: try_grid(dims, |location| location)?,
            sizes: try_grid(dims, |_| 0)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn is_root(&self, location: Location) -> bool {
        self.parents[location.as_index()] == location
    }

    #[inline]
    pub(crate) fn size_of(&self, location: Location) -> u64 {
        self.sizes[location.as_index()]
    }

    /// Resolve the root of the area containing `location`, pointing every cell on the way directly at it.
    pub(crate) fn find(&mut self, location: Location) -> Location {
        let mut root = location;
        loop {
            let parent = self.parents[root.as_index()];
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = location;
        while current != root {
            let next = std::mem::replace(&mut self.parents[current.as_index()], root);
            current = next;
        }

        root
    }

    /// Make `location` the root of an area of `size` cells.
    pub(crate) fn make_root(&mut self, location: Location, size: u64) {
        self.parents[location.as_index()] = location;
        self.sizes[location.as_index()] = size;
    }

    /// Point `location` at `root` without touching the size of `root`.
    pub(crate) fn adopt(&mut self, location: Location, root: Location) {
        self.parents[location.as_index()] = root;
        self.sizes[location.as_index()] = 0;
    }

    /// Add the fresh cell `location` to the area rooted at `root`.
    pub(crate) fn attach(&mut self, location: Location, root: Location) {
        self.adopt(location, root);
        self.sizes[root.as_index()] += 1;
    }

    /// Merge the areas rooted at `a` and `b`, returning the surviving root.
    ///
    /// The smaller area is absorbed; on a tie `a` survives.
    pub(crate) fn union(&mut self, a: Location, b: Location) -> Location {
        if a == b {
            return a;
        }

        let (bigger, smaller) = if self.size_of(a) < self.size_of(b) { (b, a) } else { (a, b) };
        let absorbed = self.size_of(smaller);
        self.adopt(smaller, bigger);
        self.sizes[bigger.as_index()] += absorbed;
        trace!("merged area {smaller:?} ({absorbed} cells) into {bigger:?}");

        bigger
    }

    /// Forget the area rooted at `root` and reset the entry of the vacated cell `location`.
    pub(crate) fn dissolve(&mut self, root: Location, location: Location) {
        self.sizes[root.as_index()] = 0;
        self.make_root(location, 0);
    }
}
