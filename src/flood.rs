use log::trace;
use ndarray::Array2;

use crate::cell::Cell;
use crate::error::BuildError;
use crate::forest::AreaForest;
use crate::location::{try_grid, Dimension, Location};
use crate::player::PlayerId;
use crate::shape::neighbors_within;

/// Scratch state for rebuilding areas after a cell is vacated.
///
/// Both the marker grid and the stack are empty between calls to [`Self::split_around`].
pub(crate) struct FloodFill {
    dims: (Dimension, Dimension),
    visited: Array2<bool>,
    stack: Vec<Location>,
}

impl FloodFill {
    pub(crate) fn with_dims(dims: (Dimension, Dimension)) -> Result<Self, BuildError> {
        let visited = try_grid(dims, |_| false)?;
        let mut stack = Vec::new();
        stack.try_reserve_exact(visited.len())?;

        Ok(Self { dims, visited, stack })
    }

    /// Rebuild the areas of `player` that touched the just-vacated `location`.
    ///
    /// Every same-owner neighbour not reached by an earlier fill seeds a new area rooted at itself.
    /// Returns how many areas were created.
    pub(crate) fn split_around(&mut self, cells: &Array2<Cell>, forest: &mut AreaForest, location: Location, player: PlayerId) -> u32 {
        let mut created = 0;
        for seed in neighbors_within(location, self.dims) {
            if !cells[seed.as_index()].is_owned_by(player) || self.visited[seed.as_index()] {
                continue;
            }

            let size = self.relabel(cells, forest, seed, player);
            forest.make_root(seed, size);
            trace!("rebuilt area {seed:?} of player {player} with {size} cells");
            created += 1;
        }

        self.clear_from(location);
        created
    }

    /// Point every cell of `player` reachable from `seed` at `seed`, returning the number of cells visited.
    fn relabel(&mut self, cells: &Array2<Cell>, forest: &mut AreaForest, seed: Location, player: PlayerId) -> u64 {
        let mut count = 0;
        self.visited[seed.as_index()] = true;
        self.stack.push(seed);

        while let Some(current) = self.stack.pop() {
            count += 1;
            forest.adopt(current, seed);
            for neighbor in neighbors_within(current, self.dims) {
                if cells[neighbor.as_index()].is_owned_by(player) && !self.visited[neighbor.as_index()] {
                    self.visited[neighbor.as_index()] = true;
                    self.stack.push(neighbor);
                }
            }
        }

        count
    }

    /// Unmark everything marked by fills around `location`, walking the marked cells the same way they were found.
    fn clear_from(&mut self, location: Location) {
        self.visited[location.as_index()] = false;
        self.stack.push(location);

        while let Some(current) = self.stack.pop() {
            for neighbor in neighbors_within(current, self.dims) {
                if self.visited[neighbor.as_index()] {
                    self.visited[neighbor.as_index()] = false;
                    self.stack.push(neighbor);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_clear(&self) -> bool {
        self.stack.is_empty() && self.visited.iter().all(|marked| !marked)
    }
}
