use crate::board::Board;
use crate::cell::Cell;
use crate::error::MoveError;
use crate::location::{Coord, Location};
use crate::player::PlayerId;

impl Board {
    /// Claim the empty cell at `(x, y)` for `player`.
    ///
    /// Rejected if the player or cell does not exist, the cell is taken, or `player` already holds
    /// [`max_areas`](Self::max_areas) areas and the cell touches none of them.
    pub fn place(&mut self, player: PlayerId, x: Coord, y: Coord) -> Result<(), MoveError> {
        let location = self.check_place(player, x, y)?;
        self.occupy(location, player);
        Ok(())
    }

    /// Whether [`place`](Self::place) would accept the same arguments. Does not touch the board.
    pub fn move_possible(&self, player: PlayerId, x: Coord, y: Coord) -> bool {
        self.check_place(player, x, y).is_ok()
    }

    pub(crate) fn check_place(&self, player: PlayerId, x: Coord, y: Coord) -> Result<Location, MoveError> {
        let state = self.check_player(player)?;
        let location = self.check_location(x, y)?;

        if self.cells[location.as_index()] != Cell::Empty {
            return Err(MoveError::Occupied);
        }
        if state.areas >= self.max_areas && !self.touches(location, player) {
            return Err(MoveError::AreaLimit(player));
        }

        Ok(location)
    }

    /// Number of cells `player` could claim right now.
    ///
    /// Below the area limit that is every empty cell; at the limit only empty cells touching one of the player's areas count.
    /// Returns 0 for a player that does not exist.
    pub fn free_field_count(&self, player: PlayerId) -> u64 {
        let Some(state) = self.player(player) else {
            return 0;
        };

        if state.areas < self.max_areas {
            return self.empty_cells;
        }
        if state.areas > self.max_areas {
            return 0;
        }

        self.cells.indexed_iter()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .filter(|(index, _)| self.touches(Location::from(*index), player))
            .count() as u64
    }
}
