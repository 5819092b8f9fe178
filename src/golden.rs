use log::debug;

use crate::board::Board;
use crate::cell::Cell;
use crate::error::MoveError;
use crate::location::{Coord, Location};
use crate::player::{PlayerId, PlayerState};

/// A golden move that has been applied to the board but not yet kept.
///
/// Holds exactly the state the move may change, so [`Self::rollback`] can put it back.
#[must_use]
struct GoldenTrial {
    location: Location,
    mover: PlayerId,
    opponent: PlayerId,
    mover_state: PlayerState,
    opponent_state: PlayerState,
    empty_cells: u64,
}

impl GoldenTrial {
    fn begin(board: &Board, location: Location, mover: PlayerId, opponent: PlayerId) -> Self {
        Self {
            location,
            mover,
            opponent,
            mover_state: board.players[mover as usize - 1],
            opponent_state: board.players[opponent as usize - 1],
            empty_cells: board.empty_cells,
        }
    }

    /// Return the cell to `opponent`, rebuilding their areas by an ordinary merge.
    fn rollback(self, board: &mut Board) {
        if board.cells[self.location.as_index()].is_owned_by(self.mover) {
            board.vacate(self.location);
        }
        board.occupy(self.location, self.opponent);

        debug_assert_eq!(board.players[self.opponent as usize - 1], self.opponent_state);
        debug_assert_eq!(board.players[self.mover as usize - 1].owned_cells, self.mover_state.owned_cells);
        *board.player_mut(self.mover) = self.mover_state;
        *board.player_mut(self.opponent) = self.opponent_state;
        board.empty_cells = self.empty_cells;
        debug!("rolled back golden move of player {} at {:?}", self.mover, self.location);
    }

    fn commit(self, board: &mut Board) {
        board.player_mut(self.mover).golden_used = true;
        debug!("player {} took {:?} from player {}", self.mover, self.location, self.opponent);
    }
}

impl Board {
    /// Take the cell at `(x, y)` from another player and give it to `player`. Each player may do this once.
    ///
    /// The move is rejected, leaving the board exactly as it was, if the cell is empty or already belongs to `player`,
    /// if removing it would split its owner into more than [`max_areas`](Self::max_areas) areas,
    /// or if `player` could not [`place`](Self::place) there once it is empty.
    pub fn golden_move(&mut self, player: PlayerId, x: Coord, y: Coord) -> Result<(), MoveError> {
        let state = self.check_player(player)?;
        if state.golden_used {
            return Err(MoveError::GoldenMoveUsed(player));
        }
        let location = self.check_location(x, y)?;

        let trial = self.stage_golden(location, player)?;
        trial.commit(self);
        Ok(())
    }

    /// Whether `player` could make any golden move right now.
    ///
    /// Needs `&mut self` because candidate moves are tried and undone, but the board reads the same afterwards.
    pub fn can_play_golden(&mut self, player: PlayerId) -> bool {
        let Some(state) = self.player(player) else {
            return false;
        };
        if state.golden_used {
            return false;
        }

        let opponents_on_board = self.players.iter()
            .enumerate()
            .any(|(index, other)| index + 1 != player as usize && other.owned_cells > 0);
        if !opponents_on_board {
            return false;
        }
        if state.areas < self.max_areas {
            return true;
        }

        let candidates = self.cells.indexed_iter()
            .filter(|(_, cell)| matches!(cell, Cell::Owned { player: owner } if *owner != player))
            .map(|(index, _)| Location::from(index))
            .collect::<Vec<_>>();

        for location in candidates {
            if let Ok(trial) = self.stage_golden(location, player) {
                trial.rollback(self);
                debug!("player {player} can take {location:?} with a golden move");
                return true;
            }
        }

        false
    }

    /// Apply a golden move by `player` at `location` without checking or spending their golden move.
    ///
    /// On failure the board is already restored.
    fn stage_golden(&mut self, location: Location, player: PlayerId) -> Result<GoldenTrial, MoveError> {
        let opponent = match self.cells[location.as_index()] {
            Cell::Empty => return Err(MoveError::Unowned),
            Cell::Owned { player: owner } if owner == player => return Err(MoveError::OwnCell),
            Cell::Owned { player: owner } => owner,
        };

        // the mover's neighbours don't change when the opponent's cell is emptied
        let mover = self.check_player(player)?;
        if mover.areas >= self.max_areas && !self.touches(location, player) {
            return Err(MoveError::AreaLimit(player));
        }

        let trial = GoldenTrial::begin(self, location, player, opponent);
        self.vacate(location);

        if self.area_count(opponent) > self.max_areas {
            trial.rollback(self);
            return Err(MoveError::OpponentAreaLimit(opponent));
        }

        if let Err(err) = self.place(player, location.0, location.1) {
            trial.rollback(self);
            return Err(err);
        }

        Ok(trial)
    }
}
