use std::collections::TryReserveError;

use crate::builder::BuilderInvalidReason;
use crate::player::PlayerId;

/// Reasons a [`Board`](crate::Board) could not be created.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The builder collected at least one [`BuilderInvalidReason`].
    #[error("invalid board parameters: {0:?}")]
    Invalid(Vec<BuilderInvalidReason>),

    /// Storage for the board grids or the traversal stack could not be reserved.
    #[error("cannot allocate board storage: {0}")]
    Allocation(#[from] TryReserveError),

    /// The reserved storage did not match the board shape.
    #[error("board storage has the wrong shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Reasons a move or golden move was rejected. A rejected move leaves the board untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MoveError {
    /// The player number is 0 or above the player count.
    #[error("player {0} does not exist")]
    PlayerOutOfRange(PlayerId),

    /// The coordinates lie outside the board.
    #[error("cell ({0}, {1}) is off the board")]
    OutOfBounds(usize, usize),

    /// The target cell already has an owner.
    #[error("cell is already taken")]
    Occupied,

    /// The mover is at the area limit and the cell touches none of their areas.
    #[error("player {0} would exceed the area limit")]
    AreaLimit(PlayerId),

    /// The mover has spent their golden move.
    #[error("player {0} has already played a golden move")]
    GoldenMoveUsed(PlayerId),

    /// A golden move targeted an empty cell.
    #[error("cell is not taken by anyone")]
    Unowned,

    /// A golden move targeted one of the mover's own cells.
    #[error("cell already belongs to the moving player")]
    OwnCell,

    /// Removing the cell would leave its owner above the area limit.
    #[error("player {0} would be split into too many areas")]
    OpponentAreaLimit(PlayerId),
}
