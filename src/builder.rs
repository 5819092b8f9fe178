use std::num::NonZero;

use crate::board::Board;
use crate::error::BuildError;
use crate::location::Coord;
use crate::player::PlayerId;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuilderInvalidReason {
    /// The board was given a width of 0.
    #[error("width must be positive")]
    ZeroWidth,
    /// The board was given a height of 0.
    #[error("height must be positive")]
    ZeroHeight,
    /// No players were requested.
    #[error("player count must be positive")]
    NoPlayers,
    /// The per-player area limit was 0.
    #[error("area limit must be positive")]
    NoAreas,
    /// `width * height` cells cannot be indexed on this platform.
    #[error("board has too many cells")]
    BoardTooLarge,
}

/// Collects the parameters of a [`Board`] and validates them all at once.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    // width, height
    dims: (Coord, Coord),
    players: PlayerId,
    max_areas: u32,
}

impl Default for GameBuilder {
    fn default() -> Self {
        let mut builder = Self::with_dims((5, 5));
        builder.players(2).max_areas(2);
        builder
    }
}

impl GameBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order, one player and one area.
    pub fn with_dims(dims: (Coord, Coord)) -> Self {
        Self {
            dims,
            players: 1,
            max_areas: 1,
        }
    }

    /// Set the number of players. Players are numbered from 1.
    pub fn players(&mut self, players: PlayerId) -> &mut Self {
        self.players = players;
        self
    }

    /// Set how many disconnected areas one player may hold at once.
    pub fn max_areas(&mut self, max_areas: u32) -> &mut Self {
        self.max_areas = max_areas;
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some` with every problem found otherwise.
    pub fn is_valid(&self) -> Option<Vec<BuilderInvalidReason>> {
        let mut invalid_reasons = Vec::new();
        if self.dims.0 == 0 {
            invalid_reasons.push(BuilderInvalidReason::ZeroWidth);
        }
        if self.dims.1 == 0 {
            invalid_reasons.push(BuilderInvalidReason::ZeroHeight);
        }
        if self.players == 0 {
            invalid_reasons.push(BuilderInvalidReason::NoPlayers);
        }
        if self.max_areas == 0 {
            invalid_reasons.push(BuilderInvalidReason::NoAreas);
        }
        if self.dims.0.checked_mul(self.dims.1).is_none() {
            invalid_reasons.push(BuilderInvalidReason::BoardTooLarge);
        }

        if invalid_reasons.is_empty() {
            None
        } else {
            Some(invalid_reasons)
        }
    }

    /// Convert the state of this builder into an empty [`Board`].
    pub fn build(&self) -> Result<Board, BuildError> {
        if let Some(invalid_reasons) = self.is_valid() {
            return Err(BuildError::Invalid(invalid_reasons));
        }

        match (NonZero::new(self.dims.0), NonZero::new(self.dims.1)) {
            (Some(width), Some(height)) => Board::allocate((width, height), self.players, self.max_areas),
            _ => Err(BuildError::Invalid(vec![BuilderInvalidReason::ZeroWidth])),
        }
    }
}
