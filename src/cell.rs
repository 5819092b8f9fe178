use crate::player::PlayerId;

/// Ownership state of one board cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// Claimed by `player`.
    Owned {
        /// The claiming player.
        player: PlayerId,
    },
    /// Not claimed by anyone.
    #[default]
    Empty,
}

impl Cell {
    pub(crate) fn owner(&self) -> Option<PlayerId> {
        match self {
            Cell::Owned { player } => Some(*player),
            Cell::Empty => None,
        }
    }

    pub(crate) fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner() == Some(player)
    }
}
