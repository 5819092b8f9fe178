/// 1-based player identifier.
pub type PlayerId = u32;

/// Per-player counters kept by the board.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PlayerState {
    pub(crate) owned_cells: u64,
    pub(crate) areas: u32,
    pub(crate) golden_used: bool,
}
