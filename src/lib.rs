#![warn(missing_docs)]

//! # `gamma`
//!
//! An engine for gamma, a territory game on a rectangular grid.
//! Players take turns claiming empty cells. The cells a player owns fall into areas, maximal groups connected through shared edges,
//! and nobody may ever hold more than a fixed number of areas.
//! Once per game each player may also play a golden move, taking a cell away from an opponent, provided neither side breaks the area limit.
//!
//! Begin by building a [`Board`] with [`Board::new`] or a [`GameBuilder`], then call [`place`](Board::place) and
//! [`golden_move`](Board::golden_move). Queries such as [`free_field_count`](Board::free_field_count) and
//! [`can_play_golden`](Board::can_play_golden) answer what a player may still do.
//!
//! # Internals
//! Each player's areas are tracked in a disjoint-set forest laid over the grid, so claiming a cell only ever merges areas.
//! A golden move empties a cell first, which can cut an area apart, and a disjoint-set forest cannot split.
//! Instead the areas around the emptied cell are rebuilt by flood fill with an explicit stack; the cost is bounded by the size of the area that was cut.
//!
//! A golden move is applied as a trial: the cell is emptied, the mover claims it, and if either player breaks the limit the cell is handed back,
//! restoring every counter. [`can_play_golden`](Board::can_play_golden) runs the same trials and always hands the cell back.

pub use board::Board;
pub use builder::{BuilderInvalidReason, GameBuilder};
pub use error::{BuildError, MoveError};
pub use player::PlayerId;
pub use render::WidthPolicy;

pub(crate) mod board;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod error;
pub(crate) mod flood;
pub(crate) mod forest;
pub(crate) mod golden;
pub(crate) mod location;
pub(crate) mod moves;
pub(crate) mod player;
pub(crate) mod render;
pub(crate) mod shape;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
