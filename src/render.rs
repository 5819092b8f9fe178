use itertools::Itertools;

use crate::board::Board;
use crate::cell::Cell;
use crate::location::{Coord, Location};
use crate::player::PlayerId;

const EMPTY_DISPLAY: char = '.';

/// How wide each cell is when a [`Board`] is turned into text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WidthPolicy {
    /// Just wide enough for the largest player number currently on the board.
    #[default]
    Compact,
    /// Wide enough for the largest player number the game allows, so the width never changes during a game.
    Fixed,
}

fn digits(player: PlayerId) -> usize {
    player.checked_ilog10().map_or(1, |log| log as usize + 1)
}

// multi-digit numbers need a separating space
fn field_width_for(widest: usize) -> usize {
    if widest > 1 { widest + 1 } else { widest }
}

impl Board {
    /// Characters taken by one cell under `policy`, separator included.
    pub fn field_width(&self, policy: WidthPolicy) -> usize {
        let widest = match policy {
            WidthPolicy::Compact => self.players.iter()
                .enumerate()
                .filter(|(_, state)| state.owned_cells > 0)
                .map(|(index, _)| digits(index as PlayerId + 1))
                .max()
                .unwrap_or(1),
            WidthPolicy::Fixed => digits(self.players()),
        };

        field_width_for(widest)
    }

    fn field_text(&self, cell: Cell, width: usize) -> String {
        match cell {
            Cell::Owned { player } => format!("{player:<width$}"),
            Cell::Empty => format!("{EMPTY_DISPLAY:<width$}"),
        }
    }

    /// The whole board as text, top row first, one line per row.
    pub fn render(&self, policy: WidthPolicy) -> String {
        let width = self.field_width(policy);
        let mut out = String::with_capacity(self.cells.len() * width + self.height());

        for y in (0..self.height()).rev() {
            out.push_str(&self.cells.row(y).iter().map(|cell| self.field_text(*cell, width)).join(""));
            out.push('\n');
        }

        out
    }

    /// One cell as text, padded to the [`Fixed`](WidthPolicy::Fixed) width. `None` if `(x, y)` is off the board.
    pub fn cell_text(&self, x: Coord, y: Coord) -> Option<String> {
        let cell = self.cells.get(Location(x, y).as_index())?;
        Some(self.field_text(*cell, self.field_width(WidthPolicy::Fixed)))
    }
}
