use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::builder::GameBuilder;
use crate::cell::Cell;
use crate::error::{BuildError, MoveError};
use crate::flood::FloodFill;
use crate::forest::AreaForest;
use crate::location::{try_grid, Coord, Dimension, Location};
use crate::player::{PlayerId, PlayerState};
use crate::render::WidthPolicy;
use crate::shape::neighbors_within;

/// A game of gamma: a rectangular grid on which players claim cells.
///
/// Each player's cells fall into areas, maximal groups of edge-connected cells.
/// No player may ever hold more than [`max_areas`](Self::max_areas) areas.
///
/// [`Board`]s should be built using a [`GameBuilder`] or [`Board::new`].
/// Only [`place`](Self::place) and [`golden_move`](Self::golden_move) change what the board shows.
pub struct Board {
    // width, height
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<Cell>,
    pub(crate) forest: AreaForest,
    pub(crate) flood: FloodFill,
    // index 0 is player 1
    pub(crate) players: Vec<PlayerState>,
    pub(crate) max_areas: u32,
    pub(crate) empty_cells: u64,
}

impl Board {
    /// Create an empty board of `width` × `height` cells for `players` players, each limited to `max_areas` areas.
    ///
    /// Fails if any parameter is 0 or the board storage cannot be allocated.
    pub fn new(width: Coord, height: Coord, players: PlayerId, max_areas: u32) -> Result<Self, BuildError> {
        GameBuilder::with_dims((width, height))
            .players(players)
            .max_areas(max_areas)
            .build()
    }

    pub(crate) fn allocate(dims: (Dimension, Dimension), players: PlayerId, max_areas: u32) -> Result<Self, BuildError> {
        let mut player_states = Vec::new();
        player_states.try_reserve_exact(players as usize)?;
        player_states.resize(players as usize, PlayerState::default());

        let cells = try_grid(dims, |_| Cell::Empty)?;
        let empty_cells = cells.len() as u64;

        Ok(Self {
            dims,
            cells,
            forest: AreaForest::with_dims(dims)?,
            flood: FloodFill::with_dims(dims)?,
            players: player_states,
            max_areas,
            empty_cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> Coord {
        self.dims.0.get()
    }

    /// Number of rows.
    pub fn height(&self) -> Coord {
        self.dims.1.get()
    }

    /// Number of players taking part.
    pub fn players(&self) -> PlayerId {
        self.players.len() as PlayerId
    }

    /// The most areas any one player may hold.
    pub fn max_areas(&self) -> u32 {
        self.max_areas
    }

    /// Number of cells nobody owns.
    pub fn empty_cell_count(&self) -> u64 {
        self.empty_cells
    }

    /// Number of cells owned by `player`, or 0 if there is no such player.
    pub fn owned_cell_count(&self, player: PlayerId) -> u64 {
        self.player(player).map_or(0, |state| state.owned_cells)
    }

    /// Number of areas held by `player`, or 0 if there is no such player.
    pub fn area_count(&self, player: PlayerId) -> u32 {
        self.player(player).map_or(0, |state| state.areas)
    }

    /// Whether `player` has already spent their golden move. False if there is no such player.
    pub fn has_used_golden(&self, player: PlayerId) -> bool {
        self.player(player).is_some_and(|state| state.golden_used)
    }

    /// Owner of the cell at `(x, y)`, `None` if it is empty or off the board.
    pub fn owner_at(&self, x: Coord, y: Coord) -> Option<PlayerId> {
        self.cells.get(Location(x, y).as_index()).and_then(Cell::owner)
    }

    pub(crate) fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        player.checked_sub(1).and_then(|index| self.players.get(index as usize))
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player as usize - 1]
    }

    pub(crate) fn check_player(&self, player: PlayerId) -> Result<&PlayerState, MoveError> {
        self.player(player).ok_or(MoveError::PlayerOutOfRange(player))
    }

    pub(crate) fn check_location(&self, x: Coord, y: Coord) -> Result<Location, MoveError> {
        let location = Location(x, y);
        if location.within(self.dims) {
            Ok(location)
        } else {
            Err(MoveError::OutOfBounds(x, y))
        }
    }

    pub(crate) fn neighbors(&self, location: Location) -> impl Iterator<Item = Location> {
        neighbors_within(location, self.dims)
    }

    /// Whether any edge neighbour of `location` belongs to `player`.
    pub(crate) fn touches(&self, location: Location, player: PlayerId) -> bool {
        self.neighbors(location).any(|neighbor| self.cells[neighbor.as_index()].is_owned_by(player))
    }

    /// Give the empty cell at `location` to `player`, merging every area of theirs it touches.
    ///
    /// Performs no rule checks.
    pub(crate) fn occupy(&mut self, location: Location, player: PlayerId) {
        self.cells[location.as_index()] = Cell::Owned { player };
        self.empty_cells -= 1;

        let roots = neighbors_within(location, self.dims)
            .filter(|neighbor| self.cells[neighbor.as_index()].is_owned_by(player))
            .collect_vec()
            .into_iter()
            .map(|neighbor| self.forest.find(neighbor))
            .unique()
            .collect_vec();

        match roots.split_first() {
            None => {
                self.forest.make_root(location, 1);
                self.player_mut(player).areas += 1;
            }
            Some((first, rest)) => {
                self.forest.attach(location, *first);
                rest.iter().fold(*first, |survivor, root| self.forest.union(survivor, *root));
                self.player_mut(player).areas -= rest.len() as u32;
            }
        }

        self.player_mut(player).owned_cells += 1;
    }

    /// Empty the owned cell at `location` and rebuild the areas of its former owner, who is returned.
    ///
    /// Performs no rule checks. The owner may end up above the area limit.
    pub(crate) fn vacate(&mut self, location: Location) -> Option<PlayerId> {
        let player = self.cells[location.as_index()].owner()?;

        let root = self.forest.find(location);
        self.forest.dissolve(root, location);
        self.cells[location.as_index()] = Cell::Empty;
        self.empty_cells += 1;

        let created = self.flood.split_around(&self.cells, &mut self.forest, location, player);
        let state = self.player_mut(player);
        state.owned_cells -= 1;
        state.areas = state.areas + created - 1;

        Some(player)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(WidthPolicy::Compact))
    }
}
