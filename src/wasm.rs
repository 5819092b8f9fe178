use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::render::WidthPolicy;

/// A [`Board`] for JavaScript hosts. Commands report success as a boolean.
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// See [`Board::new`].
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, players: u32, max_areas: u32) -> Result<WasmBoard, JsError> {
        Board::new(width as usize, height as usize, players, max_areas)
            .map(|inner| Self { inner })
            .map_err(|err| JsError::new(&err.to_string()))
    }

    /// See [`Board::place`].
    pub fn place(&mut self, player: u32, x: u32, y: u32) -> bool {
        self.inner.place(player, x as usize, y as usize).is_ok()
    }

    /// See [`Board::golden_move`].
    #[wasm_bindgen(js_name = goldenMove)]
    pub fn golden_move(&mut self, player: u32, x: u32, y: u32) -> bool {
        self.inner.golden_move(player, x as usize, y as usize).is_ok()
    }

    /// See [`Board::move_possible`].
    #[wasm_bindgen(js_name = movePossible)]
    pub fn move_possible(&self, player: u32, x: u32, y: u32) -> bool {
        self.inner.move_possible(player, x as usize, y as usize)
    }

    /// See [`Board::owned_cell_count`].
    #[wasm_bindgen(js_name = busyFields)]
    pub fn busy_fields(&self, player: u32) -> u64 {
        self.inner.owned_cell_count(player)
    }

    /// See [`Board::free_field_count`].
    #[wasm_bindgen(js_name = freeFields)]
    pub fn free_fields(&self, player: u32) -> u64 {
        self.inner.free_field_count(player)
    }

    /// See [`Board::can_play_golden`].
    #[wasm_bindgen(js_name = goldenPossible)]
    pub fn golden_possible(&mut self, player: u32) -> bool {
        self.inner.can_play_golden(player)
    }

    /// See [`Board::area_count`].
    #[wasm_bindgen(js_name = playerAreas)]
    pub fn player_areas(&self, player: u32) -> u32 {
        self.inner.area_count(player)
    }

    /// See [`Board::max_areas`].
    #[wasm_bindgen(js_name = maxAreas)]
    pub fn max_areas(&self) -> u32 {
        self.inner.max_areas()
    }

    /// The board rendered with a width that never changes during the game.
    pub fn board(&self) -> String {
        self.inner.render(WidthPolicy::Fixed)
    }

    /// See [`Board::cell_text`]. Empty if `(x, y)` is off the board.
    #[wasm_bindgen(js_name = cellText)]
    pub fn cell_text(&self, x: u32, y: u32) -> String {
        self.inner.cell_text(x as usize, y as usize).unwrap_or_default()
    }
}
