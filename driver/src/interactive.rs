use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use gamma::{Board, PlayerId, WidthPolicy};
use itertools::Itertools;
use log::debug;
use thiserror::Error;

const MOVE_REJECTED: &str = "Move NOT possible!";
const GOLDEN_REJECTED: &str = "Golden move NOT possible!";
const TOO_SMALL: &str = "Terminal too small!";

#[derive(Debug, Error)]
pub(crate) enum InteractiveError {
    /// The board does not fit on screen. Nothing was drawn.
    #[error("terminal too small for the board")]
    TerminalTooSmall,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Raw mode with a hidden cursor for as long as this lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(out, Hide, Clear(ClearType::All))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, Show);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    Up,
    Down,
    Left,
    Right,
    Place,
    Golden,
    Skip,
    Quit,
}

pub(crate) fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Place),
        KeyCode::Char('g' | 'G') => Some(Action::Golden),
        KeyCode::Char('c' | 'C') => Some(Action::Skip),
        _ => None,
    }
}

/// The player after `current`, in cyclic order, who can still claim a cell or play a golden move.
///
/// `current` itself is considered last. `None` once nobody can act.
pub(crate) fn next_playing_player(board: &mut Board, current: PlayerId) -> Option<PlayerId> {
    let players = board.players();
    std::iter::successors(Some(current % players + 1), |player| Some(player % players + 1))
        .take(players as usize)
        .find(|player| board.free_field_count(*player) > 0 || board.can_play_golden(*player))
}

fn screen(coord: usize) -> u16 {
    u16::try_from(coord).unwrap_or(u16::MAX)
}

pub(crate) struct Game {
    board: Board,
    player: PlayerId,
    // board coordinates of the cursor
    x: usize,
    y: usize,
    message: Option<&'static str>,
}

impl Game {
    /// Player 1 to move, cursor on the top left cell.
    pub(crate) fn new(board: Board) -> Self {
        let y = board.height() - 1;
        Self { board, player: 1, x: 0, y, message: None }
    }

    fn fits(&self, columns: u16, lines: u16) -> bool {
        let width = self.board.field_width(WidthPolicy::Fixed);
        usize::from(lines) > self.board.height() + 2
            && usize::from(columns) > self.board.width().saturating_mul(width)
    }

    /// Apply one key press. Returns `false` once the game is over.
    pub(crate) fn apply(&mut self, action: Action) -> bool {
        self.message = None;

        let turn_over = match action {
            Action::Quit => return false,
            Action::Up => {
                self.y = (self.y + 1).min(self.board.height() - 1);
                false
            }
            Action::Down => {
                self.y = self.y.saturating_sub(1);
                false
            }
            Action::Left => {
                self.x = self.x.saturating_sub(1);
                false
            }
            Action::Right => {
                self.x = (self.x + 1).min(self.board.width() - 1);
                false
            }
            Action::Place => match self.board.place(self.player, self.x, self.y) {
                Ok(()) => true,
                Err(err) => {
                    debug!("player {} cannot place at ({}, {}): {err}", self.player, self.x, self.y);
                    self.message = Some(MOVE_REJECTED);
                    false
                }
            },
            Action::Golden => match self.board.golden_move(self.player, self.x, self.y) {
                Ok(()) => true,
                Err(err) => {
                    debug!("player {} cannot take ({}, {}): {err}", self.player, self.x, self.y);
                    self.message = Some(GOLDEN_REJECTED);
                    false
                }
            },
            Action::Skip => true,
        };

        if turn_over {
            match next_playing_player(&mut self.board, self.player) {
                Some(next) => self.player = next,
                None => return false,
            }
        }
        true
    }

    pub(crate) fn status(&mut self) -> (String, bool) {
        let player = self.player;
        let text = format!(
            "PLAYER {player}, B: {}, F: {}, areas: {}\\{}",
            self.board.owned_cell_count(player),
            self.board.free_field_count(player),
            self.board.area_count(player),
            self.board.max_areas(),
        );
        (text, self.board.can_play_golden(player))
    }

    pub(crate) fn summary(&self) -> String {
        (1..=self.board.players())
            .map(|player| format!("PLAYER {player}, Busy fields: {}", self.board.owned_cell_count(player)))
            .join("\n")
    }

    fn draw_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (row, line) in self.board.render(WidthPolicy::Fixed).lines().enumerate() {
            queue!(out, MoveTo(0, screen(row)), Print(line))?;
        }
        Ok(())
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.draw_board(out)?;

        // the separator column stays uncoloured
        let width = self.board.field_width(WidthPolicy::Fixed);
        let text = self.board.cell_text(self.x, self.y).unwrap_or_default();
        let shown = text.get(..width - usize::from(width > 1)).unwrap_or(text.as_str());
        let background = if self.board.move_possible(self.player, self.x, self.y) { Color::Green } else { Color::Red };
        let row = self.board.height() - self.y - 1;
        queue!(
            out,
            MoveTo(screen(self.x * width), screen(row)),
            SetBackgroundColor(background),
            SetForegroundColor(Color::White),
            Print(shown),
            ResetColor,
        )?;

        let status_row = screen(self.board.height());
        let (status, golden) = self.status();
        queue!(
            out,
            MoveTo(0, status_row),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::Green),
            Print(status),
        )?;
        if golden {
            queue!(out, Print(' '), SetForegroundColor(Color::Yellow), Print('G'))?;
        }

        queue!(out, ResetColor, MoveTo(0, status_row.saturating_add(1)), Clear(ClearType::UntilNewLine))?;
        if let Some(message) = self.message {
            queue!(out, SetForegroundColor(Color::Red), Print(message), ResetColor)?;
        }

        out.flush()
    }
}

/// Run a game on the terminal until Ctrl-D or until no player can act, then print each player's cell count.
pub(crate) fn play<W: Write>(board: Board, out: &mut W) -> Result<(), InteractiveError> {
    let mut game = Game::new(board);

    let fits = terminal::size().is_ok_and(|(columns, lines)| game.fits(columns, lines));
    if !fits {
        queue!(out, SetForegroundColor(Color::Red), Print(TOO_SMALL), ResetColor, Print('\n'))?;
        out.flush()?;
        return Err(InteractiveError::TerminalTooSmall);
    }

    {
        let _guard = TerminalGuard::enter(out)?;
        loop {
            game.draw(out)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match action_for(key) {
                Some(action) if !game.apply(action) => break,
                Some(_) => {}
                None => game.message = None,
            }
        }

        game.draw_board(out)?;
        queue!(out, MoveTo(0, screen(game.board.height())), Clear(ClearType::FromCursorDown))?;
        out.flush()?;
    }

    queue!(out, SetForegroundColor(Color::Green), Print(game.summary()), ResetColor, Print('\n'))?;
    out.flush()?;
    Ok(())
}
