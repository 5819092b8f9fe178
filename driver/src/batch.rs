use std::io::{self, BufRead, Write};

use gamma::Board;
use log::debug;

use crate::command::{classify, Command, Line};
use crate::session::{report_error, Lines};

fn print_flag<W: Write>(out: &mut W, flag: bool) -> io::Result<()> {
    writeln!(out, "{}", u8::from(flag))
}

fn execute<W: Write>(board: &mut Board, command: Command, line: u64, out: &mut W) -> io::Result<()> {
    match command {
        Command::Place { player, x, y } => {
            let result = board.place(player, x as usize, y as usize);
            if let Err(err) = &result {
                debug!("line {line}: {err}");
            }
            print_flag(out, result.is_ok())
        }
        Command::Golden { player, x, y } => {
            let result = board.golden_move(player, x as usize, y as usize);
            if let Err(err) = &result {
                debug!("line {line}: {err}");
            }
            print_flag(out, result.is_ok())
        }
        Command::Busy(player) => writeln!(out, "{}", board.owned_cell_count(player)),
        Command::Free(player) => writeln!(out, "{}", board.free_field_count(player)),
        Command::GoldenPossible(player) => print_flag(out, board.can_play_golden(player)),
        Command::Print => write!(out, "{board}"),
    }
}

/// Execute every remaining line against `board` until the input ends.
///
/// Results go to `out`; lines that cannot be parsed are reported on `err` by number.
pub(crate) fn run_batch<R, W, E>(mut board: Board, lines: &mut Lines<R>, out: &mut W, err: &mut E) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    while let Some((number, raw)) = lines.next_line()? {
        let command = match classify(raw) {
            Ok(Line::Ignored) => continue,
            Ok(Line::Content { opcode, rest }) => Command::parse(opcode, rest),
            Err(parse_err) => Err(parse_err),
        };

        match command {
            Ok(command) => execute(&mut board, command, number, out)?,
            Err(parse_err) => {
                debug!("line {number}: {parse_err}");
                report_error(err, number)?;
            }
        }
    }

    out.flush()
}
