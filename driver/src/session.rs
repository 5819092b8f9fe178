use std::io::{self, BufRead, Write};

use gamma::Board;
use log::debug;

use crate::batch::run_batch;
use crate::command::{classify, Line, ModeRequest};
use crate::interactive::InteractiveError;

/// Numbered input lines, each kept with its terminating newline.
pub(crate) struct Lines<R> {
    reader: R,
    buffer: Vec<u8>,
    number: u64,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, buffer: Vec::new(), number: 0 }
    }

    /// The next line and its 1-based number, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> io::Result<Option<(u64, &[u8])>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }

        self.number += 1;
        Ok(Some((self.number, &self.buffer)))
    }
}

pub(crate) fn report_error<E: Write>(err: &mut E, line: u64) -> io::Result<()> {
    writeln!(err, "ERROR {line}")
}

/// Read lines until one starts a game, then hand the rest of the input to that mode.
///
/// `interactive` runs a game on the terminal. When it reports [`InteractiveError::TerminalTooSmall`]
/// the starting line counts as an error and selection continues.
pub(crate) fn run<R, W, E, F>(input: R, out: &mut W, err: &mut E, mut interactive: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
    F: FnMut(Board, &mut W) -> Result<(), InteractiveError>,
{
    let mut lines = Lines::new(input);

    while let Some((number, raw)) = lines.next_line()? {
        let request = match classify(raw) {
            Ok(Line::Ignored) => continue,
            Ok(Line::Content { opcode, rest }) => ModeRequest::parse(opcode, rest),
            Err(parse_err) => Err(parse_err),
        };
        let request = match request {
            Ok(request) => request,
            Err(parse_err) => {
                debug!("line {number}: {parse_err}");
                report_error(err, number)?;
                continue;
            }
        };

        let (ModeRequest::Batch(params) | ModeRequest::Interactive(params)) = request;
        let board = match params.build() {
            Ok(board) => board,
            Err(build_err) => {
                debug!("line {number}: {build_err}");
                report_error(err, number)?;
                continue;
            }
        };

        match request {
            ModeRequest::Batch(_) => {
                writeln!(out, "OK {number}")?;
                return run_batch(board, &mut lines, out, err);
            }
            ModeRequest::Interactive(_) => match interactive(board, out) {
                Ok(()) => return Ok(()),
                Err(InteractiveError::TerminalTooSmall) => report_error(err, number)?,
                Err(InteractiveError::Io(io_err)) => return Err(io_err),
            },
        }
    }

    Ok(())
}
