use gamma::{Board, BuildError, PlayerId};
use itertools::Itertools;
use thiserror::Error;

/// Reasons an input line could not be understood.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub(crate) enum ParseError {
    #[error("line is not terminated by a newline")]
    MissingNewline,
    #[error("unknown command {0:?}")]
    UnknownOpcode(char),
    #[error("command must be followed by whitespace")]
    NoSeparator,
    #[error("unexpected character {0:?} among the parameters")]
    BadCharacter(char),
    #[error("expected {expected} parameters, found {found}")]
    ParameterCount { expected: usize, found: usize },
    #[error("parameter does not fit in 32 bits")]
    Overflow,
}

/// One raw input line, terminating newline included.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Line<'a> {
    /// Empty lines and lines starting with `#`.
    Ignored,
    Content { opcode: u8, rest: &'a [u8] },
}

pub(crate) fn classify(raw: &[u8]) -> Result<Line<'_>, ParseError> {
    match raw {
        [] | [b'#', ..] | [b'\n', ..] => Ok(Line::Ignored),
        [.., last] if *last != b'\n' => Err(ParseError::MissingNewline),
        [opcode, rest @ ..] => Ok(Line::Content { opcode: *opcode, rest }),
    }
}

// the C locale's isspace, which counts vertical tab
fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

fn parse_u32(digits: &[u8]) -> Result<u32, ParseError> {
    digits.iter().try_fold(0u32, |value, digit| {
        value.checked_mul(10)
            .and_then(|value| value.checked_add(u32::from(digit - b'0')))
            .ok_or(ParseError::Overflow)
    })
}

/// Read exactly `N` decimal parameters from the text after an opcode.
///
/// The text must start with whitespace and hold nothing but digits and whitespace.
pub(crate) fn parameters<const N: usize>(rest: &[u8]) -> Result<[u32; N], ParseError> {
    if !rest.first().is_some_and(|byte| is_space(*byte)) {
        return Err(ParseError::NoSeparator);
    }
    if let Some(bad) = rest.iter().find(|byte| !byte.is_ascii_digit() && !is_space(**byte)) {
        return Err(ParseError::BadCharacter(char::from(*bad)));
    }

    let tokens = rest.split(|byte| is_space(*byte))
        .filter(|token| !token.is_empty())
        .collect_vec();
    if tokens.len() != N {
        return Err(ParseError::ParameterCount { expected: N, found: tokens.len() });
    }

    let mut values = [0; N];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = parse_u32(token)?;
    }
    Ok(values)
}

/// Parameters of a new game: `width height players max_areas`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameParams {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) players: PlayerId,
    pub(crate) max_areas: u32,
}

impl GameParams {
    pub(crate) fn build(&self) -> Result<Board, BuildError> {
        Board::new(self.width as usize, self.height as usize, self.players, self.max_areas)
    }
}

/// A line that starts a game in one of the two modes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ModeRequest {
    Batch(GameParams),
    Interactive(GameParams),
}

impl ModeRequest {
    pub(crate) fn parse(opcode: u8, rest: &[u8]) -> Result<Self, ParseError> {
        let request: fn(GameParams) -> Self = match opcode {
            b'B' => Self::Batch,
            b'I' => Self::Interactive,
            other => return Err(ParseError::UnknownOpcode(char::from(other))),
        };
        let [width, height, players, max_areas] = parameters(rest)?;

        Ok(request(GameParams { width, height, players, max_areas }))
    }
}

/// A batch mode instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    /// `m player x y`
    Place { player: PlayerId, x: u32, y: u32 },
    /// `g player x y`
    Golden { player: PlayerId, x: u32, y: u32 },
    /// `b player`
    Busy(PlayerId),
    /// `f player`
    Free(PlayerId),
    /// `q player`
    GoldenPossible(PlayerId),
    /// `p`
    Print,
}

impl Command {
    pub(crate) fn parse(opcode: u8, rest: &[u8]) -> Result<Self, ParseError> {
        Ok(match opcode {
            b'm' => {
                let [player, x, y] = parameters(rest)?;
                Self::Place { player, x, y }
            }
            b'g' => {
                let [player, x, y] = parameters(rest)?;
                Self::Golden { player, x, y }
            }
            b'b' => {
                let [player] = parameters(rest)?;
                Self::Busy(player)
            }
            b'f' => {
                let [player] = parameters(rest)?;
                Self::Free(player)
            }
            b'q' => {
                let [player] = parameters(rest)?;
                Self::GoldenPossible(player)
            }
            b'p' => {
                parameters::<0>(rest)?;
                Self::Print
            }
            other => return Err(ParseError::UnknownOpcode(char::from(other))),
        })
    }
}
