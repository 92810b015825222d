//! Standard draughts square numbering and move text.
//!
//! Dark squares are numbered 1-32 reading row by row from row 0. Quiet moves
//! print as `from-to`, captures as `from x hop x ... x to` with the hop
//! squares reconstructed from the captured chain.

use std::error::Error;
use std::fmt;

use crate::game_state::draughts_types::{is_dark_square, Piece, Square, COLS, ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    Malformed(String),
    SquareOutOfRange(u8),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Malformed(text) => write!(f, "unreadable move text: '{text}'"),
            NotationError::SquareOutOfRange(n) => {
                write!(f, "square number {n} is outside 1-32")
            }
        }
    }
}

impl Error for NotationError {}

/// A move as typed by a player: origin and final landing square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMove {
    pub from: Square,
    pub to: Square,
}

/// Number of a dark square, `None` for light squares.
#[inline]
pub fn square_number(row: u8, col: u8) -> Option<u8> {
    if !is_dark_square(usize::from(row), usize::from(col)) {
        return None;
    }
    Some(row * 4 + col / 2 + 1)
}

/// Coordinates of a numbered square, `None` outside 1-32.
#[inline]
pub fn square_coords(number: u8) -> Option<Square> {
    if number == 0 || number > (ROWS * COLS / 2) as u8 {
        return None;
    }
    let idx = number - 1;
    let row = idx / 4;
    let col = 2 * (idx % 4) + (1 - row % 2);
    Some((row, col))
}

/// Text for the move that takes `piece` to `dest` capturing `captured`.
pub fn format_move(piece: &Piece, dest: Square, captured: &[Piece]) -> String {
    if captured.is_empty() {
        return format!(
            "{}-{}",
            square_label(piece.row, piece.col),
            square_label(dest.0, dest.1)
        );
    }

    // Each jump lands on the far mirror of the captured square.
    let mut text = square_label(piece.row, piece.col);
    let (mut row, mut col) = (i16::from(piece.row), i16::from(piece.col));
    for jumped in captured {
        row = 2 * i16::from(jumped.row) - row;
        col = 2 * i16::from(jumped.col) - col;
        text.push('x');
        text.push_str(&hop_label(row, col));
    }
    text
}

/// Parse `11-15`, `22x15`, or `22x15x8`; intermediate hops are accepted and
/// only the endpoints are kept.
pub fn parse_move(text: &str) -> Result<ParsedMove, NotationError> {
    let tokens: Vec<&str> = text.trim().split(['-', 'x', 'X']).collect();
    if tokens.len() < 2 {
        return Err(NotationError::Malformed(text.to_owned()));
    }

    let mut squares = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let number: u8 = token
            .trim()
            .parse()
            .map_err(|_| NotationError::Malformed(text.to_owned()))?;
        let coords = square_coords(number).ok_or(NotationError::SquareOutOfRange(number))?;
        squares.push(coords);
    }

    Ok(ParsedMove {
        from: squares[0],
        to: squares[squares.len() - 1],
    })
}

fn square_label(row: u8, col: u8) -> String {
    match square_number(row, col) {
        Some(n) => n.to_string(),
        None => format!("({row},{col})"),
    }
}

// A mirrored hop from an inconsistent capture list can leave the board;
// label it with the signed coordinates rather than wrapping them.
fn hop_label(row: i16, col: i16) -> String {
    match (u8::try_from(row), u8::try_from(col)) {
        (Ok(r), Ok(c)) if usize::from(r) < ROWS && usize::from(c) < COLS => square_label(r, c),
        _ => format!("({row},{col})"),
    }
}
