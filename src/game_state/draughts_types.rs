//! Core draughts types shared across the board model, move generation,
//! search, and front-ends.

/// Board extent. The game is played on the dark squares of an 8x8 grid.
pub const ROWS: usize = 8;
pub const COLS: usize = 8;

/// Men per side on a freshly set up board.
pub const PIECES_PER_SIDE: u8 = 12;

/// A `(row, col)` grid coordinate. Row 0 is White's back rank, row 7 is
/// Black's.
pub type Square = (u8, u8);

/// Piece color. White moves toward increasing rows, Black toward
/// decreasing rows, and Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction this color's men advance in (+1 for White, -1 for
    /// Black). Kings move both ways.
    #[inline]
    pub const fn forward_step(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// A single piece. Owned exclusively by the board cell it occupies; the
/// stored position always matches that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub row: u8,
    pub col: u8,
    pub color: Color,
    pub king: bool,
}

impl Piece {
    #[inline]
    pub const fn new(row: u8, col: u8, color: Color) -> Self {
        Self {
            row,
            col,
            color,
            king: false,
        }
    }

    #[inline]
    pub const fn square(self) -> Square {
        (self.row, self.col)
    }
}

/// Only dark squares are playable: `(row + col)` odd.
#[inline]
pub const fn is_dark_square(row: usize, col: usize) -> bool {
    (row + col) % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::{is_dark_square, Color};

    #[test]
    fn opposite_round_trips() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite().opposite(), Color::Black);
    }

    #[test]
    fn dark_square_parity() {
        assert!(is_dark_square(0, 1));
        assert!(is_dark_square(5, 0));
        assert!(!is_dark_square(0, 0));
        assert!(!is_dark_square(7, 7));
    }
}
