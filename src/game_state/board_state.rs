//! Mutable board model for the draughts engine.
//!
//! `BoardState` is the central aggregate: an 8x8 grid of optional pieces
//! plus running piece/king counts kept in lockstep with the grid. Search
//! clones it wholesale per explored branch, so it stays plain value data
//! with no interior sharing.

use crate::game_state::draughts_types::{is_dark_square, Color, Piece, COLS, ROWS};

/// Compact immutable occupancy snapshot of a board.
///
/// One bit per square (`row * 8 + col`) in three masks. Two boards with
/// equal snapshots have identical grid contents, which makes this the key
/// for the transposition table's hash memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub white: u64,
    pub black: u64,
    pub kings: u64,
}

/// The 8x8 playing grid with its piece inventory.
#[derive(Debug, Clone)]
pub struct BoardState {
    grid: [[Option<Piece>; COLS]; ROWS],

    // Running census, always equal to the live grid contents.
    white_left: u8,
    black_left: u8,
    white_kings: u8,
    black_kings: u8,
}

impl BoardState {
    /// Fully populated starting board: 12 White men on rows 0-2, 12 Black
    /// men on rows 5-7, dark squares only.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..ROWS {
            for col in 0..COLS {
                if !is_dark_square(row, col) {
                    continue;
                }
                if row < 3 {
                    board.place(Piece::new(row as u8, col as u8, Color::White));
                } else if row > 4 {
                    board.place(Piece::new(row as u8, col as u8, Color::Black));
                }
            }
        }
        board
    }

    /// Blank board with zeroed counts. Positions are then built up with
    /// [`BoardState::place`].
    pub fn empty() -> Self {
        Self {
            grid: [[None; COLS]; ROWS],
            white_left: 0,
            black_left: 0,
            white_kings: 0,
            black_kings: 0,
        }
    }

    /// Put a piece on its square, updating the census.
    ///
    /// Replaces whatever occupied the square before; intended for position
    /// setup, not for play (play goes through `move_piece`/`remove`).
    pub fn place(&mut self, piece: Piece) {
        let (r, c) = (usize::from(piece.row), usize::from(piece.col));
        if let Some(old) = self.grid[r][c].take() {
            self.decrement_counts(old);
        }
        self.grid[r][c] = Some(piece);
        match piece.color {
            Color::White => self.white_left += 1,
            Color::Black => self.black_left += 1,
        }
        if piece.king {
            match piece.color {
                Color::White => self.white_kings += 1,
                Color::Black => self.black_kings += 1,
            }
        }
    }

    /// Piece on `(row, col)`, if any.
    ///
    /// Panics on out-of-range coordinates; callers are expected to query
    /// only in-bounds squares.
    #[inline]
    pub fn piece_at(&self, row: u8, col: u8) -> Option<Piece> {
        self.grid[usize::from(row)][usize::from(col)]
    }

    /// All pieces of `color` in row-major scan order.
    pub fn pieces_of(&self, color: Color) -> Vec<Piece> {
        let mut pieces = Vec::new();
        for row in &self.grid {
            for cell in row {
                if let Some(piece) = cell {
                    if piece.color == color {
                        pieces.push(*piece);
                    }
                }
            }
        }
        pieces
    }

    /// Relocate `piece` to `(row, col)` by swapping the two grid cells,
    /// then crown it if it landed on either back rank (row 0 or row 7).
    ///
    /// Crowning an already-crowned king leaves the king count unchanged.
    /// The destination is empty for every legal move; the cell swap keeps
    /// the operation total either way.
    pub fn move_piece(&mut self, piece: Piece, row: u8, col: u8) {
        let (fr, fc) = (usize::from(piece.row), usize::from(piece.col));
        let (tr, tc) = (usize::from(row), usize::from(col));

        let src = self.grid[fr][fc].take();
        let dst = self.grid[tr][tc].take();
        self.grid[fr][fc] = dst;
        self.grid[tr][tc] = src;

        if let Some(moved) = self.grid[tr][tc].as_mut() {
            moved.row = row;
            moved.col = col;
            if (row == 0 || row == (ROWS - 1) as u8) && !moved.king {
                moved.king = true;
                match moved.color {
                    Color::White => self.white_kings += 1,
                    Color::Black => self.black_kings += 1,
                }
            }
        }
    }

    /// Delete every listed piece from the board, decrementing the census.
    pub fn remove(&mut self, pieces: &[Piece]) {
        for piece in pieces {
            let (r, c) = (usize::from(piece.row), usize::from(piece.col));
            if let Some(taken) = self.grid[r][c].take() {
                self.decrement_counts(taken);
            }
        }
    }

    fn decrement_counts(&mut self, piece: Piece) {
        match piece.color {
            Color::White => {
                self.white_left = self.white_left.saturating_sub(1);
                if piece.king {
                    self.white_kings = self.white_kings.saturating_sub(1);
                }
            }
            Color::Black => {
                self.black_left = self.black_left.saturating_sub(1);
                if piece.king {
                    self.black_kings = self.black_kings.saturating_sub(1);
                }
            }
        }
    }

    /// `Some(White)` once Black has no pieces, else `Some(Black)` once
    /// White has none. White is checked first, which decides the tie if
    /// both inventories empty at once.
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        if self.black_left == 0 {
            Some(Color::White)
        } else if self.white_left == 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    #[inline]
    pub fn white_left(&self) -> u8 {
        self.white_left
    }

    #[inline]
    pub fn black_left(&self) -> u8 {
        self.black_left
    }

    #[inline]
    pub fn white_kings(&self) -> u8 {
        self.white_kings
    }

    #[inline]
    pub fn black_kings(&self) -> u8 {
        self.black_kings
    }

    /// Occupancy snapshot for hashing and identity checks.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot {
            white: 0,
            black: 0,
            kings: 0,
        };
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(piece) = cell {
                    let bit = 1u64 << (row * 8 + col);
                    match piece.color {
                        Color::White => snapshot.white |= bit,
                        Color::Black => snapshot.black |= bit,
                    }
                    if piece.king {
                        snapshot.kings |= bit;
                    }
                }
            }
        }
        snapshot
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Board equality is structural on the grid; the counts are derived.
impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for BoardState {}

#[cfg(test)]
mod tests {
    use super::BoardState;
    use crate::game_state::draughts_types::{Color, Piece, PIECES_PER_SIDE};

    #[test]
    fn starting_board_census_matches_grid() {
        let board = BoardState::new();
        assert_eq!(board.white_left(), PIECES_PER_SIDE);
        assert_eq!(board.black_left(), PIECES_PER_SIDE);
        assert_eq!(board.white_kings(), 0);
        assert_eq!(board.black_kings(), 0);
        assert_eq!(board.pieces_of(Color::White).len(), 12);
        assert_eq!(board.pieces_of(Color::Black).len(), 12);
    }

    #[test]
    fn starting_board_uses_dark_squares_only() {
        let board = BoardState::new();
        for color in [Color::White, Color::Black] {
            for piece in board.pieces_of(color) {
                assert_eq!(
                    (piece.row + piece.col) % 2,
                    1,
                    "piece on light square at ({}, {})",
                    piece.row,
                    piece.col
                );
            }
        }
    }

    #[test]
    fn pieces_of_scans_row_major() {
        let board = BoardState::new();
        let rows: Vec<u8> = board.pieces_of(Color::Black).iter().map(|p| p.row).collect();
        let mut sorted = rows.clone();
        sorted.sort_unstable();
        assert_eq!(rows, sorted, "row-major scan yields nondecreasing rows");
    }

    #[test]
    fn move_piece_relocates_and_updates_position() {
        let mut board = BoardState::new();
        let piece = board.piece_at(5, 0).expect("black man on (5, 0)");
        board.move_piece(piece, 4, 1);

        assert!(board.piece_at(5, 0).is_none());
        let moved = board.piece_at(4, 1).expect("piece arrived on (4, 1)");
        assert_eq!((moved.row, moved.col), (4, 1));
        assert_eq!(moved.color, Color::Black);
        assert!(!moved.king);
    }

    #[test]
    fn reaching_either_back_rank_crowns_a_man() {
        let mut board = BoardState::empty();
        board.place(Piece::new(1, 2, Color::Black));
        let man = board.piece_at(1, 2).expect("man placed");
        board.move_piece(man, 0, 1);

        let crowned = board.piece_at(0, 1).expect("crowned piece");
        assert!(crowned.king);
        assert_eq!(board.black_kings(), 1);
    }

    #[test]
    fn recrowning_a_king_does_not_double_count() {
        let mut board = BoardState::empty();
        let mut king = Piece::new(1, 2, Color::White);
        king.king = true;
        board.place(king);
        assert_eq!(board.white_kings(), 1);

        let piece = board.piece_at(1, 2).expect("king placed");
        board.move_piece(piece, 0, 1);
        assert_eq!(board.white_kings(), 1);
    }

    #[test]
    fn remove_decrements_census_including_kings() {
        let mut board = BoardState::empty();
        let mut king = Piece::new(4, 3, Color::Black);
        king.king = true;
        board.place(king);
        board.place(Piece::new(2, 1, Color::Black));

        let victims = board.pieces_of(Color::Black);
        board.remove(&victims);

        assert_eq!(board.black_left(), 0);
        assert_eq!(board.black_kings(), 0);
        assert!(board.piece_at(4, 3).is_none());
        assert!(board.piece_at(2, 1).is_none());
    }

    #[test]
    fn winner_prefers_white_when_both_sides_are_empty() {
        let board = BoardState::empty();
        assert_eq!(board.winner(), Some(Color::White));

        let mut only_white = BoardState::empty();
        only_white.place(Piece::new(0, 1, Color::White));
        assert_eq!(only_white.winner(), Some(Color::White));

        let mut only_black = BoardState::empty();
        only_black.place(Piece::new(7, 0, Color::Black));
        assert_eq!(only_black.winner(), Some(Color::Black));

        assert_eq!(BoardState::new().winner(), None);
    }

    #[test]
    fn equality_is_structural_on_the_grid() {
        let a = BoardState::new();
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = a.clone();
        let piece = c.piece_at(5, 0).expect("black man on (5, 0)");
        c.move_piece(piece, 4, 1);
        assert_ne!(a, c);
    }

    #[test]
    fn snapshot_distinguishes_color_and_king_status() {
        let mut man = BoardState::empty();
        man.place(Piece::new(4, 3, Color::White));

        let mut king = BoardState::empty();
        let mut crowned = Piece::new(4, 3, Color::White);
        crowned.king = true;
        king.place(crowned);

        assert_ne!(man.snapshot(), king.snapshot());
        assert_eq!(man.snapshot().white, king.snapshot().white);
        assert_eq!(man.snapshot(), man.clone().snapshot());
    }
}
