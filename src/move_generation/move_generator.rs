//! Diagonal move generation with recursive capture chains.
//!
//! A piece scans a two-row diagonal window per direction: an empty cell is a
//! quiet destination, an opponent piece followed by an empty cell is a jump,
//! and every jump landing recurses laterally to extend the chain. Captures
//! are offered alongside quiet moves, never forced.

use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::{Color, Piece, Square, COLS, ROWS};

/// Insertion-ordered map from landing square to the captured pieces the
/// move removes. Re-inserting a known square replaces its captured list
/// but keeps the square's original position, so converging jump paths
/// resolve deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveMap {
    entries: Vec<(Square, Vec<Piece>)>,
}

impl MoveMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, square: Square, captured: Vec<Piece>) {
        if let Some(slot) = self.entries.iter_mut().find(|(sq, _)| *sq == square) {
            slot.1 = captured;
        } else {
            self.entries.push((square, captured));
        }
    }

    /// Fold `other` into `self`, entry by entry, in `other`'s order.
    pub fn merge(&mut self, other: MoveMap) {
        for (square, captured) in other.entries {
            self.insert(square, captured);
        }
    }

    pub fn get(&self, square: Square) -> Option<&[Piece]> {
        self.entries
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, captured)| captured.as_slice())
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, &[Piece])> {
        self.entries
            .iter()
            .map(|(sq, captured)| (*sq, captured.as_slice()))
    }

    /// Landing squares in insertion order.
    pub fn squares(&self) -> Vec<Square> {
        self.entries.iter().map(|(sq, _)| *sq).collect()
    }
}

impl IntoIterator for MoveMap {
    type Item = (Square, Vec<Piece>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Every legal destination for `piece`, with the pieces each move captures.
///
/// Men scan only their forward row direction; kings scan both. The scan
/// order is fixed (up before down, left before right), which fixes the
/// map's insertion order.
pub fn valid_moves(board: &BoardState, piece: Piece) -> MoveMap {
    let mut moves = MoveMap::new();
    let row = i32::from(piece.row);
    let left = i32::from(piece.col) - 1;
    let right = i32::from(piece.col) + 1;

    for row_step in [-1i32, 1] {
        if !piece.king && piece.color.forward_step() != row_step {
            continue;
        }
        let (start, stop) = scan_window(row, row_step);
        moves.merge(traverse(board, start, stop, row_step, piece.color, left, -1, &[]));
        moves.merge(traverse(board, start, stop, row_step, piece.color, right, 1, &[]));
    }
    moves
}

/// Flattened legal moves for a whole side: row-major piece order, then each
/// piece's map order. Emptiness doubles as the mover-has-lost signal.
pub fn all_valid_moves(board: &BoardState, color: Color) -> Vec<(Piece, Square, Vec<Piece>)> {
    let mut all = Vec::new();
    for piece in board.pieces_of(color) {
        for (square, captured) in valid_moves(board, piece) {
            all.push((piece, square, captured));
        }
    }
    all
}

/// Successor board after `piece` moves to `dest` and `captured` leaves the
/// board. The input board is untouched; search clones per branch.
pub fn apply_move(board: &BoardState, piece: Piece, dest: Square, captured: &[Piece]) -> BoardState {
    let mut next = board.clone();
    next.move_piece(piece, dest.0, dest.1);
    if !captured.is_empty() {
        next.remove(captured);
    }
    next
}

/// Two-row scan window starting one row past `row` in `row_step`'s
/// direction. `stop` is exclusive and clamped one past the board edge.
fn scan_window(row: i32, row_step: i32) -> (i32, i32) {
    if row_step < 0 {
        (row - 1, (row - 3).max(-1))
    } else {
        (row + 1, (row + 3).min(ROWS as i32))
    }
}

/// Walk one diagonal ray of the window, recording destinations into a map.
///
/// `chain` holds the captures accumulated by the jumps that led here; a
/// non-empty chain means this call is extending a capture sequence, so a
/// bare empty cell no longer counts as a destination on its own.
#[allow(clippy::too_many_arguments)]
fn traverse(
    board: &BoardState,
    start_row: i32,
    stop_row: i32,
    row_step: i32,
    color: Color,
    start_col: i32,
    col_step: i32,
    chain: &[Piece],
) -> MoveMap {
    let mut moves = MoveMap::new();
    let mut pending: Option<Piece> = None;
    let mut row = start_row;
    let mut col = start_col;

    while row != stop_row {
        if col < 0 || col >= COLS as i32 {
            break;
        }

        match board.piece_at(row as u8, col as u8) {
            None => {
                // A chain may only continue through another jump.
                if !chain.is_empty() && pending.is_none() {
                    break;
                }
                let mut captured = chain.to_vec();
                if let Some(jumped) = pending {
                    captured.push(jumped);
                }
                moves.insert((row as u8, col as u8), captured.clone());

                if pending.is_some() {
                    let (next_row, next_stop) = scan_window(row, row_step);
                    moves.merge(traverse(
                        board, next_row, next_stop, row_step, color, col - 1, -1, &captured,
                    ));
                    moves.merge(traverse(
                        board, next_row, next_stop, row_step, color, col + 1, 1, &captured,
                    ));
                }
                break;
            }
            Some(other) if other.color == color => break,
            Some(enemy) => {
                // Newest enemy on the ray is the capture candidate; a second
                // one in a row leaves no landing square.
                pending = Some(enemy);
            }
        }

        row += row_step;
        col += col_step;
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::{all_valid_moves, apply_move, valid_moves, MoveMap};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::draughts_types::{Color, Piece};

    fn board_with(pieces: &[Piece]) -> BoardState {
        let mut board = BoardState::empty();
        for piece in pieces {
            board.place(*piece);
        }
        board
    }

    #[test]
    fn fresh_board_offers_seven_quiet_moves_per_side() {
        let board = BoardState::new();
        for color in [Color::White, Color::Black] {
            let moves = all_valid_moves(&board, color);
            assert_eq!(moves.len(), 7, "{color:?} opening move count");
            assert!(
                moves.iter().all(|(_, _, captured)| captured.is_empty()),
                "no captures available from the starting position"
            );
        }
    }

    #[test]
    fn man_scans_forward_rows_only() {
        let white = Piece::new(2, 1, Color::White);
        let board = board_with(&[white]);
        let moves = valid_moves(&board, white);
        assert_eq!(moves.squares(), vec![(3, 0), (3, 2)]);

        let black = Piece::new(5, 2, Color::Black);
        let board = board_with(&[black]);
        let moves = valid_moves(&board, black);
        assert_eq!(moves.squares(), vec![(4, 1), (4, 3)]);
    }

    #[test]
    fn king_scans_both_row_directions() {
        let mut king = Piece::new(4, 3, Color::Black);
        king.king = true;
        let board = board_with(&[king]);
        let moves = valid_moves(&board, king);
        assert_eq!(moves.squares(), vec![(3, 2), (3, 4), (5, 2), (5, 4)]);
    }

    #[test]
    fn jump_over_adjacent_enemy_lands_two_squares_out() {
        let white = Piece::new(4, 3, Color::White);
        let black = Piece::new(5, 4, Color::Black);
        let board = board_with(&[white, black]);

        let moves = valid_moves(&board, white);
        assert_eq!(moves.squares(), vec![(5, 2), (6, 5)]);
        assert_eq!(moves.get((5, 2)).expect("quiet move kept"), &[]);
        assert_eq!(moves.get((6, 5)).expect("jump recorded"), &[black]);
    }

    #[test]
    fn double_jump_chain_lists_captures_in_traversal_order() {
        let white = Piece::new(2, 1, Color::White);
        let first = Piece::new(3, 2, Color::Black);
        let second = Piece::new(5, 4, Color::Black);
        let board = board_with(&[white, first, second]);

        let moves = valid_moves(&board, white);
        assert_eq!(moves.squares(), vec![(3, 0), (4, 3), (6, 5)]);
        assert_eq!(moves.get((4, 3)).expect("single jump"), &[first]);
        assert_eq!(
            moves.get((6, 5)).expect("double jump"),
            &[first, second],
            "earliest capture listed first"
        );
    }

    #[test]
    fn chain_cannot_continue_with_a_quiet_step() {
        let white = Piece::new(2, 1, Color::White);
        let first = Piece::new(3, 2, Color::Black);
        let board = board_with(&[white, first]);

        let moves = valid_moves(&board, white);
        // After landing on (4, 3) the empty cells beyond are not destinations.
        assert!(moves.contains((4, 3)));
        assert!(!moves.contains((5, 2)));
        assert!(!moves.contains((5, 4)));
    }

    #[test]
    fn two_enemies_in_a_row_block_the_jump() {
        let white = Piece::new(4, 3, Color::White);
        let near = Piece::new(5, 4, Color::Black);
        let far = Piece::new(6, 5, Color::Black);
        let board = board_with(&[white, near, far]);

        let moves = valid_moves(&board, white);
        assert_eq!(moves.squares(), vec![(5, 2)]);
    }

    #[test]
    fn own_piece_blocks_the_ray() {
        let mover = Piece::new(4, 3, Color::White);
        let blocker = Piece::new(5, 4, Color::White);
        let board = board_with(&[mover, blocker]);

        let moves = valid_moves(&board, mover);
        assert_eq!(moves.squares(), vec![(5, 2)]);
    }

    #[test]
    fn edge_columns_stay_on_the_board() {
        let on_left_edge = Piece::new(4, 0, Color::White);
        let board = board_with(&[on_left_edge]);
        assert_eq!(valid_moves(&board, on_left_edge).squares(), vec![(5, 1)]);

        let on_right_edge = Piece::new(3, 7, Color::Black);
        let board = board_with(&[on_right_edge]);
        assert_eq!(valid_moves(&board, on_right_edge).squares(), vec![(2, 6)]);
    }

    #[test]
    fn jump_needs_room_to_land() {
        // Enemy on the back rank: the window is one row deep, no landing.
        let black = Piece::new(1, 2, Color::Black);
        let white = Piece::new(0, 1, Color::White);
        let board = board_with(&[black, white]);

        let moves = valid_moves(&board, black);
        assert_eq!(moves.squares(), vec![(0, 3)]);
    }

    #[test]
    fn move_map_replaces_value_but_keeps_position() {
        let a = Piece::new(3, 2, Color::Black);
        let b = Piece::new(5, 4, Color::Black);

        let mut map = MoveMap::new();
        map.insert((4, 3), vec![a]);
        map.insert((1, 1), Vec::new());
        map.insert((4, 3), vec![b]);

        assert_eq!(map.squares(), vec![(4, 3), (1, 1)]);
        assert_eq!(map.get((4, 3)).expect("kept entry"), &[b]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn apply_move_executes_the_jump_without_touching_the_input() {
        let white = Piece::new(4, 3, Color::White);
        let black = Piece::new(5, 4, Color::Black);
        let board = board_with(&[white, black]);

        let moves = valid_moves(&board, white);
        let captured = moves.get((6, 5)).expect("jump available").to_vec();
        let next = apply_move(&board, white, (6, 5), &captured);

        assert!(next.piece_at(4, 3).is_none());
        assert!(next.piece_at(5, 4).is_none());
        assert!(next.piece_at(6, 5).is_some());
        assert_eq!(next.black_left(), 0);
        assert_eq!(board.black_left(), 1, "input board unchanged");
        assert!(board.piece_at(4, 3).is_some());
    }

    #[test]
    fn all_valid_moves_flattens_in_row_major_piece_order() {
        let board = BoardState::new();
        let moves = all_valid_moves(&board, Color::White);
        let rows: Vec<u8> = moves.iter().map(|(piece, _, _)| piece.row).collect();
        let mut sorted = rows.clone();
        sorted.sort_unstable();
        assert_eq!(rows, sorted);
        // Only the front rank can move at the start.
        assert!(moves.iter().all(|(piece, _, _)| piece.row == 2));
    }
}
