//! Terminal-oriented Unicode board renderer.
//!
//! Produces a human-readable grid from the board state for the interactive
//! game, diagnostics, and tests. Row 0 is drawn at the top, so the Black
//! side sits at the bottom of the picture in front of the human player.

use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::{is_dark_square, Color, Piece, COLS, ROWS};
use crate::utils::move_notation::square_number;

/// Render the board to a Unicode string for terminal output.
pub fn render_board(board: &BoardState) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2 3 4 5 6 7\n");

    for row in 0..ROWS {
        out.push(char::from(b'0' + row as u8));
        out.push(' ');

        for col in 0..COLS {
            match board.piece_at(row as u8, col as u8) {
                Some(piece) => out.push(piece_glyph(&piece)),
                None if is_dark_square(row, col) => out.push('·'),
                None => out.push(' '),
            }
            if col < COLS - 1 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'0' + row as u8));
        out.push('\n');
    }

    out.push_str("  0 1 2 3 4 5 6 7");
    out
}

/// Grid of the 1-32 square numbers, for entering moves.
pub fn square_number_legend() -> String {
    let mut out = String::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            match square_number(row as u8, col as u8) {
                Some(n) => out.push_str(&format!("{n:>3}")),
                None => out.push_str("  ·"),
            }
        }
        out.push('\n');
    }
    out.pop();
    out
}

fn piece_glyph(piece: &Piece) -> char {
    match (piece.color, piece.king) {
        (Color::White, false) => '⛀',
        (Color::White, true) => '⛁',
        (Color::Black, false) => '⛂',
        (Color::Black, true) => '⛃',
    }
}

#[cfg(test)]
mod tests {
    use super::{render_board, square_number_legend};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::draughts_types::{Color, Piece};

    #[test]
    fn starting_board_renders_twelve_men_per_side() {
        let text = render_board(&BoardState::new());
        assert_eq!(text.chars().filter(|c| *c == '⛀').count(), 12);
        assert_eq!(text.chars().filter(|c| *c == '⛂').count(), 12);
        assert_eq!(text.lines().count(), 10, "legend rows plus eight ranks");
    }

    #[test]
    fn kings_render_with_their_own_glyphs() {
        let mut board = BoardState::empty();
        let mut white = Piece::new(3, 4, Color::White);
        white.king = true;
        let mut black = Piece::new(4, 3, Color::Black);
        black.king = true;
        board.place(white);
        board.place(black);

        let text = render_board(&board);
        assert!(text.contains('⛁'));
        assert!(text.contains('⛃'));
    }

    #[test]
    fn legend_lists_all_squares_in_order() {
        let legend = square_number_legend();
        assert!(legend.contains(" 1"));
        assert!(legend.contains(" 32"));
        assert_eq!(legend.lines().count(), 8);
    }
}
