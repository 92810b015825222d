//! Negamax search with alpha-beta pruning over a transposition table.
//!
//! Values are `f64` so the unbounded window can use infinity sentinels. The
//! evaluator is White-positive; each node converts to the mover's viewpoint
//! through the `sign` argument, which the recursion flips along with the
//! window. The search returns whole successor boards rather than moves.

use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::Color;
use crate::move_generation::move_generator::{apply_move, valid_moves};
use crate::search::board_scoring::evaluate;
use crate::search::transposition_table::{Bound, TranspositionTable};

/// Root sign that makes the evaluation mover-positive.
#[inline]
pub fn perspective_sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Best achievable value for `mover` and the board that reaches it.
///
/// Returns `(-inf, None)` when the mover has no legal move; the caller must
/// treat that as an immediate loss instead of applying the result. A table
/// probe that already answers the node echoes the input board back.
pub fn search(
    board: &BoardState,
    depth: u8,
    mover: Color,
    sign: i32,
    mut alpha: f64,
    mut beta: f64,
    table: &mut TranspositionTable,
) -> (f64, Option<BoardState>) {
    // The entry window is classified against the pre-probe alpha.
    let alpha_original = alpha;

    if let Some(entry) = table.get_entry(board) {
        if entry.depth >= depth {
            match entry.bound {
                Bound::Exact => return (entry.value, Some(board.clone())),
                Bound::Lower => alpha = alpha.max(entry.value),
                Bound::Upper => beta = beta.min(entry.value),
            }
            if alpha >= beta {
                return (entry.value, Some(board.clone()));
            }
        }
    }

    if depth == 0 || board.winner().is_some() {
        return (f64::from(sign * evaluate(board)), Some(board.clone()));
    }

    let mut best = f64::NEG_INFINITY;
    let mut best_board: Option<BoardState> = None;

    'pieces: for piece in board.pieces_of(mover) {
        for (dest, captured) in valid_moves(board, piece) {
            let next = apply_move(board, piece, dest, &captured);
            let (reply, _) = search(
                &next,
                depth - 1,
                mover.opposite(),
                -sign,
                -beta,
                -alpha,
                table,
            );
            let value = -reply;

            // Strict comparison keeps the earliest best on ties.
            if value > best {
                best = value;
                best_board = Some(next);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                // Cutoff abandons the whole node, not just this piece.
                break 'pieces;
            }
        }
    }

    let bound = if best <= alpha_original {
        Bound::Upper
    } else if best >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    table.add_entry(board, depth, best, bound);

    (best, best_board)
}
