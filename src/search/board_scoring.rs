//! Static board evaluation.
//!
//! A pure count-based material score from White's perspective; search applies
//! its own sign to flip the viewpoint per node.

use crate::game_state::board_state::BoardState;

pub const MAN_WEIGHT: i32 = 1;
pub const KING_WEIGHT: i32 = 2;

/// Material balance, positive when White is ahead.
///
/// Kings weigh [`KING_WEIGHT`], uncrowned men [`MAN_WEIGHT`]. Reads only the
/// board's census counters, so it is cheap enough to call at every leaf.
#[inline]
pub fn evaluate(board: &BoardState) -> i32 {
    let white_kings = i32::from(board.white_kings());
    let black_kings = i32::from(board.black_kings());
    let white_men = i32::from(board.white_left()) - white_kings;
    let black_men = i32::from(board.black_left()) - black_kings;

    (white_men - black_men) * MAN_WEIGHT + (white_kings - black_kings) * KING_WEIGHT
}
