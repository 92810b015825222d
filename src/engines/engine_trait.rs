//! Engine abstraction shared by the terminal game and the match harness.
//!
//! Engines hand back whole successor boards rather than encoded moves, so
//! consumers apply a turn by swapping in `next_board`. An output with no
//! board means the mover had no legal move and has lost. An output equal
//! to the input board is a stand-pat answer; consumers pass the turn.

use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::Color;

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub next_board: Option<BoardState>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        board: &BoardState,
        color: Color,
        limits: &SearchLimits,
    ) -> Result<EngineOutput, String>;
}
