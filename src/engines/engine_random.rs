//! Uniform random-move engine.
//!
//! Picks uniformly from the legal moves and is used for low difficulties,
//! harness baselines, and tests.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchLimits};
use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::Color;
use crate::move_generation::move_generator::{all_valid_moves, apply_move};

pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Damson Random"
    }

    fn choose_move(
        &mut self,
        board: &BoardState,
        color: Color,
        _limits: &SearchLimits,
    ) -> Result<EngineOutput, String> {
        let moves = all_valid_moves(board, color);

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", moves.len()));

        if moves.is_empty() {
            return Ok(out);
        }

        let mut rng = rand::rng();
        let (piece, dest, captured) = moves
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose a random move")?;

        out.next_board = Some(apply_move(board, *piece, *dest, captured));
        Ok(out)
    }
}
