//! Fixed-depth negamax engine.
//!
//! Owns a transposition table that persists across moves of a session; the
//! session driver can load it from disk before play and save it after.

use std::time::Instant;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchLimits};
use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::Color;
use crate::move_generation::move_generator::{all_valid_moves, apply_move};
use crate::search::negamax::{perspective_sign, search};
use crate::search::transposition_table::TranspositionTable;

pub const DEFAULT_SEARCH_DEPTH: u8 = 5;

pub struct NegamaxEngine {
    depth: u8,
    table: TranspositionTable,
}

impl NegamaxEngine {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            table: TranspositionTable::new(),
        }
    }

    pub fn with_table(depth: u8, table: TranspositionTable) -> Self {
        Self { depth, table }
    }

    #[inline]
    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    #[inline]
    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        &mut self.table
    }

    /// Best one-ply successor, each child valued by the remaining-depth
    /// search against the warm table. `None` when the mover is stuck.
    fn best_successor(&mut self, board: &BoardState, depth: u8, color: Color) -> Option<BoardState> {
        let sign = perspective_sign(color);
        let mut best = f64::NEG_INFINITY;
        let mut best_board = None;

        for (piece, dest, captured) in all_valid_moves(board, color) {
            let next = apply_move(board, piece, dest, &captured);
            let (reply, _) = search(
                &next,
                depth - 1,
                color.opposite(),
                -sign,
                f64::NEG_INFINITY,
                f64::INFINITY,
                &mut self.table,
            );
            let value = -reply;
            if value > best {
                best = value;
                best_board = Some(next);
            }
        }
        best_board
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "Damson Negamax"
    }

    fn new_game(&mut self) {
        // Entries apply across games; only the counters restart.
        self.table.clear_stats();
    }

    fn choose_move(
        &mut self,
        board: &BoardState,
        color: Color,
        limits: &SearchLimits,
    ) -> Result<EngineOutput, String> {
        let depth = limits.depth.unwrap_or(self.depth).max(1);

        let started = Instant::now();
        let (value, mut next_board) = search(
            board,
            depth,
            color,
            perspective_sign(color),
            f64::NEG_INFINITY,
            f64::INFINITY,
            &mut self.table,
        );
        // A root probe hit echoes the input board back; the cached value
        // carries no move, so recover one by expanding the root children.
        if next_board.as_ref() == Some(board) {
            next_board = self.best_successor(board, depth, color);
        }
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let stats = self.table.stats();
        let mut out = EngineOutput {
            next_board,
            ..EngineOutput::default()
        };
        out.info_lines.push(format!(
            "negamax_engine depth {depth} value {value} elapsed_ms {elapsed_ms:.3}"
        ));
        out.info_lines.push(format!(
            "negamax_engine table_len {} probes {} hits {} memo_hits {}",
            self.table.len(),
            stats.probes,
            stats.hits,
            stats.memo_hits
        ));
        Ok(out)
    }
}
