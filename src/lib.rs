//! Crate root module declarations for the Damson Draughts engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, and utility helpers) so binaries, tests, and external
//! tooling can import stable module paths.

pub mod game_state {
    pub mod board_state;
    pub mod draughts_types;
}

pub mod move_generation {
    pub mod move_generator;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_difficulty;
    pub mod engine_negamax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod board_render;
    pub mod match_harness;
    pub mod move_notation;
}
