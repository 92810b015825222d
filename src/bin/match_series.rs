//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin match_series`
//! `cargo run --release --bin match_series -- --verbose`

use chrono::Local;

use damson_draughts::engines::engine_negamax::NegamaxEngine;
use damson_draughts::engines::engine_random::RandomEngine;
use damson_draughts::engines::engine_trait::Engine;
use damson_draughts::search::transposition_table::TranspositionTable;
use damson_draughts::utils::match_harness::{play_match_series, MatchConfig, MatchSeriesConfig};

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    // Swap these two factories to pit different engines or depths.
    let player1 = || {
        Box::new(NegamaxEngine::with_table(3, TranspositionTable::from_seed(11)))
            as Box<dyn Engine>
    };
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    println!(
        "match series started {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let stats = play_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 200,
                opening_min_plies: 2,
                opening_max_plies: 6,
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    println!(
        "match series finished {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
