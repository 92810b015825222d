//! Head-to-head engine match harness.
//!
//! Runs two `Engine` implementations against each other without any
//! terminal I/O, with an optional seeded random opening prefix. A side
//! loses when it is out of pieces, has no legal move, or its engine
//! declines to produce a board. An engine that echoes its input board
//! unchanged stands pat and the turn passes.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{Engine, SearchLimits};
use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::Color;
use crate::move_generation::move_generator::{all_valid_moves, apply_move};
use crate::utils::move_notation::format_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinElimination,
    WhiteWinBlocked,
    BlackWinElimination,
    BlackWinBlocked,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Color },
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub limits: SearchLimits,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 2,
            opening_max_plies: 6,
            limits: SearchLimits::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: BoardState,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the starting position.
///
/// Black moves first, per the rules of the game.
pub fn play_match(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    play_match_internal(
        &mut engine_white,
        &mut engine_black,
        BoardState::new(),
        Color::Black,
        seed,
        config,
        true,
    )
}

/// Play a match from a caller-provided board and mover.
///
/// Bypasses the random opening; intended for curated scenarios and tests.
pub fn play_match_from_board(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    board: BoardState,
    first_mover: Color,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    play_match_internal(
        &mut engine_white,
        &mut engine_black,
        board,
        first_mover,
        seed,
        config,
        false,
    )
}

struct MatchProgress {
    opening_moves: Vec<String>,
    played_moves: Vec<String>,
    white_move_count: u32,
    black_move_count: u32,
    white_total_time_ns: u128,
    black_total_time_ns: u128,
}

fn finish(outcome: MatchOutcome, board: BoardState, progress: MatchProgress) -> MatchResult {
    MatchResult {
        outcome,
        final_board: board,
        opening_moves: progress.opening_moves,
        played_moves: progress.played_moves,
        white_move_count: progress.white_move_count,
        black_move_count: progress.black_move_count,
        white_total_time_ns: progress.white_total_time_ns,
        black_total_time_ns: progress.black_total_time_ns,
    }
}

#[inline]
fn elimination_win(winner: Color) -> MatchOutcome {
    match winner {
        Color::White => MatchOutcome::WhiteWinElimination,
        Color::Black => MatchOutcome::BlackWinElimination,
    }
}

#[inline]
fn blocked_loss(stuck_mover: Color) -> MatchOutcome {
    match stuck_mover {
        Color::White => MatchOutcome::BlackWinBlocked,
        Color::Black => MatchOutcome::WhiteWinBlocked,
    }
}

fn play_match_internal(
    engine_white: &mut Box<dyn Engine>,
    engine_black: &mut Box<dyn Engine>,
    mut board: BoardState,
    mut mover: Color,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> Result<MatchResult, String> {
    engine_white.new_game();
    engine_black.new_game();

    let mut progress = MatchProgress {
        opening_moves: Vec::new(),
        played_moves: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    if apply_random_opening {
        let opening = apply_seeded_random_opening(
            &board,
            mover,
            seed,
            config.opening_min_plies,
            config.opening_max_plies,
        );
        board = opening.board;
        mover = opening.next_mover;
        progress.opening_moves = opening.moves;
    }

    for _ in 0..config.max_plies {
        if let Some(winner) = board.winner() {
            return Ok(finish(elimination_win(winner), board, progress));
        }

        let legal = all_valid_moves(&board, mover);
        if legal.is_empty() {
            return Ok(finish(blocked_loss(mover), board, progress));
        }

        let started = Instant::now();
        let out = match mover {
            Color::White => engine_white.choose_move(&board, mover, &config.limits)?,
            Color::Black => engine_black.choose_move(&board, mover, &config.limits)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                progress.white_move_count = progress.white_move_count.saturating_add(1);
                progress.white_total_time_ns =
                    progress.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                progress.black_move_count = progress.black_move_count.saturating_add(1);
                progress.black_total_time_ns =
                    progress.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(next) = out.next_board else {
            return Ok(finish(blocked_loss(mover), board, progress));
        };

        // An engine answering from cache may echo the input board unchanged;
        // the mover stands pat for the ply and the turn passes.
        if next == board {
            mover = mover.opposite();
            continue;
        }

        // The engine hands back a whole board; pin it to the move it encodes.
        let (piece, dest, captured) = legal
            .iter()
            .find(|(piece, dest, captured)| apply_move(&board, *piece, *dest, captured) == next)
            .ok_or_else(|| {
                format!("{} returned a board no legal move produces", mover_name(mover))
            })?;
        progress
            .played_moves
            .push(format_move(piece, *dest, captured));

        board = next;
        mover = mover.opposite();
    }

    Ok(finish(MatchOutcome::DrawMaxPlies, board, progress))
}

#[inline]
fn mover_name(color: Color) -> &'static str {
    match color {
        Color::White => "white engine",
        Color::Black => "black engine",
    }
}

struct OpeningResult {
    board: BoardState,
    next_mover: Color,
    moves: Vec<String>,
}

fn apply_seeded_random_opening(
    initial: &BoardState,
    first_mover: Color,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> OpeningResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = initial.clone();
    let mut mover = first_mover;
    let mut moves = Vec::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        if board.winner().is_some() {
            break;
        }
        let legal = all_valid_moves(&board, mover);
        if legal.is_empty() {
            break;
        }

        let idx = rng.random_range(0..legal.len());
        let (piece, dest, captured) = &legal[idx];
        moves.push(format_move(piece, *dest, captured));
        board = apply_move(&board, *piece, *dest, captured);
        mover = mover.opposite();
    }

    OpeningResult {
        board,
        next_mover: mover,
        moves,
    }
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (white, black) = if player1_is_white {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} white={} black={}",
                i + 1,
                config.games,
                seed,
                white,
                black
            );
        }

        let result = if player1_is_white {
            play_match(
                player1_factory(),
                player2_factory(),
                seed,
                config.per_game.clone(),
            )?
        } else {
            play_match(
                player2_factory(),
                player1_factory(),
                seed,
                config.per_game.clone(),
            )?
        };

        if player1_is_white {
            stats.player1_moves = stats.player1_moves.saturating_add(result.white_move_count);
            stats.player2_moves = stats.player2_moves.saturating_add(result.black_move_count);
            stats.player1_total_time_ns = stats
                .player1_total_time_ns
                .saturating_add(result.white_total_time_ns);
            stats.player2_total_time_ns = stats
                .player2_total_time_ns
                .saturating_add(result.black_total_time_ns);
        } else {
            stats.player1_moves = stats.player1_moves.saturating_add(result.black_move_count);
            stats.player2_moves = stats.player2_moves.saturating_add(result.white_move_count);
            stats.player1_total_time_ns = stats
                .player1_total_time_ns
                .saturating_add(result.black_total_time_ns);
            stats.player2_total_time_ns = stats
                .player2_total_time_ns
                .saturating_add(result.white_total_time_ns);
        }

        let mapped = match result.outcome {
            MatchOutcome::WhiteWinElimination | MatchOutcome::WhiteWinBlocked => {
                if player1_is_white {
                    stats.player1_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player1,
                        color: Color::White,
                    }
                } else {
                    stats.player2_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player2,
                        color: Color::White,
                    }
                }
            }
            MatchOutcome::BlackWinElimination | MatchOutcome::BlackWinBlocked => {
                if player1_is_white {
                    stats.player2_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player2,
                        color: Color::Black,
                    }
                } else {
                    stats.player1_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player1,
                        color: Color::Black,
                    }
                }
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} p1_wins={} p2_wins={} draws={}\n",
                i + 1,
                config.games,
                result.outcome,
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}
