//! Interactive terminal game. The human plays Black against a White
//! engine; Black moves first.
//!
//! Run with:
//! `cargo run --release`
//! `cargo run --release -- --difficulty hard --depth 7`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use damson_draughts::engines::engine_difficulty::{Difficulty, DifficultyEngine};
use damson_draughts::engines::engine_negamax::{NegamaxEngine, DEFAULT_SEARCH_DEPTH};
use damson_draughts::engines::engine_trait::{Engine, SearchLimits};
use damson_draughts::game_state::board_state::BoardState;
use damson_draughts::game_state::draughts_types::{Color, Square};
use damson_draughts::move_generation::move_generator::{all_valid_moves, apply_move, valid_moves};
use damson_draughts::search::transposition_table::TranspositionTable;
use damson_draughts::utils::board_render::{render_board, square_number_legend};
use damson_draughts::utils::move_notation::{format_move, parse_move, square_number};

const DEFAULT_TABLE_PATH: &str = "ttable.bin";

struct SessionConfig {
    difficulty: Difficulty,
    depth: u8,
    table_path: PathBuf,
    seed: Option<u64>,
    use_table: bool,
}

enum GameEnd {
    Elimination(Color),
    Blocked(Color),
    Quit,
}

fn main() -> Result<(), String> {
    let Some(config) = parse_args(std::env::args().skip(1))? else {
        println!("{}", usage());
        return Ok(());
    };

    let mut table = match config.seed {
        Some(seed) => TranspositionTable::from_seed(seed),
        None => TranspositionTable::new(),
    };
    if config.use_table {
        if let Err(err) = table.from_file(&config.table_path) {
            eprintln!(
                "warning: ignoring table file {}: {}",
                config.table_path.display(),
                err
            );
        } else if !table.is_empty() {
            println!(
                "loaded {} table entries from {}",
                table.len(),
                config.table_path.display()
            );
        }
    }

    let coin_seed = config.seed.unwrap_or_else(rand::random);
    let negamax = NegamaxEngine::with_table(config.depth, table);
    let mut engine = DifficultyEngine::new(config.difficulty, negamax, coin_seed);
    engine.new_game();

    println!("damson draughts: you play Black, the engine plays White, Black moves first");
    println!("enter moves like 9-13 or 18x27; type 'help' for commands");
    println!();
    println!("{}", square_number_legend());
    println!();

    let mut board = BoardState::new();
    let mut mover = Color::Black;
    let limits = SearchLimits {
        depth: Some(config.depth),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", render_board(&board));

    let ending = loop {
        if let Some(winner) = board.winner() {
            break GameEnd::Elimination(winner);
        }
        let legal = all_valid_moves(&board, mover);
        if legal.is_empty() {
            break GameEnd::Blocked(mover);
        }

        match mover {
            Color::Black => {
                print!("black> ");
                io::stdout().flush().map_err(|err| err.to_string())?;
                let Some(line) = lines.next() else {
                    break GameEnd::Quit;
                };
                let line = line.map_err(|err| err.to_string())?;
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match input {
                    "quit" | "exit" => break GameEnd::Quit,
                    "help" => {
                        println!("{}", help_text());
                        continue;
                    }
                    "legend" => {
                        println!("{}", square_number_legend());
                        continue;
                    }
                    "board" => {
                        println!("{}", render_board(&board));
                        continue;
                    }
                    "moves" => {
                        for (piece, dest, captured) in &legal {
                            println!("  {}", format_move(piece, *dest, captured));
                        }
                        continue;
                    }
                    _ => {}
                }

                let parsed = match parse_move(input) {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                let Some(piece) = board.piece_at(parsed.from.0, parsed.from.1) else {
                    println!("square {} is empty", square_label(parsed.from));
                    continue;
                };
                if piece.color != Color::Black {
                    println!("square {} holds a White piece", square_label(parsed.from));
                    continue;
                }
                let moves = valid_moves(&board, piece);
                let Some(captured) = moves.get(parsed.to) else {
                    println!("illegal move; type 'moves' to list your options");
                    continue;
                };
                let captured = captured.to_vec();
                println!("black plays {}", format_move(&piece, parsed.to, &captured));
                board = apply_move(&board, piece, parsed.to, &captured);
                mover = Color::White;
                println!("{}", render_board(&board));
            }
            Color::White => {
                let out = engine.choose_move(&board, Color::White, &limits)?;
                for info in &out.info_lines {
                    println!("info {info}");
                }
                let Some(next) = out.next_board else {
                    break GameEnd::Blocked(Color::White);
                };
                // A cached answer may echo the board unchanged; the turn passes.
                if next == board {
                    println!("white stands pat");
                    mover = Color::Black;
                    continue;
                }
                if let Some((piece, dest, captured)) = legal
                    .iter()
                    .find(|(piece, dest, captured)| apply_move(&board, *piece, *dest, captured) == next)
                {
                    println!("white plays {}", format_move(piece, *dest, captured));
                }
                board = next;
                mover = Color::Black;
                println!("{}", render_board(&board));
            }
        }
    };

    match ending {
        GameEnd::Elimination(Color::White) => println!("White wins: Black is out of pieces."),
        GameEnd::Elimination(Color::Black) => println!("Black wins: White is out of pieces."),
        GameEnd::Blocked(Color::White) => println!("Black wins: White has no move."),
        GameEnd::Blocked(Color::Black) => println!("White wins: Black has no move."),
        GameEnd::Quit => println!("goodbye"),
    }

    if config.use_table {
        let table = engine.negamax().table();
        match table.to_file(&config.table_path) {
            Ok(()) => println!(
                "saved {} table entries to {}",
                table.len(),
                config.table_path.display()
            ),
            Err(err) => eprintln!(
                "warning: failed to save table to {}: {}",
                config.table_path.display(),
                err
            ),
        }
    }
    Ok(())
}

fn parse_args<I>(mut args: I) -> Result<Option<SessionConfig>, String>
where
    I: Iterator<Item = String>,
{
    let mut config = SessionConfig {
        difficulty: Difficulty::Medium,
        depth: DEFAULT_SEARCH_DEPTH,
        table_path: PathBuf::from(DEFAULT_TABLE_PATH),
        seed: None,
        use_table: true,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--difficulty" => {
                config.difficulty = expect_value(&mut args, "--difficulty")?.parse()?;
            }
            "--depth" => {
                let value = expect_value(&mut args, "--depth")?;
                config.depth = value
                    .parse()
                    .map_err(|_| format!("--depth expects a small integer, got '{value}'"))?;
            }
            "--table" => {
                config.table_path = PathBuf::from(expect_value(&mut args, "--table")?);
            }
            "--seed" => {
                let value = expect_value(&mut args, "--seed")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--seed expects an integer, got '{value}'"))?,
                );
            }
            "--no-table" => config.use_table = false,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument '{other}' (try --help)")),
        }
    }
    Ok(Some(config))
}

fn expect_value<I>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or_else(|| format!("{flag} requires a value"))
}

fn square_label(square: Square) -> String {
    match square_number(square.0, square.1) {
        Some(number) => number.to_string(),
        None => format!("({},{})", square.0, square.1),
    }
}

fn usage() -> &'static str {
    "damson_draughts: play draughts against the engine

USAGE:
    damson_draughts [OPTIONS]

OPTIONS:
    --difficulty <easy|medium|hard>   how often the engine searches instead of
                                      moving at random (default: medium)
    --depth <N>                       search depth in plies (default: 5)
    --table <PATH>                    transposition table file (default: ttable.bin)
    --seed <N>                        seed the hash keys and the difficulty coin
    --no-table                        skip loading and saving the table file
    --help                            print this message"
}

fn help_text() -> &'static str {
    "commands:
  9-13      move the piece on square 9 to square 13
  18x27     jump; write chains like 9x18x27 with every landing
  moves     list your legal moves
  board     reprint the board
  legend    print the square numbering
  quit      save the table and leave"
}
