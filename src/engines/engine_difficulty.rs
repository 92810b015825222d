//! Difficulty wrapper mixing searched moves with random ones.
//!
//! Each turn flips a weighted coin: heads delegates to the negamax engine,
//! tails to the random engine. Hard always searches.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_negamax::NegamaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, EngineOutput, SearchLimits};
use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Chance that a turn is played by search instead of at random.
    pub const fn search_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.7,
            Difficulty::Hard => 1.0,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium, or hard)"
            )),
        }
    }
}

pub struct DifficultyEngine {
    difficulty: Difficulty,
    negamax: NegamaxEngine,
    random: RandomEngine,
    rng: StdRng,
}

impl DifficultyEngine {
    /// The coin rng is seeded so a session can be replayed.
    pub fn new(difficulty: Difficulty, negamax: NegamaxEngine, seed: u64) -> Self {
        Self {
            difficulty,
            negamax,
            random: RandomEngine::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    pub fn negamax(&self) -> &NegamaxEngine {
        &self.negamax
    }

    #[inline]
    pub fn negamax_mut(&mut self) -> &mut NegamaxEngine {
        &mut self.negamax
    }
}

impl Engine for DifficultyEngine {
    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "Damson Easy",
            Difficulty::Medium => "Damson Medium",
            Difficulty::Hard => "Damson Hard",
        }
    }

    fn new_game(&mut self) {
        self.negamax.new_game();
        self.random.new_game();
    }

    fn choose_move(
        &mut self,
        board: &BoardState,
        color: Color,
        limits: &SearchLimits,
    ) -> Result<EngineOutput, String> {
        let searched = self
            .rng
            .random_bool(self.difficulty.search_probability());

        let mut out = if searched {
            self.negamax.choose_move(board, color, limits)?
        } else {
            self.random.choose_move(board, color, limits)?
        };
        out.info_lines.push(format!(
            "difficulty_engine {:?} searched {searched}",
            self.difficulty
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{Difficulty, DifficultyEngine};
    use crate::engines::engine_negamax::NegamaxEngine;
    use crate::engines::engine_trait::{Engine, SearchLimits};
    use crate::game_state::board_state::BoardState;
    use crate::game_state::draughts_types::{Color, Piece};
    use crate::search::transposition_table::TranspositionTable;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn search_probabilities_match_the_difficulty_ladder() {
        assert_eq!(Difficulty::Easy.search_probability(), 0.3);
        assert_eq!(Difficulty::Medium.search_probability(), 0.7);
        assert_eq!(Difficulty::Hard.search_probability(), 1.0);
    }

    #[test]
    fn hard_always_plays_the_searched_move() {
        let mut board = BoardState::empty();
        board.place(Piece::new(4, 3, Color::White));
        board.place(Piece::new(5, 4, Color::Black));

        let negamax = NegamaxEngine::with_table(1, TranspositionTable::from_seed(3));
        let mut engine = DifficultyEngine::new(Difficulty::Hard, negamax, 21);

        for _ in 0..5 {
            let out = engine
                .choose_move(&board, Color::White, &SearchLimits::default())
                .expect("engine runs");
            let next = out.next_board.expect("white has moves");
            assert_eq!(next.black_left(), 0, "hard mode always takes the jump");
        }
    }

    #[test]
    fn easy_mixes_searched_and_random_turns() {
        let mut board = BoardState::empty();
        board.place(Piece::new(4, 3, Color::White));
        board.place(Piece::new(5, 4, Color::Black));

        let negamax = NegamaxEngine::with_table(1, TranspositionTable::from_seed(3));
        let mut engine = DifficultyEngine::new(Difficulty::Easy, negamax, 21);

        let mut searched = 0u32;
        let mut random = 0u32;
        for _ in 0..100 {
            let out = engine
                .choose_move(&board, Color::White, &SearchLimits::default())
                .expect("engine runs");
            if out.info_lines.iter().any(|l| l.ends_with("searched true")) {
                searched += 1;
            } else {
                random += 1;
            }
        }
        assert!(searched > 0, "seeded coin lands on search within 100 turns");
        assert!(random > 0, "seeded coin lands on random within 100 turns");
    }
}
