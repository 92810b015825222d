//! Zobrist keys for board hashing.
//!
//! One 64-bit key per (square, color) pair; a position's hash XOR-folds the
//! keys of its occupied cells. King status does not enter the key class, so
//! two boards differing only in crowning share a hash bucket.

use rand::Rng;

use crate::game_state::board_state::BoardState;
use crate::game_state::draughts_types::{COLS, ROWS};

pub type RawKeys = [[[u64; 2]; COLS]; ROWS];

/// Per-square key table owned by a transposition table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    keys: RawKeys,
}

impl ZobristKeys {
    /// Fresh keys from the thread-local generator. Every key is nonzero, so
    /// no occupied cell can cancel out of a hash.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let mut keys: RawKeys = [[[0; 2]; COLS]; ROWS];
        for row in &mut keys {
            for cell in row {
                for key in cell {
                    *key = rng.random_range(1..=u64::MAX);
                }
            }
        }
        Self { keys }
    }

    /// Deterministic keys from a seed, for reproducible hashes across runs.
    pub fn from_seed(seed: u64) -> Self {
        let mut state = seed;
        let mut keys: RawKeys = [[[0; 2]; COLS]; ROWS];
        for row in &mut keys {
            for cell in row {
                for key in cell {
                    *key = next_random_u64(&mut state);
                }
            }
        }
        Self { keys }
    }

    pub const fn from_keys(keys: RawKeys) -> Self {
        Self { keys }
    }

    /// XOR-fold of the keys under every occupied cell. The empty board
    /// hashes to zero.
    pub fn hash(&self, board: &BoardState) -> u64 {
        let mut h = 0u64;
        for row in 0..ROWS {
            for col in 0..COLS {
                if let Some(piece) = board.piece_at(row as u8, col as u8) {
                    h ^= self.keys[row][col][piece.color.index()];
                }
            }
        }
        h
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::ZobristKeys;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::draughts_types::{Color, Piece};

    #[test]
    fn seeded_keys_hash_deterministically() {
        let a = ZobristKeys::from_seed(42);
        let b = ZobristKeys::from_seed(42);
        let board = BoardState::new();
        assert_eq!(a.hash(&board), b.hash(&board));
        assert_eq!(a.hash(&BoardState::empty()), 0);
    }

    #[test]
    fn different_seeds_give_different_keys() {
        let a = ZobristKeys::from_seed(1);
        let b = ZobristKeys::from_seed(2);
        assert_ne!(a, b);
    }

    #[test]
    fn moving_a_piece_changes_the_hash() {
        let keys = ZobristKeys::from_seed(7);
        let before = BoardState::new();
        let mut after = before.clone();
        let piece = after.piece_at(5, 0).expect("black man on (5, 0)");
        after.move_piece(piece, 4, 1);
        assert_ne!(keys.hash(&before), keys.hash(&after));
    }

    #[test]
    fn crowning_does_not_change_the_hash() {
        let keys = ZobristKeys::from_seed(7);

        let mut man = BoardState::empty();
        man.place(Piece::new(4, 3, Color::White));

        let mut king = BoardState::empty();
        let mut crowned = Piece::new(4, 3, Color::White);
        crowned.king = true;
        king.place(crowned);

        assert_eq!(keys.hash(&man), keys.hash(&king));
    }

    #[test]
    fn piece_color_changes_the_hash() {
        let keys = ZobristKeys::from_seed(7);

        let mut white = BoardState::empty();
        white.place(Piece::new(4, 3, Color::White));

        let mut black = BoardState::empty();
        black.place(Piece::new(4, 3, Color::Black));

        assert_ne!(keys.hash(&white), keys.hash(&black));
    }

    #[test]
    fn random_keys_are_all_nonzero() {
        let keys = ZobristKeys::random();
        for row in &keys.keys {
            for cell in row {
                for key in cell {
                    assert_ne!(*key, 0);
                }
            }
        }
    }
}
