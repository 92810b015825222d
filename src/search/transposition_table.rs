//! Durable transposition table keyed by Zobrist hash.
//!
//! Entries are first-write-wins: a hash that is already present keeps its
//! original entry. The board-to-hash step runs through a bounded snapshot
//! memo so repeated probes of the same position skip the full key fold.
//! The entry map can be saved to and reloaded from a bincode blob.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game_state::board_state::{BoardSnapshot, BoardState};
use crate::search::zobrist::ZobristKeys;

/// Snapshot-to-hash memo slots; the memo is dumped wholesale when full.
pub const HASH_MEMO_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub depth: u8,
    pub value: f64,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub memo_hits: u64,
}

#[derive(Debug)]
pub enum TableFileError {
    Io(std::io::Error),
    Codec(bincode::Error),
}

impl fmt::Display for TableFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFileError::Io(e) => write!(f, "table file io error: {e}"),
            TableFileError::Codec(e) => write!(f, "table file encoding error: {e}"),
        }
    }
}

impl Error for TableFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TableFileError::Io(e) => Some(e),
            TableFileError::Codec(e) => Some(e.as_ref()),
        }
    }
}

impl From<std::io::Error> for TableFileError {
    fn from(e: std::io::Error) -> Self {
        TableFileError::Io(e)
    }
}

impl From<bincode::Error> for TableFileError {
    fn from(e: bincode::Error) -> Self {
        TableFileError::Codec(e)
    }
}

/// Hash-keyed entry store plus the key table and memo that feed it.
///
/// Only the entry map is persisted; the Zobrist keys are not written out,
/// so reloaded entries line up with live hashes only when the keys were
/// built from the same seed.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: HashMap<u64, TableEntry>,
    keys: ZobristKeys,
    hash_memo: HashMap<BoardSnapshot, u64>,
    stats: TableStats,
}

impl TranspositionTable {
    /// Table with fresh random keys.
    pub fn new() -> Self {
        Self::with_keys(ZobristKeys::random())
    }

    /// Table with seed-derived keys; hashes are stable across runs.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_keys(ZobristKeys::from_seed(seed))
    }

    pub fn with_keys(keys: ZobristKeys) -> Self {
        Self {
            entries: HashMap::new(),
            keys,
            hash_memo: HashMap::with_capacity(HASH_MEMO_CAPACITY),
            stats: TableStats::default(),
        }
    }

    /// Hash for `board`, served from the memo when possible.
    pub fn position_hash(&mut self, board: &BoardState) -> u64 {
        let snapshot = board.snapshot();
        if let Some(&hash) = self.hash_memo.get(&snapshot) {
            self.stats.memo_hits += 1;
            return hash;
        }

        let hash = self.keys.hash(board);
        if self.hash_memo.len() >= HASH_MEMO_CAPACITY {
            self.hash_memo.clear();
        }
        self.hash_memo.insert(snapshot, hash);
        hash
    }

    pub fn get_entry(&mut self, board: &BoardState) -> Option<TableEntry> {
        self.stats.probes += 1;
        let hash = self.position_hash(board);
        let entry = self.entries.get(&hash).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    /// Record an entry for `board` unless its hash already has one.
    pub fn add_entry(&mut self, board: &BoardState, depth: u8, value: f64, bound: Bound) {
        self.stats.stores += 1;
        let hash = self.position_hash(board);
        self.entries
            .entry(hash)
            .or_insert(TableEntry { depth, value, bound });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    #[inline]
    pub fn clear_stats(&mut self) {
        self.stats = TableStats::default();
    }

    /// Serialize the entry map to `path`.
    pub fn to_file(&self, path: &Path) -> Result<(), TableFileError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &self.entries)?;
        Ok(())
    }

    /// Replace the entry map with the one stored at `path`.
    ///
    /// A missing file leaves the table untouched; an unreadable or garbled
    /// file is an error and the caller decides whether to start empty.
    pub fn from_file(&mut self, path: &Path) -> Result<(), TableFileError> {
        if !path.exists() {
            return Ok(());
        }
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        self.entries = bincode::deserialize_from(reader)?;
        Ok(())
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
