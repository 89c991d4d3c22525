//! Transposition table for caching solved positions
//!
//! Positions are keyed by [`Position::fingerprint`]. Each key maps to exactly
//! one slot (`fingerprint % capacity`) and a store always overwrites the slot,
//! whatever it held. A colliding position can therefore evict a more valuable
//! entry, which costs a re-search but never a wrong answer: lookups compare
//! the full fingerprint before returning anything.
//!
//! # Example
//!
//! ```
//! use connect4::search::{Bound, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1009);
//!
//! tt.store(0x1234, 5, Bound::Exact);
//! let entry = tt.lookup(0x1234).unwrap();
//! assert_eq!(entry.score, 5);
//!
//! // A different key is a miss, not a zero score
//! assert!(tt.lookup(0x1234 + 1009).is_none());
//! ```
//!
//! [`Position::fingerprint`]: crate::board::Position::fingerprint

/// Default slot count: a prime comfortably above the number of distinct
/// positions a single mid-game solve visits (128 MiB of entries).
pub const DEFAULT_CAPACITY: usize = 8_388_593;

/// How a stored score relates to the true value of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window; the score is the value
    Exact,
    /// Beta cutoff; the value is at least the score
    LowerBound,
    /// Fail-low; the value is at most the score
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Fingerprint of the position
    pub fingerprint: u64,
    /// Score in plies-to-end units, always within `MIN_SCORE..=MAX_SCORE`
    pub score: i8,
    /// Type of score (exact, lower bound, upper bound)
    pub bound: Bound,
}

/// Fixed-capacity, direct-mapped table with blind overwrite.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    capacity: usize,
}

impl TranspositionTable {
    /// Create a table with `capacity` slots (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: vec![None; capacity],
            capacity,
        }
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot index of a fingerprint
    #[inline]
    pub fn index(&self, fingerprint: u64) -> usize {
        (fingerprint % self.capacity as u64) as usize
    }

    /// Look up a position.
    ///
    /// Returns the entry only when the slot holds this exact fingerprint;
    /// an empty slot or a slot owned by another position is a miss.
    #[inline]
    #[must_use]
    pub fn lookup(&self, fingerprint: u64) -> Option<TTEntry> {
        self.entries[self.index(fingerprint)].filter(|e| e.fingerprint == fingerprint)
    }

    /// Store a result, overwriting whatever the slot holds.
    #[inline]
    pub fn store(&mut self, fingerprint: u64, score: i32, bound: Bound) {
        debug_assert!(i32::from(i8::MIN) <= score && score <= i32::from(i8::MAX));
        let idx = self.index(fingerprint);
        self.entries[idx] = Some(TTEntry {
            fingerprint,
            score: score as i8,
            bound,
        });
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.capacity,
            used,
            usage_percent: (used as f64 / self.capacity as f64 * 100.0) as u8,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
