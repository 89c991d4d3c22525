//! Board representation for Connect-4
//!
//! Cells are packed column-major into a `u64`: column `c` owns bits
//! `c * 7 ..= c * 7 + 6`, the topmost of which is a padding bit that is never
//! set. The padding stops horizontal and diagonal shifts from wrapping into
//! the next column.
//!
//! ```text
//!   6 13 20 27 34 41 48   <- padding
//! +---------------------+
//! | 5 12 19 26 33 40 47 |
//! | 4 11 18 25 32 39 46 |
//! | 3 10 17 24 31 38 45 |
//! | 2  9 16 23 30 37 44 |
//! | 1  8 15 22 29 36 43 |
//! | 0  7 14 21 28 35 42 |
//! +---------------------+
//! ```

pub mod bitboard;
pub mod position;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use position::{MoveGuard, Position};

/// Number of columns
pub const WIDTH: usize = 7;
/// Number of playable rows per column
pub const HEIGHT: usize = 6;
/// Bits reserved per column (playable rows + one padding bit)
pub const COLUMN_BITS: usize = HEIGHT + 1;
/// Total playable cells; the board is full after this many plies
pub const CELLS: usize = WIDTH * HEIGHT; // 42

/// Lowest score the search can return (fastest possible loss)
pub const MIN_SCORE: i32 = -(CELLS as i32) / 2 + 3; // -18
/// Highest score the search can return (fastest possible win)
pub const MAX_SCORE: i32 = (CELLS as i32 + 1) / 2 - 3; // 18

/// Center-out column preference used by every search loop
pub const MOVE_ORDER: [usize; WIDTH] = [3, 4, 2, 5, 1, 6, 0];

/// Center column, played on an empty board
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// Player slots. `One` moves on even plies, `Two` on odd plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Player whose turn it is after `ply` stones have been placed
    #[inline]
    pub fn from_ply(ply: usize) -> Player {
        if ply % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Mask slot of this player (0 or 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Human-facing player number (1 or 2)
    #[inline]
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Text symbol used by `Position`'s `Display`
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::One => 'x',
            Player::Two => 'o',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
