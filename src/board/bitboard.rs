//! Bitboard over the padded 7x(6+1) column-major layout

use super::{COLUMN_BITS, WIDTH};

/// Shift steps for the four line directions: vertical, the two diagonals
/// (`COLUMN_BITS - 1` and `COLUMN_BITS + 1`) and horizontal.
const DIRECTIONS: [u32; 4] = [
    1,
    COLUMN_BITS as u32 - 1,
    COLUMN_BITS as u32,
    COLUMN_BITS as u32 + 1,
];

/// One player's stones, one bit per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self(0)
    }

    /// Raw mask
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Bit index of a cell
    #[inline]
    pub const fn cell_index(column: usize, row: usize) -> usize {
        column * COLUMN_BITS + row
    }

    /// Single-bit mask for a cell
    #[inline]
    pub const fn cell(column: usize, row: usize) -> u64 {
        1u64 << Self::cell_index(column, row)
    }

    /// Set the bit at `index`
    #[inline]
    pub fn set(&mut self, index: usize) {
        self.0 |= 1u64 << index;
    }

    /// Clear the bit at `index`
    #[inline]
    pub fn clear(&mut self, index: usize) {
        self.0 &= !(1u64 << index);
    }

    /// Check if a cell holds a stone
    #[inline]
    pub fn contains(self, column: usize, row: usize) -> bool {
        self.0 & Self::cell(column, row) != 0
    }

    /// Count stones (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check for four contiguous stones in any direction.
    ///
    /// `b & (b >> d)` marks every stone that starts a pair along `d`; doing
    /// the same again with step `2d` marks stones that start two adjacent
    /// pairs, i.e. a run of four.
    #[inline]
    pub fn has_four(self) -> bool {
        let b = self.0;
        DIRECTIONS.iter().any(|&d| {
            let pairs = b & (b >> d);
            pairs & (pairs >> (2 * d)) != 0
        })
    }

    /// Mirror the board left to right
    pub fn mirrored(self) -> Self {
        let column_mask = (1u64 << COLUMN_BITS) - 1;
        let mut out = 0u64;
        for column in 0..WIDTH {
            let bits = (self.0 >> (column * COLUMN_BITS)) & column_mask;
            out |= bits << ((WIDTH - 1 - column) * COLUMN_BITS);
        }
        Self(out)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(cells: &[(usize, usize)]) -> Bitboard {
        let mut b = Bitboard::new();
        for &(c, r) in cells {
            b.set(Bitboard::cell_index(c, r));
        }
        b
    }

    #[test]
    fn test_vertical_four() {
        assert!(line(&[(2, 0), (2, 1), (2, 2), (2, 3)]).has_four());
        assert!(!line(&[(2, 0), (2, 1), (2, 2)]).has_four());
    }

    #[test]
    fn test_horizontal_four() {
        assert!(line(&[(3, 5), (4, 5), (5, 5), (6, 5)]).has_four());
        assert!(!line(&[(0, 0), (1, 0), (2, 0), (4, 0)]).has_four());
    }

    #[test]
    fn test_diagonal_fours() {
        assert!(line(&[(0, 0), (1, 1), (2, 2), (3, 3)]).has_four());
        assert!(line(&[(6, 0), (5, 1), (4, 2), (3, 3)]).has_four());
        assert!(line(&[(3, 2), (4, 3), (5, 4), (6, 5)]).has_four());
    }

    #[test]
    fn test_no_wraparound_between_columns() {
        // Top of column 0 and bottom of column 1 are adjacent bits only
        // through the padding, which is never set.
        assert!(!line(&[(0, 4), (0, 5), (1, 0), (1, 1)]).has_four());
        // A rising diagonal leaving the top row would need a padding bit.
        assert!(!line(&[(0, 3), (1, 4), (2, 5), (3, 0)]).has_four());
    }

    #[test]
    fn test_contains_and_clear() {
        let mut b = Bitboard::new();
        b.set(Bitboard::cell_index(4, 2));
        assert!(b.contains(4, 2));
        assert_eq!(b.count(), 1);
        b.clear(Bitboard::cell_index(4, 2));
        assert!(b.is_empty());
    }

    #[test]
    fn test_mirrored() {
        let b = line(&[(0, 0), (1, 3), (3, 5)]);
        let m = b.mirrored();
        assert!(m.contains(6, 0));
        assert!(m.contains(5, 3));
        assert!(m.contains(3, 5));
        assert_eq!(m.count(), 3);
        assert_eq!(m.mirrored(), b);
    }
}
