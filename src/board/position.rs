//! Position: two player bitboards plus column heights and move history

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{Player, CELLS, COLUMN_BITS, HEIGHT, WIDTH};
use crate::error::PositionError;

/// Connect-4 position with O(1) move, undo and win detection.
///
/// `masks[p]` holds the stones of the player that moves on plies with parity
/// `p`. `heights[c]` is the bit index of the next free cell of column `c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    masks: [Bitboard; 2],
    heights: [u8; WIDTH],
    ply: usize,
    history: Vec<u8>,
}

impl Position {
    /// Empty board, player one to move
    pub fn new() -> Self {
        let mut heights = [0u8; WIDTH];
        for (column, h) in heights.iter_mut().enumerate() {
            *h = Self::base(column) as u8;
        }
        Self {
            masks: [Bitboard::new(); 2],
            heights,
            ply: 0,
            history: Vec::with_capacity(CELLS),
        }
    }

    /// Build a position from a move string such as `"4453"`.
    ///
    /// Columns are written 1-indexed (`1`..=`7`); whitespace is ignored.
    /// A move that lands in a full column, or any move after a player has
    /// connected four, is rejected.
    pub fn from_moves(moves: &str) -> Result<Self, PositionError> {
        let mut position = Self::new();
        for (offset, ch) in moves.char_indices() {
            if ch.is_whitespace() {
                continue;
            }
            let column = match ch.to_digit(10) {
                Some(d @ 1..=7) => d as usize - 1,
                _ => return Err(PositionError::InvalidMoveChar { ch, offset }),
            };
            if position.winner().is_some() {
                return Err(PositionError::MoveAfterWin {
                    ply: position.ply + 1,
                });
            }
            position.apply_move(column)?;
        }
        Ok(position)
    }

    /// Clear the board back to the initial position
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Lowest bit index of a column
    #[inline]
    const fn base(column: usize) -> usize {
        column * COLUMN_BITS
    }

    /// Bit index one past the top playable cell of a column
    #[inline]
    const fn top(column: usize) -> usize {
        Self::base(column) + HEIGHT
    }

    /// Whether a stone can be dropped into `column`
    #[inline]
    pub fn can_play(&self, column: usize) -> bool {
        column < WIDTH && usize::from(self.heights[column]) < Self::top(column)
    }

    /// Drop a stone for the player to move.
    ///
    /// Out-of-range and full columns are rejected and leave the position
    /// untouched.
    pub fn apply_move(&mut self, column: usize) -> Result<(), PositionError> {
        if column >= WIDTH {
            return Err(PositionError::ColumnOutOfRange(column));
        }
        if !self.can_play(column) {
            return Err(PositionError::ColumnFull(column));
        }
        self.push(column);
        Ok(())
    }

    /// Take back the last move and return its column
    pub fn undo_move(&mut self) -> Result<usize, PositionError> {
        if self.ply == 0 {
            return Err(PositionError::NothingToUndo);
        }
        Ok(self.pop())
    }

    /// Play `column` and undo it again when the returned guard is dropped.
    ///
    /// The guard derefs to the position, so the child position can be
    /// inspected, searched or played on through it. On drop it takes back
    /// whatever moves are still on the board above the parent's ply.
    pub fn scoped_move(&mut self, column: usize) -> Result<MoveGuard<'_>, PositionError> {
        self.apply_move(column)?;
        Ok(MoveGuard::new(self))
    }

    /// Unchecked variant of `scoped_move` for the search hot path
    #[inline]
    pub(crate) fn play_scoped(&mut self, column: usize) -> MoveGuard<'_> {
        self.push(column);
        MoveGuard::new(self)
    }

    /// Place a stone without validation. Caller guarantees `can_play(column)`.
    #[inline]
    pub(crate) fn push(&mut self, column: usize) {
        debug_assert!(self.can_play(column), "push on unplayable column {column}");
        let side = self.ply & 1;
        self.masks[side].set(usize::from(self.heights[column]));
        self.heights[column] += 1;
        self.history.push(column as u8);
        self.ply += 1;
    }

    /// Remove the last stone without validation. Caller guarantees `ply > 0`.
    #[inline]
    pub(crate) fn pop(&mut self) -> usize {
        debug_assert!(self.ply > 0, "pop on empty position");
        self.ply -= 1;
        let column = usize::from(self.history.pop().unwrap_or_default());
        self.heights[column] -= 1;
        let side = self.ply & 1;
        self.masks[side].clear(usize::from(self.heights[column]));
        column
    }

    /// Whether `player` has four in a row
    #[inline]
    pub fn is_win(&self, player: Player) -> bool {
        self.masks[player.index()].has_four()
    }

    /// Whether playing `column` now would connect four for the player to move.
    ///
    /// Evaluated on a copy of the mask; the position is not touched.
    #[inline]
    pub fn is_winning_move(&self, column: usize) -> bool {
        if !self.can_play(column) {
            return false;
        }
        let mut mask = self.masks[self.ply & 1];
        mask.set(usize::from(self.heights[column]));
        mask.has_four()
    }

    /// Board is full (a draw unless someone already connected four)
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ply >= CELLS
    }

    /// Player with four in a row, if any
    pub fn winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| self.is_win(p))
    }

    /// Game has ended by a win or a full board
    pub fn is_game_over(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Canonical key: the mover's stones added to the union of all stones.
    ///
    /// Within a column, `stones + occupied` lands in a distinct range per fill
    /// height and never carries past the padding bit, so the key identifies
    /// the stones of each side and whose turn it is.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        let occupied = self.masks[0] ^ self.masks[1];
        self.masks[self.ply & 1].bits() + occupied.bits()
    }

    /// Player to move
    #[inline]
    pub fn current_player(&self) -> Player {
        Player::from_ply(self.ply)
    }

    /// Stones placed so far
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Stones of `player`
    #[inline]
    pub fn mask(&self, player: Player) -> Bitboard {
        self.masks[player.index()]
    }

    /// Stones of both players
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.masks[0] | self.masks[1]
    }

    /// Stones currently in `column`
    #[inline]
    pub fn column_height(&self, column: usize) -> usize {
        usize::from(self.heights[column]) - Self::base(column)
    }

    /// Columns played so far, 0-indexed
    pub fn history(&self) -> impl Iterator<Item = usize> + '_ {
        self.history.iter().map(|&c| usize::from(c))
    }

    /// Move string in the 1-indexed notation accepted by `from_moves`
    pub fn moves(&self) -> String {
        self.history().map(|c| char::from(b'1' + c as u8)).collect()
    }

    /// Playable columns in ascending order
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&c| self.can_play(c))
    }

    /// Stone at a cell, `None` if empty
    pub fn get(&self, column: usize, row: usize) -> Option<Player> {
        if self.masks[0].contains(column, row) {
            Some(Player::One)
        } else if self.masks[1].contains(column, row) {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Left-right mirror image reached by mirroring every move
    pub fn mirrored(&self) -> Self {
        let mut position = Self::new();
        for column in self.history() {
            position.push(WIDTH - 1 - column);
        }
        position
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows top first, `x` for player one, `o` for player two, `_` for empty
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let symbol = self.get(column, row).map_or('_', Player::symbol);
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A move that is taken back when the guard is dropped.
///
/// Returned by [`Position::scoped_move`]; every exit path out of the scope,
/// early returns included, restores the parent position. Moves made or taken
/// back through the guard are accounted for: dropping pops only down to the
/// parent's ply, never below it.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
    parent_ply: usize,
}

impl<'a> MoveGuard<'a> {
    /// Wrap a position whose last move belongs to the guard
    #[inline]
    fn new(position: &'a mut Position) -> Self {
        let parent_ply = position.ply - 1;
        Self {
            position,
            parent_ply,
        }
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        while self.position.ply > self.parent_ply {
            self.position.pop();
        }
    }
}
