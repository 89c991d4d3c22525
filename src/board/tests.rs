use std::collections::HashMap;

use super::*;
use crate::error::PositionError;

/// 42-move game that fills the board without anyone connecting four
const DRAWN_GAME: &str = "643426421252361677317153414534371522655677";

#[test]
fn test_player_alternation() {
    assert_eq!(Player::from_ply(0), Player::One);
    assert_eq!(Player::from_ply(1), Player::Two);
    assert_eq!(Player::One.opponent(), Player::Two);
    assert_eq!(Player::One.number(), 1);
    assert_eq!(Player::Two.number(), 2);
}

#[test]
fn test_score_bounds() {
    assert_eq!(CELLS, 42);
    assert_eq!(MIN_SCORE, -18);
    assert_eq!(MAX_SCORE, 18);
    assert_eq!(MOVE_ORDER[0], CENTER_COLUMN);
}

#[test]
fn test_new_position() {
    let pos = Position::new();
    assert_eq!(pos.ply(), 0);
    assert_eq!(pos.current_player(), Player::One);
    assert_eq!(pos.fingerprint(), 0);
    assert!(!pos.is_full());
    assert_eq!(pos.legal_columns().count(), WIDTH);
}

#[test]
fn test_apply_move_sets_bit_and_height() {
    let mut pos = Position::new();
    pos.apply_move(3).unwrap();
    assert_eq!(pos.get(3, 0), Some(Player::One));
    assert_eq!(pos.column_height(3), 1);
    assert_eq!(pos.current_player(), Player::Two);

    pos.apply_move(3).unwrap();
    assert_eq!(pos.get(3, 1), Some(Player::Two));
    assert_eq!(pos.column_height(3), 2);
    assert_eq!(pos.moves(), "44");
}

#[test]
fn test_full_column_rejected_without_mutation() {
    let mut pos = Position::from_moves("111111").unwrap();
    assert!(!pos.can_play(0));
    let before = pos.clone();
    assert_eq!(pos.apply_move(0), Err(PositionError::ColumnFull(0)));
    assert_eq!(pos, before);
}

#[test]
fn test_out_of_range_column_rejected() {
    let mut pos = Position::new();
    assert!(!pos.can_play(7));
    assert_eq!(pos.apply_move(7), Err(PositionError::ColumnOutOfRange(7)));
    assert_eq!(pos.ply(), 0);
}

#[test]
fn test_undo_on_empty_rejected() {
    let mut pos = Position::new();
    assert_eq!(pos.undo_move(), Err(PositionError::NothingToUndo));
}

#[test]
fn test_move_undo_inverse() {
    let mut pos = Position::from_moves("4455").unwrap();
    let before = pos.clone();

    let played = [2usize, 2, 6, 0, 3, 1, 5, 5];
    for &c in &played {
        pos.apply_move(c).unwrap();
    }
    for &c in played.iter().rev() {
        assert_eq!(pos.undo_move().unwrap(), c);
    }

    assert_eq!(pos, before);
    assert_eq!(pos.fingerprint(), before.fingerprint());
}

#[test]
fn test_masks_stay_disjoint() {
    let mut pos = Position::new();
    for ch in DRAWN_GAME.chars() {
        let column = ch.to_digit(10).unwrap() as usize - 1;
        pos.apply_move(column).unwrap();
        let overlap = pos.mask(Player::One) & pos.mask(Player::Two);
        assert!(overlap.is_empty());
        assert_eq!(pos.occupied().count() as usize, pos.ply());
        // Padding row stays empty
        assert!((0..WIDTH).all(|c| !pos.occupied().contains(c, HEIGHT)));
    }
}

#[test]
fn test_three_in_row_completed_at_column_three() {
    // Player one: columns 0,1,2 on the bottom row. Player two plays 6, 6, 5.
    let mut pos = Position::from_moves("172736").unwrap();
    assert_eq!(pos.current_player(), Player::One);
    assert!(!pos.is_win(Player::One));
    assert!(pos.is_winning_move(3));
    assert!(!pos.is_winning_move(4));

    pos.apply_move(3).unwrap();
    assert!(pos.is_win(Player::One));
    assert_eq!(pos.winner(), Some(Player::One));
    assert!(pos.is_game_over());
}

#[test]
fn test_drawn_game_is_full_without_winner() {
    let pos = Position::from_moves(DRAWN_GAME).unwrap();
    assert!(pos.is_full());
    assert_eq!(pos.winner(), None);
    assert!(pos.is_game_over());
    assert_eq!(pos.legal_columns().count(), 0);
}

#[test]
fn test_fingerprint_unique_up_to_four_plies() {
    // Every sequence of up to four moves; equal keys must mean equal boards.
    let mut seen: HashMap<u64, (Bitboard, Bitboard)> = HashMap::new();
    let mut pos = Position::new();

    fn walk(
        pos: &mut Position,
        depth: usize,
        seen: &mut HashMap<u64, (Bitboard, Bitboard)>,
    ) {
        let boards = (pos.mask(Player::One), pos.mask(Player::Two));
        let previous = seen.insert(pos.fingerprint(), boards);
        if let Some(previous) = previous {
            assert_eq!(previous, boards, "fingerprint collision at {}", pos.moves());
        }
        if depth == 0 {
            return;
        }
        for column in 0..WIDTH {
            let mut child = pos.play_scoped(column);
            walk(&mut child, depth - 1, seen);
        }
    }

    walk(&mut pos, 4, &mut seen);
    // Distinct boards per ply: 1, 7, 49, 238, 1120
    assert_eq!(seen.len(), 1 + 7 + 49 + 238 + 1120);
    assert_eq!(pos, Position::new());
}

#[test]
fn test_fingerprint_depends_on_stone_owner() {
    // Same stones, different owners
    let a = Position::from_moves("12").unwrap();
    let b = Position::from_moves("21").unwrap();
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_from_moves_rejects_bad_input() {
    assert_eq!(
        Position::from_moves("448"),
        Err(PositionError::InvalidMoveChar { ch: '8', offset: 2 })
    );
    assert_eq!(
        Position::from_moves("1111111"),
        Err(PositionError::ColumnFull(0))
    );
    // Player one wins vertically on move 7; move 8 is illegal
    assert_eq!(
        Position::from_moves("12121212"),
        Err(PositionError::MoveAfterWin { ply: 8 })
    );
    assert!(Position::from_moves("4 4 5").is_ok());
}

#[test]
fn test_scoped_move_restores_on_drop() {
    let mut pos = Position::from_moves("44").unwrap();
    let before = pos.clone();
    {
        let mut child = pos.scoped_move(2).unwrap();
        assert_eq!(child.ply(), 3);
        child.apply_move(2).unwrap();
        child.undo_move().unwrap();
    }
    assert_eq!(pos, before);
    assert!(pos.scoped_move(9).is_err());
    assert_eq!(pos, before);
}

#[test]
fn test_scoped_move_undone_through_guard() {
    let mut pos = Position::from_moves("44").unwrap();
    let before = pos.clone();
    {
        let mut child = pos.scoped_move(2).unwrap();
        assert_eq!(child.undo_move().unwrap(), 2);
    }
    assert_eq!(pos, before);

    // Same on an empty parent: nothing left to pop on drop
    let mut empty = Position::new();
    {
        let mut child = empty.scoped_move(3).unwrap();
        child.undo_move().unwrap();
        assert_eq!(child.ply(), 0);
    }
    assert_eq!(empty, Position::new());
}

#[test]
fn test_scoped_move_takes_back_extra_moves() {
    let mut pos = Position::from_moves("44").unwrap();
    let before = pos.clone();
    {
        let mut child = pos.scoped_move(2).unwrap();
        child.apply_move(5).unwrap();
        child.apply_move(5).unwrap();
        assert_eq!(child.ply(), 5);
    }
    assert_eq!(pos, before);
}

#[test]
fn test_mirrored_position() {
    let pos = Position::from_moves("1234").unwrap();
    let mirror = pos.mirrored();
    assert_eq!(mirror.moves(), "7654");
    assert_eq!(mirror.mask(Player::One), pos.mask(Player::One).mirrored());
    assert_eq!(mirror.mask(Player::Two), pos.mask(Player::Two).mirrored());
}

#[test]
fn test_display() {
    let pos = Position::from_moves("4453").unwrap();
    let expected = "\
_ _ _ _ _ _ _
_ _ _ _ _ _ _
_ _ _ _ _ _ _
_ _ _ _ _ _ _
_ _ _ o _ _ _
_ _ o x x _ _
";
    assert_eq!(pos.to_string(), expected);
}

#[test]
fn test_reset() {
    let mut pos = Position::from_moves("4455").unwrap();
    pos.reset();
    assert_eq!(pos, Position::new());
}
