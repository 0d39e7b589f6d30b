use super::*;
use crate::error::EngineError;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_index() {
    assert_eq!(Stone::Black.index(), 0);
    assert_eq!(Stone::White.index(), 1);
}

#[test]
#[should_panic]
fn test_empty_has_no_index() {
    let _ = Stone::Empty.index();
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_pos_step() {
    let pos = Pos::new(2, 2);
    assert_eq!(pos.step((1, 0), 2), (4, 2));
    assert_eq!(pos.step((-1, 1), 3), (-1, 5));
    assert_eq!(pos.step((1, 1), -1), (1, 1));
}

#[test]
fn test_board_dimensions() {
    assert!(Board::new(9, 9).is_ok());
    assert!(Board::new(1, 255).is_ok());
    assert!(matches!(
        Board::new(0, 5),
        Err(EngineError::InvalidDimensions { height: 0, width: 5 })
    ));
    assert!(Board::new(256, 5).is_err());

    let board = Board::default();
    assert_eq!(board.height(), DEFAULT_SIZE);
    assert_eq!(board.width(), DEFAULT_SIZE);
    assert_eq!(board.center(), Pos::new(7, 7));
}

#[test]
fn test_board_contains() {
    let board = Board::new(5, 7).unwrap();
    assert!(board.contains(0, 0));
    assert!(board.contains(4, 6));
    assert!(!board.contains(5, 0));
    assert!(!board.contains(0, 7));
    assert!(!board.contains(-1, 3));
    assert_eq!(board.stone_at(-1, 0), None);
    assert_eq!(board.stone_at(1, 1), Some(Stone::Empty));
}

#[test]
fn test_from_rows() {
    let board = Board::from_rows(&["o..", ".x.", "__o"]).unwrap();
    assert_eq!(board.get(Pos::new(0, 0)), Stone::Black);
    assert_eq!(board.get(Pos::new(1, 1)), Stone::White);
    assert_eq!(board.get(Pos::new(2, 2)), Stone::Black);
    assert_eq!(board.stone_count(), 3);
    assert_eq!(board.empty_cells().count(), 6);
}

#[test]
fn test_from_rows_rejects_bad_input() {
    assert!(matches!(
        Board::from_rows(&["o..", ".."]),
        Err(EngineError::InvalidPosition(_))
    ));
    assert!(matches!(
        Board::from_rows(&["o.?"]),
        Err(EngineError::InvalidPosition(_))
    ));
    let empty: [&str; 0] = [];
    assert!(Board::from_rows(&empty).is_err());
}

#[test]
fn test_try_place() {
    let mut board = Board::new(3, 3).unwrap();
    assert_eq!(board.try_place(1, 1, Stone::Black).unwrap(), Pos::new(1, 1));
    assert!(matches!(
        board.try_place(1, 1, Stone::White),
        Err(EngineError::Occupied { row: 1, col: 1 })
    ));
    assert!(matches!(
        board.try_place(3, 0, Stone::White),
        Err(EngineError::OutOfBounds { row: 3, .. })
    ));
}

#[test]
fn test_board_full_and_empty() {
    let mut board = Board::new(2, 2).unwrap();
    assert!(board.is_board_empty());
    assert!(!board.is_full());
    for pos in board.clone().positions() {
        board.place_stone(pos, Stone::White);
    }
    assert!(board.is_full());
    assert_eq!(board.empty_cells().count(), 0);
}

#[test]
fn test_hypothetical_undoes_on_drop() {
    let mut board = Board::from_rows(&[".....", "..o..", "....."]).unwrap();
    let before = board.clone();
    {
        let mut scope = board.hypothetical();
        scope.place(Pos::new(0, 0), Stone::Black);
        scope.place(Pos::new(2, 4), Stone::White);
        assert_eq!(scope.get(Pos::new(0, 0)), Stone::Black);
        assert_eq!(scope.placed_count(), 2);
        {
            let mut inner = scope.hypothetical();
            inner.place(Pos::new(1, 0), Stone::White);
            assert_eq!(inner.stone_count(), 4);
        }
        assert_eq!(scope.stone_count(), 3);
    }
    assert_eq!(board, before);
}

#[test]
fn test_hypothetical_undo_early() {
    let mut board = Board::new(3, 3).unwrap();
    let mut scope = board.hypothetical();
    scope.place(Pos::new(1, 1), Stone::Black);
    assert_eq!(scope.undo(), Some(Pos::new(1, 1)));
    assert_eq!(scope.undo(), None);
    assert!(scope.is_empty(Pos::new(1, 1)));
}

#[test]
fn test_state_play_is_a_copy() {
    let root = State::initial(9, 9).unwrap();
    let child = root.play(Pos::new(4, 4));

    assert!(root.board().is_board_empty());
    assert_eq!(child.board().get(Pos::new(4, 4)), Stone::Black);
    assert_eq!(child.to_move(), Stone::White);
    assert_eq!(child.last_mover(), Stone::Black);
    assert_eq!(root.diff(&child), Some(Pos::new(4, 4)));
    assert_eq!(child.diff(&root), None);
}

#[test]
fn test_state_try_play() {
    let root = State::initial(3, 3).unwrap();
    let next = root.try_play(0, 2).unwrap();
    assert!(next.try_play(0, 2).is_err());
    assert!(next.try_play(0, 3).is_err());
    assert_eq!(next.board().get(Pos::new(0, 2)), Stone::Black);
}

#[test]
fn test_state_from_rows_side_to_move() {
    assert!(State::from_rows(&["..."], Stone::Empty).is_err());
    let state = State::from_rows(&["o.."], Stone::White).unwrap();
    assert_eq!(state.to_move(), Stone::White);
}

#[test]
fn test_board_display() {
    let board = Board::from_rows(&["o.", ".x"]).unwrap();
    let text = board.to_string();
    assert!(text.contains(" o ."));
    assert!(text.contains(" . x"));
}
