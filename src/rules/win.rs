//! Win condition checking
//!
//! A player wins with five or more stones in an unbroken line along any of
//! the four directions. A full board without such a line is a draw.

use std::fmt;

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Outcome of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The given player has five in a row
    Won(Stone),
    /// Board is full and nobody has five
    Draw,
    /// Game continues
    Undecided,
}

impl GameResult {
    /// Winner, if any
    #[inline]
    pub fn winner(self) -> Option<Stone> {
        match self {
            GameResult::Won(stone) => Some(stone),
            _ => None,
        }
    }

    /// True for a win or a draw
    #[inline]
    pub fn is_decided(self) -> bool {
        self != GameResult::Undecided
    }

    /// Payoff vector indexed by [`Stone::index`]: 1.0 to the winner, 0.0 to
    /// the loser, 0.5 each for anything else.
    pub fn payoffs(self) -> [f64; 2] {
        match self.winner() {
            Some(stone) => {
                let mut payoffs = [0.0; 2];
                payoffs[stone.index()] = 1.0;
                payoffs
            }
            None => [0.5, 0.5],
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Won(stone) => write!(f, "{stone} wins"),
            GameResult::Draw => f.write_str("draw"),
            GameResult::Undecided => f.write_str("undecided"),
        }
    }
}

/// Scan the whole board for a winner.
///
/// Each line is counted once, from its first stone, so the scan is linear in
/// the number of cells.
pub fn check_win(board: &Board) -> GameResult {
    for pos in board.positions() {
        let color = board.get(pos);
        if color == Stone::Empty {
            continue;
        }
        for &dir in &DIRECTIONS {
            let (pr, pc) = pos.step(dir, -1);
            if board.stone_at(pr, pc) == Some(color) {
                continue;
            }
            if run_length(board, pos, dir, color) >= WIN_LENGTH {
                return GameResult::Won(color);
            }
        }
    }

    if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::Undecided
    }
}

/// Count consecutive `color` stones starting at `pos` (inclusive) along `dir`.
#[inline]
fn run_length(board: &Board, pos: Pos, dir: (i32, i32), color: Stone) -> usize {
    let mut count = 0;
    let (mut r, mut c) = (pos.row as i32, pos.col as i32);
    while board.stone_at(r, c) == Some(color) {
        count += 1;
        r += dir.0;
        c += dir.1;
    }
    count
}

/// Fast five-in-a-row check through a specific position.
///
/// Only checks the 4 lines through `pos`. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let forward = run_length(board, pos, (dr, dc), color);
        let backward = run_length(board, pos, (-dr, -dc), color);
        // `pos` itself is counted by both walks
        forward + backward > WIN_LENGTH
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_undecided() {
        let board = Board::new(9, 9).unwrap();
        assert_eq!(check_win(&board), GameResult::Undecided);
    }

    #[test]
    fn test_horizontal_five() {
        let board = Board::from_rows(&[".......", ".ooooo.", "......."]).unwrap();
        assert_eq!(check_win(&board), GameResult::Won(Stone::Black));
    }

    #[test]
    fn test_vertical_five() {
        let board =
            Board::from_rows(&["x..", "x..", "x..", "x..", "x..", "..."]).unwrap();
        assert_eq!(check_win(&board), GameResult::Won(Stone::White));
    }

    #[test]
    fn test_diagonal_five() {
        let board = Board::from_rows(&[
            "o.....",
            ".o....",
            "..o...",
            "...o..",
            "....o.",
            "......",
        ])
        .unwrap();
        assert_eq!(check_win(&board), GameResult::Won(Stone::Black));
    }

    #[test]
    fn test_anti_diagonal_five() {
        let board = Board::from_rows(&[
            ".....x",
            "....x.",
            "...x..",
            "..x...",
            ".x....",
            "......",
        ])
        .unwrap();
        assert_eq!(check_win(&board), GameResult::Won(Stone::White));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let board = Board::from_rows(&["oooo.", "xxxx."]).unwrap();
        assert_eq!(check_win(&board), GameResult::Undecided);
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let board = Board::from_rows(&["oo.ooo"]).unwrap();
        assert_eq!(check_win(&board), GameResult::Undecided);
    }

    #[test]
    fn test_overline_wins() {
        let board = Board::from_rows(&["oooooo."]).unwrap();
        assert_eq!(check_win(&board), GameResult::Won(Stone::Black));
    }

    #[test]
    fn test_full_board_draw() {
        let board = Board::from_rows(&["oxo", "xox", "xox"]).unwrap();
        assert_eq!(check_win(&board), GameResult::Draw);
    }

    #[test]
    fn test_has_five_at_pos() {
        let board = Board::from_rows(&["..ooooo..", "........."]).unwrap();
        assert!(has_five_at_pos(&board, Pos::new(0, 2), Stone::Black));
        assert!(has_five_at_pos(&board, Pos::new(0, 4), Stone::Black));
        assert!(!has_five_at_pos(&board, Pos::new(1, 4), Stone::Black));
        assert!(!has_five_at_pos(&board, Pos::new(0, 4), Stone::White));
    }

    #[test]
    fn test_winner() {
        assert_eq!(GameResult::Won(Stone::White).winner(), Some(Stone::White));
        assert_eq!(GameResult::Draw.winner(), None);
        assert_eq!(GameResult::Undecided.winner(), None);

        let board = Board::from_rows(&[".......", "xxxxx..", "oooo..."]).unwrap();
        assert_eq!(check_win(&board).winner(), Some(Stone::White));
    }

    #[test]
    fn test_payoffs() {
        assert_eq!(GameResult::Won(Stone::Black).payoffs(), [1.0, 0.0]);
        assert_eq!(GameResult::Won(Stone::White).payoffs(), [0.0, 1.0]);
        assert_eq!(GameResult::Draw.payoffs(), [0.5, 0.5]);
        assert_eq!(GameResult::Undecided.payoffs(), [0.5, 0.5]);
    }
}
