//! Game state: a board plus the side to move

use std::fmt;

use super::{Board, Pos, Stone};
use crate::error::{EngineError, Result};

/// A position together with the player whose turn it is.
///
/// States are values. [`State::play`] returns a fresh state and leaves the
/// original untouched, so sibling branches of a search never observe each
/// other's moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    board: Board,
    to_move: Stone,
}

impl State {
    /// Wrap a board with the side to move.
    ///
    /// # Panics
    /// Panics if `to_move` is `Stone::Empty`.
    pub fn new(board: Board, to_move: Stone) -> Self {
        assert_ne!(to_move, Stone::Empty, "side to move must be a player");
        Self { board, to_move }
    }

    /// Empty board of the given size with Black to move.
    pub fn initial(height: usize, width: usize) -> Result<Self> {
        Ok(Self::new(Board::new(height, width)?, Stone::Black))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Player whose move produced this state.
    #[inline]
    pub fn last_mover(&self) -> Stone {
        self.to_move.opponent()
    }

    /// Successor state with the side to move placed at `pos`.
    ///
    /// `pos` must be an empty cell on the board; use [`State::try_play`] for
    /// unchecked input.
    #[must_use]
    pub fn play(&self, pos: Pos) -> State {
        debug_assert!(self.board.is_empty(pos), "play on occupied {pos}");
        let mut board = self.board.clone();
        board.place_stone(pos, self.to_move);
        State {
            board,
            to_move: self.to_move.opponent(),
        }
    }

    /// Validated variant of [`State::play`] for moves from outside the engine.
    pub fn try_play(&self, row: usize, col: usize) -> Result<State> {
        let mut board = self.board.clone();
        board.try_place(row, col, self.to_move)?;
        Ok(State {
            board,
            to_move: self.to_move.opponent(),
        })
    }

    /// Move that leads from this state to `next`, if `next` is a successor.
    pub fn diff(&self, next: &State) -> Option<Pos> {
        self.board.diff(&next.board)
    }

    /// Build a state from text rows, checking the side to move.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], to_move: Stone) -> Result<Self> {
        if to_move == Stone::Empty {
            return Err(EngineError::InvalidPosition(
                "side to move must be black or white".to_string(),
            ));
        }
        Ok(Self::new(Board::from_rows(rows)?, to_move))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Board::default(), Stone::Black)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} to move", self.to_move)?;
        write!(f, "{}", self.board)
    }
}
