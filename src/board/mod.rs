//! Board representation for Gomoku

pub mod board;
pub mod state;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::{Board, Hypothetical};
pub use state::State;

/// Default board size (15x15)
pub const DEFAULT_SIZE: usize = 15;

/// Largest supported side length; coordinates are stored as `u8`.
pub const MAX_SIZE: usize = u8::MAX as usize;

/// Line directions: vertical, horizontal, diagonal, anti-diagonal.
///
/// The order is significant for the threat search, which tries each of them
/// in turn through a gain square.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Slot of this player in a payoff vector (Black = 0, White = 1).
    ///
    /// # Panics
    /// Panics for `Stone::Empty`, which is not a player.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Stone::Black => 0,
            Stone::White => 1,
            Stone::Empty => panic!("empty cell has no player index"),
        }
    }

    /// Character used by [`Board::from_rows`] and the board display.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'o',
            Stone::White => 'x',
            Stone::Empty => '.',
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stone::Black => "black",
            Stone::White => "white",
            Stone::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Position on the board, ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Signed coordinates of the cell `steps` cells away along `dir`.
    ///
    /// The result may lie off the board; check it with [`Board::contains`].
    #[inline]
    pub fn step(self, dir: (i32, i32), steps: i32) -> (i32, i32) {
        (
            self.row as i32 + dir.0 * steps,
            self.col as i32 + dir.1 * steps,
        )
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
