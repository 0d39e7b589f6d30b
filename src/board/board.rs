//! Board structure with scoped hypothetical placement

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{Pos, Stone, DEFAULT_SIZE, MAX_SIZE};
use crate::error::{EngineError, Result};

/// Game board of arbitrary height and width.
///
/// Cloning produces an independent copy; the search never shares a board
/// between branches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Stone>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidDimensions`] if either side is zero or
    /// larger than 255.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 || height > MAX_SIZE || width > MAX_SIZE {
            return Err(EngineError::InvalidDimensions { height, width });
        }
        Ok(Self {
            height,
            width,
            cells: vec![Stone::Empty; height * width],
        })
    }

    /// Parse a board from text rows.
    ///
    /// `o` is a black stone, `x` a white stone, `.` or `_` an empty cell.
    /// All rows must have the same length.
    ///
    /// # Example
    ///
    /// ```
    /// use gomoku::{Board, Pos, Stone};
    ///
    /// let board = Board::from_rows(&["..o", ".x.", "..."]).unwrap();
    /// assert_eq!(board.get(Pos::new(0, 2)), Stone::Black);
    /// assert_eq!(board.get(Pos::new(1, 1)), Stone::White);
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut board = Self::new(height, width)?;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != width {
                return Err(EngineError::InvalidPosition(format!(
                    "row {row} has {} cells, expected {width}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let stone = match ch {
                    'o' | 'O' => Stone::Black,
                    'x' | 'X' => Stone::White,
                    '.' | '_' => Stone::Empty,
                    other => {
                        return Err(EngineError::InvalidPosition(format!(
                            "unexpected '{other}' at ({row}, {col})"
                        )))
                    }
                };
                board.place_stone(Pos::new(row as u8, col as u8), stone);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Check whether signed coordinates fall on the board
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Convert signed coordinates into a position if they fall on the board
    #[inline]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        self.contains(row, col)
            .then(|| Pos::new(row as u8, col as u8))
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!((pos.row as usize) < self.height && (pos.col as usize) < self.width);
        pos.row as usize * self.width + pos.col as usize
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[self.index(pos)]
    }

    /// Get stone at signed coordinates, `None` off the board
    #[inline]
    pub fn stone_at(&self, row: i32, col: i32) -> Option<Stone> {
        self.pos_at(row, col).map(|pos| self.get(pos))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone without validation
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        let idx = self.index(pos);
        self.cells[idx] = stone;
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.place_stone(pos, Stone::Empty);
    }

    /// Place a stone after checking bounds and occupancy.
    pub fn try_place(&mut self, row: usize, col: usize, stone: Stone) -> Result<Pos> {
        if row >= self.height || col >= self.width {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.is_empty(pos) {
            return Err(EngineError::Occupied { row, col });
        }
        self.place_stone(pos, stone);
        Ok(pos)
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != Stone::Empty).count()
    }

    /// Check if board has no stones
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|&s| s == Stone::Empty)
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&s| s != Stone::Empty)
    }

    /// Middle cell, rounding down on even sides
    #[inline]
    pub fn center(&self) -> Pos {
        Pos::new((self.height / 2) as u8, (self.width / 2) as u8)
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |r| (0..self.width).map(move |c| Pos::new(r as u8, c as u8)))
    }

    /// Empty positions in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.is_empty(p))
    }

    /// Find the single cell that is empty here and occupied in `after`.
    ///
    /// Returns `None` if the boards differ in shape or no cell was filled.
    pub fn diff(&self, after: &Board) -> Option<Pos> {
        if self.height != after.height || self.width != after.width {
            return None;
        }
        self.positions()
            .find(|&p| self.is_empty(p) && !after.is_empty(p))
    }

    /// Open a scope of temporary placements, undone when the guard drops.
    #[inline]
    pub fn hypothetical(&mut self) -> Hypothetical<'_> {
        Hypothetical {
            board: self,
            placed: Vec::new(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            height: DEFAULT_SIZE,
            width: DEFAULT_SIZE,
            cells: vec![Stone::Empty; DEFAULT_SIZE * DEFAULT_SIZE],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.width {
            write!(f, "{:>2}", c % 100)?;
        }
        writeln!(f)?;
        for r in 0..self.height {
            write!(f, "{r:>3}")?;
            for c in 0..self.width {
                let stone = self.get(Pos::new(r as u8, c as u8));
                write!(f, " {}", stone.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Temporary placements on a borrowed board.
///
/// Every stone put down through [`Hypothetical::place`] is removed again, in
/// reverse order, when the guard goes out of scope, including early returns
/// out of a recursive search. Guards nest: a recursive call can open its own
/// scope through the outer guard.
pub struct Hypothetical<'a> {
    board: &'a mut Board,
    placed: Vec<Pos>,
}

impl Hypothetical<'_> {
    /// Put a stone on an empty cell for the lifetime of this scope
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.board.is_empty(pos), "hypothetical stone on occupied {pos}");
        self.board.place_stone(pos, stone);
        self.placed.push(pos);
    }

    /// Undo the most recent placement early
    #[inline]
    pub fn undo(&mut self) -> Option<Pos> {
        let pos = self.placed.pop()?;
        self.board.remove_stone(pos);
        Some(pos)
    }

    /// Number of stones currently held by this scope
    #[inline]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}

impl Deref for Hypothetical<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Hypothetical<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Hypothetical<'_> {
    fn drop(&mut self) {
        while let Some(pos) = self.placed.pop() {
            self.board.remove_stone(pos);
        }
    }
}
