//! Pattern matching along a line
//!
//! A pattern is slid across the line through a point so that every window
//! containing the point is tried, starting with the window that begins at
//! the point. Windows that leave the board never match.

use crate::board::{Board, Pos, Stone};

use super::patterns::{LevelRange, Pattern, Symbol, ThreatLevel};

/// A pattern found through an anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch {
    pub pattern: &'static Pattern,
    /// Point the query went through
    pub anchor: Pos,
    /// Index of `anchor` inside the pattern window
    pub offset: usize,
    pub dir: (i32, i32),
}

impl LineMatch {
    #[inline]
    pub fn level(&self) -> ThreatLevel {
        self.pattern.level
    }

    /// Empty cells of the matched window, in line order.
    ///
    /// These are the squares an opponent is assumed to answer on.
    pub fn cost_squares(&self) -> impl Iterator<Item = Pos> + '_ {
        let (br, bc) = self.anchor.step(self.dir, -(self.offset as i32));
        let dir = self.dir;
        self.pattern
            .symbols()
            .enumerate()
            .filter(|&(_, s)| s == Symbol::Blank)
            .map(move |(i, _)| {
                let i = i as i32;
                Pos::new((br + dir.0 * i) as u8, (bc + dir.1 * i) as u8)
            })
    }
}

/// Slide `pattern` over the line through `pos` along `dir`.
///
/// Returns the index of `pos` inside the first window that matches, or
/// `None`. `mover` is the side whose stones satisfy `o`.
pub fn match_pattern(
    board: &Board,
    pos: Pos,
    dir: (i32, i32),
    pattern: &Pattern,
    mover: Stone,
) -> Option<usize> {
    (0..pattern.len()).find(|&offset| {
        let begin = pos.step(dir, -(offset as i32));
        window_matches(board, begin, dir, pattern, mover)
    })
}

fn window_matches(
    board: &Board,
    begin: (i32, i32),
    dir: (i32, i32),
    pattern: &Pattern,
    mover: Stone,
) -> bool {
    let opponent = mover.opponent();
    pattern.symbols().enumerate().all(|(i, symbol)| {
        let i = i as i32;
        let Some(stone) = board.stone_at(begin.0 + dir.0 * i, begin.1 + dir.1 * i) else {
            return false;
        };
        match symbol {
            Symbol::Own => stone == mover,
            Symbol::Blank => stone == Stone::Empty,
            Symbol::Opponent => stone == opponent,
        }
    })
}

/// First match through `pos` along `dir` among the patterns of `levels`,
/// trying the strongest level first and stopping at the first hit.
pub fn match_levels(
    board: &Board,
    pos: Pos,
    dir: (i32, i32),
    levels: LevelRange,
    mover: Stone,
) -> Option<LineMatch> {
    levels.patterns().iter().find_map(|pattern| {
        match_pattern(board, pos, dir, pattern, mover).map(|offset| LineMatch {
            pattern,
            anchor: pos,
            offset,
            dir,
        })
    })
}
