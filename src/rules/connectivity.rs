//! Incremental win detection
//!
//! [`WinTracker`] caches, for every occupied cell and every direction, how
//! many same-colored stones continue behind and ahead of it. Placing a stone
//! only touches the two runs it joins, so a win check after each move costs
//! O(line length) instead of a full board scan. Playouts call it once per
//! simulated move.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::win::{GameResult, WIN_LENGTH};

/// Per-direction run extents of one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Extent {
    /// Same-colored stones directly behind the cell
    behind: u16,
    /// Same-colored stones directly ahead of the cell
    ahead: u16,
}

/// Run-length cache mirroring a board as moves are added.
#[derive(Debug, Clone)]
pub struct WinTracker {
    width: usize,
    extents: Vec<[Extent; 4]>,
    empty: usize,
}

impl WinTracker {
    /// Build the cache for an existing position.
    pub fn new(board: &Board) -> Self {
        let mut extents = vec![[Extent::default(); 4]; board.height() * board.width()];

        for pos in board.positions() {
            let color = board.get(pos);
            if color == Stone::Empty {
                continue;
            }
            let cell = &mut extents[pos.row as usize * board.width() + pos.col as usize];
            for (d, &dir) in DIRECTIONS.iter().enumerate() {
                cell[d] = Extent {
                    behind: count_from(board, pos, (-dir.0, -dir.1), color),
                    ahead: count_from(board, pos, dir, color),
                };
            }
        }

        Self {
            width: board.width(),
            extents,
            empty: board.empty_cells().count(),
        }
    }

    #[inline]
    fn idx(&self, row: i32, col: i32) -> usize {
        row as usize * self.width + col as usize
    }

    /// Record `color` at `pos` and report the outcome.
    ///
    /// `board` is the position *before* the move; `pos` must be empty there.
    /// Only lines through `pos` are inspected, so a win elsewhere on the
    /// board that predates the tracker is not reported again.
    pub fn record(&mut self, board: &Board, pos: Pos, color: Stone) -> GameResult {
        debug_assert!(board.is_empty(pos));
        debug_assert_ne!(color, Stone::Empty);

        let mut won = false;
        for (d, &dir) in DIRECTIONS.iter().enumerate() {
            let (br, bc) = pos.step(dir, -1);
            let behind = if board.stone_at(br, bc) == Some(color) {
                self.extents[self.idx(br, bc)][d].behind + 1
            } else {
                0
            };
            let (ar, ac) = pos.step(dir, 1);
            let ahead = if board.stone_at(ar, ac) == Some(color) {
                self.extents[self.idx(ar, ac)][d].ahead + 1
            } else {
                0
            };

            let here = self.idx(pos.row as i32, pos.col as i32);
            self.extents[here][d] = Extent { behind, ahead };

            // Stones behind now see `pos` and everything past it
            for k in 1..=behind as i32 {
                let (r, c) = pos.step(dir, -k);
                let i = self.idx(r, c);
                self.extents[i][d].ahead = k as u16 + ahead;
            }
            for k in 1..=ahead as i32 {
                let (r, c) = pos.step(dir, k);
                let i = self.idx(r, c);
                self.extents[i][d].behind = k as u16 + behind;
            }

            if behind as usize + ahead as usize + 1 >= WIN_LENGTH {
                won = true;
            }
        }

        self.empty = self.empty.saturating_sub(1);
        if won {
            GameResult::Won(color)
        } else if self.empty == 0 {
            GameResult::Draw
        } else {
            GameResult::Undecided
        }
    }
}

/// Stones of `color` strictly past `pos` along `dir`
fn count_from(board: &Board, pos: Pos, dir: (i32, i32), color: Stone) -> u16 {
    let mut count = 0;
    let (mut r, mut c) = pos.step(dir, 1);
    while board.stone_at(r, c) == Some(color) {
        count += 1;
        r += dir.0;
        c += dir.1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::check_win;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_detects_five_when_gap_filled() {
        let mut board = Board::from_rows(&["oo.oo..", "......."]).unwrap();
        let mut tracker = WinTracker::new(&board);

        let result = tracker.record(&board, Pos::new(0, 2), Stone::Black);
        assert_eq!(result, GameResult::Won(Stone::Black));
        board.place_stone(Pos::new(0, 2), Stone::Black);
        assert_eq!(check_win(&board), result);
    }

    #[test]
    fn test_other_color_does_not_join() {
        let board = Board::from_rows(&["oo.oo..", "......."]).unwrap();
        let mut tracker = WinTracker::new(&board);
        assert_eq!(
            tracker.record(&board, Pos::new(0, 2), Stone::White),
            GameResult::Undecided
        );
    }

    #[test]
    fn test_last_cell_draw() {
        let board = Board::from_rows(&["oxo", "xox", "xo."]).unwrap();
        let mut tracker = WinTracker::new(&board);
        assert_eq!(
            tracker.record(&board, Pos::new(2, 2), Stone::White),
            GameResult::Draw
        );
    }

    #[test]
    fn test_agrees_with_full_scan_on_random_games() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);

        for game in 0..40 {
            let size = 6 + game % 5;
            let mut board = Board::new(size, size).unwrap();
            let mut tracker = WinTracker::new(&board);
            let mut cells: Vec<Pos> = board.positions().collect();
            cells.shuffle(&mut rng);

            let mut color = Stone::Black;
            for pos in cells {
                let incremental = tracker.record(&board, pos, color);
                board.place_stone(pos, color);
                let full = check_win(&board);
                assert_eq!(
                    incremental, full,
                    "game {game}: disagreement after {color} at {pos}\n{board}"
                );
                if full.is_decided() {
                    break;
                }
                color = color.opponent();
            }
        }
    }

    #[test]
    fn test_cache_from_existing_position() {
        // Tracker built mid-game must agree with one fed every move
        let board = Board::from_rows(&[".......", ".oo.o..", "..x.x..", "......."]).unwrap();
        let mut tracker = WinTracker::new(&board);
        assert_eq!(
            tracker.record(&board, Pos::new(1, 3), Stone::Black),
            GameResult::Undecided
        );
        let mut next = board.clone();
        next.place_stone(Pos::new(1, 3), Stone::Black);
        assert_eq!(
            tracker.record(&next, Pos::new(1, 5), Stone::Black),
            GameResult::Won(Stone::Black)
        );
    }
}
