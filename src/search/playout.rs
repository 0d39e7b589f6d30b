//! Fast simulated games used to score leaf positions

use rand::seq::SliceRandom;

use super::policy::Policy;
use crate::board::State;
use crate::rules::{check_win, GameResult, WinTracker};

/// Plays random rapid-policy moves from a position until someone wins or the
/// move cap is hit.
#[derive(Debug, Clone, Copy)]
pub struct Playout {
    max_moves: u32,
}

impl Playout {
    pub fn new(max_moves: u32) -> Self {
        Self { max_moves }
    }

    /// Simulate from `state`.
    ///
    /// A position that is already decided is scored as is. Each move is a
    /// uniform pick among [`Policy::rapid_moves`] for the side to move, and
    /// the game is checked incrementally after every move. Running out of
    /// moves or candidates counts as a draw.
    pub fn simulate(&self, policy: &mut Policy, state: &State) -> GameResult {
        let start = check_win(state.board());
        if start.is_decided() {
            return start;
        }

        let mut tracker = WinTracker::new(state.board());
        let mut current = state.clone();
        for _ in 0..self.max_moves {
            let candidates = policy.rapid_moves(&current);
            let Some(&pos) = candidates.moves.choose(policy.rng_mut()) else {
                return GameResult::Draw;
            };
            let result = tracker.record(current.board(), pos, current.to_move());
            current = current.play(pos);
            if result.is_decided() {
                return result;
            }
        }
        GameResult::Draw
    }

    /// Payoff vector of [`Playout::simulate`], indexed by [`Stone::index`]
    ///
    /// [`Stone::index`]: crate::board::Stone::index
    #[inline]
    pub fn payoffs(&self, policy: &mut Policy, state: &State) -> [f64; 2] {
        self.simulate(policy, state).payoffs()
    }
}

impl Default for Playout {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::config::SearchConfig;

    fn policy() -> Policy {
        Policy::new(&SearchConfig::for_testing())
    }

    #[test]
    fn test_decided_start_is_scored_directly() {
        let state = State::from_rows(&["xxxxx", "oooo.", "....."], Stone::Black).unwrap();
        let result = Playout::default().simulate(&mut policy(), &state);
        assert_eq!(result, GameResult::Won(Stone::White));
        assert_eq!(result.payoffs(), [0.0, 1.0]);
    }

    #[test]
    fn test_full_board_is_a_draw() {
        let state = State::from_rows(&["oxo", "xox", "xox"], Stone::Black).unwrap();
        assert_eq!(Playout::default().payoffs(&mut policy(), &state), [0.5, 0.5]);
    }

    #[test]
    fn test_mover_completes_five() {
        // Black's only rapid candidate is the five square
        let state = State::from_rows(&[".oooo", "xxx..", "....."], Stone::Black).unwrap();
        let result = Playout::new(1).simulate(&mut policy(), &state);
        assert_eq!(result, GameResult::Won(Stone::Black));
    }

    #[test]
    fn test_forced_block() {
        // Unless White blocks at (0, 5), Black's next rapid move is five
        let rows = ["xoooo..", "xxx....", "......."];
        let state = State::from_rows(&rows, Stone::White).unwrap();
        let mut policy = policy();
        for _ in 0..5 {
            let result = Playout::new(2).simulate(&mut policy, &state);
            assert_eq!(result, GameResult::Draw);
        }
    }

    #[test]
    fn test_move_cap_is_a_draw() {
        let state = State::initial(15, 15).unwrap();
        assert_eq!(Playout::new(0).simulate(&mut policy(), &state), GameResult::Draw);
    }

    #[test]
    fn test_start_position_untouched() {
        let state = State::initial(9, 9).unwrap();
        let before = state.clone();
        let _ = Playout::new(10).simulate(&mut policy(), &state);
        assert_eq!(state, before);
    }
}
