//! Move generation from threats and simple heuristics
//!
//! Every policy runs the threat search for both sides and walks the same
//! priority ladder:
//!
//! 1. **Immediate win**: complete our own five
//! 2. **Block**: occupy the opponent's five square
//! 3. **Forced attack**: our shortest forced win, if no deeper than theirs
//! 4. **Forced defense**: the critical squares of their forced wins
//! 5. **Raw threats**: squares that build or block a shape (not `rapid`)
//! 6. **Quiet moves**: center, then squares making a two, then random cells
//!
//! The ladder bottoms out in random empty cells, so a policy only returns no
//! candidates on a full board.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use super::threat::{sort_threats, Threat, ThreatSearcher};
use crate::board::{Board, Pos, State, Stone};
use crate::config::SearchConfig;
use crate::eval::{LevelRange, ThreatLevel};

/// Which rung of the ladder produced a set of candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveSource {
    /// Completes five for the side to move
    ImmediateWin,
    /// Stops the opponent's five
    BlockWin,
    /// Starts the side to move's shortest forced win
    ForcedAttack,
    /// Breaks the opponent's forced wins
    ForcedDefense,
    /// Builds or blocks a shape without a proven win
    Threats,
    /// Board center on an empty-centered board
    Center,
    /// Squares completing a two, or neighbours of existing stones
    Approach,
    /// Random empty cells
    Random,
    /// Board is full
    None,
}

/// Candidate moves for the side to move, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub moves: Vec<Pos>,
    pub source: MoveSource,
}

impl Candidates {
    /// Keep the first occurrence of each square
    fn new(source: MoveSource, moves: impl IntoIterator<Item = Pos>) -> Self {
        let mut seen = HashSet::new();
        let moves = moves.into_iter().filter(|p| seen.insert(*p)).collect();
        Self { moves, source }
    }

    fn none() -> Self {
        Self {
            moves: Vec::new(),
            source: MoveSource::None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Successor states, one per candidate, with the side to move's stone
    /// applied
    pub fn to_states(&self, state: &State) -> Vec<State> {
        self.moves.iter().map(|&pos| state.play(pos)).collect()
    }
}

/// How a tree node generates its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionStrategy {
    /// Threat-driven ladder of [`Policy::balanced_moves`]
    Balanced,
    /// Neighbours of the few stones on the board
    Approach,
}

impl ExpansionStrategy {
    /// Approach while fewer than two stones are down
    pub fn for_state(state: &State) -> Self {
        if state.board().stone_count() > 1 {
            ExpansionStrategy::Balanced
        } else {
            ExpansionStrategy::Approach
        }
    }
}

/// Threat-driven move generator with its own random source.
#[derive(Debug)]
pub struct Policy {
    rng: ChaCha20Rng,
    searcher: ThreatSearcher,
    tss_max_depth: u32,
    critical_depth: u32,
    random_candidates: usize,
    approach_samples: usize,
}

fn tactical_levels() -> LevelRange {
    LevelRange::new(ThreatLevel::Three, ThreatLevel::Five)
}

impl Policy {
    pub fn new(config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self {
            rng,
            searcher: ThreatSearcher::new(),
            tss_max_depth: config.tss_max_depth,
            critical_depth: config.critical_depth,
            random_candidates: config.random_candidates,
            approach_samples: config.approach_samples,
        }
    }

    /// Random source shared with playouts
    #[inline]
    pub fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    /// Gain squares examined by this policy's threat searches
    #[inline]
    pub fn tss_nodes(&self) -> u64 {
        self.searcher.nodes()
    }

    /// Cheap single-ply policy used by playouts: five-square threats only,
    /// then the quiet ladder.
    pub fn rapid_moves(&mut self, state: &State) -> Candidates {
        let me = state.to_move();
        let board = state.board();
        let five = LevelRange::only(ThreatLevel::Five);

        let mut mine = self.searcher.find_threats(board, me, five, 1).threats;
        let mut theirs = self.searcher.find_threats(board, me.opponent(), five, 1).threats;

        if let Some(forced) = self.forced_moves(board, me, &mut mine, &mut theirs) {
            return forced;
        }
        self.quiet_moves(state)
    }

    /// Tactical policy preferring to answer the opponent's threats over
    /// building our own.
    pub fn defensive_moves(&mut self, state: &State) -> Candidates {
        let me = state.to_move();
        let (mut mine, mut theirs) = self.tactical_threats(state);

        if let Some(forced) = self.forced_moves(state.board(), me, &mut mine, &mut theirs) {
            return forced;
        }
        if !theirs.is_empty() {
            trace!(side = %me, count = theirs.len(), "blocking opponent threats");
            return Candidates::new(MoveSource::Threats, theirs.iter().map(|t| t.pos));
        }
        if !mine.is_empty() {
            trace!(side = %me, count = mine.len(), "extending own threats");
            return Candidates::new(MoveSource::Threats, mine.iter().map(|t| t.pos));
        }
        self.quiet_moves(state)
    }

    /// Tactical policy offering both blocking and extending squares.
    pub fn balanced_moves(&mut self, state: &State) -> Candidates {
        let me = state.to_move();
        let (mut mine, mut theirs) = self.tactical_threats(state);

        if let Some(forced) = self.forced_moves(state.board(), me, &mut mine, &mut theirs) {
            return forced;
        }
        if !theirs.is_empty() || !mine.is_empty() {
            trace!(side = %me, theirs = theirs.len(), mine = mine.len(), "balanced threats");
            return Candidates::new(
                MoveSource::Threats,
                theirs.iter().chain(mine.iter()).map(|t| t.pos),
            );
        }
        self.quiet_moves(state)
    }

    /// Empty cells touching existing stones, in random order and capped.
    /// Falls back to the quiet ladder when none survive, e.g. on an empty
    /// board.
    pub fn approach_moves(&mut self, state: &State) -> Candidates {
        let board = state.board();
        let mut near: Vec<Pos> = board
            .empty_cells()
            .filter(|&p| touches_stone(board, p))
            .collect();
        near.shuffle(&mut self.rng);
        near.truncate(self.approach_samples);
        if near.is_empty() {
            return self.quiet_moves(state);
        }
        Candidates::new(MoveSource::Approach, near)
    }

    /// Candidates for a tree node under `strategy`
    pub fn expand(&mut self, state: &State, strategy: ExpansionStrategy) -> Candidates {
        match strategy {
            ExpansionStrategy::Balanced => self.balanced_moves(state),
            ExpansionStrategy::Approach => self.approach_moves(state),
        }
    }

    pub fn rapid_states(&mut self, state: &State) -> Vec<State> {
        self.rapid_moves(state).to_states(state)
    }

    pub fn defensive_states(&mut self, state: &State) -> Vec<State> {
        self.defensive_moves(state).to_states(state)
    }

    pub fn balanced_states(&mut self, state: &State) -> Vec<State> {
        self.balanced_moves(state).to_states(state)
    }

    /// Pick the opponent's winning squares whose occupation leaves the
    /// fewest of the others still winning. All squares sharing the minimum
    /// are returned, in input order.
    pub fn critical_defense<'a>(
        &mut self,
        board: &Board,
        attacker: Stone,
        winning: &[&'a Threat],
    ) -> Vec<&'a Threat> {
        if winning.is_empty() {
            return Vec::new();
        }

        let mut work = board.clone();
        let mut remaining = Vec::with_capacity(winning.len());
        for blocked in winning {
            let mut scope = work.hypothetical();
            scope.place(blocked.pos, attacker.opponent());
            let mut count = 0;
            for other in winning {
                if other.pos == blocked.pos {
                    continue;
                }
                let still_wins = self
                    .searcher
                    .threat_at(&scope, attacker, other.pos, tactical_levels(), self.critical_depth)
                    .is_some_and(|t| t.winning);
                if still_wins {
                    count += 1;
                }
            }
            remaining.push(count);
        }

        let fewest = remaining.iter().copied().min().unwrap_or(0);
        winning
            .iter()
            .zip(remaining)
            .filter(|&(_, count)| count == fewest)
            .map(|(&t, _)| t)
            .collect()
    }

    /// Own and opponent threats at the tactical levels
    fn tactical_threats(&mut self, state: &State) -> (Vec<Threat>, Vec<Threat>) {
        let me = state.to_move();
        let board = state.board();
        let levels = tactical_levels();
        let mine = self.searcher.find_threats(board, me, levels, self.tss_max_depth);
        let theirs = self
            .searcher
            .find_threats(board, me.opponent(), levels, self.tss_max_depth);
        (mine.threats, theirs.threats)
    }

    /// Rungs 1-4 of the ladder. Sorts both threat lists in place.
    fn forced_moves(
        &mut self,
        board: &Board,
        me: Stone,
        mine: &mut [Threat],
        theirs: &mut [Threat],
    ) -> Option<Candidates> {
        sort_threats(mine);
        sort_threats(theirs);
        let my_wins = shortest_wins(mine);

        if let Some(win) = my_wins.iter().find(|t| t.immediate_win) {
            trace!(side = %me, pos = %win.pos, "immediate win");
            return Some(Candidates::new(MoveSource::ImmediateWin, [win.pos]));
        }

        let their_wins = shortest_wins(theirs);
        let critical = self.critical_defense(board, me.opponent(), &their_wins);

        if let Some(five) = critical.iter().find(|t| t.immediate_win) {
            trace!(side = %me, pos = %five.pos, "blocking five");
            return Some(Candidates::new(MoveSource::BlockWin, [five.pos]));
        }

        let my_depth = my_wins.first().and_then(|t| t.min_winning_depth);
        let their_depth = critical.first().and_then(|t| t.min_winning_depth);
        let attack = match (my_depth, their_depth) {
            (Some(mine), Some(theirs)) => mine <= theirs,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if attack {
            debug!(side = %me, depth = ?my_depth, count = my_wins.len(), "forced attack");
            return Some(Candidates::new(
                MoveSource::ForcedAttack,
                my_wins.iter().map(|t| t.pos),
            ));
        }
        if !their_wins.is_empty() {
            debug!(side = %me, depth = ?their_depth, count = critical.len(), "forced defense");
            return Some(Candidates::new(
                MoveSource::ForcedDefense,
                critical.iter().map(|t| t.pos),
            ));
        }
        None
    }

    /// Center, then squares completing a two, then random empty cells.
    fn quiet_moves(&mut self, state: &State) -> Candidates {
        let board = state.board();
        let center = board.center();
        if board.is_empty(center) {
            return Candidates::new(MoveSource::Center, [center]);
        }

        let approach = self.searcher.find_threats(
            board,
            state.to_move(),
            LevelRange::only(ThreatLevel::Two),
            1,
        );
        if !approach.threats.is_empty() {
            return Candidates::new(MoveSource::Approach, approach.threats.iter().map(|t| t.pos));
        }

        let mut cells: Vec<Pos> = board.empty_cells().collect();
        if cells.is_empty() {
            return Candidates::none();
        }
        cells.shuffle(&mut self.rng);
        cells.truncate(self.random_candidates.max(1));
        Candidates::new(MoveSource::Random, cells)
    }
}

/// Winning threats sharing the smallest winning depth, from a list already
/// sorted with [`sort_threats`].
fn shortest_wins(sorted: &[Threat]) -> Vec<&Threat> {
    let Some(best) = sorted
        .first()
        .filter(|t| t.winning)
        .and_then(|t| t.min_winning_depth)
    else {
        return Vec::new();
    };
    sorted
        .iter()
        .take_while(|t| t.winning && t.min_winning_depth == Some(best))
        .collect()
}

fn touches_stone(board: &Board, pos: Pos) -> bool {
    (-1..=1).any(|dr| {
        (-1..=1).any(|dc| {
            (dr, dc) != (0, 0)
                && board
                    .stone_at(pos.row as i32 + dr, pos.col as i32 + dc)
                    .is_some_and(|s| s != Stone::Empty)
        })
    })
}
